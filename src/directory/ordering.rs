use super::types::{Group, Room};
use std::cmp::Ordering;

/// Explicitly ranked entries come first, ascending; unranked ones keep their
/// relative order behind them. Callers must pair this with a stable sort.
pub fn compare_explicit_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn sort_rooms(rooms: &mut [Room]) {
    rooms.sort_by(|a, b| compare_explicit_order(a.room_order(), b.room_order()));
}

/// Sorts groups by their captured `group_order`, then orders each group's
/// rooms and refreshes the description and thumbnail from the new head room.
pub(super) fn order_groups(mut ranked: Vec<(Option<f64>, Group)>) -> Vec<Group> {
    ranked.sort_by(|(a, _), (b, _)| compare_explicit_order(*a, *b));
    ranked
        .into_iter()
        .map(|(_, mut group)| {
            sort_rooms(&mut group.rooms);
            let head = group.rooms.first();
            group.description = head.and_then(|room| room.description.clone());
            group.thumbnail = head.and_then(|room| room.preview_url().map(str::to_string));
            group
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::compare_explicit_order;
    use std::cmp::Ordering;

    #[test]
    fn ranked_entries_sort_before_unranked() {
        assert_eq!(compare_explicit_order(Some(9.0), None), Ordering::Less);
        assert_eq!(compare_explicit_order(None, Some(-3.0)), Ordering::Greater);
        assert_eq!(compare_explicit_order(None, None), Ordering::Equal);
    }

    #[test]
    fn ranked_entries_compare_numerically() {
        assert_eq!(compare_explicit_order(Some(1.5), Some(2.0)), Ordering::Less);
        assert_eq!(compare_explicit_order(Some(10.0), Some(2.0)), Ordering::Greater);
        assert_eq!(compare_explicit_order(Some(3.0), Some(3.0)), Ordering::Equal);
    }

    #[test]
    fn nan_ranks_do_not_break_total_order() {
        let mut values = vec![Some(f64::NAN), Some(1.0), None, Some(0.5)];
        values.sort_by(|a, b| compare_explicit_order(*a, *b));
        assert_eq!(values[0], Some(0.5));
        assert_eq!(values[1], Some(1.0));
        assert!(values[2].is_some_and(f64::is_nan));
        assert_eq!(values[3], None);
    }
}
