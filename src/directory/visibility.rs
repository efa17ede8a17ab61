use super::constants::{COLLAPSED_EMPTY_ROOM_LIMIT, EXPANDED_GROUP_PREFIXES};
use super::types::Room;
use serde::Serialize;

/// Per-group disclosure. The only transition is `Collapsed -> Expanded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disclosure {
    Collapsed,
    Expanded,
}

impl Disclosure {
    pub fn initial_for(group_name: &str) -> Self {
        if EXPANDED_GROUP_PREFIXES
            .iter()
            .any(|prefix| group_name.starts_with(prefix))
        {
            Disclosure::Expanded
        } else {
            Disclosure::Collapsed
        }
    }

    #[must_use]
    pub fn expand(self) -> Self {
        Disclosure::Expanded
    }

    pub fn is_expanded(self) -> bool {
        self == Disclosure::Expanded
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRooms<'a> {
    pub shown: Vec<&'a Room>,
    pub has_more: bool,
}

/// Occupied rooms are always listed; a collapsed group shows at most
/// `COLLAPSED_EMPTY_ROOM_LIMIT` empty ones, in order.
pub fn visible_rooms(ordered_rooms: &[Room], expanded: bool) -> VisibleRooms<'_> {
    if expanded {
        return VisibleRooms {
            shown: ordered_rooms.iter().collect(),
            has_more: false,
        };
    }

    let mut shown = Vec::with_capacity(ordered_rooms.len());
    let mut empty_rooms = 0usize;
    for room in ordered_rooms {
        if room.member_count > 0 {
            shown.push(room);
        } else if empty_rooms < COLLAPSED_EMPTY_ROOM_LIMIT {
            shown.push(room);
            empty_rooms += 1;
        }
    }
    let has_more = shown.len() < ordered_rooms.len();
    VisibleRooms { shown, has_more }
}
