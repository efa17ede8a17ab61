use super::constants::GROUP_SEPARATOR;
use super::ordering::order_groups;
use super::types::{Group, Room};
use std::collections::HashMap;

/// Splits `"<Group> | <Room>"` names into sections and returns them ordered.
///
/// Any name without exactly one separator becomes a section of its own,
/// keyed by the full name. Sections are matched by exact name, so two
/// unrelated rooms sharing a prefix end up together.
pub fn group_rooms(rooms: Option<&[Room]>) -> Vec<Group> {
    let Some(rooms) = rooms else {
        return Vec::new();
    };

    let mut ranked: Vec<(Option<f64>, Group)> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for room in rooms {
        let (group_name, entry) = split_room_name(room);
        if let Some(&index) = index_by_name.get(group_name) {
            ranked[index].1.rooms.push(entry);
            continue;
        }
        index_by_name.insert(group_name.to_string(), ranked.len());
        ranked.push((
            room.group_order(),
            Group {
                name: group_name.to_string(),
                rooms: vec![entry],
                description: None,
                thumbnail: None,
            },
        ));
    }

    tracing::trace!(
        rooms = rooms.len(),
        groups = ranked.len(),
        "grouped room snapshot"
    );
    order_groups(ranked)
}

fn split_room_name(room: &Room) -> (&str, Room) {
    let mut parts = room.name.split(GROUP_SEPARATOR);
    if let (Some(group_name), Some(room_name), None) = (parts.next(), parts.next(), parts.next()) {
        let entry = Room {
            name: room_name.to_string(),
            ..room.clone()
        };
        return (group_name, entry);
    }
    (room.name.as_str(), room.clone())
}
