use super::types::Room;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomStatus {
    #[serde(rename = "canJoin")]
    pub can_join: bool,
    #[serde(rename = "canSpectate")]
    pub can_spectate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinAction {
    Join,
    Spectate,
    Full,
}

/// `max_cap` bounds members plus lobby; `room_size` bounds members alone.
pub fn room_status(room: &Room, max_cap: u32) -> RoomStatus {
    RoomStatus {
        can_join: room.member_count < room.room_size,
        can_spectate: room.member_count.saturating_add(room.lobby_count) < max_cap,
    }
}

impl RoomStatus {
    pub fn action(self) -> JoinAction {
        if !self.can_spectate {
            JoinAction::Full
        } else if self.can_join {
            JoinAction::Join
        } else {
            JoinAction::Spectate
        }
    }
}
