use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub member_count: u32,
    pub lobby_count: u32,
    pub room_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<RoomImages>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<UserData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

/// Free-form metadata attached to a room by whoever curates the event.
/// Only the two ordering keys are interpreted; everything else rides along.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_order: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_order: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Room {
    pub fn group_order(&self) -> Option<f64> {
        self.user_data.as_ref().and_then(|data| data.group_order)
    }

    pub fn room_order(&self) -> Option<f64> {
        self.user_data.as_ref().and_then(|data| data.room_order)
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.preview.as_ref())
            .map(|preview| preview.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    pub rooms: Vec<Room>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}
