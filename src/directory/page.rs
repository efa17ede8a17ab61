use super::constants::VIRTUAL_ROOMS_ANCHOR;
use super::grouping::group_rooms;
use super::status::{room_status, JoinAction};
use super::types::{Group, Room};
use super::visibility::{visible_rooms, Disclosure};
use crate::shared::slug::slug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The two room lists the lobby renders, each supplied independently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomSnapshot {
    #[serde(default, rename = "publicRooms")]
    pub public_rooms: Option<Vec<Room>>,
    #[serde(default, rename = "favoritedRooms")]
    pub favorited_rooms: Option<Vec<Room>>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageOptions<'a> {
    pub max_room_cap: u32,
    pub logo: Option<&'a str>,
    /// Group names the viewer has asked to see in full.
    pub expanded: &'a HashSet<String>,
    pub fragment: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryPage {
    pub favorites: Vec<GroupCard>,
    pub groups: Vec<GroupCard>,
    pub loading: bool,
    pub logo: Option<String>,
    #[serde(rename = "scrollTo")]
    pub scroll_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCard {
    pub id: String,
    pub anchor: String,
    pub name: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub disclosure: Disclosure,
    pub rooms: Vec<RoomCard>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    #[serde(rename = "hiddenCount")]
    pub hidden_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomCard {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    #[serde(rename = "memberCount")]
    pub member_count: u32,
    #[serde(rename = "roomSize")]
    pub room_size: u32,
    pub occupancy: String,
    #[serde(rename = "canJoin")]
    pub can_join: bool,
    #[serde(rename = "canSpectate")]
    pub can_spectate: bool,
    pub action: JoinAction,
}

pub fn build_page(snapshot: &RoomSnapshot, options: PageOptions<'_>) -> DirectoryPage {
    let favorites = group_cards(snapshot.favorited_rooms.as_deref(), &options);
    let groups = group_cards(snapshot.public_rooms.as_deref(), &options);
    tracing::debug!(
        favorites = favorites.len(),
        groups = groups.len(),
        max_room_cap = options.max_room_cap,
        "built directory page"
    );

    let mut page = DirectoryPage {
        loading: groups.is_empty(),
        favorites,
        groups,
        logo: options.logo.map(str::to_string),
        scroll_to: None,
    };
    // Nothing scrolls until the public list has arrived, even when a
    // favorites card would match.
    let scroll_to = options
        .fragment
        .filter(|_| snapshot.public_rooms.is_some())
        .and_then(|fragment| resolve_anchor(fragment, &page))
        .map(str::to_string);
    page.scroll_to = scroll_to;
    page
}

fn group_cards(rooms: Option<&[Room]>, options: &PageOptions<'_>) -> Vec<GroupCard> {
    group_rooms(rooms)
        .into_iter()
        .map(|group| group_card(group, options))
        .collect()
}

fn group_card(group: Group, options: &PageOptions<'_>) -> GroupCard {
    let mut disclosure = Disclosure::initial_for(&group.name);
    if options.expanded.contains(&group.name) {
        disclosure = disclosure.expand();
    }

    let visible = visible_rooms(&group.rooms, disclosure.is_expanded());
    let rooms = visible
        .shown
        .iter()
        .map(|room| room_card(room, options.max_room_cap))
        .collect::<Vec<_>>();
    let id = slug(&group.name);

    GroupCard {
        anchor: format!("#{id}"),
        id,
        hidden_count: group.rooms.len() - rooms.len(),
        has_more: visible.has_more,
        rooms,
        disclosure,
        name: group.name,
        description: group.description,
        thumbnail: group.thumbnail,
    }
}

fn room_card(room: &Room, max_room_cap: u32) -> RoomCard {
    let status = room_status(room, max_room_cap);
    RoomCard {
        id: room.id.clone(),
        name: room.name.clone(),
        url: room.url.clone(),
        member_count: room.member_count,
        room_size: room.room_size,
        occupancy: format!("{} / {}", room.member_count, room.room_size),
        can_join: status.can_join,
        can_spectate: status.can_spectate,
        action: status.action(),
    }
}

/// Maps a URL fragment to the first anchor on the page that carries it.
/// Cards are searched in render order: favorites, the room list header,
/// then public groups. Anything unresolvable yields `None`.
pub fn resolve_anchor<'a>(fragment: &str, page: &'a DirectoryPage) -> Option<&'a str> {
    let wanted = fragment
        .chars()
        .filter(|ch| *ch != '#' && *ch != '/')
        .collect::<String>();
    if wanted.is_empty() {
        return None;
    }

    if let Some(card) = page.favorites.iter().find(|card| card.id == wanted) {
        return Some(card.id.as_str());
    }
    if wanted == VIRTUAL_ROOMS_ANCHOR {
        return Some(VIRTUAL_ROOMS_ANCHOR);
    }
    page.groups
        .iter()
        .find(|card| card.id == wanted)
        .map(|card| card.id.as_str())
}
