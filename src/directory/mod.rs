mod constants;
mod grouping;
mod ordering;
mod page;
mod status;
mod types;
mod visibility;


pub use constants::VIRTUAL_ROOMS_ANCHOR;
pub use grouping::group_rooms;
pub use ordering::{compare_explicit_order, sort_rooms};
pub use page::{
    build_page, resolve_anchor, DirectoryPage, GroupCard, PageOptions, RoomCard, RoomSnapshot,
};
pub use status::{room_status, JoinAction, RoomStatus};
pub use types::{Group, ImageRef, Room, RoomImages, UserData};
pub use visibility::{visible_rooms, Disclosure, VisibleRooms};
