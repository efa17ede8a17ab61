pub const GROUP_SEPARATOR: &str = " | ";
pub const COLLAPSED_EMPTY_ROOM_LIMIT: usize = 3;
pub const EXPANDED_GROUP_PREFIXES: [&str; 2] = ["Track ", "Three Conference Streams"];
pub const VIRTUAL_ROOMS_ANCHOR: &str = "virtual-rooms";
