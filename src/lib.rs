pub mod config;
pub mod directory;
pub mod sessions;
pub mod shared;
