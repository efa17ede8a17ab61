use crate::sessions::SessionLimits;
use anyhow::{bail, Context};
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_MAX_ROOM_CAP: u32 = 50;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;
pub const DEFAULT_MAX_EXPANDED_GROUPS: usize = 256;
pub const DEFAULT_MAX_GROUP_NAME_LEN: usize = 256;

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub port: u16,
    pub max_room_cap: u32,
    pub logo_image: Option<String>,
    pub max_sessions: usize,
    pub session_idle_secs: u64,
    pub max_expanded_groups: usize,
    pub max_group_name_len: usize,
}

impl DirectoryConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            port: lookup("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            max_room_cap: match lookup("MAX_ROOM_CAP") {
                Some(raw) => parse_positive("MAX_ROOM_CAP", &raw)?,
                None => DEFAULT_MAX_ROOM_CAP,
            },
            logo_image: lookup("LOGO_IMAGE")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            max_sessions: match lookup("MAX_SESSIONS") {
                Some(raw) => parse_positive("MAX_SESSIONS", &raw)?,
                None => DEFAULT_MAX_SESSIONS,
            },
            session_idle_secs: match lookup("SESSION_IDLE_SECS") {
                Some(raw) => parse_positive("SESSION_IDLE_SECS", &raw)?,
                None => DEFAULT_SESSION_IDLE_SECS,
            },
            max_expanded_groups: match lookup("MAX_EXPANDED_GROUPS") {
                Some(raw) => parse_positive("MAX_EXPANDED_GROUPS", &raw)?,
                None => DEFAULT_MAX_EXPANDED_GROUPS,
            },
            max_group_name_len: match lookup("MAX_GROUP_NAME_LEN") {
                Some(raw) => parse_positive("MAX_GROUP_NAME_LEN", &raw)?,
                None => DEFAULT_MAX_GROUP_NAME_LEN,
            },
        })
    }

    pub fn session_limits(&self) -> SessionLimits {
        SessionLimits {
            max_sessions: self.max_sessions,
            idle_ttl: Duration::from_secs(self.session_idle_secs),
            max_expanded_groups: self.max_expanded_groups,
            max_group_name_len: self.max_group_name_len,
        }
    }
}

fn parse_positive<T>(var_name: &str, raw: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr + Default + PartialEq,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<T>()
        .with_context(|| format!("{var_name} has invalid value '{trimmed}'"))?;
    if value == T::default() {
        bail!("{var_name} must be a positive integer");
    }
    Ok(value)
}
