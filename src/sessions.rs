use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    pub max_sessions: usize,
    pub idle_ttl: Duration,
    pub max_expanded_groups: usize,
    pub max_group_name_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandRejection {
    UnknownSession,
    GroupNameTooLong,
    TooManyGroups,
}

#[derive(Debug)]
struct SessionEntry {
    expanded: HashSet<String>,
    last_used: Instant,
}

/// Which groups each viewer has opened. Groups are only ever added, matching
/// the one-way disclosure of a group card. Sessions idle past `idle_ttl` are
/// evicted by `evict_idle`, and before a full store refuses a new session.
#[derive(Debug)]
pub struct ExpansionStore {
    sessions: DashMap<String, SessionEntry>,
    reserved: AtomicUsize,
    limits: SessionLimits,
}

impl ExpansionStore {
    pub fn new(limits: SessionLimits) -> Self {
        Self {
            sessions: DashMap::new(),
            reserved: AtomicUsize::new(0),
            limits,
        }
    }

    /// Returns `None` when the store is full of sessions that are still live.
    pub fn create_session(&self) -> Option<String> {
        self.create_session_at(Instant::now())
    }

    fn create_session_at(&self, now: Instant) -> Option<String> {
        if !self.try_reserve() {
            self.evict_idle_at(now);
            if !self.try_reserve() {
                return None;
            }
        }
        let session_id = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            session_id.clone(),
            SessionEntry {
                expanded: HashSet::new(),
                last_used: now,
            },
        );
        Some(session_id)
    }

    fn try_reserve(&self) -> bool {
        let max_sessions = self.limits.max_sessions;
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count < max_sessions).then_some(count + 1)
            })
            .is_ok()
    }

    /// Drops every session unused for longer than the idle ttl and returns
    /// how many were removed.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now())
    }

    fn evict_idle_at(&self, now: Instant) -> usize {
        let idle_ttl = self.limits.idle_ttl;
        let mut evicted = 0usize;
        self.sessions.retain(|_, entry| {
            let keep = now.saturating_duration_since(entry.last_used) < idle_ttl;
            if !keep {
                evicted += 1;
            }
            keep
        });
        if evicted > 0 {
            self.reserved.fetch_sub(evicted, Ordering::AcqRel);
            tracing::debug!(evicted, "evicted idle sessions");
        }
        evicted
    }

    /// Records a "show more" for `group`. Re-expanding a group is always
    /// accepted; new groups are bounded per session.
    pub fn expand(&self, session_id: &str, group: &str) -> Result<(), ExpandRejection> {
        self.expand_at(session_id, group, Instant::now())
    }

    fn expand_at(
        &self,
        session_id: &str,
        group: &str,
        now: Instant,
    ) -> Result<(), ExpandRejection> {
        let Some(mut entry) = self.sessions.get_mut(session_id) else {
            return Err(ExpandRejection::UnknownSession);
        };
        entry.last_used = now;
        if entry.expanded.contains(group) {
            return Ok(());
        }
        if group.len() > self.limits.max_group_name_len {
            return Err(ExpandRejection::GroupNameTooLong);
        }
        if entry.expanded.len() >= self.limits.max_expanded_groups {
            return Err(ExpandRejection::TooManyGroups);
        }
        entry.expanded.insert(group.to_string());
        Ok(())
    }

    pub fn expanded_groups(&self, session_id: &str) -> Option<HashSet<String>> {
        let mut entry = self.sessions.get_mut(session_id)?;
        entry.last_used = Instant::now();
        Some(entry.expanded.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
