//! Rooms: named broadcast groups.
//!
//! A [`Room`] is a passive data holder plus the fan-out algorithm. It is
//! only ever touched from inside the dispatcher task, so membership changes
//! and broadcasts on the same room never overlap.

use super::{SessionHandle, SessionId};
use std::collections::HashMap;
use tracing::debug;

/// One named room and its members.
#[derive(Debug)]
pub struct Room {
    name: String,
    members: HashMap<SessionId, SessionHandle>,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a member. Re-inserting an existing member refreshes its handle.
    pub fn insert(&mut self, handle: SessionHandle) {
        self.members.insert(handle.id(), handle);
    }

    pub fn remove(&mut self, id: SessionId) -> Option<SessionHandle> {
        self.members.remove(&id)
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_ids(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.members.keys().copied()
    }

    /// Deliver `text` to every member except `sender`.
    ///
    /// A failed delivery to one member does not affect the rest. Returns the
    /// number of members the line was queued for.
    pub fn broadcast(&self, sender: SessionId, text: &str) -> usize {
        let mut delivered = 0;
        let mut dropped = 0;

        for (id, member) in &self.members {
            if *id == sender {
                continue;
            }
            if member.deliver(text) {
                delivered += 1;
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            debug!(room = %self.name, delivered, dropped, "Broadcast partially delivered");
        }
        delivered
    }
}
