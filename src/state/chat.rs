//! Shared chat state owned by the dispatcher task.
//!
//! Nothing in here is `Sync`-guarded: the dispatcher is the only task that
//! ever holds a `ChatState`, so every method runs to completion without
//! another mutation interleaving.

use super::{RoomRegistry, SessionEntry, SessionHandle, SessionId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};

/// Room registry plus every attached session.
#[derive(Debug, Default)]
pub struct ChatState {
    pub rooms: RoomRegistry,
    sessions: HashMap<SessionId, SessionEntry>,
    prune_empty_rooms: bool,
}

impl ChatState {
    pub fn new(prune_empty_rooms: bool) -> Self {
        Self {
            rooms: RoomRegistry::new(),
            sessions: HashMap::new(),
            prune_empty_rooms,
        }
    }

    /// Register a freshly accepted connection.
    pub fn attach(&mut self, handle: SessionHandle) {
        let id = handle.id();
        if self.sessions.insert(id, SessionEntry::new(handle)).is_some() {
            // Ids are unique per process; a repeat means a replayed attach.
            debug!(session = %id, "Session re-attached, state reset");
        }
    }

    /// Forget a session. The caller must have run [`Self::leave_current_room`].
    pub fn detach(&mut self, id: SessionId) -> Option<SessionEntry> {
        self.sessions.remove(&id)
    }

    pub fn session(&self, id: SessionId) -> Option<&SessionEntry> {
        self.sessions.get(&id)
    }

    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut SessionEntry> {
        self.sessions.get_mut(&id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Remove the session from its current room and tell the remaining
    /// members. Returns `false` when the session was not in a room.
    pub fn leave_current_room(&mut self, id: SessionId) -> bool {
        let Some(entry) = self.sessions.get_mut(&id) else {
            return false;
        };
        let Some(room_name) = entry.room.take() else {
            return false;
        };
        let nick = entry.nick.clone();

        let Some(room) = self.rooms.get_mut(&room_name) else {
            return false;
        };
        if room.remove(id).is_none() {
            return false;
        }

        room.broadcast(id, &format!("{nick} has left the room"));
        info!(session = %id, room = %room_name, nick = %nick, "Left room");

        if self.prune_empty_rooms && room.is_empty() {
            self.rooms.remove(&room_name);
            debug!(room = %room_name, "Empty room pruned");
        }
        true
    }

    /// Copy of the current state for inspection.
    pub fn snapshot(&self) -> ChatSnapshot {
        let rooms = self
            .rooms
            .iter()
            .map(|room| (room.name().to_string(), room.member_ids().collect()))
            .collect();
        let sessions = self
            .sessions
            .iter()
            .map(|(id, entry)| {
                (
                    *id,
                    SessionSnapshot {
                        nick: entry.nick.clone(),
                        room: entry.room.clone(),
                    },
                )
            })
            .collect();

        ChatSnapshot {
            rooms,
            sessions,
            command_counts: BTreeMap::new(),
        }
    }
}

/// Point-in-time view of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub nick: String,
    pub room: Option<String>,
}

/// Point-in-time view of the dispatcher's state.
#[derive(Debug, Clone, Default)]
pub struct ChatSnapshot {
    /// Room name to member ids.
    pub rooms: BTreeMap<String, BTreeSet<SessionId>>,
    /// Attached sessions.
    pub sessions: BTreeMap<SessionId, SessionSnapshot>,
    /// Commands executed so far, by command word.
    pub command_counts: BTreeMap<&'static str, u64>,
}

impl ChatSnapshot {
    /// Rooms that list `id` as a member.
    pub fn rooms_of(&self, id: SessionId) -> Vec<&str> {
        self.rooms
            .iter()
            .filter(|(_, members)| members.contains(&id))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn members(&self, room: &str) -> Option<&BTreeSet<SessionId>> {
        self.rooms.get(room)
    }

    pub fn room_names(&self) -> Vec<&str> {
        self.rooms.keys().map(String::as_str).collect()
    }

    /// Every session is in at most one room, and each session's cached room
    /// agrees with the registry.
    pub fn is_consistent(&self) -> bool {
        let mut seen = BTreeSet::new();
        for members in self.rooms.values() {
            for id in members {
                if !seen.insert(*id) {
                    return false;
                }
            }
        }

        self.sessions.iter().all(|(id, session)| {
            let rooms = self.rooms_of(*id);
            match &session.room {
                Some(room) => rooms == [room.as_str()],
                None => rooms.is_empty(),
            }
        }) && seen.iter().all(|id| self.sessions.contains_key(id))
    }
}
