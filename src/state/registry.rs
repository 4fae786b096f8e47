//! The room registry: room name to [`Room`].

use super::Room;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// All known rooms, keyed by name.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a room, creating it on first use.
    pub fn get_or_create(&mut self, name: &str) -> &mut Room {
        match self.rooms.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(room = %name, "Room created");
                entry.insert(Room::new(name))
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.rooms.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Room> {
        self.rooms.remove(name)
    }

    /// Room names in lexical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rooms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }
}
