use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::error::{WorldError, WorldResult};
use crate::room::{Room, RoomId};

/// Top-level shape of a world data file.
#[derive(Debug, Deserialize)]
struct WorldData {
    rooms: Vec<Room>,
}

/// The room graph, plus which rooms the player has already seen.
///
/// The first room in the data file is the starting room. Mutation is limited to
/// the handful of operations gameplay needs: defeated monsters and solved
/// puzzles disappear, picked-up items leave their room, and locked rooms can be
/// opened.
#[derive(Debug, Clone)]
pub struct WorldMap {
    rooms: BTreeMap<RoomId, Room>,
    order: Vec<RoomId>,
    visited: BTreeSet<RoomId>,
}

impl WorldMap {
    /// Build a world from a list of rooms, validating IDs and exits.
    pub fn from_rooms(rooms: Vec<Room>) -> WorldResult<Self> {
        if rooms.is_empty() {
            return Err(WorldError::Empty);
        }

        let mut table = BTreeMap::new();
        let mut order = Vec::with_capacity(rooms.len());
        for room in rooms {
            if table.contains_key(&room.id) {
                return Err(WorldError::DuplicateRoom(room.id));
            }
            order.push(room.id.clone());
            table.insert(room.id.clone(), room);
        }

        for room in table.values() {
            for target in room.exits.values() {
                if !table.contains_key(target) {
                    return Err(WorldError::DanglingExit {
                        from: room.id.clone(),
                        to: target.clone(),
                    });
                }
            }
        }

        Ok(Self {
            rooms: table,
            order,
            visited: BTreeSet::new(),
        })
    }

    /// Parse a JSON world file and validate it.
    pub fn from_json(data: &str) -> WorldResult<Self> {
        let data: WorldData = serde_json::from_str(data)?;
        Self::from_rooms(data.rooms)
    }

    /// Look up a room by ID.
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// The starting room: the first room of the data file.
    pub fn start_room(&self) -> &RoomId {
        &self.order[0]
    }

    /// Whether a room ID exists in this world.
    pub fn contains(&self, id: &RoomId) -> bool {
        self.rooms.contains_key(id)
    }

    /// Number of rooms in the world.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the world has no rooms. Always false for a validated world.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Remove the monster from a room, if any.
    pub fn remove_monster(&mut self, id: &RoomId) {
        if let Some(room) = self.rooms.get_mut(id) {
            room.monster = None;
        }
    }

    /// Remove the puzzle from a room, if any.
    pub fn remove_puzzle(&mut self, id: &RoomId) {
        if let Some(room) = self.rooms.get_mut(id) {
            room.puzzle = None;
        }
    }

    /// Remove the first item matching a case-insensitive substring from a room.
    ///
    /// Returns the removed item's full name.
    pub fn remove_item(&mut self, id: &RoomId, pattern: &str) -> Option<String> {
        let room = self.rooms.get_mut(id)?;
        let lower = pattern.to_lowercase();
        let pos = room
            .items
            .iter()
            .position(|item| item.to_lowercase().contains(&lower))?;
        Some(room.items.remove(pos))
    }

    /// Unlock a room.
    pub fn unlock(&mut self, id: &RoomId) {
        if let Some(room) = self.rooms.get_mut(id) {
            room.locked = false;
        }
    }

    /// Whether the player has already seen a room.
    pub fn is_visited(&self, id: &RoomId) -> bool {
        self.visited.contains(id)
    }

    /// Record that the player has seen a room.
    pub fn mark_visited(&mut self, id: &RoomId) {
        self.visited.insert(id.clone());
    }
}
