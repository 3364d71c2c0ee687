use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::direction::Direction;

/// Identifier for a room, unique within a world.
///
/// Room IDs are written by hand in world data files, so this is a transparent
/// wrapper over the author's string rather than a generated ID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Create a room ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A monster guarding a room.
///
/// Monsters block every exit until the player has answered `required_wins`
/// problems of the configured category and difficulty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    /// Unique monster ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The monster's taunt, shown when entering the room.
    pub description: String,
    /// Problem category used in battle.
    pub category: Category,
    /// Problem difficulty used in battle.
    pub difficulty: u8,
    /// XP granted on defeat.
    pub reward_xp: u32,
    /// Gold granted on defeat.
    pub reward_gold: u32,
    /// Text shown when the monster is defeated.
    pub defeat_message: String,
    /// How many correct answers the battle takes.
    #[serde(default = "default_required_wins")]
    pub required_wins: u32,
}

fn default_required_wins() -> u32 {
    3
}

/// An arithmetic puzzle placed in a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    /// Unique puzzle ID, recorded in the player's solved set.
    pub id: String,
    /// Problem category.
    pub category: Category,
    /// Problem difficulty.
    pub difficulty: u8,
    /// Flavor text introducing the puzzle.
    pub description: String,
    /// XP granted on solve.
    pub reward_xp: u32,
    /// Gold granted on solve.
    pub reward_gold: u32,
    /// Whether the puzzle blocks movement until solved.
    #[serde(default)]
    pub required: bool,
}

/// A single room in the world graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room ID.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// Room description, shown on every look.
    pub description: String,
    /// Extra text shown the first time the room is rendered.
    #[serde(default)]
    pub first_visit_text: Option<String>,
    /// Exits by direction.
    #[serde(default)]
    pub exits: BTreeMap<Direction, RoomId>,
    /// Items lying in the room. Duplicates are allowed.
    #[serde(default)]
    pub items: Vec<String>,
    /// The monster guarding this room, if any.
    #[serde(default)]
    pub monster: Option<Monster>,
    /// The puzzle in this room, if any.
    #[serde(default)]
    pub puzzle: Option<Puzzle>,
    /// Whether the room is locked against entry.
    #[serde(default)]
    pub locked: bool,
    /// Message shown when entry is refused, if locked.
    #[serde(default)]
    pub lock_message: Option<String>,
}

impl Room {
    /// Find an item in this room by case-insensitive substring match.
    pub fn find_item(&self, pattern: &str) -> Option<&str> {
        let lower = pattern.to_lowercase();
        self.items
            .iter()
            .find(|item| item.to_lowercase().contains(&lower))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cellar() -> Room {
        Room {
            id: RoomId::new("cellar"),
            name: "The Cellar".to_string(),
            description: "A damp cellar.".to_string(),
            first_visit_text: None,
            exits: BTreeMap::new(),
            items: vec!["Brass Key".to_string(), "Healing Potion".to_string()],
            monster: None,
            puzzle: None,
            locked: false,
            lock_message: None,
        }
    }

    #[test]
    fn find_item_is_case_insensitive_substring() {
        let room = cellar();
        assert_eq!(room.find_item("key"), Some("Brass Key"));
        assert_eq!(room.find_item("POTION"), Some("Healing Potion"));
        assert_eq!(room.find_item("sword"), None);
    }

    #[test]
    fn room_deserializes_with_defaults() {
        let json = r#"{
            "id": "hall",
            "name": "Hall",
            "description": "An empty hall."
        }"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert!(room.exits.is_empty());
        assert!(room.items.is_empty());
        assert!(room.monster.is_none());
        assert!(room.puzzle.is_none());
        assert!(!room.locked);
    }

    #[test]
    fn monster_required_wins_defaults_to_three() {
        let json = r#"{
            "id": "golem",
            "name": "Stone Golem",
            "description": "HALT!",
            "category": "addition",
            "difficulty": 2,
            "reward_xp": 50,
            "reward_gold": 25,
            "defeat_message": "The golem steps aside."
        }"#;
        let monster: Monster = serde_json::from_str(json).unwrap();
        assert_eq!(monster.required_wins, 3);
    }
}
