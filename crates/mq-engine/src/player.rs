//! Player progression, economy, and the calculator debt queue.

use mq_world::{Category, RoomId};
use serde::{Deserialize, Serialize};

/// Cumulative XP required to reach each level beyond the current one.
///
/// Index 0 is unused padding so `XP_PER_LEVEL[level]` is the threshold for
/// leaving `level`. Past the table the player is maxed out.
pub const XP_PER_LEVEL: [u32; 10] = [0, 100, 250, 500, 800, 1200, 1700, 2300, 3000, 4000];

/// How many calculators a player can carry at once.
pub const MAX_CALCULATORS: u32 = 3;

/// Max HP gained on every level-up.
pub const LEVEL_UP_HP_BONUS: u32 = 10;

const STARTING_HP: u32 = 100;
const STARTING_GOLD: u32 = 10;

/// One deferred problem owed after a calculator use.
///
/// Only the recipe is recorded; a fresh problem of the same shape is
/// generated when the debt comes due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtEntry {
    /// Category of the problem the calculator solved.
    pub category: Category,
    /// Difficulty tier of the problem the calculator solved.
    pub difficulty: u8,
}

/// Live player state.
///
/// Everything except `challenge_errors` round-trips through
/// [`PlayerSnapshot`]; the error streak is per-challenge scratch state and
/// deliberately resets on load.
#[derive(Debug, Clone)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Current hit points.
    pub hp: u32,
    /// Hit point ceiling, raised by level-ups.
    pub max_hp: u32,
    /// Lifetime experience points.
    pub xp: u32,
    /// Current level, starting at 1.
    pub level: u32,
    /// Gold on hand.
    pub gold: u32,
    /// Room the player is standing in.
    pub current_room: RoomId,
    /// Carried item names, calculators excluded.
    pub inventory: Vec<String>,
    /// Calculators on hand.
    pub calculators: u32,
    /// Outstanding calculator debts, oldest first.
    pub debts: Vec<DebtEntry>,
    /// Puzzle ids already solved.
    pub solved_puzzles: Vec<String>,
    /// Lifetime wrong answers, for the stats screen.
    pub wrong_answers: u32,
    /// Consecutive wrong answers in the current challenge.
    pub challenge_errors: u32,
}

/// The serialized form of a [`Player`], written by save and read by load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Display name.
    pub name: String,
    /// Current hit points.
    pub hp: u32,
    /// Hit point ceiling.
    pub max_hp: u32,
    /// Lifetime experience points.
    pub xp: u32,
    /// Current level.
    pub level: u32,
    /// Gold on hand.
    pub gold: u32,
    /// Room the player is standing in.
    pub current_room: RoomId,
    /// Carried item names.
    pub inventory: Vec<String>,
    /// Calculators on hand.
    pub calculators: u32,
    /// Outstanding calculator debts, oldest first.
    #[serde(default)]
    pub debts: Vec<DebtEntry>,
    /// Puzzle ids already solved.
    #[serde(default)]
    pub solved_puzzles: Vec<String>,
    /// Lifetime wrong answers.
    #[serde(default)]
    pub wrong_answers: u32,
}

impl Player {
    /// Create a fresh level-1 player standing in `start_room`.
    pub fn new(name: impl Into<String>, start_room: RoomId) -> Self {
        Self {
            name: name.into(),
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            xp: 0,
            level: 1,
            gold: STARTING_GOLD,
            current_room: start_room,
            inventory: Vec::new(),
            calculators: 0,
            debts: Vec::new(),
            solved_puzzles: Vec::new(),
            wrong_answers: 0,
            challenge_errors: 0,
        }
    }

    /// Rebuild a player from a saved snapshot.
    pub fn from_snapshot(snapshot: PlayerSnapshot) -> Self {
        Self {
            name: snapshot.name,
            hp: snapshot.hp,
            max_hp: snapshot.max_hp,
            xp: snapshot.xp,
            level: snapshot.level,
            gold: snapshot.gold,
            current_room: snapshot.current_room,
            inventory: snapshot.inventory,
            calculators: snapshot.calculators,
            debts: snapshot.debts,
            solved_puzzles: snapshot.solved_puzzles,
            wrong_answers: snapshot.wrong_answers,
            challenge_errors: 0,
        }
    }

    /// Capture the persistent portion of this player.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.name.clone(),
            hp: self.hp,
            max_hp: self.max_hp,
            xp: self.xp,
            level: self.level,
            gold: self.gold,
            current_room: self.current_room.clone(),
            inventory: self.inventory.clone(),
            calculators: self.calculators,
            debts: self.debts.clone(),
            solved_puzzles: self.solved_puzzles.clone(),
            wrong_answers: self.wrong_answers,
        }
    }

    /// Add experience, applying every level-up the new total crosses.
    ///
    /// Each level-up raises max HP by [`LEVEL_UP_HP_BONUS`] and heals to
    /// full. Returns true if at least one level was gained.
    pub fn add_xp(&mut self, amount: u32) -> bool {
        self.xp += amount;
        let mut leveled = false;
        while (self.level as usize) < XP_PER_LEVEL.len()
            && self.xp >= XP_PER_LEVEL[self.level as usize]
        {
            self.level += 1;
            self.max_hp += LEVEL_UP_HP_BONUS;
            self.hp = self.max_hp;
            leveled = true;
        }
        leveled
    }

    /// XP threshold for the next level, or the current total when maxed.
    pub fn xp_target(&self) -> u32 {
        XP_PER_LEVEL
            .get(self.level as usize)
            .copied()
            .unwrap_or(self.xp)
    }

    /// Add gold.
    pub fn add_gold(&mut self, amount: u32) {
        self.gold += amount;
    }

    /// Heal up to `amount`, capped at max HP. Returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Lose up to `amount` HP, floored at zero. Returns whether still standing.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp > 0
    }

    /// Pick up a calculator. Returns false when already carrying the maximum.
    pub fn add_calculator(&mut self) -> bool {
        if self.calculators >= MAX_CALCULATORS {
            return false;
        }
        self.calculators += 1;
        true
    }

    /// Spend a calculator. Returns false when none are carried.
    pub fn use_calculator(&mut self) -> bool {
        if self.calculators == 0 {
            return false;
        }
        self.calculators -= 1;
        true
    }

    /// Record a debt owed for a calculator-solved problem.
    pub fn add_debt(&mut self, category: Category, difficulty: u8) {
        self.debts.push(DebtEntry {
            category,
            difficulty,
        });
    }

    /// The oldest outstanding debt, if any.
    pub fn peek_debt(&self) -> Option<&DebtEntry> {
        self.debts.first()
    }

    /// Settle the oldest outstanding debt.
    pub fn pop_debt(&mut self) -> Option<DebtEntry> {
        if self.debts.is_empty() {
            None
        } else {
            Some(self.debts.remove(0))
        }
    }

    /// Whether any calculator debt is outstanding.
    pub fn has_debt(&self) -> bool {
        !self.debts.is_empty()
    }

    /// Add an ordinary item to the inventory.
    pub fn add_item(&mut self, name: impl Into<String>) {
        self.inventory.push(name.into());
    }

    /// Find a carried item by case-insensitive substring.
    pub fn find_item(&self, pattern: &str) -> Option<&str> {
        let needle = pattern.to_lowercase();
        self.inventory
            .iter()
            .find(|item| item.to_lowercase().contains(&needle))
            .map(String::as_str)
    }

    /// Whether any carried item matches a case-insensitive substring.
    pub fn has_item(&self, pattern: &str) -> bool {
        self.find_item(pattern).is_some()
    }

    /// Drop a carried item by exact name. Returns false if absent.
    pub fn remove_item(&mut self, name: &str) -> bool {
        if let Some(index) = self.inventory.iter().position(|item| item == name) {
            self.inventory.remove(index);
            true
        } else {
            false
        }
    }

    /// Record a puzzle as solved.
    pub fn mark_puzzle_solved(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.solved_puzzles.contains(&id) {
            self.solved_puzzles.push(id);
        }
    }
}
