//! Free-mode command parsing.
//!
//! Verb-first with generous synonyms. A bare direction word works as a move
//! command. Parsing never fails; anything unrecognized comes back as
//! [`Command::Unknown`] and the session turns it into a gentle nudge.

use mq_world::Direction;

/// A parsed free-mode command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move through an exit. `None` when no usable direction was given.
    Move(Option<Direction>),
    /// Describe the current room again.
    Look,
    /// Pick up an item by (partial) name. Empty when no name was given.
    Take(String),
    /// List carried items.
    Inventory,
    /// Show the character sheet.
    Stats,
    /// Start a battle with the room's monster.
    Attack,
    /// Use a carried item by (partial) name. Empty when no name was given.
    Use(String),
    /// Start the room's puzzle.
    Solve,
    /// Ask about the calculator outside a challenge.
    Calculator,
    /// Show the command list.
    Help,
    /// Save the game.
    Save,
    /// Load the saved game.
    Load,
    /// End the session.
    Quit,
    /// Anything else, carried verbatim.
    Unknown(String),
}

const MOVE_VERBS: &[&str] = &["go", "move", "walk", "head", "travel"];
const LOOK_VERBS: &[&str] = &["look", "l", "examine", "x"];
const TAKE_VERBS: &[&str] = &["take", "get", "grab", "pick"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i", "bag"];
const STATS_VERBS: &[&str] = &["stats", "status", "st"];
const ATTACK_VERBS: &[&str] = &["attack", "fight", "hit"];
const USE_VERBS: &[&str] = &["use", "apply"];
const SOLVE_VERBS: &[&str] = &["solve", "puzzle", "riddle"];
const CALCULATOR_VERBS: &[&str] = &["calculator", "calc"];
const HELP_VERBS: &[&str] = &["help", "h", "?", "commands"];
const SAVE_VERBS: &[&str] = &["save"];
const LOAD_VERBS: &[&str] = &["load", "restore"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit", "bye"];

/// Parse one line of free-mode input. The input must be non-empty.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let mut words = lowered.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let rest = words.collect::<Vec<_>>().join(" ");

    // A bare direction is a move.
    if let Some(direction) = Direction::parse(verb) {
        return Command::Move(Some(direction));
    }

    if MOVE_VERBS.contains(&verb) {
        return Command::Move(Direction::parse(&rest));
    }
    if LOOK_VERBS.contains(&verb) {
        return Command::Look;
    }
    if TAKE_VERBS.contains(&verb) {
        // "pick up key" and "take up key" both mean "take key".
        let rest = rest.strip_prefix("up ").unwrap_or(&rest);
        return Command::Take(rest.to_string());
    }
    if INVENTORY_VERBS.contains(&verb) {
        return Command::Inventory;
    }
    if STATS_VERBS.contains(&verb) {
        return Command::Stats;
    }
    if ATTACK_VERBS.contains(&verb) {
        return Command::Attack;
    }
    if USE_VERBS.contains(&verb) {
        return Command::Use(rest);
    }
    if SOLVE_VERBS.contains(&verb) {
        return Command::Solve;
    }
    if CALCULATOR_VERBS.contains(&verb) {
        return Command::Calculator;
    }
    if HELP_VERBS.contains(&verb) {
        return Command::Help;
    }
    if SAVE_VERBS.contains(&verb) {
        return Command::Save;
    }
    if LOAD_VERBS.contains(&verb) {
        return Command::Load;
    }
    if QUIT_VERBS.contains(&verb) {
        return Command::Quit;
    }
    Command::Unknown(lowered)
}
