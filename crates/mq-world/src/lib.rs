//! World model for MathQuest.
//!
//! A world is a fixed graph of rooms connected by directional exits. Rooms can
//! hold items, a monster guarding the exits, or an arithmetic puzzle. This crate
//! is pure data plus simple accessors and mutators; all gameplay policy lives in
//! `mq-engine`.

/// Arithmetic problem categories.
pub mod category;
/// Compass directions for room exits.
pub mod direction;
/// Error types for world loading and validation.
pub mod error;
/// Rooms and their contents.
pub mod room;
/// The room graph and its mutation interface.
pub mod world;

pub use category::Category;
pub use direction::Direction;
pub use error::{WorldError, WorldResult};
pub use room::{Monster, Puzzle, Room, RoomId};
pub use world::WorldMap;
