//! Session state machine and challenge engine for MathQuest.
//!
//! The engine owns everything with real state and policy: the session mode
//! machine (free exploration, challenge, calculator debt, remedial encounter),
//! procedural problem generation, tolerant answer validation, the battle
//! countdown, and the player's progression economy. World data and
//! presentation are collaborators: rooms come from `mq-world`, text leaves
//! through the [`GameIo`] sink, and saves go through the [`SaveStore`] trait.

/// Tolerant free-text answer validation.
pub mod answers;
/// Puzzle challenges, the calculator shortcut, and debt repayment.
pub mod challenge;
/// Battle entry and round progression.
pub mod combat;
/// Free-mode command parsing.
pub mod command;
/// Error types for engine construction.
pub mod error;
/// Procedural arithmetic problem generation.
pub mod generator;
/// Output and persistence hooks.
pub mod hooks;
/// Player progression and economy state.
pub mod player;
/// Generated problem values.
pub mod problem;
/// The Math Beast remedial encounter.
pub mod remedial;
/// The session coordinator.
pub mod session;
/// The polled battle countdown and its clock abstraction.
pub mod timer;

pub use command::{Command, parse_command};
pub use error::{EngineError, EngineResult};
pub use generator::ProblemGenerator;
pub use hooks::{GameIo, MemoryIo, MemoryStore, SaveStore};
pub use player::{DebtEntry, Player, PlayerSnapshot};
pub use problem::Problem;
pub use remedial::{RemedialEncounter, RemedialOutcome};
pub use session::Engine;
pub use timer::{BattleTimer, Clock, ManualClock, SystemClock};
