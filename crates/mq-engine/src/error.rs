use mq_world::RoomId;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur when constructing an engine.
///
/// Everything that happens after construction is gameplay and is reported as a
/// printed message, never as an error value.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The player's current room does not exist in the world.
    #[error("player is in an unknown room: {0}")]
    UnknownRoom(RoomId),
}
