use crate::room::RoomId;

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when loading or validating a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Two rooms in the data share the same ID.
    #[error("duplicate room id: {0}")]
    DuplicateRoom(RoomId),

    /// An exit points at a room that is not defined anywhere.
    #[error("exit from {from} leads to undefined room {to}")]
    DanglingExit {
        /// Room the exit starts from.
        from: RoomId,
        /// Undefined room the exit points at.
        to: RoomId,
    },

    /// The world data contains no rooms at all.
    #[error("world data contains no rooms")]
    Empty,

    /// The world file could not be parsed.
    #[error("invalid world data: {0}")]
    Data(#[from] serde_json::Error),
}
