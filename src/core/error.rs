//! Error type shared by every lane operation.
//!
//! Validation rejections leave state untouched. Advisory conditions are not
//! errors at all: they come back as `bool` flags or outcome fields.

use thiserror::Error;

/// Errors returned by scoring, rotation and lane operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaneError {
    /// A roll named a pin that does not exist on the frame.
    #[error("pin {pin} does not exist on this frame")]
    InvalidPin { pin: u8 },

    /// The frame has used all of its rolls.
    #[error("frame {frame} has no rolls left")]
    FrameFinished { frame: u8 },

    /// A current-player operation was attempted on an empty roster.
    #[error("game has no players")]
    NoPlayers,

    /// The lane has no active game.
    #[error("no active game on this lane")]
    NoActiveGame,

    /// The game has used up all of its frame-units.
    #[error("game is complete")]
    GameComplete,

    /// Another player already holds this turn position.
    #[error("turn order {order} is already taken")]
    DuplicateOrder { order: u8 },

    /// Lane number outside the facility.
    #[error("lane {lane} is not in a facility of {lane_count} lanes")]
    UnknownLane { lane: u16, lane_count: u16 },

    /// Facility configuration declared no lanes, or the source failed.
    #[error("invalid facility configuration: {0}")]
    InvalidSetup(String),

    /// Lane snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl LaneError {
    /// True for validation rejections, where the caller's request was refused
    /// and nothing was mutated.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, LaneError::InvalidSetup(_) | LaneError::Snapshot(_))
    }
}

impl From<bincode::Error> for LaneError {
    fn from(err: bincode::Error) -> Self {
        LaneError::Snapshot(err.to_string())
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, LaneError>;
