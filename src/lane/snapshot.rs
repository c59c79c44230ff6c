//! Persisted lane state.
//!
//! `LaneSnapshot` is everything a lane needs to come back after a restart:
//! flags, counts, crosslane pairing and the full game with frame history.
//! The on-disk layout is bincode of this struct.

use serde::{Deserialize, Serialize};

use crate::core::{GameUnits, Result};
use crate::game::Game;

/// Serializable lane state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    pub lane_number: u16,
    pub game_active: bool,
    pub pinsetter_active: bool,
    pub service_call: bool,
    pub num_games: GameUnits,
    pub max_players: u8,
    pub crosslane_with: Option<u16>,
    pub game: Option<Game>,
}

impl LaneSnapshot {
    /// Encode to bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bytes produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
