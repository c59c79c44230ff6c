//! Fractional game accounting.
//!
//! Operators sell games in tenths: `0.1` is one frame bowled by every player
//! on the lane, `1.0` is a full ten-frame round. `GameUnits` stores the
//! count of tenths so repeated decrements never drift.

use serde::{Deserialize, Serialize};

/// A signed count of frame-units (tenths of a game).
///
/// Negative and zero values are representable: a lane can be told it has
/// no games left, and `Lane::set_games` reacts by stopping the pinsetter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameUnits(i32);

impl GameUnits {
    /// No games.
    pub const ZERO: Self = Self(0);
    /// One frame for every player.
    pub const FRAME: Self = Self(1);
    /// One full ten-frame round for every player.
    pub const ROUND: Self = Self(10);

    /// Create from a raw count of tenths.
    #[must_use]
    pub const fn from_tenths(tenths: i32) -> Self {
        Self(tenths)
    }

    /// Convert from the operator-facing fractional value, rounding to the
    /// nearest tenth.
    #[must_use]
    pub fn from_games(games: f64) -> Self {
        Self((games * 10.0).round() as i32)
    }

    /// Raw count of tenths.
    #[must_use]
    pub const fn tenths(self) -> i32 {
        self.0
    }

    /// Operator-facing fractional value.
    #[must_use]
    pub fn as_games(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// True when at least one frame-unit remains.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        self.0 > 0
    }

    /// True when the value is a whole number of rounds.
    #[must_use]
    pub const fn is_whole_rounds(self) -> bool {
        self.0 % Self::ROUND.0 == 0
    }

    /// Subtract, clamping at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self((self.0 - other.0).max(0))
    }
}

impl std::fmt::Display for GameUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} games", self.as_games())
    }
}
