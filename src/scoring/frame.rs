//! One player's turn: ten pins and up to three rolls.
//!
//! A `Frame` only records what happened. It classifies the first two rolls
//! (strike, spare, split) but never decides that the turn is over; the
//! rotation layer reads the classification and makes that call.
//!
//! ## Frame variants
//!
//! `FrameKind` carries the per-variant rules. Classification dispatches on
//! the kind instead of on a type hierarchy.
//!
//! ## Example
//!
//! ```
//! use openbowler::{Frame, FrameKind, LaneError};
//!
//! let mut frame = Frame::new(1, FrameKind::TenPin);
//!
//! // Leave the 7-10
//! let first = frame.roll(&[1, 2, 3, 4, 5, 6, 8, 9]).unwrap();
//! assert!(first.split);
//!
//! // A bad pin number rejects the whole ball
//! assert_eq!(frame.roll(&[7, 11]), Err(LaneError::InvalidPin { pin: 11 }));
//! assert_eq!(frame.current_roll(), 2);
//!
//! frame.roll(&[7, 10]).unwrap();
//! assert!(frame.is_spare());
//! assert_eq!(frame.frame_score(2), 2);
//! assert_eq!(frame.frame_score(4), -1);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::pin::{full_rack, Pin, PIN_COUNT};
use super::split;
use crate::core::{LaneError, Result};

/// Last frame of a game. Gets a third roll after a strike or spare.
pub const LAST_FRAME: u8 = 10;

/// Frame variant bowled on a lane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    /// Standard ten-pin: a strike clears all ten pins on the first ball.
    #[default]
    TenPin,
    /// Nine-tap: nine or more pins on a fresh rack score as a strike.
    NineTap,
}

impl FrameKind {
    /// Pins needed on a fresh rack for a strike.
    #[must_use]
    pub const fn strike_threshold(self) -> u8 {
        match self {
            FrameKind::TenPin => PIN_COUNT as u8,
            FrameKind::NineTap => PIN_COUNT as u8 - 1,
        }
    }

    /// Check whether a ball thrown at a fresh rack is a strike.
    #[must_use]
    pub const fn is_strike_ball(self, pins_down: u8) -> bool {
        pins_down >= self.strike_threshold()
    }

    /// Score credited for a ball. Strike balls count the full rack.
    #[must_use]
    pub const fn ball_value(self, pins_down: u8, fresh_rack: bool) -> u8 {
        if fresh_rack && self.is_strike_ball(pins_down) {
            PIN_COUNT as u8
        } else {
            pins_down
        }
    }
}

/// Result of a single roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// 1-based roll number within the frame.
    pub roll: u8,
    /// Pins newly knocked down by this roll.
    pub pins_down: u8,
    /// Frame classification after the roll.
    pub strike: bool,
    pub spare: bool,
    pub split: bool,
}

/// Scores and pin state for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    number: u8,
    kind: FrameKind,
    pins: [Pin; PIN_COUNT],
    /// Pins newly knocked down per roll, chronological.
    rolls: SmallVec<[u8; 3]>,
    /// Score credited per roll (strike balls on nine-tap count 10).
    values: SmallVec<[u8; 3]>,
    /// Rolls thrown at the current rack.
    rack_rolls: u8,
    max_rolls: u8,
    is_strike: bool,
    is_spare: bool,
    is_split: bool,
}

impl Frame {
    /// Create a fresh frame with a full rack.
    #[must_use]
    pub fn new(number: u8, kind: FrameKind) -> Self {
        Self {
            number,
            kind,
            pins: full_rack(),
            rolls: SmallVec::new(),
            values: SmallVec::new(),
            rack_rolls: 0,
            max_rolls: 2,
            is_strike: false,
            is_spare: false,
            is_split: false,
        }
    }

    /// Knock down the given pins.
    ///
    /// Either every listed pin is knocked down and the roll is recorded, or
    /// nothing changes and the first invalid pin number is reported. Pins
    /// already down are ignored but the roll is still consumed. An empty
    /// list is a gutter ball.
    pub fn roll(&mut self, knocked_down: &[u8]) -> Result<RollOutcome> {
        if self.current_roll() > self.max_rolls {
            return Err(LaneError::FrameFinished { frame: self.number });
        }
        if let Some(&pin) = knocked_down.iter().find(|&&p| !(1..=PIN_COUNT as u8).contains(&p)) {
            return Err(LaneError::InvalidPin { pin });
        }

        if self.needs_rerack() {
            self.pins.iter_mut().for_each(Pin::rerack);
            self.rack_rolls = 0;
        }

        let roll = self.current_roll();
        let fresh_rack = self.rack_rolls == 0;
        let mut pins_down = 0u8;
        for &number in knocked_down {
            if self.pins[usize::from(number - 1)].knock_down(roll) {
                pins_down += 1;
            }
        }

        self.rolls.push(pins_down);
        self.values.push(self.kind.ball_value(pins_down, fresh_rack));
        self.rack_rolls += 1;
        self.classify();

        trace!(frame = self.number, roll, pins_down, "roll recorded");

        Ok(RollOutcome {
            roll,
            pins_down,
            strike: self.is_strike,
            spare: self.is_spare,
            split: self.is_split,
        })
    }

    fn needs_rerack(&self) -> bool {
        if !self.is_last() || self.rolls.is_empty() {
            return false;
        }
        let cleared = self.pins.iter().all(|p| !p.is_standing());
        let last = self.rolls[self.rolls.len() - 1];
        cleared || (self.rack_rolls == 1 && self.kind.is_strike_ball(last))
    }

    fn classify(&mut self) {
        let first = self.rolls[0];
        self.is_strike = self.kind.is_strike_ball(first);
        self.is_spare = !self.is_strike
            && self.rolls.len() >= 2
            && first + self.rolls[1] == PIN_COUNT as u8;

        if self.rolls.len() == 1 {
            self.is_split = !self.is_strike && split::is_split(self.standing_mask());
        }

        if self.is_last() && (self.is_strike || self.is_spare) {
            self.max_rolls = 3;
        }
    }

    fn standing_mask(&self) -> u16 {
        self.pins
            .iter()
            .filter(|p| p.is_standing())
            .fold(0, |mask, p| mask | split::pin_bit(p.number()))
    }

    // === Accessors ===

    /// Frame number (1-based).
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }

    #[must_use]
    pub const fn kind(&self) -> FrameKind {
        self.kind
    }

    /// True for the tenth frame.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.number == LAST_FRAME
    }

    /// Roll about to be thrown (1-based). Exceeds `max_rolls` once the
    /// frame is used up.
    #[must_use]
    pub fn current_roll(&self) -> u8 {
        self.rolls.len() as u8 + 1
    }

    /// Rolls allowed: 2, or 3 on a tenth frame with a strike or spare.
    #[must_use]
    pub const fn max_rolls(&self) -> u8 {
        self.max_rolls
    }

    #[must_use]
    pub const fn is_strike(&self) -> bool {
        self.is_strike
    }

    #[must_use]
    pub const fn is_spare(&self) -> bool {
        self.is_spare
    }

    #[must_use]
    pub const fn is_split(&self) -> bool {
        self.is_split
    }

    /// Pins knocked down per roll.
    #[must_use]
    pub fn rolls(&self) -> &[u8] {
        &self.rolls
    }

    /// Score credited per roll.
    #[must_use]
    pub fn ball_values(&self) -> &[u8] {
        &self.values
    }

    /// Pins knocked down on roll `roll_index` (1-3).
    ///
    /// Returns -1 for an index outside 1-3 and 0 for a roll not yet thrown.
    #[must_use]
    pub fn frame_score(&self, roll_index: usize) -> i32 {
        match roll_index {
            1..=3 => self.rolls.get(roll_index - 1).map_or(0, |&n| i32::from(n)),
            _ => -1,
        }
    }

    /// Total pins knocked down in this frame.
    #[must_use]
    pub fn pinfall(&self) -> u16 {
        self.rolls.iter().map(|&n| u16::from(n)).sum()
    }

    #[must_use]
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Look up a pin by number.
    #[must_use]
    pub fn pin(&self, number: u8) -> Option<&Pin> {
        self.pins.iter().find(|p| p.number() == number)
    }

    /// Numbers of the pins still standing on the current rack.
    #[must_use]
    pub fn standing(&self) -> SmallVec<[u8; PIN_COUNT]> {
        self.pins.iter().filter(|p| p.is_standing()).map(Pin::number).collect()
    }
}
