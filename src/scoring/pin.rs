//! A single pin on the deck.

use serde::{Deserialize, Serialize};

/// Pins in a standard rack.
pub const PIN_COUNT: usize = 10;

/// Knockdown state of one pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinState {
    /// Pin is standing.
    #[default]
    Standing,
    /// Knocked down by the first roll of the frame.
    KnockedDownFirst,
    /// Knocked down by the second roll of the frame.
    KnockedDownSecond,
    /// Knocked down by any other roll (tenth-frame fill ball).
    KnockedDown,
}

impl PinState {
    /// Knockdown state recorded for a 1-based roll number.
    #[must_use]
    pub const fn for_roll(roll: u8) -> Self {
        match roll {
            1 => PinState::KnockedDownFirst,
            2 => PinState::KnockedDownSecond,
            _ => PinState::KnockedDown,
        }
    }

    /// True for every knocked-down variant.
    #[must_use]
    pub const fn is_down(self) -> bool {
        !matches!(self, PinState::Standing)
    }
}

/// Pin identity and state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pin {
    number: u8,
    state: PinState,
}

impl Pin {
    /// Create a standing pin.
    #[must_use]
    pub const fn new(number: u8) -> Self {
        Self {
            number,
            state: PinState::Standing,
        }
    }

    /// Pin number (1-10).
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }

    #[must_use]
    pub const fn state(&self) -> PinState {
        self.state
    }

    #[must_use]
    pub const fn is_standing(&self) -> bool {
        !self.state.is_down()
    }

    /// Knock the pin down on `roll`. Returns false if it was already down.
    pub(crate) fn knock_down(&mut self, roll: u8) -> bool {
        if self.state.is_down() {
            return false;
        }
        self.state = PinState::for_roll(roll);
        true
    }

    /// Stand the pin back up (tenth-frame re-rack).
    pub(crate) fn rerack(&mut self) {
        self.state = PinState::Standing;
    }
}

/// A full rack of standing pins numbered 1-10.
#[must_use]
pub fn full_rack() -> [Pin; PIN_COUNT] {
    std::array::from_fn(|i| Pin::new(i as u8 + 1))
}
