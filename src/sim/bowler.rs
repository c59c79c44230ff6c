//! A simulated bowler standing in for pinsetter hardware.
//!
//! Produces the set of pins a ball knocks down, given what is standing.
//! Skill is the chance of hitting the pocket (all standing pins go down);
//! on a miss each standing pin falls independently with the same chance.

use super::rng::BowlerRng;
use crate::core::{LaneError, Result};
use crate::game::Game;
use crate::scoring::PIN_COUNT;

/// Deterministic bowler for tests and soak runs.
#[derive(Clone, Debug)]
pub struct SimulatedBowler {
    rng: BowlerRng,
    skill: f64,
}

impl SimulatedBowler {
    /// Create a bowler. `skill` is clamped to 0-1.
    #[must_use]
    pub fn new(rng: BowlerRng, skill: f64) -> Self {
        Self {
            rng,
            skill: skill.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn skill(&self) -> f64 {
        self.skill
    }

    /// Pins knocked down by one ball. An empty `standing` means a fresh rack.
    pub fn next_ball(&mut self, standing: &[u8]) -> Vec<u8> {
        let rack: Vec<u8> = if standing.is_empty() {
            (1..=PIN_COUNT as u8).collect()
        } else {
            standing.to_vec()
        };

        if self.rng.gen_bool(self.skill) {
            return rack;
        }
        rack.into_iter().filter(|_| self.rng.gen_bool(self.skill)).collect()
    }

    /// Next ball for whoever is up in `game`.
    pub fn ball_for(&mut self, game: &Game) -> Result<Vec<u8>> {
        let player = game.current_player()?;
        let frame = player.open_frame().ok_or(LaneError::GameComplete)?;
        Ok(self.next_ball(&frame.standing()))
    }
}
