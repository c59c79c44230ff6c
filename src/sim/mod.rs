//! Simulated pinsetter input.
//!
//! Real lanes get pin-knockdown sets from pinsetter hardware. These types
//! generate the same input deterministically so whole sessions can be played
//! in tests.

pub mod bowler;
pub mod rng;

pub use bowler::SimulatedBowler;
pub use rng::BowlerRng;
