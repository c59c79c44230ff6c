//! Player rotation across frames and games.
//!
//! `Game` decides when a turn ends (consulting the frame's strike/spare
//! classification), rotates players in ascending turn order, and charges
//! frame-units as frame numbers complete.

pub mod rotation;

pub use rotation::{frame_finished, Game, TurnReport};
