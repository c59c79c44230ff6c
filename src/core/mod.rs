//! Core types: players, facility configuration, game units, errors.
//!
//! Everything here is lane-agnostic. Lanes, games and the scoring engine build
//! on these.

pub mod config;
pub mod error;
pub mod player;
pub mod units;

pub use config::{AlleySetup, FacilitySource, DEFAULT_LANE_COUNT};
pub use error::{LaneError, Result};
pub use player::{Player, PlayerId};
pub use units::GameUnits;
