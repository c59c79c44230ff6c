//! # openbowler
//!
//! Lane session, player rotation and pin scoring engine for a bowling
//! facility.
//!
//! ## Design Principles
//!
//! 1. **Frames record, games decide**: A `Frame` turns pin events into roll
//!    counts and strike/spare/split flags. Only the `Game` decides when a
//!    turn is over.
//!
//! 2. **Flags, not a state enum**: A lane's game, pinsetter and service-call
//!    flags are toggled independently by operators.
//!
//! 3. **Injected configuration**: The facility lane count arrives as an
//!    `AlleySetup` handed to each lane, never a global.
//!
//! ## Architecture
//!
//! - **Per-lane locking**: `Facility` keeps each lane behind its own mutex.
//!   Different lanes never contend; commands on one lane are serialized.
//!
//! - **Deferred side effects**: Lanes record `LaneEvent`s; observers run after
//!   the lock is released.
//!
//! - **Fixed-point games**: `GameUnits` counts tenths of a game so frame
//!   charges never drift.
//!
//! ## Modules
//!
//! - `core`: Players, facility configuration, game units, errors
//! - `scoring`: Pins, frames, split table, cumulative tally
//! - `game`: Player rotation and frame-unit accounting
//! - `lane`: Lane state machine, commands, events, snapshots, facility
//! - `sim`: Deterministic simulated bowlers

pub mod core;
pub mod game;
pub mod lane;
pub mod scoring;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    AlleySetup, FacilitySource, GameUnits, LaneError, Player, PlayerId, Result,
};

pub use crate::scoring::{
    tally, Frame, FrameKind, FrameTally, Pin, PinState, RollOutcome, ScoreCard,
};

pub use crate::game::{frame_finished, Game, TurnReport};

pub use crate::lane::{
    AddedPlayer, CommandOutcome, Facility, Lane, LaneCommand, LaneEvent, LaneHandle,
    LaneObserver, LaneSnapshot,
};

pub use crate::sim::{BowlerRng, SimulatedBowler};
