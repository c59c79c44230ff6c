//! Lane sessions and the operator command surface.
//!
//! - `session`: the `Lane` state machine (flags, counts, crosslane, game)
//! - `command`: operator commands as data, applied to a lane
//! - `events`: side effects drained after each command
//! - `snapshot`: persisted lane layout
//! - `facility`: every lane behind its own lock

pub mod command;
pub mod events;
pub mod facility;
pub mod session;
pub mod snapshot;

pub use command::{CommandOutcome, LaneCommand};
pub use events::{LaneEvent, LaneObserver};
pub use facility::{Facility, LaneHandle};
pub use session::{AddedPlayer, Lane};
pub use snapshot::LaneSnapshot;
