//! Pin and frame scoring engine.
//!
//! - `pin`: pin identity and knockdown state
//! - `frame`: rolls, strike/spare/split classification, frame variants
//! - `split`: fixed link table for split detection
//! - `tally`: cumulative game scores with strike and spare bonuses

pub mod frame;
pub mod pin;
pub mod split;
pub mod tally;

pub use frame::{Frame, FrameKind, RollOutcome, LAST_FRAME};
pub use pin::{Pin, PinState, PIN_COUNT};
pub use tally::{tally, FrameTally, ScoreCard};
