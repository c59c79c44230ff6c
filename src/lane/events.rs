//! Side effects of lane commands.
//!
//! A lane records events while a command runs. The caller drains them after
//! the state change has committed and hands them to observers: billing
//! (receipts when games change), pinsetter acknowledgement, persistence. None
//! of these run while the lane is locked.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Something that happened on a lane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LaneEvent {
    /// Lane state cleared.
    Reset { lane: u16 },
    /// New session started.
    GameStarted { lane: u16, max_players: u8, games: f64 },
    /// Operator changed the number of games (receipt hook).
    GamesChanged { lane: u16, games: f64 },
    /// Pinsetter switched on or off.
    PinsetterChanged { lane: u16, active: bool },
    /// Lane console raised a service call.
    ServiceCallRaised { lane: u16 },
    /// Operator cleared the service call.
    ServiceCallCleared { lane: u16 },
    /// Crosslane pairing set or cleared.
    CrosslaneChanged { lane: u16, with: Option<u16> },
    /// A player finished a frame.
    FrameCompleted { lane: u16, player: PlayerId, frame: u8, score: u16 },
    /// The paid frame-units ran out.
    GameComplete { lane: u16 },
}

impl LaneEvent {
    /// Lane the event came from.
    #[must_use]
    pub fn lane(&self) -> u16 {
        match self {
            LaneEvent::Reset { lane }
            | LaneEvent::GameStarted { lane, .. }
            | LaneEvent::GamesChanged { lane, .. }
            | LaneEvent::PinsetterChanged { lane, .. }
            | LaneEvent::ServiceCallRaised { lane }
            | LaneEvent::ServiceCallCleared { lane }
            | LaneEvent::CrosslaneChanged { lane, .. }
            | LaneEvent::FrameCompleted { lane, .. }
            | LaneEvent::GameComplete { lane } => *lane,
        }
    }
}

/// Receives lane events after the command that produced them committed.
pub trait LaneObserver: Send + Sync {
    fn on_event(&self, event: &LaneEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lane() {
        assert_eq!(LaneEvent::Reset { lane: 3 }.lane(), 3);
        assert_eq!(
            LaneEvent::FrameCompleted {
                lane: 7,
                player: PlayerId::new(0),
                frame: 1,
                score: 0
            }
            .lane(),
            7
        );
    }
}
