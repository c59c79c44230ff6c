//! Cumulative scoring across a game.
//!
//! Standard bonus rules: a strike in frames 1-9 scores ten plus the next two
//! balls, a spare ten plus the next ball. The tenth frame scores its own
//! balls. Running totals stay `None` until every bonus ball they depend on has
//! been thrown.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::frame::Frame;

/// Score line for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTally {
    /// Frame number.
    pub frame: u8,
    /// Ball values as credited (strike balls count the full rack).
    pub balls: SmallVec<[u8; 3]>,
    /// Score of this frame alone, if known.
    pub frame_score: Option<u16>,
    /// Cumulative score through this frame, if known.
    pub running_total: Option<u16>,
}

/// Score sheet for one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub frames: Vec<FrameTally>,
}

impl ScoreCard {
    /// Latest known cumulative score.
    #[must_use]
    pub fn total(&self) -> u16 {
        self.frames.iter().rev().find_map(|f| f.running_total).unwrap_or(0)
    }

    /// True once all ten frames are scored.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.frames.len() == 10 && self.frames.iter().all(|f| f.running_total.is_some())
    }
}

/// Tally the frames of a single game, in frame order.
#[must_use]
pub fn tally(frames: &[Frame]) -> ScoreCard {
    let mut card = ScoreCard::default();
    let mut running: Option<u16> = Some(0);

    for (i, frame) in frames.iter().enumerate() {
        let balls: SmallVec<[u8; 3]> = frame.ball_values().iter().copied().collect();
        let own: u16 = balls.iter().map(|&b| u16::from(b)).sum();

        let frame_score = if frame.is_last() {
            Some(own)
        } else if frame.is_strike() {
            bonus(&frames[i + 1..], 2).map(|b| 10 + b)
        } else if frame.is_spare() {
            bonus(&frames[i + 1..], 1).map(|b| 10 + b)
        } else {
            Some(own)
        };

        running = match (running, frame_score) {
            (Some(total), Some(score)) => Some(total + score),
            _ => None,
        };

        card.frames.push(FrameTally {
            frame: frame.number(),
            balls,
            frame_score,
            running_total: running,
        });
    }

    card
}

/// Sum of the next `count` balls after a frame, if they have been thrown.
fn bonus(following: &[Frame], count: usize) -> Option<u16> {
    let balls: SmallVec<[u8; 3]> = following
        .iter()
        .flat_map(|f| f.ball_values().iter().copied())
        .take(count)
        .collect();

    (balls.len() == count).then(|| balls.iter().map(|&b| u16::from(b)).sum())
}
