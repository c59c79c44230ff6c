//! Player identification and frame history.
//!
//! ## PlayerId
//!
//! Type-safe identifier assigned by the `Game` when a player joins. Stable
//! for the life of the game, independent of turn order.
//!
//! ## Player
//!
//! Name, turn order, the frame currently being bowled, and the append-only
//! history of completed frames. History uses `im::Vector` so snapshots of a
//! lane are cheap to take while the lane keeps playing.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::scoring::{tally, Frame, ScoreCard};

/// Player identifier, unique within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A bowler on a lane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    /// Turn position; lower bowls first.
    order: u8,
    /// Frame being bowled, if it is this player's frame number in play.
    open_frame: Option<Frame>,
    /// Completed frames across every game, chronological.
    completed: Vector<Frame>,
}

impl Player {
    /// Create a player with an empty history.
    pub fn new(id: PlayerId, name: impl Into<String>, order: u8) -> Self {
        Self {
            id,
            name: name.into(),
            order,
            open_frame: None,
            completed: Vector::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn order(&self) -> u8 {
        self.order
    }

    /// The frame in progress, if any.
    #[must_use]
    pub fn open_frame(&self) -> Option<&Frame> {
        self.open_frame.as_ref()
    }

    /// Completed frames, oldest first.
    #[must_use]
    pub fn completed_frames(&self) -> &Vector<Frame> {
        &self.completed
    }

    /// Number of completed frames.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Score cards for every game this player has bowled, oldest first.
    ///
    /// A new game starts at each completed frame numbered 1.
    #[must_use]
    pub fn game_scores(&self) -> Vec<ScoreCard> {
        let mut games: Vec<Vec<Frame>> = Vec::new();
        for frame in &self.completed {
            match games.last_mut() {
                Some(game) if frame.number() != 1 => game.push(frame.clone()),
                _ => games.push(vec![frame.clone()]),
            }
        }
        games.iter().map(|g| tally(g)).collect()
    }

    /// Latest known score in the current (or last) game.
    #[must_use]
    pub fn current_score(&self) -> u16 {
        self.game_scores().last().map_or(0, ScoreCard::total)
    }

    // === Rotation hooks ===

    pub(crate) fn open_frame_mut(&mut self) -> Option<&mut Frame> {
        self.open_frame.as_mut()
    }

    pub(crate) fn begin_frame(&mut self, frame: Frame) {
        self.open_frame = Some(frame);
    }

    /// Move the open frame into history. Completed frames are never touched
    /// again.
    pub(crate) fn finish_frame(&mut self) -> Option<&Frame> {
        let frame = self.open_frame.take()?;
        self.completed.push_back(frame);
        self.completed.back()
    }

    /// Drop the open frame without recording it.
    pub(crate) fn abandon_frame(&mut self) {
        self.open_frame = None;
    }
}
