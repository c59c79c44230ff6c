//! Player rotation and multi-game bookkeeping.
//!
//! A `Game` owns the players on a lane, hands each of them an open frame,
//! decides when a turn is over, and counts down the frame-units the lane has
//! paid for.
//!
//! ## Turn cutover
//!
//! Frames 1-9 end on a strike, a spare, or after two rolls. The tenth frame
//! ends once its rolls are used up (two, or three after a strike or spare).
//!
//! ## Accounting
//!
//! One frame-unit (0.1 games) is charged when every player has finished the
//! current frame number. After frame 10 a fresh round starts if units remain.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{GameUnits, LaneError, Player, PlayerId, Result};
use crate::scoring::{Frame, FrameKind, RollOutcome, LAST_FRAME};

/// Check whether a frame has ended the player's turn.
#[must_use]
pub fn frame_finished(frame: &Frame) -> bool {
    if frame.is_last() {
        frame.current_roll() > frame.max_rolls()
    } else {
        frame.is_strike() || frame.is_spare() || frame.current_roll() > frame.max_rolls()
    }
}

/// What a roll did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Player who rolled.
    pub player: PlayerId,
    /// Frame number the roll belonged to.
    pub frame: u8,
    /// Pin result of the roll.
    pub outcome: RollOutcome,
    /// True if the roll ended the player's frame.
    pub frame_completed: bool,
    /// Who bowls next, if anyone.
    pub next_player: Option<PlayerId>,
    /// True if the roll used up the last frame-unit.
    pub game_complete: bool,
}

/// One player rotation on a lane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    kind: FrameKind,
    /// Sorted by ascending turn order.
    players: Vec<Player>,
    current: Option<PlayerId>,
    next_id: u16,
    frame_number: u8,
    game_number: u32,
    remaining: GameUnits,
    complete: bool,
}

impl Game {
    /// Create an empty game with `remaining` frame-units to bowl.
    #[must_use]
    pub fn new(kind: FrameKind, remaining: GameUnits) -> Self {
        Self {
            kind,
            players: Vec::new(),
            current: None,
            next_id: 0,
            frame_number: 1,
            game_number: 1,
            remaining,
            complete: !remaining.is_playable(),
        }
    }

    /// Add a player at turn position `order`.
    ///
    /// Players may join mid-game; they start at the frame number in play.
    pub fn add_player(&mut self, name: impl Into<String>, order: u8) -> Result<PlayerId> {
        if self.players.iter().any(|p| p.order() == order) {
            return Err(LaneError::DuplicateOrder { order });
        }

        // Unique orders cap the roster at 256, so ids fit in a u8.
        let id = PlayerId::new(self.next_id as u8);
        self.next_id += 1;

        let mut player = Player::new(id, name, order);
        if !self.complete {
            player.begin_frame(Frame::new(self.frame_number, self.kind));
        }

        let pos = self.players.partition_point(|p| p.order() < order);
        self.players.insert(pos, player);

        // Until someone rolls in this frame, the lowest order is up first.
        if !self.complete && self.frame_untouched() {
            self.current = self.players.first().map(Player::id);
        }

        debug!(player = %id, order, frame = self.frame_number, "player joined");
        Ok(id)
    }

    /// Apply a roll to the current player's open frame.
    ///
    /// Ends the turn when the frame is finished, rotates to the next player,
    /// and charges a frame-unit once everyone has bowled this frame number.
    pub fn roll(&mut self, knocked_down: &[u8]) -> Result<TurnReport> {
        if self.players.is_empty() {
            return Err(LaneError::NoPlayers);
        }
        let player_id = self.current.ok_or(LaneError::GameComplete)?;
        let idx = self.index_of(player_id).ok_or(LaneError::NoPlayers)?;

        let frame = self.players[idx]
            .open_frame_mut()
            .ok_or(LaneError::GameComplete)?;
        let outcome = frame.roll(knocked_down)?;
        let frame_number = frame.number();
        let frame_completed = frame_finished(frame);

        if frame_completed {
            self.players[idx].finish_frame();
            self.advance(idx);
        }

        debug!(
            player = %player_id,
            frame = frame_number,
            pins = outcome.pins_down,
            frame_completed,
            "roll applied"
        );

        Ok(TurnReport {
            player: player_id,
            frame: frame_number,
            outcome,
            frame_completed,
            next_player: self.current,
            game_complete: self.complete,
        })
    }

    /// Move `current` to the next player with an open frame, wrapping.
    /// Starts the next frame number when nobody has one.
    fn advance(&mut self, from: usize) {
        let n = self.players.len();
        let next = (1..=n)
            .map(|step| (from + step) % n)
            .find(|&i| self.players[i].open_frame().is_some());

        match next {
            Some(i) => self.current = Some(self.players[i].id()),
            None => self.finish_frame_number(),
        }
    }

    /// True if every player still has the current frame open with no rolls.
    fn frame_untouched(&self) -> bool {
        self.players
            .iter()
            .all(|p| p.open_frame().is_some_and(|f| f.current_roll() == 1))
    }

    fn finish_frame_number(&mut self) {
        self.remaining = self.remaining.saturating_sub(GameUnits::FRAME);

        if !self.remaining.is_playable() {
            self.complete = true;
            self.current = None;
            info!(game = self.game_number, frame = self.frame_number, "game complete");
            return;
        }

        if self.frame_number == LAST_FRAME {
            self.game_number += 1;
            self.frame_number = 1;
            info!(game = self.game_number, remaining = %self.remaining, "new game started");
        } else {
            self.frame_number += 1;
        }
        self.open_frames();
    }

    fn open_frames(&mut self) {
        let (number, kind) = (self.frame_number, self.kind);
        for player in &mut self.players {
            player.begin_frame(Frame::new(number, kind));
        }
        self.current = self.players.first().map(Player::id);
    }

    /// Replace the remaining frame-units.
    ///
    /// Running out stops play at once: open frames are dropped, completed
    /// frames stay. Adding units to a finished game starts a new game.
    pub fn set_remaining(&mut self, remaining: GameUnits) {
        self.remaining = remaining;

        if !remaining.is_playable() {
            for player in &mut self.players {
                player.abandon_frame();
            }
            self.complete = true;
            self.current = None;
        } else if self.complete {
            self.complete = false;
            self.game_number += 1;
            self.frame_number = 1;
            self.open_frames();
        }
    }

    // === Accessors ===

    fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> Result<&Player> {
        if self.players.is_empty() {
            return Err(LaneError::NoPlayers);
        }
        let id = self.current.ok_or(LaneError::GameComplete)?;
        self.player(id).ok_or(LaneError::NoPlayers)
    }

    #[must_use]
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current
    }

    /// Frame-units left.
    #[must_use]
    pub fn remaining(&self) -> GameUnits {
        self.remaining
    }

    /// Frame-units left as a fractional game count.
    #[must_use]
    pub fn games_remaining(&self) -> f64 {
        self.remaining.as_games()
    }

    /// Frame number in play (1-10).
    #[must_use]
    pub fn frame_number(&self) -> u8 {
        self.frame_number
    }

    /// Game (round) number, starting at 1.
    #[must_use]
    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn kind(&self) -> FrameKind {
        self.kind
    }
}
