//! Authoritative state of one physical lane.
//!
//! A lane is a set of independent flags (game active, pinsetter, service
//! call) plus counts, a crosslane pairing and the active `Game`. Flags are
//! toggled independently: a service call mid-game does not stop the game.
//!
//! ## Invariants
//!
//! - `crosslane_with`, when set, is an adjacent lane inside the facility
//! - `num_games <= 0` means the pinsetter is off
//! - the lane number never changes, `reset` keeps it
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use openbowler::{AlleySetup, Lane};
//!
//! let mut lane = Lane::new(5, Arc::new(AlleySetup::new(32)));
//!
//! assert!(lane.set_crosslane(6));
//! assert!(!lane.set_crosslane(7));
//! assert_eq!(lane.crosslane_with(), Some(6));
//!
//! lane.start_game(4, 2.0);
//! lane.set_pinsetter(true);
//! lane.set_games(0.0);
//! assert!(!lane.is_pinsetter_active());
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::events::LaneEvent;
use super::snapshot::LaneSnapshot;
use crate::core::{AlleySetup, GameUnits, LaneError, Player, PlayerId, Result};
use crate::game::{Game, TurnReport};

/// Result of adding a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddedPlayer {
    pub id: PlayerId,
    /// The roster is now larger than the lane's max players. Advisory only.
    pub over_capacity: bool,
}

/// One lane in the facility.
#[derive(Debug)]
pub struct Lane {
    number: u16,
    setup: Arc<AlleySetup>,
    game_active: bool,
    pinsetter_active: bool,
    service_call: bool,
    num_games: GameUnits,
    max_players: u8,
    crosslane_with: Option<u16>,
    game: Option<Game>,
    events: Vec<LaneEvent>,
}

impl Lane {
    /// Create an idle lane.
    #[must_use]
    pub fn new(number: u16, setup: Arc<AlleySetup>) -> Self {
        Self {
            number,
            setup,
            game_active: false,
            pinsetter_active: false,
            service_call: false,
            num_games: GameUnits::ZERO,
            max_players: 0,
            crosslane_with: None,
            game: None,
            events: Vec::new(),
        }
    }

    /// Rebuild a lane from a snapshot, checking it belongs to this facility.
    ///
    /// A crosslane pairing that is not an adjacent lane in the facility is
    /// rejected. A pinsetter left on with no games is switched off.
    pub fn restore(setup: Arc<AlleySetup>, snapshot: LaneSnapshot) -> Result<Self> {
        let number = snapshot.lane_number;
        if !setup.contains_lane(number) {
            return Err(LaneError::UnknownLane {
                lane: number,
                lane_count: setup.lane_count,
            });
        }

        if let Some(with) = snapshot.crosslane_with {
            if !setup.contains_lane(with) || with.abs_diff(number) != 1 {
                return Err(LaneError::Snapshot(format!(
                    "lane {number} cannot be crosslaned with lane {with}"
                )));
            }
        }

        let pinsetter_active = snapshot.pinsetter_active && snapshot.num_games.is_playable();
        if pinsetter_active != snapshot.pinsetter_active {
            warn!(lane = number, games = %snapshot.num_games, "pinsetter restored off, no games left");
        }

        Ok(Self {
            number,
            setup,
            game_active: snapshot.game_active,
            pinsetter_active,
            service_call: snapshot.service_call,
            num_games: snapshot.num_games,
            max_players: snapshot.max_players,
            crosslane_with: snapshot.crosslane_with,
            game: snapshot.game,
            events: Vec::new(),
        })
    }

    // === Session lifecycle ===

    /// Clear games, players, flags and crosslane. Keeps the lane number.
    pub fn reset(&mut self) {
        self.game_active = false;
        self.pinsetter_active = false;
        self.service_call = false;
        self.num_games = GameUnits::ZERO;
        self.max_players = 0;
        self.crosslane_with = None;
        self.game = None;

        info!(lane = self.number, "lane reset");
        self.events.push(LaneEvent::Reset { lane: self.number });
    }

    /// Reset, then open a session for up to `max_players` with `games`
    /// games (0.1 per frame).
    ///
    /// Non-positive `games` is accepted; the session simply has nothing to
    /// bowl and the pinsetter stays off.
    pub fn start_game(&mut self, max_players: u8, games: f64) {
        self.reset();

        self.max_players = max_players;
        self.num_games = GameUnits::from_games(games);
        self.game = Some(Game::new(self.setup.frame_kind, self.num_games));
        self.game_active = self.num_games.is_playable();

        info!(lane = self.number, max_players, games = %self.num_games, "game started");
        self.events.push(LaneEvent::GameStarted {
            lane: self.number,
            max_players,
            games: self.num_games.as_games(),
        });
    }

    /// Add a player to the active session.
    pub fn add_player(&mut self, name: impl Into<String>, order: u8) -> Result<AddedPlayer> {
        let game = self.game.as_mut().ok_or(LaneError::NoActiveGame)?;
        let id = game.add_player(name, order)?;

        let over_capacity = game.players().len() > usize::from(self.max_players);
        if over_capacity {
            warn!(
                lane = self.number,
                players = game.players().len(),
                max_players = self.max_players,
                "roster exceeds lane capacity"
            );
        }

        Ok(AddedPlayer { id, over_capacity })
    }

    /// Record a roll for the current player.
    pub fn roll(&mut self, knocked_down: &[u8]) -> Result<TurnReport> {
        let game = self.game.as_mut().ok_or(LaneError::NoActiveGame)?;
        let report = game.roll(knocked_down)?;

        if report.frame_completed {
            let score = game.player(report.player).map_or(0, Player::current_score);
            self.events.push(LaneEvent::FrameCompleted {
                lane: self.number,
                player: report.player,
                frame: report.frame,
                score,
            });
        }

        self.num_games = game.remaining();
        if report.game_complete {
            self.game_active = false;
            info!(lane = self.number, "paid games used up");
            self.events.push(LaneEvent::GameComplete { lane: self.number });
            self.set_pinsetter(false);
        }

        Ok(report)
    }

    // === Operator setters ===

    /// Pair with an adjacent lane.
    ///
    /// Returns false and changes nothing unless `with` is in the facility and
    /// exactly one lane away.
    #[must_use]
    pub fn set_crosslane(&mut self, with: u16) -> bool {
        if !self.setup.contains_lane(with) || with.abs_diff(self.number) != 1 {
            debug!(lane = self.number, with, "crosslane rejected");
            return false;
        }

        self.crosslane_with = Some(with);
        self.events.push(LaneEvent::CrosslaneChanged {
            lane: self.number,
            with: Some(with),
        });
        true
    }

    /// Clear the crosslane pairing.
    pub fn disable_crosslane(&mut self) {
        if self.crosslane_with.take().is_some() {
            self.events.push(LaneEvent::CrosslaneChanged {
                lane: self.number,
                with: None,
            });
        }
    }

    /// Set the lane capacity.
    ///
    /// Always applied. Returns false as a warning when the games on the lane
    /// are not whole rounds, so some players cannot finish a game. A unit pays
    /// for one frame of every player at once, so the player/game ratio
    /// reduces to that whole-rounds check and `max_players` only matters when
    /// it is 0. The check does not account for players who joined mid-game.
    #[must_use]
    pub fn set_max_players(&mut self, max_players: u8) -> bool {
        self.max_players = max_players;

        let balanced =
            max_players == 0 || (self.num_games.is_playable() && self.num_games.is_whole_rounds());
        if !balanced {
            warn!(
                lane = self.number,
                max_players,
                games = %self.num_games,
                "games do not give every player a full game"
            );
        }
        balanced
    }

    /// Set the number of games. Non-positive values stop the pinsetter.
    pub fn set_games(&mut self, games: f64) {
        self.num_games = GameUnits::from_games(games);
        if let Some(game) = self.game.as_mut() {
            game.set_remaining(self.num_games);
            self.game_active = !game.is_complete();
        }

        self.events.push(LaneEvent::GamesChanged {
            lane: self.number,
            games: self.num_games.as_games(),
        });

        if !self.num_games.is_playable() {
            self.set_pinsetter(false);
        }
    }

    /// Raise a service call from the lane console.
    pub fn raise_service_call(&mut self) {
        if !self.service_call {
            self.service_call = true;
            info!(lane = self.number, "service call raised");
            self.events.push(LaneEvent::ServiceCallRaised { lane: self.number });
        }
    }

    /// Clear the service call.
    pub fn cancel_service_call(&mut self) {
        if self.service_call {
            self.service_call = false;
            self.events.push(LaneEvent::ServiceCallCleared { lane: self.number });
        }
    }

    /// Turn the pinsetter on or off, regardless of game state.
    pub fn set_pinsetter(&mut self, active: bool) {
        if self.pinsetter_active != active {
            self.pinsetter_active = active;
            self.events.push(LaneEvent::PinsetterChanged {
                lane: self.number,
                active,
            });
        }
    }

    // === Getters ===

    #[must_use]
    pub fn number(&self) -> u16 {
        self.number
    }

    #[must_use]
    pub fn is_game_active(&self) -> bool {
        self.game_active
    }

    #[must_use]
    pub fn is_pinsetter_active(&self) -> bool {
        self.pinsetter_active
    }

    #[must_use]
    pub fn is_service_call(&self) -> bool {
        self.service_call
    }

    /// Games left, fractional (0.1 per frame).
    #[must_use]
    pub fn num_games(&self) -> f64 {
        self.num_games.as_games()
    }

    #[must_use]
    pub fn game_units(&self) -> GameUnits {
        self.num_games
    }

    #[must_use]
    pub fn max_players(&self) -> u8 {
        self.max_players
    }

    #[must_use]
    pub fn crosslane_with(&self) -> Option<u16> {
        self.crosslane_with
    }

    #[must_use]
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Players on the lane, in turn order. Empty without a session.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.game.as_ref().map(Game::players).unwrap_or_default()
    }

    /// Player names ordered by turn order.
    #[must_use]
    pub fn player_names(&self) -> Vec<String> {
        let mut players: Vec<&Player> = self.players().iter().collect();
        players.sort_by_key(|p| p.order());
        players.into_iter().map(|p| p.name().to_string()).collect()
    }

    #[must_use]
    pub fn setup(&self) -> &AlleySetup {
        &self.setup
    }

    /// Drain events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<LaneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Capture the lane state.
    #[must_use]
    pub fn snapshot(&self) -> LaneSnapshot {
        LaneSnapshot {
            lane_number: self.number,
            game_active: self.game_active,
            pinsetter_active: self.pinsetter_active,
            service_call: self.service_call,
            num_games: self.num_games,
            max_players: self.max_players,
            crosslane_with: self.crosslane_with,
            game: self.game.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane(number: u16) -> Lane {
        Lane::new(number, Arc::new(AlleySetup::new(32)))
    }

    #[test]
    fn test_new_lane_defaults() {
        let lane = lane(5);
        assert_eq!(lane.number(), 5);
        assert!(!lane.is_game_active());
        assert!(!lane.is_pinsetter_active());
        assert!(!lane.is_service_call());
        assert_eq!(lane.num_games(), 0.0);
        assert_eq!(lane.max_players(), 0);
        assert!(lane.players().is_empty());
        assert_eq!(lane.crosslane_with(), None);
    }

    #[test]
    fn test_crosslane_validation() {
        let mut lane = lane(5);
        assert!(lane.set_crosslane(6));
        assert_eq!(lane.crosslane_with(), Some(6));

        assert!(!lane.set_crosslane(7));
        assert!(!lane.set_crosslane(5));
        assert_eq!(lane.crosslane_with(), Some(6));

        assert!(lane.set_crosslane(4));
        lane.disable_crosslane();
        assert_eq!(lane.crosslane_with(), None);
    }

    #[test]
    fn test_crosslane_facility_edges() {
        let mut first = lane(1);
        assert!(!first.set_crosslane(0));
        assert!(first.set_crosslane(2));

        let mut last = lane(32);
        assert!(!last.set_crosslane(33));
        assert!(last.set_crosslane(31));
    }

    #[test]
    fn test_service_call_independent_of_game_flag() {
        let mut lane = lane(2);
        lane.start_game(4, 1.0);
        assert!(lane.is_game_active());
        assert!(!lane.is_service_call());

        lane.raise_service_call();
        assert!(lane.is_service_call());
        assert!(lane.is_game_active());

        lane.cancel_service_call();
        assert!(!lane.is_service_call());
        assert!(lane.is_game_active());
    }

    #[test]
    fn test_set_games_zero_stops_pinsetter() {
        let mut lane = lane(1);
        lane.set_pinsetter(true);
        lane.set_games(0.0);
        assert!(!lane.is_pinsetter_active());

        // Pinsetter switch itself does not look at games.
        lane.set_pinsetter(true);
        assert!(lane.is_pinsetter_active());
    }

    #[test]
    fn test_set_max_players_warning() {
        let mut lane = lane(1);
        lane.start_game(2, 1.5);
        assert!(!lane.set_max_players(4));
        assert_eq!(lane.max_players(), 4);

        lane.set_games(2.0);
        assert!(lane.set_max_players(4));
    }

    #[test]
    fn test_add_player_requires_session() {
        let mut lane = lane(1);
        assert_eq!(lane.add_player("A", 1).unwrap_err(), LaneError::NoActiveGame);
        assert_eq!(lane.roll(&[1]).unwrap_err(), LaneError::NoActiveGame);
    }

    #[test]
    fn test_over_capacity_is_advisory() {
        let mut lane = lane(1);
        lane.start_game(1, 1.0);
        assert!(!lane.add_player("A", 1).unwrap().over_capacity);
        assert!(lane.add_player("B", 2).unwrap().over_capacity);
        assert_eq!(lane.players().len(), 2);
    }

    #[test]
    fn test_player_names_in_turn_order() {
        let mut lane = lane(1);
        lane.start_game(4, 1.0);
        lane.add_player("Second", 2).unwrap();
        lane.add_player("First", 1).unwrap();
        assert_eq!(lane.player_names(), vec!["First", "Second"]);
    }

    #[test]
    fn test_events_drained() {
        let mut lane = lane(3);
        lane.start_game(2, 1.0);
        lane.set_pinsetter(true);

        let events = lane.take_events();
        assert_eq!(events[0], LaneEvent::Reset { lane: 3 });
        assert!(matches!(events[1], LaneEvent::GameStarted { lane: 3, max_players: 2, .. }));
        assert_eq!(events[2], LaneEvent::PinsetterChanged { lane: 3, active: true });
        assert!(lane.take_events().is_empty());
    }
}
