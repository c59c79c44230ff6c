//! Operator command surface.
//!
//! Every operation an operator console or pinsetter can issue against a
//! lane, as data. Any transport (HTTP, RPC, local IPC) carries these; the
//! lane applies them with `Lane::apply`.

use serde::{Deserialize, Serialize};

use super::session::Lane;
use crate::core::{PlayerId, Result};
use crate::game::TurnReport;

/// A command addressed to one lane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LaneCommand {
    /// `max_players` falls back to the facility's default capacity.
    StartGame {
        #[serde(default)]
        max_players: Option<u8>,
        games: f64,
    },
    Reset,
    SetCrosslane { with: u16 },
    DisableCrosslane,
    RaiseServiceCall,
    CancelServiceCall,
    SetPinsetter { active: bool },
    SetMaxPlayers { max_players: u8 },
    SetGames { games: f64 },
    AddPlayer { name: String, order: u8 },
    /// Pin numbers knocked down by one ball.
    Roll { pins: Vec<u8> },
}

/// What a command did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Applied with nothing to report.
    Applied,
    /// Validation gate refused the command; state unchanged.
    Rejected,
    /// Applied, but the operator should see a warning.
    Warning,
    PlayerAdded { id: PlayerId, over_capacity: bool },
    Rolled(TurnReport),
}

impl Lane {
    /// Apply an operator command.
    pub fn apply(&mut self, command: LaneCommand) -> Result<CommandOutcome> {
        let outcome = match command {
            LaneCommand::StartGame { max_players, games } => {
                let max_players = max_players.unwrap_or(self.setup().default_max_players);
                self.start_game(max_players, games);
                CommandOutcome::Applied
            }
            LaneCommand::Reset => {
                self.reset();
                CommandOutcome::Applied
            }
            LaneCommand::SetCrosslane { with } => {
                if self.set_crosslane(with) {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::Rejected
                }
            }
            LaneCommand::DisableCrosslane => {
                self.disable_crosslane();
                CommandOutcome::Applied
            }
            LaneCommand::RaiseServiceCall => {
                self.raise_service_call();
                CommandOutcome::Applied
            }
            LaneCommand::CancelServiceCall => {
                self.cancel_service_call();
                CommandOutcome::Applied
            }
            LaneCommand::SetPinsetter { active } => {
                self.set_pinsetter(active);
                CommandOutcome::Applied
            }
            LaneCommand::SetMaxPlayers { max_players } => {
                if self.set_max_players(max_players) {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::Warning
                }
            }
            LaneCommand::SetGames { games } => {
                self.set_games(games);
                CommandOutcome::Applied
            }
            LaneCommand::AddPlayer { name, order } => {
                let added = self.add_player(name, order)?;
                CommandOutcome::PlayerAdded {
                    id: added.id,
                    over_capacity: added.over_capacity,
                }
            }
            LaneCommand::Roll { pins } => CommandOutcome::Rolled(self.roll(&pins)?),
        };
        Ok(outcome)
    }
}
