use super::engine::{Game, TARGET};
use super::scheduler::Scheduler;
use super::state::GamePhase;
use crate::model::player::PlayerId;
use std::fmt;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclareOutcome {
    /// Recorded; `next` declares now.
    Recorded { next: PlayerId },
    /// That was the last declaration; the playing phase has begun.
    AllDeclared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclareError {
    NotInDeclarationPhase,
    UnknownPlayer(PlayerId),
    OutOfTurn { expected: PlayerId, actual: PlayerId },
    AlreadyDeclared(PlayerId),
    OutOfRange { value: u8, max: u8 },
}

impl fmt::Display for DeclareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclareError::NotInDeclarationPhase => write!(f, "not in the declaration phase"),
            DeclareError::UnknownPlayer(player) => write!(f, "{player} is not seated"),
            DeclareError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to declare but got {actual}")
            }
            DeclareError::AlreadyDeclared(player) => write!(f, "{player} has already declared"),
            DeclareError::OutOfRange { value, max } => {
                write!(f, "declaration {value} outside 0..={max}")
            }
        }
    }
}

impl std::error::Error for DeclareError {}

impl<S: Scheduler> Game<S> {
    /// Records a player's bid. Once every seat has declared, play opens with
    /// seat 0 leading; otherwise the turn passes on and a bot is scheduled.
    pub fn submit_declaration(
        &mut self,
        player: PlayerId,
        value: u8,
    ) -> Result<DeclareOutcome, DeclareError> {
        if let Err(err) = self.check_declaration(player, value) {
            event!(target: TARGET, Level::DEBUG, player = %player, value, error = %err, "declaration rejected");
            return Err(err);
        }

        if let Some(seat) = self.state.player_mut(player) {
            seat.declaration = Some(value);
        }
        event!(
            target: TARGET,
            Level::INFO,
            player = %player,
            value,
            round = self.state.round_number,
            "declaration"
        );

        if self.state.all_declared() {
            self.set_phase(GamePhase::Playing);
            self.state.current_player = PlayerId(0);
            self.state.lead_player = PlayerId(0);
            self.state.clear_table();
            self.persist();
            self.schedule_bot_turn(self.config.delays.bot_turn());
            return Ok(DeclareOutcome::AllDeclared);
        }

        let next = self.state.current_player.next(self.state.seats());
        self.state.current_player = next;
        self.persist();
        self.schedule_bot_turn(self.config.delays.bot_turn());
        Ok(DeclareOutcome::Recorded { next })
    }

    fn check_declaration(&self, player: PlayerId, value: u8) -> Result<(), DeclareError> {
        if self.state.phase != GamePhase::Declaration {
            return Err(DeclareError::NotInDeclarationPhase);
        }
        let seat = self
            .state
            .player(player)
            .ok_or(DeclareError::UnknownPlayer(player))?;
        if self.state.current_player != player {
            return Err(DeclareError::OutOfTurn {
                expected: self.state.current_player,
                actual: player,
            });
        }
        if seat.declaration.is_some() {
            return Err(DeclareError::AlreadyDeclared(player));
        }
        if value > self.state.cards_per_round {
            return Err(DeclareError::OutOfRange {
                value,
                max: self.state.cards_per_round,
            });
        }
        Ok(())
    }
}
