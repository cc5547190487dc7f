use super::engine::{Game, TARGET};
use super::scheduler::{Scheduler, TaskKind};
use super::state::GamePhase;
use crate::model::card::{Card, CardId};
use crate::model::player::PlayerId;
use crate::model::rules;
use crate::model::suit::Suit;
use crate::model::trick::TrickError;
use std::fmt;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played { next: PlayerId },
    TrickCompleted { winner: PlayerId, round_over: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotInPlayPhase,
    UnknownPlayer(PlayerId),
    OutOfTurn { expected: PlayerId, actual: PlayerId },
    CardNotInHand(CardId),
    MustFollowSuit(Suit),
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotInPlayPhase => write!(f, "not in the playing phase"),
            PlayError::UnknownPlayer(player) => write!(f, "{player} is not seated"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play but got {actual}")
            }
            PlayError::CardNotInHand(card) => write!(f, "card {card} is not in hand"),
            PlayError::MustFollowSuit(suit) => write!(f, "must follow {suit}"),
            PlayError::Trick(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for PlayError {}

impl<S: Scheduler> Game<S> {
    /// Plays a card from `player`'s hand into the current trick. Under the
    /// follow-suit variant an off-suit card is refused while the hand still
    /// holds the lead suit.
    pub fn play_card(&mut self, player: PlayerId, card: CardId) -> Result<PlayOutcome, PlayError> {
        let index = match self.check_play(player, card) {
            Ok(index) => index,
            Err(err) => {
                event!(target: TARGET, Level::DEBUG, player = %player, card = %card, error = %err, "play rejected");
                return Err(err);
            }
        };

        let Some(card) = self
            .state
            .player_mut(player)
            .and_then(|seat| seat.hand.remove_at(index))
        else {
            return Err(PlayError::CardNotInHand(card));
        };

        if self.state.table_shows_resolved_trick() {
            self.state.table.clear();
        }
        self.state
            .current_trick
            .play(player, card)
            .map_err(PlayError::Trick)?;
        self.state.table = self.state.current_trick.plays().to_vec();
        event!(target: TARGET, Level::INFO, player = %player, card = %card, "card played");

        let next = player.next(self.state.seats());
        self.state.current_player = next;

        if self.state.current_trick.is_complete() {
            if let Some((winner, round_over)) = self.resolve_trick() {
                return Ok(PlayOutcome::TrickCompleted { winner, round_over });
            }
        }

        self.persist();
        self.schedule_bot_turn(self.config.delays.bot_turn());
        Ok(PlayOutcome::Played { next })
    }

    fn check_play(&self, player: PlayerId, card: CardId) -> Result<usize, PlayError> {
        if self.state.phase != GamePhase::Playing {
            return Err(PlayError::NotInPlayPhase);
        }
        let seat = self
            .state
            .player(player)
            .ok_or(PlayError::UnknownPlayer(player))?;
        if self.state.current_player != player {
            return Err(PlayError::OutOfTurn {
                expected: self.state.current_player,
                actual: player,
            });
        }
        if self.state.current_trick.has_played(player) {
            return Err(PlayError::Trick(TrickError::AlreadyPlayed(player)));
        }
        let index = seat
            .hand
            .position(card)
            .ok_or(PlayError::CardNotInHand(card))?;
        let chosen: Card = seat.hand.cards()[index];
        if !rules::is_legal(chosen, &seat.hand, &self.state.current_trick, self.config.variant) {
            if let Some(lead) = self.state.current_trick.lead_suit() {
                return Err(PlayError::MustFollowSuit(lead));
            }
        }
        Ok(index)
    }

    /// Awards the completed trick, hands the lead to its winner and either
    /// scores the round (hands exhausted) or schedules the table clear.
    fn resolve_trick(&mut self) -> Option<(PlayerId, bool)> {
        let winner = self.state.current_trick.winner(self.config.variant)?;
        if let Some(seat) = self.state.player_mut(winner) {
            seat.tricks_won += 1;
        }
        self.state.lead_player = winner;
        self.state.current_player = winner;
        self.state.table = self.state.current_trick.clear();

        event!(
            target: TARGET,
            Level::INFO,
            winner = %winner,
            cards = ?self.state.table.iter().map(|p| p.card.to_string()).collect::<Vec<_>>(),
            "trick resolved"
        );

        if self.state.hands_empty() {
            self.score_round();
            return Some((winner, true));
        }

        self.persist();
        let display = TaskKind::ClearTable {
            round: self.state.round_number,
            trick: self.state.tricks_resolved(),
        };
        self.schedule(self.config.delays.trick_display(), display);
        Some((winner, false))
    }
}
