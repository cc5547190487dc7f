use super::state::{GamePhase, GameState};
use crate::model::card::{Card, CardId};
use crate::model::deal::{FIRST_ROUND_CARDS, cards_for_round};
use crate::model::deck::{DECK_SIZE, Deck};
use crate::model::player::{Player, PlayerId};
use crate::model::trick::{Play, Trick};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const FORMAT_VERSION: u32 = 1;
pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = DECK_SIZE / FIRST_ROUND_CARDS as usize;

/// Full-state snapshot handed to the persistence store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSnapshot {
    pub format_version: u32,
    pub players: Vec<Player>,
    pub round_number: u32,
    pub cards_per_round: u8,
    pub current_player: PlayerId,
    pub table: Vec<Play>,
    pub deck: Vec<Card>,
    pub phase: GamePhase,
    pub lead_player: PlayerId,
    pub current_trick: Vec<Play>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    InvalidState(String),
    Store(super::store::StoreError),
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreError::InvalidState(reason) => write!(f, "invalid saved state: {reason}"),
            RestoreError::Store(err) => write!(f, "could not read saved state: {err}"),
        }
    }
}

impl std::error::Error for RestoreError {}

fn invalid(reason: impl Into<String>) -> RestoreError {
    RestoreError::InvalidState(reason.into())
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            players: state.players.clone(),
            round_number: state.round_number,
            cards_per_round: state.cards_per_round,
            current_player: state.current_player,
            table: state.table.clone(),
            deck: state.deck.cards().to_vec(),
            phase: state.phase,
            lead_player: state.lead_player,
            current_trick: state.current_trick.plays().to_vec(),
        }
    }

    /// Rebuilds a game state, refusing anything the engine could not have produced.
    pub fn restore(self) -> Result<GameState, RestoreError> {
        if self.format_version != FORMAT_VERSION {
            return Err(invalid(format!(
                "format version {} (expected {FORMAT_VERSION})",
                self.format_version
            )));
        }

        if self.phase == GamePhase::Login {
            return Ok(GameState::login());
        }

        self.validate_players()?;
        self.validate_round()?;
        self.validate_cards()?;
        self.validate_turn()?;

        let seats = self.players.len();
        let current_trick = Trick::from_plays(seats, self.current_trick)
            .map_err(|err| invalid(format!("current trick: {err}")))?;
        if current_trick.is_complete() {
            return Err(invalid("current trick is complete but unresolved"));
        }

        Ok(GameState {
            players: self.players,
            round_number: self.round_number,
            cards_per_round: self.cards_per_round,
            current_player: self.current_player,
            lead_player: self.lead_player,
            phase: self.phase,
            deck: Deck::from_cards(self.deck),
            table: self.table,
            current_trick,
        })
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(state))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn validate_players(&self) -> Result<(), RestoreError> {
        let seats = self.players.len();
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(invalid(format!("{seats} players (expected {MIN_SEATS}..={MAX_SEATS})")));
        }
        for (index, player) in self.players.iter().enumerate() {
            if player.id.index() != index {
                return Err(invalid(format!("player at seat {index} has id {}", player.id)));
            }
            if player.is_human != (index == 0) {
                return Err(invalid("exactly one human player is expected, at seat 0"));
            }
            if let Some(declaration) = player.declaration {
                if declaration > self.cards_per_round {
                    return Err(invalid(format!(
                        "{} declared {declaration} with {} cards per round",
                        player.id, self.cards_per_round
                    )));
                }
            }
            if player.tricks_won > self.cards_per_round {
                return Err(invalid(format!("{} won too many tricks", player.id)));
            }
        }
        for (label, id) in [("current", self.current_player), ("lead", self.lead_player)] {
            if id.index() >= seats {
                return Err(invalid(format!("{label} player {id} is not seated")));
            }
        }
        Ok(())
    }

    fn validate_round(&self) -> Result<(), RestoreError> {
        if self.round_number == 0 {
            return Err(invalid("round number must start at 1"));
        }
        let expected = cards_for_round(self.round_number);
        if self.cards_per_round != expected {
            return Err(invalid(format!(
                "round {} deals {expected} cards, snapshot says {}",
                self.round_number, self.cards_per_round
            )));
        }
        let resolved = self.tricks_resolved();
        if resolved > self.cards_per_round {
            return Err(invalid(format!(
                "{resolved} tricks won with {} cards per round",
                self.cards_per_round
            )));
        }
        match self.phase {
            GamePhase::Declaration
                if resolved > 0 || !self.current_trick.is_empty() || !self.table.is_empty() =>
            {
                return Err(invalid("cards played before every declaration was made"));
            }
            GamePhase::Playing if resolved == self.cards_per_round => {
                return Err(invalid("every trick played but the round is not scored"));
            }
            GamePhase::Scoring | GamePhase::Finished
                if resolved != self.cards_per_round || !self.current_trick.is_empty() =>
            {
                return Err(invalid(format!(
                    "{} phase after {resolved} of {} tricks",
                    self.phase, self.cards_per_round
                )));
            }
            _ => {}
        }
        for player in &self.players {
            let played = u8::from(self.current_trick.iter().any(|play| play.player == player.id));
            let holding = (self.cards_per_round - resolved).saturating_sub(played);
            if player.hand.len() != usize::from(holding) {
                return Err(invalid(format!(
                    "{} holds {} cards, expected {holding}",
                    player.id,
                    player.hand.len()
                )));
            }
        }
        let declared = self.players.iter().filter(|p| p.declaration.is_some()).count();
        match self.phase {
            GamePhase::Playing | GamePhase::Scoring | GamePhase::Finished
                if declared != self.players.len() =>
            {
                Err(invalid(format!("{} phase with missing declarations", self.phase)))
            }
            GamePhase::Declaration if declared == self.players.len() => {
                Err(invalid("declaration phase with every declaration made"))
            }
            GamePhase::Finished if self.cards_per_round != 1 => {
                Err(invalid("finished before the one-card round"))
            }
            _ => Ok(()),
        }
    }

    /// Every card must be the one its id names, and hands, deck, current
    /// trick and the cards of resolved tricks must add up to one full deck.
    fn validate_cards(&self) -> Result<(), RestoreError> {
        let mut seen: HashSet<CardId> = HashSet::new();
        let held = self
            .players
            .iter()
            .flat_map(|p| p.hand.iter())
            .chain(self.deck.iter())
            .chain(self.current_trick.iter().map(|play| &play.card));
        for card in held {
            check_identity(card)?;
            if !seen.insert(card.id) {
                return Err(invalid(format!("card {} appears twice", card.id)));
            }
        }

        let resolved = usize::from(self.tricks_resolved());
        let accounted = seen.len() + self.players.len() * resolved;
        if accounted != DECK_SIZE {
            return Err(invalid(format!(
                "{accounted} cards accounted for, a deck has {DECK_SIZE}"
            )));
        }

        let shows_resolved = !self.table.is_empty() && self.table != self.current_trick;
        if shows_resolved && (resolved == 0 || self.table.len() != self.players.len()) {
            return Err(invalid(format!(
                "table shows {} cards after {resolved} tricks",
                self.table.len()
            )));
        }
        let mut on_table: HashSet<CardId> = HashSet::new();
        for play in &self.table {
            check_identity(&play.card)?;
            if !on_table.insert(play.card.id) {
                return Err(invalid(format!("card {} shown twice on the table", play.card.id)));
            }
            if shows_resolved && seen.contains(&play.card.id) {
                return Err(invalid(format!("table card {} is still held", play.card.id)));
            }
        }
        Ok(())
    }

    /// Declarations go round from seat 0; in a trick each seat follows the
    /// leader in rotation, so the seat to act is fixed by what is already down.
    fn validate_turn(&self) -> Result<(), RestoreError> {
        let seats = self.players.len();
        let due = match self.phase {
            GamePhase::Declaration => {
                let declared = self
                    .players
                    .iter()
                    .take_while(|p| p.declaration.is_some())
                    .count();
                if self.players[declared..].iter().any(|p| p.declaration.is_some()) {
                    return Err(invalid("declarations were not made in seat order"));
                }
                seat_after(PlayerId(0), declared, seats)
            }
            GamePhase::Playing => {
                for (offset, play) in self.current_trick.iter().enumerate() {
                    if play.player != seat_after(self.lead_player, offset, seats) {
                        return Err(invalid(format!(
                            "{} played out of turn in a trick led by {}",
                            play.player, self.lead_player
                        )));
                    }
                }
                seat_after(self.lead_player, self.current_trick.len(), seats)
            }
            GamePhase::Login | GamePhase::Scoring | GamePhase::Finished => return Ok(()),
        };
        if self.current_player != due {
            return Err(invalid(format!(
                "current player is {} but {due} is due to act",
                self.current_player
            )));
        }
        Ok(())
    }

    fn tricks_resolved(&self) -> u8 {
        self.players.iter().map(|p| p.tricks_won).sum()
    }
}

fn seat_after(first: PlayerId, offset: usize, seats: usize) -> PlayerId {
    PlayerId(((first.index() + offset) % seats) as u8)
}

fn check_identity(card: &Card) -> Result<(), RestoreError> {
    match Card::from_id(card.id) {
        Some(expected) if expected == *card => Ok(()),
        Some(expected) => Err(invalid(format!(
            "card {} is {expected}, snapshot says {card}",
            card.id
        ))),
        None => Err(invalid(format!("unknown card {}", card.id))),
    }
}
