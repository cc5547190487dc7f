use crate::model::deal::FIRST_ROUND_CARDS;
use crate::model::deck::Deck;
use crate::model::player::{Player, PlayerId};
use crate::model::trick::{Play, Trick};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Login,
    Declaration,
    Playing,
    Scoring,
    Finished,
}

impl GamePhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            GamePhase::Login => "login",
            GamePhase::Declaration => "declaration",
            GamePhase::Playing => "playing",
            GamePhase::Scoring => "scoring",
            GamePhase::Finished => "finished",
        }
    }

    /// Legal successor phases: login → declaration → playing → scoring →
    /// (declaration | finished).
    pub const fn can_advance_to(self, next: GamePhase) -> bool {
        matches!(
            (self, next),
            (GamePhase::Login, GamePhase::Declaration)
                | (GamePhase::Declaration, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::Scoring)
                | (GamePhase::Scoring, GamePhase::Declaration)
                | (GamePhase::Scoring, GamePhase::Finished)
        )
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that describes a game in progress. Owned by the orchestrator;
/// phases mutate it through `Game`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) players: Vec<Player>,
    pub(crate) round_number: u32,
    pub(crate) cards_per_round: u8,
    pub(crate) current_player: PlayerId,
    pub(crate) lead_player: PlayerId,
    pub(crate) phase: GamePhase,
    pub(crate) deck: Deck,
    pub(crate) table: Vec<Play>,
    pub(crate) current_trick: Trick,
}

impl GameState {
    pub fn login() -> Self {
        Self {
            players: Vec::new(),
            round_number: 1,
            cards_per_round: FIRST_ROUND_CARDS,
            current_player: PlayerId(0),
            lead_player: PlayerId(0),
            phase: GamePhase::Login,
            deck: Deck::default(),
            table: Vec::new(),
            current_trick: Trick::new(0),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index()).filter(|p| p.id == id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index()).filter(|p| p.id == id)
    }

    pub fn seats(&self) -> usize {
        self.players.len()
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn cards_per_round(&self) -> u8 {
        self.cards_per_round
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn current_player_obj(&self) -> Option<&Player> {
        self.player(self.current_player)
    }

    pub fn lead_player(&self) -> PlayerId {
        self.lead_player
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Cards face-up on the table: the trick in progress, or the last
    /// resolved trick until the display delay clears it.
    pub fn table(&self) -> &[Play] {
        &self.table
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn is_human_turn(&self) -> bool {
        self.current_player_obj().is_some_and(|p| p.is_human)
    }

    pub fn is_bot_turn(&self) -> bool {
        self.current_player_obj().is_some_and(|p| !p.is_human)
    }

    pub fn all_declared(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.declaration.is_some())
    }

    /// Tricks resolved so far this round.
    pub fn tricks_resolved(&self) -> u8 {
        self.players.iter().map(|p| p.tricks_won).sum()
    }

    pub fn hands_empty(&self) -> bool {
        self.players.iter().all(|p| p.hand.is_empty())
    }

    /// True while the table still shows a trick that has already been won.
    pub fn table_shows_resolved_trick(&self) -> bool {
        !self.table.is_empty() && self.table.as_slice() != self.current_trick.plays()
    }

    pub(crate) fn clear_table(&mut self) {
        self.table.clear();
        self.current_trick = Trick::new(self.players.len());
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::login()
    }
}
