use crate::model::card::Card;
use crate::model::player::PlayerId;
use crate::model::rules::{self, RuleVariant, TrickContext};
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    seats: usize,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player: PlayerId,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    AlreadyPlayed(PlayerId),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::AlreadyPlayed(player) => {
                write!(f, "{player} has already played this trick")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(seats: usize) -> Self {
        Self {
            seats,
            plays: Vec::with_capacity(seats),
        }
    }

    /// Rebuilds a trick in progress, rejecting duplicate players or overflow.
    pub fn from_plays(seats: usize, plays: Vec<Play>) -> Result<Self, TrickError> {
        let mut trick = Self::new(seats);
        for play in plays {
            trick.play(play.player, play.card)?;
        }
        Ok(trick)
    }

    pub fn seats(&self) -> usize {
        self.seats
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == self.seats
    }

    pub fn leader(&self) -> Option<PlayerId> {
        self.plays.first().map(|play| play.player)
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn has_played(&self, player: PlayerId) -> bool {
        self.plays.iter().any(|play| play.player == player)
    }

    pub fn play(&mut self, player: PlayerId, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }
        if self.has_played(player) {
            return Err(TrickError::AlreadyPlayed(player));
        }
        self.plays.push(Play { player, card });
        Ok(())
    }

    /// Strongest play so far, folding the comparator over plays in order.
    pub fn winning_play(&self, variant: RuleVariant) -> Option<Play> {
        let ctx = TrickContext::new(variant, self.lead_suit());
        let (first, rest) = self.plays.split_first()?;
        Some(rest.iter().fold(*first, |best, play| {
            if rules::stronger(play.card, best.card, ctx) == play.card {
                *play
            } else {
                best
            }
        }))
    }

    pub fn winner(&self, variant: RuleVariant) -> Option<PlayerId> {
        if !self.is_complete() {
            return None;
        }
        self.winning_play(variant).map(|play| play.player)
    }

    pub fn clear(&mut self) -> Vec<Play> {
        std::mem::take(&mut self.plays)
    }
}
