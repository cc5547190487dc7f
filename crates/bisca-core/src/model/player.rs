use crate::model::hand::Hand;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat identity, stable for the lifetime of a game. Seat 0 is the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const HUMAN: PlayerId = PlayerId(0);

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next seat in rotation for a table of `seats` players.
    pub const fn next(self, seats: usize) -> PlayerId {
        PlayerId(((self.0 as usize + 1) % seats) as u8)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub hand: Hand,
    pub declaration: Option<u8>,
    pub tricks_won: u8,
    pub is_human: bool,
}

impl Player {
    pub fn human(name: impl Into<String>) -> Self {
        Self::seated(PlayerId::HUMAN, name.into(), true)
    }

    pub fn bot(id: PlayerId) -> Self {
        Self::seated(id, format!("Bot {}", id.0), false)
    }

    fn seated(id: PlayerId, name: String, is_human: bool) -> Self {
        Self {
            id,
            name,
            score: 0,
            hand: Hand::new(),
            declaration: None,
            tricks_won: 0,
            is_human,
        }
    }

    /// Clears everything that only lives for one round.
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.declaration = None;
        self.tricks_won = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{Player, PlayerId};

    #[test]
    fn next_wraps_around_table() {
        assert_eq!(PlayerId(2).next(3), PlayerId(0));
        assert_eq!(PlayerId(0).next(4), PlayerId(1));
    }

    #[test]
    fn bots_are_named_by_seat() {
        let bot = Player::bot(PlayerId(3));
        assert_eq!(bot.name, "Bot 3");
        assert!(!bot.is_human);
        assert_eq!(bot.declaration, None);

        let human = Player::human("Giulia");
        assert_eq!(human.id, PlayerId::HUMAN);
        assert!(human.is_human);
    }

    #[test]
    fn reset_for_round_keeps_score() {
        let mut player = Player::bot(PlayerId(1));
        player.score = 7;
        player.declaration = Some(2);
        player.tricks_won = 1;
        player.reset_for_round();
        assert_eq!(player.score, 7);
        assert_eq!(player.declaration, None);
        assert_eq!(player.tricks_won, 0);
    }
}
