use crate::model::suit::Suit;
use crate::model::value::Value;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub value: Value,
}

impl Card {
    pub const fn new(id: CardId, suit: Suit, value: Value) -> Self {
        Self { id, suit, value }
    }

    /// The card the standard deck assigns to `id`: suit `id / 10` in deck
    /// order, face value `id % 10 + 1`.
    pub fn from_id(id: CardId) -> Option<Card> {
        let suit = *Suit::ALL.get(usize::from(id.0 / 10))?;
        let value = Value::from_number(id.0 % 10 + 1)?;
        Some(Card::new(id, suit, value))
    }

    pub const fn rank(self) -> u8 {
        self.value.strength()
    }

    pub fn image_path(self) -> String {
        format!("/cards/{}_{}.png", self.suit, self.value)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} di {}", self.value, self.suit)
    }
}
