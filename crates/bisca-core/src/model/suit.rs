use core::fmt;
use serde::{Deserialize, Serialize};

/// Italian-pattern suits. Discriminants follow the suit ranking, so the derived
/// `Ord` is the tie-break order (denari > coppe > spade > bastoni).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Suit {
    Bastoni = 1,
    Spade = 2,
    Coppe = 3,
    Denari = 4,
}

impl Suit {
    /// Deck-building order.
    pub const ALL: [Suit; 4] = [Suit::Denari, Suit::Coppe, Suit::Spade, Suit::Bastoni];

    pub const fn ranking(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Denari => "denari",
            Suit::Coppe => "coppe",
            Suit::Spade => "spade",
            Suit::Bastoni => "bastoni",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
