use core::fmt;
use serde::{Deserialize, Serialize};

/// Face value of a card, 1 through 10 (8, 9 and 10 are the court cards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Value {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Jack = 8,
    Knight = 9,
    King = 10,
}

/// Strength at or above which a card counts as "high" (the top four ranks).
pub const HIGH_CARD_STRENGTH: u8 = 7;

impl Value {
    pub const ORDERED: [Value; 10] = [
        Value::Ace,
        Value::Two,
        Value::Three,
        Value::Four,
        Value::Five,
        Value::Six,
        Value::Seven,
        Value::Jack,
        Value::Knight,
        Value::King,
    ];

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Value::Ace),
            2 => Some(Value::Two),
            3 => Some(Value::Three),
            4 => Some(Value::Four),
            5 => Some(Value::Five),
            6 => Some(Value::Six),
            7 => Some(Value::Seven),
            8 => Some(Value::Jack),
            9 => Some(Value::Knight),
            10 => Some(Value::King),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Trick-taking strength: 3 is strongest (10), then 2, 1, 10, 9 ... 4 (1).
    pub const fn strength(self) -> u8 {
        match self {
            Value::Three => 10,
            Value::Two => 9,
            Value::Ace => 8,
            Value::King => 7,
            Value::Knight => 6,
            Value::Jack => 5,
            Value::Seven => 4,
            Value::Six => 3,
            Value::Five => 2,
            Value::Four => 1,
        }
    }

    pub const fn is_high(self) -> bool {
        self.strength() >= HIGH_CARD_STRENGTH
    }
}

impl From<Value> for u8 {
    fn from(value: Value) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for Value {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Value::from_number(number).ok_or_else(|| format!("card value {number} outside 1..=10"))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
