use crate::model::deck::Deck;
use crate::model::player::Player;
use std::fmt;

pub const FIRST_ROUND_CARDS: u8 = 5;

/// Hand size for a 1-based round number: 5, 4, 3, 2, then 1 from round 5 on.
pub const fn cards_for_round(round_number: u32) -> u8 {
    if round_number >= FIRST_ROUND_CARDS as u32 {
        1
    } else {
        FIRST_ROUND_CARDS + 1 - round_number as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    InsufficientCards { needed: usize, available: usize },
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealError::InsufficientCards { needed, available } => {
                write!(f, "deal needs {needed} cards but the deck holds {available}")
            }
        }
    }
}

impl std::error::Error for DealError {}

/// Resets round fields and deals `cards_per_round` passes, one card at a time
/// in seat order, from the end of the deck. The human hand is then sorted for
/// display; bot hands stay in dealt order.
pub fn deal(players: &mut [Player], deck: &mut Deck, cards_per_round: u8) -> Result<(), DealError> {
    let needed = players.len() * cards_per_round as usize;
    if deck.len() < needed {
        return Err(DealError::InsufficientCards {
            needed,
            available: deck.len(),
        });
    }

    for player in players.iter_mut() {
        player.reset_for_round();
    }

    for _ in 0..cards_per_round {
        for player in players.iter_mut() {
            if let Some(card) = deck.pop() {
                player.hand.add(card);
            }
        }
    }

    for player in players.iter_mut().filter(|p| p.is_human) {
        player.hand.sort_for_display();
    }
    Ok(())
}
