mod declare;
mod play;

pub use declare::DeclarationPlanner;
pub use play::{PlayPlanner, PlayReason};

use bisca_core::model::card::Card;
use bisca_core::model::rules::absolute_order;

/// Strongest card by rank, suit ranking breaking ties.
pub(crate) fn highest(cards: &[Card]) -> Option<Card> {
    cards
        .iter()
        .copied()
        .max_by(|a, b| absolute_order(*a, *b))
}

pub(crate) fn lowest(cards: &[Card]) -> Option<Card> {
    cards
        .iter()
        .copied()
        .min_by(|a, b| absolute_order(*a, *b))
}
