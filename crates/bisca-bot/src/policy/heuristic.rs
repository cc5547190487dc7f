use crate::bot::{DeclarationPlanner, PlayPlanner, PlayReason};
use bisca_core::game::{BotPolicy, BotView};
use bisca_core::model::card::Card;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, event};

/// Adapter that wires the declaration and play planners into the engine's
/// `BotPolicy` seam. Bid jitter draws from a seeded generator so a whole
/// game replays exactly from its seed.
pub struct HeuristicPolicy {
    rng: StdRng,
}

impl HeuristicPolicy {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl BotPolicy for HeuristicPolicy {
    fn choose_declaration(&mut self, view: &BotView) -> u8 {
        let value = DeclarationPlanner::choose(view, &mut self.rng);
        log_declaration(view, value);
        value
    }

    fn choose_play(&mut self, view: &BotView) -> Option<Card> {
        let (card, reason) = PlayPlanner::choose(view)?;
        log_play_decision(view, card, reason);
        Some(card)
    }
}

fn log_declaration(view: &BotView, value: u8) {
    event!(
        target: "bisca_bot::declare",
        Level::DEBUG,
        seat = %view.player,
        round = view.round_number,
        high_cards = DeclarationPlanner::high_cards(view.hand),
        cards = view.cards_per_round,
        value,
    );
}

fn log_play_decision(view: &BotView, chosen: Card, reason: PlayReason) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let legal = view.legal_plays();
    let legal_preview = if legal.len() <= 6 {
        legal
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal.len())
    };

    event!(
        target: "bisca_bot::play",
        Level::DEBUG,
        seat = %view.player,
        variant = %view.variant,
        lead_suit = ?view.trick.lead_suit(),
        trick_cards = view.trick.len(),
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        reason = reason.as_str(),
    );
}
