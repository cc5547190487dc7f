use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::rules::{self, RuleVariant};
use crate::model::trick::Trick;

/// What a computer player may look at when deciding.
#[derive(Debug, Clone, Copy)]
pub struct BotView<'a> {
    pub player: PlayerId,
    pub hand: &'a Hand,
    pub trick: &'a Trick,
    pub variant: RuleVariant,
    pub cards_per_round: u8,
    pub round_number: u32,
}

impl<'a> BotView<'a> {
    pub fn is_leading(&self) -> bool {
        self.trick.is_empty()
    }

    pub fn legal_plays(&self) -> Vec<Card> {
        rules::legal_plays(self.hand, self.trick, self.variant)
    }
}

/// Decision seam for non-human seats.
pub trait BotPolicy: Send {
    /// Number of tricks to declare, expected within `0..=cards_per_round`.
    fn choose_declaration(&mut self, view: &BotView) -> u8;

    /// Card to play. `None`, or a card that is not a legal play, leaves the
    /// engine to play the first legal card.
    fn choose_play(&mut self, view: &BotView) -> Option<Card>;
}
