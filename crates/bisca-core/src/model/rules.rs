//! Card comparison and play legality for both supported rule variants.
//!
//! * [`RuleVariant::AbsoluteRank`]: any card may be played; the highest rank
//!   wins the trick, suit ranking breaks ties between equal ranks.
//! * [`RuleVariant::TrumpFollowSuit`]: players must follow the lead suit when
//!   able; denari beats every other suit, the lead suit beats off-suit cards.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

pub const TRUMP_SUIT: Suit = Suit::Denari;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleVariant {
    AbsoluteRank,
    TrumpFollowSuit,
}

impl RuleVariant {
    pub const ALL: [RuleVariant; 2] = [RuleVariant::AbsoluteRank, RuleVariant::TrumpFollowSuit];

    pub const fn enforces_follow_suit(self) -> bool {
        matches!(self, RuleVariant::TrumpFollowSuit)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RuleVariant::AbsoluteRank => "absolute_rank",
            RuleVariant::TrumpFollowSuit => "trump_follow_suit",
        }
    }
}

impl fmt::Display for RuleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "absolute_rank" | "absolute" => Ok(RuleVariant::AbsoluteRank),
            "trump_follow_suit" | "trump" => Ok(RuleVariant::TrumpFollowSuit),
            other => Err(format!("unknown rule variant '{other}'")),
        }
    }
}

/// What a comparison needs to know about the trick it happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickContext {
    pub variant: RuleVariant,
    pub lead_suit: Option<Suit>,
}

impl TrickContext {
    pub const fn new(variant: RuleVariant, lead_suit: Option<Suit>) -> Self {
        Self { variant, lead_suit }
    }
}

/// Absolute order: rank, then suit ranking.
pub fn absolute_order(a: Card, b: Card) -> Ordering {
    a.rank()
        .cmp(&b.rank())
        .then(a.suit.ranking().cmp(&b.suit.ranking()))
}

/// Returns whichever card wins between a `challenger` and the card currently
/// holding the trick. When neither card can win (two off-suit, non-trump
/// cards), the incumbent keeps it. Without a lead suit in context the
/// incumbent's suit is treated as led.
pub fn stronger(challenger: Card, incumbent: Card, ctx: TrickContext) -> Card {
    let challenger_wins = match ctx.variant {
        RuleVariant::AbsoluteRank => absolute_order(challenger, incumbent) == Ordering::Greater,
        RuleVariant::TrumpFollowSuit => {
            let lead = ctx.lead_suit.unwrap_or(incumbent.suit);
            let (c_tier, i_tier) = (tier(challenger, lead), tier(incumbent, lead));
            if c_tier == 0 && i_tier == 0 {
                false
            } else {
                (c_tier, challenger.rank()) > (i_tier, incumbent.rank())
            }
        }
    };
    if challenger_wins { challenger } else { incumbent }
}

fn tier(card: Card, lead: Suit) -> u8 {
    if card.suit == TRUMP_SUIT {
        2
    } else if card.suit == lead {
        1
    } else {
        0
    }
}

/// Cards in `hand` that may be played into `trick`.
pub fn legal_plays(hand: &Hand, trick: &Trick, variant: RuleVariant) -> Vec<Card> {
    match (variant.enforces_follow_suit(), trick.lead_suit()) {
        (true, Some(lead)) if hand.has_suit(lead) => {
            hand.iter().copied().filter(|c| c.suit == lead).collect()
        }
        _ => hand.cards().to_vec(),
    }
}

pub fn is_legal(card: Card, hand: &Hand, trick: &Trick, variant: RuleVariant) -> bool {
    if !hand.contains(card.id) {
        return false;
    }
    match (variant.enforces_follow_suit(), trick.lead_suit()) {
        (true, Some(lead)) => card.suit == lead || !hand.has_suit(lead),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::CardId;
    use crate::model::player::PlayerId;
    use crate::model::value::Value;

    fn card(suit: Suit, value: Value) -> Card {
        let suit_index = Suit::ALL.iter().position(|s| *s == suit).unwrap() as u8;
        Card::new(CardId(suit_index * 10 + value.number() - 1), suit, value)
    }

    #[test]
    fn absolute_rank_prefers_rank_then_suit() {
        let ctx = TrickContext::new(RuleVariant::AbsoluteRank, Some(Suit::Coppe));
        let coppe_three = card(Suit::Coppe, Value::Three);
        let spade_three = card(Suit::Spade, Value::Three);
        let denari_two = card(Suit::Denari, Value::Two);

        assert_eq!(stronger(spade_three, coppe_three, ctx), coppe_three);
        assert_eq!(stronger(denari_two, coppe_three, ctx), coppe_three);
        assert_eq!(stronger(coppe_three, spade_three, ctx), coppe_three);
    }

    #[test]
    fn trump_beats_higher_rank_off_suit() {
        let ctx = TrickContext::new(RuleVariant::TrumpFollowSuit, Some(Suit::Spade));
        let spade_seven = card(Suit::Spade, Value::Seven);
        let denari_ace = card(Suit::Denari, Value::Ace);
        let bastoni_three = card(Suit::Bastoni, Value::Three);

        assert_eq!(stronger(denari_ace, spade_seven, ctx), denari_ace);
        assert_eq!(stronger(bastoni_three, denari_ace, ctx), denari_ace);
        assert_eq!(stronger(bastoni_three, spade_seven, ctx), spade_seven);
    }

    #[test]
    fn trump_cards_compare_by_rank() {
        let ctx = TrickContext::new(RuleVariant::TrumpFollowSuit, Some(Suit::Coppe));
        let low = card(Suit::Denari, Value::Four);
        let high = card(Suit::Denari, Value::Two);
        assert_eq!(stronger(low, high, ctx), high);
        assert_eq!(stronger(high, low, ctx), high);
    }

    #[test]
    fn off_suit_cards_never_take_the_trick() {
        let ctx = TrickContext::new(RuleVariant::TrumpFollowSuit, Some(Suit::Coppe));
        let spade = card(Suit::Spade, Value::Three);
        let bastoni = card(Suit::Bastoni, Value::Four);
        assert_eq!(stronger(spade, bastoni, ctx), bastoni);
    }

    #[test]
    fn follow_suit_restricts_only_when_holding_lead() {
        let mut trick = Trick::new(2);
        trick
            .play(PlayerId(1), card(Suit::Coppe, Value::Five))
            .unwrap();

        let holding = Hand::with_cards(vec![
            card(Suit::Coppe, Value::Four),
            card(Suit::Denari, Value::Three),
            card(Suit::Spade, Value::Two),
        ]);
        let legal = legal_plays(&holding, &trick, RuleVariant::TrumpFollowSuit);
        assert_eq!(legal, vec![card(Suit::Coppe, Value::Four)]);
        assert!(!is_legal(
            card(Suit::Denari, Value::Three),
            &holding,
            &trick,
            RuleVariant::TrumpFollowSuit
        ));

        let void = Hand::with_cards(vec![
            card(Suit::Denari, Value::Three),
            card(Suit::Spade, Value::Two),
        ]);
        let legal = legal_plays(&void, &trick, RuleVariant::TrumpFollowSuit);
        assert_eq!(legal.len(), 2);
    }

    #[test]
    fn absolute_rank_allows_any_card() {
        let mut trick = Trick::new(2);
        trick
            .play(PlayerId(0), card(Suit::Coppe, Value::Five))
            .unwrap();
        let hand = Hand::with_cards(vec![
            card(Suit::Coppe, Value::Four),
            card(Suit::Denari, Value::Three),
        ]);
        assert_eq!(legal_plays(&hand, &trick, RuleVariant::AbsoluteRank).len(), 2);
        assert_eq!(legal_plays(&hand, &Trick::new(2), RuleVariant::TrumpFollowSuit).len(), 2);
    }

    #[test]
    fn variant_parses_from_config_strings() {
        assert_eq!("trump".parse::<RuleVariant>(), Ok(RuleVariant::TrumpFollowSuit));
        assert_eq!(
            "absolute-rank".parse::<RuleVariant>(),
            Ok(RuleVariant::AbsoluteRank)
        );
        assert!("random".parse::<RuleVariant>().is_err());
    }
}
