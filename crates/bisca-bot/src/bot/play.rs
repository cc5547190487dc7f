use super::{highest, lowest};
use bisca_core::game::BotView;
use bisca_core::model::card::Card;
use bisca_core::model::rules::RuleVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayReason {
    /// Strongest card in hand, on lead or whenever any card may be played.
    Strongest,
    /// Strongest card of the suit led.
    FollowHigh,
    /// Void in the suit led; shed the weakest card.
    Discard,
}

impl PlayReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlayReason::Strongest => "strongest",
            PlayReason::FollowHigh => "follow_high",
            PlayReason::Discard => "discard",
        }
    }
}

pub struct PlayPlanner;

impl PlayPlanner {
    pub fn choose(view: &BotView<'_>) -> Option<(Card, PlayReason)> {
        let legal = view.legal_plays();
        match view.variant {
            RuleVariant::AbsoluteRank => highest(&legal).map(|c| (c, PlayReason::Strongest)),
            RuleVariant::TrumpFollowSuit => match view.trick.lead_suit() {
                None => highest(&legal).map(|c| (c, PlayReason::Strongest)),
                Some(lead) if view.hand.has_suit(lead) => {
                    highest(&legal).map(|c| (c, PlayReason::FollowHigh))
                }
                Some(_) => lowest(&legal).map(|c| (c, PlayReason::Discard)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bisca_core::model::card::CardId;
    use bisca_core::model::hand::Hand;
    use bisca_core::model::player::PlayerId;
    use bisca_core::model::suit::Suit;
    use bisca_core::model::trick::Trick;
    use bisca_core::model::value::Value;

    fn card(suit: Suit, value: Value) -> Card {
        let suit_index = Suit::ALL.iter().position(|s| *s == suit).unwrap() as u8;
        Card::new(CardId(suit_index * 10 + value.number() - 1), suit, value)
    }

    fn view<'a>(hand: &'a Hand, trick: &'a Trick, variant: RuleVariant) -> BotView<'a> {
        BotView {
            player: PlayerId(1),
            hand,
            trick,
            variant,
            cards_per_round: 3,
            round_number: 3,
        }
    }

    fn hand() -> Hand {
        Hand::with_cards(vec![
            card(Suit::Bastoni, Value::Four),
            card(Suit::Spade, Value::Three),
            card(Suit::Coppe, Value::King),
            card(Suit::Coppe, Value::Six),
        ])
    }

    fn led(suit: Suit, value: Value) -> Trick {
        let mut trick = Trick::new(3);
        trick.play(PlayerId(0), card(suit, value)).unwrap();
        trick
    }

    #[test]
    fn absolute_variant_always_plays_the_strongest_card() {
        let hand = hand();
        let trick = led(Suit::Coppe, Value::Ace);
        let chosen = PlayPlanner::choose(&view(&hand, &trick, RuleVariant::AbsoluteRank));
        assert_eq!(
            chosen,
            Some((card(Suit::Spade, Value::Three), PlayReason::Strongest))
        );
    }

    #[test]
    fn trump_variant_leads_high() {
        let hand = hand();
        let trick = Trick::new(3);
        let chosen = PlayPlanner::choose(&view(&hand, &trick, RuleVariant::TrumpFollowSuit));
        assert_eq!(
            chosen,
            Some((card(Suit::Spade, Value::Three), PlayReason::Strongest))
        );
    }

    #[test]
    fn trump_variant_follows_with_the_highest_of_the_lead_suit() {
        let hand = hand();
        let trick = led(Suit::Coppe, Value::Ace);
        let chosen = PlayPlanner::choose(&view(&hand, &trick, RuleVariant::TrumpFollowSuit));
        assert_eq!(
            chosen,
            Some((card(Suit::Coppe, Value::King), PlayReason::FollowHigh))
        );
    }

    #[test]
    fn trump_variant_discards_the_weakest_when_void() {
        let hand = hand();
        let trick = led(Suit::Denari, Value::Seven);
        let chosen = PlayPlanner::choose(&view(&hand, &trick, RuleVariant::TrumpFollowSuit));
        assert_eq!(
            chosen,
            Some((card(Suit::Bastoni, Value::Four), PlayReason::Discard))
        );
    }

    #[test]
    fn empty_hand_yields_nothing() {
        let hand = Hand::new();
        let trick = Trick::new(2);
        assert_eq!(
            PlayPlanner::choose(&view(&hand, &trick, RuleVariant::AbsoluteRank)),
            None
        );
    }
}
