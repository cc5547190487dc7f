use bisca_core::game::BotView;
use bisca_core::model::hand::Hand;
use rand::Rng;

pub struct DeclarationPlanner;

impl DeclarationPlanner {
    /// Cards that usually take a trick: the top four ranks (3, 2, ace, king).
    pub fn high_cards(hand: &Hand) -> u8 {
        hand.iter().filter(|card| card.value.is_high()).count() as u8
    }

    /// High-card count nudged by -1, 0 or +1, kept within the hand size.
    pub fn choose<R: Rng + ?Sized>(view: &BotView<'_>, rng: &mut R) -> u8 {
        let jitter: i16 = rng.gen_range(-1..=1);
        Self::adjust(Self::high_cards(view.hand), jitter, view.cards_per_round)
    }

    pub(crate) fn adjust(high_cards: u8, jitter: i16, cards_per_round: u8) -> u8 {
        (i16::from(high_cards) + jitter).clamp(0, i16::from(cards_per_round)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bisca_core::model::card::{Card, CardId};
    use bisca_core::model::player::PlayerId;
    use bisca_core::model::rules::RuleVariant;
    use bisca_core::model::suit::Suit;
    use bisca_core::model::trick::Trick;
    use bisca_core::model::value::Value;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hand(values: &[Value]) -> Hand {
        Hand::with_cards(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Card::new(CardId(i as u8), Suit::Coppe, *v))
                .collect(),
        )
    }

    #[test]
    fn counts_only_the_top_four_ranks() {
        let hand = hand(&[
            Value::Three,
            Value::Two,
            Value::Ace,
            Value::King,
            Value::Knight,
        ]);
        assert_eq!(DeclarationPlanner::high_cards(&hand), 4);
    }

    #[test]
    fn adjustment_is_clamped_to_the_hand() {
        assert_eq!(DeclarationPlanner::adjust(0, -1, 3), 0);
        assert_eq!(DeclarationPlanner::adjust(3, 1, 3), 3);
        assert_eq!(DeclarationPlanner::adjust(2, 1, 5), 3);
        assert_eq!(DeclarationPlanner::adjust(2, -1, 5), 1);
    }

    #[test]
    fn sampled_bids_stay_within_one_of_the_count() {
        let hand = hand(&[Value::Three, Value::Ace, Value::Four, Value::Five, Value::Jack]);
        let trick = Trick::new(4);
        let view = BotView {
            player: PlayerId(2),
            hand: &hand,
            trick: &trick,
            variant: RuleVariant::AbsoluteRank,
            cards_per_round: 5,
            round_number: 1,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let bid = DeclarationPlanner::choose(&view, &mut rng);
            assert!((1..=3).contains(&bid), "bid {bid}");
            seen[usize::from(bid - 1)] = true;
        }
        assert_eq!(seen, [true; 3]);
    }
}
