#![allow(dead_code)]

use bisca_core::game::{BotPolicy, BotView, Game, GameConfig, GamePhase, VirtualScheduler};
use bisca_core::model::card::{Card, CardId};
use bisca_core::model::deck::Deck;
use bisca_core::model::player::PlayerId;
use bisca_core::model::rules::RuleVariant;
use bisca_core::model::suit::Suit;
use bisca_core::model::value::Value;

/// Declares a fixed number and plays the first legal card.
pub struct FirstLegal {
    pub bid: u8,
}

impl BotPolicy for FirstLegal {
    fn choose_declaration(&mut self, _view: &BotView) -> u8 {
        self.bid
    }

    fn choose_play(&mut self, view: &BotView) -> Option<Card> {
        view.legal_plays().first().copied()
    }
}

/// Card with the same id the standard deck gives it.
pub fn card(suit: Suit, value: Value) -> Card {
    let suit_index = Suit::ALL.iter().position(|s| *s == suit).unwrap() as u8;
    Card::new(CardId(suit_index * 10 + value.number() - 1), suit, value)
}

/// The rest of a standard deck once `dealt` has been taken out.
pub fn undealt(dealt: &[Card]) -> Vec<Card> {
    Deck::standard()
        .cards()
        .iter()
        .copied()
        .filter(|card| !dealt.contains(card))
        .collect()
}

pub fn new_game(variant: RuleVariant, seed: u64) -> Game {
    Game::new(
        GameConfig::new(variant),
        VirtualScheduler::new(),
        Box::new(FirstLegal { bid: 1 }),
        seed,
    )
}

/// Plays the human seat (declare 0, first playable card) and lets the bots
/// run until the game is over. Returns the cards-per-round of every round seen.
pub fn play_out(game: &mut Game) -> Vec<u8> {
    let mut rounds = Vec::new();
    let mut guard = 0;
    while game.state().phase() != GamePhase::Finished {
        guard += 1;
        assert!(guard < 1_000, "game did not finish");
        match game.state().phase() {
            GamePhase::Declaration if game.state().is_human_turn() => {
                rounds.push(game.state().cards_per_round());
                game.submit_declaration(PlayerId(0), 0).unwrap();
            }
            GamePhase::Playing if game.state().is_human_turn() => {
                let card = game.playable_cards()[0];
                game.play_card(PlayerId(0), card.id).unwrap();
            }
            _ => {
                game.run_next_task().expect("a bot or timer task is pending");
            }
        }
    }
    rounds
}
