use super::engine::{Game, TARGET};
use super::scheduler::{Scheduler, TaskKind};
use super::state::GamePhase;
use crate::model::deal::{self, cards_for_round};
use crate::model::deck::Deck;
use crate::model::player::PlayerId;
use crate::model::score::{self, RoundScore};
use tracing::{Level, event};

impl<S: Scheduler> Game<S> {
    /// Seats ordered by accumulated score, lowest first.
    pub fn standings(&self) -> Vec<(PlayerId, u32)> {
        score::standings(&self.state.players)
    }

    /// Lowest total once the game is over; nobody has won before that.
    pub fn winners(&self) -> Vec<PlayerId> {
        if self.state.phase != GamePhase::Finished {
            return Vec::new();
        }
        score::leaders(&self.state.players)
    }

    /// Scores the finished round. The one-card round ends the game; any other
    /// round schedules the next deal.
    pub(crate) fn score_round(&mut self) -> Vec<RoundScore> {
        let scores = score::apply_round(&mut self.state.players);
        self.set_phase(GamePhase::Scoring);
        for entry in &scores {
            event!(
                target: TARGET,
                Level::INFO,
                player = %entry.player,
                declared = entry.declaration,
                won = entry.tricks_won,
                points = entry.points,
                round = self.state.round_number,
                "round scored"
            );
        }

        if self.state.cards_per_round == 1 {
            self.set_phase(GamePhase::Finished);
            event!(
                target: TARGET,
                Level::INFO,
                winners = ?score::leaders(&self.state.players),
                "game finished"
            );
            self.persist();
            return scores;
        }

        self.persist();
        self.schedule(self.config.delays.next_round(), TaskKind::NextRound);
        scores
    }

    /// Deals the next, smaller round and reopens declarations.
    pub(crate) fn advance_round(&mut self) -> bool {
        if self.state.phase != GamePhase::Scoring {
            return false;
        }
        let round_number = self.state.round_number + 1;
        let cards = cards_for_round(round_number);
        let mut deck = Deck::shuffled(&mut self.rng);
        let mut players = self.state.players.clone();
        if let Err(err) = deal::deal(&mut players, &mut deck, cards) {
            event!(target: TARGET, Level::ERROR, error = %err, "could not deal next round");
            return false;
        }

        self.state.round_number = round_number;
        self.state.cards_per_round = cards;
        self.state.current_player = PlayerId(0);
        self.state.lead_player = PlayerId(0);
        self.state.clear_table();
        self.state.players = players;
        self.state.deck = deck;
        self.set_phase(GamePhase::Declaration);
        event!(target: TARGET, Level::INFO, round = round_number, cards, "round dealt");

        self.persist();
        self.schedule_bot_turn(self.config.delays.bot_turn());
        true
    }
}
