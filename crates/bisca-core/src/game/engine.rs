//! Round orchestrator. `Game` owns the state, the rule configuration and the
//! capabilities (scheduler, bot policy, snapshot store) and drives the
//! per-round lifecycle: deal → declaration → tricks → scoring → next deal.
//!
//! Every mutating entry point checks phase and turn first and rejects stale
//! or out-of-turn calls without touching state.

use super::config::GameConfig;
use super::policy::{BotPolicy, BotView};
use super::scheduler::{Scheduler, Task, TaskId, TaskKind, VirtualScheduler};
use super::serialization::{GameSnapshot, MAX_SEATS, MIN_SEATS, RestoreError};
use super::state::{GamePhase, GameState};
use super::store::SnapshotStore;
use crate::model::card::Card;
use crate::model::deal::{self, DealError};
use crate::model::deck::Deck;
use crate::model::player::{Player, PlayerId};
use crate::model::rules;
use crate::model::trick::Trick;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::time::Duration;
use tracing::{Level, event};

pub(crate) const TARGET: &str = "bisca_core::engine";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    EmptyName,
    InvalidSeatCount { requested: usize },
    Deal(DealError),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::EmptyName => write!(f, "player name must not be empty"),
            StartError::InvalidSeatCount { requested } => write!(
                f,
                "{requested} players requested, between {MIN_SEATS} and {MAX_SEATS} supported"
            ),
            StartError::Deal(err) => write!(f, "opening deal failed: {err}"),
        }
    }
}

impl std::error::Error for StartError {}

pub struct Game<S: Scheduler = VirtualScheduler> {
    pub(crate) state: GameState,
    pub(crate) config: GameConfig,
    pub(crate) rng: StdRng,
    scheduler: S,
    pub(crate) policy: Box<dyn BotPolicy>,
    store: Option<Box<dyn SnapshotStore>>,
    epoch: u64,
    next_task_id: u64,
    outstanding: Vec<TaskId>,
}

impl<S: Scheduler> Game<S> {
    pub fn new(config: GameConfig, scheduler: S, policy: Box<dyn BotPolicy>, seed: u64) -> Self {
        Self {
            state: GameState::login(),
            config,
            rng: StdRng::seed_from_u64(seed),
            scheduler,
            policy,
            store: None,
            epoch: 0,
            next_task_id: 0,
            outstanding: Vec::new(),
        }
    }

    pub fn with_store(mut self, store: Box<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn outstanding_tasks(&self) -> &[TaskId] {
        &self.outstanding
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state)
    }

    /// The human's legal cards while it is their turn to play, else nothing.
    pub fn playable_cards(&self) -> Vec<Card> {
        let state = &self.state;
        if state.phase != GamePhase::Playing || !state.is_human_turn() {
            return Vec::new();
        }
        state
            .current_player_obj()
            .map(|p| rules::legal_plays(&p.hand, &state.current_trick, self.config.variant))
            .unwrap_or_default()
    }

    /// Seats the human at 0 and `seats - 1` bots, deals round one and opens
    /// the declaration phase. Any game in progress is discarded.
    pub fn start_game(&mut self, player_name: &str, seats: usize) -> Result<(), StartError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(StartError::EmptyName);
        }
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(StartError::InvalidSeatCount { requested: seats });
        }

        let mut state = GameState::login();
        state.players.push(Player::human(name));
        state
            .players
            .extend((1..seats).map(|seat| Player::bot(PlayerId(seat as u8))));
        state.current_trick = Trick::new(seats);
        state.deck = Deck::shuffled(&mut self.rng);
        deal::deal(&mut state.players, &mut state.deck, state.cards_per_round)
            .map_err(StartError::Deal)?;

        self.invalidate_tasks();
        self.state = state;
        self.set_phase(GamePhase::Declaration);
        event!(
            target: TARGET,
            Level::INFO,
            seats,
            variant = %self.config.variant,
            cards = self.state.cards_per_round,
            "game started"
        );
        self.persist();
        self.schedule_bot_turn(self.config.delays.bot_turn());
        Ok(())
    }

    /// Back to the login phase; the saved snapshot is discarded.
    pub fn restart(&mut self) {
        self.invalidate_tasks();
        self.state = GameState::login();
        if let Some(store) = self.store.as_mut() {
            if let Err(err) = store.clear() {
                event!(target: TARGET, Level::WARN, error = %err, "failed to discard saved game");
            }
        }
        event!(target: TARGET, Level::INFO, epoch = self.epoch, "game restarted");
    }

    /// Replaces the whole state with a snapshot. Pending tasks from the old
    /// state are cancelled, and a bot whose turn it is resumes after the
    /// resume delay.
    pub fn load(&mut self, snapshot: GameSnapshot) -> Result<(), RestoreError> {
        let state = snapshot.restore()?;
        self.invalidate_tasks();
        self.state = state;
        event!(
            target: TARGET,
            Level::INFO,
            phase = %self.state.phase,
            round = self.state.round_number,
            current = %self.state.current_player,
            "game loaded"
        );
        self.resume_after_load();
        Ok(())
    }

    /// Loads the stored snapshot if there is one. Returns whether a game was restored.
    pub fn resume_saved(&mut self) -> Result<bool, RestoreError> {
        let Some(store) = self.store.as_mut() else {
            return Ok(false);
        };
        match store.load().map_err(RestoreError::Store)? {
            Some(snapshot) => {
                self.load(snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Executes a task handed back by the scheduler. Tasks from an older
    /// epoch, or whose precondition no longer holds, are dropped. Returns
    /// whether the task changed anything.
    pub fn run_task(&mut self, task: Task) -> bool {
        if task.epoch != self.epoch {
            event!(
                target: TARGET,
                Level::DEBUG,
                task = ?task.kind,
                task_epoch = task.epoch,
                epoch = self.epoch,
                "discarding stale task"
            );
            return false;
        }
        self.outstanding.retain(|id| *id != task.id);
        match task.kind {
            TaskKind::BotDeclare(player) => self.bot_declare(player),
            TaskKind::BotPlay(player) => self.bot_play(player),
            TaskKind::ClearTable { round, trick } => self.clear_resolved_trick(round, trick),
            TaskKind::NextRound => self.advance_round(),
        }
    }

    pub(crate) fn bot_declare(&mut self, player: PlayerId) -> bool {
        if self.state.phase != GamePhase::Declaration
            || self.state.current_player != player
            || !self.state.is_bot_turn()
        {
            return false;
        }
        let Some(bot) = self.state.player(player) else {
            return false;
        };
        let view = BotView {
            player,
            hand: &bot.hand,
            trick: &self.state.current_trick,
            variant: self.config.variant,
            cards_per_round: self.state.cards_per_round,
            round_number: self.state.round_number,
        };
        let value = self
            .policy
            .choose_declaration(&view)
            .min(self.state.cards_per_round);
        self.submit_declaration(player, value).is_ok()
    }

    pub(crate) fn bot_play(&mut self, player: PlayerId) -> bool {
        if self.state.phase != GamePhase::Playing
            || self.state.current_player != player
            || !self.state.is_bot_turn()
        {
            return false;
        }
        let Some(bot) = self.state.player(player) else {
            return false;
        };
        let view = BotView {
            player,
            hand: &bot.hand,
            trick: &self.state.current_trick,
            variant: self.config.variant,
            cards_per_round: self.state.cards_per_round,
            round_number: self.state.round_number,
        };
        let legal = view.legal_plays();
        let Some(&fallback) = legal.first() else {
            return false;
        };
        let choice = match self.policy.choose_play(&view) {
            Some(card) if legal.contains(&card) => card,
            Some(card) => {
                event!(
                    target: TARGET,
                    Level::WARN,
                    player = %player,
                    card = %card,
                    "bot chose an illegal card; playing first legal card instead"
                );
                fallback
            }
            None => fallback,
        };
        self.play_card(player, choice.id).is_ok()
    }

    /// Clears the displayed trick, but only if it is still the one the timer
    /// was set for.
    fn clear_resolved_trick(&mut self, round: u32, trick: u8) -> bool {
        if self.state.phase != GamePhase::Playing
            || !self.state.table_shows_resolved_trick()
            || self.state.round_number != round
            || self.state.tricks_resolved() != trick
        {
            return false;
        }
        self.state.table.clear();
        self.persist();
        if self.state.is_bot_turn() {
            let current = self.state.current_player;
            self.bot_play(current);
        }
        true
    }

    fn resume_after_load(&mut self) {
        let delay = self.config.delays.resume();
        match self.state.phase {
            GamePhase::Playing if self.state.table_shows_resolved_trick() => {
                let display = TaskKind::ClearTable {
                    round: self.state.round_number,
                    trick: self.state.tricks_resolved(),
                };
                self.schedule(delay, display);
            }
            GamePhase::Declaration | GamePhase::Playing => self.schedule_bot_turn(delay),
            GamePhase::Scoring => self.schedule(delay, TaskKind::NextRound),
            GamePhase::Login | GamePhase::Finished => {}
        }
    }

    /// Queues the automated action for the current player if it is a bot.
    pub(crate) fn schedule_bot_turn(&mut self, delay: Duration) {
        if !self.state.is_bot_turn() {
            return;
        }
        let current = self.state.current_player;
        match self.state.phase {
            GamePhase::Declaration => self.schedule(delay, TaskKind::BotDeclare(current)),
            GamePhase::Playing => self.schedule(delay, TaskKind::BotPlay(current)),
            _ => {}
        }
    }

    pub(crate) fn schedule(&mut self, delay: Duration, kind: TaskKind) {
        self.next_task_id += 1;
        let task = Task {
            id: TaskId(self.next_task_id),
            epoch: self.epoch,
            kind,
        };
        self.outstanding.push(task.id);
        self.scheduler.schedule_after(delay, task);
    }

    fn invalidate_tasks(&mut self) {
        for id in self.outstanding.drain(..) {
            self.scheduler.cancel(id);
        }
        self.epoch += 1;
    }

    pub(crate) fn set_phase(&mut self, next: GamePhase) {
        let from = self.state.phase;
        debug_assert!(from.can_advance_to(next), "phase {from} cannot advance to {next}");
        self.state.phase = next;
        event!(target: TARGET, Level::DEBUG, from = %from, to = %next, "phase change");
    }

    pub(crate) fn persist(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(err) = store.save(&GameSnapshot::capture(&self.state)) {
            event!(target: TARGET, Level::WARN, error = %err, "failed to persist game snapshot");
        }
    }
}

impl Game<VirtualScheduler> {
    /// Pops the next due task off the virtual clock and runs it.
    pub fn run_next_task(&mut self) -> Option<(Task, bool)> {
        let task = self.scheduler.pop_next()?;
        let ran = self.run_task(task);
        Some((task, ran))
    }

    /// Runs tasks until the queue is empty, i.e. until the human must act or
    /// the game is over. Returns how many tasks did something.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Some((_, executed)) = self.run_next_task() {
            if executed {
                ran += 1;
            }
        }
        ran
    }
}
