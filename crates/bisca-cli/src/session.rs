//! Terminal driver. Seat 0 reads from `input` (or is played by the heuristic
//! when autopilot is on); the bots run off the game's virtual scheduler,
//! optionally sleeping for each delay so the pacing feels like a real table.

use anyhow::{Context, Result, bail};
use bisca_bot::HeuristicPolicy;
use bisca_core::game::{BotPolicy, BotView, Game, GamePhase, GameState};
use bisca_core::model::card::Card;
use bisca_core::model::player::PlayerId;
use bisca_core::model::trick::Play;
use std::io::{BufRead, Write};
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Finished {
        standings: Vec<(PlayerId, u32)>,
        winners: Vec<PlayerId>,
    },
    /// The human left; the saved game can be resumed later.
    Quit,
}

enum Input<T> {
    Value(T),
    Quit,
}

/// What was last shown, so only changes get printed.
#[derive(Default)]
struct Shown {
    round: u32,
    phase: Option<GamePhase>,
    table: Vec<Play>,
}

pub struct Session<R, W> {
    game: Game,
    input: R,
    output: W,
    autopilot: Option<HeuristicPolicy>,
    realtime: bool,
    shown: Shown,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: Game, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
            autopilot: None,
            realtime: false,
            shown: Shown::default(),
        }
    }

    /// Lets the heuristic play seat 0 instead of reading input.
    pub fn with_autopilot(mut self, policy: HeuristicPolicy) -> Self {
        self.autopilot = Some(policy);
        self
    }

    /// Sleep for scheduled delays instead of skipping the clock ahead.
    pub fn realtime(mut self, enabled: bool) -> Self {
        self.realtime = enabled;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run(&mut self) -> Result<SessionEnd> {
        loop {
            self.report()?;
            let state = self.game.state();
            match state.phase() {
                GamePhase::Login => bail!("no game in progress"),
                GamePhase::Finished => {
                    return Ok(SessionEnd::Finished {
                        standings: self.game.standings(),
                        winners: self.game.winners(),
                    });
                }
                GamePhase::Declaration if state.is_human_turn() => {
                    if let Input::Quit = self.human_declaration()? {
                        return self.quit();
                    }
                }
                GamePhase::Playing if state.is_human_turn() => {
                    if let Input::Quit = self.human_play()? {
                        return self.quit();
                    }
                }
                _ => self.wait_for_task()?,
            }
        }
    }

    fn quit(&mut self) -> Result<SessionEnd> {
        writeln!(self.output, "Game saved. Run with --resume to continue.")?;
        event!(target: "bisca_cli::session", Level::INFO, round = self.game.state().round_number(), "session quit");
        Ok(SessionEnd::Quit)
    }

    fn wait_for_task(&mut self) -> Result<()> {
        if self.realtime {
            if let Some(delay) = self.game.scheduler().next_due_in() {
                std::thread::sleep(delay);
            }
        }
        if self.game.run_next_task().is_none() {
            bail!(
                "nothing scheduled in the {} phase with {} to act",
                self.game.state().phase(),
                self.game.state().current_player()
            );
        }
        Ok(())
    }

    fn human_declaration(&mut self) -> Result<Input<()>> {
        let state = self.game.state();
        let max = state.cards_per_round();
        let value = match self.autopilot.as_mut() {
            Some(policy) => {
                let value = policy.choose_declaration(&view(&self.game)?);
                writeln!(self.output, "You declare {value}.")?;
                u32::from(value)
            }
            None => {
                write_hand(&mut self.output, state, &[])?;
                let prompt = format!("Tricks you will take (0-{max}), q to quit: ");
                match self.prompt_number(&prompt)? {
                    Input::Value(value) => value,
                    Input::Quit => return Ok(Input::Quit),
                }
            }
        };

        let Ok(value) = u8::try_from(value) else {
            writeln!(self.output, "Declare between 0 and {max}.")?;
            return Ok(Input::Value(()));
        };
        if let Err(err) = self.game.submit_declaration(PlayerId::HUMAN, value) {
            writeln!(self.output, "Not accepted: {err}.")?;
        }
        Ok(Input::Value(()))
    }

    fn human_play(&mut self) -> Result<Input<()>> {
        let playable = self.game.playable_cards();
        let state = self.game.state();
        let chosen = match self.autopilot.as_mut() {
            Some(policy) => {
                let card = policy
                    .choose_play(&view(&self.game)?)
                    .filter(|card| playable.contains(card))
                    .or_else(|| playable.first().copied())
                    .context("no playable card on the human's turn")?;
                writeln!(self.output, "You play {card}.")?;
                card
            }
            None => {
                write_hand(&mut self.output, state, &playable)?;
                let prompt = format!("Card to play (1-{}), q to quit: ", playable.len());
                let index = match self.prompt_number(&prompt)? {
                    Input::Value(index) => index,
                    Input::Quit => return Ok(Input::Quit),
                };
                match index.checked_sub(1).and_then(|i| playable.get(i as usize)) {
                    Some(card) => *card,
                    None => {
                        writeln!(self.output, "Pick one of the numbered cards.")?;
                        return Ok(Input::Value(()));
                    }
                }
            }
        };

        if let Err(err) = self.game.play_card(PlayerId::HUMAN, chosen.id) {
            writeln!(self.output, "Not accepted: {err}.")?;
        }
        Ok(Input::Value(()))
    }

    /// Reads one line. End of input counts as quitting.
    fn prompt_number(&mut self, prompt: &str) -> Result<Input<u32>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Input::Quit);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return Ok(Input::Quit);
            }
            match line.parse() {
                Ok(value) => return Ok(Input::Value(value)),
                Err(_) => writeln!(self.output, "'{line}' is not a number.")?,
            }
        }
    }

    /// Prints whatever changed since the last call: a new deal, the table,
    /// trick winners, declarations and round results.
    fn report(&mut self) -> Result<()> {
        let state = self.game.state();
        let out = &mut self.output;
        let phase_changed = self.shown.phase != Some(state.phase());

        if state.round_number() != self.shown.round && state.phase() == GamePhase::Declaration {
            writeln!(
                out,
                "\n== Round {} ({} card{} each, {} rules) ==",
                state.round_number(),
                state.cards_per_round(),
                if state.cards_per_round() == 1 { "" } else { "s" },
                self.game.config().variant
            )?;
        }

        if state.table() != self.shown.table.as_slice() && !state.table().is_empty() {
            let line = state
                .table()
                .iter()
                .map(|play| format!("{}: {}", name(state, play.player), play.card))
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(out, "Table  {line}")?;
            if state.table_shows_resolved_trick() || state.phase() != GamePhase::Playing {
                writeln!(out, "  {} takes the trick.", name(state, state.lead_player()))?;
            }
        }

        if phase_changed && state.phase() == GamePhase::Playing {
            let bids = state
                .players()
                .iter()
                .map(|p| format!("{} {}", p.name, p.declaration.unwrap_or(0)))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "Declarations: {bids}")?;
        }

        if phase_changed && matches!(state.phase(), GamePhase::Scoring | GamePhase::Finished) {
            writeln!(out, "Round {} results:", state.round_number())?;
            for player in state.players() {
                writeln!(
                    out,
                    "  {:<12} declared {} won {}  total {}",
                    player.name,
                    player.declaration.unwrap_or(0),
                    player.tricks_won,
                    player.score
                )?;
            }
        }

        if phase_changed && state.phase() == GamePhase::Finished {
            let winners = self
                .game
                .winners()
                .into_iter()
                .map(|id| name(state, id))
                .collect::<Vec<_>>()
                .join(" and ");
            writeln!(out, "Game over. Lowest score: {winners}.")?;
        }

        self.shown = Shown {
            round: state.round_number(),
            phase: Some(state.phase()),
            table: state.table().to_vec(),
        };
        Ok(())
    }
}

fn view(game: &Game) -> Result<BotView<'_>> {
    let state = game.state();
    let human = state
        .player(PlayerId::HUMAN)
        .context("seat 0 is empty")?;
    Ok(BotView {
        player: PlayerId::HUMAN,
        hand: &human.hand,
        trick: state.current_trick(),
        variant: game.config().variant,
        cards_per_round: state.cards_per_round(),
        round_number: state.round_number(),
    })
}

fn name(state: &GameState, id: PlayerId) -> &str {
    state.player(id).map_or("?", |p| p.name.as_str())
}

/// The human's hand, numbering the cards that may be played.
fn write_hand(out: &mut impl Write, state: &GameState, playable: &[Card]) -> Result<()> {
    let Some(human) = state.player(PlayerId::HUMAN) else {
        return Ok(());
    };
    let mut number = 0;
    let cards = human
        .hand
        .iter()
        .map(|card| {
            if playable.contains(card) {
                number += 1;
                format!("[{number}] {card}")
            } else if playable.is_empty() {
                card.to_string()
            } else {
                format!("({card})")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "Your hand: {cards}")?;
    Ok(())
}
