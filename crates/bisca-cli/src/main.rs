use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use bisca_bot::HeuristicPolicy;
use bisca_cli::config::BiscaConfig;
use bisca_cli::logging::init_logging;
use bisca_cli::session::{Session, SessionEnd};
use bisca_cli::store::FileStore;
use bisca_core::game::{Game, VirtualScheduler};
use bisca_core::model::rules::RuleVariant;

/// Play Bisca against computer opponents in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "bisca",
    author,
    version,
    about = "Bisca trick-declaration card game"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bisca.yaml")]
    config: PathBuf,

    /// Override the RNG seed for shuffles and bot bids.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of seats (2-8).
    #[arg(long, value_name = "COUNT")]
    players: Option<usize>,

    /// Override the rule variant (absolute_rank or trump_follow_suit).
    #[arg(long, value_name = "VARIANT")]
    variant: Option<RuleVariant>,

    /// Let the heuristic play the human seat as well.
    #[arg(long)]
    autopilot: bool,

    /// Continue the saved game instead of dealing a new one.
    #[arg(long, conflicts_with = "restart")]
    resume: bool,

    /// Discard any saved game before dealing.
    #[arg(long)]
    restart: bool,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BiscaConfig::from_path(&cli.config)?;

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(players) = cli.players {
        config.players = players;
    }

    if let Some(variant) = cli.variant {
        config.variant = variant;
    }

    if cli.autopilot {
        config.autopilot = true;
    }

    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    println!(
        "Loaded configuration for {} with {} players ({} rules, seed {seed})",
        config.player_name, config.players, config.variant
    );

    if cli.validate_only {
        println!("Validation-only mode: no game played.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging, &config.log_path())?;

    let store = FileStore::in_dir(&config.save_dir);
    let mut game = Game::new(
        config.game_config(),
        VirtualScheduler::new(),
        Box::new(HeuristicPolicy::new(seed)),
        seed,
    )
    .with_store(Box::new(store.clone()));

    if cli.restart {
        game.restart();
    }

    let resumed = cli.resume
        && game
            .resume_saved()
            .with_context(|| format!("resuming from {}", store.path().display()))?;
    if cli.resume && !resumed {
        println!("No saved game in {}; dealing a new one.", config.save_dir.display());
    }
    if !resumed {
        game.start_game(&config.player_name, config.players)?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(game, stdin.lock(), stdout.lock()).realtime(config.realtime);
    if config.autopilot {
        session = session.with_autopilot(HeuristicPolicy::new(seed.wrapping_add(1)));
    }

    match session.run()? {
        SessionEnd::Finished { standings, .. } => {
            for (place, (player, score)) in standings.iter().enumerate() {
                let name = session
                    .game()
                    .state()
                    .player(*player)
                    .map_or("?", |p| p.name.as_str());
                println!("{}. {name} {score}", place + 1);
            }
        }
        SessionEnd::Quit => {}
    }
    Ok(())
}
