use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use rand::thread_rng;

use isolation::agent::Agent;
use isolation::config::Config;
use isolation::game::{play_game, random_opening};
use isolation::isolation::{Heuristic, Isolation, Player};
use isolation::tournament::{hero_builder, run_tournament, Opponent};

/// Knight's Isolation agent: iterative-deepening alpha-beta with pluggable heuristics
#[derive(Parser)]
#[command(name = "isolation")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CommonArgs {
    /// JSON config file, flags given on the command line take precedence
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// evaluation heuristic of the alpha-beta agent
    #[arg(long, global = true)]
    heuristic: Option<Heuristic>,

    /// per-move time limit in milliseconds
    #[arg(long, global = true)]
    time_limit: Option<u64>,

    /// stop deepening after this many plies
    #[arg(long, global = true)]
    max_depth: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Play and print a single game against a baseline opponent
    Play {
        #[arg(long, default_value = "minimax")]
        opponent: Opponent,

        /// let the opponent move first
        #[arg(long)]
        second: bool,
    },
    /// Play many games against a baseline opponent and report the win rate
    Tournament {
        #[arg(long, default_value = "minimax")]
        opponent: Opponent,

        #[arg(long)]
        rounds: Option<u32>,

        /// play every opening twice with the seats swapped
        #[arg(long)]
        fair: bool,

        /// games played in parallel
        #[arg(long)]
        processes: Option<usize>,
    },
}

fn load_config(args: &CommonArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("couldn't load config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(heuristic) = args.heuristic {
        config.heuristic = heuristic;
    }
    if let Some(time_limit_ms) = args.time_limit {
        config.time.time_limit_ms = time_limit_ms;
    }
    if args.max_depth.is_some() {
        config.search.max_depth = args.max_depth;
    }

    Ok(config)
}

fn play(config: &Config, opponent: Opponent, second: bool) {
    let mut hero = hero_builder(config)();
    let mut opponent_agent = opponent.builder(config)();

    let (agents, hero_seat): ([&mut dyn Agent<Isolation>; 2], Player) = if second {
        ([opponent_agent.as_mut(), hero.as_mut()], Player::Second)
    } else {
        ([hero.as_mut(), opponent_agent.as_mut()], Player::First)
    };

    let opening = random_opening(Isolation::new(), config.tournament.opening_plies, &mut thread_rng());
    let outcome = play_game(opening, agents, &config.time);

    println!("\nFinal board:\n\n{}\n", outcome.final_state);

    let moves = outcome
        .history
        .iter()
        .map(|action| format!("{action:?}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Moves after the opening: {moves}");

    if outcome.winner == hero_seat {
        println!("{} ({}) won: {:?}", config.heuristic, outcome.winner, outcome.termination);
    } else {
        println!("{opponent} ({}) won: {:?}", outcome.winner, outcome.termination);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = load_config(&cli.common)?;

    info!("playing with heuristic {} and a {:?} time limit", config.heuristic, config.time.time_limit());

    match cli.command {
        Command::Play { opponent, second } => play(&config, opponent, second),
        Command::Tournament {
            opponent,
            rounds,
            fair,
            processes,
        } => {
            if let Some(rounds) = rounds {
                config.tournament.rounds = rounds;
            }
            if let Some(processes) = processes {
                config.tournament.processes = processes;
            }
            config.tournament.fair_matches |= fair;

            let result = run_tournament(
                hero_builder(&config),
                opponent.builder(&config),
                &config.tournament,
                &config.time,
            );

            println!("{} vs {opponent}: {result}", config.heuristic);
        }
    }

    Ok(())
}
