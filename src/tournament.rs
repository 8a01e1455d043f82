use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rand::thread_rng;
use threadpool::ThreadPool;

use crate::agent::{Agent, AlphaBetaAgent, GreedyAgent, MinimaxAgent, RandomAgent};
use crate::config::{Config, TimeControl, TournamentConfig};
use crate::error::Error;
use crate::game::{play_game, random_opening};
use crate::isolation::{Isolation, Player};

pub type BoxedAgent = Box<dyn Agent<Isolation> + Send>;

pub type AgentBuilder = Arc<dyn Fn() -> BoxedAgent + Send + Sync>;

/// builds the alpha-beta agent described by `config`
pub fn hero_builder(config: &Config) -> AgentBuilder {
    let heuristic = config.heuristic;
    let params = config.search;

    Arc::new(move || -> BoxedAgent {
        Box::new(AlphaBetaAgent::<Isolation, _>::new(heuristic.to_string(), heuristic, params))
    })
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Random,
    Greedy,
    Minimax,
    /// a second alpha-beta agent with the same configuration
    SelfPlay,
}

impl Opponent {
    pub fn builder(self, config: &Config) -> AgentBuilder {
        let heuristic = config.heuristic;
        let depth = config.minimax_depth;
        let opening_random_plies = config.search.opening_random_plies;

        match self {
            Opponent::Random => Arc::new(|| -> BoxedAgent { Box::new(RandomAgent::<Isolation>::new()) }),
            Opponent::Greedy => {
                Arc::new(move || -> BoxedAgent { Box::new(GreedyAgent::<Isolation, _>::new(heuristic)) })
            }
            Opponent::Minimax => Arc::new(move || -> BoxedAgent {
                Box::new(MinimaxAgent::<Isolation, _>::new(depth, heuristic, opening_random_plies))
            }),
            Opponent::SelfPlay => hero_builder(config),
        }
    }
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opponent::Random => "random",
            Opponent::Greedy => "greedy",
            Opponent::Minimax => "minimax",
            Opponent::SelfPlay => "self",
        };

        write!(f, "{name}")
    }
}

impl FromStr for Opponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "random" => Ok(Opponent::Random),
            "greedy" => Ok(Opponent::Greedy),
            "minimax" => Ok(Opponent::Minimax),
            "self" | "self_play" => Ok(Opponent::SelfPlay),
            other => Err(Error::UnknownOpponent(other.to_owned())),
        }
    }
}

/*====================================================================================================================*/

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TournamentResult {
    pub hero_wins: u64,
    pub opponent_wins: u64,
    pub games: u64,
}

impl TournamentResult {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }

        self.hero_wins as f64 / self.games as f64
    }
}

impl fmt::Display for TournamentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hero won {} of {} games ({:.1}%), opponent won {}",
            self.hero_wins,
            self.games,
            100.0 * self.win_rate(),
            self.opponent_wins
        )
    }
}

/// Play `config.rounds` games between fresh agents from both builders, in parallel.
///
/// Every round starts from its own random opening with the hero taking the first seat in even rounds. With
/// `fair_matches` each opening is played a second time with the seats swapped.
pub fn run_tournament(
    hero_builder: AgentBuilder,
    opponent_builder: AgentBuilder,
    config: &TournamentConfig,
    time_control: &TimeControl,
) -> TournamentResult {
    let hero_wins = Arc::new(AtomicU64::new(0));
    let opponent_wins = Arc::new(AtomicU64::new(0));

    let pool = ThreadPool::new(config.processes.max(1));

    let mut rng = thread_rng();
    let mut games = 0;

    for round in 0..config.rounds {
        let opening = random_opening(Isolation::new(), config.opening_plies, &mut rng);

        let hero_seats: &[Player] = match (config.fair_matches, round % 2 == 0) {
            (true, _) => &[Player::First, Player::Second],
            (false, true) => &[Player::First],
            (false, false) => &[Player::Second],
        };

        for &hero_seat in hero_seats {
            games += 1;

            let opening = opening.clone();
            let time_control = *time_control;

            let hero_builder = Arc::clone(&hero_builder);
            let opponent_builder = Arc::clone(&opponent_builder);

            let hero_wins = Arc::clone(&hero_wins);
            let opponent_wins = Arc::clone(&opponent_wins);

            pool.execute(move || {
                let mut hero = hero_builder();
                let mut opponent = opponent_builder();

                let agents: [&mut dyn Agent<Isolation>; 2] = match hero_seat {
                    Player::First => [hero.as_mut(), opponent.as_mut()],
                    Player::Second => [opponent.as_mut(), hero.as_mut()],
                };

                let outcome = play_game(opening, agents, &time_control);

                debug!("round {round}: hero as {hero_seat}, {} wins", outcome.winner);

                if outcome.winner == hero_seat {
                    hero_wins.fetch_add(1, Ordering::Release);
                } else {
                    opponent_wins.fetch_add(1, Ordering::Release);
                }
            });
        }
    }

    pool.join();

    let result = TournamentResult {
        hero_wins: hero_wins.load(Ordering::Acquire),
        opponent_wins: opponent_wins.load(Ordering::Acquire),
        games,
    };

    info!("{result}");

    result
}

/*====================================================================================================================*/
