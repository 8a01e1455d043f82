use std::fmt::Display;

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::Agent;
use crate::config::TimeControl;
use crate::isolation::{GameState, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// a player had no legal move left
    NoLegalMoves,
    /// the player to move produced no action within the time limit
    Timeout,
    /// the player to move produced an action that isn't legal
    IllegalMove,
}

#[derive(Debug, Clone)]
pub struct GameOutcome<S: GameState> {
    pub winner: Player,
    pub termination: Termination,
    pub history: Vec<S::Action>,
    pub final_state: S,
}

/*====================================================================================================================*/

/// play `plies` uniformly random moves from `state`, stopping early at a terminal position
pub fn random_opening<S: GameState>(state: S, plies: u32, rng: &mut impl Rng) -> S {
    let mut state = state;

    for _ in 0..plies {
        match state.actions().choose(rng) {
            Some(&action) if !state.terminal_test() => state = state.result(action),
            _ => break,
        }
    }

    state
}

/// Play `initial` to the end, asking `agents[i]` for the moves of the player with index `i`.
///
/// A player that doesn't come up with a move in time, or comes up with an illegal one, forfeits.
pub fn play_game<S>(initial: S, agents: [&mut dyn Agent<S>; 2], time_control: &TimeControl) -> GameOutcome<S>
where
    S: GameState + Display,
{
    let mut state = initial;
    let mut history = Vec::new();

    let (winner, termination) = loop {
        if state.terminal_test() {
            let winner = if state.utility(Player::First) > 0.0 {
                Player::First
            } else {
                Player::Second
            };
            break (winner, Termination::NoLegalMoves);
        }

        let player = state.player();
        let agent = &mut *agents[player.index()];

        let Some(action) = agent.get_action(&state, time_control) else {
            warn!("{} ({player}) didn't produce a move in time", agent.name());
            break (!player, Termination::Timeout);
        };

        if !state.actions().contains(&action) {
            warn!("{} ({player}) tried illegal move {action:?}", agent.name());
            break (!player, Termination::IllegalMove);
        }

        debug!("{} ({player}) plays {action:?}", agent.name());

        history.push(action);
        state = state.result(action);

        debug!("\n{state}\n");
    };

    info!(
        "{} ({winner}) wins after {} plies: {termination:?}",
        agents[winner.index()].name(),
        state.ply_count()
    );

    GameOutcome {
        winner,
        termination,
        history,
        final_state: state,
    }
}

/*====================================================================================================================*/
