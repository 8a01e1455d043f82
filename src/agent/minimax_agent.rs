use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::agent::{Agent, AgentState};
use crate::isolation::{Evaluate, GameState};
use crate::search::minimax::minimax_search;

/// Baseline opponent: unpruned minimax to a fixed depth, random moves in the opening.
pub struct MinimaxAgent<S: GameState, E> {
    depth: u32,
    evaluator: E,
    opening_random_plies: u32,
    state: Option<S>,
    best_action: Option<S::Action>,
    agent_state: AgentState,
}

impl<S: GameState, E: Evaluate<S>> MinimaxAgent<S, E> {
    /// `opening_random_plies` plays the same role as in [`SearchParams`](crate::config::SearchParams)
    pub fn new(depth: u32, evaluator: E, opening_random_plies: u32) -> Self {
        assert!(depth >= 1, "Minimax agent needs a depth of at least 1");

        MinimaxAgent {
            depth,
            evaluator,
            opening_random_plies,
            state: None,
            best_action: None,
            agent_state: AgentState::Waiting,
        }
    }
}

impl<S: GameState, E: Evaluate<S>> Agent<S> for MinimaxAgent<S, E> {
    fn name(&self) -> &str {
        "minimax"
    }

    fn update_state(&mut self, state: &S) {
        self.state = Some(state.clone());
    }

    fn go(&mut self) {
        self.best_action = match &self.state {
            Some(state) if state.terminal_test() => None,
            Some(state) if state.ply_count() < self.opening_random_plies => {
                state.actions().choose(&mut thread_rng()).copied()
            }
            Some(state) => Some(minimax_search(state, self.depth, &self.evaluator).0),
            None => None,
        };
        self.agent_state = AgentState::Finished;
    }

    fn current_best_action(&mut self) -> Option<S::Action> {
        self.best_action
    }

    fn get_state(&self) -> AgentState {
        self.agent_state
    }

    fn stop(&mut self) {
        self.agent_state = AgentState::Waiting;
    }
}
