use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::agent::{Agent, AgentState};
use crate::isolation::GameState;

/// agent that plays a uniformly random legal action
pub struct RandomAgent<S: GameState> {
    state: Option<S>,
    best_action: Option<S::Action>,
    agent_state: AgentState,
}

impl<S: GameState> RandomAgent<S> {
    pub fn new() -> Self {
        RandomAgent {
            state: None,
            best_action: None,
            agent_state: AgentState::Waiting,
        }
    }
}

impl<S: GameState> Default for RandomAgent<S> {
    fn default() -> Self {
        RandomAgent::new()
    }
}

impl<S: GameState> Agent<S> for RandomAgent<S> {
    fn name(&self) -> &str {
        "random"
    }

    fn update_state(&mut self, state: &S) {
        self.state = Some(state.clone());
    }

    fn go(&mut self) {
        self.best_action = self
            .state
            .as_ref()
            .and_then(|state| state.actions().choose(&mut thread_rng()).copied());
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
