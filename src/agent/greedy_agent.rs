use crate::agent::{Agent, AgentState};
use crate::isolation::{Evaluate, GameState};

/// One-ply lookahead: plays the action whose resulting position scores best for itself.
pub struct GreedyAgent<S: GameState, E> {
    evaluator: E,
    state: Option<S>,
    best_action: Option<S::Action>,
    agent_state: AgentState,
}

impl<S: GameState, E: Evaluate<S>> GreedyAgent<S, E> {
    pub fn new(evaluator: E) -> Self {
        GreedyAgent {
            evaluator,
            state: None,
            best_action: None,
            agent_state: AgentState::Waiting,
        }
    }

    fn greedy_action(&self, state: &S) -> Option<S::Action> {
        let player = state.player();
        let mut best: Option<(S::Action, f64)> = None;

        for action in state.actions() {
            let next = state.result(action);

            let value = if next.terminal_test() {
                next.utility(player)
            } else {
                self.evaluator.score(&next, player)
            };

            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }

        best.map(|(action, _)| action)
    }
}

impl<S: GameState, E: Evaluate<S>> Agent<S> for GreedyAgent<S, E> {
    fn name(&self) -> &str {
        "greedy"
    }

    fn update_state(&mut self, state: &S) {
        self.state = Some(state.clone());
    }

    fn go(&mut self) {
        self.best_action = self.state.as_ref().and_then(|state| self.greedy_action(state));
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
