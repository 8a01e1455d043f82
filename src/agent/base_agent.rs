use std::time::Instant;

use crate::config::TimeControl;
use crate::isolation::GameState;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AgentState {
    Waiting,  // agent doing nothing, waiting for go
    Go,       // agent calculating next move
    Finished, // calculation over, the current best action won't change anymore
}

pub trait Agent<S: GameState> {
    fn name(&self) -> &str;

    /// position to think about on the next `go()`
    fn update_state(&mut self, state: &S);

    /// start working on the current position; must not block for long
    fn go(&mut self);

    /// best action found so far in the current turn, if any
    fn current_best_action(&mut self) -> Option<S::Action>;

    fn get_state(&self) -> AgentState;

    /// end the current turn; the agent stops working and goes back to waiting
    fn stop(&mut self);

    /// Play one turn: think about `state` until the time limit (minus the safety buffer) expires or the agent
    /// finishes on its own, then take whatever its best action is at that point.
    fn get_action(&mut self, state: &S, time_control: &TimeControl) -> Option<S::Action> {
        let start_t = Instant::now();

        self.update_state(state);
        self.go();

        let stop_time = start_t + time_control.time_limit().saturating_sub(time_control.buffer());

        // wait for either the timer to (almost) expire or the agent to finish
        loop {
            let now = Instant::now();

            if stop_time <= now || self.get_state() != AgentState::Go {
                break;
            }

            std::thread::sleep(std::cmp::min(time_control.poll_interval(), stop_time - now));
        }

        let best_action = self.current_best_action();
        self.stop();

        best_action
    }
}
