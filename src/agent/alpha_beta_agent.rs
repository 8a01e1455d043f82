use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::context::Context;
use crate::agent::{Agent, AgentState};
use crate::config::SearchParams;
use crate::isolation::{Evaluate, GameState};
use crate::search::{select_action, ActionSlot, DeepeningReport};

struct RunningSearch<A> {
    // cleared by stop() to cancel the worker, and by the worker itself once it is done
    search_active: Arc<AtomicBool>,

    slot: ActionSlot<A>,

    handle: JoinHandle<DeepeningReport>,

    start_t: Instant,
}

/// Iterative-deepening alpha-beta agent. Each turn's search runs on its own worker thread and publishes every
/// completed depth; `stop()` cancels the worker and keeps the last published action.
pub struct AlphaBetaAgent<S: GameState, E> {
    name: String,

    evaluator: E,
    params: SearchParams,

    state: Option<S>,

    search: Option<RunningSearch<S::Action>>,

    context: Context,
}

impl<S: GameState, E> AlphaBetaAgent<S, E> {
    pub fn new(name: impl Into<String>, evaluator: E, params: SearchParams) -> Self {
        AlphaBetaAgent {
            name: name.into(),
            evaluator,
            params,
            state: None,
            search: None,
            context: Context::default(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn set_context(&mut self, context: Context) {
        self.context = context;
    }
}

impl<S, E> Agent<S> for AlphaBetaAgent<S, E>
where
    S: GameState + Send + 'static,
    S::Action: Send + 'static,
    E: Evaluate<S> + Clone + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn update_state(&mut self, state: &S) {
        self.state = Some(state.clone());
    }

    fn go(&mut self) {
        if self.search.is_some() {
            self.stop();
        }

        let Some(state) = self.state.clone() else {
            panic!("{}: go() called before update_state()", self.name);
        };

        let search_active = Arc::new(AtomicBool::new(true));
        let slot = ActionSlot::new();

        let handle = std::thread::spawn({
            let search_active = Arc::clone(&search_active);
            let slot = slot.clone();
            let evaluator = self.evaluator.clone();
            let params = self.params;

            move || {
                let report = select_action(&state, &evaluator, params, StdRng::from_entropy(), &slot, &search_active);

                // cancelled or done on its own; either way nothing will be published anymore
                search_active.store(false, Ordering::Release);

                report
            }
        });

        self.search = Some(RunningSearch {
            search_active,
            slot,
            handle,
            start_t: Instant::now(),
        });
    }

    fn current_best_action(&mut self) -> Option<S::Action> {
        let search = self.search.as_ref()?;
        search.slot.latest().map(|emission| emission.action())
    }

    fn get_state(&self) -> AgentState {
        match &self.search {
            None => AgentState::Waiting,
            Some(search) if search.search_active.load(Ordering::Acquire) => AgentState::Go,
            Some(_) => AgentState::Finished,
        }
    }

    fn stop(&mut self) {
        let Some(search) = self.search.take() else {
            return;
        };

        search.search_active.store(false, Ordering::Release);

        let elapsed = search.start_t.elapsed();

        match search.handle.join() {
            Ok(report) => {
                self.context.record(&report);

                if report.random_opening {
                    info!("{}: played a random opening move", self.name);
                } else {
                    info!(
                        "{}: searched to depth {} in {:?} ({} nodes, {:.2e} nps)",
                        self.name,
                        report.depth_reached,
                        elapsed,
                        report.nodes_visited,
                        report.nodes_visited as f64 / elapsed.as_secs_f64()
                    );
                }
            }
            Err(_) => error!("{}: search worker panicked", self.name),
        }
    }
}

impl<S: GameState, E> Drop for AlphaBetaAgent<S, E> {
    fn drop(&mut self) {
        // detach a still running worker; it exits at its next node
        if let Some(search) = self.search.take() {
            search.search_active.store(false, Ordering::Release);
        }
    }
}

/*====================================================================================================================*/
