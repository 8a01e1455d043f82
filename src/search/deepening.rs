use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::alpha_beta::AlphaBeta;
use crate::config::SearchParams;
use crate::isolation::{Evaluate, GameState};

/// One answer of the action selector. Every emission is complete on its own and legal in the root position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Emission<A> {
    /// opening move picked at random, no search
    Random(A),
    /// best action of a fully completed alpha-beta search to `depth`
    Searched { action: A, depth: u32, value: f64 },
}

impl<A: Copy> Emission<A> {
    pub fn action(&self) -> A {
        match *self {
            Emission::Random(action) => action,
            Emission::Searched { action, .. } => action,
        }
    }

    /// completed search depth; 0 for a random opening move
    pub fn depth(&self) -> u32 {
        match *self {
            Emission::Random(_) => 0,
            Emission::Searched { depth, .. } => depth,
        }
    }
}

/*====================================================================================================================*/

/// Single-slot mailbox holding the latest emission; every publication replaces the previous one.
pub struct ActionSlot<A> {
    latest: Arc<Mutex<Option<Emission<A>>>>,
}

impl<A: Copy> ActionSlot<A> {
    pub fn new() -> Self {
        ActionSlot {
            latest: Arc::new(Mutex::new(None)),
        }
    }

    pub fn publish(&self, emission: Emission<A>) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(emission);
    }

    pub fn latest(&self) -> Option<Emission<A>> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: Copy> Default for ActionSlot<A> {
    fn default() -> Self {
        ActionSlot::new()
    }
}

// every clone shares the same slot
impl<A> Clone for ActionSlot<A> {
    fn clone(&self) -> Self {
        ActionSlot {
            latest: Arc::clone(&self.latest),
        }
    }
}

/*====================================================================================================================*/

/// statistics of one action selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeepeningReport {
    /// deepest completed search, 0 if no search completed or the move was random
    pub depth_reached: u32,
    pub nodes_visited: u64,
    pub random_opening: bool,
}

/// Iterative deepening over one root position.
///
/// In the opening (fewer than `opening_random_plies` plies played) this yields a single random legal action, and a
/// terminal position yields nothing. Otherwise it runs alpha-beta at depth 1, 2, 3, ... and yields each completed
/// depth's result; the sequence only ends when `search_active` is cleared (the abandoned depth yields nothing),
/// `max_depth` has been searched, or a depth ended at terminal positions only.
pub struct Deepening<'a, S, E, R> {
    state: &'a S,
    evaluator: &'a E,
    params: SearchParams,
    rng: R,

    search_active: Option<&'a AtomicBool>,

    next_depth: u32,
    finished: bool,

    report: DeepeningReport,
}

impl<'a, S, E, R> Deepening<'a, S, E, R>
where
    S: GameState,
    E: Evaluate<S>,
    R: Rng,
{
    pub fn new(state: &'a S, evaluator: &'a E, params: SearchParams, rng: R) -> Self {
        Deepening {
            state,
            evaluator,
            params,
            rng,
            search_active: None,
            next_depth: 1,
            finished: false,
            report: DeepeningReport::default(),
        }
    }

    pub fn with_search_active(mut self, search_active: &'a AtomicBool) -> Self {
        self.search_active = Some(search_active);
        self
    }

    pub fn report(&self) -> DeepeningReport {
        self.report
    }

    fn is_cancelled(&self) -> bool {
        self.search_active
            .is_some_and(|search_active| !search_active.load(Ordering::Acquire))
    }

    fn random_opening(&mut self) -> Option<Emission<S::Action>> {
        self.finished = true;
        self.report.random_opening = true;

        let action = *self.state.actions().choose(&mut self.rng)?;
        debug!("Opening at ply {}: random action {:?}", self.state.ply_count(), action);

        Some(Emission::Random(action))
    }
}

impl<'a, S, E, R> Iterator for Deepening<'a, S, E, R>
where
    S: GameState,
    E: Evaluate<S>,
    R: Rng,
{
    type Item = Emission<S::Action>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.is_cancelled() {
            return None;
        }

        if self.state.terminal_test() {
            self.finished = true;
            return None;
        }

        if self.state.ply_count() < self.params.opening_random_plies {
            return self.random_opening();
        }

        if self.params.max_depth.is_some_and(|max_depth| self.next_depth > max_depth) {
            self.finished = true;
            return None;
        }

        let depth = self.next_depth;
        let start_t = Instant::now();

        let mut search = AlphaBeta::new(self.evaluator);
        if let Some(search_active) = self.search_active {
            search = search.with_search_active(search_active);
        }

        let result = search.search(self.state, depth);
        self.report.nodes_visited += search.nodes_visited();

        let Some(result) = result else {
            debug!("Depth {depth} abandoned after {:?}", start_t.elapsed());
            self.finished = true;
            return None;
        };

        debug!(
            "Depth {depth}: {:?} with value {} ({} nodes, {:?})",
            result.action,
            result.value,
            search.nodes_visited(),
            start_t.elapsed()
        );

        self.report.depth_reached = depth;
        self.next_depth += 1;

        if !search.reached_depth_cutoff() {
            debug!("Game tree exhausted at depth {depth}");
            self.finished = true;
        }

        Some(Emission::Searched {
            action: result.action,
            depth,
            value: result.value,
        })
    }
}

/*====================================================================================================================*/

/// Publish every emission of an iterative deepening run on `state` to `slot` until `search_active` is cleared
/// (or `max_depth` is reached), then return the run's statistics.
pub fn select_action<S, E, R>(
    state: &S,
    evaluator: &E,
    params: SearchParams,
    rng: R,
    slot: &ActionSlot<S::Action>,
    search_active: &AtomicBool,
) -> DeepeningReport
where
    S: GameState,
    E: Evaluate<S>,
    R: Rng,
{
    let mut deepening = Deepening::new(state, evaluator, params, rng).with_search_active(search_active);

    for emission in deepening.by_ref() {
        slot.publish(emission);
    }

    deepening.report()
}

/*====================================================================================================================*/
