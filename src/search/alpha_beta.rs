use std::sync::atomic::{AtomicBool, Ordering};

use crate::isolation::{Evaluate, GameState, Player};

/// best root action of a completed search and its backed-up value (root player's perspective)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<A> {
    pub action: A,
    pub value: f64,
}

/*====================================================================================================================*/

/// Depth-limited minimax with alpha-beta pruning.
///
/// Values are always from the root player's absolute perspective: `max_value` is called on the root player's
/// turns and `min_value` on the opponent's. Children are searched in the order the position enumerates them.
pub struct AlphaBeta<'a, E> {
    evaluator: &'a E,

    player: Player,

    // cleared from outside to abandon the search
    search_active: Option<&'a AtomicBool>,
    aborted: bool,

    nodes_visited: u64,

    // some line of play was cut off by the depth limit rather than ending at a terminal position
    depth_cutoff: bool,
}

impl<'a, E> AlphaBeta<'a, E> {
    pub fn new(evaluator: &'a E) -> Self {
        AlphaBeta {
            evaluator,
            player: Player::First,
            search_active: None,
            aborted: false,
            nodes_visited: 0,
            depth_cutoff: false,
        }
    }

    /// poll `search_active` at every node and give up as soon as it reads `false`
    pub fn with_search_active(mut self, search_active: &'a AtomicBool) -> Self {
        self.search_active = Some(search_active);
        self
    }

    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// Whether the last search scored any position with the evaluator. If not, every line it looked at ended in a
    /// terminal position and searching deeper gives the same answer.
    pub fn reached_depth_cutoff(&self) -> bool {
        self.depth_cutoff
    }

    fn should_abort(&mut self) -> bool {
        if let Some(search_active) = self.search_active {
            if !search_active.load(Ordering::Acquire) {
                self.aborted = true;
            }
        }

        self.aborted
    }

    /// Search `depth` plies below `state` and return the best root action.
    ///
    /// Returns `None` only if the search was abandoned through the `search_active` flag; a partially searched
    /// depth is never reported.
    ///
    /// # Panics
    ///
    /// if `depth` is zero, `state` is terminal or it has no legal actions
    pub fn search<S>(&mut self, state: &S, depth: u32) -> Option<SearchResult<S::Action>>
    where
        S: GameState,
        E: Evaluate<S>,
    {
        assert!(depth >= 1, "Called alpha-beta search with depth 0");
        assert!(!state.terminal_test(), "Called alpha-beta search on a terminal position");

        let actions = state.actions();
        assert!(!actions.is_empty(), "Called alpha-beta search on a position with no legal actions");

        self.player = state.player();
        self.aborted = false;
        self.depth_cutoff = false;

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;

        let mut best: Option<SearchResult<S::Action>> = None;

        for action in actions {
            let value = self.min_value(&state.result(action), alpha, beta, depth - 1);

            if self.aborted {
                return None;
            }

            alpha = alpha.max(value);

            // strictly better only: the first action reaching the maximum keeps it
            match best {
                Some(SearchResult { value: best_value, .. }) if value <= best_value => {}
                _ => best = Some(SearchResult { action, value }),
            }
        }

        best
    }

    fn max_value<S>(&mut self, state: &S, alpha: f64, beta: f64, remaining_depth: u32) -> f64
    where
        S: GameState,
        E: Evaluate<S>,
    {
        if self.should_abort() {
            return 0.0;
        }

        self.nodes_visited += 1;

        if state.terminal_test() {
            return state.utility(self.player);
        }

        if remaining_depth == 0 {
            self.depth_cutoff = true;
            return self.evaluator.score(state, self.player);
        }

        let mut value = f64::NEG_INFINITY;
        let mut alpha = alpha;

        for action in state.actions() {
            value = value.max(self.min_value(&state.result(action), alpha, beta, remaining_depth - 1));

            if value >= beta || self.aborted {
                // beta cutoff
                return value;
            }

            alpha = alpha.max(value);
        }

        value
    }

    fn min_value<S>(&mut self, state: &S, alpha: f64, beta: f64, remaining_depth: u32) -> f64
    where
        S: GameState,
        E: Evaluate<S>,
    {
        if self.should_abort() {
            return 0.0;
        }

        self.nodes_visited += 1;

        if state.terminal_test() {
            return state.utility(self.player);
        }

        if remaining_depth == 0 {
            self.depth_cutoff = true;
            return self.evaluator.score(state, self.player);
        }

        let mut value = f64::INFINITY;
        let mut beta = beta;

        for action in state.actions() {
            value = value.min(self.max_value(&state.result(action), alpha, beta, remaining_depth - 1));

            if value <= alpha || self.aborted {
                // alpha cutoff
                return value;
            }

            beta = beta.min(value);
        }

        value
    }
}

/*====================================================================================================================*/

/// Best action at `depth` plies for the player to move in `state`.
///
/// # Panics
///
/// if `depth` is zero, `state` is terminal or it has no legal actions
pub fn alpha_beta_search<S, E>(state: &S, depth: u32, evaluator: &E) -> S::Action
where
    S: GameState,
    E: Evaluate<S>,
{
    match AlphaBeta::new(evaluator).search(state, depth) {
        Some(result) => result.action,
        None => unreachable!("search without a search_active flag can't be abandoned"),
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::isolation::{Action, Heuristic, Isolation, Loc};
    use crate::search::minimax::{minimax_search, minimax_value};
    use crate::search::test_tree::{random_tree, TreeBuilder};

    #[test]
    fn test_finds_immediate_win() {
        // four root actions, the third one wins on the spot; the others look great to the heuristic
        let mut tree = TreeBuilder::new();
        let root = tree.node([8, 0]);
        for i in 0..4 {
            let child = if i == 2 {
                tree.terminal(f64::INFINITY)
            } else {
                tree.chain([100, 0], 3)
            };
            tree.edge(root, child);
        }
        let state = tree.build(root);

        for heuristic in Heuristic::ALL {
            for depth in 1..=3 {
                let result = AlphaBeta::new(&heuristic).search(&state, depth).unwrap();

                assert_eq!(result.action, 2, "{heuristic} depth {depth}");
                assert_eq!(result.value, f64::INFINITY);
            }
        }
    }

    #[test]
    fn test_tie_break_keeps_first_action() {
        let mut tree = TreeBuilder::new();
        let root = tree.node([0, 0]);
        let mobilities = [[1, 0], [5, 0], [3, 0], [5, 0]];
        for mobility in mobilities {
            let child = tree.node(mobility);
            tree.edge(root, child);
        }
        let state = tree.build(root);

        let result = AlphaBeta::new(&Heuristic::OwnMobilityOnly).search(&state, 1).unwrap();

        assert_eq!(result.action, 1);
        assert_eq!(result.value, 5.0);
    }

    #[test]
    fn test_all_losing_picks_first_action() {
        let mut tree = TreeBuilder::new();
        let root = tree.node([0, 0]);
        for _ in 0..3 {
            let child = tree.terminal(f64::NEG_INFINITY);
            tree.edge(root, child);
        }
        let state = tree.build(root);

        let result = AlphaBeta::new(&Heuristic::default()).search(&state, 2).unwrap();

        assert_eq!(result.action, 0);
        assert_eq!(result.value, f64::NEG_INFINITY);
    }

    #[test]
    fn test_terminal_child_uses_utility() {
        // the terminal child would be the heuristic's favourite if it were scored by mobility
        let mut tree = TreeBuilder::new();
        let root = tree.node([0, 0]);
        let lost = tree.terminal_with_mobility(f64::NEG_INFINITY, [50, 0]);
        let quiet = tree.chain([1, 0], 4);
        tree.edge(root, lost);
        tree.edge(root, quiet);
        let state = tree.build(root);

        for depth in 1..=4 {
            let result = AlphaBeta::new(&Heuristic::OwnMobilityOnly).search(&state, depth).unwrap();
            assert_eq!(result.action, 1, "depth {depth}");
        }
    }

    #[test]
    fn test_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = random_tree(&mut rng, 4);

        let first = AlphaBeta::new(&Heuristic::default()).search(&state, 4).unwrap();
        for _ in 0..5 {
            assert_eq!(AlphaBeta::new(&Heuristic::default()).search(&state, 4), Some(first));
        }
    }

    #[test]
    fn test_pruning_matches_minimax_on_random_trees() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..200 {
            let state = random_tree(&mut rng, 5);

            for heuristic in Heuristic::ALL {
                for depth in 1..=5 {
                    let pruned = AlphaBeta::new(&heuristic).search(&state, depth).unwrap();
                    let (action, value) = minimax_search(&state, depth, &heuristic);

                    assert_eq!(pruned.value, value, "{heuristic} depth {depth}");
                    assert_eq!(pruned.action, action, "{heuristic} depth {depth}");
                }
            }
        }
    }

    #[test]
    fn test_pruning_matches_minimax_on_isolation() {
        let state = Isolation::with_blocked(&[Loc::new(3, 3), Loc::new(5, 7), Loc::new(2, 4)])
            .result(Action::Place(Loc::new(4, 5)))
            .result(Action::Place(Loc::new(1, 1)));

        for heuristic in Heuristic::ALL {
            for depth in 1..=3 {
                let mut search = AlphaBeta::new(&heuristic);
                let pruned = search.search(&state, depth).unwrap();

                assert_eq!(
                    pruned.value,
                    minimax_value(&state, depth, &heuristic, state.player()),
                    "{heuristic} depth {depth}"
                );
                assert!(state.actions().contains(&pruned.action));
            }
        }
    }

    #[test]
    fn test_pruning_skips_work() {
        let state = Isolation::new()
            .result(Action::Place(Loc::new(4, 5)))
            .result(Action::Place(Loc::new(4, 2)));

        let heuristic = Heuristic::default();
        let mut search = AlphaBeta::new(&heuristic);
        search.search(&state, 4).unwrap();

        // a full width-8 tree of depth 4 has well over a thousand nodes
        let full_tree_nodes: u64 = (1..=4).map(|d| 8u64.pow(d)).sum();
        assert!(search.nodes_visited() < full_tree_nodes);
    }

    #[test]
    fn test_depth_cutoff_is_tracked() {
        let mut tree = TreeBuilder::new();
        let root = tree.node([0, 0]);
        for utility in [1.0, -1.0] {
            let child = tree.terminal(utility);
            tree.edge(root, child);
        }
        let solved = tree.build(root);
        let heuristic = Heuristic::default();

        let mut search = AlphaBeta::new(&heuristic);
        assert_eq!(search.search(&solved, 3).unwrap().action, 0);
        assert!(!search.reached_depth_cutoff());

        let state = Isolation::new()
            .result(Action::Place(Loc::new(4, 5)))
            .result(Action::Place(Loc::new(4, 2)));
        search.search(&state, 1).unwrap();
        assert!(search.reached_depth_cutoff());
    }

    #[test]
    fn test_abandoned_search_reports_nothing() {
        let state = Isolation::new()
            .result(Action::Place(Loc::new(4, 5)))
            .result(Action::Place(Loc::new(4, 2)));
        let search_active = AtomicBool::new(false);
        let heuristic = Heuristic::default();

        let mut search = AlphaBeta::new(&heuristic).with_search_active(&search_active);

        assert_eq!(search.search(&state, 3), None);
    }

    #[test]
    fn test_alpha_beta_search_returns_legal_action() {
        let state = Isolation::new()
            .result(Action::Place(Loc::new(0, 0)))
            .result(Action::Place(Loc::new(8, 10)));

        let action = alpha_beta_search(&state, 3, &Heuristic::default());

        assert!(state.actions().contains(&action));
    }

    #[test]
    #[should_panic(expected = "terminal")]
    fn test_search_on_terminal_position_panics() {
        let state = Isolation::with_blocked(&[Loc::new(2, 1), Loc::new(1, 2)])
            .result(Action::Place(Loc::new(0, 0)))
            .result(Action::Place(Loc::new(4, 5)));

        alpha_beta_search(&state, 1, &Heuristic::default());
    }

    #[test]
    #[should_panic(expected = "depth 0")]
    fn test_search_with_depth_zero_panics() {
        alpha_beta_search(&Isolation::new(), 0, &Heuristic::default());
    }
}
