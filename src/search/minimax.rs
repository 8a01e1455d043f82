use crate::isolation::{Evaluate, GameState, Player};

/// Plain depth-limited minimax value of `state` for `player`, without any pruning.
pub fn minimax_value<S, E>(state: &S, depth: u32, evaluator: &E, player: Player) -> f64
where
    S: GameState,
    E: Evaluate<S>,
{
    if state.terminal_test() {
        return state.utility(player);
    }

    if depth == 0 {
        return evaluator.score(state, player);
    }

    let values = state
        .actions()
        .into_iter()
        .map(|action| minimax_value(&state.result(action), depth - 1, evaluator, player));

    if state.player() == player {
        values.fold(f64::NEG_INFINITY, f64::max)
    } else {
        values.fold(f64::INFINITY, f64::min)
    }
}

/// Best action for the player to move and its value, looking `depth` plies ahead; the first of equally good
/// actions is returned.
///
/// # Panics
///
/// if `depth` is zero, `state` is terminal or it has no legal actions
pub fn minimax_search<S, E>(state: &S, depth: u32, evaluator: &E) -> (S::Action, f64)
where
    S: GameState,
    E: Evaluate<S>,
{
    assert!(depth >= 1, "Called minimax search with depth 0");
    assert!(!state.terminal_test(), "Called minimax search on a terminal position");

    let player = state.player();
    let mut best: Option<(S::Action, f64)> = None;

    for action in state.actions() {
        let value = minimax_value(&state.result(action), depth - 1, evaluator, player);

        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((action, value)),
        }
    }

    best.unwrap_or_else(|| panic!("Called minimax search on a position with no legal actions"))
}

/*====================================================================================================================*/
