mod alpha_beta;
mod deepening;
pub mod minimax;

#[cfg(test)]
pub(crate) mod test_tree;

pub use alpha_beta::{alpha_beta_search, AlphaBeta, SearchResult};
pub use deepening::{select_action, ActionSlot, Deepening, DeepeningReport, Emission};
