mod alpha_beta_agent;
mod base_agent;
mod context;
mod greedy_agent;
mod minimax_agent;
mod random_agent;

pub use alpha_beta_agent::AlphaBetaAgent;
pub use base_agent::{Agent, AgentState};
pub use context::Context;
pub use greedy_agent::GreedyAgent;
pub use minimax_agent::MinimaxAgent;
pub use random_agent::RandomAgent;
