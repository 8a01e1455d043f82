//! Knight's Isolation playing agent: iterative-deepening alpha-beta search over a bitboard, baseline opponents, a
//! timed game driver and a parallel tournament runner.

pub mod agent;
pub mod config;
pub mod error;
pub mod game;
pub mod isolation;
pub mod search;
pub mod tournament;

pub use error::{Error, Result};
