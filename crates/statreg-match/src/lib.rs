//! Heuristic column matching for register imports.
//!
//! Scores file headers against target field labels and produces the
//! initial column mapping an operator then refines by hand.

pub mod engine;
pub mod similarity;
pub mod state;

pub use engine::{AUTO_MAP_THRESHOLD, AutoMapOutcome, auto_map};
pub use similarity::similarity;
pub use state::MappingState;
