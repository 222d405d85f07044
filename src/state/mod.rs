//! State module for tracking analysis progress
//!
//! # Components
//!
//! - `AnalysisState`: where a person page is in the analysis state machine
//! - `TargetOutcome`: how processing a dequeued target ended

mod analysis_state;
mod outcome;

// Re-export main types
pub use analysis_state::AnalysisState;
pub use outcome::TargetOutcome;
