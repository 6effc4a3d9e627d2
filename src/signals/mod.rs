// =============================================================================
// Signals Module
// =============================================================================
//
// Turns indicator readings into votes and votes into a recommendation:
// - Per-indicator threshold rules
// - Unweighted majority tally

pub mod tally;
pub mod vote;

pub use tally::VoteSummary;
