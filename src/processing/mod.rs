//! Filtering, sorting and aggregation over backend results, plus the
//! candidate-side guidance heuristics

pub mod advice;
pub mod filter;
pub mod sort;
pub mod stats;
