//! Runtime orchestration layer for Expense Chart.
//!
//! Polls the expense collection in a background task, diffs snapshots into
//! change batches for the UI, and owns the fire-and-forget write path back
//! to the store.

pub mod orchestrator;
pub mod writer;

pub use chart_core as core;
pub use chart_store as store;
