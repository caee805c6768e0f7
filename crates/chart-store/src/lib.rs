//! Datastore layer for Expense Chart.
//!
//! Models the expense collection as a directory of JSON documents, one file
//! per record, and turns successive snapshots of that collection into
//! added/modified/removed change events for the feed.

pub mod feed;
pub mod store;

pub use chart_core as core;
