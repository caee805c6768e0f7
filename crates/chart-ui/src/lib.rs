//! Terminal UI layer for Expense Chart.
//!
//! Provides themes, the slice transition reconciler and animator, the donut
//! chart / legend / tooltip views, and the main application event loop built
//! on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod themes;
pub mod transitions;

pub use chart_core as core;
