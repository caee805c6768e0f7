//! Core domain logic for Expense Chart.
//!
//! Holds the expense record model, the change-event reducer, pie-slice
//! geometry, the ordinal color domain, currency formatting, CLI settings and
//! the shared error type. Everything in this crate is pure and free of
//! terminal or I/O concerns (settings persistence aside).

pub mod error;
pub mod formatting;
pub mod geometry;
pub mod models;
pub mod palette;
pub mod reducer;
pub mod settings;

pub use error::{ChartError, Result};
