//! Fire-and-forget write path back to the store.
//!
//! The delete affordance in the tooltip issues a delete with no awaited
//! completion and no retry; a rejection is logged, never surfaced to the
//! caller.

use chart_store::store::ExpenseStore;
use tracing::{debug, warn};

/// Cheaply cloneable handle the UI uses to issue writes.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    store: ExpenseStore,
}

impl StoreHandle {
    pub fn new(store: ExpenseStore) -> Self {
        Self { store }
    }

    /// Issue a delete for `id` without awaiting completion.
    ///
    /// The removal itself reaches the chart through the change feed on the
    /// next poll, exactly like any other remote mutation; nothing is mutated
    /// locally here.
    pub fn delete(&self, id: &str) {
        let store = self.store.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            match store.delete(&id) {
                Ok(()) => debug!(id = %id, "delete request applied"),
                Err(e) => warn!(error = %e, id = %id, "delete request rejected"),
            }
        });
    }
}
