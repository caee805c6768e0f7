//! Async change-feed orchestrator.
//!
//! Polls the [`ExpenseStore`] in a tokio task, diffs each snapshot against
//! the previous one, and sends non-empty [`ChangeBatch`]es through an `mpsc`
//! channel so the TUI event loop can consume them without any shared mutable
//! state. The first poll delivers the whole collection as a batch of `Added`
//! events.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use chart_core::models::{ChangeBatch, ExpenseRecord};
use chart_store::feed::diff_snapshots;
use chart_store::store::ExpenseStore;

// ── FeedOrchestrator ──────────────────────────────────────────────────────────

/// Background feed coordinator.
///
/// Call [`FeedOrchestrator::start`] to spin up the polling loop in a
/// dedicated tokio task and receive a channel endpoint for [`ChangeBatch`]
/// updates.
pub struct FeedOrchestrator {
    /// How often to poll the collection.
    poll_interval: Duration,
    /// The collection to watch.
    store: ExpenseStore,
}

impl FeedOrchestrator {
    /// Create a new orchestrator polling `store` every `poll_interval_secs`
    /// seconds.
    pub fn new(poll_interval_secs: u64, store: ExpenseStore) -> Self {
        Self {
            poll_interval: Duration::from_secs(poll_interval_secs),
            store,
        }
    }

    /// Start the feed loop.
    ///
    /// Spawns a tokio task that runs the polling loop. Returns:
    /// - An `mpsc::Receiver<ChangeBatch>` for the caller to drain.
    /// - A [`FeedHandle`] that can be used to abort the loop.
    pub fn start(self) -> (mpsc::Receiver<ChangeBatch>, FeedHandle) {
        // Buffer a modest number of batches so a slow consumer doesn't stall
        // the poll loop.
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            self.feed_loop(tx).await;
        });

        (rx, FeedHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// The main polling loop.
    ///
    /// Performs an immediate poll on startup (the initial snapshot), then
    /// repeats on `poll_interval`. Exits when the receiver side of the
    /// channel is closed.
    async fn feed_loop(self, tx: mpsc::Sender<ChangeBatch>) {
        let mut last_snapshot: Vec<ExpenseRecord> = Vec::new();

        self.poll_and_send(&mut last_snapshot, &tx).await;

        let mut interval = time::interval(self.poll_interval);
        // Consume the first tick which fires immediately; we already polled.
        interval.tick().await;

        loop {
            interval.tick().await;

            if tx.is_closed() {
                tracing::debug!("feed channel closed; exiting loop");
                break;
            }

            self.poll_and_send(&mut last_snapshot, &tx).await;
        }
    }

    /// Take a snapshot, diff it against the last one, and send the batch.
    ///
    /// On snapshot failure the previous snapshot is kept so a transient read
    /// error never shows up as a wave of `Removed` events.
    async fn poll_and_send(&self, last: &mut Vec<ExpenseRecord>, tx: &mpsc::Sender<ChangeBatch>) {
        let snapshot = match self.store.snapshot() {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "collection snapshot failed; keeping previous state");
                return;
            }
        };

        let events = diff_snapshots(last, &snapshot);
        if events.is_empty() {
            return;
        }

        tracing::debug!(events = events.len(), "sending change batch");
        *last = snapshot;

        if let Err(e) = tx.send(ChangeBatch::new(events)).await {
            tracing::warn!(error = %e, "failed to send change batch; receiver dropped");
        }
    }
}

// ── FeedHandle ────────────────────────────────────────────────────────────────

/// A handle to the background feed task.
///
/// Drop or call [`FeedHandle::abort`] to stop the loop.
pub struct FeedHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl FeedHandle {
    /// Immediately abort the feed loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::models::ChangeKind;

    fn open_store(tmp: &tempfile::TempDir) -> ExpenseStore {
        ExpenseStore::open(tmp.path().join("expenses")).expect("open store")
    }

    #[test]
    fn test_orchestrator_creation() {
        let dir = tempfile::TempDir::new().unwrap();
        let orch = FeedOrchestrator::new(5, open_store(&dir));
        assert_eq!(orch.poll_interval, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_start_and_abort() {
        let dir = tempfile::TempDir::new().unwrap();
        let orch = FeedOrchestrator::new(60, open_store(&dir));
        let (_rx, handle) = orch.start();

        // Give the task a moment to start, then abort it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
    }

    #[tokio::test]
    async fn test_initial_snapshot_arrives_as_added_batch() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);
        store.insert("Food", 10.0).unwrap();
        store.insert("Rent", 30.0).unwrap();

        let orch = FeedOrchestrator::new(60, store);
        let (mut rx, handle) = orch.start();

        let batch = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for batch")
            .expect("channel closed before first batch");

        assert_eq!(batch.len(), 2);
        assert!(batch.events.iter().all(|e| e.kind == ChangeKind::Added));
        // Feed order: cost ascending.
        assert_eq!(batch.events[0].record.name, "Food");
        assert_eq!(batch.events[1].record.name, "Rent");

        handle.abort();
    }

    #[tokio::test]
    async fn test_empty_collection_sends_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let orch = FeedOrchestrator::new(60, open_store(&dir));
        let (mut rx, handle) = orch.start();

        // No records and no changes: nothing should arrive.
        let got = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
        assert!(got.is_err(), "expected no batch for an empty collection");

        handle.abort();
    }

    #[tokio::test]
    async fn test_subsequent_change_is_delivered() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = open_store(&dir);
        store.insert("Food", 10.0).unwrap();

        // Poll every second so the follow-up change lands quickly.
        let orch = FeedOrchestrator::new(1, store.clone());
        let (mut rx, handle) = orch.start();

        // Initial snapshot.
        let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out")
            .expect("closed");
        assert_eq!(first.len(), 1);

        // Mutate the collection; the next poll should pick it up.
        let rec = store.insert("Rent", 30.0).unwrap();

        let second = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for follow-up batch")
            .expect("closed");
        assert_eq!(second.len(), 1);
        assert_eq!(second.events[0].kind, ChangeKind::Added);
        assert_eq!(second.events[0].record.id, rec.id);

        handle.abort();
    }
}
