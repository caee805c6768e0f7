//! Document-per-file expense collection.
//!
//! Each record lives in `<collection>/<id>.json`. The record id is the file
//! stem; the document body carries the remaining fields. Snapshots are sorted
//! by cost ascending (id as tie-break), which is the order the feed
//! subscription delivers.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use chart_core::error::{ChartError, Result};
use chart_core::models::ExpenseRecord;

/// On-disk document body. The id is not stored in the body; it is the
/// document's file name.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExpenseDoc {
    name: String,
    cost: f64,
    #[serde(default = "epoch")]
    created_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// A directory-backed expense collection.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    root: PathBuf,
}

impl ExpenseStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The collection directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read every document in the collection, sorted by cost ascending with
    /// the id as tie-break.
    ///
    /// Unreadable or invalid documents (bad JSON, negative cost) are skipped
    /// with a warning rather than failing the snapshot; a single corrupt file
    /// must not blank the chart.
    pub fn snapshot(&self) -> Result<Vec<ExpenseRecord>> {
        if !self.root.exists() {
            return Err(ChartError::DataPathNotFound(self.root.clone()));
        }

        let mut records: Vec<ExpenseRecord> = Vec::new();

        for entry in walkdir::WalkDir::new(&self.root)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().map(|ext| ext != "json").unwrap_or(true)
            {
                continue;
            }

            match self.read_doc(path) {
                Ok(record) => records.push(record),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping bad document"),
            }
        }

        records.sort_by(|a, b| {
            a.cost
                .partial_cmp(&b.cost)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!(count = records.len(), "collection snapshot");
        Ok(records)
    }

    /// Insert a new record, returning it with its assigned id.
    pub fn insert(&self, name: &str, cost: f64) -> Result<ExpenseRecord> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(ChartError::InvalidCost {
                name: name.to_string(),
                cost,
            });
        }

        let id = self.next_id();
        let record = ExpenseRecord::new(id, name, cost);
        self.write_doc(&record)?;
        debug!(id = %record.id, name = %record.name, cost = record.cost, "record inserted");
        Ok(record)
    }

    /// Delete the record with the given id.
    ///
    /// A missing document is an error so that the fire-and-forget delete path
    /// has a rejection to log.
    pub fn delete(&self, id: &str) -> Result<()> {
        let path = self.doc_path(id);
        if !path.exists() {
            return Err(ChartError::RemoteWriteFailed {
                id: id.to_string(),
                reason: "no such document".to_string(),
            });
        }
        std::fs::remove_file(&path).map_err(|e| ChartError::RemoteWriteFailed {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        debug!(id, "record deleted");
        Ok(())
    }

    /// Whether a document with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.doc_path(id).exists()
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    fn doc_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    fn read_doc(&self, path: &Path) -> Result<ExpenseRecord> {
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ChartError::Config(format!("bad document name: {}", path.display())))?
            .to_string();

        let content = std::fs::read_to_string(path).map_err(|e| ChartError::StoreRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let doc: ExpenseDoc = serde_json::from_str(&content)?;

        if !doc.cost.is_finite() || doc.cost < 0.0 {
            return Err(ChartError::InvalidCost {
                name: doc.name,
                cost: doc.cost,
            });
        }

        Ok(ExpenseRecord {
            id,
            name: doc.name,
            cost: doc.cost,
            created_at: doc.created_at,
        })
    }

    /// Write a record's document atomically (temp file + rename).
    fn write_doc(&self, record: &ExpenseRecord) -> Result<()> {
        let doc = ExpenseDoc {
            name: record.name.clone(),
            cost: record.cost,
            created_at: record.created_at,
        };
        let json = serde_json::to_string_pretty(&doc)?;

        let path = self.doc_path(&record.id);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Generate a fresh document id from the creation timestamp, bumping a
    /// suffix on the (unlikely) collision within the same nanosecond.
    fn next_id(&self) -> String {
        let nanos = Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        let base = format!("{nanos:x}");
        if !self.contains(&base) {
            return base;
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
