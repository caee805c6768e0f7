use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single expense record as stored in the collection.
///
/// Records are identified by a stable, store-assigned `id`; the `name` is the
/// category label driving color assignment and the legend, and `cost` drives
/// the slice's angular span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Stable identifier assigned by the store.
    pub id: String,
    /// Category label (e.g. "Food", "Rent").
    pub name: String,
    /// Nonnegative expense amount in dollars.
    pub cost: f64,
    /// When the record was created. Display metadata only; never affects
    /// chart geometry.
    #[serde(default = "default_created_at")]
    pub created_at: DateTime<Utc>,
}

fn default_created_at() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl ExpenseRecord {
    /// Construct a record created now.
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            created_at: Utc::now(),
        }
    }
}

/// The three change-feed notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// A record joined the collection.
    Added,
    /// An existing record's fields changed.
    Modified,
    /// A record left the collection.
    Removed,
}

/// One incremental change notification from the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// What happened to the record.
    pub kind: ChangeKind,
    /// The record after the change (for `Removed`, its last known state).
    pub record: ExpenseRecord,
}

impl ChangeEvent {
    pub fn added(record: ExpenseRecord) -> Self {
        Self {
            kind: ChangeKind::Added,
            record,
        }
    }

    pub fn modified(record: ExpenseRecord) -> Self {
        Self {
            kind: ChangeKind::Modified,
            record,
        }
    }

    pub fn removed(record: ExpenseRecord) -> Self {
        Self {
            kind: ChangeKind::Removed,
            record,
        }
    }
}

/// An ordered group of change events delivered in one feed notification.
///
/// The feed delivers batches serially; all list mutation for a batch happens
/// before the next redraw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeBatch {
    pub events: Vec<ChangeEvent>,
}

impl ChangeBatch {
    pub fn new(events: Vec<ChangeEvent>) -> Self {
        Self { events }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_record_new() {
        let rec = ExpenseRecord::new("a1", "Food", 12.5);
        assert_eq!(rec.id, "a1");
        assert_eq!(rec.name, "Food");
        assert!((rec.cost - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_change_kind_serde_lowercase() {
        // The feed wire format uses the lowercase kind strings.
        assert_eq!(
            serde_json::to_string(&ChangeKind::Added).unwrap(),
            r#""added""#
        );
        assert_eq!(
            serde_json::to_string(&ChangeKind::Modified).unwrap(),
            r#""modified""#
        );
        assert_eq!(
            serde_json::to_string(&ChangeKind::Removed).unwrap(),
            r#""removed""#
        );
        let back: ChangeKind = serde_json::from_str(r#""modified""#).unwrap();
        assert_eq!(back, ChangeKind::Modified);
    }

    #[test]
    fn test_change_event_constructors() {
        let rec = ExpenseRecord::new("a1", "Food", 10.0);
        assert_eq!(ChangeEvent::added(rec.clone()).kind, ChangeKind::Added);
        assert_eq!(
            ChangeEvent::modified(rec.clone()).kind,
            ChangeKind::Modified
        );
        assert_eq!(ChangeEvent::removed(rec).kind, ChangeKind::Removed);
    }

    #[test]
    fn test_change_batch_len_and_empty() {
        let batch = ChangeBatch::default();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);

        let rec = ExpenseRecord::new("a1", "Food", 10.0);
        let batch = ChangeBatch::new(vec![ChangeEvent::added(rec)]);
        assert!(!batch.is_empty());
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_expense_record_roundtrip() {
        let rec = ExpenseRecord::new("a1", "Rent", 850.0);
        let json = serde_json::to_string(&rec).unwrap();
        let back: ExpenseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn test_expense_record_missing_created_at_defaults() {
        // Documents written before the timestamp field existed still parse.
        let json = r#"{"id":"a1","name":"Food","cost":10.0}"#;
        let rec: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }
}
