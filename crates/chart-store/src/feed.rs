//! Snapshot diffing.
//!
//! Turns two successive collection snapshots into the ordered change events
//! the feed delivers: added and modified in next-snapshot order, removed in
//! prev-snapshot order. `Modified` is emitted only when the name or cost
//! actually changed; `created_at` is display metadata and does not count.

use std::collections::HashMap;

use chart_core::models::{ChangeEvent, ExpenseRecord};

/// Compute the change events that transform `prev` into `next`.
pub fn diff_snapshots(prev: &[ExpenseRecord], next: &[ExpenseRecord]) -> Vec<ChangeEvent> {
    let prev_by_id: HashMap<&str, &ExpenseRecord> =
        prev.iter().map(|r| (r.id.as_str(), r)).collect();
    let next_by_id: HashMap<&str, &ExpenseRecord> =
        next.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut events = Vec::new();

    for record in next {
        match prev_by_id.get(record.id.as_str()) {
            None => events.push(ChangeEvent::added(record.clone())),
            Some(old) if changed(old, record) => {
                events.push(ChangeEvent::modified(record.clone()))
            }
            Some(_) => {}
        }
    }

    for record in prev {
        if !next_by_id.contains_key(record.id.as_str()) {
            events.push(ChangeEvent::removed(record.clone()));
        }
    }

    events
}

/// Whether the chart-relevant fields differ.
fn changed(old: &ExpenseRecord, new: &ExpenseRecord) -> bool {
    old.name != new.name || old.cost != new.cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::models::ChangeKind;

    fn rec(id: &str, name: &str, cost: f64) -> ExpenseRecord {
        ExpenseRecord::new(id, name, cost)
    }

    #[test]
    fn test_identical_snapshots_produce_no_events() {
        let snap = vec![rec("a", "Food", 10.0), rec("b", "Rent", 30.0)];
        assert!(diff_snapshots(&snap, &snap).is_empty());
    }

    #[test]
    fn test_initial_snapshot_is_all_added() {
        let next = vec![rec("a", "Food", 10.0), rec("b", "Rent", 30.0)];
        let events = diff_snapshots(&[], &next);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.kind == ChangeKind::Added));
        // Added events follow next-snapshot (feed) order.
        assert_eq!(events[0].record.id, "a");
        assert_eq!(events[1].record.id, "b");
    }

    #[test]
    fn test_cost_change_is_modified() {
        let prev = vec![rec("a", "Food", 10.0)];
        let next = vec![rec("a", "Food", 12.0)];
        let events = diff_snapshots(&prev, &next);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ChangeKind::Modified);
        assert!((events[0].record.cost - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_name_change_is_modified() {
        let prev = vec![rec("a", "Food", 10.0)];
        let next = vec![rec("a", "Groceries", 10.0)];
        let events = diff_snapshots(&prev, &next);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ChangeKind::Modified);
    }

    #[test]
    fn test_timestamp_change_alone_is_not_modified() {
        let mut old = rec("a", "Food", 10.0);
        old.created_at = chrono::DateTime::UNIX_EPOCH;
        let new = rec("a", "Food", 10.0);
        assert!(diff_snapshots(&[old], &[new]).is_empty());
    }

    #[test]
    fn test_removal() {
        let prev = vec![rec("a", "Food", 10.0), rec("b", "Rent", 30.0)];
        let next = vec![rec("b", "Rent", 30.0)];
        let events = diff_snapshots(&prev, &next);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ChangeKind::Removed);
        assert_eq!(events[0].record.id, "a");
    }

    #[test]
    fn test_mixed_batch_ordering() {
        let prev = vec![rec("a", "Food", 10.0), rec("b", "Rent", 30.0)];
        let next = vec![
            rec("c", "Gas", 5.0),
            rec("a", "Food", 15.0),
            rec("d", "Fun", 50.0),
        ];
        let events = diff_snapshots(&prev, &next);

        let kinds: Vec<ChangeKind> = events.iter().map(|e| e.kind).collect();
        let ids: Vec<&str> = events.iter().map(|e| e.record.id.as_str()).collect();
        // Added/modified in next order, then removed in prev order.
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Added,
                ChangeKind::Modified,
                ChangeKind::Added,
                ChangeKind::Removed
            ]
        );
        assert_eq!(ids, vec!["c", "a", "d", "b"]);
    }
}
