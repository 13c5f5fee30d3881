//! Append-only progress history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RepairId, RepairStatus};

/// Note recorded on the entry created together with a repair.
pub const INTAKE_NOTE: &str = "Device received for repair";

/// Note used when a status change arrives without one.
#[must_use]
pub fn default_status_note(status: RepairStatus) -> String {
    format!("Status updated to {status}")
}

/// One immutable record of a status a repair passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub id: i64,
    pub repair_id: RepairId,
    pub status: RepairStatus,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Sort entries into timeline order: by timestamp, then insertion order.
pub fn order_history(entries: &mut [ProgressEntry]) {
    entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn entry(id: i64, status: RepairStatus, second: u32) -> ProgressEntry {
        ProgressEntry {
            id,
            repair_id: RepairId::new(1),
            status,
            notes: None,
            timestamp: Utc
                .with_ymd_and_hms(2026, 3, 1, 9, 0, second)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn equal_timestamps_fall_back_to_insertion_order() {
        let mut entries = vec![
            entry(3, RepairStatus::Testing, 5),
            entry(2, RepairStatus::Diagnosed, 0),
            entry(1, RepairStatus::Received, 0),
        ];
        order_history(&mut entries);
        let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[rstest]
    fn default_note_names_canonical_status() {
        assert_eq!(
            default_status_note(RepairStatus::Repairing),
            "Status updated to repairing"
        );
    }
}
