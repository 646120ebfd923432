use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::slot::Slot;

/// Caller-assigned worker identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub i64);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned shift identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(pub i64);

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person who can be scheduled. Shifts reference workers, never the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub name: Option<String>,
}

impl Worker {
    pub fn new(id: WorkerId, name: Option<String>) -> Self {
        Self {
            id,
            name: name.filter(|value| !value.is_empty()),
        }
    }
}

/// A persisted assignment of one worker to one slot on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub worker_id: WorkerId,
    pub slot: Slot,
    pub date: NaiveDate,
}

impl Shift {
    pub fn entry(&self) -> ShiftEntry {
        ShiftEntry {
            date: self.date,
            slot: self.slot,
        }
    }
}

/// Request payload for a shift that has not been validated or stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShift {
    pub worker_id: WorkerId,
    pub slot: Slot,
    pub date: NaiveDate,
}

impl NewShift {
    pub fn entry(&self) -> ShiftEntry {
        ShiftEntry {
            date: self.date,
            slot: self.slot,
        }
    }
}

/// Date and slot projection of a shift; what the validator and listing endpoint work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftEntry {
    pub date: NaiveDate,
    pub slot: Slot,
}

impl ShiftEntry {
    pub fn new(date: NaiveDate, slot: Slot) -> Self {
        Self { date, slot }
    }
}

/// Offset/limit window over the worker listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|name| !name.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_worker_name_is_normalized_to_none() {
        let worker: Worker = serde_json::from_value(json!({ "id": 7, "name": "" })).unwrap();
        assert_eq!(worker.name, None);

        let worker: Worker = serde_json::from_value(json!({ "id": 7 })).unwrap();
        assert_eq!(worker.name, None);

        assert_eq!(Worker::new(WorkerId(7), Some(String::new())).name, None);
    }

    #[test]
    fn shift_payload_uses_iso_dates_and_slot_codes() {
        let shift: NewShift =
            serde_json::from_value(json!({ "worker_id": 1, "slot": 1, "date": "2020-10-10" }))
                .unwrap();
        assert_eq!(shift.slot, Slot::MidnightToEight);
        assert_eq!(shift.date, NaiveDate::from_ymd_opt(2020, 10, 10).unwrap());

        let entry = serde_json::to_value(shift.entry()).unwrap();
        assert_eq!(entry, json!({ "date": "2020-10-10", "slot": 1 }));
    }

    #[test]
    fn shift_payload_rejects_unknown_slot() {
        let result = serde_json::from_value::<NewShift>(
            json!({ "worker_id": 1, "slot": 4, "date": "2020-10-10" }),
        );
        assert!(result.is_err());
    }
}
