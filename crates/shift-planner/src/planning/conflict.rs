use chrono::NaiveDate;

use super::domain::ShiftEntry;
use super::slot::Slot;

/// Reason a candidate shift cannot be added to a worker's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ConflictKind {
    #[error("worker already has a shift on that date")]
    SameDay,
    #[error("worker has a shift on the previous day from 16 to 24")]
    PreviousDayConsecutive,
    #[error("worker has a shift on the next day from 0 to 8")]
    NextDayConsecutive,
}

impl ConflictKind {
    /// Kind reported when the two shifts involved are inserted in the opposite order.
    pub fn mirrored(self) -> Self {
        match self {
            ConflictKind::SameDay => ConflictKind::SameDay,
            ConflictKind::PreviousDayConsecutive => ConflictKind::NextDayConsecutive,
            ConflictKind::NextDayConsecutive => ConflictKind::PreviousDayConsecutive,
        }
    }
}

/// Decide whether `candidate` fits next to a worker's `existing` shifts.
///
/// Rules are checked pairwise against each existing entry; the first entry that
/// conflicts determines the reported kind. A worker keeps at most one shift per date and
/// never works a `FourToMidnight` shift directly followed by a `MidnightToEight` shift on
/// the next date.
pub fn validate<'a, I>(existing: I, candidate: &ShiftEntry) -> Result<(), ConflictKind>
where
    I: IntoIterator<Item = &'a ShiftEntry>,
{
    let previous_day = candidate.date.pred_opt();
    let next_day = candidate.date.succ_opt();

    for entry in existing {
        if let Some(kind) = conflict_between(entry, candidate, previous_day, next_day) {
            return Err(kind);
        }
    }

    Ok(())
}

fn conflict_between(
    existing: &ShiftEntry,
    candidate: &ShiftEntry,
    previous_day: Option<NaiveDate>,
    next_day: Option<NaiveDate>,
) -> Option<ConflictKind> {
    if existing.date == candidate.date {
        return Some(ConflictKind::SameDay);
    }

    if Some(existing.date) == previous_day
        && existing.slot == Slot::FourToMidnight
        && candidate.slot == Slot::MidnightToEight
    {
        return Some(ConflictKind::PreviousDayConsecutive);
    }

    if Some(existing.date) == next_day
        && existing.slot == Slot::MidnightToEight
        && candidate.slot == Slot::FourToMidnight
    {
        return Some(ConflictKind::NextDayConsecutive);
    }

    None
}
