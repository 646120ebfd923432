use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three fixed eight-hour periods of a calendar day.
///
/// The wire form is the integer code (`1`, `2`, `3`); any other code is rejected while
/// the payload is decoded, so the conflict validator only ever sees valid slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Slot {
    MidnightToEight,
    EightToFour,
    FourToMidnight,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::MidnightToEight, Slot::EightToFour, Slot::FourToMidnight];

    pub fn code(self) -> u8 {
        match self {
            Slot::MidnightToEight => 1,
            Slot::EightToFour => 2,
            Slot::FourToMidnight => 3,
        }
    }

    pub fn start_hour(self) -> u8 {
        match self {
            Slot::MidnightToEight => 0,
            Slot::EightToFour => 8,
            Slot::FourToMidnight => 16,
        }
    }

    pub fn end_hour(self) -> u8 {
        self.start_hour() + 8
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::MidnightToEight => "00:00-08:00",
            Slot::EightToFour => "08:00-16:00",
            Slot::FourToMidnight => "16:00-24:00",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("slot code must be 1, 2 or 3 (found {0})")]
pub struct InvalidSlot(pub u8);

impl TryFrom<u8> for Slot {
    type Error = InvalidSlot;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Slot::MidnightToEight),
            2 => Ok(Slot::EightToFour),
            3 => Ok(Slot::FourToMidnight),
            other => Err(InvalidSlot(other)),
        }
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.code()
    }
}
