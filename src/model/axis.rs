use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-spatial axes of a plane series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    Z,
    Channel,
    Time,
}

impl AxisKind {
    pub const ALL: [AxisKind; 3] = [AxisKind::Z, AxisKind::Channel, AxisKind::Time];

    pub fn letter(self) -> char {
        match self {
            AxisKind::Z => 'Z',
            AxisKind::Channel => 'C',
            AxisKind::Time => 'T',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'Z' => Some(AxisKind::Z),
            'C' => Some(AxisKind::Channel),
            'T' => Some(AxisKind::Time),
            _ => None,
        }
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.letter())
    }
}
