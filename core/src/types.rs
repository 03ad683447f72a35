use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Grid side length, used for rows and columns.
pub type Side = u8;

/// Count type used for pair counts and match counts.
pub type PairCount = u16;

/// Whole seconds shown on the round clock.
pub type Seconds = u32;

/// Position of a card in the dealt deck.
pub type CardIndex = usize;

pub const fn mult(a: Side, b: Side) -> u16 {
    let a = a as u16;
    let b = b as u16;
    a.saturating_mul(b)
}

/// Opaque image reference, either an encoded user upload or a bundled default.
///
/// Only ever compared for identity, two cards match when their references are equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// 1-based number as shown to players.
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::One
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}
