#![no_std]

extern crate alloc;

pub use card::*;
pub use clock::*;
pub use config::*;
pub use deck::*;
pub use error::*;
pub use matches::*;
pub use outcome::*;
pub use round::*;
pub use tray::*;
pub use types::*;

mod card;
mod clock;
mod config;
mod deck;
mod error;
mod matches;
mod outcome;
mod round;
mod tray;
mod types;

/// Result of clicking a card.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Flipped,
    /// Second card of a selection went face up, the caller has to deliver the token back after
    /// [`RESOLVE_DELAY_MS`].
    ResolutionScheduled(ResolveToken),
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Result of one "1 second elapsed" event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    Countdown(u8),
    Started,
    ClockAdvanced,
    Completed(RoundOutcome),
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Result of delivering a resolve token.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResolveOutcome {
    /// Token was stale or already consumed, nothing changed.
    Ignored,
    Matched,
    Mismatched,
    Completed(RoundOutcome),
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
