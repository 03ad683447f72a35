use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Images matched so far, one list for solo modes or one per player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchLog {
    Solo(Vec<ImageRef>),
    Versus([Vec<ImageRef>; 2]),
}

impl MatchLog {
    pub fn for_mode(mode: GameMode) -> Self {
        if mode.is_two_player() {
            Self::Versus([Vec::new(), Vec::new()])
        } else {
            Self::Solo(Vec::new())
        }
    }

    /// Appends to the solo list, or to `player`'s list in versus mode.
    pub fn record(&mut self, player: Player, image: ImageRef) {
        match self {
            Self::Solo(images) => images.push(image),
            Self::Versus(lists) => lists[player.slot()].push(image),
        }
    }

    /// Matched pairs across every tracker.
    pub fn total(&self) -> PairCount {
        let total = match self {
            Self::Solo(images) => images.len(),
            Self::Versus([one, two]) => one.len() + two.len(),
        };
        total.try_into().unwrap_or(PairCount::MAX)
    }

    pub fn player(&self, player: Player) -> Option<&[ImageRef]> {
        match self {
            Self::Solo(_) => None,
            Self::Versus(lists) => Some(&lists[player.slot()]),
        }
    }

    pub fn scores(&self) -> Scores {
        let count = |player| {
            self.player(player)
                .map_or(0, |images| images.len().try_into().unwrap_or(PairCount::MAX))
        };
        Scores {
            one: count(Player::One),
            two: count(Player::Two),
        }
    }
}

/// Per-player pair counts, both zero outside two-player mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub one: PairCount,
    pub two: PairCount,
}

impl Scores {
    pub const fn of(self, player: Player) -> PairCount {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }
}
