use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// Solo modes, or a round that is not decided yet.
    None,
    Player(Player),
    Tie,
}

impl Default for Winner {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub cleared: bool,
    pub timed_out: bool,
    pub winner: Winner,
}

impl RoundOutcome {
    /// Whether the round has to end with this outcome.
    pub const fn is_final(self) -> bool {
        self.cleared || self.timed_out
    }
}

/// Win/lose/tie rules shared by the click and the timer paths.
///
/// A round is cleared once every configured pair is matched. A time-attack round times out when its clock hits zero
/// before that. In two-player mode a cleared round is won by the higher score, equal scores tie.
pub fn evaluate(round: &Round) -> RoundOutcome {
    let cleared = round.matched_pairs() >= round.pair_count();
    let timed_out = !cleared && round.mode().is_time_attack() && round.clock().is_expired();

    let winner = if cleared && round.mode().is_two_player() {
        let scores = round.scores();
        match scores.one.cmp(&scores.two) {
            Ordering::Greater => Winner::Player(Player::One),
            Ordering::Less => Winner::Player(Player::Two),
            Ordering::Equal => Winner::Tie,
        }
    } else {
        Winner::None
    };

    RoundOutcome {
        cleared,
        timed_out,
        winner,
    }
}
