use serde::{Deserialize, Serialize};

use crate::*;

/// Round clock, only advanced while a round is being played.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundClock {
    /// Time-attack, expires when it reaches zero.
    CountDown { remaining: Seconds },
    /// Relaxed and two-player, never expires.
    CountUp { elapsed: Seconds },
}

impl RoundClock {
    pub const fn for_mode(mode: GameMode, limit: Seconds) -> Self {
        match mode {
            GameMode::TimeAttack => Self::CountDown { remaining: limit },
            GameMode::Relaxed | GameMode::TwoPlayer => Self::CountUp { elapsed: 0 },
        }
    }

    /// Seconds to display: remaining for count-down, elapsed for count-up.
    pub const fn seconds(self) -> Seconds {
        match self {
            Self::CountDown { remaining } => remaining,
            Self::CountUp { elapsed } => elapsed,
        }
    }

    pub const fn is_countdown(self) -> bool {
        matches!(self, Self::CountDown { .. })
    }

    pub const fn is_expired(self) -> bool {
        matches!(self, Self::CountDown { remaining: 0 })
    }

    /// Moves the clock one second, an expired clock stays at zero.
    pub fn advance(&mut self) {
        match self {
            Self::CountDown { remaining } => *remaining = remaining.saturating_sub(1),
            Self::CountUp { elapsed } => *elapsed = elapsed.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_attack_counts_down_to_expiry() {
        let mut clock = RoundClock::for_mode(GameMode::TimeAttack, 2);

        clock.advance();
        assert_eq!(clock.seconds(), 1);
        assert!(!clock.is_expired());

        clock.advance();
        assert!(clock.is_expired());

        clock.advance();
        assert_eq!(clock.seconds(), 0);
    }

    #[test]
    fn other_modes_count_up_and_never_expire() {
        for mode in [GameMode::Relaxed, GameMode::TwoPlayer] {
            let mut clock = RoundClock::for_mode(mode, 60);
            for _ in 0..90 {
                clock.advance();
            }
            assert_eq!(clock, RoundClock::CountUp { elapsed: 90 });
            assert!(!clock.is_expired());
        }
    }
}
