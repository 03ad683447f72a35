use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Seconds shown before the board is dealt, followed by one extra second for the start marker.
pub const COUNTDOWN_SECS: u8 = 3;

/// Interval between tick events.
pub const TICK_MS: u32 = 1_000;

/// Delay between the second flip of a selection and its resolution.
pub const RESOLVE_DELAY_MS: u32 = 1_000;

/// Valid transitions:
/// - Countdown(n) -> Countdown(n - 1)
/// - Countdown(0) -> Playing
/// - Playing -> Resolving
/// - Resolving -> Playing
/// - Resolving -> Complete
/// - Playing -> Complete (time-attack expiry)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Pre-game countdown, `Countdown(0)` shows the start marker.
    Countdown(u8),
    Playing,
    /// Two cards are face up and waiting for their resolve token.
    Resolving,
    Complete(RoundOutcome),
}

impl RoundPhase {
    pub const fn is_countdown(self) -> bool {
        matches!(self, Self::Countdown(_))
    }

    /// Whether the clock runs and cards take part in play.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Playing | Self::Resolving)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Countdown(COUNTDOWN_SECS)
    }
}

/// Identifies one scheduled resolution of one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolveToken {
    generation: u64,
    sequence: u32,
}

/// One playthrough from countdown to completion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    difficulty: Difficulty,
    mode: GameMode,
    pool: ImagePool,
    seed: u64,
    generation: u64,
    phase: RoundPhase,
    cards: Vec<Card>,
    flipped: SmallVec<[CardIndex; 2]>,
    move_count: u32,
    matches: MatchLog,
    active_player: Player,
    clock: RoundClock,
    resolve_sequence: u32,
    pending: Option<ResolveToken>,
}

impl Round {
    /// Creates a round in its initial countdown, the deck is only dealt once play starts.
    ///
    /// `generation` must differ between rounds that could outlive each other's timers.
    pub fn new(config: &RoundConfig, generation: u64, seed: u64) -> Result<Self> {
        let difficulty = config.difficulty;
        if difficulty.pair_count == 0 {
            return Err(GameError::NoPairs);
        }
        let pool = config.image_pool()?;

        Ok(Self {
            difficulty,
            mode: config.mode,
            pool,
            seed,
            generation,
            phase: RoundPhase::default(),
            cards: Vec::new(),
            flipped: SmallVec::new(),
            move_count: 0,
            matches: MatchLog::for_mode(config.mode),
            active_player: Player::default(),
            clock: RoundClock::for_mode(config.mode, difficulty.round_time_secs),
            resolve_sequence: 0,
            pending: None,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// Remaining countdown seconds, `Some(0)` while the start marker shows.
    pub fn countdown(&self) -> Option<u8> {
        match self.phase {
            RoundPhase::Countdown(secs) => Some(secs),
            _ => None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn pair_count(&self) -> PairCount {
        self.difficulty.pair_count
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Indices that are face up but not resolved yet, at most two.
    pub fn flipped(&self) -> &[CardIndex] {
        &self.flipped
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn matches(&self) -> &MatchLog {
        &self.matches
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.matches.total()
    }

    /// Whose turn it is, only in two-player mode.
    pub fn active_player(&self) -> Option<Player> {
        self.mode.is_two_player().then_some(self.active_player)
    }

    pub fn scores(&self) -> Scores {
        self.matches.scores()
    }

    pub fn clock(&self) -> RoundClock {
        self.clock
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            RoundPhase::Complete(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Handles one "1 second elapsed" event.
    pub fn tick(&mut self) -> TickOutcome {
        use RoundPhase::*;

        match self.phase {
            Countdown(secs) if secs > 0 => {
                self.phase = Countdown(secs - 1);
                TickOutcome::Countdown(secs - 1)
            }
            Countdown(_) => {
                self.start();
                TickOutcome::Started
            }
            Playing | Resolving => {
                self.clock.advance();
                match self.check_outcome() {
                    Some(outcome) => TickOutcome::Completed(outcome),
                    None => TickOutcome::ClockAdvanced,
                }
            }
            Complete(_) => TickOutcome::NoChange,
        }
    }

    /// Turns a card face up.
    ///
    /// Clicks on matched cards, on a card already in the selection, or while a selection waits for resolution are
    /// absorbed without changes.
    pub fn flip(&mut self, index: CardIndex) -> Result<FlipOutcome> {
        self.check_active()?;
        let index = self.validate_index(index)?;

        if self.flipped.len() >= 2 {
            return Ok(FlipOutcome::NoChange);
        }
        if self.cards[index].is_matched || self.flipped.contains(&index) {
            return Ok(FlipOutcome::NoChange);
        }

        self.cards[index].is_flipped = true;
        self.flipped.push(index);
        log::debug!("flip card {} ({} face up)", index, self.flipped.len());

        if self.flipped.len() < 2 {
            return Ok(FlipOutcome::Flipped);
        }

        self.resolve_sequence = self.resolve_sequence.wrapping_add(1);
        let token = ResolveToken {
            generation: self.generation,
            sequence: self.resolve_sequence,
        };
        self.pending = Some(token);
        self.phase = RoundPhase::Resolving;
        Ok(FlipOutcome::ResolutionScheduled(token))
    }

    /// Compares the two face-up cards of the pending selection.
    pub fn resolve(&mut self, token: ResolveToken) -> ResolveOutcome {
        if self.pending != Some(token) || !matches!(self.phase, RoundPhase::Resolving) {
            log::debug!("ignoring stale resolve token {:?}", token);
            return ResolveOutcome::Ignored;
        }
        let &[first, second] = self.flipped.as_slice() else {
            log::warn!("resolving with {} cards face up", self.flipped.len());
            return ResolveOutcome::Ignored;
        };

        self.pending = None;
        self.flipped.clear();
        self.move_count = self.move_count.saturating_add(1);

        let matched = self.cards[first].pairs_with(&self.cards[second]);
        if matched {
            self.cards[first].is_matched = true;
            self.cards[second].is_matched = true;
            let image = self.cards[first].image.clone();
            self.matches.record(self.active_player, image);
            log::debug!("match {} and {}", first, second);
        } else {
            self.cards[first].is_flipped = false;
            self.cards[second].is_flipped = false;
            if self.mode.is_two_player() {
                self.active_player = self.active_player.other();
            }
            log::debug!("mismatch {} and {}", first, second);
        }
        self.phase = RoundPhase::Playing;

        match self.check_outcome() {
            Some(outcome) => ResolveOutcome::Completed(outcome),
            None if matched => ResolveOutcome::Matched,
            None => ResolveOutcome::Mismatched,
        }
    }

    /// Drops the pending resolution so a late delivery of its token is ignored, used when the round is torn down.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    fn start(&mut self) {
        let generator = ShuffledDeckGenerator::new(self.seed);
        self.cards = generator.generate(self.difficulty.pair_count, &self.pool);
        self.phase = RoundPhase::Playing;
        log::info!(
            "round {} started: {} cards, mode {}",
            self.generation,
            self.cards.len(),
            self.mode.name()
        );
    }

    fn check_outcome(&mut self) -> Option<RoundOutcome> {
        let outcome = outcome::evaluate(self);
        if !outcome.is_final() {
            return None;
        }
        self.phase = RoundPhase::Complete(outcome);
        self.pending = None;
        log::info!("round {} complete: {:?}", self.generation, outcome);
        Some(outcome)
    }

    fn check_active(&self) -> Result<()> {
        match self.phase {
            RoundPhase::Countdown(_) => Err(GameError::NotStarted),
            RoundPhase::Playing | RoundPhase::Resolving => Ok(()),
            RoundPhase::Complete(_) => Err(GameError::AlreadyEnded),
        }
    }

    fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if index < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidCard)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    fn config(mode: GameMode, difficulty: Difficulty) -> RoundConfig {
        let defaults = (0..40)
            .map(|i| ImageRef::new(format!("default-{i}")))
            .collect();
        RoundConfig::new(Vec::new(), difficulty, mode).with_default_images(defaults)
    }

    fn started(mode: GameMode) -> Round {
        let mut round = Round::new(&config(mode, Difficulty::easy()), 1, 9).unwrap();
        while round.phase().is_countdown() {
            round.tick();
        }
        round
    }

    fn find_pair(round: &Round) -> (CardIndex, CardIndex) {
        let cards = round.cards();
        for (i, card) in cards.iter().enumerate().filter(|(_, card)| !card.is_matched) {
            if let Some(j) = (i + 1..cards.len()).find(|&j| cards[j].pairs_with(card)) {
                return (i, j);
            }
        }
        panic!("no unmatched pair left");
    }

    fn find_mismatch(round: &Round) -> (CardIndex, CardIndex) {
        let cards = round.cards();
        let first = cards.iter().position(|card| !card.is_matched).unwrap();
        let second = (0..cards.len())
            .find(|&j| !cards[j].is_matched && !cards[j].pairs_with(&cards[first]))
            .unwrap();
        (first, second)
    }

    fn select(round: &mut Round, (a, b): (CardIndex, CardIndex)) -> ResolveOutcome {
        assert_eq!(round.flip(a).unwrap(), FlipOutcome::Flipped);
        let FlipOutcome::ResolutionScheduled(token) = round.flip(b).unwrap() else {
            panic!("second flip must schedule a resolution");
        };
        round.resolve(token)
    }

    #[test]
    fn countdown_runs_three_seconds_plus_start_marker() {
        let mut round = Round::new(&config(GameMode::Relaxed, Difficulty::easy()), 1, 9).unwrap();

        assert_eq!(round.countdown(), Some(3));
        assert_eq!(round.tick(), TickOutcome::Countdown(2));
        assert_eq!(round.tick(), TickOutcome::Countdown(1));
        assert_eq!(round.tick(), TickOutcome::Countdown(0));
        assert!(round.cards().is_empty());
        assert_eq!(round.tick(), TickOutcome::Started);
        assert_eq!(round.phase(), RoundPhase::Playing);
        assert_eq!(round.cards().len(), 16);
        assert_eq!(round.clock(), RoundClock::CountUp { elapsed: 0 });
    }

    #[test]
    fn clicks_during_countdown_are_rejected() {
        let mut round = Round::new(&config(GameMode::Relaxed, Difficulty::easy()), 1, 9).unwrap();

        assert_eq!(round.flip(0), Err(GameError::NotStarted));
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let mut no_pairs = config(GameMode::Relaxed, Difficulty::easy());
        no_pairs.difficulty.pair_count = 0;
        assert_eq!(Round::new(&no_pairs, 1, 0), Err(GameError::NoPairs));

        let empty = RoundConfig::default();
        assert_eq!(Round::new(&empty, 1, 0), Err(GameError::EmptyImagePool));
    }

    #[test]
    fn out_of_range_click_is_an_error() {
        let mut round = started(GameMode::Relaxed);

        assert_eq!(round.flip(16), Err(GameError::InvalidCard));
    }

    #[test]
    fn third_click_while_resolving_is_absorbed() {
        let mut round = started(GameMode::Relaxed);
        let (a, b) = find_mismatch(&round);
        let c = (0..16).find(|&i| i != a && i != b).unwrap();

        round.flip(a).unwrap();
        round.flip(b).unwrap();

        assert_eq!(round.phase(), RoundPhase::Resolving);
        assert_eq!(round.flip(c).unwrap(), FlipOutcome::NoChange);
        assert!(!round.cards()[c].is_flipped);
        assert_eq!(round.flipped(), &[a, b]);
    }

    #[test]
    fn clicking_the_same_card_twice_is_absorbed() {
        let mut round = started(GameMode::Relaxed);

        assert_eq!(round.flip(3).unwrap(), FlipOutcome::Flipped);
        let before = round.clone();
        assert_eq!(round.flip(3).unwrap(), FlipOutcome::NoChange);
        assert_eq!(round, before);
    }

    #[test]
    fn match_keeps_cards_face_up_and_counts_a_move() {
        let mut round = started(GameMode::Relaxed);
        let (a, b) = find_pair(&round);

        assert_eq!(select(&mut round, (a, b)), ResolveOutcome::Matched);

        assert!(round.cards()[a].is_matched && round.cards()[a].is_flipped);
        assert!(round.cards()[b].is_matched && round.cards()[b].is_flipped);
        assert_eq!(round.move_count(), 1);
        assert_eq!(round.matched_pairs(), 1);
        assert!(round.flipped().is_empty());

        let before = round.clone();
        assert_eq!(round.flip(a).unwrap(), FlipOutcome::NoChange);
        assert_eq!(round, before);
    }

    #[test]
    fn mismatch_turns_cards_back_and_passes_the_turn() {
        let mut round = started(GameMode::TwoPlayer);
        let (a, b) = find_mismatch(&round);

        assert_eq!(round.active_player(), Some(Player::One));
        assert_eq!(select(&mut round, (a, b)), ResolveOutcome::Mismatched);

        assert!(!round.cards()[a].is_face_up());
        assert!(!round.cards()[b].is_face_up());
        assert_eq!(round.move_count(), 1);
        assert_eq!(round.active_player(), Some(Player::Two));
    }

    #[test]
    fn match_keeps_the_turn_and_scores() {
        let mut round = started(GameMode::TwoPlayer);
        let (a, b) = find_mismatch(&round);
        select(&mut round, (a, b));

        let pair = find_pair(&round);
        assert_eq!(select(&mut round, pair), ResolveOutcome::Matched);

        assert_eq!(round.active_player(), Some(Player::Two));
        assert_eq!(round.scores(), Scores { one: 0, two: 1 });
    }

    #[test]
    fn solo_modes_have_no_active_player() {
        assert_eq!(started(GameMode::Relaxed).active_player(), None);
        assert_eq!(started(GameMode::TimeAttack).active_player(), None);
    }

    #[test]
    fn stale_and_repeated_tokens_are_ignored() {
        let mut round = started(GameMode::Relaxed);
        let (a, b) = find_pair(&round);
        round.flip(a).unwrap();
        let FlipOutcome::ResolutionScheduled(token) = round.flip(b).unwrap() else {
            panic!("second flip must schedule a resolution");
        };

        let mut other = Round::new(&config(GameMode::Relaxed, Difficulty::easy()), 2, 9).unwrap();
        while other.phase().is_countdown() {
            other.tick();
        }
        assert_eq!(other.resolve(token), ResolveOutcome::Ignored);

        assert_eq!(round.resolve(token), ResolveOutcome::Matched);
        assert_eq!(round.resolve(token), ResolveOutcome::Ignored);
        assert_eq!(round.move_count(), 1);
    }

    #[test]
    fn cancelled_resolution_is_never_applied() {
        let mut round = started(GameMode::Relaxed);
        let (a, b) = find_pair(&round);
        round.flip(a).unwrap();
        let FlipOutcome::ResolutionScheduled(token) = round.flip(b).unwrap() else {
            panic!("second flip must schedule a resolution");
        };

        assert!(round.cancel_pending());
        assert_eq!(round.resolve(token), ResolveOutcome::Ignored);
        assert_eq!(round.matched_pairs(), 0);
        assert_eq!(round.move_count(), 0);
    }

    #[test]
    fn clearing_the_board_completes_a_solo_round() {
        let mut round = started(GameMode::Relaxed);

        for _ in 0..7 {
            let pair = find_pair(&round);
            assert_eq!(select(&mut round, pair), ResolveOutcome::Matched);
        }
        let pair = find_pair(&round);
        let outcome = select(&mut round, pair);

        let expected = RoundOutcome {
            cleared: true,
            timed_out: false,
            winner: Winner::None,
        };
        assert_eq!(outcome, ResolveOutcome::Completed(expected));
        assert_eq!(round.outcome(), Some(expected));
        assert_eq!(round.move_count(), 8);
        assert_eq!(round.tick(), TickOutcome::NoChange);
        assert_eq!(round.flip(0), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn time_attack_expires_mid_resolution() {
        let difficulty = Difficulty::new(4, 4, 4, 8, 2);
        let mut round = Round::new(&config(GameMode::TimeAttack, difficulty), 1, 9).unwrap();
        while round.phase().is_countdown() {
            round.tick();
        }
        let (a, b) = find_pair(&round);
        round.flip(a).unwrap();
        let FlipOutcome::ResolutionScheduled(token) = round.flip(b).unwrap() else {
            panic!("second flip must schedule a resolution");
        };

        assert_eq!(round.tick(), TickOutcome::ClockAdvanced);
        let TickOutcome::Completed(outcome) = round.tick() else {
            panic!("clock should have expired");
        };

        assert!(outcome.timed_out);
        assert!(!outcome.cleared);
        assert_eq!(round.resolve(token), ResolveOutcome::Ignored);
        assert_eq!(round.move_count(), 0);
    }

    #[test]
    fn relaxed_clock_counts_up_while_playing() {
        let mut round = started(GameMode::Relaxed);

        for _ in 0..125 {
            assert_eq!(round.tick(), TickOutcome::ClockAdvanced);
        }

        assert_eq!(round.clock().seconds(), 125);
        assert!(!round.is_finished());
    }
}
