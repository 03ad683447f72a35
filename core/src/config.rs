use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Clock counts down, expiry ends the round.
    #[serde(rename = "timeAttack")]
    TimeAttack,
    /// Clock counts up, no time limit.
    #[default]
    #[serde(rename = "normal")]
    Relaxed,
    /// Two players take turns, a mismatch passes the turn.
    #[serde(rename = "twoPlayer")]
    TwoPlayer,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [Self::TimeAttack, Self::Relaxed, Self::TwoPlayer];

    pub const fn name(self) -> &'static str {
        match self {
            Self::TimeAttack => "timeAttack",
            Self::Relaxed => "normal",
            Self::TwoPlayer => "twoPlayer",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TimeAttack => "Time Attack",
            Self::Relaxed => "Relaxed",
            Self::TwoPlayer => "Two Players",
        }
    }

    pub const fn is_time_attack(self) -> bool {
        matches!(self, Self::TimeAttack)
    }

    pub const fn is_two_player(self) -> bool {
        matches!(self, Self::TwoPlayer)
    }
}

impl FromStr for GameMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownName)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyPreset {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub const ALL: [DifficultyPreset; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }

    pub const fn difficulty(self) -> Difficulty {
        match self {
            Self::Easy => Difficulty::easy(),
            Self::Normal => Difficulty::normal(),
            Self::Hard => Difficulty::hard(),
        }
    }

    /// How many of their own images a player may upload for this preset.
    pub const fn max_user_images(self) -> usize {
        match self {
            Self::Easy => 8,
            Self::Normal => 12,
            Self::Hard => 16,
        }
    }
}

impl FromStr for DifficultyPreset {
    type Err = UnknownName;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownName)
    }
}

/// Board shape and limits of a round, immutable once the round begins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub grid_size: Side,
    pub rows: Side,
    pub cols: Side,
    pub pair_count: PairCount,
    /// Only used in time-attack.
    pub round_time_secs: Seconds,
}

impl Difficulty {
    pub const MAX_SIDE: Side = 16;

    pub const fn new_unchecked(
        grid_size: Side,
        rows: Side,
        cols: Side,
        pair_count: PairCount,
        round_time_secs: Seconds,
    ) -> Self {
        Self {
            grid_size,
            rows,
            cols,
            pair_count,
            round_time_secs,
        }
    }

    /// Zero fields fall back to the easy preset, the rest is clamped to a board that fits the pairs.
    pub fn new(
        grid_size: Side,
        rows: Side,
        cols: Side,
        pair_count: PairCount,
        round_time_secs: Seconds,
    ) -> Self {
        let fallback = Self::easy();
        let or_fallback = |value: Side, fallback: Side| if value == 0 { fallback } else { value };

        let grid_size = or_fallback(grid_size, fallback.grid_size).min(Self::MAX_SIDE);
        let rows = or_fallback(rows, fallback.rows).min(Self::MAX_SIDE);
        let cols = or_fallback(cols, fallback.cols).min(Self::MAX_SIDE);
        let max_pairs = (mult(rows, cols) / 2).max(1);
        let pair_count = if pair_count == 0 {
            fallback.pair_count
        } else {
            pair_count
        }
        .clamp(1, max_pairs);
        let round_time_secs = if round_time_secs == 0 {
            fallback.round_time_secs
        } else {
            round_time_secs
        };

        Self::new_unchecked(grid_size, rows, cols, pair_count, round_time_secs)
    }

    pub const fn easy() -> Self {
        Self::new_unchecked(4, 4, 4, 8, 60)
    }

    pub const fn normal() -> Self {
        Self::new_unchecked(6, 6, 6, 18, 90)
    }

    pub const fn hard() -> Self {
        Self::new_unchecked(8, 8, 8, 32, 120)
    }

    pub const fn card_count(&self) -> u16 {
        self.pair_count.saturating_mul(2)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::easy()
    }
}

/// Everything a round needs, resolved from whatever the caller handed over.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub user_images: Vec<ImageRef>,
    pub default_images: Vec<ImageRef>,
    pub difficulty: Difficulty,
    pub mode: GameMode,
}

impl RoundConfig {
    pub fn new(user_images: Vec<ImageRef>, difficulty: Difficulty, mode: GameMode) -> Self {
        Self {
            user_images,
            default_images: Vec::new(),
            difficulty,
            mode,
        }
    }

    pub fn with_default_images(mut self, default_images: Vec<ImageRef>) -> Self {
        self.default_images = default_images;
        self
    }

    /// Parses a configuration bundle. `null` or a blank string yields the defaults, unknown names and fields of the
    /// wrong type or range are defaulted one by one, only malformed JSON is an error.
    pub fn from_json(json: &str) -> core::result::Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_json::Value = serde_json::from_str(json)?;
        let input = Option::<RoundConfigInput>::deserialize(value).unwrap_or_else(|err| {
            log::debug!("Ignoring configuration bundle: {}", err);
            None
        });
        Ok(input.unwrap_or_default().into())
    }

    pub fn image_pool(&self) -> Result<ImagePool> {
        ImagePool::new(self.user_images.clone(), self.default_images.clone())
    }
}

/// Field that falls back to `None` when its value does not fit, instead of failing the whole bundle.
fn lenient<'de, D, T>(deserializer: D) -> core::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value)
        .inspect_err(|err| log::debug!("Ignoring configuration field: {}", err))
        .ok())
}

/// Loosely typed configuration bundle as passed along by the screens before the game.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundConfigInput {
    #[serde(deserialize_with = "lenient")]
    pub user_images: Option<Vec<ImageRef>>,
    #[serde(deserialize_with = "lenient")]
    pub difficulty: Option<DifficultyInput>,
    #[serde(deserialize_with = "lenient")]
    pub game_mode: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DifficultyInput {
    Preset(String),
    Explicit(ExplicitDifficulty),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplicitDifficulty {
    #[serde(alias = "size", deserialize_with = "lenient")]
    pub grid_size: Option<Side>,
    #[serde(deserialize_with = "lenient")]
    pub rows: Option<Side>,
    #[serde(deserialize_with = "lenient")]
    pub cols: Option<Side>,
    #[serde(alias = "pairs", deserialize_with = "lenient")]
    pub pair_count: Option<PairCount>,
    #[serde(alias = "time", deserialize_with = "lenient")]
    pub round_time_seconds: Option<Seconds>,
}

impl From<DifficultyInput> for Difficulty {
    fn from(input: DifficultyInput) -> Self {
        match input {
            DifficultyInput::Preset(name) => name
                .parse::<DifficultyPreset>()
                .unwrap_or_else(|_| {
                    log::debug!("Unknown difficulty {:?}, using default", name);
                    DifficultyPreset::default()
                })
                .difficulty(),
            DifficultyInput::Explicit(explicit) => Difficulty::new(
                explicit.grid_size.unwrap_or(0),
                explicit.rows.unwrap_or(0),
                explicit.cols.unwrap_or(0),
                explicit.pair_count.unwrap_or(0),
                explicit.round_time_seconds.unwrap_or(0),
            ),
        }
    }
}

impl From<RoundConfigInput> for RoundConfig {
    fn from(input: RoundConfigInput) -> Self {
        let mode = input
            .game_mode
            .as_deref()
            .map(|name| {
                name.parse().unwrap_or_else(|_| {
                    log::debug!("Unknown game mode {:?}, using default", name);
                    GameMode::default()
                })
            })
            .unwrap_or_default();
        RoundConfig::new(
            input.user_images.unwrap_or_default(),
            input.difficulty.map(Difficulty::from).unwrap_or_default(),
            mode,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("timeAttack".parse::<GameMode>(), Ok(GameMode::TimeAttack));
        assert_eq!("TWOPLAYER".parse::<GameMode>(), Ok(GameMode::TwoPlayer));
        assert_eq!("normal".parse::<GameMode>(), Ok(GameMode::Relaxed));
        assert_eq!("Hard".parse::<DifficultyPreset>(), Ok(DifficultyPreset::Hard));
        assert_eq!("extreme".parse::<DifficultyPreset>(), Err(UnknownName));
    }

    #[test]
    fn presets_match_board_sizes() {
        assert_eq!(DifficultyPreset::Easy.difficulty().card_count(), 16);
        assert_eq!(DifficultyPreset::Normal.difficulty().card_count(), 36);
        assert_eq!(DifficultyPreset::Hard.difficulty().card_count(), 64);
        assert_eq!(Difficulty::normal().round_time_secs, 90);
    }

    #[test]
    fn missing_configuration_uses_defaults() {
        for json in ["", "null", "{}"] {
            let config = RoundConfig::from_json(json).unwrap();
            assert_eq!(config.difficulty, Difficulty::easy());
            assert_eq!(config.mode, GameMode::Relaxed);
            assert!(config.user_images.is_empty());
        }
    }

    #[test]
    fn unknown_names_are_defaulted() {
        let config =
            RoundConfig::from_json(r#"{"difficulty": "impossible", "gameMode": "coop"}"#).unwrap();

        assert_eq!(config.difficulty, Difficulty::easy());
        assert_eq!(config.mode, GameMode::Relaxed);
    }

    #[test]
    fn preset_bundle_is_resolved() {
        let config = RoundConfig::from_json(
            r#"{"userImages": ["a", "b"], "difficulty": "hard", "gameMode": "timeAttack"}"#,
        )
        .unwrap();

        assert_eq!(config.user_images, vec![ImageRef::from("a"), ImageRef::from("b")]);
        assert_eq!(config.difficulty, Difficulty::hard());
        assert_eq!(config.mode, GameMode::TimeAttack);
    }

    #[test]
    fn explicit_difficulty_accepts_short_keys_and_fills_gaps() {
        let config =
            RoundConfig::from_json(r#"{"difficulty": {"size": 6, "rows": 6, "cols": 6, "pairs": 18}}"#)
                .unwrap();

        assert_eq!(config.difficulty, Difficulty::new_unchecked(6, 6, 6, 18, 60));
    }

    #[test]
    fn explicit_difficulty_is_clamped_to_the_board() {
        let difficulty = Difficulty::new(2, 2, 3, 40, 30);

        assert_eq!(difficulty.pair_count, 3);
        assert_eq!(difficulty.round_time_secs, 30);

        let difficulty = Difficulty::new(0, 40, 1, 0, 0);
        assert_eq!(difficulty.grid_size, 4);
        assert_eq!(difficulty.rows, Difficulty::MAX_SIDE);
        assert_eq!(difficulty.pair_count, 8);
    }

    #[test]
    fn mistyped_fields_fall_back_one_by_one() {
        let config = RoundConfig::from_json(
            r#"{"userImages": ["a"], "difficulty": 5, "gameMode": "twoPlayer"}"#,
        )
        .unwrap();
        assert_eq!(config.user_images, vec![ImageRef::from("a")]);
        assert_eq!(config.difficulty, Difficulty::easy());
        assert_eq!(config.mode, GameMode::TwoPlayer);

        let config =
            RoundConfig::from_json(r#"{"userImages": "a.png", "gameMode": 3, "difficulty": "hard"}"#)
                .unwrap();
        assert!(config.user_images.is_empty());
        assert_eq!(config.mode, GameMode::Relaxed);
        assert_eq!(config.difficulty, Difficulty::hard());

        for json in ["5", r#""hard""#, "[1, 2]"] {
            assert_eq!(RoundConfig::from_json(json).unwrap(), RoundConfig::default());
        }
    }

    #[test]
    fn out_of_range_difficulty_fields_are_defaulted() {
        let config = RoundConfig::from_json(r#"{"difficulty": {"rows": 300}}"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::easy());

        let config =
            RoundConfig::from_json(r#"{"difficulty": {"rows": 6, "cols": 6, "pairs": -1, "time": 90}}"#)
                .unwrap();
        assert_eq!(config.difficulty, Difficulty::new_unchecked(4, 6, 6, 8, 90));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(RoundConfig::from_json("{difficulty").is_err());
    }
}
