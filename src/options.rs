use crate::game::Bounds;
use crate::util::EnumExt;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Everything needed to set up a game session
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Options {
    pub(crate) players: Players,
    pub(crate) difficulty: Difficulty,
    /// Parameters for [`Difficulty::Custom`]
    pub(crate) custom: Option<Parameters>,
    /// Fixed field size; if `None`, the field fills the terminal
    pub(crate) grid: Option<Bounds>,
    /// Seed for obstacle placement; if `None`, one is drawn from the OS
    pub(crate) seed: Option<u64>,
}

impl Options {
    /// Return the gameplay parameters for the selected difficulty
    pub(crate) fn parameters(&self) -> Result<Parameters, OptionsError> {
        match self.difficulty {
            Difficulty::Custom => self.custom.ok_or(OptionsError::NoCustom),
            d => Ok(d.preset().unwrap_or_default()),
        }
    }
}

/// One of the (at most two) players
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum Player {
    One,
    Two,
}

impl Player {
    /// How many rows below the field's center the player's snake starts
    pub(crate) fn row_offset(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub(crate) fn number(self) -> usize {
        self.into_usize() + 1
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// How many players are in the game
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(try_from = "u8")]
pub(crate) enum Players {
    #[default]
    One,
    Two,
}

impl Players {
    pub(crate) fn count(self) -> usize {
        match self {
            Players::One => 1,
            Players::Two => 2,
        }
    }

    /// Iterate over the participating players in order
    pub(crate) fn iter(self) -> impl Iterator<Item = Player> {
        Player::iter().take(self.count())
    }
}

impl TryFrom<u8> for Players {
    type Error = OptionsError;

    fn try_from(n: u8) -> Result<Players, OptionsError> {
        match n {
            1 => Ok(Players::One),
            2 => Ok(Players::Two),
            _ => Err(OptionsError::PlayerCount(n.to_string())),
        }
    }
}

impl FromStr for Players {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Players, OptionsError> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| OptionsError::PlayerCount(s.to_owned()))
            .and_then(Players::try_from)
    }
}

impl fmt::Display for Players {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Difficulty labels.  Each built-in label selects a preset
/// [`Parameters`]; `Custom` uses the parameters from the configuration file.
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    #[serde(rename = "default")]
    Normal,
    Custom,
}

impl Difficulty {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Normal => "default",
            Difficulty::Custom => "custom",
        }
    }

    /// Return the built-in parameters for this label, or `None` for
    /// [`Difficulty::Custom`]
    pub(crate) fn preset(self) -> Option<Parameters> {
        let (tick_ms, grow_interval, obstacles, max_len) = match self {
            Difficulty::Easy => (100, 10, 60, 90),
            Difficulty::Medium => (85, 8, 90, 100),
            Difficulty::Hard => (70, 6, 120, 110),
            Difficulty::Normal => (100, 10, 30, 100),
            Difficulty::Custom => return None,
        };
        Some(Parameters {
            tick: Duration::from_millis(tick_ms),
            grow_interval,
            obstacles,
            max_len,
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Difficulty, OptionsError> {
        Difficulty::iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OptionsError::Difficulty(s.to_owned()))
    }
}

/// The tunable parameters of a game session
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Parameters {
    /// Time between movements of the snakes
    pub(crate) tick: Duration,

    /// Number of plain ticks between growth ticks
    pub(crate) grow_interval: u32,

    /// Number of obstacles on the field
    pub(crate) obstacles: usize,

    /// Snake length at which a player wins
    pub(crate) max_len: usize,
}

impl Default for Parameters {
    fn default() -> Parameters {
        Parameters {
            tick: Duration::from_millis(100),
            grow_interval: 10,
            obstacles: 30,
            max_len: 100,
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum OptionsError {
    #[error("invalid player count {0:?}; expected 1 or 2")]
    PlayerCount(String),
    #[error("unknown difficulty {0:?}; expected one of: {list}", list = difficulty_list())]
    Difficulty(String),
    #[error("difficulty \"custom\" selected, but no [custom] parameters are configured")]
    NoCustom,
}

/// Comma-separated list of the difficulty labels, for messages
pub(crate) fn difficulty_list() -> String {
    Difficulty::iter()
        .map(Difficulty::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
