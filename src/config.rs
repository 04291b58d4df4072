use crate::game::Bounds;
use crate::options::{Difficulty, Options, Parameters, Players};
use log::LevelFilter;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Default gameplay settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Parameters for the "custom" difficulty
    #[serde(default)]
    pub(crate) custom: Option<CustomConfig>,

    /// Settings about the log file
    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("twinsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the gameplay options described by the configuration
    pub(crate) fn options(&self) -> Options {
        Options {
            players: self.game.players,
            difficulty: self.game.difficulty,
            custom: self.custom.map(Parameters::from),
            grid: self.game.grid,
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct GameConfig {
    pub(crate) players: Players,
    pub(crate) difficulty: Difficulty,
    /// Fixed field size; the field fills the terminal if unset
    pub(crate) grid: Option<Bounds>,
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CustomConfig {
    tick_ms: u64,
    grow_interval: u32,
    obstacles: usize,
    max_length: usize,
}

impl From<CustomConfig> for Parameters {
    fn from(value: CustomConfig) -> Parameters {
        Parameters {
            tick: Duration::from_millis(value.tick_ms),
            grow_interval: value.grow_interval,
            obstacles: value.obstacles,
            max_len: value.max_length,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawLogConfig")]
pub(crate) struct LogConfig {
    /// Path to the log file
    file: Option<PathBuf>,

    /// Minimum level of messages to log
    pub(crate) level: LevelFilter,
}

impl LogConfig {
    /// Return the default log file path
    fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("twinsnake").join("twinsnake.log"))
    }

    /// Return the path to log to: the file given in the configuration or, if
    /// that is not set, the default log file path.  Return `None` if no path
    /// is configured and the default path could not be computed.
    pub(crate) fn file(&self) -> Option<Cow<'_, Path>> {
        self.file
            .as_deref()
            .map(Cow::from)
            .or_else(|| LogConfig::default_path().map(Cow::from))
    }
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawLogConfig {
    file: Option<String>,
    level: LevelFilter,
}

impl Default for RawLogConfig {
    fn default() -> RawLogConfig {
        RawLogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

impl TryFrom<RawLogConfig> for LogConfig {
    type Error = std::io::Error;

    fn try_from(value: RawLogConfig) -> Result<LogConfig, std::io::Error> {
        Ok(LogConfig {
            file: value.file.map(expanduser::expanduser).transpose()?,
            level: value.level,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.options(), Options::default());
        assert_eq!(cfg.log.level, LevelFilter::Info);
    }

    #[test]
    fn full_config() {
        let cfg = toml::from_str::<Config>(concat!(
            "[game]\n",
            "players = 2\n",
            "difficulty = \"custom\"\n",
            "grid = { width = 60, height = 20 }\n",
            "\n",
            "[custom]\n",
            "tick-ms = 90\n",
            "grow-interval = 7\n",
            "obstacles = 40\n",
            "max-length = 80\n",
            "\n",
            "[log]\n",
            "file = \"/var/log/twinsnake.log\"\n",
            "level = \"debug\"\n",
        ))
        .unwrap();
        let params = Parameters {
            tick: Duration::from_millis(90),
            grow_interval: 7,
            obstacles: 40,
            max_len: 80,
        };
        assert_eq!(
            cfg.options(),
            Options {
                players: Players::Two,
                difficulty: Difficulty::Custom,
                custom: Some(params),
                grid: Some(Bounds::new(60, 20)),
                seed: None,
            }
        );
        assert_eq!(cfg.options().parameters(), Ok(params));
        assert_eq!(cfg.log.level, LevelFilter::Debug);
        assert_eq!(
            cfg.log.file().as_deref(),
            Some(Path::new("/var/log/twinsnake.log"))
        );
    }

    #[test]
    fn default_difficulty_label() {
        let cfg = toml::from_str::<Config>("[game]\ndifficulty = \"default\"\n").unwrap();
        assert_eq!(cfg.game.difficulty, Difficulty::Normal);
        let cfg = toml::from_str::<Config>("[game]\ndifficulty = \"hard\"\n").unwrap();
        assert_eq!(cfg.game.difficulty, Difficulty::Hard);
    }

    #[test]
    fn bad_player_count() {
        let r = toml::from_str::<Config>("[game]\nplayers = 3\n");
        assert!(r.is_err());
    }

    #[test]
    fn bad_difficulty() {
        let r = toml::from_str::<Config>("[game]\ndifficulty = \"expert\"\n");
        assert!(r.is_err());
    }

    #[test]
    fn incomplete_custom() {
        let r = toml::from_str::<Config>("[custom]\ntick-ms = 90\n");
        assert!(r.is_err());
    }

    #[test]
    fn load_missing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[game]\nplayers = 2\n\n[log]\nlevel = \"off\"").unwrap();
        file.flush().unwrap();
        let cfg = Config::load(file.path(), false).unwrap();
        assert_eq!(cfg.game.players, Players::Two);
        assert_eq!(cfg.log.level, LevelFilter::Off);
    }

    #[test]
    fn load_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[game\nplayers = 2").unwrap();
        file.flush().unwrap();
        assert!(matches!(
            Config::load(file.path(), true),
            Err(ConfigError::Parse(_))
        ));
    }
}
