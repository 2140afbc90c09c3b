// Configuration loading and parsing (league.toml, draft.toml).

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use gridiron_draft::draft::roster::structured_capacity;
use gridiron_draft::DraftRules;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("{file} is missing from config/ and has no default in {dir}")]
    MissingDefault { file: &'static str, dir: PathBuf },

    #[error("cannot install default {file}: {source}")]
    CopyDefault {
        file: &'static str,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub autopick: AutopickConfig,
    pub data_paths: DataPaths,
}

impl Config {
    /// Draft rules for the engine.
    pub fn rules(&self) -> DraftRules {
        DraftRules {
            rounds: self.league.rounds,
            bench_capacity: self.league.bench_capacity,
            allow_bench_overflow: self.league.allow_bench_overflow,
            max_advance_retries: self.autopick.max_advance_retries,
        }
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub week: u32,
    /// Team ids in first-round pick order.
    pub teams: Vec<String>,
    pub rounds: u32,
    pub bench_capacity: usize,
    #[serde(default)]
    pub allow_bench_overflow: bool,
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    autopick: AutopickConfig,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutopickConfig {
    pub max_advance_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// League and draft settings files, looked up under `config/` and seeded
/// from `defaults/`.
const CONFIG_FILES: [&str; 2] = ["league.toml", "draft.toml"];

/// Load and validate `config/league.toml` and `config/draft.toml` under
/// `base_dir`. Missing files are an error here; see `load_config`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");
    let LeagueFile { league } = read_toml(&config_dir.join("league.toml"))?;
    let DraftFile {
        autopick,
        data_paths,
    } = read_toml(&config_dir.join("draft.toml"))?;

    let config = Config {
        league,
        autopick,
        data_paths,
    };
    validate(&config)?;
    Ok(config)
}

/// Install any settings file missing from `config/` by copying its default.
/// Existing files are never touched. Returns the paths that were written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");
    let mut installed = Vec::new();

    for file in CONFIG_FILES {
        let target = config_dir.join(file);
        if target.exists() {
            continue;
        }
        let default = defaults_dir.join(file);
        if !default.is_file() {
            return Err(ConfigError::MissingDefault {
                file,
                dir: defaults_dir,
            });
        }
        fs::create_dir_all(&config_dir)
            .and_then(|()| fs::copy(&default, &target))
            .map_err(|source| ConfigError::CopyDefault { file, source })?;
        installed.push(target);
    }

    Ok(installed)
}

/// Settings for the mock draft run from the working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Unreadable {
        path: PathBuf::from("."),
        source,
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;

    if league.teams.is_empty() {
        return Err(invalid("league.teams", "must list at least one team"));
    }
    let mut seen = HashSet::new();
    for team in &league.teams {
        if team.trim().is_empty() {
            return Err(invalid("league.teams", "team ids must not be blank"));
        }
        if !seen.insert(team.as_str()) {
            return Err(invalid("league.teams", format!("duplicate team id {team:?}")));
        }
    }

    if league.rounds == 0 {
        return Err(invalid("league.rounds", "must be greater than 0"));
    }

    let starters = structured_capacity();
    if league.bench_capacity < starters {
        return Err(invalid(
            "league.bench_capacity",
            format!("must be at least {starters}, got {}", league.bench_capacity),
        ));
    }
    if league.rounds as usize > league.bench_capacity {
        return Err(invalid(
            "league.rounds",
            format!(
                "{} rounds cannot fit a {}-player roster",
                league.rounds, league.bench_capacity
            ),
        ));
    }
    if !league.allow_bench_overflow && league.rounds as usize > starters {
        return Err(invalid(
            "league.rounds",
            format!(
                "{} rounds exceed the {starters} starting slots; set allow_bench_overflow",
                league.rounds
            ),
        ));
    }

    if config.autopick.max_advance_retries == 0 {
        return Err(invalid("autopick.max_advance_retries", "must be > 0"));
    }

    if config.data_paths.players.trim().is_empty() {
        return Err(invalid("data_paths.players", "must not be empty"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
