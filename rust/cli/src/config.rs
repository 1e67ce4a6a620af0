use serde::{Deserialize, Serialize};
use std::fs;

use flip7_ai::{DEFAULT_POLICY, create_policy};
use flip7_engine::engine::DEFAULT_TARGET_SCORE;

/// Computer seats added to `play` and `sim` when no `--ai` is given.
pub const DEFAULT_COMPUTER_PLAYERS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub target_score: u32,
    pub seed: Option<u64>,
    pub default_policy: String,
    pub computer_players: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub target_score: ValueSource,
    pub seed: ValueSource,
    pub default_policy: ValueSource,
    pub computer_players: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            target_score: ValueSource::Default,
            seed: ValueSource::Default,
            default_policy: ValueSource::Default,
            computer_players: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            seed: None,
            default_policy: DEFAULT_POLICY.into(),
            computer_players: DEFAULT_COMPUTER_PLAYERS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `FLIP7_CONFIG`, then `FLIP7_*`
/// environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("FLIP7_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.target_score {
            cfg.target_score = v;
            sources.target_score = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.default_policy {
            cfg.default_policy = v;
            sources.default_policy = ValueSource::File;
        }
        if let Some(v) = f.computer_players {
            cfg.computer_players = v;
            sources.computer_players = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("FLIP7_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(target) = std::env::var("FLIP7_TARGET")
        && !target.is_empty()
    {
        cfg.target_score = target
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid target score".into()))?;
        sources.target_score = ValueSource::Env;
    }
    if let Ok(policy) = std::env::var("FLIP7_DEFAULT_POLICY")
        && !policy.is_empty()
    {
        cfg.default_policy = policy;
        sources.default_policy = ValueSource::Env;
    }
    if let Ok(n) = std::env::var("FLIP7_COMPUTER_PLAYERS")
        && !n.is_empty()
    {
        cfg.computer_players = n
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid computer player count".into()))?;
        sources.computer_players = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    target_score: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    default_policy: Option<String>,
    #[serde(default)]
    computer_players: Option<usize>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.target_score == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: target_score must be >0".into(),
        ));
    }
    if let Err(e) = create_policy(&cfg.default_policy) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: default_policy: {}",
            e
        )));
    }
    if cfg.computer_players > flip7_engine::engine::MAX_PLAYERS {
        return Err(ConfigError::Invalid(
            "Invalid configuration: computer_players must be <=18".into(),
        ));
    }
    Ok(())
}
