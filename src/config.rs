use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use crate::error::{GhseekError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub github_token: Option<String>,
    pub debounce_ms: u64,
    pub max_suggestions: usize,
    pub tick_ms: u64,
    #[serde(default)]
    pub recent_path: Option<PathBuf>,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .field("debounce_ms", &self.debounce_ms)
            .field("max_suggestions", &self.max_suggestions)
            .field("tick_ms", &self.tick_ms)
            .field("recent_path", &self.recent_path)
            .field("log_path", &self.log_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            debounce_ms: 300,
            max_suggestions: MAX_SUGGESTIONS,
            tick_ms: 250,
            recent_path: None,
            log_path: None,
        }
    }
}

impl Config {
    /// Like [`Config::try_load`], but a bad file or variable falls back to
    /// the defaults with a warning on stderr.
    pub fn load(config_file: Option<PathBuf>) -> Self {
        Self::try_load(config_file).unwrap_or_else(|e| {
            eprintln!("warning: using default config: {e}");
            Config::default()
        })
    }

    pub fn try_load(config_file: Option<PathBuf>) -> Result<Self> {
        let config_file =
            config_file.unwrap_or_else(|| config_dir().join("ghseek").join("config.toml"));

        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(&config_file));
        }

        figment = figment.merge(Env::prefixed("GHSEEK_")).merge(
            Env::raw()
                .only(&["GITHUB_TOKEN"])
                .map(|_| "github_token".into()),
        );

        figment
            .extract::<Config>()
            .map(Config::normalized)
            .map_err(|e| GhseekError::Config(e.to_string()))
    }

    fn normalized(mut self) -> Self {
        self.max_suggestions = self.max_suggestions.clamp(1, MAX_SUGGESTIONS);
        self.tick_ms = self.tick_ms.max(50);
        if self.github_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.github_token = None;
        }
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn resolved_recent_path(&self) -> PathBuf {
        self.recent_path
            .clone()
            .unwrap_or_else(|| data_dir().join("ghseek").join("recent_users.json"))
    }

    pub fn resolved_log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| state_dir().join("ghseek").join("ghseek.log"))
    }
}

pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", Path::new(".config"))
}

pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", Path::new(".local/share"))
}

pub fn state_dir() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", Path::new(".local/state"))
}

fn xdg_dir(var: &str, home_suffix: &Path) -> PathBuf {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(home_suffix))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
