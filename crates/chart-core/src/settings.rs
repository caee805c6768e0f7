use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Live pie chart of expense records in the terminal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "expense-chart",
    about = "Live pie chart of expense records in the terminal",
    version
)]
pub struct Settings {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Collection directory holding the expense documents
    #[arg(long)]
    pub data_path: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Feed poll interval in seconds (1-60)
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u32).range(1..=60))]
    pub refresh_rate: u32,

    /// Slice transition duration in milliseconds
    #[arg(long, default_value = "750", value_parser = clap::value_parser!(u64).range(0..=10_000))]
    pub animation_ms: u64,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

/// Non-chart operations against the collection.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add an expense record to the collection
    Add {
        /// Category label
        #[arg(long)]
        name: String,
        /// Amount in dollars (nonnegative)
        #[arg(long)]
        cost: f64,
    },
    /// Print the collection in feed order
    List,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.expense-chart/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_ms: Option<u64>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.expense-chart/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".expense-chart").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Testable core of [`Self::load_with_last_used`].
    pub fn load_with_last_used_impl(args: Vec<OsString>, config_path: &Path) -> Self {
        let matches = Self::command().get_matches_from(args);
        let mut settings =
            Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "failed to clear saved configuration");
            }
            return settings;
        }

        // A CLI-provided value always wins; defaults fall back to last-used.
        let last = LastUsedParams::load_from(config_path);
        if matches.value_source("theme") == Some(ValueSource::DefaultValue) {
            if let Some(theme) = &last.theme {
                settings.theme = theme.clone();
            }
        }
        if matches.value_source("refresh_rate") == Some(ValueSource::DefaultValue) {
            if let Some(rate) = last.refresh_rate {
                settings.refresh_rate = rate;
            }
        }
        if matches.value_source("animation_ms") == Some(ValueSource::DefaultValue) {
            if let Some(ms) = last.animation_ms {
                settings.animation_ms = ms;
            }
        }

        let params = LastUsedParams {
            theme: Some(settings.theme.clone()),
            refresh_rate: Some(settings.refresh_rate),
            animation_ms: Some(settings.animation_ms),
        };
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!(error = %e, "failed to persist last-used parameters");
        }

        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
