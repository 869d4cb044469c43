//! Configuration loading for the AuraCast client.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the UI can still launch. Settings changed from the UI
//! (theme, language, vibe) are persisted separately under `.cache/` (see
//! `cache.rs`).

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub vibe: Vibe,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    #[serde(default = "default_bubble_stagger_ms")]
    pub bubble_stagger_ms: u64,
    #[serde(default = "default_progress_stage_ms")]
    pub progress_stage_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server_url: default_server_url(),
            theme: ThemeMode::Night,
            language: Language::default(),
            vibe: Vibe::default(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            bubble_stagger_ms: default_bubble_stagger_ms(),
            progress_stage_ms: default_progress_stage_ms(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Clamp every setting into its usable range so a hand-edited config file
    /// cannot wedge the UI.
    pub fn sanitize(&mut self) {
        while self.server_url.ends_with('/') {
            self.server_url.pop();
        }
        if self.server_url.trim().is_empty() {
            self.server_url = default_server_url();
        }
        self.window_width = self.window_width.clamp(480.0, 7680.0);
        self.window_height = self.window_height.clamp(360.0, 4320.0);
        self.bubble_stagger_ms = self.bubble_stagger_ms.clamp(50, 3000);
        self.progress_stage_ms = self.progress_stage_ms.clamp(200, 10_000);
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Night
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Script language requested from the server.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Hindi,
}

pub const LANGUAGES: [Language; 5] = [
    Language::English,
    Language::Spanish,
    Language::French,
    Language::German,
    Language::Hindi,
];

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl Language {
    /// Value sent as the `language` form field.
    pub fn as_param(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
            Language::Hindi => "hindi",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Hindi => "Hindi",
        };
        write!(f, "{}", label)
    }
}

/// Overall tone requested for the generated script.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Vibe {
    Conversational,
    Playful,
    Scholarly,
    Chill,
}

pub const VIBES: [Vibe; 4] = [
    Vibe::Conversational,
    Vibe::Playful,
    Vibe::Scholarly,
    Vibe::Chill,
];

impl Default for Vibe {
    fn default() -> Self {
        Vibe::Conversational
    }
}

impl Vibe {
    /// Value sent as the `vibe` form field.
    pub fn as_param(self) -> &'static str {
        match self {
            Vibe::Conversational => "conversational",
            Vibe::Playful => "playful",
            Vibe::Scholarly => "scholarly",
            Vibe::Chill => "chill",
        }
    }
}

impl std::fmt::Display for Vibe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Vibe::Conversational => "Conversational",
            Vibe::Playful => "Playful",
            Vibe::Scholarly => "Scholarly",
            Vibe::Chill => "Chill",
        };
        write!(f, "{}", label)
    }
}

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_window_width() -> f32 {
    1100.0
}

fn default_window_height() -> f32 {
    780.0
}

fn default_bubble_stagger_ms() -> u64 {
    450
}

fn default_progress_stage_ms() -> u64 {
    1400
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", label)
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_trims_trailing_slashes_from_server_url() {
        let mut config = AppConfig {
            server_url: "http://localhost:5000///".to_string(),
            ..AppConfig::default()
        };
        config.sanitize();
        assert_eq!(config.server_url, "http://localhost:5000");
    }

    #[test]
    fn sanitize_restores_blank_server_url() {
        let mut config = AppConfig {
            server_url: "   ".to_string(),
            ..AppConfig::default()
        };
        config.sanitize();
        assert_eq!(config.server_url, default_server_url());
    }

    #[test]
    fn sanitize_clamps_timings() {
        let mut config = AppConfig {
            bubble_stagger_ms: 0,
            progress_stage_ms: 600_000,
            ..AppConfig::default()
        };
        config.sanitize();
        assert_eq!(config.bubble_stagger_ms, 50);
        assert_eq!(config.progress_stage_ms, 10_000);
    }
}
