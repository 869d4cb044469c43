//! Local cache layout for the AuraCast client.
//!
//! Everything lives under `.cache/`: downloaded audio clips (keyed by a hash
//! of their URL so re-generated episodes never collide), the persisted upload
//! history, and user-changed settings. Write errors are ignored to keep the
//! UI responsive.

use crate::config::AppConfig;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const CACHE_DIR: &str = ".cache";

/// Cache location for an audio clip downloaded from the given URL.
pub fn audio_path(url: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    let ext = clip_extension(url);
    Path::new(CACHE_DIR)
        .join("audio")
        .join(format!("clip-{hash}.{ext}"))
}

pub fn history_path() -> PathBuf {
    Path::new(CACHE_DIR).join("history.json")
}

fn user_config_path() -> PathBuf {
    Path::new(CACHE_DIR).join("config.toml")
}

/// Load settings previously saved from the UI, if any.
pub fn load_user_config() -> Option<AppConfig> {
    let data = fs::read_to_string(user_config_path()).ok()?;
    toml::from_str(&data).ok()
}

/// Persist settings changed from the UI. Errors are ignored.
pub fn save_user_config(config: &AppConfig) {
    let path = user_config_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(contents) = toml::to_string(config) {
        let _ = fs::write(path, contents);
    }
}

fn clip_extension(url: &str) -> &str {
    let trimmed = url.split(['?', '#']).next().unwrap_or(url);
    match trimmed.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.len() <= 4 && !ext.contains('/') => ext,
        _ => "mp3",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_path_is_stable_per_url() {
        assert_eq!(audio_path("/output/a.mp3"), audio_path("/output/a.mp3"));
        assert_ne!(audio_path("/output/a.mp3"), audio_path("/output/b.mp3"));
    }

    #[test]
    fn audio_path_keeps_clip_extension() {
        let path = audio_path("http://host/output/episode.wav");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("wav"));
    }

    #[test]
    fn audio_path_defaults_to_mp3() {
        let path = audio_path("http://host/output/episode?id=3");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
    }
}
