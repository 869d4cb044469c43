//! Typed client for the AuraCast server API.
//!
//! Five endpoints: `parse` (document → candidate episodes), `generate_episode`
//! (chosen episode → script + audio), `generate-podcast` (one-shot document →
//! script + audio), `ask_hosts` (interrupt question → answer clip), and
//! `demo_episode`. All calls run inside the UI's async tasks; nothing here
//! touches app state.

use crate::cache::audio_path;
use crate::config::{Language, Vibe};
use reqwest::multipart;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Generation can legitimately take minutes; the transport timeout only has
/// to catch a hung server.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Could not reach the AuraCast server: {0}")]
    Network(String),
    #[error("The server returned an unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Could not read the selected file: {0}")]
    File(String),
}

/// One of the two fixed host identities. Anything the server sends that is
/// not exactly "Host A" is attributed to Host B, mirroring the server's own
/// coercion of malformed speaker labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    HostA,
    HostB,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Speaker::HostA => "Host A",
            Speaker::HostB => "Host B",
        }
    }
}

impl<'de> Deserialize<'de> for Speaker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().eq_ignore_ascii_case("host a") {
            Ok(Speaker::HostA)
        } else {
            Ok(Speaker::HostB)
        }
    }
}

impl serde::Serialize for Speaker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Episode {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct ScriptLine {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParseResponse {
    pub upload_id: String,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// Shared shape of every script-producing endpoint; `generate-podcast` adds a
/// `state` field which serde ignores.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeResponse {
    #[serde(default)]
    pub script: Vec<ScriptLine>,
    #[serde(default)]
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub audio_url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                warn!("Falling back to default HTTP client: {err}");
                reqwest::Client::new()
            });
        ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a possibly server-relative URL (e.g. `/output/x.mp3`) against
    /// the configured base.
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }

    pub async fn parse_document(
        &self,
        file: PathBuf,
        language: Language,
        vibe: Vibe,
    ) -> Result<ParseResponse, ApiError> {
        info!(path = %file.display(), "Submitting document for parsing");
        let form = document_form(&file, language, vibe)?;
        let response = self
            .http
            .post(self.endpoint("/api/parse"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode(response).await
    }

    pub async fn generate_podcast(
        &self,
        file: PathBuf,
        language: Language,
        vibe: Vibe,
    ) -> Result<EpisodeResponse, ApiError> {
        info!(path = %file.display(), "Requesting one-shot podcast generation");
        let form = document_form(&file, language, vibe)?;
        let response = self
            .http
            .post(self.endpoint("/api/generate-podcast"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode(response).await
    }

    pub async fn generate_episode(
        &self,
        upload_id: &str,
        episode_id: &str,
        user_prompt: &str,
    ) -> Result<EpisodeResponse, ApiError> {
        info!(upload_id, episode_id, "Requesting episode generation");
        let body = serde_json::json!({
            "upload_id": upload_id,
            "episode_id": episode_id,
            "user_prompt": user_prompt,
        });
        let response = self
            .http
            .post(self.endpoint("/api/generate_episode"))
            .json(&body)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode(response).await
    }

    pub async fn ask_hosts(
        &self,
        question: &str,
        episode_script: &[ScriptLine],
    ) -> Result<AskResponse, ApiError> {
        info!(chars = question.len(), "Sending interrupt question to the hosts");
        let body = serde_json::json!({
            "question": question,
            "episode_script": episode_script,
        });
        let response = self
            .http
            .post(self.endpoint("/api/ask_hosts"))
            .json(&body)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode(response).await
    }

    pub async fn demo_episode(&self) -> Result<EpisodeResponse, ApiError> {
        info!("Requesting demo episode");
        let response = self
            .http
            .post(self.endpoint("/api/demo_episode"))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode(response).await
    }

    /// Download an audio clip into the local cache, reusing an existing copy.
    pub async fn download_audio(&self, url: &str) -> Result<PathBuf, ApiError> {
        let absolute = self.absolute_url(url);
        let path = audio_path(&absolute);
        if path.is_file() {
            debug!(path = %path.display(), "Reusing cached audio clip");
            return Ok(path);
        }

        info!(url = %absolute, "Downloading audio clip");
        let response = self
            .http
            .get(&absolute)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        if !response.status().is_success() {
            return Err(ApiError::Server {
                status: response.status().as_u16(),
                message: format!("Audio download failed ({})", response.status().as_u16()),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| ApiError::File(err.to_string()))?;
        }
        fs::write(&path, &bytes).map_err(|err| ApiError::File(err.to_string()))?;
        debug!(path = %path.display(), bytes = bytes.len(), "Cached audio clip");
        Ok(path)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn document_form(
    file: &Path,
    language: Language,
    vibe: Vibe,
) -> Result<multipart::Form, ApiError> {
    let bytes = fs::read(file).map_err(|err| ApiError::File(err.to_string()))?;
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let part = multipart::Part::bytes(bytes).file_name(filename);
    Ok(multipart::Form::new()
        .part("file", part)
        .text("language", language.as_param())
        .text("vibe", vibe.as_param()))
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("The server returned an error ({})", status.as_u16()));
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_response_deserializes() {
        let json = r#"{
            "upload_id": "u-42",
            "episodes": [
                {"id": "e1", "title": "Chapter One"},
                {"id": "e2", "title": "Chapter Two"}
            ]
        }"#;
        let parsed: ParseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.upload_id, "u-42");
        assert_eq!(parsed.episodes.len(), 2);
        assert_eq!(parsed.episodes[1].title, "Chapter Two");
    }

    #[test]
    fn episode_response_tolerates_missing_audio_and_extra_fields() {
        let json = r#"{
            "state": "ready",
            "script": [
                {"speaker": "Host A", "text": "Welcome."},
                {"speaker": "Host B", "text": "Glad to be here."}
            ],
            "audio_url": null
        }"#;
        let parsed: EpisodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.script.len(), 2);
        assert_eq!(parsed.script[0].speaker, Speaker::HostA);
        assert!(parsed.audio_url.is_none());
    }

    #[test]
    fn unknown_speakers_coerce_to_host_b() {
        let line: ScriptLine =
            serde_json::from_str(r#"{"speaker": "Narrator", "text": "hm"}"#).unwrap();
        assert_eq!(line.speaker, Speaker::HostB);
        let line: ScriptLine =
            serde_json::from_str(r#"{"speaker": "host a", "text": "hm"}"#).unwrap();
        assert_eq!(line.speaker, Speaker::HostA);
    }

    #[test]
    fn speaker_serializes_to_fixed_labels() {
        let line = ScriptLine {
            speaker: Speaker::HostB,
            text: "Right.".to_string(),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"Host B\""));
    }

    #[test]
    fn relative_urls_join_against_the_base() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(
            client.absolute_url("/output/ep.mp3"),
            "http://localhost:5000/output/ep.mp3"
        );
        assert_eq!(
            client.absolute_url("output/ep.mp3"),
            "http://localhost:5000/output/ep.mp3"
        );
        assert_eq!(
            client.absolute_url("https://cdn.example/ep.mp3"),
            "https://cdn.example/ep.mp3"
        );
    }
}
