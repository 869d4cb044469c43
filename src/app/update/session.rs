//! Handlers for the upload → parse → select → generate flow.

use super::Effect;
use super::super::state::{App, InFlight};
use crate::api::{EpisodeResponse, ParseResponse};
use crate::validate::validate_upload;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_parse_requested(&mut self, effects: &mut Vec<Effect>) {
        self.start_document_request(InFlight::Parse, effects);
    }

    pub(super) fn handle_quick_generate_requested(&mut self, effects: &mut Vec<Effect>) {
        self.start_document_request(InFlight::QuickGenerate, effects);
    }

    fn start_document_request(&mut self, kind: InFlight, effects: &mut Vec<Effect>) {
        if self.session.in_flight.is_some() {
            return;
        }
        let path = PathBuf::from(self.session.upload_path_input.trim());
        if let Err(err) = validate_upload(&path) {
            info!(path = %path.display(), "Rejected upload: {err}");
            self.ui.error = Some(err.to_string());
            return;
        }

        self.ui.error = None;
        self.session.in_flight = Some(kind);
        let request_id = self.session.next_request_id();
        self.progress.start(request_id, Instant::now());
        let effect = match kind {
            InFlight::Parse => Effect::ParseDocument {
                path,
                language: self.session.language,
                vibe: self.session.vibe,
                request_id,
            },
            _ => Effect::QuickGenerate {
                path,
                language: self.session.language,
                vibe: self.session.vibe,
                request_id,
            },
        };
        effects.push(effect);
    }

    pub(super) fn handle_demo_requested(&mut self, effects: &mut Vec<Effect>) {
        if self.session.in_flight.is_some() {
            return;
        }
        self.ui.error = None;
        self.session.in_flight = Some(InFlight::Demo);
        let request_id = self.session.next_request_id();
        self.progress.start(request_id, Instant::now());
        effects.push(Effect::FetchDemo { request_id });
    }

    pub(super) fn handle_parse_finished(
        &mut self,
        request_id: u64,
        result: Result<ParseResponse, String>,
        effects: &mut Vec<Effect>,
    ) {
        if request_id != self.session.request_id {
            debug!(
                request_id,
                current = self.session.request_id,
                "Ignoring stale parse response"
            );
            return;
        }
        self.session.in_flight = None;
        self.progress.clear();

        match result {
            Ok(response) => {
                info!(
                    upload_id = %response.upload_id,
                    episodes = response.episodes.len(),
                    "Document parsed"
                );
                let filename = Path::new(self.session.upload_path_input.trim())
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "document".to_string());
                self.history.record(&filename);
                effects.push(Effect::SaveHistory);
                self.session.apply_parse(response);
            }
            Err(message) => {
                warn!("Parse failed: {message}");
                self.ui.error = Some(message);
            }
        }
    }

    pub(super) fn handle_episode_selected(&mut self, id: String) {
        if self.session.select_episode(&id) {
            debug!(episode_id = %id, "Episode selected");
        } else {
            warn!(episode_id = %id, "Selected episode is not in the current session");
        }
    }

    pub(super) fn handle_generate_requested(&mut self, effects: &mut Vec<Effect>) {
        if self.session.in_flight.is_some() {
            return;
        }
        let Some(upload) = self.session.upload.as_ref() else {
            self.ui.error = Some("Parse a document before generating".to_string());
            return;
        };
        let Some(episode_id) = self.session.selected_episode.clone() else {
            self.ui.error = Some("Pick an episode first".to_string());
            return;
        };

        self.ui.error = None;
        let upload_id = upload.upload_id.clone();
        self.session.in_flight = Some(InFlight::Generate);
        let request_id = self.session.next_request_id();
        self.progress.start(request_id, Instant::now());
        effects.push(Effect::GenerateEpisode {
            upload_id,
            episode_id,
            prompt: self.session.steering_prompt.trim().to_string(),
            request_id,
        });
    }

    pub(super) fn handle_script_ready(
        &mut self,
        request_id: u64,
        result: Result<EpisodeResponse, String>,
        effects: &mut Vec<Effect>,
    ) {
        if request_id != self.session.request_id {
            debug!(
                request_id,
                current = self.session.request_id,
                "Ignoring stale script response"
            );
            return;
        }
        self.session.in_flight = None;
        self.progress.clear();

        match result {
            Ok(response) => {
                info!(
                    lines = response.script.len(),
                    has_audio = response.audio_url.is_some(),
                    "Episode ready"
                );
                self.reset_playback();
                self.session.apply_script(response);
                if let Some(url) = self.session.audio_url.clone() {
                    effects.push(Effect::FetchMainAudio { url, request_id });
                }
            }
            Err(message) => {
                warn!("Generation failed: {message}");
                self.ui.error = Some(message);
            }
        }
    }

    pub(super) fn handle_main_audio_fetched(
        &mut self,
        request_id: u64,
        result: Result<PathBuf, String>,
        effects: &mut Vec<Effect>,
    ) {
        if request_id != self.session.request_id {
            debug!(
                request_id,
                current = self.session.request_id,
                "Ignoring audio for a superseded episode"
            );
            return;
        }
        match result {
            Ok(path) => {
                self.player.main_path = Some(path);
                effects.push(Effect::LoadMainClip {
                    start_at: std::time::Duration::ZERO,
                    paused: true,
                });
            }
            Err(message) => {
                warn!("Audio download failed: {message}");
                self.ui.error = Some(message);
            }
        }
    }
}
