mod ask;
mod player;
mod progress;
mod session;
mod ui;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::history::History;
use crate::playback::Playback;
use iced::Task;
use std::time::Duration;
use tracing::{info, warn};

use super::messages::Message;

pub(in crate::app) use ask::{AskLifecycle, AskState};
pub(in crate::app) use player::{LoadedClip, PlayerState};
pub(in crate::app) use progress::ProgressState;
pub(in crate::app) use session::{InFlight, SessionState};
pub(in crate::app) use ui::UiState;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) api: ApiClient,
    pub(super) session: SessionState,
    pub(super) progress: ProgressState,
    pub(super) ask: AskState,
    pub(super) player: PlayerState,
    pub(super) history: History,
    pub(super) ui: UiState,
}

impl App {
    pub(super) fn bootstrap(mut config: AppConfig) -> (App, Task<Message>) {
        config.sanitize();
        let app = App {
            api: ApiClient::new(&config.server_url),
            session: SessionState::new(config.language, config.vibe),
            progress: ProgressState::default(),
            ask: AskState::new(),
            player: PlayerState::new(),
            history: History::load(),
            ui: UiState::new(),
            config,
        };
        info!(
            server = %app.config.server_url,
            history_entries = app.history.entries().len(),
            "Initialized app state"
        );
        (app, Task::none())
    }

    /// (Re)open the main track at `start_at`. Any clip in the single playback
    /// slot is stopped first.
    pub(super) fn load_main_clip(&mut self, start_at: Duration, paused: bool) {
        self.player.stop();
        let Some(path) = self.player.main_path.clone() else {
            return;
        };
        match Playback::load(&path, start_at, paused) {
            Ok(playback) => {
                self.player.playback = Some(playback);
                self.player.loaded = LoadedClip::Main;
            }
            Err(err) => {
                warn!(path = %path.display(), "Could not play the episode audio: {err:?}");
                self.ui.error = Some("Could not play the episode audio".to_string());
            }
        }
    }

    /// Discard playback and interrupt state ahead of showing a new result.
    pub(super) fn reset_playback(&mut self) {
        self.player.stop();
        self.player.main_path = None;
        self.ask.reset();
    }

    pub(super) fn save_user_config(&self) {
        crate::cache::save_user_config(&self.config);
    }
}
