use crate::playback::Playback;
use std::path::PathBuf;
use std::time::Duration;

/// Which clip currently occupies the single sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadedClip {
    Main,
    Answer,
}

/// The single playback slot. `main_path` survives the answer clip so the main
/// track can be re-opened at the saved offset afterwards.
pub struct PlayerState {
    pub(in crate::app) playback: Option<Playback>,
    pub(in crate::app) loaded: LoadedClip,
    pub(in crate::app) main_path: Option<PathBuf>,
}

impl PlayerState {
    pub(in crate::app) fn new() -> Self {
        PlayerState {
            playback: None,
            loaded: LoadedClip::Main,
            main_path: None,
        }
    }

    /// Position within the main track, if it is the loaded clip.
    pub(in crate::app) fn main_position(&self) -> Option<Duration> {
        match (self.loaded, self.playback.as_ref()) {
            (LoadedClip::Main, Some(playback)) => Some(playback.position()),
            _ => None,
        }
    }

    pub(in crate::app) fn is_playing_substitute(&self) -> bool {
        self.loaded == LoadedClip::Answer && self.playback.is_some()
    }

    pub(in crate::app) fn is_audible(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|playback| !playback.is_paused() && !playback.is_finished())
    }

    pub(in crate::app) fn stop(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.stop();
        }
        self.loaded = LoadedClip::Main;
    }
}
