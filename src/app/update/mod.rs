use crate::api::ScriptLine;
use crate::config::{Language, Vibe};
use std::path::PathBuf;
use std::time::Duration;

mod ask;
mod core;
mod runtime;
mod session;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    ParseDocument {
        path: PathBuf,
        language: Language,
        vibe: Vibe,
        request_id: u64,
    },
    QuickGenerate {
        path: PathBuf,
        language: Language,
        vibe: Vibe,
        request_id: u64,
    },
    FetchDemo {
        request_id: u64,
    },
    GenerateEpisode {
        upload_id: String,
        episode_id: String,
        prompt: String,
        request_id: u64,
    },
    RequestAnswer {
        question: String,
        script: Vec<ScriptLine>,
        request_id: u64,
    },
    FetchMainAudio {
        url: String,
        request_id: u64,
    },
    LoadMainClip {
        start_at: Duration,
        paused: bool,
    },
    PlayAnswerClip {
        path: PathBuf,
    },
    SaveHistory,
    SaveConfig,
}
