use crate::api::{EpisodeResponse, ParseResponse};
use crate::config::{Language, Vibe};
use std::path::PathBuf;
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    UploadPathChanged(String),
    LanguageChanged(Language),
    VibeChanged(Vibe),
    ParseRequested,
    QuickGenerateRequested,
    DemoRequested,
    ParseFinished {
        request_id: u64,
        result: Result<ParseResponse, String>,
    },
    EpisodeSelected(String),
    SteeringPromptChanged(String),
    GenerateRequested,
    ScriptReady {
        request_id: u64,
        result: Result<EpisodeResponse, String>,
    },
    MainAudioFetched {
        request_id: u64,
        result: Result<PathBuf, String>,
    },
    TogglePlayPause,
    InterruptRequested,
    QuestionChanged(String),
    QuestionSubmitted,
    AskCancelled,
    AnswerReady {
        request_id: u64,
        result: Result<PathBuf, String>,
    },
    ToggleHistory,
    RemoveHistoryEntry(i64),
    ToggleTheme,
    DismissError,
    Tick(Instant),
}
