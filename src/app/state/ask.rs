use std::time::Duration;

/// Lifecycle of the interrupt/resume controller.
///
/// `Idle` covers normal playback (playing or paused). Entering
/// `AwaitingQuestion` captures the main track's position; every path back to
/// `Idle` restores it before the main track resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskLifecycle {
    Idle,
    AwaitingQuestion,
    RequestingAnswer { request_id: u64 },
    PlayingAnswer,
}

pub struct AskState {
    pub(in crate::app) lifecycle: AskLifecycle,
    pub(in crate::app) question_input: String,
    pub(in crate::app) resume_offset: Duration,
    pub(in crate::app) request_id: u64,
}

impl AskState {
    pub(in crate::app) fn new() -> Self {
        AskState {
            lifecycle: AskLifecycle::Idle,
            question_input: String::new(),
            resume_offset: Duration::ZERO,
            request_id: 0,
        }
    }

    pub(in crate::app) fn is_idle(&self) -> bool {
        matches!(self.lifecycle, AskLifecycle::Idle)
    }

    pub(in crate::app) fn is_requesting(&self) -> bool {
        matches!(self.lifecycle, AskLifecycle::RequestingAnswer { .. })
    }

    pub(in crate::app) fn is_playing_answer(&self) -> bool {
        matches!(self.lifecycle, AskLifecycle::PlayingAnswer)
    }

    /// Reset to `Idle` and drop the captured offset; used when a new result
    /// replaces the episode the controller was attached to.
    pub(in crate::app) fn reset(&mut self) {
        self.lifecycle = AskLifecycle::Idle;
        self.question_input.clear();
        self.resume_offset = Duration::ZERO;
    }

    pub(in crate::app) fn next_request_id(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }
}
