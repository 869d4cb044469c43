//! Interrupt/resume controller: pause the episode, ask the hosts a question,
//! play the answer clip, resume the episode at the saved offset.
//!
//! The reducer feeds events through [`transition`], which mutates only the
//! ask sub-state and returns the side effects to perform, so every edge of
//! the lifecycle is testable without audio or network.

use super::super::state::{AskLifecycle, AskState};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub(in crate::app) enum AskEvent {
    InterruptRequested {
        script_loaded: bool,
        main_position: Option<Duration>,
    },
    QuestionSubmitted {
        script_loaded: bool,
    },
    Cancelled,
    AnswerReady {
        request_id: u64,
        result: Result<PathBuf, String>,
    },
    AnswerPlaybackFailed,
    AnswerFinished,
}

#[derive(Debug, PartialEq)]
pub(in crate::app) enum AskAction {
    PauseMain,
    RequestAnswer { question: String, request_id: u64 },
    PlayAnswer { path: PathBuf },
    ResumeMain { offset: Duration },
    Reject(AskRejection),
    SurfaceError(String),
}

/// Client-side rejections that never produce a request or a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(in crate::app) enum AskRejection {
    #[error("Type a question for the hosts first")]
    EmptyQuestion,
    #[error("No episode script is loaded")]
    NoScriptAvailable,
}

pub(in crate::app) fn transition(ask: &mut AskState, event: AskEvent) -> Vec<AskAction> {
    match event {
        AskEvent::InterruptRequested {
            script_loaded,
            main_position,
        } => on_interrupt(ask, script_loaded, main_position),
        AskEvent::QuestionSubmitted { script_loaded } => on_question_submitted(ask, script_loaded),
        AskEvent::Cancelled => on_cancelled(ask),
        AskEvent::AnswerReady { request_id, result } => on_answer_ready(ask, request_id, result),
        AskEvent::AnswerPlaybackFailed => on_answer_over(ask, "answer playback failed"),
        AskEvent::AnswerFinished => on_answer_over(ask, "answer clip finished"),
    }
}

fn on_interrupt(
    ask: &mut AskState,
    script_loaded: bool,
    main_position: Option<Duration>,
) -> Vec<AskAction> {
    if !ask.is_idle() {
        debug!(lifecycle = ?ask.lifecycle, "Ignoring interrupt while a question is in progress");
        return Vec::new();
    }
    let (true, Some(position)) = (script_loaded, main_position) else {
        debug!("Ignoring interrupt with no episode loaded");
        return Vec::new();
    };
    ask.resume_offset = position;
    ask.question_input.clear();
    ask.lifecycle = AskLifecycle::AwaitingQuestion;
    info!(
        offset_secs = position.as_secs_f64(),
        "Paused episode for a question"
    );
    vec![AskAction::PauseMain]
}

fn on_question_submitted(ask: &mut AskState, script_loaded: bool) -> Vec<AskAction> {
    if ask.lifecycle != AskLifecycle::AwaitingQuestion {
        debug!(lifecycle = ?ask.lifecycle, "Ignoring question submit outside the ask form");
        return Vec::new();
    }
    let question = ask.question_input.trim().to_string();
    if question.is_empty() {
        return vec![AskAction::Reject(AskRejection::EmptyQuestion)];
    }
    if !script_loaded {
        return vec![AskAction::Reject(AskRejection::NoScriptAvailable)];
    }
    let request_id = ask.next_request_id();
    ask.lifecycle = AskLifecycle::RequestingAnswer { request_id };
    info!(request_id, "Submitting question to the hosts");
    vec![AskAction::RequestAnswer {
        question,
        request_id,
    }]
}

fn on_cancelled(ask: &mut AskState) -> Vec<AskAction> {
    if ask.lifecycle != AskLifecycle::AwaitingQuestion {
        return Vec::new();
    }
    ask.lifecycle = AskLifecycle::Idle;
    info!("Question cancelled, resuming episode");
    vec![AskAction::ResumeMain {
        offset: ask.resume_offset,
    }]
}

fn on_answer_ready(
    ask: &mut AskState,
    request_id: u64,
    result: Result<PathBuf, String>,
) -> Vec<AskAction> {
    match ask.lifecycle {
        AskLifecycle::RequestingAnswer { request_id: current } if current == request_id => {}
        _ => {
            debug!(
                request_id,
                lifecycle = ?ask.lifecycle,
                "Ignoring stale answer"
            );
            return Vec::new();
        }
    }
    match result {
        Ok(path) => {
            ask.lifecycle = AskLifecycle::PlayingAnswer;
            info!(path = %path.display(), "Playing the hosts' answer");
            vec![AskAction::PlayAnswer { path }]
        }
        Err(message) => {
            warn!(request_id, "Question failed: {message}");
            ask.lifecycle = AskLifecycle::Idle;
            vec![
                AskAction::ResumeMain {
                    offset: ask.resume_offset,
                },
                AskAction::SurfaceError(message),
            ]
        }
    }
}

fn on_answer_over(ask: &mut AskState, reason: &str) -> Vec<AskAction> {
    if !ask.is_playing_answer() {
        return Vec::new();
    }
    ask.lifecycle = AskLifecycle::Idle;
    info!(
        offset_secs = ask.resume_offset.as_secs_f64(),
        "Resuming episode ({reason})"
    );
    vec![AskAction::ResumeMain {
        offset: ask.resume_offset,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn awaiting(offset_secs: u64, question: &str) -> AskState {
        let mut ask = AskState::new();
        let actions = transition(
            &mut ask,
            AskEvent::InterruptRequested {
                script_loaded: true,
                main_position: Some(Duration::from_secs(offset_secs)),
            },
        );
        assert_eq!(actions, vec![AskAction::PauseMain]);
        ask.question_input = question.to_string();
        ask
    }

    fn requesting(offset_secs: u64) -> (AskState, u64) {
        let mut ask = awaiting(offset_secs, "What happens next?");
        let actions = transition(
            &mut ask,
            AskEvent::QuestionSubmitted {
                script_loaded: true,
            },
        );
        let request_id = match &actions[..] {
            [AskAction::RequestAnswer { request_id, .. }] => *request_id,
            other => panic!("expected a request, got {other:?}"),
        };
        (ask, request_id)
    }

    #[test]
    fn interrupt_without_script_or_audio_is_a_noop() {
        let mut ask = AskState::new();
        assert!(
            transition(
                &mut ask,
                AskEvent::InterruptRequested {
                    script_loaded: false,
                    main_position: Some(Duration::from_secs(3)),
                },
            )
            .is_empty()
        );
        assert!(
            transition(
                &mut ask,
                AskEvent::InterruptRequested {
                    script_loaded: true,
                    main_position: None,
                },
            )
            .is_empty()
        );
        assert!(ask.is_idle());
    }

    #[test]
    fn interrupt_captures_the_playback_offset() {
        let ask = awaiting(42, "");
        assert_eq!(ask.lifecycle, AskLifecycle::AwaitingQuestion);
        assert_eq!(ask.resume_offset, Duration::from_secs(42));
    }

    #[test]
    fn repeated_interrupt_has_no_additional_effect() {
        let mut ask = awaiting(10, "");
        let actions = transition(
            &mut ask,
            AskEvent::InterruptRequested {
                script_loaded: true,
                main_position: Some(Duration::from_secs(99)),
            },
        );
        assert!(actions.is_empty());
        assert_eq!(ask.resume_offset, Duration::from_secs(10));
    }

    #[test]
    fn blank_question_is_rejected_without_a_request() {
        let mut ask = awaiting(5, "   ");
        let actions = transition(
            &mut ask,
            AskEvent::QuestionSubmitted {
                script_loaded: true,
            },
        );
        assert_eq!(
            actions,
            vec![AskAction::Reject(AskRejection::EmptyQuestion)]
        );
        assert_eq!(ask.lifecycle, AskLifecycle::AwaitingQuestion);
    }

    #[test]
    fn submit_trims_the_question() {
        let mut ask = awaiting(5, "  why?  ");
        let actions = transition(
            &mut ask,
            AskEvent::QuestionSubmitted {
                script_loaded: true,
            },
        );
        match &actions[..] {
            [AskAction::RequestAnswer { question, .. }] => assert_eq!(question, "why?"),
            other => panic!("expected a request, got {other:?}"),
        }
    }

    #[test]
    fn successful_answer_starts_substitute_playback() {
        let (mut ask, request_id) = requesting(30);
        let actions = transition(
            &mut ask,
            AskEvent::AnswerReady {
                request_id,
                result: Ok(PathBuf::from("/tmp/answer.mp3")),
            },
        );
        assert_eq!(
            actions,
            vec![AskAction::PlayAnswer {
                path: PathBuf::from("/tmp/answer.mp3")
            }]
        );
        assert_eq!(ask.lifecycle, AskLifecycle::PlayingAnswer);
    }

    #[test]
    fn failed_answer_returns_to_idle_preserving_the_offset() {
        let (mut ask, request_id) = requesting(30);
        let actions = transition(
            &mut ask,
            AskEvent::AnswerReady {
                request_id,
                result: Err("server said no".to_string()),
            },
        );
        assert_eq!(
            actions,
            vec![
                AskAction::ResumeMain {
                    offset: Duration::from_secs(30)
                },
                AskAction::SurfaceError("server said no".to_string()),
            ]
        );
        assert!(ask.is_idle());
        assert_eq!(ask.resume_offset, Duration::from_secs(30));
    }

    #[test]
    fn stale_answers_are_ignored() {
        let (mut ask, request_id) = requesting(30);
        let actions = transition(
            &mut ask,
            AskEvent::AnswerReady {
                request_id: request_id + 1,
                result: Ok(PathBuf::from("/tmp/other.mp3")),
            },
        );
        assert!(actions.is_empty());
        assert!(ask.is_requesting());
    }

    #[test]
    fn finished_answer_resumes_at_the_captured_offset() {
        let (mut ask, request_id) = requesting(73);
        transition(
            &mut ask,
            AskEvent::AnswerReady {
                request_id,
                result: Ok(PathBuf::from("/tmp/answer.mp3")),
            },
        );
        let actions = transition(&mut ask, AskEvent::AnswerFinished);
        assert_eq!(
            actions,
            vec![AskAction::ResumeMain {
                offset: Duration::from_secs(73)
            }]
        );
        assert!(ask.is_idle());
    }

    #[test]
    fn blocked_answer_playback_also_resumes() {
        let (mut ask, request_id) = requesting(12);
        transition(
            &mut ask,
            AskEvent::AnswerReady {
                request_id,
                result: Ok(PathBuf::from("/tmp/answer.mp3")),
            },
        );
        let actions = transition(&mut ask, AskEvent::AnswerPlaybackFailed);
        assert_eq!(
            actions,
            vec![AskAction::ResumeMain {
                offset: Duration::from_secs(12)
            }]
        );
        assert!(ask.is_idle());
    }

    #[test]
    fn cancel_resumes_without_a_request() {
        let mut ask = awaiting(8, "never mind");
        let actions = transition(&mut ask, AskEvent::Cancelled);
        assert_eq!(
            actions,
            vec![AskAction::ResumeMain {
                offset: Duration::from_secs(8)
            }]
        );
        assert!(ask.is_idle());
    }
}
