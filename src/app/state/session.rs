use crate::api::{Episode, EpisodeResponse, ParseResponse, ScriptLine};
use crate::config::{Language, Vibe};
use std::time::{Duration, Instant};

/// Which server round-trip the session is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlight {
    Parse,
    Generate,
    QuickGenerate,
    Demo,
}

/// Result of a successful parse; discarded wholesale on the next upload.
#[derive(Debug, Clone)]
pub struct UploadSession {
    pub upload_id: String,
    pub episodes: Vec<Episode>,
}

pub struct SessionState {
    pub(in crate::app) upload_path_input: String,
    pub(in crate::app) language: Language,
    pub(in crate::app) vibe: Vibe,
    pub(in crate::app) upload: Option<UploadSession>,
    pub(in crate::app) selected_episode: Option<String>,
    pub(in crate::app) steering_prompt: String,
    pub(in crate::app) script: Vec<ScriptLine>,
    pub(in crate::app) audio_url: Option<String>,
    pub(in crate::app) revealed_lines: usize,
    pub(in crate::app) last_reveal_at: Option<Instant>,
    pub(in crate::app) in_flight: Option<InFlight>,
    pub(in crate::app) request_id: u64,
}

impl SessionState {
    pub(in crate::app) fn new(language: Language, vibe: Vibe) -> Self {
        SessionState {
            upload_path_input: String::new(),
            language,
            vibe,
            upload: None,
            selected_episode: None,
            steering_prompt: String::new(),
            script: Vec::new(),
            audio_url: None,
            revealed_lines: 0,
            last_reveal_at: None,
            in_flight: None,
            request_id: 0,
        }
    }

    /// Bump the generation counter; responses tagged with an older value are
    /// dropped as stale.
    pub(in crate::app) fn next_request_id(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }

    /// Single-select, last-wins. Ignores ids not present in the current list.
    pub(in crate::app) fn select_episode(&mut self, id: &str) -> bool {
        let known = self
            .upload
            .as_ref()
            .is_some_and(|upload| upload.episodes.iter().any(|episode| episode.id == id));
        if known {
            self.selected_episode = Some(id.to_string());
        }
        known
    }

    /// Replace the session with a fresh parse result.
    pub(in crate::app) fn apply_parse(&mut self, response: ParseResponse) {
        self.upload = Some(UploadSession {
            upload_id: response.upload_id,
            episodes: response.episodes,
        });
        self.selected_episode = None;
        self.steering_prompt.clear();
    }

    /// Replace the displayed result and restart the bubble reveal.
    pub(in crate::app) fn apply_script(&mut self, response: EpisodeResponse) {
        self.script = response.script;
        self.audio_url = response.audio_url;
        self.revealed_lines = 0;
        self.last_reveal_at = None;
    }

    pub(in crate::app) fn has_script(&self) -> bool {
        !self.script.is_empty()
    }

    pub(in crate::app) fn is_revealing(&self) -> bool {
        self.revealed_lines < self.script.len()
    }

    /// Advance the staggered bubble reveal; returns true when a line appeared.
    pub(in crate::app) fn reveal_due(&mut self, now: Instant, stagger: Duration) -> bool {
        if !self.is_revealing() {
            return false;
        }
        let due = match self.last_reveal_at {
            None => true,
            Some(at) => now.duration_since(at) >= stagger,
        };
        if due {
            self.revealed_lines += 1;
            self.last_reveal_at = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Speaker;

    fn parse_response(n: usize) -> ParseResponse {
        ParseResponse {
            upload_id: "u-1".to_string(),
            episodes: (0..n)
                .map(|i| Episode {
                    id: format!("e{i}"),
                    title: format!("Episode {i}"),
                })
                .collect(),
        }
    }

    fn session_with_episodes(n: usize) -> SessionState {
        let mut session = SessionState::new(Language::English, Vibe::Conversational);
        session.apply_parse(parse_response(n));
        session
    }

    #[test]
    fn parse_result_replaces_session_and_clears_selection() {
        let mut session = session_with_episodes(3);
        assert!(session.select_episode("e2"));
        session.apply_parse(parse_response(5));
        assert_eq!(session.upload.as_ref().unwrap().episodes.len(), 5);
        assert!(session.selected_episode.is_none());
    }

    #[test]
    fn selection_is_single_select_last_wins() {
        let mut session = session_with_episodes(4);
        assert!(session.select_episode("e1"));
        assert!(session.select_episode("e3"));
        assert_eq!(session.selected_episode.as_deref(), Some("e3"));
    }

    #[test]
    fn unknown_episode_ids_are_ignored() {
        let mut session = session_with_episodes(2);
        assert!(session.select_episode("e0"));
        assert!(!session.select_episode("nope"));
        assert_eq!(session.selected_episode.as_deref(), Some("e0"));
    }

    #[test]
    fn reveal_advances_one_line_per_stagger_interval() {
        let mut session = SessionState::new(Language::English, Vibe::Conversational);
        session.apply_script(EpisodeResponse {
            script: vec![
                ScriptLine {
                    speaker: Speaker::HostA,
                    text: "Hi.".to_string(),
                },
                ScriptLine {
                    speaker: Speaker::HostB,
                    text: "Hello.".to_string(),
                },
            ],
            audio_url: None,
        });
        let stagger = Duration::from_millis(400);
        let t0 = Instant::now();
        assert!(session.reveal_due(t0, stagger));
        assert_eq!(session.revealed_lines, 1);
        // Too soon for the second line.
        assert!(!session.reveal_due(t0 + Duration::from_millis(100), stagger));
        assert!(session.reveal_due(t0 + Duration::from_millis(450), stagger));
        assert_eq!(session.revealed_lines, 2);
        assert!(!session.is_revealing());
        assert!(!session.reveal_due(t0 + Duration::from_secs(5), stagger));
    }

    #[test]
    fn new_script_restarts_the_reveal() {
        let mut session = SessionState::new(Language::English, Vibe::Conversational);
        session.apply_script(EpisodeResponse {
            script: vec![ScriptLine {
                speaker: Speaker::HostA,
                text: "Hi.".to_string(),
            }],
            audio_url: Some("/output/a.mp3".to_string()),
        });
        session.reveal_due(Instant::now(), Duration::ZERO);
        assert_eq!(session.revealed_lines, 1);
        session.apply_script(EpisodeResponse {
            script: vec![ScriptLine {
                speaker: Speaker::HostB,
                text: "New.".to_string(),
            }],
            audio_url: None,
        });
        assert_eq!(session.revealed_lines, 0);
        assert!(session.audio_url.is_none());
    }
}
