use super::Effect;
use super::ask::{self, AskAction, AskEvent};
use super::super::messages::Message;
use super::super::state::{App, LoadedClip};
use iced::time;
use iced::{Subscription, Task};
use std::time::{Duration, Instant};
use tracing::debug;

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let ticking = app.progress.is_active()
            || app.session.is_revealing()
            || app.ask.is_playing_answer()
            || app.player.is_audible();
        if ticking {
            time::every(Duration::from_millis(120)).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::UploadPathChanged(value) => self.session.upload_path_input = value,
            Message::LanguageChanged(language) => {
                self.handle_language_changed(language, &mut effects)
            }
            Message::VibeChanged(vibe) => self.handle_vibe_changed(vibe, &mut effects),
            Message::ParseRequested => self.handle_parse_requested(&mut effects),
            Message::QuickGenerateRequested => self.handle_quick_generate_requested(&mut effects),
            Message::DemoRequested => self.handle_demo_requested(&mut effects),
            Message::ParseFinished { request_id, result } => {
                self.handle_parse_finished(request_id, result, &mut effects)
            }
            Message::EpisodeSelected(id) => self.handle_episode_selected(id),
            Message::SteeringPromptChanged(value) => self.session.steering_prompt = value,
            Message::GenerateRequested => self.handle_generate_requested(&mut effects),
            Message::ScriptReady { request_id, result } => {
                self.handle_script_ready(request_id, result, &mut effects)
            }
            Message::MainAudioFetched { request_id, result } => {
                self.handle_main_audio_fetched(request_id, result, &mut effects)
            }
            Message::TogglePlayPause => self.handle_toggle_play_pause(&mut effects),
            Message::InterruptRequested => self.handle_interrupt_requested(&mut effects),
            Message::QuestionChanged(value) => self.ask.question_input = value,
            Message::QuestionSubmitted => self.handle_question_submitted(&mut effects),
            Message::AskCancelled => self.handle_ask_event(AskEvent::Cancelled, &mut effects),
            Message::AnswerReady { request_id, result } => {
                self.handle_ask_event(AskEvent::AnswerReady { request_id, result }, &mut effects)
            }
            Message::ToggleHistory => self.ui.history_visible = !self.ui.history_visible,
            Message::RemoveHistoryEntry(id) => {
                self.history.remove(id);
                effects.push(Effect::SaveHistory);
            }
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::DismissError => self.ui.error = None,
            Message::Tick(now) => self.handle_tick(now, &mut effects),
        }

        effects
    }

    fn handle_language_changed(
        &mut self,
        language: crate::config::Language,
        effects: &mut Vec<Effect>,
    ) {
        self.session.language = language;
        self.config.language = language;
        effects.push(Effect::SaveConfig);
    }

    fn handle_vibe_changed(&mut self, vibe: crate::config::Vibe, effects: &mut Vec<Effect>) {
        self.session.vibe = vibe;
        self.config.vibe = vibe;
        effects.push(Effect::SaveConfig);
    }

    fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.config.theme = match self.config.theme {
            crate::config::ThemeMode::Day => crate::config::ThemeMode::Night,
            crate::config::ThemeMode::Night => crate::config::ThemeMode::Day,
        };
        effects.push(Effect::SaveConfig);
    }

    fn handle_toggle_play_pause(&mut self, effects: &mut Vec<Effect>) {
        if !self.ask.is_idle() {
            // The transport belongs to the interrupt flow while a question is
            // in progress.
            return;
        }
        match (self.player.loaded, self.player.playback.as_ref()) {
            (LoadedClip::Main, Some(playback)) if playback.is_finished() => {
                effects.push(Effect::LoadMainClip {
                    start_at: Duration::ZERO,
                    paused: false,
                });
            }
            (LoadedClip::Main, Some(playback)) => {
                if playback.is_paused() {
                    playback.play();
                } else {
                    playback.pause();
                }
            }
            _ => {
                if self.player.main_path.is_some() {
                    effects.push(Effect::LoadMainClip {
                        start_at: Duration::ZERO,
                        paused: false,
                    });
                }
            }
        }
    }

    fn handle_interrupt_requested(&mut self, effects: &mut Vec<Effect>) {
        let event = AskEvent::InterruptRequested {
            script_loaded: self.session.has_script(),
            main_position: self.player.main_position(),
        };
        self.handle_ask_event(event, effects);
    }

    fn handle_question_submitted(&mut self, effects: &mut Vec<Effect>) {
        let event = AskEvent::QuestionSubmitted {
            script_loaded: self.session.has_script(),
        };
        self.handle_ask_event(event, effects);
    }

    fn handle_ask_event(&mut self, event: AskEvent, effects: &mut Vec<Effect>) {
        let actions = ask::transition(&mut self.ask, event);
        self.apply_ask_actions(actions, effects);
    }

    pub(super) fn apply_ask_actions(&mut self, actions: Vec<AskAction>, effects: &mut Vec<Effect>) {
        for action in actions {
            match action {
                AskAction::PauseMain => {
                    if let Some(playback) = self.player.playback.as_ref() {
                        playback.pause();
                    }
                }
                AskAction::RequestAnswer {
                    question,
                    request_id,
                } => effects.push(Effect::RequestAnswer {
                    question,
                    script: self.session.script.clone(),
                    request_id,
                }),
                AskAction::PlayAnswer { path } => effects.push(Effect::PlayAnswerClip { path }),
                AskAction::ResumeMain { offset } => effects.push(Effect::LoadMainClip {
                    start_at: offset,
                    paused: false,
                }),
                AskAction::Reject(rejection) => self.ui.error = Some(rejection.to_string()),
                AskAction::SurfaceError(message) => self.ui.error = Some(message),
            }
        }
    }

    fn handle_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        self.progress
            .advance_due(now, Duration::from_millis(self.config.progress_stage_ms));
        self.session
            .reveal_due(now, Duration::from_millis(self.config.bubble_stagger_ms));

        if self.ask.is_playing_answer() {
            let finished = match (self.player.loaded, self.player.playback.as_ref()) {
                (LoadedClip::Answer, Some(playback)) => playback.is_finished(),
                // The answer clip never made it into the slot; treat as over.
                _ => true,
            };
            if finished {
                debug!("Answer clip finished");
                self.handle_ask_event(AskEvent::AnswerFinished, effects);
            }
        }
    }
}
