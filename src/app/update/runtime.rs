//! Executes [`Effect`]s: network calls become async tasks whose completion
//! messages carry the request id they were issued under; playback and
//! persistence run inline.

use super::Effect;
use super::ask::{self, AskAction, AskEvent};
use super::super::messages::Message;
use super::super::state::{App, LoadedClip};
use crate::playback::Playback;
use iced::Task;
use std::time::Duration;
use tracing::warn;

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::ParseDocument {
                path,
                language,
                vibe,
                request_id,
            } => {
                let client = self.api.clone();
                Task::perform(
                    async move {
                        client
                            .parse_document(path, language, vibe)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    move |result| Message::ParseFinished { request_id, result },
                )
            }
            Effect::QuickGenerate {
                path,
                language,
                vibe,
                request_id,
            } => {
                let client = self.api.clone();
                Task::perform(
                    async move {
                        client
                            .generate_podcast(path, language, vibe)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    move |result| Message::ScriptReady { request_id, result },
                )
            }
            Effect::FetchDemo { request_id } => {
                let client = self.api.clone();
                Task::perform(
                    async move { client.demo_episode().await.map_err(|err| err.to_string()) },
                    move |result| Message::ScriptReady { request_id, result },
                )
            }
            Effect::GenerateEpisode {
                upload_id,
                episode_id,
                prompt,
                request_id,
            } => {
                let client = self.api.clone();
                Task::perform(
                    async move {
                        client
                            .generate_episode(&upload_id, &episode_id, &prompt)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    move |result| Message::ScriptReady { request_id, result },
                )
            }
            Effect::RequestAnswer {
                question,
                script,
                request_id,
            } => {
                let client = self.api.clone();
                Task::perform(
                    async move {
                        let response = client
                            .ask_hosts(&question, &script)
                            .await
                            .map_err(|err| err.to_string())?;
                        match response.audio_url {
                            Some(url) => client
                                .download_audio(&url)
                                .await
                                .map_err(|err| err.to_string()),
                            None => Err("The hosts did not return an answer clip".to_string()),
                        }
                    },
                    move |result| Message::AnswerReady { request_id, result },
                )
            }
            Effect::FetchMainAudio { url, request_id } => {
                let client = self.api.clone();
                Task::perform(
                    async move {
                        client
                            .download_audio(&url)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    move |result| Message::MainAudioFetched { request_id, result },
                )
            }
            Effect::LoadMainClip { start_at, paused } => {
                self.load_main_clip(start_at, paused);
                Task::none()
            }
            Effect::PlayAnswerClip { path } => {
                self.player.stop();
                match Playback::load(&path, Duration::ZERO, false) {
                    Ok(playback) => {
                        self.player.playback = Some(playback);
                        self.player.loaded = LoadedClip::Answer;
                    }
                    Err(err) => {
                        warn!(path = %path.display(), "Answer clip would not play: {err:?}");
                        let actions =
                            ask::transition(&mut self.ask, AskEvent::AnswerPlaybackFailed);
                        for action in actions {
                            if let AskAction::ResumeMain { offset } = action {
                                self.load_main_clip(offset, false);
                            }
                        }
                    }
                }
                Task::none()
            }
            Effect::SaveHistory => {
                self.history.save();
                Task::none()
            }
            Effect::SaveConfig => {
                self.save_user_config();
                Task::none()
            }
        }
    }
}
