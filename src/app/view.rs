use super::messages::Message;
use super::state::{App, AskLifecycle, InFlight, LoadedClip};
use crate::api::{ScriptLine, Speaker};
use crate::config::{LANGUAGES, ThemeMode, VIBES};
use crate::history::HistoryEntry;
use iced::alignment::Vertical;
use iced::widget::{
    Column, button, column, container, horizontal_space, pick_list, progress_bar, row, scrollable,
    text, text_input,
};
use iced::{Element, Length, Theme};
use std::time::Duration;

const BUBBLE_MAX_WIDTH: f32 = 560.0;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let theme_label = if matches!(self.config.theme, ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        let header = row![
            text("AuraCast").size(26),
            horizontal_space(),
            button(theme_label).on_press(Message::ToggleTheme),
            button(if self.ui.history_visible {
                "Hide History"
            } else {
                "History"
            })
            .on_press(Message::ToggleHistory),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let mut content: Column<'_, Message> = column![header].spacing(14).padding(16);

        if let Some(message) = &self.ui.error {
            content = content.push(self.error_banner(message));
        }

        content = content.push(self.upload_panel());

        if let Some((percent, label)) = self.progress.current() {
            content = content.push(
                column![
                    progress_bar(0.0..=100.0, f32::from(percent)).height(10),
                    text(format!("{label}… {percent}%")).size(13),
                ]
                .spacing(4),
            );
        }

        if self.session.upload.is_some() {
            content = content.push(self.episodes_panel());
        }

        content = content.push(self.script_panel());

        if self.session.audio_url.is_some() && self.player.main_path.is_some() {
            content = content.push(self.player_row());
        }
        if let Some(panel) = self.ask_panel() {
            content = content.push(panel);
        }

        if self.ui.history_visible {
            row![
                container(content).width(Length::Fill),
                self.history_panel()
            ]
            .spacing(12)
            .into()
        } else {
            content.into()
        }
    }

    fn error_banner(&self, message: &str) -> Element<'_, Message> {
        container(
            row![
                text(message.to_string()).width(Length::Fill),
                button("Dismiss").on_press(Message::DismissError),
            ]
            .spacing(10)
            .align_y(Vertical::Center),
        )
        .padding(10)
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(palette.danger.weak.color.into()),
                text_color: Some(palette.danger.weak.text),
                border: iced::border::rounded(8),
                ..container::Style::default()
            }
        })
        .width(Length::Fill)
        .into()
    }

    fn upload_panel(&self) -> Element<'_, Message> {
        let idle = self.session.in_flight.is_none();

        let path_input = text_input(
            "Path to a PDF or EPUB…",
            &self.session.upload_path_input,
        )
        .on_input(Message::UploadPathChanged)
        .on_submit(Message::ParseRequested)
        .padding(8);

        let parse_button = if idle {
            button("Find Episodes").on_press(Message::ParseRequested)
        } else {
            button(self.in_flight_label(InFlight::Parse))
        };
        let quick_button = if idle {
            button("Quick Generate").on_press(Message::QuickGenerateRequested)
        } else {
            button(self.in_flight_label(InFlight::QuickGenerate))
        };
        let demo_button = if idle {
            button("Demo Episode").on_press(Message::DemoRequested)
        } else {
            button(self.in_flight_label(InFlight::Demo))
        };

        column![
            path_input,
            row![
                pick_list(
                    LANGUAGES,
                    Some(self.session.language),
                    Message::LanguageChanged
                ),
                pick_list(VIBES, Some(self.session.vibe), Message::VibeChanged),
                horizontal_space(),
                parse_button,
                quick_button,
                demo_button,
            ]
            .spacing(8)
            .align_y(Vertical::Center),
        ]
        .spacing(8)
        .into()
    }

    fn in_flight_label(&self, kind: InFlight) -> &'static str {
        if self.session.in_flight == Some(kind) {
            "Working…"
        } else {
            match kind {
                InFlight::Parse => "Find Episodes",
                InFlight::QuickGenerate => "Quick Generate",
                InFlight::Demo => "Demo Episode",
                InFlight::Generate => "Generate Episode",
            }
        }
    }

    fn episodes_panel(&self) -> Element<'_, Message> {
        let Some(upload) = self.session.upload.as_ref() else {
            return column![].into();
        };

        let mut episodes: Column<'_, Message> =
            column![text("Pick an episode").size(16)].spacing(6);
        for episode in &upload.episodes {
            let selected = self.session.selected_episode.as_deref() == Some(episode.id.as_str());
            let item = button(text(episode.title.clone()))
                .on_press(Message::EpisodeSelected(episode.id.clone()))
                .style(if selected {
                    button::primary
                } else {
                    button::secondary
                })
                .width(Length::Fill);
            episodes = episodes.push(item);
        }

        let prompt_input = text_input(
            "Optional: steer the hosts (e.g. focus on the ending)…",
            &self.session.steering_prompt,
        )
        .on_input(Message::SteeringPromptChanged)
        .on_submit(Message::GenerateRequested)
        .padding(8);

        let generate_enabled =
            self.session.selected_episode.is_some() && self.session.in_flight.is_none();
        let generate_button = if generate_enabled {
            button("Generate Episode").on_press(Message::GenerateRequested)
        } else {
            button(self.in_flight_label(InFlight::Generate))
        };

        episodes
            .push(
                row![prompt_input, generate_button]
                    .spacing(8)
                    .align_y(Vertical::Center),
            )
            .into()
    }

    fn script_panel(&self) -> Element<'_, Message> {
        if !self.session.has_script() {
            return container(
                text("Upload a book and the hosts will take it from there.").size(14),
            )
            .center_x(Length::Fill)
            .height(Length::Fill)
            .padding(24)
            .into();
        }

        let mut bubbles: Column<'_, Message> = column![].spacing(10);
        for line in &self.session.script[..self.session.revealed_lines] {
            bubbles = bubbles.push(bubble(line));
        }

        scrollable(bubbles.width(Length::Fill).padding(4))
            .height(Length::Fill)
            .into()
    }

    fn player_row(&self) -> Element<'_, Message> {
        let main_loaded = self.player.loaded == LoadedClip::Main && self.player.playback.is_some();
        let playing = main_loaded && self.player.is_audible();
        let transport_label = if playing { "Pause" } else { "Play" };
        let transport = if self.ask.is_idle() {
            button(transport_label).on_press(Message::TogglePlayPause)
        } else {
            button(transport_label)
        };

        let position = self.player.main_position().unwrap_or(Duration::ZERO);
        let mut controls = row![transport, text(format_clock(position)).size(14)]
            .spacing(10)
            .align_y(Vertical::Center);

        // The interrupt affordance is only visible while the controller is
        // idle; that guard is what makes re-entry impossible.
        if self.ask.is_idle() && self.session.has_script() && main_loaded {
            controls = controls.push(horizontal_space());
            controls = controls.push(button("Ask the Hosts").on_press(Message::InterruptRequested));
        }

        controls.into()
    }

    fn ask_panel(&self) -> Option<Element<'_, Message>> {
        let panel: Element<'_, Message> = match self.ask.lifecycle {
            AskLifecycle::Idle => return None,
            AskLifecycle::AwaitingQuestion => row![
                text_input("Ask the hosts anything…", &self.ask.question_input)
                    .on_input(Message::QuestionChanged)
                    .on_submit(Message::QuestionSubmitted)
                    .padding(8),
                button("Ask").on_press(Message::QuestionSubmitted),
                button("Cancel").on_press(Message::AskCancelled),
            ]
            .spacing(8)
            .align_y(Vertical::Center)
            .into(),
            AskLifecycle::RequestingAnswer { .. } => row![
                text_input("Ask the hosts anything…", &self.ask.question_input).padding(8),
                button("Asking…"),
            ]
            .spacing(8)
            .align_y(Vertical::Center)
            .into(),
            AskLifecycle::PlayingAnswer => text("The hosts are answering…").size(14).into(),
        };
        Some(panel)
    }

    fn history_panel(&self) -> Element<'_, Message> {
        let mut entries: Column<'_, Message> = column![text("Past uploads").size(16)].spacing(8);
        if self.history.is_empty() {
            entries = entries.push(text("Nothing yet.").size(13));
        }
        for entry in self.history.entries() {
            entries = entries.push(history_row(entry));
        }

        container(scrollable(entries).height(Length::Fill))
            .padding(12)
            .width(260)
            .into()
    }
}

fn bubble(line: &ScriptLine) -> Element<'_, Message> {
    let from_host_a = line.speaker == Speaker::HostA;
    let body = column![
        text(line.speaker.label()).size(11),
        text(line.text.as_str()).size(15),
    ]
    .spacing(2);

    let bubble = container(body)
        .padding(10)
        .max_width(BUBBLE_MAX_WIDTH)
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            let pair = if from_host_a {
                palette.primary.weak
            } else {
                palette.secondary.weak
            };
            container::Style {
                background: Some(pair.color.into()),
                text_color: Some(pair.text),
                border: iced::border::rounded(12),
                ..container::Style::default()
            }
        });

    // Host A sits on the left, Host B on the right.
    let aligned = if from_host_a {
        row![bubble, horizontal_space()]
    } else {
        row![horizontal_space(), bubble]
    };
    aligned.width(Length::Fill).into()
}

fn history_row(entry: &HistoryEntry) -> Element<'_, Message> {
    column![
        row![
            text(entry.name.clone()).size(14).width(Length::Fill),
            button(text("×").size(12)).on_press(Message::RemoveHistoryEntry(entry.id)),
        ]
        .align_y(Vertical::Center),
        text(entry.date.clone()).size(11),
    ]
    .spacing(2)
    .into()
}

fn format_clock(position: Duration) -> String {
    let total = position.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::format_clock;
    use std::time::Duration;

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(Duration::ZERO), "0:00");
        assert_eq!(format_clock(Duration::from_secs(65)), "1:05");
        assert_eq!(format_clock(Duration::from_secs(600)), "10:00");
    }
}
