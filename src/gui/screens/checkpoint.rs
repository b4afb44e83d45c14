use iced::{
    Alignment::Center,
    Element, Length, Subscription, Task, border,
    widget::{button, column, container, horizontal_space, row, text, text_input},
};

use crate::core::api::{
    ApiError, CheckpointApi, ClearanceClient, PENALTY_REASON, Role, TravelerApi,
};
use crate::gui::{
    AppState,
    download::confirm,
    poll::Poll,
    screens::{Screen, ScreenMessage},
    widgets::{ToastLine, badges_row, card_frame, dashboard, empty_state, fields_column, tone_color},
};
use crate::models::{CardField, DisapprovedTraveler, ScanOutcome, TravelFlag, Tone};
use crate::viewmodel::Roster;

/// Checkpoint-authority dashboard: scan a traveler's QR payload, act on
/// the resulting flag, and keep the disapproved-traveler list in view.
#[derive(Debug, Clone)]
pub struct CheckpointScreen {
    client: ClearanceClient,
    roster: Roster<DisapprovedTraveler>,
    status: Option<ToastLine>,
    qr_input: String,
    scanning: bool,
    outcome: Option<ScanOutcome>,
    levy_busy: bool,
}

#[derive(Debug, Clone)]
pub enum CheckpointMessage {
    Refresh,
    Fetched(Result<Vec<DisapprovedTraveler>, ApiError>),
    QrInputChanged(String),
    Scan,
    ScanFinished(Result<ScanOutcome, ApiError>),
    LevyRequested { aadhar: String, amount: u32 },
    LevyConfirmed {
        aadhar: String,
        amount: u32,
        confirmed: bool,
    },
    LevyFinished(Result<String, ApiError>),
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    LoggedOut(Role),
}

impl CheckpointScreen {
    pub fn open(client: ClearanceClient) -> (Self, Task<ScreenMessage<Self>>) {
        let screen = Self {
            client,
            roster: Roster::new(),
            status: None,
            qr_input: String::new(),
            scanning: false,
            outcome: None,
            levy_busy: false,
        };
        (
            screen,
            Task::done(ScreenMessage::ScreenMessage(CheckpointMessage::Refresh)),
        )
    }

    fn scan_panel(&self) -> Element<'_, ScreenMessage<Self>> {
        let panel = column![
            text("Verify Traveler").size(18),
            row![
                text_input("Paste QR code data...", &self.qr_input).on_input(|v| {
                    ScreenMessage::ScreenMessage(CheckpointMessage::QrInputChanged(v))
                }),
                button(if self.scanning {
                    "Scanning..."
                } else {
                    "Scan QR Code"
                })
                .on_press_maybe((!self.scanning).then_some(ScreenMessage::ScreenMessage(
                    CheckpointMessage::Scan
                ))),
            ]
            .spacing(12),
        ]
        .spacing(10);
        card_frame(panel)
    }

    fn outcome_panel<'a>(&'a self, outcome: &'a ScanOutcome) -> Element<'a, ScreenMessage<Self>> {
        let (heading, tone) = match outcome.flag {
            TravelFlag::Red => ("RED FLAG - DISAPPROVED TRAVELER", Tone::Danger),
            TravelFlag::Green => ("GREEN FLAG - APPROVED TRAVELER", Tone::Success),
            TravelFlag::Yellow => ("YELLOW FLAG - PENDING STATUS", Tone::Warning),
        };
        let accent = tone_color(tone);

        let mut fields = Vec::new();
        let mut push = |label: &'static str, value: &Option<String>| {
            if let Some(value) = value {
                fields.push(CardField::new(label, value.clone()));
            }
        };
        push("Name", &outcome.name);
        push("Aadhar", &outcome.aadhar);
        push("Disease", &outcome.disease_name);
        push("Phone", &outcome.phone_number);
        push("Email", &outcome.email);
        push("Source", &outcome.source);
        push("Destination", &outcome.destination);

        let mut panel = column![
            text(heading)
                .size(20)
                .style(move |_theme| text::Style {
                    color: Some(accent),
                }),
            text(&outcome.message).size(14),
            fields_column(fields),
        ]
        .spacing(10);

        if let Some(tier) = outcome.tier {
            panel = panel.push(
                row![
                    text("Severity:").size(13),
                    badges_row(vec![crate::models::Badge {
                        text: tier.label().to_string(),
                        tone: Tone::Danger,
                    }]),
                ]
                .spacing(8)
                .align_y(Center),
            );
        }

        if outcome.flag == TravelFlag::Red {
            if let (Some(aadhar), Some(tier)) = (&outcome.aadhar, outcome.tier) {
                let amount = tier.penalty_rupees();
                let label = if self.levy_busy {
                    "Levying...".to_string()
                } else {
                    format!("Levy Penalty (\u{20b9}{amount})")
                };
                let aadhar = aadhar.clone();
                panel = panel.push(
                    column![
                        text(format!("Penalty Amount: \u{20b9}{amount}")).size(15),
                        text("Higher tier indicates a more serious health concern and a heavier penalty.")
                            .size(12),
                        button(text(label)).style(button::danger).on_press_maybe(
                            (!self.levy_busy).then(|| {
                                ScreenMessage::ScreenMessage(CheckpointMessage::LevyRequested {
                                    aadhar: aadhar.clone(),
                                    amount,
                                })
                            })
                        ),
                    ]
                    .spacing(8),
                );
            }
        }

        container(panel)
            .style(move |_theme| {
                container::Style::default().border(
                    border::rounded(8)
                        .width(2)
                        .color(accent),
                )
            })
            .padding(16)
            .width(Length::Fill)
            .into()
    }

    fn traveler_card(&self, traveler: &DisapprovedTraveler) -> Element<'_, ScreenMessage<Self>> {
        let body = traveler.summary_card();
        card_frame(
            column![
                row![
                    text(body.title).size(16),
                    horizontal_space(),
                    badges_row(body.badges),
                ]
                .spacing(12)
                .align_y(Center),
                fields_column(body.fields),
            ]
            .spacing(6),
        )
    }
}

impl Screen for CheckpointScreen {
    type Message = CheckpointMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut content = column![self.scan_panel()].spacing(16);
        if let Some(outcome) = &self.outcome {
            content = content.push(self.outcome_panel(outcome));
        }

        content = content.push(text("Disapproved Travelers").size(18));
        let visible = self.roster.visible();
        if visible.is_empty() {
            content = content.push(empty_state(
                "No Disapproved Travelers",
                "No disapproved travelers in database.",
            ));
        } else {
            for traveler in visible {
                content = content.push(self.traveler_card(traveler));
            }
        }

        dashboard(
            "Checkpoint Authority",
            self.status.as_ref(),
            ScreenMessage::ParentMessage(ParentMessage::LoggedOut(Role::Authority)),
            content.into(),
        )
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            CheckpointMessage::Refresh => {
                let client = self.client.clone();
                Task::perform(
                    async move { client.disapproved_travelers(Role::Authority).await },
                    |result| ScreenMessage::ScreenMessage(CheckpointMessage::Fetched(result)),
                )
            }
            CheckpointMessage::Fetched(result) => {
                if let Err(error) = &result {
                    self.status = Some(ToastLine::error(error.to_string()));
                }
                self.roster.apply_fetch(result);
                Task::none()
            }
            CheckpointMessage::QrInputChanged(value) => {
                self.qr_input = value;
                Task::none()
            }
            CheckpointMessage::Scan => {
                if self.scanning {
                    return Task::none();
                }
                self.scanning = true;
                let client = self.client.clone();
                let qr_data = self.qr_input.clone();
                Task::perform(async move { client.scan_qr(&qr_data).await }, |result| {
                    ScreenMessage::ScreenMessage(CheckpointMessage::ScanFinished(result))
                })
            }
            CheckpointMessage::ScanFinished(result) => {
                self.scanning = false;
                match result {
                    Ok(outcome) => {
                        self.outcome = Some(outcome);
                        self.status = None;
                    }
                    Err(error) => {
                        self.outcome = None;
                        self.status = Some(ToastLine::error(error.to_string()));
                    }
                }
                Task::none()
            }
            CheckpointMessage::LevyRequested { aadhar, amount } => {
                if self.levy_busy {
                    return Task::none();
                }
                let prompt = format!(
                    "Are you sure you want to levy a penalty of \u{20b9}{} on Aadhar: {}?",
                    amount, aadhar
                );
                Task::perform(confirm("Levy penalty", prompt), move |confirmed| {
                    ScreenMessage::ScreenMessage(CheckpointMessage::LevyConfirmed {
                        aadhar: aadhar.clone(),
                        amount,
                        confirmed,
                    })
                })
            }
            CheckpointMessage::LevyConfirmed {
                confirmed: false, ..
            } => Task::none(),
            CheckpointMessage::LevyConfirmed { aadhar, amount, .. } => {
                self.levy_busy = true;
                let client = self.client.clone();
                Task::perform(
                    async move {
                        client
                            .levy_penalty(&aadhar, amount, PENALTY_REASON)
                            .await
                    },
                    |result| ScreenMessage::ScreenMessage(CheckpointMessage::LevyFinished(result)),
                )
            }
            CheckpointMessage::LevyFinished(result) => {
                self.levy_busy = false;
                self.status = Some(match result {
                    Ok(message) => ToastLine::success(message),
                    Err(error) => ToastLine::error(error.to_string()),
                });
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        Poll::new(Role::Authority.poll_interval())
            .subscription(ScreenMessage::ScreenMessage(CheckpointMessage::Refresh))
    }
}
