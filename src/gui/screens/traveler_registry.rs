use std::path::PathBuf;

use iced::{
    Alignment::Center,
    Element, Length, Subscription, Task,
    widget::{button, column, horizontal_space, mouse_area, row, scrollable, text, text_input},
};

use crate::core::api::{
    ApiError, ClearanceClient, DocumentApi, Role, TravelerApi, stamped_filename,
    warning_letter_path,
};
use crate::gui::{
    AppState,
    download::save_document,
    poll::Poll,
    screens::{Screen, ScreenMessage},
    widgets::{ToastLine, badges_row, card_frame, dashboard, empty_state, fields_column, modal},
};
use crate::models::DisapprovedTraveler;
use crate::viewmodel::Roster;

/// Health-administration dashboard: the registry of disapproved
/// travelers, a per-traveler detail overlay, QR issuance and the
/// warning-letter download.
#[derive(Debug, Clone)]
pub struct TravelerRegistryScreen {
    client: ClearanceClient,
    roster: Roster<DisapprovedTraveler>,
    status: Option<ToastLine>,
    detail: Option<DisapprovedTraveler>,
    qr_busy: bool,
    downloading: bool,
}

#[derive(Debug, Clone)]
pub enum RegistryMessage {
    Refresh,
    Fetched(Result<Vec<DisapprovedTraveler>, ApiError>),
    QueryChanged(String),
    OpenDetail(String),
    DetailFetched(Result<DisapprovedTraveler, ApiError>),
    CloseDetail,
    UpdateQr(String),
    QrFinished {
        traveler_id: String,
        result: Result<String, ApiError>,
    },
    DownloadLetter(String),
    DownloadFinished(Result<Option<PathBuf>, String>),
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    LoggedOut(Role),
}

impl TravelerRegistryScreen {
    pub fn open(client: ClearanceClient) -> (Self, Task<ScreenMessage<Self>>) {
        let screen = Self {
            client,
            roster: Roster::new(),
            status: None,
            detail: None,
            qr_busy: false,
            downloading: false,
        };
        (
            screen,
            Task::done(ScreenMessage::ScreenMessage(RegistryMessage::Refresh)),
        )
    }

    fn traveler_card(&self, traveler: &DisapprovedTraveler) -> Element<'_, ScreenMessage<Self>> {
        let body = traveler.summary_card();
        let id = traveler.id.clone();
        let inner = column![
            row![
                text(body.title).size(18),
                horizontal_space(),
                badges_row(body.badges),
            ]
            .spacing(12)
            .align_y(Center),
            fields_column(body.fields),
            button("View Details").on_press(ScreenMessage::ScreenMessage(
                RegistryMessage::OpenDetail(id)
            )),
        ]
        .spacing(8);
        card_frame(inner)
    }

    fn detail_view<'a>(&'a self, traveler: &'a DisapprovedTraveler) -> Element<'a, ScreenMessage<Self>> {
        let qr_label = if self.qr_busy {
            "Generating QR & Sending Letter..."
        } else if traveler.qr_generated {
            "QR Already Generated"
        } else {
            "Update QR & Send Health Warning Letter"
        };
        let can_generate = !traveler.qr_generated && !self.qr_busy;
        let traveler_id = traveler.id.clone();

        let mut actions = column![
            button(qr_label).on_press_maybe(can_generate.then(|| {
                ScreenMessage::ScreenMessage(RegistryMessage::UpdateQr(traveler_id.clone()))
            })),
        ]
        .spacing(10);
        if traveler.qr_generated {
            actions = actions.push(
                button(if self.downloading {
                    "Downloading..."
                } else {
                    "Download Warning Letter"
                })
                .style(button::secondary)
                .on_press_maybe((!self.downloading).then(|| {
                    ScreenMessage::ScreenMessage(RegistryMessage::DownloadLetter(
                        traveler_id.clone(),
                    ))
                })),
            );
        }

        let content = column![
            row![
                text("Traveler Details").size(20),
                horizontal_space(),
                button("Close")
                    .style(button::secondary)
                    .on_press(ScreenMessage::ScreenMessage(RegistryMessage::CloseDetail)),
            ]
            .align_y(Center),
            scrollable(fields_column(traveler.detail_fields())).height(Length::Shrink),
            actions,
        ]
        .spacing(14)
        .max_width(480);
        card_frame(content)
    }
}

impl Screen for TravelerRegistryScreen {
    type Message = RegistryMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut content = column![
            text_input("Search by Aadhar number...", self.roster.query()).on_input(|v| {
                ScreenMessage::ScreenMessage(RegistryMessage::QueryChanged(v))
            }),
        ]
        .spacing(12);

        let visible = self.roster.visible();
        if visible.is_empty() {
            content = content.push(empty_state(
                "No Disapproved Travelers",
                "They will appear here once doctors reject applications with health information.",
            ));
        } else {
            for traveler in visible {
                content = content.push(self.traveler_card(traveler));
            }
        }

        let base = dashboard(
            "Health Administration",
            self.status.as_ref(),
            ScreenMessage::ParentMessage(ParentMessage::LoggedOut(Role::HealthAdmin)),
            content.into(),
        );

        match &self.detail {
            Some(traveler) => modal(
                base,
                self.detail_view(traveler),
                ScreenMessage::ScreenMessage(RegistryMessage::CloseDetail),
            ),
            None => base,
        }
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            RegistryMessage::Refresh => {
                let client = self.client.clone();
                Task::perform(
                    async move { client.disapproved_travelers(Role::HealthAdmin).await },
                    |result| ScreenMessage::ScreenMessage(RegistryMessage::Fetched(result)),
                )
            }
            RegistryMessage::Fetched(result) => {
                if let Err(error) = &result {
                    self.status = Some(ToastLine::error(error.to_string()));
                }
                self.roster.apply_fetch(result);
                Task::none()
            }
            RegistryMessage::QueryChanged(query) => {
                self.roster.set_query(query);
                Task::none()
            }
            RegistryMessage::OpenDetail(traveler_id) => {
                let client = self.client.clone();
                Task::perform(
                    async move { client.traveler_detail(&traveler_id).await },
                    |result| ScreenMessage::ScreenMessage(RegistryMessage::DetailFetched(result)),
                )
            }
            RegistryMessage::DetailFetched(Ok(traveler)) => {
                self.detail = Some(traveler);
                Task::none()
            }
            RegistryMessage::DetailFetched(Err(error)) => {
                self.status = Some(ToastLine::error(error.to_string()));
                Task::none()
            }
            RegistryMessage::CloseDetail => {
                self.detail = None;
                Task::none()
            }
            RegistryMessage::UpdateQr(traveler_id) => {
                if self.qr_busy {
                    return Task::none();
                }
                self.qr_busy = true;
                let client = self.client.clone();
                let id = traveler_id.clone();
                Task::perform(
                    async move { client.update_qr(&id).await },
                    move |result| {
                        ScreenMessage::ScreenMessage(RegistryMessage::QrFinished {
                            traveler_id: traveler_id.clone(),
                            result,
                        })
                    },
                )
            }
            RegistryMessage::QrFinished {
                traveler_id,
                result,
            } => {
                self.qr_busy = false;
                match result {
                    Ok(message) => {
                        self.status = Some(ToastLine::success(message));
                        // Refresh the list and re-open the detail so the
                        // qr_generated flag shown is the server's.
                        Task::batch([
                            Task::done(ScreenMessage::ScreenMessage(RegistryMessage::Refresh)),
                            Task::done(ScreenMessage::ScreenMessage(RegistryMessage::OpenDetail(
                                traveler_id,
                            ))),
                        ])
                    }
                    Err(error) => {
                        self.status = Some(ToastLine::error(error.to_string()));
                        Task::none()
                    }
                }
            }
            RegistryMessage::DownloadLetter(traveler_id) => {
                if self.downloading {
                    return Task::none();
                }
                self.downloading = true;
                let client = self.client.clone();
                Task::perform(
                    async move {
                        let bytes = client
                            .fetch_document(&warning_letter_path(&traveler_id), "Failed to download")
                            .await
                            .map_err(|e| e.to_string())?;
                        save_document(bytes, stamped_filename("health_warning"))
                            .await
                            .map_err(|e| e.to_string())
                    },
                    |result| ScreenMessage::ScreenMessage(RegistryMessage::DownloadFinished(result)),
                )
            }
            RegistryMessage::DownloadFinished(result) => {
                self.downloading = false;
                match result {
                    Ok(Some(_path)) => {
                        self.status = Some(ToastLine::success("PDF downloaded successfully!"));
                    }
                    Ok(None) => {}
                    Err(message) => {
                        self.status = Some(ToastLine::error(message));
                    }
                }
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        Poll::new(Role::HealthAdmin.poll_interval())
            .subscription(ScreenMessage::ScreenMessage(RegistryMessage::Refresh))
    }
}
