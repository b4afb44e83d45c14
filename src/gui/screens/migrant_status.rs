use std::path::PathBuf;

use iced::{
    Alignment::Center,
    Element, Subscription, Task,
    widget::{button, column, row, text, text_input},
};
use rfd::AsyncFileDialog;

use crate::core::api::{
    ApiError, ClearanceClient, DocumentApi, MigrantApi, Role, clearance_path, health_warning_path,
    stamped_filename,
};
use crate::gui::{
    AppState,
    download::save_document,
    poll::Poll,
    screens::{Screen, ScreenMessage},
    widgets::{ToastLine, badges_row, card_frame, dashboard, empty_state, field_line},
};
use crate::models::{ApplicationForm, ApplicationRecord, ApprovalStatus, CardField};

/// Migrant home: live approval status for an existing application, the
/// clearance/warning downloads, and the application form for newcomers
/// who arrived via "Apply Here" (no session yet).
#[derive(Debug, Clone)]
pub struct MigrantStatusScreen {
    client: ClearanceClient,
    record: Option<ApplicationRecord>,
    status: Option<ToastLine>,
    form: ApplicationDraft,
    show_form: bool,
    submitting: bool,
    downloading: bool,
}

#[derive(Debug, Clone, Default)]
struct ApplicationDraft {
    name: String,
    aadhar: String,
    source: String,
    destination: String,
    medium_of_travel: String,
    email: String,
    report: Option<(String, Vec<u8>)>,
}

#[derive(Debug, Clone)]
pub enum MigrantMessage {
    Refresh,
    StatusFetched(Result<ApplicationRecord, ApiError>),
    FormName(String),
    FormAadhar(String),
    FormSource(String),
    FormDestination(String),
    FormMedium(String),
    FormEmail(String),
    PickReport,
    ReportPicked(Option<(String, Vec<u8>)>),
    SubmitApplication,
    ApplyFinished(Result<String, ApiError>),
    DownloadClearance,
    DownloadWarning,
    DownloadFinished(Result<Option<PathBuf>, String>),
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    LoggedOut(Role),
}

impl MigrantStatusScreen {
    /// Entered after a successful login: status polling starts at once.
    pub fn open(client: ClearanceClient) -> (Self, Task<ScreenMessage<Self>>) {
        let screen = Self::with_form(client, false);
        (
            screen,
            Task::done(ScreenMessage::ScreenMessage(MigrantMessage::Refresh)),
        )
    }

    /// Entered via "Apply Here": no session yet, so no initial fetch. The
    /// first successful submission establishes the session and the status
    /// panel fills in from there.
    pub fn open_for_application(client: ClearanceClient) -> (Self, Task<ScreenMessage<Self>>) {
        (Self::with_form(client, true), Task::none())
    }

    fn with_form(client: ClearanceClient, show_form: bool) -> Self {
        Self {
            client,
            record: None,
            status: None,
            form: ApplicationDraft::default(),
            show_form,
            submitting: false,
            downloading: false,
        }
    }

    fn download(&mut self, path: String, fallback: &'static str, prefix: &'static str) -> Task<ScreenMessage<Self>> {
        self.downloading = true;
        let client = self.client.clone();
        Task::perform(
            async move {
                let bytes = client
                    .fetch_document(&path, fallback)
                    .await
                    .map_err(|e| e.to_string())?;
                save_document(bytes, stamped_filename(prefix))
                    .await
                    .map_err(|e| e.to_string())
            },
            |result| ScreenMessage::ScreenMessage(MigrantMessage::DownloadFinished(result)),
        )
    }

    fn status_panel(&self) -> Element<'_, ScreenMessage<Self>> {
        let Some(record) = &self.record else {
            return empty_state(
                "No application on file.",
                "Submit the application form below to start the clearance process.",
            );
        };
        let body = record.summary_card();
        let ready = record.clearance_ready();
        let rejected = record.doctor_approval == ApprovalStatus::Rejected;
        let can_download = !self.downloading;

        let panel = column![
            row![text("Application Status").size(18), badges_row(body.badges)]
                .spacing(16)
                .align_y(Center),
            field_line(CardField::new("Application ID", record.id.clone())),
            field_line(CardField::new("Route", record.route())),
            row![
                button(if self.downloading {
                    "Downloading..."
                } else {
                    "Download Clearance"
                })
                .on_press_maybe((ready && can_download).then_some(
                    ScreenMessage::ScreenMessage(MigrantMessage::DownloadClearance)
                )),
                button("Download Health Warning").style(button::secondary).on_press_maybe(
                    (rejected && can_download).then_some(ScreenMessage::ScreenMessage(
                        MigrantMessage::DownloadWarning
                    ))
                ),
            ]
            .spacing(12),
        ]
        .spacing(10);
        card_frame(panel)
    }

    fn application_form(&self) -> Element<'_, ScreenMessage<Self>> {
        let msg = ScreenMessage::ScreenMessage;
        let report_label = match &self.form.report {
            Some((name, _)) => name.as_str(),
            None => "No file selected",
        };
        let form = column![
            text("New Travel Application").size(18),
            text_input("Full name", &self.form.name)
                .on_input(move |v| msg(MigrantMessage::FormName(v))),
            text_input("12-digit Aadhar number", &self.form.aadhar)
                .on_input(move |v| msg(MigrantMessage::FormAadhar(v))),
            text_input("Source", &self.form.source)
                .on_input(move |v| msg(MigrantMessage::FormSource(v))),
            text_input("Destination", &self.form.destination)
                .on_input(move |v| msg(MigrantMessage::FormDestination(v))),
            text_input("Medium of travel", &self.form.medium_of_travel)
                .on_input(move |v| msg(MigrantMessage::FormMedium(v))),
            text_input("Email", &self.form.email)
                .on_input(move |v| msg(MigrantMessage::FormEmail(v))),
            row![
                button("Select Medical Report")
                    .style(button::secondary)
                    .on_press(msg(MigrantMessage::PickReport)),
                text(report_label).size(13),
            ]
            .spacing(12)
            .align_y(Center),
            button(if self.submitting {
                "Submitting..."
            } else {
                "Submit Application"
            })
            .on_press_maybe(
                (!self.submitting).then_some(msg(MigrantMessage::SubmitApplication))
            ),
        ]
        .spacing(10);
        card_frame(form)
    }
}

impl Screen for MigrantStatusScreen {
    type Message = MigrantMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut content = column![self.status_panel()].spacing(16);
        if self.show_form || self.record.is_none() {
            content = content.push(self.application_form());
        }
        dashboard(
            "Migrant Dashboard",
            self.status.as_ref(),
            ScreenMessage::ParentMessage(ParentMessage::LoggedOut(Role::Migrant)),
            content.into(),
        )
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            MigrantMessage::Refresh => {
                let client = self.client.clone();
                Task::perform(async move { client.own_status().await }, |result| {
                    ScreenMessage::ScreenMessage(MigrantMessage::StatusFetched(result))
                })
            }
            MigrantMessage::StatusFetched(Ok(record)) => {
                self.record = Some(record);
                Task::none()
            }
            MigrantMessage::StatusFetched(Err(error)) => {
                // Keep the last known status visible; only surface the error.
                if self.record.is_some() || !self.show_form {
                    self.status = Some(ToastLine::error(error.to_string()));
                }
                Task::none()
            }
            MigrantMessage::FormName(v) => {
                self.form.name = v;
                Task::none()
            }
            MigrantMessage::FormAadhar(v) => {
                self.form.aadhar = v;
                Task::none()
            }
            MigrantMessage::FormSource(v) => {
                self.form.source = v;
                Task::none()
            }
            MigrantMessage::FormDestination(v) => {
                self.form.destination = v;
                Task::none()
            }
            MigrantMessage::FormMedium(v) => {
                self.form.medium_of_travel = v;
                Task::none()
            }
            MigrantMessage::FormEmail(v) => {
                self.form.email = v;
                Task::none()
            }
            MigrantMessage::PickReport => Task::perform(
                async move {
                    let Some(handle) = AsyncFileDialog::new()
                        .set_title("Select medical report")
                        .add_filter("Documents", &["pdf", "png", "jpg", "jpeg"])
                        .pick_file()
                        .await
                    else {
                        return None;
                    };
                    let bytes = handle.read().await;
                    Some((handle.file_name(), bytes))
                },
                |file| ScreenMessage::ScreenMessage(MigrantMessage::ReportPicked(file)),
            ),
            MigrantMessage::ReportPicked(file) => {
                if file.is_some() {
                    self.form.report = file;
                }
                Task::none()
            }
            MigrantMessage::SubmitApplication => {
                if self.submitting {
                    return Task::none();
                }
                let Some((file_name, bytes)) = self.form.report.clone() else {
                    self.status = Some(ToastLine::error("Medical report file is required"));
                    return Task::none();
                };
                self.submitting = true;
                self.status = None;
                let client = self.client.clone();
                let form = ApplicationForm {
                    name: self.form.name.clone(),
                    aadhar: self.form.aadhar.clone(),
                    source: self.form.source.clone(),
                    destination: self.form.destination.clone(),
                    medium_of_travel: self.form.medium_of_travel.clone(),
                    email: self.form.email.clone(),
                };
                Task::perform(
                    async move { client.apply(&form, &file_name, bytes).await },
                    |result| ScreenMessage::ScreenMessage(MigrantMessage::ApplyFinished(result)),
                )
            }
            MigrantMessage::ApplyFinished(result) => {
                self.submitting = false;
                match result {
                    Ok(message) => {
                        self.status = Some(ToastLine::success(message));
                        self.form = ApplicationDraft::default();
                        self.show_form = false;
                        Task::done(ScreenMessage::ScreenMessage(MigrantMessage::Refresh))
                    }
                    Err(error) => {
                        self.status = Some(ToastLine::error(error.to_string()));
                        Task::none()
                    }
                }
            }
            MigrantMessage::DownloadClearance => {
                if self.downloading {
                    return Task::none();
                }
                self.download(clearance_path(), "Cannot download yet", "travel_clearance")
            }
            MigrantMessage::DownloadWarning => {
                if self.downloading {
                    return Task::none();
                }
                self.download(
                    health_warning_path(),
                    "Failed to download",
                    "health_warning",
                )
            }
            MigrantMessage::DownloadFinished(result) => {
                self.downloading = false;
                self.status = Some(match result {
                    Ok(Some(path)) => {
                        ToastLine::success(format!("Saved to {}", path.display()))
                    }
                    // Dismissed save dialog: not an error, nothing to say.
                    Ok(None) => return Task::none(),
                    Err(message) => ToastLine::error(message),
                });
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        if self.record.is_none() && self.show_form {
            // Nothing to poll until the application exists.
            return Subscription::none();
        }
        Poll::new(Role::Migrant.poll_interval())
            .subscription(ScreenMessage::ScreenMessage(MigrantMessage::Refresh))
    }
}
