use iced::{
    Alignment::Center,
    Element, Subscription, Task,
    widget::{button, column, horizontal_space, mouse_area, pick_list, row, text, text_input},
};
use rfd::AsyncFileDialog;
use time::format_description::well_known::Iso8601;

use crate::core::api::{
    ApiError, ClearanceClient, Decision, DecisionUpload, DirectoryApi, NewDoctor, Role, RosterApi,
};
use crate::gui::{
    AppState,
    download::confirm,
    poll::Poll,
    screens::{Screen, ScreenMessage},
    widgets::{ToastLine, badges_row, card_frame, dashboard, empty_state, fields_column, modal, toast},
};
use crate::models::{ApplicationRecord, HealthForm, Tier};
use crate::viewmodel::Roster;

/// Doctor and official dashboards share this screen: the same polled
/// roster, search and expand/collapse behavior, differing only in how a
/// decision is packaged and in the official's extra account panel.
#[derive(Debug, Clone)]
pub struct ReviewDashboardScreen {
    client: ClearanceClient,
    role: Role,
    roster: Roster<ApplicationRecord>,
    status: Option<ToastLine>,
    busy: Option<String>,
    health_form: Option<HealthFormDraft>,
    new_doctor_id: String,
    new_doctor_password: String,
    creating_doctor: bool,
    create_status: Option<ToastLine>,
}

#[derive(Debug, Clone)]
pub struct HealthFormDraft {
    migrant_id: String,
    name: String,
    age: String,
    current_address: String,
    email: String,
    phone_number: String,
    disease_name: String,
    tier: Tier,
    expected_recovery_date: String,
    error: Option<String>,
}

impl HealthFormDraft {
    fn for_record(record: &ApplicationRecord) -> Self {
        Self {
            migrant_id: record.id.clone(),
            name: record.name.clone(),
            age: String::new(),
            current_address: String::new(),
            email: record.email.clone().unwrap_or_default(),
            phone_number: String::new(),
            disease_name: String::new(),
            tier: Tier::One,
            expected_recovery_date: String::new(),
            error: None,
        }
    }

    fn build(&self) -> Result<HealthForm, String> {
        let age: u32 = self
            .age
            .trim()
            .parse()
            .map_err(|_| "Enter a valid age".to_string())?;
        if !(1..=120).contains(&age) {
            return Err("Enter a valid age".to_string());
        }
        let required = [
            &self.name,
            &self.current_address,
            &self.email,
            &self.phone_number,
            &self.disease_name,
            &self.expected_recovery_date,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err("All health fields are required".to_string());
        }
        let date = self.expected_recovery_date.trim();
        if time::Date::parse(date, &Iso8601::DEFAULT).is_err() {
            return Err("Recovery date must be YYYY-MM-DD".to_string());
        }
        Ok(HealthForm {
            name: self.name.trim().to_string(),
            age,
            current_address: self.current_address.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            disease_name: self.disease_name.trim().to_string(),
            tier: self.tier,
            expected_recovery_date: date.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub enum ReviewMessage {
    Refresh,
    Fetched(Result<Vec<ApplicationRecord>, ApiError>),
    QueryChanged(String),
    ToggleCard(String),
    DecideRequested {
        id: String,
        decision: Decision,
    },
    ConfirmResolved {
        id: String,
        decision: Decision,
        confirmed: bool,
    },
    LetterPicked {
        id: String,
        file: Option<(String, Vec<u8>)>,
    },
    HealthForm(HealthFormMessage),
    DecisionFinished(Result<String, ApiError>),
    NewDoctorIdChanged(String),
    NewDoctorPasswordChanged(String),
    CreateDoctor,
    CreateDoctorFinished(Result<String, ApiError>),
}

#[derive(Debug, Clone)]
pub enum HealthFormMessage {
    Name(String),
    Age(String),
    Address(String),
    Email(String),
    Phone(String),
    Disease(String),
    TierPicked(Tier),
    RecoveryDate(String),
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    LoggedOut(Role),
}

impl ReviewDashboardScreen {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn open(client: ClearanceClient, role: Role) -> (Self, Task<ScreenMessage<Self>>) {
        let screen = Self {
            client,
            role,
            roster: Roster::new(),
            status: None,
            busy: None,
            health_form: None,
            new_doctor_id: String::new(),
            new_doctor_password: String::new(),
            creating_doctor: false,
            create_status: None,
        };
        (
            screen,
            Task::done(ScreenMessage::ScreenMessage(ReviewMessage::Refresh)),
        )
    }

    fn fetch(&self) -> Task<ScreenMessage<Self>> {
        let client = self.client.clone();
        let role = self.role;
        // With no local snapshot yet, the search has to be answered
        // server-side; afterwards the cached list is narrowed locally.
        let filter = (!self.roster.has_cache())
            .then(|| self.roster.query().trim().to_string())
            .filter(|q| !q.is_empty());
        Task::perform(
            async move { client.migrants(role, filter.as_deref()).await },
            |result| ScreenMessage::ScreenMessage(ReviewMessage::Fetched(result)),
        )
    }

    fn submit(&mut self, id: String, upload: DecisionUpload) -> Task<ScreenMessage<Self>> {
        self.busy = Some(id.clone());
        let client = self.client.clone();
        let role = self.role;
        Task::perform(
            async move { client.decide(role, &id, upload).await },
            |result| ScreenMessage::ScreenMessage(ReviewMessage::DecisionFinished(result)),
        )
    }

    fn record_name(&self, id: &str) -> String {
        self.roster
            .records()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.clone())
            .unwrap_or_default()
    }

    fn application_card(&self, record: &ApplicationRecord) -> Element<'_, ScreenMessage<Self>> {
        let body = record.summary_card();
        let is_busy = self.busy.as_deref() == Some(record.id.as_str());
        let can_act = self.busy.is_none();
        let id = record.id.clone();

        let mut inner = column![
            row![
                text(body.title).size(18),
                horizontal_space(),
                badges_row(body.badges),
            ]
            .spacing(12)
            .align_y(Center),
            fields_column(body.fields),
        ]
        .spacing(8);

        if self.roster.is_expanded(&record.id) {
            inner = inner.push(fields_column(record.detail_fields()));
        }

        let approve_id = id.clone();
        let reject_id = id.clone();
        let actions = row![
            button(if is_busy { "Submitting..." } else { "Approve" })
                .style(button::success)
                .on_press_maybe(can_act.then(|| {
                    ScreenMessage::ScreenMessage(ReviewMessage::DecideRequested {
                        id: approve_id,
                        decision: Decision::Approved,
                    })
                })),
            button(if is_busy { "Submitting..." } else { "Reject" })
                .style(button::danger)
                .on_press_maybe(can_act.then(|| {
                    ScreenMessage::ScreenMessage(ReviewMessage::DecideRequested {
                        id: reject_id,
                        decision: Decision::Rejected,
                    })
                })),
        ]
        .spacing(12);
        inner = inner.push(actions);

        mouse_area(card_frame(inner))
            .on_press(ScreenMessage::ScreenMessage(ReviewMessage::ToggleCard(id)))
            .into()
    }

    fn create_doctor_panel(&self) -> Element<'_, ScreenMessage<Self>> {
        let msg = ScreenMessage::ScreenMessage;
        let mut panel = column![
            text("Create Doctor Account").size(18),
            text_input("Doctor ID", &self.new_doctor_id)
                .on_input(move |v| msg(ReviewMessage::NewDoctorIdChanged(v))),
            text_input("Password", &self.new_doctor_password)
                .secure(true)
                .on_input(move |v| msg(ReviewMessage::NewDoctorPasswordChanged(v))),
            button(if self.creating_doctor {
                "Creating..."
            } else {
                "Create Doctor"
            })
            .on_press_maybe((!self.creating_doctor).then_some(msg(ReviewMessage::CreateDoctor))),
        ]
        .spacing(10);
        if let Some(line) = &self.create_status {
            panel = panel.push(toast(line.clone()));
        }
        card_frame(panel)
    }

    fn health_form_view<'a>(&'a self, draft: &'a HealthFormDraft) -> Element<'a, ScreenMessage<Self>> {
        let msg = |m: HealthFormMessage| ScreenMessage::ScreenMessage(ReviewMessage::HealthForm(m));
        let mut form = column![
            text("Traveler Health Information").size(20),
            text("Recorded with the rejection and forwarded to the health administration.").size(13),
            text_input("Full name", &draft.name).on_input(move |v| msg(HealthFormMessage::Name(v))),
            text_input("Age", &draft.age).on_input(move |v| msg(HealthFormMessage::Age(v))),
            text_input("Current address", &draft.current_address)
                .on_input(move |v| msg(HealthFormMessage::Address(v))),
            text_input("Email", &draft.email).on_input(move |v| msg(HealthFormMessage::Email(v))),
            text_input("Phone number", &draft.phone_number)
                .on_input(move |v| msg(HealthFormMessage::Phone(v))),
            text_input("Disease name", &draft.disease_name)
                .on_input(move |v| msg(HealthFormMessage::Disease(v))),
            row![
                text("Severity").size(13),
                pick_list(Tier::ALL, Some(draft.tier), move |tier| msg(
                    HealthFormMessage::TierPicked(tier)
                )),
            ]
            .spacing(10)
            .align_y(Center),
            text_input("Expected recovery date (YYYY-MM-DD)", &draft.expected_recovery_date)
                .on_input(move |v| msg(HealthFormMessage::RecoveryDate(v))),
        ]
        .spacing(10)
        .max_width(440);

        if let Some(error) = &draft.error {
            form = form.push(toast(ToastLine::error(error.clone())));
        }
        form = form.push(
            row![
                button("Cancel")
                    .style(button::secondary)
                    .on_press(msg(HealthFormMessage::Cancel)),
                button("Submit Rejection")
                    .style(button::danger)
                    .on_press(msg(HealthFormMessage::Submit)),
            ]
            .spacing(12),
        );
        card_frame(form)
    }
}

impl Screen for ReviewDashboardScreen {
    type Message = ReviewMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut content = column![
            text_input("Search by Aadhar number...", self.roster.query()).on_input(|v| {
                ScreenMessage::ScreenMessage(ReviewMessage::QueryChanged(v))
            }),
        ]
        .spacing(12);

        let visible = self.roster.visible();
        if visible.is_empty() {
            content = content.push(empty_state(
                "No applications found.",
                "Pending applications will appear here.",
            ));
        } else {
            for record in visible {
                content = content.push(self.application_card(record));
            }
        }

        if self.role == Role::Official {
            content = content.push(self.create_doctor_panel());
        }

        let title = match self.role {
            Role::Doctor => "Doctor Dashboard",
            _ => "Official Dashboard",
        };
        let base = dashboard(
            title,
            self.status.as_ref(),
            ScreenMessage::ParentMessage(ParentMessage::LoggedOut(self.role)),
            content.into(),
        );

        match &self.health_form {
            Some(draft) => modal(
                base,
                self.health_form_view(draft),
                ScreenMessage::ScreenMessage(ReviewMessage::HealthForm(HealthFormMessage::Cancel)),
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
            ReviewMessage::Refresh => self.fetch(),
            ReviewMessage::Fetched(result) => {
                if let Err(error) = &result {
                    self.status = Some(ToastLine::error(error.to_string()));
                }
                self.roster.apply_fetch(result);
                Task::none()
            }
            ReviewMessage::QueryChanged(query) => {
                self.roster.set_query(query);
                if self.roster.has_cache() {
                    // Narrowing happens in view(); nothing to fetch.
                    Task::none()
                } else {
                    self.fetch()
                }
            }
            ReviewMessage::ToggleCard(id) => {
                self.roster.toggle(&id);
                Task::none()
            }
            ReviewMessage::DecideRequested { id, decision } => {
                if self.busy.is_some() {
                    return Task::none();
                }
                let name = self.record_name(&id);
                let verb = match decision {
                    Decision::Approved => "Approve",
                    Decision::Rejected => "Reject",
                };
                let prompt = format!("{} the application of {}?", verb, name);
                Task::perform(confirm("Confirm decision", prompt), move |confirmed| {
                    ScreenMessage::ScreenMessage(ReviewMessage::ConfirmResolved {
                        id: id.clone(),
                        decision,
                        confirmed,
                    })
                })
            }
            ReviewMessage::ConfirmResolved {
                confirmed: false, ..
            } => Task::none(),
            ReviewMessage::ConfirmResolved { id, decision, .. } => {
                match (self.role, decision) {
                    (Role::Doctor, Decision::Rejected) => {
                        if let Some(record) = self.roster.records().iter().find(|r| r.id == id) {
                            self.health_form = Some(HealthFormDraft::for_record(record));
                        }
                        Task::none()
                    }
                    (Role::Doctor, Decision::Approved) => {
                        self.submit(id, DecisionUpload::Plain(Decision::Approved))
                    }
                    (_, Decision::Rejected) => self.submit(
                        id,
                        DecisionUpload::Form {
                            decision: Decision::Rejected,
                            approval_letter: None,
                        },
                    ),
                    (_, Decision::Approved) => Task::perform(
                        async move {
                            let Some(handle) = AsyncFileDialog::new()
                                .set_title("Select approval letter")
                                .add_filter("Documents", &["pdf", "png", "jpg", "jpeg"])
                                .pick_file()
                                .await
                            else {
                                return None;
                            };
                            let bytes = handle.read().await;
                            Some((handle.file_name(), bytes))
                        },
                        move |file| {
                            ScreenMessage::ScreenMessage(ReviewMessage::LetterPicked {
                                id: id.clone(),
                                file,
                            })
                        },
                    ),
                }
            }
            ReviewMessage::LetterPicked { file: None, .. } => {
                self.status = Some(ToastLine::error("Approval letter is required"));
                Task::none()
            }
            ReviewMessage::LetterPicked {
                id,
                file: Some((file_name, bytes)),
            } => self.submit(
                id,
                DecisionUpload::Form {
                    decision: Decision::Approved,
                    approval_letter: Some((file_name, bytes)),
                },
            ),
            ReviewMessage::HealthForm(form_message) => {
                let Some(draft) = self.health_form.as_mut() else {
                    return Task::none();
                };
                match form_message {
                    HealthFormMessage::Name(v) => draft.name = v,
                    HealthFormMessage::Age(v) => draft.age = v,
                    HealthFormMessage::Address(v) => draft.current_address = v,
                    HealthFormMessage::Email(v) => draft.email = v,
                    HealthFormMessage::Phone(v) => draft.phone_number = v,
                    HealthFormMessage::Disease(v) => draft.disease_name = v,
                    HealthFormMessage::TierPicked(tier) => draft.tier = tier,
                    HealthFormMessage::RecoveryDate(v) => draft.expected_recovery_date = v,
                    HealthFormMessage::Cancel => {
                        // Abort the whole decision; nothing was sent.
                        self.health_form = None;
                        return Task::none();
                    }
                    HealthFormMessage::Submit => {
                        return match draft.build() {
                            Ok(form) => {
                                let id = draft.migrant_id.clone();
                                self.health_form = None;
                                self.submit(id, DecisionUpload::WithHealthForm(form))
                            }
                            Err(error) => {
                                draft.error = Some(error);
                                Task::none()
                            }
                        };
                    }
                }
                Task::none()
            }
            ReviewMessage::DecisionFinished(result) => {
                self.busy = None;
                self.status = Some(match result {
                    Ok(message) => ToastLine::success(message),
                    Err(error) => ToastLine::error(error.to_string()),
                });
                // Whatever happened, show the roster as the server now has it.
                Task::done(ScreenMessage::ScreenMessage(ReviewMessage::Refresh))
            }
            ReviewMessage::NewDoctorIdChanged(value) => {
                self.new_doctor_id = value;
                Task::none()
            }
            ReviewMessage::NewDoctorPasswordChanged(value) => {
                self.new_doctor_password = value;
                Task::none()
            }
            ReviewMessage::CreateDoctor => {
                if self.creating_doctor {
                    return Task::none();
                }
                self.creating_doctor = true;
                self.create_status = None;
                let client = self.client.clone();
                let new_doctor = NewDoctor {
                    doctor_id: self.new_doctor_id.clone(),
                    password: self.new_doctor_password.clone(),
                };
                Task::perform(
                    async move { client.create_doctor(&new_doctor).await },
                    |result| {
                        ScreenMessage::ScreenMessage(ReviewMessage::CreateDoctorFinished(result))
                    },
                )
            }
            ReviewMessage::CreateDoctorFinished(result) => {
                self.creating_doctor = false;
                self.create_status = Some(match result {
                    Ok(message) => {
                        self.new_doctor_id.clear();
                        self.new_doctor_password.clear();
                        ToastLine::success(message)
                    }
                    Err(error) => ToastLine::error(error.to_string()),
                });
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        Poll::new(self.role.poll_interval())
            .subscription(ScreenMessage::ScreenMessage(ReviewMessage::Refresh))
    }
}
