use std::time::Duration;

use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, pick_list, row, text, text_input},
};

use crate::core::api::{ApiError, Credentials, Role, SessionApi};
use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
    widgets::{ToastLine, toast},
};

/// Pause between the success message and the dashboard switch, so the
/// confirmation is actually readable.
const REDIRECT_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone)]
pub struct LandingScreen {
    role: Role,
    email: String,
    aadhar: String,
    login_id: String,
    password: String,
    status: Option<ToastLine>,
    submitting: bool,
}

#[derive(Debug, Clone)]
pub enum LandingMessage {
    RolePicked(Role),
    EmailChanged(String),
    AadharChanged(String),
    LoginIdChanged(String),
    PasswordChanged(String),
    Submit,
    LoginFinished(Result<String, ApiError>),
    RedirectNow,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    LoggedIn(Role),
    StartApplication,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self {
            role: Role::Migrant,
            email: String::new(),
            aadhar: String::new(),
            login_id: String::new(),
            password: String::new(),
            status: None,
            submitting: false,
        }
    }

    fn credentials(&self) -> Credentials {
        match self.role {
            Role::Migrant => Credentials::Migrant {
                email: self.email.clone(),
                aadhar: self.aadhar.clone(),
            },
            Role::Doctor => Credentials::Doctor {
                doctor_id: self.login_id.clone(),
                password: self.password.clone(),
            },
            Role::Official => Credentials::Official {
                official_id: self.login_id.clone(),
                password: self.password.clone(),
            },
            Role::HealthAdmin => Credentials::HealthAdmin {
                admin_id: self.login_id.clone(),
                password: self.password.clone(),
            },
            Role::Authority => Credentials::Authority {
                authority_id: self.login_id.clone(),
                password: self.password.clone(),
            },
        }
    }

    fn role_fields(&self) -> Element<'_, ScreenMessage<Self>> {
        let msg = |m: LandingMessage| ScreenMessage::ScreenMessage(m);
        match self.role {
            Role::Migrant => column![
                text("Email").size(13),
                text_input("your.email@example.com", &self.email)
                    .on_input(move |v| msg(LandingMessage::EmailChanged(v))),
                text("Aadhar").size(13),
                text_input("12-digit Aadhar number", &self.aadhar)
                    .on_input(move |v| msg(LandingMessage::AadharChanged(v))),
                text("New applicant? Use the Apply button below.").size(12),
            ],
            role => {
                let id_label = match role {
                    Role::Doctor => "Doctor ID",
                    Role::Official => "Official ID",
                    Role::HealthAdmin => "Admin ID",
                    _ => "Authority ID",
                };
                column![
                    text(id_label).size(13),
                    text_input("e.g., 0010", &self.login_id)
                        .on_input(move |v| msg(LandingMessage::LoginIdChanged(v))),
                    text("Password").size(13),
                    text_input("Enter your password", &self.password)
                        .secure(true)
                        .on_input(move |v| msg(LandingMessage::PasswordChanged(v))),
                ]
            }
        }
        .spacing(8)
        .into()
    }
}

impl Screen for LandingScreen {
    type Message = LandingMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let submit_label = if self.submitting {
            "Logging in..."
        } else {
            "Login"
        };
        let mut form = column![
            text("ClearPass").size(32),
            text("Government Travel Clearance"),
            pick_list(Role::ALL, Some(self.role), |role| {
                ScreenMessage::ScreenMessage(LandingMessage::RolePicked(role))
            }),
            self.role_fields(),
        ]
        .spacing(16)
        .max_width(420)
        .align_x(Center);

        let mut actions = row![
            button(submit_label).on_press_maybe(
                (!self.submitting).then_some(ScreenMessage::ScreenMessage(LandingMessage::Submit))
            ),
        ]
        .spacing(16);
        if self.role == Role::Migrant {
            actions = actions.push(
                button("Apply Here")
                    .style(button::secondary)
                    .on_press(ScreenMessage::ParentMessage(ParentMessage::StartApplication)),
            );
        }
        form = form.push(actions);
        if let Some(line) = &self.status {
            form = form.push(toast(line.clone()));
        }

        container(form)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LandingMessage::RolePicked(role) => {
                self.role = role;
                self.email.clear();
                self.aadhar.clear();
                self.login_id.clear();
                self.password.clear();
                self.status = None;
                Task::none()
            }
            LandingMessage::EmailChanged(value) => {
                self.email = value;
                Task::none()
            }
            LandingMessage::AadharChanged(value) => {
                self.aadhar = value;
                Task::none()
            }
            LandingMessage::LoginIdChanged(value) => {
                self.login_id = value;
                Task::none()
            }
            LandingMessage::PasswordChanged(value) => {
                self.password = value;
                Task::none()
            }
            LandingMessage::Submit => {
                if self.submitting {
                    return Task::none();
                }
                self.submitting = true;
                self.status = None;
                let client = state.client.clone();
                let credentials = self.credentials();
                Task::perform(
                    async move { client.login(&credentials).await },
                    |result| ScreenMessage::ScreenMessage(LandingMessage::LoginFinished(result)),
                )
            }
            LandingMessage::LoginFinished(Ok(_message)) => {
                self.status = Some(ToastLine::success("Login successful! Redirecting..."));
                // Form stays locked; the redirect is already in flight.
                Task::perform(tokio::time::sleep(REDIRECT_DELAY), |_| {
                    ScreenMessage::ScreenMessage(LandingMessage::RedirectNow)
                })
            }
            LandingMessage::LoginFinished(Err(error)) => {
                self.status = Some(ToastLine::error(error.to_string()));
                self.submitting = false;
                Task::none()
            }
            LandingMessage::RedirectNow => Task::done(ScreenMessage::ParentMessage(
                ParentMessage::LoggedIn(self.role),
            )),
        }
    }
}
