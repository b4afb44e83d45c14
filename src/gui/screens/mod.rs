pub mod checkpoint;
pub mod landing_page;
pub mod migrant_status;
pub mod review_dashboard;
pub mod traveler_registry;

use iced::{Element, Subscription, Task};

use crate::core::api::{Role, SessionApi};
use crate::gui::{AppState, Message};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone;
    type ParentMessage: std::fmt::Debug + Clone;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        Subscription::none()
    }
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    Landing(landing_page::LandingScreen),
    Review(review_dashboard::ReviewDashboardScreen),
    MigrantStatus(migrant_status::MigrantStatusScreen),
    Registry(traveler_registry::TravelerRegistryScreen),
    Checkpoint(checkpoint::CheckpointScreen),
}

impl ScreenData {
    pub fn role(&self) -> Option<Role> {
        match self {
            ScreenData::Landing(_) => None,
            ScreenData::Review(screen) => Some(screen.role()),
            ScreenData::MigrantStatus(_) => Some(Role::Migrant),
            ScreenData::Registry(_) => Some(Role::HealthAdmin),
            ScreenData::Checkpoint(_) => Some(Role::Authority),
        }
    }

    /// Build the dashboard for a freshly authenticated role, with its
    /// initial fetch already queued.
    fn open_dashboard(role: Role, state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let client = state.client.clone();
        match role {
            Role::Doctor | Role::Official => {
                let (screen, task) = review_dashboard::ReviewDashboardScreen::open(client, role);
                (
                    ScreenData::Review(screen),
                    task.map(Message::Review).map(ScreenMessage::ScreenMessage),
                )
            }
            Role::Migrant => {
                let (screen, task) = migrant_status::MigrantStatusScreen::open(client);
                (
                    ScreenData::MigrantStatus(screen),
                    task.map(Message::Migrant).map(ScreenMessage::ScreenMessage),
                )
            }
            Role::HealthAdmin => {
                let (screen, task) = traveler_registry::TravelerRegistryScreen::open(client);
                (
                    ScreenData::Registry(screen),
                    task.map(Message::Registry).map(ScreenMessage::ScreenMessage),
                )
            }
            Role::Authority => {
                let (screen, task) = checkpoint::CheckpointScreen::open(client);
                (
                    ScreenData::Checkpoint(screen),
                    task.map(Message::Checkpoint)
                        .map(ScreenMessage::ScreenMessage),
                )
            }
        }
    }

    /// Post the logout and return to the landing screen once it has gone
    /// out. The request result is irrelevant; navigation never blocks on it.
    fn logout(state: &AppState, role: Role) -> Task<ScreenMessage<Self>> {
        let client = state.client.clone();
        Task::perform(async move { client.logout(role).await }, |_| {
            ScreenMessage::ScreenMessage(Message::ChangeScreen(ScreenData::Landing(
                landing_page::LandingScreen::new(),
            )))
        })
    }
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = std::convert::Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match self {
            ScreenData::Landing(screen) => screen.view().map(Message::Landing),
            ScreenData::Review(screen) => screen.view().map(Message::Review),
            ScreenData::MigrantStatus(screen) => screen.view().map(Message::Migrant),
            ScreenData::Registry(screen) => screen.view().map(Message::Registry),
            ScreenData::Checkpoint(screen) => screen.view().map(Message::Checkpoint),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::ChangeScreen(screen)) => {
                *x = screen;
                Task::none()
            }
            (ScreenData::Landing(page), Message::Landing(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Landing)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(parent_msg) => match parent_msg {
                    landing_page::ParentMessage::LoggedIn(role) => {
                        let (screen, task) = ScreenData::open_dashboard(role, state);
                        Task::done(ScreenMessage::ScreenMessage(Message::ChangeScreen(screen)))
                            .chain(task)
                    }
                    landing_page::ParentMessage::StartApplication => {
                        let (screen, task) = migrant_status::MigrantStatusScreen::open_for_application(
                            state.client.clone(),
                        );
                        Task::done(ScreenMessage::ScreenMessage(Message::ChangeScreen(
                            ScreenData::MigrantStatus(screen),
                        )))
                        .chain(task.map(Message::Migrant).map(ScreenMessage::ScreenMessage))
                    }
                },
            },
            (ScreenData::Review(page), Message::Review(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Review)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(review_dashboard::ParentMessage::LoggedOut(role)) => {
                    ScreenData::logout(state, role)
                }
            },
            (ScreenData::MigrantStatus(page), Message::Migrant(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Migrant)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(migrant_status::ParentMessage::LoggedOut(role)) => {
                    ScreenData::logout(state, role)
                }
            },
            (ScreenData::Registry(page), Message::Registry(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Registry)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(traveler_registry::ParentMessage::LoggedOut(role)) => {
                    ScreenData::logout(state, role)
                }
            },
            (ScreenData::Checkpoint(page), Message::Checkpoint(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Checkpoint)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(checkpoint::ParentMessage::LoggedOut(role)) => {
                    ScreenData::logout(state, role)
                }
            },
            // A completion addressed to a screen we have already left.
            _ => Task::none(),
        }
    }

    fn subscription(&self) -> Subscription<ScreenMessage<Self>> {
        match self {
            ScreenData::Landing(screen) => screen
                .subscription()
                .map(|m| ScreenMessage::ScreenMessage(Message::Landing(m))),
            ScreenData::Review(screen) => screen
                .subscription()
                .map(|m| ScreenMessage::ScreenMessage(Message::Review(m))),
            ScreenData::MigrantStatus(screen) => screen
                .subscription()
                .map(|m| ScreenMessage::ScreenMessage(Message::Migrant(m))),
            ScreenData::Registry(screen) => screen
                .subscription()
                .map(|m| ScreenMessage::ScreenMessage(Message::Registry(m))),
            ScreenData::Checkpoint(screen) => screen
                .subscription()
                .map(|m| ScreenMessage::ScreenMessage(Message::Checkpoint(m))),
        }
    }
}
