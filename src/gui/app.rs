use iced::{Element, Subscription, Task, Theme};

use crate::core::api::ClearanceClient;
use crate::gui::screens::{Screen, ScreenData, ScreenMessage, landing_page::LandingScreen};
use crate::gui::{AppState, Message};

pub struct ClearPassApp {
    state: AppState,
    screen: ScreenData,
}

impl ClearPassApp {
    fn new(client: ClearanceClient) -> Self {
        Self {
            state: AppState::new(client),
            screen: ScreenData::Landing(LandingScreen::new()),
        }
    }

    fn title(&self) -> String {
        match self.screen.role() {
            Some(role) => format!("ClearPass - {}", role.title()),
            None => "ClearPass - Travel Clearance".to_string(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        self.screen.update(message, &mut self.state).map(unwrap)
    }

    fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(unwrap)
    }

    fn subscription(&self) -> Subscription<Message> {
        self.screen.subscription().map(unwrap)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn unwrap(message: ScreenMessage<ScreenData>) -> Message {
    match message {
        ScreenMessage::ScreenMessage(message) => message,
        ScreenMessage::ParentMessage(never) => match never {},
    }
}

pub fn run(client: ClearanceClient) -> iced::Result {
    iced::application(ClearPassApp::title, ClearPassApp::update, ClearPassApp::view)
        .subscription(ClearPassApp::subscription)
        .theme(ClearPassApp::theme)
        .run_with(move || (ClearPassApp::new(client), Task::none()))
}
