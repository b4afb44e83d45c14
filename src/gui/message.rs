use crate::gui::screens::{
    ScreenData, ScreenMessage, checkpoint::CheckpointScreen, landing_page::LandingScreen,
    migrant_status::MigrantStatusScreen, review_dashboard::ReviewDashboardScreen,
    traveler_registry::TravelerRegistryScreen,
};

#[derive(Debug, Clone)]
pub enum Message {
    Landing(ScreenMessage<LandingScreen>),
    Review(ScreenMessage<ReviewDashboardScreen>),
    Migrant(ScreenMessage<MigrantStatusScreen>),
    Registry(ScreenMessage<TravelerRegistryScreen>),
    Checkpoint(ScreenMessage<CheckpointScreen>),
    ChangeScreen(ScreenData),
}
