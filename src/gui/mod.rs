mod app;
mod download;
mod message;
mod poll;
mod screens;
mod state;
mod widgets;

pub use app::run;
pub use message::Message;
pub use state::AppState;
