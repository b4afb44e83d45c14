pub mod core;
pub mod models;
pub mod viewmodel;

pub use crate::core::api::{ApiError, ClearanceClient, Credentials, Role};
pub use crate::viewmodel::{Roster, RosterRecord};

#[cfg(feature = "gui")]
pub mod gui;
