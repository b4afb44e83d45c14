use serde::Deserialize;

use crate::core::api::error::ApiError;
use crate::models::{ApplicationForm, ApplicationRecord};

#[derive(Debug, Deserialize)]
pub(super) struct StatusBody {
    pub migrant: Option<ApplicationRecord>,
}

/// Self-service operations for a logged-in migrant.
pub trait MigrantApi {
    /// The caller's own application, as of this poll cycle.
    fn own_status(&self) -> impl Future<Output = Result<ApplicationRecord, ApiError>>;

    /// Submit a new application with the medical report attached.
    fn apply(
        &self,
        form: &ApplicationForm,
        report_file_name: &str,
        report_bytes: Vec<u8>,
    ) -> impl Future<Output = Result<String, ApiError>>;
}
