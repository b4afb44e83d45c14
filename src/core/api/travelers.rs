use serde::Deserialize;

use crate::core::api::{Role, error::ApiError};
use crate::models::DisapprovedTraveler;

#[derive(Debug, Deserialize)]
pub(super) struct TravelersBody {
    #[serde(default)]
    pub travelers: Vec<DisapprovedTraveler>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TravelerBody {
    pub traveler: DisapprovedTraveler,
}

/// Health-administration view of rejected applicants.
pub trait TravelerApi {
    fn disapproved_travelers(
        &self,
        role: Role,
    ) -> impl Future<Output = Result<Vec<DisapprovedTraveler>, ApiError>>;

    /// Full record for the detail overlay.
    fn traveler_detail(
        &self,
        traveler_id: &str,
    ) -> impl Future<Output = Result<DisapprovedTraveler, ApiError>>;

    /// Generate the traveler's QR and dispatch the warning letter.
    /// Idempotent through the server-side `qr_generated` flag, not through
    /// any client-side dedup.
    fn update_qr(&self, traveler_id: &str) -> impl Future<Output = Result<String, ApiError>>;
}
