use serde::Deserialize;

use crate::core::api::{Role, error::ApiError};
use crate::models::{ApplicationRecord, HealthForm};

#[derive(Debug, Deserialize)]
pub(super) struct MigrantsBody {
    #[serde(default)]
    pub migrants: Vec<ApplicationRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn wire_value(self) -> &'static str {
        match self {
            Decision::Approved => "APPROVED",
            Decision::Rejected => "REJECTED",
        }
    }
}

/// Body shape of a decision submission. Doctors send JSON (a rejection
/// carries the structured health form as `health_data`); officials always
/// send multipart form data, with the approval letter attached on approve.
#[derive(Debug, Clone)]
pub enum DecisionUpload {
    Plain(Decision),
    /// Always a rejection; the form travels as `health_data`.
    WithHealthForm(HealthForm),
    Form {
        decision: Decision,
        approval_letter: Option<(String, Vec<u8>)>,
    },
}

impl DecisionUpload {
    pub fn decision(&self) -> Decision {
        match self {
            DecisionUpload::Plain(decision) => *decision,
            DecisionUpload::WithHealthForm(_) => Decision::Rejected,
            DecisionUpload::Form { decision, .. } => *decision,
        }
    }
}

/// Reviewer-side access to the application roster.
pub trait RosterApi {
    /// Fetch pending applications. A non-empty `aadhar_filter` is passed
    /// through as a server-side query; client-side narrowing of an
    /// existing snapshot is the view-model's job.
    fn migrants(
        &self,
        role: Role,
        aadhar_filter: Option<&str>,
    ) -> impl Future<Output = Result<Vec<ApplicationRecord>, ApiError>>;

    /// Submit an approve/reject decision for one application. Returns the
    /// server's confirmation message.
    fn decide(
        &self,
        role: Role,
        migrant_id: &str,
        upload: DecisionUpload,
    ) -> impl Future<Output = Result<String, ApiError>>;
}
