mod checkpoint;
mod directory;
mod download;
mod error;
mod migrant;
mod roster;
mod session;
mod state;
mod travelers;

use std::{sync::Arc, time::Duration};

use serde_json::json;
use state::{ClientState, MessageBody};
use url::Url;

pub use checkpoint::{CheckpointApi, PENALTY_REASON};
pub use directory::{DirectoryApi, NewDoctor};
pub use download::{
    DocumentApi, clearance_path, health_warning_path, stamped_filename, warning_letter_path,
};
pub use error::ApiError;
pub use migrant::MigrantApi;
pub use roster::{Decision, DecisionUpload, RosterApi};
pub use session::{Credentials, SessionApi};
pub use travelers::TravelerApi;

use crate::models::{
    ApplicationForm, ApplicationRecord, DisapprovedTraveler, ScanOutcome, aadhar_valid,
};

/// The five user roles the service exposes. Each maps to a URL prefix and
/// a dashboard refresh cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Migrant,
    Doctor,
    Official,
    HealthAdmin,
    Authority,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Migrant,
        Role::Doctor,
        Role::Official,
        Role::HealthAdmin,
        Role::Authority,
    ];

    pub fn path_segment(self) -> &'static str {
        match self {
            Role::Migrant => "migrant",
            Role::Doctor => "doctor",
            Role::Official => "official",
            Role::HealthAdmin => "health-admin",
            Role::Authority => "authorities",
        }
    }

    /// How often this role's dashboard re-fetches its collection.
    pub fn poll_interval(self) -> Duration {
        match self {
            Role::Migrant | Role::Doctor | Role::Official => Duration::from_secs(8),
            Role::HealthAdmin => Duration::from_secs(10),
            Role::Authority => Duration::from_secs(15),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Role::Migrant => "Migrant",
            Role::Doctor => "Doctor",
            Role::Official => "Official",
            Role::HealthAdmin => "Health Administration",
            Role::Authority => "Checkpoint Authority",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Typed client for the clearance service. Cheap to clone; all clones
/// share one cookie jar, so a login performed through any clone
/// authenticates the rest.
#[derive(Debug, Clone)]
pub struct ClearanceClient {
    state: Arc<ClientState>,
}

impl ClearanceClient {
    pub fn new(base: Url) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(ClientState::new(base)?),
        })
    }
}

impl SessionApi for ClearanceClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        credentials.validate()?;
        let path = format!("{}/login", credentials.role().path_segment());
        let body: MessageBody = self
            .state
            .post_json(&path, &credentials.payload(), "Login failed")
            .await?;
        Ok(body.message)
    }

    async fn logout(&self, role: Role) {
        let path = format!("{}/logout", role.path_segment());
        // Logout never blocks navigation; a failure is only logged.
        if let Err(e) = self
            .state
            .post_empty::<serde_json::Value>(&path, "Logout failed")
            .await
        {
            tracing::warn!(role = role.path_segment(), error = %e, "logout failed");
        }
    }
}

impl RosterApi for ClearanceClient {
    async fn migrants(
        &self,
        role: Role,
        aadhar_filter: Option<&str>,
    ) -> Result<Vec<ApplicationRecord>, ApiError> {
        let mut path = format!("{}/migrants", role.path_segment());
        if let Some(query) = aadhar_filter.map(str::trim).filter(|q| !q.is_empty()) {
            let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
            path = format!("{path}?aadhar={encoded}");
        }
        let body: roster::MigrantsBody = self
            .state
            .get_json(&path, "Failed to load migrants")
            .await?;
        Ok(body.migrants)
    }

    async fn decide(
        &self,
        role: Role,
        migrant_id: &str,
        upload: DecisionUpload,
    ) -> Result<String, ApiError> {
        let path = format!("{}/decision/{}", role.path_segment(), migrant_id);
        let body: MessageBody = match upload {
            DecisionUpload::Plain(decision) => {
                let payload = json!({ "decision": decision.wire_value() });
                self.state.post_json(&path, &payload, "Update failed").await?
            }
            DecisionUpload::WithHealthForm(form) => {
                let payload = json!({
                    "decision": Decision::Rejected.wire_value(),
                    "health_data": form,
                });
                self.state.post_json(&path, &payload, "Update failed").await?
            }
            DecisionUpload::Form {
                decision,
                approval_letter,
            } => {
                let mut form =
                    reqwest::multipart::Form::new().text("decision", decision.wire_value());
                if let Some((file_name, bytes)) = approval_letter {
                    form = form.part(
                        "approval_letter",
                        reqwest::multipart::Part::bytes(bytes).file_name(file_name),
                    );
                }
                self.state
                    .post_multipart(&path, form, "Update failed")
                    .await?
            }
        };
        Ok(body.message)
    }
}

impl TravelerApi for ClearanceClient {
    async fn disapproved_travelers(&self, role: Role) -> Result<Vec<DisapprovedTraveler>, ApiError> {
        let path = format!("{}/disapproved-travelers", role.path_segment());
        let body: travelers::TravelersBody = self
            .state
            .get_json(&path, "Failed to load travelers")
            .await?;
        Ok(body.travelers)
    }

    async fn traveler_detail(&self, traveler_id: &str) -> Result<DisapprovedTraveler, ApiError> {
        let path = format!("health-admin/traveler/{traveler_id}");
        let body: travelers::TravelerBody = self
            .state
            .get_json(&path, "Failed to load details")
            .await?;
        Ok(body.traveler)
    }

    async fn update_qr(&self, traveler_id: &str) -> Result<String, ApiError> {
        let path = format!("health-admin/update-qr/{traveler_id}");
        let body: MessageBody = self
            .state
            .post_empty(&path, "Failed to generate QR")
            .await?;
        Ok(body.message)
    }
}

impl DocumentApi for ClearanceClient {
    async fn fetch_document(&self, path: &str, fallback: &str) -> Result<Vec<u8>, ApiError> {
        self.state.get_bytes(path, fallback).await
    }
}

impl CheckpointApi for ClearanceClient {
    async fn scan_qr(&self, qr_data: &str) -> Result<ScanOutcome, ApiError> {
        let qr_data = qr_data.trim();
        if qr_data.is_empty() {
            return Err(ApiError::invalid("Please enter QR code data"));
        }
        let payload = json!({ "qr_data": qr_data });
        self.state
            .post_json("authorities/scan-qr", &payload, "Scan failed")
            .await
    }

    async fn levy_penalty(
        &self,
        aadhar: &str,
        amount_rupees: u32,
        reason: &str,
    ) -> Result<String, ApiError> {
        let payload = json!({
            "aadhar": aadhar,
            "penalty_amount": amount_rupees,
            "reason": reason,
        });
        let body: MessageBody = self
            .state
            .post_json("authorities/levy-penalty", &payload, "Failed to levy penalty")
            .await?;
        Ok(body.message)
    }
}

impl MigrantApi for ClearanceClient {
    async fn own_status(&self) -> Result<ApplicationRecord, ApiError> {
        let body: migrant::StatusBody = self
            .state
            .get_json("migrant/status", "Please login again.")
            .await?;
        body.migrant
            .ok_or_else(|| ApiError::Server("Please login again.".to_string()))
    }

    async fn apply(
        &self,
        form: &ApplicationForm,
        report_file_name: &str,
        report_bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let required = [
            &form.name,
            &form.aadhar,
            &form.source,
            &form.destination,
            &form.medium_of_travel,
            &form.email,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(ApiError::invalid("All fields are required"));
        }
        if !aadhar_valid(&form.aadhar) {
            return Err(ApiError::invalid("Aadhar must be exactly 12 digits"));
        }
        let multipart = reqwest::multipart::Form::new()
            .text("name", form.name.clone())
            .text("aadhar", form.aadhar.clone())
            .text("source", form.source.clone())
            .text("destination", form.destination.clone())
            .text("medium_of_travel", form.medium_of_travel.clone())
            .text("email", form.email.clone())
            .part(
                "medical_report",
                reqwest::multipart::Part::bytes(report_bytes)
                    .file_name(report_file_name.to_string()),
            );
        let body: MessageBody = self
            .state
            .post_multipart("migrant/apply", multipart, "Failed to submit")
            .await?;
        Ok(body.message)
    }
}

impl DirectoryApi for ClearanceClient {
    async fn create_doctor(&self, new_doctor: &NewDoctor) -> Result<String, ApiError> {
        if new_doctor.doctor_id.trim().is_empty() || new_doctor.password.is_empty() {
            return Err(ApiError::invalid("Doctor ID and password are required"));
        }
        let payload = json!({
            "doctor_id": new_doctor.doctor_id,
            "password": new_doctor.password,
        });
        let body: MessageBody = self
            .state
            .post_json("official/create-doctor", &payload, "Failed to create doctor")
            .await?;
        Ok(body.message)
    }
}
