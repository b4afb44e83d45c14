use serde_json::json;

use crate::core::api::{Role, error::ApiError};
use crate::models::aadhar_valid;

/// Role-specific login credentials. Migrants authenticate with the email
/// and aadhar from their application; every staff role uses an issued id
/// plus password, keyed by the field name its endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Migrant { email: String, aadhar: String },
    Doctor { doctor_id: String, password: String },
    Official { official_id: String, password: String },
    HealthAdmin { admin_id: String, password: String },
    Authority { authority_id: String, password: String },
}

impl Credentials {
    pub fn role(&self) -> Role {
        match self {
            Credentials::Migrant { .. } => Role::Migrant,
            Credentials::Doctor { .. } => Role::Doctor,
            Credentials::Official { .. } => Role::Official,
            Credentials::HealthAdmin { .. } => Role::HealthAdmin,
            Credentials::Authority { .. } => Role::Authority,
        }
    }

    /// Client-side checks that block the request entirely.
    pub(super) fn validate(&self) -> Result<(), ApiError> {
        match self {
            Credentials::Migrant { email, aadhar } => {
                if email.trim().is_empty() {
                    return Err(ApiError::invalid("Email is required"));
                }
                if !aadhar_valid(aadhar) {
                    return Err(ApiError::invalid("Aadhar must be exactly 12 digits"));
                }
            }
            Credentials::Doctor { doctor_id: id, password }
            | Credentials::Official { official_id: id, password }
            | Credentials::HealthAdmin { admin_id: id, password }
            | Credentials::Authority { authority_id: id, password } => {
                if id.trim().is_empty() || password.is_empty() {
                    return Err(ApiError::invalid("ID and password are required"));
                }
            }
        }
        Ok(())
    }

    pub(super) fn payload(&self) -> serde_json::Value {
        match self {
            Credentials::Migrant { email, aadhar } => {
                json!({ "email": email, "aadhar": aadhar })
            }
            Credentials::Doctor { doctor_id, password } => {
                json!({ "doctor_id": doctor_id, "password": password })
            }
            Credentials::Official { official_id, password } => {
                json!({ "official_id": official_id, "password": password })
            }
            Credentials::HealthAdmin { admin_id, password } => {
                json!({ "admin_id": admin_id, "password": password })
            }
            Credentials::Authority { authority_id, password } => {
                json!({ "authority_id": authority_id, "password": password })
            }
        }
    }
}

pub trait SessionApi {
    /// Authenticate and establish the session cookie. Returns the server's
    /// confirmation message.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<String, ApiError>>;

    /// Ends the session. Never fails from the caller's perspective: the
    /// client navigates back to the landing screen regardless.
    fn logout(&self, role: Role) -> impl Future<Output = ()>;
}
