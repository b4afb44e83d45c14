use crate::core::api::error::ApiError;

/// Fetch of binary documents (PDFs). Success status means document bytes;
/// any other status means a JSON error envelope.
pub trait DocumentApi {
    fn fetch_document(
        &self,
        path: &str,
        fallback: &str,
    ) -> impl Future<Output = Result<Vec<u8>, ApiError>>;
}

pub fn warning_letter_path(traveler_id: &str) -> String {
    format!("health-admin/download-warning-letter/{traveler_id}")
}

pub fn clearance_path() -> String {
    "migrant/download-clearance".to_string()
}

pub fn health_warning_path() -> String {
    "migrant/download-health-warning".to_string()
}

/// Default save name for a downloaded document. The timestamp keeps
/// repeated downloads in one session from colliding on disk.
pub fn stamped_filename(prefix: &str) -> String {
    let ts = time::OffsetDateTime::now_utc().unix_timestamp();
    format!("{prefix}_{ts}.pdf")
}
