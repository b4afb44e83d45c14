//! Edge cases of the binary download contract: document bytes on success,
//! JSON error envelopes on failure, and collision-free save names.

mod common;

use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::json;

use clearpass::core::api::{
    ApiError, DocumentApi, clearance_path, health_warning_path, stamped_filename,
    warning_letter_path,
};

use common::*;

const PDF_MAGIC: &[u8] = b"%PDF-1.7 fake document body";

#[tokio::test]
async fn test_download_returns_raw_bytes_on_success() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/migrant/download-clearance",
        get(|| async {
            (
                [(axum::http::header::CONTENT_TYPE, "application/pdf")],
                PDF_MAGIC.to_vec(),
            )
        }),
    );
    let client = client_for(app).await;

    let bytes = client
        .fetch_document(&clearance_path(), "Cannot download yet")
        .await?;
    assert_eq!(bytes, PDF_MAGIC);
    Ok(())
}

#[tokio::test]
async fn test_download_failure_surfaces_json_error_not_bytes() {
    // The 404 body is JSON and must come back as the error string; it must
    // never be handed to the caller as document content.
    let app = Router::new().route(
        "/migrant/download-clearance",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "not ready"}))) }),
    );
    let client = client_for(app).await;

    let result = client
        .fetch_document(&clearance_path(), "Cannot download yet")
        .await;
    assert_eq!(result, Err(ApiError::Server("not ready".to_string())));
}

#[tokio::test]
async fn test_download_failure_without_error_body_uses_fallback() {
    let app = Router::new().route(
        "/migrant/download-health-warning",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
    );
    let client = client_for(app).await;

    let result = client
        .fetch_document(&health_warning_path(), "Failed to download")
        .await;
    assert_eq!(result, Err(ApiError::Server("Failed to download".to_string())));
}

#[tokio::test]
async fn test_download_transport_failure_is_network_error() {
    let client = unreachable_client();
    let result = client
        .fetch_document(&warning_letter_path("t1"), "Failed to download")
        .await;
    assert_eq!(result, Err(ApiError::Network));
}

#[test]
fn test_stamped_filenames_carry_prefix_and_extension() {
    let name = stamped_filename("health_warning");
    assert!(name.starts_with("health_warning_"));
    assert!(name.ends_with(".pdf"));

    // The stamp is the number of seconds, so repeated downloads in one
    // session only collide within the same second.
    let stamp: &str = name
        .strip_prefix("health_warning_")
        .and_then(|rest| rest.strip_suffix(".pdf"))
        .expect("unexpected filename shape");
    assert!(stamp.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_document_paths() {
    assert_eq!(
        warning_letter_path("t1"),
        "health-admin/download-warning-letter/t1"
    );
    assert_eq!(clearance_path(), "migrant/download-clearance");
    assert_eq!(health_warning_path(), "migrant/download-health-warning");
}
