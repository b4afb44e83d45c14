use axum::Router;
use url::Url;

use clearpass::ClearanceClient;
use clearpass::models::{ApplicationRecord, ApprovalStatus, DisapprovedTraveler, Tier};

/// Serve the given router on an ephemeral local port and return its base
/// URL. The server lives for the rest of the test process.
pub async fn spawn_backend(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server died");
    });
    Url::parse(&format!("http://{addr}/")).expect("Failed to build base url")
}

/// A client wired to an in-process stub backend.
pub async fn client_for(app: Router) -> ClearanceClient {
    let base = spawn_backend(app).await;
    ClearanceClient::new(base).expect("Failed to build client")
}

/// A client pointed at a port nothing listens on, for transport-failure
/// paths.
pub fn unreachable_client() -> ClearanceClient {
    let base = Url::parse("http://127.0.0.1:9/").expect("Failed to build base url");
    ClearanceClient::new(base).expect("Failed to build client")
}

pub fn make_application(id: &str, name: &str, aadhar: &str) -> ApplicationRecord {
    ApplicationRecord {
        id: id.to_string(),
        name: name.to_string(),
        aadhar: aadhar.to_string(),
        source: Some("Mumbai".to_string()),
        destination: Some("Delhi".to_string()),
        medium_of_travel: Some("Train".to_string()),
        email: Some(format!("{}@example.com", id)),
        doctor_approval: ApprovalStatus::Pending,
        official_approval: ApprovalStatus::Pending,
        created_at: Some("2026-03-01T10:30:00".to_string()),
        doctor_id: None,
    }
}

pub fn make_traveler(id: &str, name: &str, aadhar: &str, tier: Tier) -> DisapprovedTraveler {
    DisapprovedTraveler {
        id: id.to_string(),
        name: name.to_string(),
        aadhar: aadhar.to_string(),
        tier,
        disease_name: Some("Influenza".to_string()),
        age: Some(34),
        phone_number: Some("9876543210".to_string()),
        email: Some(format!("{}@example.com", id)),
        current_address: Some("14 MG Road, Pune".to_string()),
        expected_recovery_date: Some("2026-04-01".to_string()),
        doctor_id: Some("0010".to_string()),
        qr_generated: false,
        created_at: Some("2026-03-02T08:00:00".to_string()),
    }
}
