//! Integration tests for the typed API client, run against an in-process
//! stub of the backend.
//!
//! Tests cover:
//! - Login payload shapes, error mapping and client-side validation
//! - Roster fetches with and without the server-side aadhar filter
//! - Decision submissions (JSON, health-form JSON, multipart)
//! - Traveler registry, QR issuance, checkpoint scan/penalty
//! - Logout never failing from the caller's perspective

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use clearpass::core::api::{
    ApiError, CheckpointApi, Credentials, Decision, DecisionUpload, DirectoryApi, MigrantApi,
    NewDoctor, PENALTY_REASON, RosterApi, SessionApi, TravelerApi,
};
use clearpass::models::{ApprovalStatus, TravelFlag, Tier};
use clearpass::{Role, RosterRecord};

use common::*;

type Captured = Arc<Mutex<Option<Value>>>;

fn capture() -> Captured {
    Arc::new(Mutex::new(None))
}

#[tokio::test]
async fn test_migrant_login_posts_email_and_aadhar() -> anyhow::Result<()> {
    // 1. Stub the login endpoint and capture its payload
    let captured = capture();
    let sink = captured.clone();
    let app = Router::new().route(
        "/migrant/login",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(body);
                Json(json!({"message": "Login successful"}))
            }
        }),
    );
    let client = client_for(app).await;

    // 2. Log in with valid migrant credentials
    let message = client
        .login(&Credentials::Migrant {
            email: "a@b.com".to_string(),
            aadhar: "123456789012".to_string(),
        })
        .await?;
    assert_eq!(message, "Login successful");

    // 3. The wire payload is exactly {email, aadhar}
    let body = captured.lock().unwrap().take().expect("no payload captured");
    assert_eq!(body, json!({"email": "a@b.com", "aadhar": "123456789012"}));
    Ok(())
}

#[tokio::test]
async fn test_login_surfaces_server_error_verbatim() {
    let app = Router::new().route(
        "/doctor/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid credentials"})),
            )
        }),
    );
    let client = client_for(app).await;

    let result = client
        .login(&Credentials::Doctor {
            doctor_id: "0010".to_string(),
            password: "wrong".to_string(),
        })
        .await;
    assert_eq!(
        result,
        Err(ApiError::Server("Invalid credentials".to_string()))
    );
}

#[tokio::test]
async fn test_login_maps_transport_failure_to_network_error() {
    let client = unreachable_client();
    let result = client
        .login(&Credentials::Official {
            official_id: "0010".to_string(),
            password: "secret".to_string(),
        })
        .await;
    assert_eq!(result, Err(ApiError::Network));
}

#[tokio::test]
async fn test_malformed_aadhar_blocks_login_before_any_request() {
    // The client is unreachable: had a request been attempted, the error
    // would be Network, not Invalid.
    let client = unreachable_client();
    let result = client
        .login(&Credentials::Migrant {
            email: "a@b.com".to_string(),
            aadhar: "12345".to_string(),
        })
        .await;
    assert_eq!(
        result,
        Err(ApiError::Invalid("Aadhar must be exactly 12 digits".to_string()))
    );
}

#[tokio::test]
async fn test_migrants_fetch_and_server_side_filter() -> anyhow::Result<()> {
    let captured = capture();
    let sink = captured.clone();
    let app = Router::new().route(
        "/doctor/migrants",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(json!(params));
                Json(json!({
                    "migrants": [
                        make_application("a1", "Asha", "123456789012"),
                        make_application("a2", "Binod", "999912345678"),
                    ]
                }))
            }
        }),
    );
    let client = client_for(app).await;

    // 1. Unfiltered fetch returns the full roster
    let migrants = client.migrants(Role::Doctor, None).await?;
    assert_eq!(migrants.len(), 2);
    assert_eq!(migrants[0].record_id(), "a1");
    assert_eq!(migrants[0].doctor_approval, ApprovalStatus::Pending);
    assert_eq!(captured.lock().unwrap().take(), Some(json!({})));

    // 2. A filter is passed through as the aadhar query parameter
    client.migrants(Role::Doctor, Some("9999")).await?;
    assert_eq!(
        captured.lock().unwrap().take(),
        Some(json!({"aadhar": "9999"}))
    );
    Ok(())
}

#[tokio::test]
async fn test_doctor_approval_posts_bare_decision() -> anyhow::Result<()> {
    let captured = capture();
    let sink = captured.clone();
    let app = Router::new().route(
        "/doctor/decision/{id}",
        post(move |Path(id): Path<String>, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(json!({"id": id, "body": body}));
                Json(json!({"message": "Migrant approved"}))
            }
        }),
    );
    let client = client_for(app).await;

    let message = client
        .decide(Role::Doctor, "a1", DecisionUpload::Plain(Decision::Approved))
        .await?;
    assert_eq!(message, "Migrant approved");

    let seen = captured.lock().unwrap().take().expect("no payload captured");
    assert_eq!(seen["id"], "a1");
    assert_eq!(seen["body"], json!({"decision": "APPROVED"}));
    Ok(())
}

#[tokio::test]
async fn test_doctor_rejection_carries_health_data() -> anyhow::Result<()> {
    let captured = capture();
    let sink = captured.clone();
    let app = Router::new().route(
        "/doctor/decision/{id}",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(body);
                Json(json!({"message": "Migrant rejected"}))
            }
        }),
    );
    let client = client_for(app).await;

    let form = clearpass::models::HealthForm {
        name: "Asha".to_string(),
        age: 34,
        current_address: "14 MG Road, Pune".to_string(),
        email: "asha@example.com".to_string(),
        phone_number: "9876543210".to_string(),
        disease_name: "Influenza".to_string(),
        tier: Tier::Two,
        expected_recovery_date: "2026-04-01".to_string(),
    };
    client
        .decide(Role::Doctor, "a1", DecisionUpload::WithHealthForm(form))
        .await?;

    let body = captured.lock().unwrap().take().expect("no payload captured");
    assert_eq!(body["decision"], "REJECTED");
    assert_eq!(body["health_data"]["disease_name"], "Influenza");
    // Tier serializes as its wire number
    assert_eq!(body["health_data"]["tier"], 2);
    assert_eq!(body["health_data"]["age"], 34);
    Ok(())
}

#[tokio::test]
async fn test_official_decision_is_multipart_with_optional_letter() -> anyhow::Result<()> {
    let captured = capture();
    let sink = captured.clone();
    let app = Router::new().route(
        "/official/decision/{id}",
        post(move |mut multipart: Multipart| {
            let sink = sink.clone();
            async move {
                let mut decision = None;
                let mut letter = None;
                while let Some(field) = multipart.next_field().await.unwrap() {
                    match field.name().unwrap_or_default() {
                        "decision" => decision = Some(field.text().await.unwrap()),
                        "approval_letter" => {
                            let name = field.file_name().map(str::to_string);
                            let bytes = field.bytes().await.unwrap();
                            letter = Some(json!({"name": name, "len": bytes.len()}));
                        }
                        _ => {}
                    }
                }
                *sink.lock().unwrap() = Some(json!({"decision": decision, "letter": letter}));
                Json(json!({"message": "Migrant approved"}))
            }
        }),
    );
    let client = client_for(app).await;

    // 1. Approval carries the letter file
    client
        .decide(
            Role::Official,
            "a1",
            DecisionUpload::Form {
                decision: Decision::Approved,
                approval_letter: Some(("letter.pdf".to_string(), vec![0x25, 0x50, 0x44, 0x46])),
            },
        )
        .await?;
    let seen = captured.lock().unwrap().take().expect("no payload captured");
    assert_eq!(seen["decision"], "APPROVED");
    assert_eq!(seen["letter"]["name"], "letter.pdf");
    assert_eq!(seen["letter"]["len"], 4);

    // 2. Rejection is multipart too, with no file part
    client
        .decide(
            Role::Official,
            "a1",
            DecisionUpload::Form {
                decision: Decision::Rejected,
                approval_letter: None,
            },
        )
        .await?;
    let seen = captured.lock().unwrap().take().expect("no payload captured");
    assert_eq!(seen["decision"], "REJECTED");
    assert_eq!(seen["letter"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn test_traveler_registry_and_qr_flow() -> anyhow::Result<()> {
    let app = Router::new()
        .route(
            "/health-admin/disapproved-travelers",
            get(|| async {
                Json(json!({
                    "travelers": [make_traveler("t1", "Binod", "999912345678", Tier::Two)]
                }))
            }),
        )
        .route(
            "/health-admin/traveler/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({"traveler": make_traveler(&id, "Binod", "999912345678", Tier::Two)}))
            }),
        )
        .route(
            "/health-admin/update-qr/{id}",
            post(|| async {
                Json(json!({"message": "QR code generated and health warning letter sent to traveler"}))
            }),
        );
    let client = client_for(app).await;

    let travelers = client.disapproved_travelers(Role::HealthAdmin).await?;
    assert_eq!(travelers.len(), 1);
    assert_eq!(travelers[0].tier, Tier::Two);
    assert!(!travelers[0].qr_generated);

    let detail = client.traveler_detail("t1").await?;
    assert_eq!(detail.id, "t1");
    assert_eq!(detail.expected_recovery_date.as_deref(), Some("2026-04-01"));

    let message = client.update_qr("t1").await?;
    assert!(message.starts_with("QR code generated"));
    Ok(())
}

#[tokio::test]
async fn test_update_qr_error_surfaces_server_message() {
    let app = Router::new().route(
        "/health-admin/update-qr/{id}",
        post(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Traveler not found"})),
            )
        }),
    );
    let client = client_for(app).await;

    let result = client.update_qr("missing").await;
    assert_eq!(
        result,
        Err(ApiError::Server("Traveler not found".to_string()))
    );
}

#[tokio::test]
async fn test_checkpoint_scan_and_penalty() -> anyhow::Result<()> {
    let captured = capture();
    let sink = captured.clone();
    let app = Router::new()
        .route(
            "/authorities/scan-qr",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["qr_data"], "QR-PAYLOAD");
                Json(json!({
                    "flag": "RED",
                    "message": "Traveler is disapproved for travel",
                    "name": "Binod",
                    "aadhar": "999912345678",
                    "tier": 2,
                    "disease_name": "Influenza",
                }))
            }),
        )
        .route(
            "/authorities/levy-penalty",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({"message": "Penalty levied successfully"}))
                }
            }),
        );
    let client = client_for(app).await;

    // 1. A red-flag scan carries the tier driving the penalty amount
    let outcome = client.scan_qr("QR-PAYLOAD").await?;
    assert_eq!(outcome.flag, TravelFlag::Red);
    let tier = outcome.tier.expect("red flag without tier");
    assert_eq!(tier.penalty_rupees(), 10_000);

    // 2. Levy posts aadhar, amount and the fixed reason
    client
        .levy_penalty("999912345678", tier.penalty_rupees(), PENALTY_REASON)
        .await?;
    let body = captured.lock().unwrap().take().expect("no payload captured");
    assert_eq!(body["aadhar"], "999912345678");
    assert_eq!(body["penalty_amount"], 10_000);
    assert_eq!(body["reason"], PENALTY_REASON);
    Ok(())
}

#[tokio::test]
async fn test_empty_qr_input_is_rejected_client_side() {
    let client = unreachable_client();
    let result = client.scan_qr("   ").await;
    assert_eq!(
        result,
        Err(ApiError::Invalid("Please enter QR code data".to_string()))
    );
}

#[tokio::test]
async fn test_own_status_requires_session() {
    let app = Router::new().route(
        "/migrant/status",
        get(|| async { Json(json!({"migrant": null})) }),
    );
    let client = client_for(app).await;

    let result = client.own_status().await;
    assert_eq!(
        result,
        Err(ApiError::Server("Please login again.".to_string()))
    );
}

#[tokio::test]
async fn test_create_doctor_posts_credentials() -> anyhow::Result<()> {
    let captured = capture();
    let sink = captured.clone();
    let app = Router::new().route(
        "/official/create-doctor",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(body);
                Json(json!({"message": "Doctor account created"}))
            }
        }),
    );
    let client = client_for(app).await;

    client
        .create_doctor(&NewDoctor {
            doctor_id: "0042".to_string(),
            password: "hunter2".to_string(),
        })
        .await?;
    let body = captured.lock().unwrap().take().expect("no payload captured");
    assert_eq!(body, json!({"doctor_id": "0042", "password": "hunter2"}));
    Ok(())
}

#[tokio::test]
async fn test_logout_swallows_failures() {
    // A failing logout must not surface to the caller at all.
    let app = Router::new().route(
        "/doctor/logout",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "session store down"})),
            )
        }),
    );
    let client = client_for(app).await;
    client.logout(Role::Doctor).await;

    // Same for a dead server.
    unreachable_client().logout(Role::Doctor).await;
}
