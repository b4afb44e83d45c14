use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::core::api::error::ApiError;

/// Success envelope used by every state-changing endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Shared connection state behind a `ClearanceClient`.
///
/// Holds the reqwest client (with its cookie jar carrying the login
/// session) and the backend base URL. All request/response plumbing and
/// the error-envelope contract live here so the capability impls in
/// `mod.rs` stay declarative.
pub(super) struct ClientState {
    http: reqwest::Client,
    base: Url,
}

impl std::fmt::Debug for ClientState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientState")
            .field("base", &self.base.as_str())
            .finish()
    }
}

impl ClientState {
    pub(super) fn new(mut base: Url) -> anyhow::Result<Self> {
        // Url::join treats a missing trailing slash as a file component.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|e| {
            tracing::warn!(path, error = %e, "invalid endpoint path");
            ApiError::invalid(format!("Invalid endpoint: {path}"))
        })
    }

    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.http.get(url).send().await.map_err(transport)?;
        decode_json(path, response, fallback).await
    }

    pub(super) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode_json(path, response, fallback).await
    }

    pub(super) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.http.post(url).send().await.map_err(transport)?;
        decode_json(path, response, fallback).await
    }

    pub(super) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        decode_json(path, response, fallback).await
    }

    /// Binary fetch. The two response shapes are mutually exclusive:
    /// a success status carries document bytes, anything else carries a
    /// JSON error envelope which must never be treated as a document.
    pub(super) async fn get_bytes(&self, path: &str, fallback: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.http.get(url).send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        if status.is_success() {
            tracing::debug!(path, bytes = body.len(), "document fetched");
            Ok(body.to_vec())
        } else {
            Err(server_error(path, status, &body, fallback))
        }
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    tracing::warn!(error = %error, "transport failure");
    ApiError::Network
}

fn server_error(path: &str, status: StatusCode, body: &[u8], fallback: &str) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| fallback.to_string());
    tracing::warn!(path, %status, %message, "request rejected");
    ApiError::Server(message)
}

async fn decode_json<T: DeserializeOwned>(
    path: &str,
    response: Response,
    fallback: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;
    if status.is_success() {
        tracing::debug!(path, %status, "request ok");
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(path, error = %e, "malformed success body");
            ApiError::Server(fallback.to_string())
        })
    } else {
        Err(server_error(path, status, &body, fallback))
    }
}
