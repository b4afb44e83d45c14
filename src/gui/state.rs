use crate::core::api::ClearanceClient;

/// Application-wide state shared across screens. The client is an
/// `Arc`-backed handle, so every screen clone talks through the same
/// session cookie jar.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: ClearanceClient,
}

impl AppState {
    pub fn new(client: ClearanceClient) -> Self {
        Self { client }
    }
}
