use crate::core::api::error::ApiError;
use crate::models::ScanOutcome;

/// Reason string recorded with every checkpoint penalty.
pub const PENALTY_REASON: &str =
    "Violation of health protocols - Found in public while disapproved";

/// Checkpoint-authority operations: verify a traveler's QR payload and
/// levy penalties against red-flagged travelers.
pub trait CheckpointApi {
    fn scan_qr(&self, qr_data: &str) -> impl Future<Output = Result<ScanOutcome, ApiError>>;

    fn levy_penalty(
        &self,
        aadhar: &str,
        amount_rupees: u32,
        reason: &str,
    ) -> impl Future<Output = Result<String, ApiError>>;
}
