//! Worker identity check (document number + captured face image).

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

pub const VERIFY_PATH: &str = "/workers/verify";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationRequest {
    /// Document number as digits.
    pub cc: i64,
    /// Captured JPEG data URI.
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerificationResult {
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(default)]
    pub message: String,
}

impl ApiClient {
    /// Ask the backend whether `photo` matches the worker holding `cc`.
    pub async fn verify_worker(&self, request: &VerificationRequest) -> Result<VerificationResult, ApiError> {
        tracing::debug!(cc = request.cc, "verifying worker identity");
        let req = self.post(VERIFY_PATH).json(request);
        self.execute(req, "failed to verify worker").await
    }
}
