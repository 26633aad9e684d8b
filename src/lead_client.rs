use crate::errors::{AppError, ResultExt};
use crate::models::{IntakeReceipt, LeadIntakePayload, LeadIntakeResponse, LeadSubmission};
use reqwest;
use std::time::Duration;
use tracing;

/// Default request budget for one delivery attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Client for the third-party lead intake relay.
///
/// Makes exactly one POST per lead; retries are the caller's business and the
/// submission pipeline never asks for one.
#[derive(Clone)]
pub struct LeadIntakeClient {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
    subject: String,
}

impl LeadIntakeClient {
    /// Creates a new `LeadIntakeClient`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Full URL of the intake relay.
    /// * `access_key` - Credential sent inside the payload.
    /// * `subject` - Subject line of the relayed email.
    /// * `timeout` - Bound on the whole request.
    pub fn new(
        endpoint: String,
        access_key: String,
        subject: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create lead intake client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint,
            access_key,
            subject,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Delivers a lead to the relay.
    ///
    /// # Returns
    ///
    /// * `Result<IntakeReceipt, AppError>` - The receipt, or the reason delivery failed.
    pub async fn deliver(&self, lead: &LeadSubmission) -> Result<IntakeReceipt, AppError> {
        tracing::info!("Delivering lead for {} to intake relay", lead.company);

        let payload = LeadIntakePayload::new(&self.access_key, &self.subject, lead);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await
            .context("Lead intake request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read lead intake response")?;
        let parsed = serde_json::from_str::<LeadIntakeResponse>(&body);

        if !status.is_success() {
            let reason = parsed
                .ok()
                .and_then(|r| r.reason().map(str::to_string))
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(AppError::ExternalApiError(format!(
                "Lead intake returned {}: {}",
                status, reason
            )));
        }

        let parsed = parsed.map_err(|e| {
            AppError::MalformedResponse(format!("Failed to parse lead intake response: {}", e))
        })?;

        if parsed.success == Some(false) {
            return Err(AppError::ExternalApiError(format!(
                "Lead intake rejected the submission: {}",
                parsed.reason().unwrap_or("no reason given")
            )));
        }

        tracing::info!("✓ Lead delivered ({})", status);
        Ok(IntakeReceipt {
            status: status.as_u16(),
            message: parsed.message,
        })
    }
}
