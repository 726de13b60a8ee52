//! HTTP client for the upstream employee API.
//!
//! # Responsibilities
//! - Issue one HTTP call per attempt (the retry loop lives in retry.rs)
//! - Decode the response envelope and classify non-success statuses
//! - Apply the per-operation absence policy: a list unwraps missing
//!   `data` to empty, a single-entity fetch treats it as not-found, a
//!   delete confirmation treats anything but `true` as failure

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::UpstreamConfig;
use crate::employees::types::{CreateEmployeeInput, DeleteEmployeeRequest, Employee};
use crate::upstream::envelope::ApiEnvelope;
use crate::upstream::error::AttemptError;

/// Client for the upstream employee API.
#[derive(Debug, Clone)]
pub struct EmployeeApi {
    http: reqwest::Client,
    base_url: String,
}

impl EmployeeApi {
    /// Build a client from configuration.
    ///
    /// The per-call timeout is enforced by reqwest; the retry layer adds
    /// no timeout of its own.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET {base}` — the full employee list.
    ///
    /// A success envelope without `data` is an empty result, not a failure.
    pub async fn fetch_all(&self) -> Result<Vec<Employee>, AttemptError> {
        let response = self.http.get(&self.base_url).send().await?;
        let envelope: ApiEnvelope<Vec<Employee>> = decode_envelope(response).await?;

        match envelope.data {
            Some(employees) => {
                tracing::debug!(count = employees.len(), "Retrieved employees from upstream");
                Ok(employees)
            }
            None => {
                tracing::warn!("Upstream returned an empty employee list envelope");
                Ok(Vec::new())
            }
        }
    }

    /// `GET {base}/{id}` — a single employee.
    ///
    /// Upstream 404 and a success envelope without `data` both mean the
    /// employee does not exist; neither consumes the retry budget.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Employee, AttemptError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AttemptError::not_found(id));
        }

        let envelope: ApiEnvelope<Employee> = decode_envelope(response).await?;
        envelope.data.ok_or_else(|| AttemptError::not_found(id))
    }

    /// `POST {base}` — create an employee.
    pub async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee, AttemptError> {
        let response = self.http.post(&self.base_url).json(input).send().await?;
        let envelope: ApiEnvelope<Employee> = decode_envelope(response).await?;

        envelope.data.ok_or_else(|| {
            AttemptError::operation_failed("Failed to create employee - empty response received")
        })
    }

    /// `DELETE {base}` with a `{name}` body — the upstream deletes by name.
    ///
    /// Anything but an explicit `data: true` confirmation is a failure.
    pub async fn delete_by_name(&self, name: &str) -> Result<(), AttemptError> {
        let body = DeleteEmployeeRequest {
            name: name.to_string(),
        };
        let response = self.http.delete(&self.base_url).json(&body).send().await?;
        let envelope: ApiEnvelope<bool> = decode_envelope(response).await?;

        match envelope.data {
            Some(true) => Ok(()),
            _ => Err(AttemptError::operation_failed(format!(
                "Upstream did not confirm deletion of employee: {name}"
            ))),
        }
    }
}

/// Classify the response status and decode the envelope on success.
///
/// Body decode failures are transport-level and therefore retryable.
async fn decode_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiEnvelope<T>, AttemptError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AttemptError::from_status(status));
    }

    let envelope = response.json::<ApiEnvelope<T>>().await?;
    if let Some(error) = &envelope.error {
        tracing::debug!(error = %error, "Upstream envelope carried an error message");
    }
    Ok(envelope)
}
