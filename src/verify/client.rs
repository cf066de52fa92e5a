//! HTTP client for the verification service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::VerifyError;

use super::classify::{VerifyMode, VerifyResponse};

/// Body of the verify-code request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

/// Body of the send-code request. `purpose` tells the service which
/// flow the code is for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
    pub purpose: VerifyMode,
}

/// Transport seam for the verification service.
#[async_trait]
pub trait VerifyApi: Send + Sync {
    /// Trigger delivery of a one-time code to the address.
    async fn send_code(&self, request: &SendCodeRequest) -> Result<(), VerifyError>;

    /// Submit a code for verification and return the raw response body.
    async fn verify_code(&self, request: &VerifyRequest) -> Result<VerifyResponse, VerifyError>;
}

/// reqwest-backed client for the remote verification API.
pub struct HttpVerifyApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpVerifyApi {
    /// Build a client against `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, VerifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VerifyError::Transport {
                reason: e.to_string(),
            })?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl VerifyApi for HttpVerifyApi {
    async fn send_code(&self, request: &SendCodeRequest) -> Result<(), VerifyError> {
        let response = self
            .client
            .post(self.endpoint("auth/send-code"))
            .json(request)
            .send()
            .await
            .map_err(|e| VerifyError::SendFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VerifyError::SendFailed {
                reason: format!("send-code returned {status}: {body}"),
            });
        }
        Ok(())
    }

    async fn verify_code(&self, request: &VerifyRequest) -> Result<VerifyResponse, VerifyError> {
        // Rejection is reported through the `status` field of the body,
        // so the HTTP status line is not inspected here.
        let response = self
            .client
            .post(self.endpoint("auth/verify-code"))
            .json(request)
            .send()
            .await
            .map_err(|e| VerifyError::Transport {
                reason: e.to_string(),
            })?;

        response
            .json::<VerifyResponse>()
            .await
            .map_err(|e| VerifyError::InvalidBody {
                reason: e.to_string(),
            })
    }
}
