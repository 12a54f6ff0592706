//! Bottlescout auth API HTTP client.

use crate::error::AuthError;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Base path of the auth API, appended to the configured origin.
const AUTH_BASE_PATH: &str = "/auth/api/v1/auth";

/// Client for the auth API registration endpoints.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client against the given origin (scheme + host).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Request a verification code for a phone number.
    #[instrument(skip(self))]
    pub async fn send_verification(&self, phone_number: &str) -> Result<(), AuthError> {
        let request = SendVerificationRequest {
            phone_number: phone_number.to_string(),
        };

        self.post("/send-verification", &request).await?;

        debug!(phone_number = %phone_number, "Verification code requested");
        Ok(())
    }

    /// Submit the code received via SMS to verify the phone number.
    #[instrument(skip(self, verification_code))]
    pub async fn verify_phone(
        &self,
        phone_number: &str,
        verification_code: &str,
    ) -> Result<(), AuthError> {
        let request = VerifyPhoneRequest {
            phone_number: phone_number.to_string(),
            verification_code: verification_code.to_string(),
        };

        self.post("/verify-phone", &request).await?;

        debug!(phone_number = %phone_number, "Phone number verified");
        Ok(())
    }

    /// Submit the final registration request.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AuthError> {
        self.post("/register", request).await?;

        debug!(email = %request.email, "Registration accepted");
        Ok(())
    }

    /// Request a password-reset mail for an account.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };

        self.post("/forgot-password", &request).await?;

        debug!(email = %email, "Password reset requested");
        Ok(())
    }

    /// POST a JSON body to an auth endpoint, mapping non-2xx to `Rejected`.
    async fn post<T: serde::Serialize>(&self, endpoint: &str, body: &T) -> Result<(), AuthError> {
        let url = format!("{}{}{}", self.base_url, AUTH_BASE_PATH, endpoint);

        let response = self.client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            return Err(Self::extract_error(response).await);
        }

        Ok(())
    }

    /// Extract the rejection message from a failed response.
    ///
    /// The API reports failures as `{ "message": ... }`; fall back to the
    /// raw body, then to the status text, when that shape is absent.
    async fn extract_error(response: reqwest::Response) -> AuthError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        warn!(status = %status, body = %body, "Auth API rejected request");

        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    body
                }
            });

        AuthError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}
