//! Request and response bodies for the auth API.

use serde::{Deserialize, Serialize};

/// Body for `POST /send-verification`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationRequest {
    pub phone_number: String,
}

/// Body for `POST /verify-phone`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPhoneRequest {
    pub phone_number: String,
    pub verification_code: String,
}

/// Body for `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Body for `POST /forgot-password`.
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Error body shape the API uses for non-2xx responses.
///
/// Success responses carry no required fields, so this is only
/// consulted when extracting a rejection message.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
