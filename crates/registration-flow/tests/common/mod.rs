//! Common test utilities for workflow integration tests.

use auth_client::AuthClient;
use draft_store::SessionStore;
use registration_flow::{Field, FieldValue, RegistrationController};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Start a mock auth API server.
pub async fn mock_auth_server() -> MockServer {
    MockServer::start().await
}

/// Create an auth client configured for a mock server.
pub fn test_auth_client(mock_server: &MockServer) -> AuthClient {
    AuthClient::new(mock_server.uri(), Duration::from_secs(5)).unwrap()
}

/// Create a session store with a long test lifetime.
pub fn test_store() -> Arc<SessionStore> {
    Arc::new(SessionStore::new(Duration::from_secs(3600)))
}

/// Create a controller wired to a mock server and the given store.
pub fn test_controller(
    mock_server: &MockServer,
    store: Arc<SessionStore>,
) -> RegistrationController {
    RegistrationController::new(test_auth_client(mock_server), store)
}

/// Fill every form field with valid values.
pub async fn fill_valid_form(controller: &mut RegistrationController) {
    controller
        .update_field(Field::Name, FieldValue::Text("Hong Gildong".into()))
        .await;
    controller
        .update_field(Field::Email, FieldValue::Text("hong@example.com".into()))
        .await;
    controller
        .update_field(Field::Password, FieldValue::Text("sup3rsecret".into()))
        .await;
    controller
        .update_field(Field::ConfirmPassword, FieldValue::Text("sup3rsecret".into()))
        .await;
    controller
        .update_field(Field::Phone, FieldValue::Text("010-1234-5678".into()))
        .await;
    controller
        .update_field(Field::AgreeTerms, FieldValue::Flag(true))
        .await;
    controller
        .update_field(Field::AgreePrivacy, FieldValue::Flag(true))
        .await;
}
