//! Registration workflow controller.
//!
//! Orchestrates the signup flow: field updates with draft persistence,
//! phone verification as a precondition for submission, and the final
//! registration call. Every failure is converted to user-visible text at
//! the operation boundary; no operation leaves the form unusable.

use crate::form::{Draft, Field, FieldValue, RegistrationForm, ValidationErrors};
use crate::notice::{Notice, RESTORE_NOTICE_TTL, SUCCESS_NOTICE_TTL};
use crate::validate::{is_valid_phone, validate};
use crate::verification::PhoneVerification;
use auth_client::{AuthClient, AuthError, RegisterRequest};
use chrono::Utc;
use draft_store::DraftStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Session storage key for the persisted draft.
pub const DRAFT_KEY: &str = "bottlescout.registration.draft";

/// How long the host waits after a successful submission before
/// navigating to the sign-in view.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Controller for one registration workflow instance.
///
/// The verification state is shared with the countdown ticker task; all
/// other state has a single owner. Each network operation guards against
/// re-entrancy through its own busy flag.
pub struct RegistrationController {
    client: AuthClient,
    store: Arc<dyn DraftStore>,
    form: RegistrationForm,
    errors: ValidationErrors,
    verification: Arc<RwLock<PhoneVerification>>,
    notice: Option<Notice>,
    is_submitting: bool,
    completed: bool,
    countdown_task: Option<JoinHandle<()>>,
}

impl RegistrationController {
    pub fn new(client: AuthClient, store: Arc<dyn DraftStore>) -> Self {
        Self {
            client,
            store,
            form: RegistrationForm::default(),
            errors: ValidationErrors::default(),
            verification: Arc::new(RwLock::new(PhoneVerification::default())),
            notice: None,
            is_submitting: false,
            completed: false,
            countdown_task: None,
        }
    }

    /// Restore a previously saved draft, if any. Absence is normal; a
    /// corrupt draft is logged and ignored.
    #[instrument(skip(self))]
    pub async fn restore_draft(&mut self) {
        let raw = match self.store.get(DRAFT_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                warn!("Failed to read saved draft: {}", e);
                return;
            }
        };

        let draft: Draft = match serde_json::from_str(&raw) {
            Ok(d) => d,
            Err(e) => {
                warn!("Ignoring corrupt saved draft: {}", e);
                return;
            }
        };

        debug!(saved_at = %draft.saved_at, "Restoring saved draft");
        self.form = draft.form;

        if self.form.has_text() {
            self.notice = Some(Notice::new("Restored your saved draft", RESTORE_NOTICE_TTL));
        }
    }

    /// Merge one field into the form, persist the draft, and clear that
    /// field's validation error. Phone updates go through the
    /// re-verification reset.
    pub async fn update_field(&mut self, field: Field, value: FieldValue) {
        match (field, value) {
            (Field::Phone, FieldValue::Text(v)) => {
                self.change_phone(v).await;
                return;
            }
            (Field::Name, FieldValue::Text(v)) => self.form.name = v,
            (Field::Email, FieldValue::Text(v)) => self.form.email = v,
            (Field::Password, FieldValue::Text(v)) => self.form.password = v,
            (Field::ConfirmPassword, FieldValue::Text(v)) => self.form.confirm_password = v,
            (Field::AgreeTerms, FieldValue::Flag(v)) => self.form.agree_terms = v,
            (Field::AgreePrivacy, FieldValue::Flag(v)) => self.form.agree_privacy = v,
            (Field::AgreeMarketing, FieldValue::Flag(v)) => self.form.agree_marketing = v,
            (field, _) => {
                debug!(%field, "Ignoring update with mismatched value kind");
                return;
            }
        }

        self.errors.clear(field);
        self.persist().await;
    }

    /// Update the phone number. A verified number that changes must be
    /// verified again before submission.
    pub async fn change_phone(&mut self, value: impl Into<String>) {
        self.form.phone = value.into();

        {
            let mut verification = self.verification.write().await;
            if verification.is_verified {
                debug!("Phone changed after verification, re-verification required");
                verification.is_verified = false;
            }
        }

        self.errors.clear(Field::Phone);
        self.persist().await;
    }

    /// Update the code input. Not part of the form, so not persisted.
    pub async fn set_verification_code(&mut self, code: impl Into<String>) {
        self.verification.write().await.verification_code = code.into();
        self.errors.clear(Field::VerificationCode);
    }

    /// Request a verification code for the entered phone number.
    #[instrument(skip(self))]
    pub async fn send_verification(&mut self) {
        if self.verification.read().await.is_sending {
            return;
        }

        let phone = self.form.phone.trim().to_string();
        if phone.is_empty() || !is_valid_phone(&phone) {
            self.errors
                .set(Field::Phone, "Enter a valid mobile number, e.g. 010-1234-5678");
            return;
        }

        self.verification.write().await.is_sending = true;

        match self.client.send_verification(&phone).await {
            Ok(()) => {
                self.errors.clear(Field::Phone);
                self.start_countdown().await;
                self.notice = Some(Notice::new("Verification code sent", SUCCESS_NOTICE_TTL));
                info!("Verification code sent");
            }
            Err(e) => {
                self.errors.set(Field::Phone, user_message(&e));
            }
        }

        // Cleared last, whatever the outcome.
        self.verification.write().await.is_sending = false;
    }

    /// Submit the entered code for verification.
    #[instrument(skip(self))]
    pub async fn verify_code(&mut self) {
        let code = {
            let verification = self.verification.read().await;
            if verification.is_verifying {
                return;
            }
            verification.verification_code.trim().to_string()
        };

        if code.is_empty() {
            self.errors
                .set(Field::VerificationCode, "Enter the verification code");
            return;
        }

        let phone = self.form.phone.trim().to_string();
        self.verification.write().await.is_verifying = true;

        match self.client.verify_phone(&phone, &code).await {
            Ok(()) => {
                {
                    let mut verification = self.verification.write().await;
                    verification.is_verified = true;
                    verification.countdown = 0;
                }
                self.cancel_countdown();
                self.errors.clear(Field::VerificationCode);
                self.notice = Some(Notice::new("Phone number verified", SUCCESS_NOTICE_TTL));
                info!("Phone number verified");
            }
            Err(e) => {
                self.errors.set(Field::VerificationCode, user_message(&e));
            }
        }

        self.verification.write().await.is_verifying = false;
    }

    /// Validate and submit the registration.
    ///
    /// A no-op while any network operation is in flight: submit stays
    /// disabled whenever a busy flag is set.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) {
        if self.is_submitting {
            return;
        }

        let verified = {
            let verification = self.verification.read().await;
            if verification.is_sending || verification.is_verifying {
                return;
            }
            verification.is_verified
        };

        // Fully replaced on every submission attempt.
        self.errors = validate(&self.form, verified);
        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "Submission blocked by validation");
            return;
        }

        self.is_submitting = true;

        let request = RegisterRequest {
            name: self.form.name.trim().to_string(),
            email: self.form.email.trim().to_string(),
            password: self.form.password.clone(),
            phone: self.form.phone.trim().to_string(),
        };

        match self.client.register(&request).await {
            Ok(()) => {
                if let Err(e) = self.store.remove(DRAFT_KEY).await {
                    warn!("Failed to remove persisted draft: {}", e);
                }
                self.notice = Some(Notice::new(
                    "Welcome to bottlescout! Taking you to sign in",
                    SUCCESS_NOTICE_TTL,
                ));
                self.completed = true;
                info!("Registration accepted");
            }
            Err(e) => {
                self.errors.set(Field::General, user_message(&e));
            }
        }

        self.is_submitting = false;
    }

    /// Reset the workflow: empty form, no errors, verification state and
    /// persisted draft gone.
    #[instrument(skip(self))]
    pub async fn reset_form(&mut self) {
        self.cancel_countdown();
        self.form = RegistrationForm::default();
        self.errors = ValidationErrors::default();
        self.verification.write().await.reset();
        self.notice = None;

        if let Err(e) = self.store.remove(DRAFT_KEY).await {
            warn!("Failed to remove persisted draft: {}", e);
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Snapshot of the verification state.
    pub async fn verification(&self) -> PhoneVerification {
        self.verification.read().await.clone()
    }

    /// The current notice, if one is showing. Expired notices read as
    /// absent.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().and_then(Notice::message)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// True once registration succeeded; the host should navigate to the
    /// sign-in view after `REDIRECT_DELAY`.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Persist the full form under the draft key. Failure to persist must
    /// not interrupt typing, so it is logged and swallowed.
    async fn persist(&self) {
        let draft = Draft {
            form: self.form.clone(),
            saved_at: Utc::now(),
        };

        match serde_json::to_string(&draft) {
            Ok(raw) => {
                if let Err(e) = self.store.put(DRAFT_KEY, &raw).await {
                    warn!("Failed to persist draft: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize draft: {}", e),
        }
    }

    /// Arm the code-validity countdown and (re)start the one-second
    /// ticker. The task stops itself at zero.
    async fn start_countdown(&mut self) {
        self.cancel_countdown();
        self.verification.write().await.start_countdown();

        let verification = Arc::clone(&self.verification);
        self.countdown_task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately.
            interval.tick().await;

            loop {
                interval.tick().await;
                let mut state = verification.write().await;
                state.tick();
                if state.countdown == 0 {
                    break;
                }
            }
        }));
    }

    fn cancel_countdown(&mut self) {
        if let Some(task) = self.countdown_task.take() {
            task.abort();
        }
    }
}

impl Drop for RegistrationController {
    fn drop(&mut self) {
        self.cancel_countdown();
    }
}

/// Map a client error to the text shown to the user.
///
/// Transport failures get a generic message; server rejections are
/// surfaced verbatim without re-classification.
fn user_message(err: &AuthError) -> String {
    if err.is_unreachable() {
        "Cannot reach the server. Please try again.".to_string()
    } else if let Some(message) = err.server_message() {
        message.to_string()
    } else {
        err.to_string()
    }
}
