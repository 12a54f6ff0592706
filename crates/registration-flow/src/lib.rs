//! Registration workflow for the bottlescout signup page.
//!
//! The controller collects registrant data, gates submission on phone
//! verification, persists the in-progress draft to an injected session
//! store, and submits the final registration request through the auth
//! API client.

pub mod controller;
pub mod form;
pub mod notice;
pub mod validate;
pub mod verification;

pub use controller::{RegistrationController, DRAFT_KEY, REDIRECT_DELAY};
pub use form::{Draft, Field, FieldValue, RegistrationForm, ValidationErrors};
pub use notice::Notice;
pub use validate::{is_valid_email, is_valid_phone, validate};
pub use verification::{PhoneVerification, CODE_TTL_SECS};
