//! Session-scoped key-value storage for in-progress form drafts.
//!
//! Drafts live only for the duration of a session. The store is an
//! injected capability so the registration workflow can run against an
//! in-memory backend in tests instead of real browser storage.

mod error;
mod store;

pub use error::DraftError;
pub use store::{DraftStore, SessionStore};
