//! HTTP client for the bottlescout authentication API.

mod client;
mod error;
mod types;

pub use client::AuthClient;
pub use error::AuthError;
pub use types::*;
