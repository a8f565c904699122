//! Mail relay abstraction.
//!
//! Handlers never talk to a mail provider directly; they hand an
//! [`OutboundEmail`] to whatever [`MailRelay`] the application state holds.

use async_trait::async_trait;
use pehenava_core::Email;
use thiserror::Error;

/// Errors reported by a mail relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The relay could not be reached or the request timed out.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("relay rejected message: {status} - {detail}")]
    Rejected {
        status: u16,
        /// Provider diagnostic body, logged but never shown to clients.
        detail: String,
    },

    /// The relay client could not be configured.
    #[error("invalid relay configuration: {0}")]
    Config(String),
}

/// A single email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: Email,
    pub from: Email,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Something that can deliver an email.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// Deliver one message. Implementations do not retry.
    async fn send(&self, email: &OutboundEmail) -> Result<(), RelayError>;
}
