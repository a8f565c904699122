//! Seller application emails.
//!
//! Every application produces two messages: a confirmation to the applicant
//! and a notice to the internal sellers inbox. They are sent in that order;
//! if the confirmation fails the notice is not attempted.

use askama::Template;
use pehenava_core::Email;
use thiserror::Error;
use tracing::instrument;

use super::mail::{MailRelay, OutboundEmail, RelayError};
use crate::config::MailConfig;

const CONFIRMATION_SUBJECT: &str = "Welcome to Pehenava! Your Application is Received.";

/// HTML template for the applicant confirmation.
#[derive(Template)]
#[template(path = "email/application_received.html")]
struct ApplicationReceivedHtml<'a> {
    brand_name: &'a str,
}

/// Plain text template for the applicant confirmation.
#[derive(Template)]
#[template(path = "email/application_received.txt")]
struct ApplicationReceivedText<'a> {
    brand_name: &'a str,
}

/// HTML template for the internal notice.
#[derive(Template)]
#[template(path = "email/application_notice.html")]
struct ApplicationNoticeHtml<'a> {
    brand_name: &'a str,
    email: &'a str,
    product_desc: &'a str,
}

/// Plain text template for the internal notice.
#[derive(Template)]
#[template(path = "email/application_notice.txt")]
struct ApplicationNoticeText<'a> {
    brand_name: &'a str,
    email: &'a str,
    product_desc: &'a str,
}

/// Errors that can occur while processing an application.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// The relay failed to accept one of the messages.
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),
}

/// A validated seller application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerApplication {
    pub brand_name: String,
    pub email: Email,
    pub product_desc: String,
}

/// Renders and sends the two application emails.
pub struct ApplicationMailer<'a> {
    relay: &'a dyn MailRelay,
    config: &'a MailConfig,
}

impl<'a> ApplicationMailer<'a> {
    #[must_use]
    pub const fn new(relay: &'a dyn MailRelay, config: &'a MailConfig) -> Self {
        Self { relay, config }
    }

    /// Send the confirmation, then the internal notice.
    ///
    /// # Errors
    ///
    /// Returns the first rendering or relay failure. Nothing after it is sent.
    #[instrument(skip(self, application), fields(brand = %application.brand_name))]
    pub async fn submit(&self, application: &SellerApplication) -> Result<(), ApplicationError> {
        let confirmation = self.confirmation(application)?;
        let notice = self.notice(application)?;

        self.relay.send(&confirmation).await?;
        tracing::debug!("Confirmation sent");
        self.relay.send(&notice).await?;
        tracing::debug!("Notice sent");

        Ok(())
    }

    fn confirmation(&self, application: &SellerApplication) -> Result<OutboundEmail, askama::Error> {
        let brand_name = application.brand_name.as_str();
        Ok(OutboundEmail {
            to: application.email.clone(),
            from: self.config.from.clone(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            text_body: ApplicationReceivedText { brand_name }.render()?,
            html_body: ApplicationReceivedHtml { brand_name }.render()?,
        })
    }

    fn notice(&self, application: &SellerApplication) -> Result<OutboundEmail, askama::Error> {
        let brand_name = application.brand_name.as_str();
        let email = application.email.as_str();
        let product_desc = application.product_desc.as_str();
        Ok(OutboundEmail {
            to: self.config.notify_to.clone(),
            from: self.config.from.clone(),
            subject: format!("New Seller Application: {brand_name}"),
            text_body: ApplicationNoticeText {
                brand_name,
                email,
                product_desc,
            }
            .render()?,
            html_body: ApplicationNoticeHtml {
                brand_name,
                email,
                product_desc,
            }
            .render()?,
        })
    }
}
