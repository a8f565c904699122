//! SendGrid v3 mail relay client.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::instrument;

use super::mail::{MailRelay, OutboundEmail, RelayError};
use crate::config::MailConfig;

/// SendGrid API client.
#[derive(Clone)]
pub struct SendGridClient {
    client: reqwest::Client,
    send_url: String,
}

impl SendGridClient {
    /// Create a new SendGrid client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &MailConfig) -> Result<Self, RelayError> {
        let mut headers = HeaderMap::new();

        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", config.api_key.expose_secret()))
                .map_err(|e| RelayError::Config(format!("Invalid API key format: {e}")))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            send_url: format!("{}/v3/mail/send", config.api_base),
        })
    }
}

#[async_trait]
impl MailRelay for SendGridClient {
    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: &OutboundEmail) -> Result<(), RelayError> {
        let body = MailSendRequest::from(email);
        let response = self.client.post(&self.send_url).json(&body).send().await?;
        let status = response.status();

        // 202 Accepted is the normal answer; the message is queued, not delivered.
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        tracing::info!(status = status.as_u16(), "Email accepted by relay");
        Ok(())
    }
}

/// Body of `POST /v3/mail/send`.
#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    /// Plain text must come before HTML.
    content: [Content<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    mime: &'static str,
    value: &'a str,
}

impl<'a> From<&'a OutboundEmail> for MailSendRequest<'a> {
    fn from(email: &'a OutboundEmail) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address {
                    email: email.to.as_str(),
                }],
            }],
            from: Address {
                email: email.from.as_str(),
            },
            subject: &email.subject,
            content: [
                Content {
                    mime: "text/plain",
                    value: &email.text_body,
                },
                Content {
                    mime: "text/html",
                    value: &email.html_body,
                },
            ],
        }
    }
}
