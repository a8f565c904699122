//! Seller application submission.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pehenava_core::Email;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::{ApplicationMailer, SellerApplication};
use crate::state::AppState;

const MISSING_FIELDS: &str = "Missing required fields";

/// Application form as posted by the "Sell with us" page.
///
/// Every field is optional here so a missing field becomes a 400 with the
/// usual body instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub product_desc: Option<String>,
}

impl ApplicationForm {
    /// Check that all fields are present and the email parses.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` naming the problem.
    pub fn validate(self) -> Result<SellerApplication> {
        let (Some(brand_name), Some(email), Some(product_desc)) = (
            non_blank(self.brand_name),
            non_blank(self.email),
            non_blank(self.product_desc),
        ) else {
            return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
        };

        let email = Email::parse(&email)
            .map_err(|_| AppError::BadRequest("Invalid email address".to_string()))?;

        Ok(SellerApplication {
            brand_name,
            email,
            product_desc,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Success body.
#[derive(Debug, Serialize)]
pub struct SentResponse {
    pub message: &'static str,
}

/// Submit a seller application.
///
/// POST /api/send-application
///
/// Sends a confirmation to the applicant and a notice to the sellers inbox.
#[instrument(skip(state, payload))]
pub async fn send_application(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ApplicationForm>, JsonRejection>,
) -> Result<Json<SentResponse>> {
    // A body that isn't a JSON object is treated like one with no fields.
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable application body");
            ApplicationForm::default()
        }
    };

    let application = form.validate()?;

    ApplicationMailer::new(state.relay(), &state.config().mail)
        .submit(&application)
        .await?;

    tracing::info!(brand = %application.brand_name, "Seller application sent");

    Ok(Json(SentResponse {
        message: "Emails sent successfully",
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(brand: Option<&str>, email: Option<&str>, desc: Option<&str>) -> ApplicationForm {
        ApplicationForm {
            brand_name: brand.map(String::from),
            email: email.map(String::from),
            product_desc: desc.map(String::from),
        }
    }

    #[test]
    fn test_validate_complete_form() {
        let app = form(Some(" Acme "), Some("a@b.com"), Some("Sarees"))
            .validate()
            .unwrap();
        assert_eq!(app.brand_name, "Acme");
        assert_eq!(app.email.as_str(), "a@b.com");
        assert_eq!(app.product_desc, "Sarees");
    }

    #[test]
    fn test_validate_missing_field() {
        let err = form(Some("Acme"), None, Some("Sarees")).validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == MISSING_FIELDS));
    }

    #[test]
    fn test_validate_blank_field() {
        let err = form(Some("   "), Some("a@b.com"), Some("Sarees"))
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == MISSING_FIELDS));
    }

    #[test]
    fn test_validate_bad_email() {
        let err = form(Some("Acme"), Some("not-an-email"), Some("Sarees"))
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid email address"));
    }

    #[test]
    fn test_form_uses_camel_case() {
        let form: ApplicationForm = serde_json::from_str(
            r#"{"brandName":"Acme","email":"a@b.com","productDesc":"Sarees"}"#,
        )
        .unwrap();
        assert!(form.validate().is_ok());
    }
}
