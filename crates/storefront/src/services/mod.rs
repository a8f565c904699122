//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `mail` - Mail relay abstraction shared by every outbound email
//! - `sendgrid` - SendGrid implementation of the relay
//! - `applications` - Seller application confirmation and notice emails

pub mod applications;
pub mod mail;
pub mod sendgrid;

pub use applications::{ApplicationError, ApplicationMailer, SellerApplication};
pub use mail::{MailRelay, OutboundEmail, RelayError};
pub use sendgrid::SendGridClient;
