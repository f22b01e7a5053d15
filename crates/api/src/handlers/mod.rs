//! Request handlers, one module per resource.
//!
//! Admin handlers take [`AuthUser`](crate::middleware::auth::AuthUser) as
//! their first extractor. Request DTOs that only the HTTP layer needs live
//! beside their handlers.

pub mod alert;
pub mod auth;
pub mod camera;
pub mod detection;
pub mod entrance;
pub mod public;
pub mod user;

use std::borrow::Cow;

use crowdwatch_core::validation::{is_valid_phone, validate_password_strength, MIN_PASSWORD_LENGTH};
use validator::ValidationError;

/// `validator` rule: ten-digit phone number.
pub(crate) fn phone_number(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message(Cow::Borrowed("Phone number must be 10 digits")))
    }
}

/// `validator` rule: minimum password length.
pub(crate) fn password_strength(value: &str) -> Result<(), ValidationError> {
    validate_password_strength(value, MIN_PASSWORD_LENGTH)
        .map_err(|msg| ValidationError::new("password").with_message(Cow::Owned(msg)))
}
