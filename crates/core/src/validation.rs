//! Input validation
//!
//! Checks that run before anything reaches storage. Failures carry one message
//! per offending field.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A validation failure scoped to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,

    /// Human-readable explanation.
    pub message: String,
}

/// One or more field-scoped validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// An empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single failure.
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();

        errors.push(field, message);

        errors
    }

    /// Record a failure.
    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Whether no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded failures in insertion order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether a failure was recorded for `field`.
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid input")?;

        for (index, error) in self.errors.iter().enumerate() {
            let separator = if index == 0 { ": " } else { ", " };

            write!(f, "{separator}{} {}", error.field, error.message)?;
        }

        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Validate a new password against its confirmation.
///
/// # Errors
///
/// Returns field errors when the password is too short or the confirmation differs.
pub fn validate_password_change(
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push("password", "must be at least 8 characters");
    }

    if password != confirmation {
        errors.push("password_confirmation", "does not match password");
    }

    errors.into_result()
}

/// Validate an email address's shape.
///
/// # Errors
///
/// Returns a field error unless the address has a non-empty local part and domain.
pub fn validate_email(email: &str) -> Result<(), ValidationErrors> {
    let valid = email
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        });

    if valid {
        Ok(())
    } else {
        Err(ValidationErrors::single("email", "must be a valid email address"))
    }
}

/// Where the customer ships the device from and where payment goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    /// Recipient's full name.
    pub full_name: String,

    /// First address line.
    pub address_line1: String,

    /// Optional second address line.
    #[serde(default)]
    pub address_line2: Option<String>,

    /// City or town.
    pub city: String,

    /// State, county or region.
    #[serde(default)]
    pub region: Option<String>,

    /// Postal or ZIP code.
    pub postal_code: String,

    /// Country name or code.
    pub country: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

impl ShippingDetails {
    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns one field error per blank required field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (field, value) in [
            ("full_name", &self.full_name),
            ("address_line1", &self.address_line1),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                errors.push(field, "is required");
            }
        }

        errors.into_result()
    }
}
