//! Write-payload validation for user records.
//!
//! Rules are checked field by field in a fixed order (name, email, phone, role)
//! and the first violation is returned.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Role, UserInput};

const MIN_NAME_LENGTH: usize = 2;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("{message}")]
    InvalidField {
        field: &'static str,
        message: &'static str,
    },
}

impl ValidationError {
    /// Name of the offending field, if the failure is field-specific.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotAnObject => None,
            ValidationError::InvalidField { field, .. } => Some(*field),
        }
    }

    fn invalid(field: &'static str, message: &'static str) -> Self {
        ValidationError::InvalidField { field, message }
    }
}

/// Validate an untyped request body and normalize it into a [`UserInput`].
///
/// `phone` and `role` treat `null` as absent; an empty `phone` is dropped and a
/// missing `role` defaults to [`Role::User`]. Unknown fields are ignored.
pub fn validate_user(body: &Value) -> Result<UserInput, ValidationError> {
    let fields = body.as_object().ok_or(ValidationError::NotAnObject)?;

    let name = validate_name(fields)?;
    let email = validate_email(fields)?;
    let phone = validate_phone(fields)?;
    let role = validate_role(fields)?;

    Ok(UserInput {
        name,
        email,
        phone,
        role,
    })
}

fn validate_name(fields: &Map<String, Value>) -> Result<String, ValidationError> {
    let name = match fields.get("name") {
        None | Some(Value::Null) => {
            return Err(ValidationError::invalid("name", "Name is required"))
        }
        Some(Value::String(name)) => name,
        Some(_) => return Err(ValidationError::invalid("name", "Name must be a string")),
    };

    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::invalid(
            "name",
            "Name must be at least 2 characters",
        ));
    }

    Ok(name.clone())
}

fn validate_email(fields: &Map<String, Value>) -> Result<String, ValidationError> {
    let email = match fields.get("email") {
        None | Some(Value::Null) => {
            return Err(ValidationError::invalid("email", "Email is required"))
        }
        Some(Value::String(email)) => email,
        Some(_) => return Err(ValidationError::invalid("email", "Email must be a string")),
    };

    if !is_valid_email(email) {
        return Err(ValidationError::invalid("email", "Invalid email address"));
    }

    Ok(email.clone())
}

fn validate_phone(fields: &Map<String, Value>) -> Result<Option<String>, ValidationError> {
    match fields.get("phone") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(phone)) if phone.is_empty() => Ok(None),
        Some(Value::String(phone)) => Ok(Some(phone.clone())),
        Some(_) => Err(ValidationError::invalid("phone", "Phone must be a string")),
    }
}

fn validate_role(fields: &Map<String, Value>) -> Result<Role, ValidationError> {
    match fields.get("role") {
        None | Some(Value::Null) => Ok(Role::default()),
        Some(Value::String(role)) => role.parse().map_err(|_| {
            ValidationError::invalid("role", "Role must be one of: admin, user, moderator")
        }),
        Some(_) => Err(ValidationError::invalid(
            "role",
            "Role must be one of: admin, user, moderator",
        )),
    }
}

/// Email shape check. A leading dot or a `..` anywhere is rejected in
/// addition to the pattern.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_PATTERN.is_match(email)
}
