//! Input validation for API requests.
//!
//! Validators return `Result<(), String>` with a user-facing message;
//! handlers map the message into an `ApiError`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for phone numbers: optional leading +, then digits with
    /// optional spaces, dashes, or parentheses
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 ()-]{2,30}$").unwrap();

    /// Verification codes are exactly six digits
    static ref CODE_REGEX: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

/// Validate a phone number
pub fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.is_empty() {
        return Err("Phone number is required.".to_string());
    }

    if !PHONE_REGEX.is_match(phone) {
        return Err("Invalid phone number format.".to_string());
    }

    Ok(())
}

/// Validate a password against the minimum length rule
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long.".to_string());
    }

    Ok(())
}

/// Validate the shape of a verification code
pub fn validate_code(code: &str) -> Result<(), String> {
    if !CODE_REGEX.is_match(code) {
        return Err("Invalid verification code.".to_string());
    }

    Ok(())
}

/// Parse a form-submitted id into a positive integer
pub fn parse_id(value: &str, field_name: &str) -> Result<i64, String> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("Invalid {} value.", field_name)),
    }
}
