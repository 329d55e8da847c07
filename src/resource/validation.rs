//! # Validation
//!
//! Argument checks run before any API call.

use regex::Regex;

use crate::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::error::ResourceError;
use crate::model::{AlternateContactArgs, ContactDetails};

const EMAIL_PATTERN: &str = r"[\w+=,.-]+@[\w.-]+\.[\w]+";
const PHONE_PATTERN: &str = r"^[\s0-9()+-]+$";

fn is_match(pattern: &str, value: &str, field: &'static str) -> Result<bool, ResourceError> {
    let regex = Regex::new(pattern)
        .map_err(|e| ResourceError::validation(field, format!("failed to compile regex: {e}")))?;
    Ok(regex.is_match(value))
}

fn validate_length(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<(), ResourceError> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(ResourceError::validation(
            field,
            format!("expected length between {min} and {max}, got {len}"),
        ))
    }
}

/// AWS account IDs are exactly 12 digits
pub fn validate_account_id(account_id: &str) -> Result<(), ResourceError> {
    if account_id.len() == 12 && account_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ResourceError::validation(
            "account_id",
            format!("{account_id:?} is not a valid AWS account ID (12 digits)"),
        ))
    }
}

/// Validate the mutable contact fields
pub fn validate_contact_details(details: &ContactDetails) -> Result<(), ResourceError> {
    if !is_match(EMAIL_PATTERN, &details.email_address, "email_address")? {
        return Err(ResourceError::validation(
            "email_address",
            format!("must be a valid email address, got {:?}", details.email_address),
        ));
    }
    validate_length(&details.name, "name", 1, 64)?;
    if !is_match(PHONE_PATTERN, &details.phone_number, "phone_number")? {
        return Err(ResourceError::validation(
            "phone_number",
            format!("must be a valid phone number, got {:?}", details.phone_number),
        ));
    }
    validate_length(&details.title, "title", 1, 50)
}

/// Validate create arguments for an alternate contact
pub fn validate_alternate_contact(args: &AlternateContactArgs) -> Result<(), ResourceError> {
    if let Some(account_id) = &args.account_id {
        validate_account_id(account_id)?;
    }
    validate_contact_details(&args.details)
}

/// Generated passwords must be 5 to 128 characters
pub fn validate_password_length(length: usize) -> Result<(), ResourceError> {
    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(ResourceError::validation(
            "password_length",
            format!(
                "expected between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH}, got {length}"
            ),
        ))
    }
}
