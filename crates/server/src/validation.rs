//! Field validation for submitted customer records.
//!
//! The rules are evaluated independently so a response reports every failing
//! field at once, not just the first.

use solutic_core::{Email, Phone};

use crate::error::FieldErrors;
use crate::models::{CustomerPayload, NewCustomer};

/// Validate a submitted customer, trimming all fields first.
///
/// Rules:
/// - `name` and `address` must be non-empty after trimming
/// - `phone` must be non-empty and match `(XX) 99999-9999`
/// - `email` must be non-empty and have a `local@domain.tld` shape
///
/// # Errors
///
/// Returns a field-to-message map naming every field that failed its rule.
pub fn validate(payload: &CustomerPayload) -> Result<NewCustomer, FieldErrors> {
    let name = payload.name.trim();
    let address = payload.address.trim();
    let phone = payload.phone.trim();
    let email = payload.email.trim();

    let mut errors = FieldErrors::new();

    if name.is_empty() {
        errors.insert("name", "name is required".to_owned());
    }

    if address.is_empty() {
        errors.insert("address", "address is required".to_owned());
    }

    let phone = if phone.is_empty() {
        errors.insert("phone", "phone is required".to_owned());
        None
    } else {
        match Phone::parse(phone) {
            Ok(phone) => Some(phone),
            Err(_) => {
                errors.insert(
                    "phone",
                    "invalid phone, use format (XX) 99999-9999".to_owned(),
                );
                None
            }
        }
    };

    let email = if email.is_empty() {
        errors.insert("email", "email is required".to_owned());
        None
    } else {
        match Email::parse(email) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.insert("email", "invalid email".to_owned());
                None
            }
        }
    };

    match (phone, email) {
        (Some(phone), Some(email)) if errors.is_empty() => Ok(NewCustomer {
            name: name.to_owned(),
            address: address.to_owned(),
            phone,
            email,
        }),
        _ => Err(errors),
    }
}
