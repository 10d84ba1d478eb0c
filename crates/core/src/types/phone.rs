//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone cannot be empty")]
    Empty,
    /// The input does not match the expected format.
    #[error("phone must use the format (XX) 99999-9999")]
    InvalidFormat,
}

/// A phone number in the national mobile format `(DD) DDDDD-DDDD`.
///
/// The format is fixed: a two-digit area code in parentheses, a space,
/// five digits, a hyphen, and four digits.
///
/// ## Examples
///
/// ```
/// use solutic_core::Phone;
///
/// assert!(Phone::parse("(11) 99999-9999").is_ok());
///
/// assert!(Phone::parse("").is_err());               // empty
/// assert!(Phone::parse("11 99999 9999").is_err());  // wrong punctuation
/// assert!(Phone::parse("(11) 9999-9999").is_err()); // too few digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Exact length of a formatted phone number.
    pub const LENGTH: usize = 15;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns `PhoneError::Empty` if the input is empty, or
    /// `PhoneError::InvalidFormat` if it does not match `(DD) DDDDD-DDDD`.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !is_formatted(s.as_bytes()) {
            return Err(PhoneError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the two-digit area code (without parentheses).
    #[must_use]
    pub fn area_code(&self) -> &str {
        self.0.get(1..3).unwrap_or("")
    }
}

/// Check that the bytes spell `(DD) DDDDD-DDDD` exactly.
fn is_formatted(bytes: &[u8]) -> bool {
    if bytes.len() != Phone::LENGTH {
        return false;
    }

    bytes.iter().enumerate().all(|(i, b)| match i {
        0 => *b == b'(',
        3 => *b == b')',
        4 => *b == b' ',
        10 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
