//! Core types for Solutic.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod phone;

pub use email::{Email, EmailError};
pub use id::CustomerId;
pub use phone::{Phone, PhoneError};
