//! Customer record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use solutic_core::{CustomerId, Email, Phone};

/// A stored customer record.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    /// Store-assigned identifier, immutable and never reused.
    pub id: CustomerId,
    pub name: String,
    pub address: String,
    pub phone: Phone,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a customer.
///
/// Fields missing from the JSON body default to empty strings, so the
/// validator reports them as required rather than the decoder rejecting
/// the payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// A validated, trimmed candidate record ready for storage.
///
/// Produced only by [`crate::validation::validate`]; every field already
/// satisfies its rule.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub phone: Phone,
    pub email: Email,
}

/// One page of customers plus the total page count for the query.
#[derive(Debug, Serialize)]
pub struct CustomerPage {
    pub customers: Vec<Customer>,
    pub total_pages: u64,
}
