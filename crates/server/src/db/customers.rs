//! Customer repository for database operations.
//!
//! All queries are runtime-checked `sqlx` queries against the `customers`
//! table. Rows decode through [`CustomerRow`] and re-parse the typed fields,
//! so corrupt stored data surfaces as an explicit error instead of leaking
//! into the domain model.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use solutic_core::{CustomerId, Email, Phone};

use super::RepositoryError;
use crate::models::{Customer, NewCustomer};

/// Raw database row for a customer.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    address: String,
    phone: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let phone = Phone::parse(&row.phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            name: row.name,
            address: row.address,
            phone,
            email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Map a sqlx error to `Conflict` when it is the email uniqueness
/// constraint, using the driver's structured error kind rather than
/// matching on the message text.
fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new customer and return its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, customer: &NewCustomer) -> Result<CustomerId, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO customers (name, address, phone, email, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(customer.phone.as_str())
        .bind(customer.email.as_str())
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(CustomerId::new(result.last_insert_rowid()))
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, address, phone, email, created_at, updated_at
            FROM customers
            WHERE id = ?1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    /// Count customers whose name contains `filter` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, filter: &str) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM customers
            WHERE name LIKE '%' || ?1 || '%'
            ",
        )
        .bind(filter)
        .fetch_one(self.pool)
        .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Fetch one page of customers whose name contains `filter`
    /// (case-insensitive), ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_page(
        &self,
        filter: &str,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, address, phone, email, created_at, updated_at
            FROM customers
            WHERE name LIKE '%' || ?1 || '%'
            ORDER BY name ASC, id ASC
            LIMIT ?2 OFFSET ?3
            ",
        )
        .bind(filter)
        .bind(i64::from(limit))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    /// Fetch all customers whose name contains `filter` (case-insensitive),
    /// ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_all(&self, filter: &str) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, address, phone, email, created_at, updated_at
            FROM customers
            WHERE name LIKE '%' || ?1 || '%'
            ORDER BY name ASC, id ASC
            ",
        )
        .bind(filter)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    /// Overwrite a customer's fields in place, preserving id and creation
    /// time.
    ///
    /// Runs in a transaction so the lookup and the write commit together;
    /// on any failure the transaction rolls back on drop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id does not exist.
    /// Returns `RepositoryError::Conflict` if the new email is already
    /// registered to another customer.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CustomerId,
        customer: &NewCustomer,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM customers WHERE id = ?1")
            .bind(id.as_i64())
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query(
            r"
            UPDATE customers
            SET name = ?1, address = ?2, phone = ?3, email = ?4, updated_at = ?5
            WHERE id = ?6
            ",
        )
        .bind(&customer.name)
        .bind(&customer.address)
        .bind(customer.phone.as_str())
        .bind(customer.email.as_str())
        .bind(Utc::now())
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        tx.commit().await?;

        Ok(())
    }

    /// Delete a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
