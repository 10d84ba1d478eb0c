//! Customer record service.
//!
//! Orchestrates validation and repository access for the CRUD operations
//! and maps store failures to the user-facing error categories: the email
//! uniqueness constraint becomes a field validation error, a missing id
//! becomes not-found, everything else stays a storage error.

use sqlx::SqlitePool;

use solutic_core::CustomerId;

use crate::db::{CustomerRepository, RepositoryError};
use crate::error::AppError;
use crate::models::{CustomerPage, CustomerPayload};
use crate::validation;

/// Page number used when the caller omits one.
const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller omits one.
const DEFAULT_PER_PAGE: u32 = 5;

/// Upper bound on the requested page size.
const MAX_PER_PAGE: u32 = 100;

/// Service for customer CRUD operations.
pub struct CustomerService<'a> {
    customers: CustomerRepository<'a>,
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
        }
    }

    /// Validate and store a new customer, returning its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if any field fails validation or the
    /// email is already registered. Returns `AppError::Database` for other
    /// store failures.
    pub async fn create(&self, payload: &CustomerPayload) -> Result<CustomerId, AppError> {
        let customer = validation::validate(payload).map_err(AppError::Validation)?;

        let id = self
            .customers
            .insert(&customer)
            .await
            .map_err(map_email_conflict)?;

        Ok(id)
    }

    /// Fetch one page of customers whose name contains `filter`
    /// (case-insensitive substring, empty matches all), ordered by name.
    ///
    /// `page` is 1-indexed; `page`/`per_page` default to 1/5 when absent.
    /// The returned page count is `ceil(matching / per_page)`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the store fails.
    pub async fn list(
        &self,
        filter: &str,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<CustomerPage, AppError> {
        let (page, per_page) = normalize_pagination(page, per_page);
        let offset = u64::from(page - 1) * u64::from(per_page);

        let total = self.customers.count(filter).await?;
        let customers = self.customers.list_page(filter, per_page, offset).await?;

        Ok(CustomerPage {
            customers,
            total_pages: total.div_ceil(u64::from(per_page)),
        })
    }

    /// Validate and overwrite an existing customer's fields in place.
    ///
    /// The id is looked up before validation, so an absent id reports
    /// not-found even when the submitted fields are also invalid.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the id does not exist,
    /// `AppError::Validation` for field or uniqueness failures, and
    /// `AppError::Database` for other store failures.
    pub async fn update(&self, id: CustomerId, payload: &CustomerPayload) -> Result<(), AppError> {
        if self.customers.get_by_id(id).await?.is_none() {
            return Err(customer_not_found(id));
        }

        let customer = validation::validate(payload).map_err(AppError::Validation)?;

        self.customers
            .update(id, &customer)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => customer_not_found(id),
                other => map_email_conflict(other),
            })
    }

    /// Delete a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the id does not exist and
    /// `AppError::Database` for other store failures.
    pub async fn delete(&self, id: CustomerId) -> Result<(), AppError> {
        self.customers.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => customer_not_found(id),
            other => AppError::Database(other),
        })
    }
}

/// Clamp pagination input to sane values, applying defaults when absent.
const fn normalize_pagination(page: Option<u32>, per_page: Option<u32>) -> (u32, u32) {
    let page = match page {
        Some(0) | None => DEFAULT_PAGE,
        Some(p) => p,
    };
    let per_page = match per_page {
        Some(0) | None => DEFAULT_PER_PAGE,
        Some(p) if p > MAX_PER_PAGE => MAX_PER_PAGE,
        Some(p) => p,
    };
    (page, per_page)
}

/// Reclassify the email uniqueness constraint as a field validation error.
fn map_email_conflict(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::Conflict(_) => AppError::validation("email", "email already registered"),
        other => AppError::Database(other),
    }
}

fn customer_not_found(id: CustomerId) -> AppError {
    AppError::not_found("customer", format!("customer {id} not found"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::db::MIGRATOR;
    use crate::error::AppError;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn payload(name: &str, email: &str) -> CustomerPayload {
        CustomerPayload {
            name: name.to_owned(),
            address: "Rua das Flores, 10".to_owned(),
            phone: "(11) 99999-9999".to_owned(),
            email: email.to_owned(),
        }
    }

    #[test]
    fn test_normalize_pagination_defaults() {
        assert_eq!(normalize_pagination(None, None), (1, 5));
        assert_eq!(normalize_pagination(Some(0), Some(0)), (1, 5));
        assert_eq!(normalize_pagination(Some(3), Some(10)), (3, 10));
        assert_eq!(normalize_pagination(Some(1), Some(1000)), (1, 100));
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        let first = service.create(&payload("Ana", "ana@example.com")).await.unwrap();
        let second = service.create(&payload("Bia", "bia@example.com")).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields_before_storage() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        let err = service
            .create(&CustomerPayload::default())
            .await
            .unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 4);

        let page = service.list("", None, None).await.unwrap();
        assert!(page.customers.is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_email_is_validation_error() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        service.create(&payload("Ana", "ana@example.com")).await.unwrap();
        let err = service
            .create(&payload("Outra Ana", "ana@example.com"))
            .await
            .unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors["email"], "email already registered");

        // First record remains intact
        let page = service.list("", None, None).await.unwrap();
        assert_eq!(page.customers.len(), 1);
        assert_eq!(page.customers[0].name, "Ana");
    }

    #[tokio::test]
    async fn test_list_filters_sorts_and_paginates() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        let names = ["Jordan", "Joan", "Maria", "Jody", "Joel", "Jocelyn", "Joke"];
        for (i, name) in names.iter().enumerate() {
            service
                .create(&payload(name, &format!("user{i}@example.com")))
                .await
                .unwrap();
        }

        let page = service.list("jo", Some(1), Some(5)).await.unwrap();
        assert_eq!(page.total_pages, 2);
        let names: Vec<&str> = page.customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Joan", "Jocelyn", "Jody", "Joel", "Joke"]);

        let page = service.list("jo", Some(2), Some(5)).await.unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.customers.len(), 1);
        assert_eq!(page.customers[0].name, "Jordan");
    }

    #[tokio::test]
    async fn test_list_empty_store_has_zero_pages() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        let page = service.list("", None, None).await.unwrap();
        assert!(page.customers.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_in_place() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        let id = service.create(&payload("Ana", "ana@example.com")).await.unwrap();
        let created = CustomerRepository::new(&pool)
            .get_by_id(id)
            .await
            .unwrap()
            .unwrap();

        service
            .update(id, &payload("Ana Maria", "ana.maria@example.com"))
            .await
            .unwrap();

        let updated = CustomerRepository::new(&pool)
            .get_by_id(id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.email.as_str(), "ana.maria@example.com");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        let err = service
            .update(CustomerId::new(999), &payload("Ana", "ana@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { scope: "customer", .. }));
    }

    #[tokio::test]
    async fn test_update_missing_id_reported_before_validation() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        let err = service
            .update(CustomerId::new(999), &CustomerPayload::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_validation_error() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        service.create(&payload("Ana", "ana@example.com")).await.unwrap();
        let id = service.create(&payload("Bia", "bia@example.com")).await.unwrap();

        let err = service
            .update(id, &payload("Bia", "ana@example.com"))
            .await
            .unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors["email"], "email already registered");

        // The tentative write rolled back
        let kept = CustomerRepository::new(&pool)
            .get_by_id(id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.email.as_str(), "bia@example.com");
    }

    #[tokio::test]
    async fn test_delete_then_operate_is_not_found() {
        let pool = test_pool().await;
        let service = CustomerService::new(&pool);

        let id = service.create(&payload("Ana", "ana@example.com")).await.unwrap();
        service.delete(id).await.unwrap();

        let err = service.delete(id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = service
            .update(id, &payload("Ana", "ana@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
