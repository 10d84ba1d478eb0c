//! Spreadsheet export of customer records.
//!
//! Renders a filtered, name-sorted record set into a single-sheet xlsx
//! workbook held entirely in memory, suitable for direct download.

use rust_xlsxwriter::{Workbook, XlsxError};
use sqlx::SqlitePool;

use crate::db::CustomerRepository;
use crate::error::AppError;
use crate::models::Customer;

/// File name offered for the downloaded spreadsheet.
pub const EXPORT_FILE_NAME: &str = "customers.xlsx";

/// MIME type of an xlsx workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Column headers, in record field order.
const HEADERS: [&str; 5] = ["id", "name", "address", "phone", "email"];

/// Service for exporting customer records to a spreadsheet.
pub struct ExportService<'a> {
    customers: CustomerRepository<'a>,
}

impl<'a> ExportService<'a> {
    /// Create a new export service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
        }
    }

    /// Export all customers whose name contains `filter` (case-insensitive
    /// substring, empty matches all), ordered by name ascending, as xlsx
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no customers match,
    /// `AppError::Database` if the store fails, and `AppError::Internal` if
    /// the workbook cannot be rendered.
    pub async fn export(&self, filter: &str) -> Result<Vec<u8>, AppError> {
        let customers = self.customers.list_all(filter).await?;

        if customers.is_empty() {
            return Err(AppError::not_found("export", "no customers to export"));
        }

        tracing::info!(rows = customers.len(), "exporting customers");

        render_workbook(&customers)
            .map_err(|e| AppError::Internal(format!("spreadsheet rendering failed: {e}")))
    }
}

/// Render customers into a single-sheet workbook: one header row, then one
/// row per record, columns in record field order.
#[allow(clippy::cast_precision_loss)]
fn render_workbook(customers: &[Customer]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Customers")?;

    for (col, header) in (0u16..).zip(HEADERS) {
        sheet.write_string(0, col, header)?;
    }

    for (row, customer) in (1u32..).zip(customers) {
        sheet.write_number(row, 0, customer.id.as_i64() as f64)?;
        sheet.write_string(row, 1, customer.name.as_str())?;
        sheet.write_string(row, 2, customer.address.as_str())?;
        sheet.write_string(row, 3, customer.phone.as_str())?;
        sheet.write_string(row, 4, customer.email.as_str())?;
    }

    workbook.save_to_buffer()
}
