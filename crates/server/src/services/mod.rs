//! Business services orchestrating validation and storage.

pub mod customers;
pub mod export;

pub use customers::CustomerService;
pub use export::ExportService;
