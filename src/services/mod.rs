//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They resolve entities through the store traits and turn missing or
//! mismatched records into domain errors.

pub mod credit_service;
pub mod customer_service;

pub use credit_service::CreditService;
pub use customer_service::CustomerService;
