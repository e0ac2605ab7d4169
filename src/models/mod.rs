//! Data models representing database entities and API payloads.

/// Customer entity and DTOs
pub mod customer;
/// Credit entity, status and DTOs
pub mod credit;
