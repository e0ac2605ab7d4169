//! Persistence interfaces and their implementations.
//!
//! Services depend only on the [`CustomerStore`] and [`CreditStore`] traits.
//! Two implementations exist:
//! - [`postgres`]: sqlx queries against the migrated schema
//! - [`memory`]: process-local maps used by tests and `STORE_BACKEND=memory`

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        credit::{Credit, NewCredit},
        customer::{Customer, NewCustomer},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Customer>>;

    /// Insert a customer and return it with its assigned id.
    ///
    /// Fails with `Conflict` when the CPF or email is already taken.
    async fn insert(&self, customer: NewCustomer) -> AppResult<Customer>;

    /// Replace the stored row with `customer` (matched by id).
    async fn update(&self, customer: &Customer) -> AppResult<Customer>;

    /// Delete a customer and every credit it owns.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> AppResult<()>;
}

#[async_trait]
pub trait CreditStore: Send + Sync {
    /// Store `credit` as owned by `customer`.
    ///
    /// The store generates the credit code and sets the default status.
    async fn insert(&self, credit: NewCredit, customer: &Customer) -> AppResult<Credit>;

    async fn find_by_credit_code(&self, code: Uuid) -> AppResult<Option<Credit>>;

    /// All credits of one customer, oldest first. Unknown ids yield an empty list.
    async fn find_all_by_customer(&self, customer_id: i64) -> AppResult<Vec<Credit>>;
}
