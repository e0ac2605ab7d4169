//! Shared state handed to every handler through `State<AppState>`.

use std::sync::Arc;

use crate::{
    config::StoreBackend,
    db::DbPool,
    services::{CreditService, CustomerService},
    store::{MemoryStore, PgStore},
};

#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
    pub credits: CreditService,
    pub backend: StoreBackend,
}

impl AppState {
    /// Wire both services to the PostgreSQL store.
    pub fn postgres(pool: DbPool, hash_cost: u32) -> Self {
        let store = Arc::new(PgStore::new(pool));
        let customers = CustomerService::new(store.clone(), hash_cost);
        let credits = CreditService::new(customers.clone(), store);
        Self {
            customers,
            credits,
            backend: StoreBackend::Postgres,
        }
    }

    /// Wire both services to a fresh in-memory store.
    pub fn in_memory(hash_cost: u32) -> Self {
        let store = Arc::new(MemoryStore::new());
        let customers = CustomerService::new(store.clone(), hash_cost);
        let credits = CreditService::new(customers.clone(), store);
        Self {
            customers,
            credits,
            backend: StoreBackend::Memory,
        }
    }
}
