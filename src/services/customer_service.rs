//! Customer service - create, read, update and delete customers.
//!
//! Every lookup by id that misses fails with `NotFound("Id {id} not found")`,
//! the same message the credit service relays when a credit names an unknown
//! customer.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::customer::{Customer, CustomerDto, CustomerUpdateDto, NewCustomer},
    password,
    store::CustomerStore,
    validation::normalize_cpf,
};

#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    hash_cost: u32,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>, hash_cost: u32) -> Self {
        Self { store, hash_cost }
    }

    /// Register a new customer. The CPF is stored as bare digits and the
    /// password as a bcrypt hash.
    ///
    /// # Errors
    ///
    /// - `Conflict`: CPF or email already registered
    /// - `Internal`: hashing failed
    pub async fn save(&self, request: CustomerDto) -> AppResult<Customer> {
        let password_hash = password::hash_password(&request.password, self.hash_cost).await?;
        let customer = self
            .store
            .insert(NewCustomer {
                first_name: request.first_name,
                last_name: request.last_name,
                cpf: normalize_cpf(&request.cpf),
                email: request.email,
                income: request.income,
                password_hash,
                zip_code: request.zip_code,
                street: request.street,
            })
            .await?;

        tracing::info!(customer_id = customer.id, "customer created");
        Ok(customer)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Customer> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Id {id} not found")))
    }

    /// Replace the mutable fields of customer `id`.
    pub async fn update(&self, id: i64, changes: CustomerUpdateDto) -> AppResult<Customer> {
        let customer = self.find_by_id(id).await?;
        let updated = self.store.update(&changes.apply_to(customer)).await?;

        tracing::info!(customer_id = id, "customer updated");
        Ok(updated)
    }

    /// Delete customer `id` together with its credits.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let customer = self.find_by_id(id).await?;
        self.store.delete_by_id(customer.id).await?;

        tracing::info!(customer_id = id, "customer deleted");
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
