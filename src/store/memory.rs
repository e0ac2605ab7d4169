//! In-memory store.
//!
//! Both tables sit behind one mutex so uniqueness checks and cascading
//! deletes see a consistent view. Credits keep only the owner id and are
//! joined with the current customer row when read, like the SQL store does.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{CreditStore, CustomerStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        credit::{Credit, CreditStatus, NewCredit},
        customer::{Customer, NewCustomer},
    },
};

#[derive(Debug, Clone)]
struct CreditRecord {
    id: i64,
    credit_code: Uuid,
    credit_value: Decimal,
    day_first_installment: NaiveDate,
    number_of_installments: i32,
    status: CreditStatus,
    customer_id: i64,
}

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    credits: Vec<CreditRecord>,
    next_customer_id: i64,
    next_credit_id: i64,
}

impl Tables {
    fn ensure_unique(&self, id: Option<i64>, cpf: &str, email: &str) -> AppResult<()> {
        for other in self.customers.values() {
            if Some(other.id) == id {
                continue;
            }
            if other.cpf == cpf {
                return Err(AppError::Conflict(format!("cpf {cpf} already registered")));
            }
            if other.email == email {
                return Err(AppError::Conflict(format!(
                    "email {email} already registered"
                )));
            }
        }
        Ok(())
    }

    fn join(&self, record: &CreditRecord) -> AppResult<Credit> {
        let customer = self.customers.get(&record.customer_id).ok_or_else(|| {
            AppError::Internal(format!(
                "credit {} references missing customer {}",
                record.credit_code, record.customer_id
            ))
        })?;
        Ok(Credit {
            id: record.id,
            credit_code: record.credit_code,
            credit_value: record.credit_value,
            day_first_installment: record.day_first_installment,
            number_of_installments: record.number_of_installments,
            status: record.status,
            customer: customer.clone(),
        })
    }
}

/// Cloneable handle; clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Customer>> {
        Ok(self.lock()?.customers.get(&id).cloned())
    }

    async fn insert(&self, customer: NewCustomer) -> AppResult<Customer> {
        let mut tables = self.lock()?;
        tables.ensure_unique(None, &customer.cpf, &customer.email)?;

        tables.next_customer_id += 1;
        let stored = Customer {
            id: tables.next_customer_id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            email: customer.email,
            income: customer.income,
            password: customer.password_hash,
            zip_code: customer.zip_code,
            street: customer.street,
        };
        tables.customers.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, customer: &Customer) -> AppResult<Customer> {
        let mut tables = self.lock()?;
        if !tables.customers.contains_key(&customer.id) {
            return Err(AppError::NotFound(format!("Id {} not found", customer.id)));
        }
        tables.ensure_unique(Some(customer.id), &customer.cpf, &customer.email)?;
        tables.customers.insert(customer.id, customer.clone());
        Ok(customer.clone())
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut tables = self.lock()?;
        tables.customers.remove(&id);
        tables.credits.retain(|c| c.customer_id != id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.lock().map(|_| ())
    }
}

#[async_trait]
impl CreditStore for MemoryStore {
    async fn insert(&self, credit: NewCredit, customer: &Customer) -> AppResult<Credit> {
        let mut tables = self.lock()?;
        if !tables.customers.contains_key(&customer.id) {
            return Err(AppError::NotFound(format!("Id {} not found", customer.id)));
        }

        tables.next_credit_id += 1;
        let record = CreditRecord {
            id: tables.next_credit_id,
            credit_code: Uuid::new_v4(),
            credit_value: credit.credit_value,
            day_first_installment: credit.day_first_installment,
            number_of_installments: credit.number_of_installments,
            status: CreditStatus::default(),
            customer_id: customer.id,
        };
        let stored = tables.join(&record)?;
        tables.credits.push(record);
        Ok(stored)
    }

    async fn find_by_credit_code(&self, code: Uuid) -> AppResult<Option<Credit>> {
        let tables = self.lock()?;
        tables
            .credits
            .iter()
            .find(|c| c.credit_code == code)
            .map(|record| tables.join(record))
            .transpose()
    }

    async fn find_all_by_customer(&self, customer_id: i64) -> AppResult<Vec<Credit>> {
        let tables = self.lock()?;
        tables
            .credits
            .iter()
            .filter(|c| c.customer_id == customer_id)
            .map(|record| tables.join(record))
            .collect()
    }
}
