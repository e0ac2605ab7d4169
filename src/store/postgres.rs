//! PostgreSQL store backed by sqlx.
//!
//! Credit reads join `customers` so every returned `Credit` carries its owner.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{CreditStore, CustomerStore};
use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    models::{
        credit::{Credit, CreditStatus, NewCredit},
        customer::{Customer, NewCustomer},
    },
};

/// SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for foreign_key_violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

const CREDIT_SELECT: &str = r#"
    SELECT cr.id, cr.credit_code, cr.credit_value, cr.day_first_installment,
           cr.number_of_installments, cr.status,
           cu.id AS customer_id, cu.first_name, cu.last_name, cu.cpf, cu.email,
           cu.income, cu.password, cu.zip_code, cu.street
    FROM credits cr
    JOIN customers cu ON cu.id = cr.customer_id
"#;

/// One row of a credit joined with its customer.
#[derive(Debug, sqlx::FromRow)]
struct CreditRow {
    id: i64,
    credit_code: Uuid,
    credit_value: Decimal,
    day_first_installment: NaiveDate,
    number_of_installments: i32,
    status: String,
    customer_id: i64,
    first_name: String,
    last_name: String,
    cpf: String,
    email: String,
    income: Decimal,
    password: String,
    zip_code: String,
    street: String,
}

impl TryFrom<CreditRow> for Credit {
    type Error = AppError;

    fn try_from(row: CreditRow) -> Result<Self, Self::Error> {
        Ok(Credit {
            id: row.id,
            credit_code: row.credit_code,
            credit_value: row.credit_value,
            day_first_installment: row.day_first_installment,
            number_of_installments: row.number_of_installments,
            status: row.status.parse()?,
            customer: Customer {
                id: row.customer_id,
                first_name: row.first_name,
                last_name: row.last_name,
                cpf: row.cpf,
                email: row.email,
                income: row.income,
                password: row.password,
                zip_code: row.zip_code,
                street: row.street,
            },
        })
    }
}

fn unique_conflict(code: Option<&str>, constraint: Option<&str>) -> Option<AppError> {
    (code == Some(UNIQUE_VIOLATION)).then(|| {
        let constraint = constraint.unwrap_or("unique constraint");
        AppError::Conflict(format!("Duplicate value violates {constraint}"))
    })
}

/// A credit whose customer vanished between lookup and insert, reported the
/// way the memory store reports it.
fn missing_customer(code: Option<&str>, customer_id: i64) -> Option<AppError> {
    (code == Some(FOREIGN_KEY_VIOLATION))
        .then(|| AppError::NotFound(format!("Id {customer_id} not found")))
}

/// Turn unique-constraint failures into `Conflict`; everything else stays a database error.
fn map_unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(mapped) = unique_conflict(db_err.code().as_deref(), db_err.constraint()) {
            return mapped;
        }
    }
    AppError::Database(err)
}

/// Like [`map_unique_violation`], plus a dangling `customer_id` becomes `NotFound`.
fn map_credit_insert_error(err: sqlx::Error, customer_id: i64) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        let code = db_err.code();
        let mapped = unique_conflict(code.as_deref(), db_err.constraint())
            .or_else(|| missing_customer(code.as_deref(), customer_id));
        if let Some(mapped) = mapped {
            return mapped;
        }
    }
    AppError::Database(err)
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PgStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, first_name, last_name, cpf, email, income, password, zip_code, street
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn insert(&self, customer: NewCustomer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (first_name, last_name, cpf, email, income, password, zip_code, street)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, cpf, email, income, password, zip_code, street
            "#,
        )
        .bind(customer.first_name)
        .bind(customer.last_name)
        .bind(customer.cpf)
        .bind(customer.email)
        .bind(customer.income)
        .bind(customer.password_hash)
        .bind(customer.zip_code)
        .bind(customer.street)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)
    }

    async fn update(&self, customer: &Customer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET first_name = $2, last_name = $3, cpf = $4, email = $5,
                income = $6, password = $7, zip_code = $8, street = $9
            WHERE id = $1
            RETURNING id, first_name, last_name, cpf, email, income, password, zip_code, street
            "#,
        )
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.cpf)
        .bind(&customer.email)
        .bind(customer.income)
        .bind(&customer.password)
        .bind(&customer.zip_code)
        .bind(&customer.street)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?
        .ok_or_else(|| AppError::NotFound(format!("Id {} not found", customer.id)))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        // credits.customer_id is ON DELETE CASCADE
        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CreditStore for PgStore {
    async fn insert(&self, credit: NewCredit, customer: &Customer) -> AppResult<Credit> {
        let (id, credit_code, status): (i64, Uuid, String) = sqlx::query_as(
            r#"
            INSERT INTO credits (credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, credit_code, status
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(credit.credit_value)
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments)
        .bind(CreditStatus::default().as_str())
        .bind(customer.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_credit_insert_error(e, customer.id))?;

        Ok(Credit {
            id,
            credit_code,
            credit_value: credit.credit_value,
            day_first_installment: credit.day_first_installment,
            number_of_installments: credit.number_of_installments,
            status: status.parse()?,
            customer: customer.clone(),
        })
    }

    async fn find_by_credit_code(&self, code: Uuid) -> AppResult<Option<Credit>> {
        let query = format!("{CREDIT_SELECT} WHERE cr.credit_code = $1");
        sqlx::query_as::<_, CreditRow>(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .map(Credit::try_from)
            .transpose()
    }

    async fn find_all_by_customer(&self, customer_id: i64) -> AppResult<Vec<Credit>> {
        let query = format!("{CREDIT_SELECT} WHERE cr.customer_id = $1 ORDER BY cr.id");
        sqlx::query_as::<_, CreditRow>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Credit::try_from)
            .collect()
    }
}
