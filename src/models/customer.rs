//! Customer data models and API request/response types.
//!
//! This module defines:
//! - `Customer`: Database entity representing a customer
//! - `NewCustomer`: A validated customer that has not been stored yet
//! - `CustomerDto` / `CustomerUpdateDto`: Request bodies
//! - `CustomerView`: Response body returned to clients

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppError, validation::Violations};

/// Represents a customer record from the database.
///
/// # Database Table
///
/// Maps to the `customers` table. `cpf` and `email` carry unique
/// constraints; the owned credits live in `credits` and cascade on delete.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Customer {
    /// Sequential identifier assigned by the store
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Brazilian national tax id (CPF)
    pub cpf: String,

    pub email: String,

    /// Monthly income
    pub income: Decimal,

    /// Salted SHA-256 hash, never the clear-text password
    pub password: String,

    pub zip_code: String,

    pub street: String,
}

/// A customer ready to be inserted. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub income: Decimal,
    pub password_hash: String,
    pub zip_code: String,
    pub street: String,
}

/// Request body for creating a customer.
///
/// # JSON Example
///
/// ```json
/// {
///   "firstName": "Alexandre",
///   "lastName": "Dutra",
///   "cpf": "28475934625",
///   "income": "1000.0",
///   "email": "xande@email.com",
///   "password": "1234",
///   "zipCode": "000000",
///   "street": "Rua do Xande, 123"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "28475934625")]
    pub cpf: String,
    pub income: Decimal,
    #[schema(example = "xande@email.com")]
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
}

impl CustomerDto {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::new();
        v.not_blank("firstName", &self.first_name);
        v.not_blank("lastName", &self.last_name);
        v.cpf("cpf", &self.cpf);
        v.non_negative("income", self.income);
        v.email("email", &self.email);
        v.not_blank("password", &self.password);
        v.not_blank("zipCode", &self.zip_code);
        v.not_blank("street", &self.street);
        v.into_result()
    }
}

/// Request body for `PATCH /api/customers?customerId=`.
///
/// Only these fields are mutable; CPF, email and password stay as created.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateDto {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl CustomerUpdateDto {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Violations::new();
        v.not_blank("firstName", &self.first_name);
        v.not_blank("lastName", &self.last_name);
        v.non_negative("income", self.income);
        v.not_blank("zipCode", &self.zip_code);
        v.not_blank("street", &self.street);
        v.into_result()
    }

    /// Overwrite the mutable fields of `customer`.
    pub fn apply_to(self, mut customer: Customer) -> Customer {
        customer.first_name = self.first_name;
        customer.last_name = self.last_name;
        customer.income = self.income;
        customer.zip_code = self.zip_code;
        customer.street = self.street;
        customer
    }
}

/// Response body for customer endpoints. The password hash is omitted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub income: Decimal,
    pub email: String,
    pub zip_code: String,
    pub street: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            income: customer.income,
            email: customer.email,
            zip_code: customer.zip_code,
            street: customer.street,
        }
    }
}
