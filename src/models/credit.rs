//! Credit data models and API request/response types.
//!
//! This module defines:
//! - `Credit`: A stored credit together with its owning customer
//! - `NewCredit`: The candidate credit handed to the credit service
//! - `CreditStatus`: Lifecycle tag stored as text
//! - `CreditDto`: Request body for creating credits
//! - `CreditView` / `CreditViewList`: Response bodies returned to clients

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppError, models::customer::Customer, validation::Violations};

/// Upper bound on the number of installments of one credit.
pub const MAX_INSTALLMENTS: i64 = 48;

/// Credit lifecycle status.
///
/// Stored in the `credits.status` column as its SCREAMING_SNAKE_CASE name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    /// Default for every newly created credit
    #[default]
    InProgress,
    Approved,
    Reject,
}

impl CreditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditStatus::InProgress => "IN_PROGRESS",
            CreditStatus::Approved => "APPROVED",
            CreditStatus::Reject => "REJECT",
        }
    }
}

impl fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(CreditStatus::InProgress),
            "APPROVED" => Ok(CreditStatus::Approved),
            "REJECT" => Ok(CreditStatus::Reject),
            other => Err(AppError::Internal(format!("unknown credit status '{other}'"))),
        }
    }
}

/// A persisted credit.
///
/// The owning customer is loaded alongside the credit so views can show the
/// customer's email and income without another lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Credit {
    /// Sequential identifier assigned by the store
    pub id: i64,

    /// Random identifier exposed to clients; unique and never changed
    pub credit_code: Uuid,

    pub credit_value: Decimal,

    pub day_first_installment: NaiveDate,

    pub number_of_installments: i32,

    pub status: CreditStatus,

    pub customer: Customer,
}

/// A credit that has passed field validation but is not yet attached to a
/// customer or stored.
#[derive(Debug, Clone)]
pub struct NewCredit {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
}

/// Request body for creating a credit.
///
/// # JSON Example
///
/// ```json
/// {
///   "creditValue": "500.0",
///   "dayFirstOfInstallment": "2025-12-21",
///   "numberOfInstallments": 5,
///   "customerId": 1
/// }
/// ```
///
/// # Validation
///
/// - `creditValue`: >= 0
/// - `dayFirstOfInstallment`: strictly after today
/// - `numberOfInstallments`: 1..=48
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditDto {
    #[schema(example = "500.0")]
    pub credit_value: Decimal,
    #[schema(example = "2025-12-21")]
    pub day_first_of_installment: NaiveDate,
    #[schema(example = 5, minimum = 1, maximum = 48)]
    pub number_of_installments: i32,
    #[schema(example = 1)]
    pub customer_id: i64,
}

impl CreditDto {
    pub fn validate(&self, today: NaiveDate) -> Result<(), AppError> {
        let mut v = Violations::new();
        v.non_negative("creditValue", self.credit_value);
        v.future("dayFirstOfInstallment", self.day_first_of_installment, today);
        v.min("numberOfInstallments", self.number_of_installments.into(), 1);
        v.max(
            "numberOfInstallments",
            self.number_of_installments.into(),
            MAX_INSTALLMENTS,
        );
        v.into_result()
    }

    /// Split into the candidate credit and the id of its intended owner.
    pub fn into_parts(self) -> (NewCredit, i64) {
        (
            NewCredit {
                credit_value: self.credit_value,
                day_first_installment: self.day_first_of_installment,
                number_of_installments: self.number_of_installments,
            },
            self.customer_id,
        )
    }
}

/// Full view of one credit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub number_of_installment: i32,
    pub status: CreditStatus,
    pub email_customer: String,
    pub income_customer: Decimal,
}

impl From<Credit> for CreditView {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installment: credit.number_of_installments,
            status: credit.status,
            email_customer: credit.customer.email,
            income_customer: credit.customer.income,
        }
    }
}

/// Summary row used when listing a customer's credits.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditViewList {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub number_of_installments: i32,
}

impl From<Credit> for CreditViewList {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}
