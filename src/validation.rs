//! Field-level request validation.
//!
//! Each request DTO exposes a `validate` method built on [`Violations`]. All
//! rules run, so a client sees every bad field in one response.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AppError;

/// One field that broke a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Collects violations while a request is checked.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    /// Blank or whitespace-only strings are rejected.
    pub fn not_blank(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "Invalid input");
        }
    }

    pub fn min(&mut self, field: &'static str, value: i64, min: i64) {
        if value < min {
            self.add(field, format!("must be greater than or equal to {min}"));
        }
    }

    pub fn max(&mut self, field: &'static str, value: i64, max: i64) {
        if value > max {
            self.add(field, format!("must be less than or equal to {max}"));
        }
    }

    pub fn non_negative(&mut self, field: &'static str, value: Decimal) {
        if value.is_sign_negative() && !value.is_zero() {
            self.add(field, "must be greater than or equal to 0");
        }
    }

    /// `value` must be strictly after `today`.
    pub fn future(&mut self, field: &'static str, value: NaiveDate, today: NaiveDate) {
        if value <= today {
            self.add(field, "must be a future date");
        }
    }

    pub fn cpf(&mut self, field: &'static str, value: &str) {
        if !is_valid_cpf(value) {
            self.add(field, "This invalid CPF");
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if !is_valid_email(value) {
            self.add(field, "Invalid email");
        }
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0))
        }
    }
}

/// Brazilian CPF: 11 digits (dots and dash allowed), not all equal, with two
/// mod-11 check digits.
pub fn is_valid_cpf(raw: &str) -> bool {
    if !raw.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        return false;
    }
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 || digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .zip((2..=len as u32 + 1).rev())
            .map(|(d, w)| d * w)
            .sum();
        match sum % 11 {
            0 | 1 => 0,
            r => 11 - r,
        }
    };

    check(9) == digits[9] && check(10) == digits[10]
}

/// Canonical stored form of a CPF: its digits only, so `284.759.346-25` and
/// `28475934625` hit the same unique key.
pub fn normalize_cpf(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Loose structural check: one `@`, non-empty local part, dotted domain
/// without empty labels, no whitespace.
pub fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}
