//! Credit service - Business rules for creating and resolving credits.
//!
//! This service handles:
//! - Attaching a new credit to an existing customer
//! - Listing a customer's credits
//! - Resolving one credit by code while checking it belongs to the caller's customer
//!
//! Field constraints (installment range, future first installment, non-negative
//! value) are checked by `CreditDto::validate` before a request gets here.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::credit::{Credit, NewCredit},
    services::customer_service::CustomerService,
    store::CreditStore,
};

#[derive(Clone)]
pub struct CreditService {
    customers: CustomerService,
    credits: Arc<dyn CreditStore>,
}

impl CreditService {
    pub fn new(customers: CustomerService, credits: Arc<dyn CreditStore>) -> Self {
        Self { customers, credits }
    }

    /// Persist `credit` as owned by `customer_id`.
    ///
    /// # Process
    ///
    /// 1. Resolve the customer
    /// 2. Insert the credit; the store generates its code and sets `IN_PROGRESS`
    ///
    /// # Errors
    ///
    /// - `NotFound("Id {id} not found")`: no such customer; nothing is written
    pub async fn save(&self, credit: NewCredit, customer_id: i64) -> AppResult<Credit> {
        let customer = self.customers.find_by_id(customer_id).await?;
        let saved = self.credits.insert(credit, &customer).await?;

        tracing::info!(
            customer_id,
            credit_code = %saved.credit_code,
            "credit created"
        );
        Ok(saved)
    }

    /// All credits of `customer_id`, oldest first.
    ///
    /// An unknown customer is not an error here: it simply has no credits.
    pub async fn find_all_by_customer(&self, customer_id: i64) -> AppResult<Vec<Credit>> {
        self.credits.find_all_by_customer(customer_id).await
    }

    /// Resolve the credit `credit_code` on behalf of `customer_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound("Creditcode {code} not found")`: no credit has this code
    /// - `InvalidArgument("Contact admin")`: the credit exists but belongs to another customer
    pub async fn find_by_credit_code(
        &self,
        customer_id: i64,
        credit_code: Uuid,
    ) -> AppResult<Credit> {
        let credit = self
            .credits
            .find_by_credit_code(credit_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Creditcode {credit_code} not found")))?;

        if credit.customer.id != customer_id {
            tracing::warn!(
                %credit_code,
                requested_customer = customer_id,
                owner = credit.customer.id,
                "credit code requested for a customer that does not own it"
            );
            return Err(AppError::InvalidArgument("Contact admin".to_string()));
        }

        Ok(credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{credit::CreditStatus, customer::CustomerDto},
        store::MemoryStore,
    };
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    struct Fixture {
        customers: CustomerService,
        credits: CreditService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let customers = CustomerService::new(store.clone(), 4);
        let credits = CreditService::new(customers.clone(), store);
        Fixture { customers, credits }
    }

    fn customer_request(cpf: &str, email: &str) -> CustomerDto {
        CustomerDto {
            first_name: "Alexandre".to_string(),
            last_name: "Dutra".to_string(),
            cpf: cpf.to_string(),
            income: dec!(1000.0),
            email: email.to_string(),
            password: "1234".to_string(),
            zip_code: "000000".to_string(),
            street: "Rua do Xande, 123".to_string(),
        }
    }

    fn candidate() -> NewCredit {
        NewCredit {
            credit_value: dec!(500),
            day_first_installment: Utc::now().date_naive() + Duration::days(1),
            number_of_installments: 5,
        }
    }

    #[tokio::test]
    async fn save_attaches_existing_customer() {
        let f = fixture();
        let customer = f
            .customers
            .save(customer_request("28475934625", "xande@email.com"))
            .await
            .unwrap();
        assert_eq!(customer.id, 1);

        let credit = f.credits.save(candidate(), 1).await.unwrap();

        assert_eq!(credit.customer.id, 1);
        assert_eq!(credit.customer, customer);
        assert_eq!(credit.status, CreditStatus::InProgress);
        assert_eq!(credit.credit_value, dec!(500));
    }

    #[tokio::test]
    async fn save_for_missing_customer_fails_without_writing() {
        let f = fixture();
        f.customers
            .save(customer_request("28475934625", "xande@email.com"))
            .await
            .unwrap();

        match f.credits.save(candidate(), 2).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Id 2 not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert!(f.credits.find_all_by_customer(2).await.unwrap().is_empty());
        assert!(f.credits.find_all_by_customer(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owner_can_resolve_credit_by_code() {
        let f = fixture();
        let customer = f
            .customers
            .save(customer_request("28475934625", "xande@email.com"))
            .await
            .unwrap();
        let credit = f.credits.save(candidate(), customer.id).await.unwrap();

        let found = f
            .credits
            .find_by_credit_code(customer.id, credit.credit_code)
            .await
            .unwrap();

        assert_eq!(found, credit);
    }

    #[tokio::test]
    async fn other_customer_gets_contact_admin() {
        let f = fixture();
        let owner = f
            .customers
            .save(customer_request("28475934625", "xande@email.com"))
            .await
            .unwrap();
        let other = f
            .customers
            .save(customer_request("52998224725", "other@email.com"))
            .await
            .unwrap();
        let credit = f.credits.save(candidate(), owner.id).await.unwrap();

        match f.credits.find_by_credit_code(other.id, credit.credit_code).await {
            Err(AppError::InvalidArgument(msg)) => assert_eq!(msg, "Contact admin"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }

        // A customer id that does not exist at all is treated the same way.
        assert!(matches!(
            f.credits.find_by_credit_code(42, credit.credit_code).await,
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let f = fixture();
        let customer = f
            .customers
            .save(customer_request("28475934625", "xande@email.com"))
            .await
            .unwrap();
        let code = Uuid::parse_str("5f06f9fd-7dc7-4dc3-a85e-3a10c30183b1").unwrap();

        match f.credits.find_by_credit_code(customer.id, code).await {
            Err(AppError::NotFound(msg)) => {
                assert_eq!(msg, "Creditcode 5f06f9fd-7dc7-4dc3-a85e-3a10c30183b1 not found")
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_is_per_customer_in_insertion_order() {
        let f = fixture();
        let a = f
            .customers
            .save(customer_request("28475934625", "a@email.com"))
            .await
            .unwrap();
        let b = f
            .customers
            .save(customer_request("52998224725", "b@email.com"))
            .await
            .unwrap();
        let first = f.credits.save(candidate(), a.id).await.unwrap();
        f.credits.save(candidate(), b.id).await.unwrap();
        let second = f.credits.save(candidate(), a.id).await.unwrap();

        let codes: Vec<_> = f
            .credits
            .find_all_by_customer(a.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.credit_code)
            .collect();

        assert_eq!(codes, vec![first.credit_code, second.credit_code]);
    }

    #[tokio::test]
    async fn list_for_unknown_customer_is_empty_not_an_error() {
        // Unlike the two lookups above, listing does not check that the customer exists.
        let f = fixture();
        let credits = f.credits.find_all_by_customer(404).await.unwrap();
        assert!(credits.is_empty());
    }
}
