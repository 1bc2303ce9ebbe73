use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{
    normalize_preferred_days, CreateCustomerRequest, Customer, UpdateCustomerRequest,
};

#[derive(Clone)]
pub struct CustomerService {
    db: Database,
}

impl CustomerService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a customer organization. The loyalty tier falls back to
    /// `standard` inside `Customer::new` when the request omits it; preferred
    /// days are deduplicated there as well.
    pub async fn create_customer(&self, request: CreateCustomerRequest) -> ApiResult<Customer> {
        if request.name.trim().is_empty() {
            return Err(ApiError::BadRequest("Customer name is required".to_string()));
        }
        if request.tax_id.trim().is_empty() {
            return Err(ApiError::BadRequest("Tax id is required".to_string()));
        }
        if request.registration_number.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "Registration number is required".to_string(),
            ));
        }

        let customer = Customer::new(
            request.name.trim().to_string(),
            request.tax_id.trim().to_string(),
            request.registration_number.trim().to_string(),
            request.organization_type,
            request.loyalty_tier,
            request.billing_address,
            request.payment_method,
            request.preferred_days,
        );

        self.db.create_customer(&customer).await?;

        Ok(customer)
    }

    pub async fn get_customer(&self, customer_id: &str) -> ApiResult<Customer> {
        self.db
            .get_customer_by_id(customer_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Customer not found".to_string()))
    }

    pub async fn list_customers(
        &self,
        limit: i64,
        offset: i64,
    ) -> ApiResult<(Vec<Customer>, i64)> {
        let customers = self.db.list_customers(limit, offset).await?;
        let total = self.db.count_customers().await?;
        Ok((customers, total))
    }

    pub async fn update_customer(
        &self,
        customer_id: &str,
        request: UpdateCustomerRequest,
    ) -> ApiResult<Customer> {
        let mut customer = self.get_customer(customer_id).await?;

        if let Some(tier) = request.loyalty_tier {
            customer.loyalty_tier = tier;
        }
        if let Some(address) = request.billing_address {
            customer.billing_address = address;
        }
        if let Some(method) = request.payment_method {
            customer.payment_method = method;
        }
        if let Some(days) = request.preferred_days {
            customer.preferred_days = normalize_preferred_days(&days);
        }

        customer.updated_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        self.db.update_customer(&customer).await?;

        Ok(customer)
    }
}
