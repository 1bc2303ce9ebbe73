use sqlx::Row;
use std::str::FromStr;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{
    BillingAddress, Customer, LoyaltyTier, OrganizationType, PaymentMethod, PreferredDay,
};

fn customer_from_row(row: &sqlx::any::AnyRow) -> ApiResult<Customer> {
    let organization_type_str: String = row.try_get("organization_type")?;
    let loyalty_tier_str: String = row.try_get("loyalty_tier")?;
    let payment_method_str: String = row.try_get("payment_method")?;
    let preferred_days_json: String = row.try_get("preferred_days")?;

    let preferred_days: Vec<PreferredDay> = serde_json::from_str(&preferred_days_json)
        .map_err(|e| ApiError::Internal(format!("Corrupt preferred_days column: {}", e)))?;

    Ok(Customer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        tax_id: row.try_get("tax_id")?,
        registration_number: row.try_get("registration_number")?,
        organization_type: OrganizationType::from_str(&organization_type_str)
            .map_err(ApiError::Internal)?,
        loyalty_tier: LoyaltyTier::from_str(&loyalty_tier_str).map_err(ApiError::Internal)?,
        billing_address: BillingAddress {
            street: row.try_get("billing_street")?,
            city: row.try_get("billing_city")?,
            postal_code: row.try_get("billing_postal_code")?,
        },
        payment_method: PaymentMethod::from_str(&payment_method_str).map_err(ApiError::Internal)?,
        preferred_days,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn preferred_days_json(customer: &Customer) -> ApiResult<String> {
    serde_json::to_string(&customer.preferred_days)
        .map_err(|e| ApiError::Internal(format!("Failed to encode preferred_days: {}", e)))
}

impl Database {
    pub async fn create_customer(&self, customer: &Customer) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO customers (id, name, tax_id, registration_number, organization_type,
                                    loyalty_tier, billing_street, billing_city, billing_postal_code,
                                    payment_method, preferred_days, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.tax_id)
        .bind(&customer.registration_number)
        .bind(customer.organization_type.as_str())
        .bind(customer.loyalty_tier.as_str())
        .bind(&customer.billing_address.street)
        .bind(&customer.billing_address.city)
        .bind(&customer.billing_address.postal_code)
        .bind(customer.payment_method.as_str())
        .bind(preferred_days_json(customer)?)
        .bind(&customer.created_at)
        .bind(&customer.updated_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    pub async fn get_customer_by_id(&self, id: &str) -> ApiResult<Option<Customer>> {
        let row = sqlx::query(
            "SELECT id, name, tax_id, registration_number, organization_type, loyalty_tier,
                    billing_street, billing_city, billing_postal_code, payment_method,
                    preferred_days, created_at, updated_at
             FROM customers
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(|row| customer_from_row(&row)).transpose()
    }

    pub async fn list_customers(&self, limit: i64, offset: i64) -> ApiResult<Vec<Customer>> {
        let rows = sqlx::query(
            "SELECT id, name, tax_id, registration_number, organization_type, loyalty_tier,
                    billing_street, billing_city, billing_postal_code, payment_method,
                    preferred_days, created_at, updated_at
             FROM customers
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(customer_from_row).collect()
    }

    pub async fn count_customers(&self) -> ApiResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM customers")
            .fetch_one(self.pool())
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    pub async fn update_customer(&self, customer: &Customer) -> ApiResult<()> {
        let result = sqlx::query(
            "UPDATE customers
             SET loyalty_tier = ?, billing_street = ?, billing_city = ?, billing_postal_code = ?,
                 payment_method = ?, preferred_days = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(customer.loyalty_tier.as_str())
        .bind(&customer.billing_address.street)
        .bind(&customer.billing_address.city)
        .bind(&customer.billing_address.postal_code)
        .bind(customer.payment_method.as_str())
        .bind(preferred_days_json(customer)?)
        .bind(&customer.updated_at)
        .bind(&customer.id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Customer not found".to_string()));
        }

        Ok(())
    }
}
