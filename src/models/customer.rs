use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    Company,
    SoleTrader,
    Nonprofit,
}

impl OrganizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Company => "company",
            OrganizationType::SoleTrader => "sole_trader",
            OrganizationType::Nonprofit => "nonprofit",
        }
    }
}

impl std::str::FromStr for OrganizationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "company" => Ok(OrganizationType::Company),
            "sole_trader" => Ok(OrganizationType::SoleTrader),
            "nonprofit" => Ok(OrganizationType::Nonprofit),
            _ => Err(format!("Invalid organization type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    Standard,
    Silver,
    Gold,
}

impl LoyaltyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyTier::Standard => "standard",
            LoyaltyTier::Silver => "silver",
            LoyaltyTier::Gold => "gold",
        }
    }
}

impl Default for LoyaltyTier {
    fn default() -> Self {
        LoyaltyTier::Standard
    }
}

impl std::str::FromStr for LoyaltyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(LoyaltyTier::Standard),
            "silver" => Ok(LoyaltyTier::Silver),
            "gold" => Ok(LoyaltyTier::Gold),
            _ => Err(format!("Invalid loyalty tier: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Invoice,
    Card,
    DirectDebit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Invoice => "invoice",
            PaymentMethod::Card => "card",
            PaymentMethod::DirectDebit => "direct_debit",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "invoice" => Ok(PaymentMethod::Invoice),
            "card" => Ok(PaymentMethod::Card),
            "direct_debit" => Ok(PaymentMethod::DirectDebit),
            _ => Err(format!("Invalid payment method: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl PreferredDay {
    pub const ALL: [PreferredDay; 7] = [
        PreferredDay::Monday,
        PreferredDay::Tuesday,
        PreferredDay::Wednesday,
        PreferredDay::Thursday,
        PreferredDay::Friday,
        PreferredDay::Saturday,
        PreferredDay::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredDay::Monday => "monday",
            PreferredDay::Tuesday => "tuesday",
            PreferredDay::Wednesday => "wednesday",
            PreferredDay::Thursday => "thursday",
            PreferredDay::Friday => "friday",
            PreferredDay::Saturday => "saturday",
            PreferredDay::Sunday => "sunday",
        }
    }
}

/// Collapse requested days into a set: duplicates removed, canonical
/// Monday-to-Sunday order.
pub fn normalize_preferred_days(days: &[PreferredDay]) -> Vec<PreferredDay> {
    PreferredDay::ALL
        .iter()
        .copied()
        .filter(|day| days.contains(day))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

/// Customer organization buying cleaning services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub registration_number: String,
    pub organization_type: OrganizationType,
    pub loyalty_tier: LoyaltyTier,
    pub billing_address: BillingAddress,
    pub payment_method: PaymentMethod,
    pub preferred_days: Vec<PreferredDay>,
    pub created_at: String,
    pub updated_at: String,
}

impl Customer {
    /// The loyalty tier defaults to `Standard` when the caller does not
    /// supply one; the default is applied here, at construction time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        tax_id: String,
        registration_number: String,
        organization_type: OrganizationType,
        loyalty_tier: Option<LoyaltyTier>,
        billing_address: BillingAddress,
        payment_method: PaymentMethod,
        preferred_days: Vec<PreferredDay>,
    ) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            tax_id,
            registration_number,
            organization_type,
            loyalty_tier: loyalty_tier.unwrap_or_default(),
            billing_address,
            payment_method,
            preferred_days: normalize_preferred_days(&preferred_days),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// DTOs for API requests
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub tax_id: String,
    pub registration_number: String,
    pub organization_type: OrganizationType,
    pub loyalty_tier: Option<LoyaltyTier>,
    pub billing_address: BillingAddress,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub preferred_days: Vec<PreferredDay>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub loyalty_tier: Option<LoyaltyTier>,
    pub billing_address: Option<BillingAddress>,
    pub payment_method: Option<PaymentMethod>,
    pub preferred_days: Option<Vec<PreferredDay>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> BillingAddress {
        BillingAddress {
            street: "12 Mop Lane".to_string(),
            city: "Brushville".to_string(),
            postal_code: "44100".to_string(),
        }
    }

    #[test]
    fn test_loyalty_tier_defaults_to_standard() {
        let customer = Customer::new(
            "Acme Offices".to_string(),
            "FI12345678".to_string(),
            "REG-001".to_string(),
            OrganizationType::Company,
            None,
            sample_address(),
            PaymentMethod::Invoice,
            vec![],
        );
        assert_eq!(customer.loyalty_tier, LoyaltyTier::Standard);
    }

    #[test]
    fn test_explicit_loyalty_tier_wins() {
        let customer = Customer::new(
            "Acme Offices".to_string(),
            "FI12345678".to_string(),
            "REG-001".to_string(),
            OrganizationType::Company,
            Some(LoyaltyTier::Gold),
            sample_address(),
            PaymentMethod::Card,
            vec![],
        );
        assert_eq!(customer.loyalty_tier, LoyaltyTier::Gold);
    }

    #[test]
    fn test_preferred_days_deduplicated() {
        let customer = Customer::new(
            "Acme Offices".to_string(),
            "FI12345678".to_string(),
            "REG-001".to_string(),
            OrganizationType::SoleTrader,
            None,
            sample_address(),
            PaymentMethod::Invoice,
            vec![
                PreferredDay::Friday,
                PreferredDay::Monday,
                PreferredDay::Friday,
                PreferredDay::Monday,
                PreferredDay::Monday,
            ],
        );
        assert_eq!(
            customer.preferred_days,
            vec![PreferredDay::Monday, PreferredDay::Friday]
        );
    }

    #[test]
    fn test_normalize_orders_canonically() {
        let days = normalize_preferred_days(&[
            PreferredDay::Sunday,
            PreferredDay::Tuesday,
            PreferredDay::Saturday,
        ]);
        assert_eq!(
            days,
            vec![
                PreferredDay::Tuesday,
                PreferredDay::Saturday,
                PreferredDay::Sunday
            ]
        );
    }

    #[test]
    fn test_normalize_empty_is_empty() {
        assert!(normalize_preferred_days(&[]).is_empty());
    }
}
