pub mod customer_service;
pub mod notification_service;
pub mod password_service;
pub mod provider_service;
pub mod user_service;

pub use customer_service::CustomerService;
pub use notification_service::NotificationService;
pub use password_service::{hash_password, verify_password};
pub use provider_service::ProviderService;
pub use user_service::UserService;

pub use crate::shared::utils::validate_and_normalize_email;
