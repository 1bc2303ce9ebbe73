pub mod error;

pub use error::*;

use crate::database::Database;
use crate::services::{CustomerService, NotificationService, ProviderService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub users: UserService,
    pub customers: CustomerService,
    pub providers: ProviderService,
    pub notifications: NotificationService,
}
