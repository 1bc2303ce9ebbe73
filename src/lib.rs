pub mod api;
pub mod bootstrap;
pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod shared;
pub mod workers;

pub use api::*;
pub use config::*;
pub use database::*;
pub use models::*;
pub use services::*;
pub use shared::events::DomainEvent;
pub use workers::*;
