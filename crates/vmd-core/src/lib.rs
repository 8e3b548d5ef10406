//! Shared domain types and configuration for the vaccination availability
//! adapters.

pub mod app_config;
pub mod centers;
pub mod config;
pub mod insee;
pub mod request;
pub mod text;
pub mod vaccine;

pub use app_config::{AppConfig, Environment};
pub use centers::{
    french_day_name, BusinessHours, CenterInfo, CenterPageInfo, CenterType, ListedCenter,
    Location,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use insee::InseeTable;
pub use request::ScraperRequest;
pub use vaccine::Vaccine;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
