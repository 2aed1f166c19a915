pub mod app_config;
pub mod config;
pub mod layout;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, PacingMode};
pub use config::{load_app_config, load_app_config_from_env};
pub use layout::{card_selector, StorefrontLayout};
pub use records::{Catalog, CatalogKind, Catalogs, ProductRecord, SeenNames, NAME_NOT_FOUND};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
