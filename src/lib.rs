pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::HibpClient;
pub use config::{toml_config::TomlConfig, ProviderConfig};
pub use core::{
    render::{view, ResultView},
    workflow::LookupWorkflow,
};
pub use domain::model::{BreachList, BreachRecord, LookupState};
pub use utils::error::{Result, ScanError};
