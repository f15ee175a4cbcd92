pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, LocalStorage};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use adapters::{AirtableClient, DryRunWriter};
pub use config::RelayConfig;
pub use core::{relay::RelayEngine, trigger::ObjectRef};
pub use utils::error::{RelayError, Result};
