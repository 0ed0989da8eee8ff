//! Application configuration.

use std::path::PathBuf;

use clap::Args;

/// Storefront configuration, from CLI arguments and the environment.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Storefront API endpoint URL
    #[arg(long, env = "TINYSTEPS_API_URL")]
    pub api_url: String,

    /// Directory holding the persisted cart and form state
    #[arg(long, env = "TINYSTEPS_DATA_DIR", default_value = ".tinysteps")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}
