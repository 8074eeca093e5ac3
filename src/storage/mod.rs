//! Storage for configuration.

pub mod config;
pub mod paths;

pub use config::{
    Config, ConfigSource, ConfigSources, CredentialsConfig, ENV_CONFIG, ENV_CONNECT_API_KEY,
    ENV_ICONA_KEY, ENV_TIMEOUT, ENV_VIEW_CONCURRENCY, GeneralConfig, ResolvedConfig,
};
pub use paths::AppPaths;
