//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, LogFormat, LoggingConfig, LookupBackend, LookupConfig, PayloadBackend,
    PayloadConfig, ServerConfig,
};
