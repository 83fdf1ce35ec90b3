//! Infrastructure layer: configuration sources and user directory adapters.

pub mod config;
pub mod directory;

pub use config::{
    config_page_id, ConfigError, ConfigResolver, Directive, PageSource, Settings,
};
pub use directory::InMemoryDirectory;
