//! # chatnav Config
//!
//! Configuration management for chatnav: site profiles, timing, summary
//! extraction and host connection settings.

mod error;
mod loader;
mod schema;
mod support;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use support::{SUPPORTED_HOSTS, is_supported_url};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
