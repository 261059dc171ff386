//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::{Config, SiteProfile};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_sites(config, &mut result);
        Self::validate_timing(config, &mut result);
        Self::validate_extraction(config, &mut result);
        Self::validate_cdp(config, &mut result);

        Ok(result)
    }

    fn validate_sites(config: &Config, result: &mut ValidationResult) {
        if config.sites.is_empty() {
            result.add_warning(ValidationWarning::new(
                "sites",
                "No site profiles configured, the indexer will never start",
            ));
        }

        let mut names = HashSet::new();
        for (i, site) in config.sites.iter().enumerate() {
            if !names.insert(site.name.as_str()) {
                result.add_warning(ValidationWarning::new(
                    format!("sites[{}].name", i),
                    format!("Duplicate site name '{}'", site.name),
                ));
            }
            Self::validate_site(i, site, result);
        }
    }

    fn validate_site(index: usize, site: &SiteProfile, result: &mut ValidationResult) {
        let path = |field: &str| format!("sites[{}].{}", index, field);

        if site.name.trim().is_empty() {
            result.add_error(ValidationError::new(path("name"), "Site name cannot be empty"));
        }

        if site.hosts.iter().all(|h| h.trim().is_empty()) {
            result.add_error(ValidationError::new(
                path("hosts"),
                "At least one non-empty host is required",
            ));
        }

        if site.primary.trim().is_empty() {
            result.add_error(ValidationError::new(
                path("primary"),
                "Primary selector cannot be empty",
            ));
        }

        if site.container.trim().is_empty() {
            result.add_error(ValidationError::new(
                path("container"),
                "Container selector cannot be empty",
            ));
        }

        for (j, fallback) in site.fallbacks.iter().enumerate() {
            if fallback.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("sites[{}].fallbacks[{}]", index, j),
                    "Fallback selector cannot be empty",
                ));
            }
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        let timing = &config.timing;

        if timing.debounce_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "timing.debounce_ms",
                "debounce_ms is 0, every mutation batch triggers a scan",
            ));
        }

        if timing.url_poll_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "timing.url_poll_interval_ms",
                "url_poll_interval_ms must be greater than 0",
            ));
        }

        if let Some(max_wait) = timing.debounce_max_wait_ms {
            if max_wait < timing.debounce_ms {
                result.add_error(ValidationError::new(
                    "timing.debounce_max_wait_ms",
                    "debounce_max_wait_ms must not be shorter than debounce_ms",
                ));
            }
        }

        if config.navigator.request_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "navigator.request_timeout_ms",
                "request_timeout_ms must be greater than 0",
            ));
        }

        if config.navigator.close_after_loading_ms < timing.scroll_settle_ms {
            result.add_warning(ValidationWarning::new(
                "navigator.close_after_loading_ms",
                "Navigator closes before the indexer's scroll retry can finish",
            ));
        }
    }

    fn validate_extraction(config: &Config, result: &mut ValidationResult) {
        let extraction = &config.extraction;

        if extraction.max_length == 0 {
            result.add_error(ValidationError::new(
                "extraction.max_length",
                "max_length must be greater than 0",
            ));
        }

        if extraction.placeholder.is_empty() {
            result.add_warning(ValidationWarning::new(
                "extraction.placeholder",
                "Empty placeholder, messages without content will have no summary",
            ));
        }
    }

    fn validate_cdp(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.cdp.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "cdp.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
