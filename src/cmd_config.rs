//! Configuration commands: `sites`, `check`, `validate`.

use std::path::PathBuf;

use chatnav_config::{Config, ConfigLoader, ConfigValidator, is_supported_url};

use crate::load_config;

pub(crate) fn sites(config_path: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;

    println!("{:<10} {:<32} {}", "NAME", "HOSTS", "SELECTORS");
    println!("{}", "-".repeat(72));
    for site in &config.sites {
        println!(
            "{:<10} {:<32} {} (+{} fallback(s))",
            site.name,
            site.hosts.join(", "),
            site.primary,
            site.fallbacks.len()
        );
    }
    Ok(())
}

/// Describe how `url` is treated: supported or not, and which profile indexes it.
pub(crate) fn describe(config: &Config, url: &str) -> String {
    let supported = if is_supported_url(url) {
        "supported"
    } else {
        "not supported"
    };
    match config.profile_for_url(url) {
        Some(site) => format!("{}: {}, indexed with the {} profile", url, supported, site.name),
        None => format!("{}: {}, no site profile matches", url, supported),
    }
}

pub(crate) fn check(
    config_path: Option<&PathBuf>,
    url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    println!("{}", describe(&config, url));
    Ok(())
}

pub(crate) fn validate(config_path: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match config_path.cloned().or_else(ConfigLoader::default_path) {
        Some(path) if path.exists() => println!("Validating {}", path.display()),
        _ => println!("No config file, validating built-in defaults"),
    }

    // Unchecked load: this command reports the errors itself.
    let config = ConfigLoader::load_or_default(config_path.map(|p| p.as_path()))?;
    let result = ConfigValidator::validate(&config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if result.is_valid() {
        println!("OK ({} warning(s))", result.warnings.len());
        Ok(())
    } else {
        Err(format!("{} error(s) in configuration", result.errors.len()).into())
    }
}
