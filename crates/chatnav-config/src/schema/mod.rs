//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

mod schema_extraction;
mod schema_sites;
mod schema_timing;

pub use schema_extraction::*;
pub use schema_sites::*;
pub use schema_timing::*;

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site profiles. Supplying any `[[sites]]` table replaces the built-in set.
    #[serde(default = "default_sites")]
    pub sites: Vec<SiteProfile>,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub navigator: NavigatorConfig,

    #[serde(default)]
    pub cdp: CdpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sites: default_sites(),
            timing: TimingConfig::default(),
            extraction: ExtractionConfig::default(),
            navigator: NavigatorConfig::default(),
            cdp: CdpConfig::default(),
        }
    }
}

impl Config {
    /// Profile whose host fragment is contained in `hostname`, first match wins.
    pub fn profile_for_host(&self, hostname: &str) -> Option<&SiteProfile> {
        self.sites.iter().find(|site| site.matches_host(hostname))
    }

    /// Profile for a full page URL. Unparsable URLs have no profile.
    pub fn profile_for_url(&self, page_url: &str) -> Option<&SiteProfile> {
        let parsed = url::Url::parse(page_url).ok()?;
        let host = parsed.host_str()?;
        self.profile_for_host(host)
    }
}

/// Chrome DevTools Protocol connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdpConfig {
    #[serde(default = "default_cdp_endpoint")]
    pub endpoint: String,
}

impl Default for CdpConfig {
    fn default() -> Self {
        Self {
            endpoint: default_cdp_endpoint(),
        }
    }
}

fn default_cdp_endpoint() -> String {
    "http://127.0.0.1:9222".to_string()
}
