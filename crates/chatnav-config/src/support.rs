//! Hostname allow-list for the navigator.

/// Hostnames the navigator offers itself on.
pub const SUPPORTED_HOSTS: &[&str] = &[
    "gemini.google.com",
    "chat.openai.com",
    "chatgpt.com",
    "claude.ai",
];

/// Whether `page_url` belongs to a supported chat platform.
///
/// Matches on substring of the hostname, so subdomains are accepted.
/// Unparsable input is unsupported.
pub fn is_supported_url(page_url: &str) -> bool {
    let Ok(parsed) = url::Url::parse(page_url) else {
        return false;
    };
    match parsed.host_str() {
        Some(host) => SUPPORTED_HOSTS.iter().any(|supported| host.contains(supported)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_hosts() {
        assert!(is_supported_url("https://gemini.google.com/app/123"));
        assert!(is_supported_url("https://chat.openai.com/c/abc"));
        assert!(is_supported_url("https://chatgpt.com/"));
        assert!(is_supported_url("https://claude.ai/chat/xyz"));
    }

    #[test]
    fn test_subdomain_accepted() {
        assert!(is_supported_url("https://eu.claude.ai/chat/1"));
    }

    #[test]
    fn test_unsupported_hosts() {
        assert!(!is_supported_url("https://example.com"));
        assert!(!is_supported_url("https://google.com/search?q=claude.ai"));
    }

    #[test]
    fn test_unparsable_url() {
        assert!(!is_supported_url(""));
        assert!(!is_supported_url("not a url"));
        assert!(!is_supported_url("about:blank"));
    }
}
