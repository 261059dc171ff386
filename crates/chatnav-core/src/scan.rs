//! Candidate discovery with fallback selectors, and the scan itself.

use chatnav_config::{ExtractionConfig, SiteProfile};
use chatnav_protocols::{ContentProbe, ElementHandle, HostPage, PageError};
use tracing::{debug, warn};

use crate::error::IndexerError;
use crate::session::Session;
use crate::summary::summarize;

/// Outcome of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanReport {
    /// Selector that produced the candidates, if any matched.
    pub selector: Option<String>,
    /// Candidates found by that selector.
    pub matched: usize,
    /// Records appended to the index by this scan.
    pub added: usize,
}

/// First selector of the profile chain that yields at least one element.
///
/// Rejected selectors count as zero matches.
pub(crate) async fn find_candidates(
    page: &dyn HostPage,
    profile: &SiteProfile,
) -> Result<Option<(String, Vec<ElementHandle>)>, PageError> {
    for selector in profile.selector_chain() {
        match page.query_all(selector).await {
            Ok(elements) if !elements.is_empty() => {
                return Ok(Some((selector.to_string(), elements)));
            }
            Ok(_) => debug!("Selector matched nothing: {}", selector),
            Err(e) if e.is_selector_error() => warn!("Skipping selector {}: {}", selector, e),
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

/// Index every untagged candidate, in document order.
pub(crate) async fn scan_page(
    page: &dyn HostPage,
    profile: &SiteProfile,
    extraction: &ExtractionConfig,
    probe: &ContentProbe,
    session: &mut Session,
) -> Result<ScanReport, IndexerError> {
    let Some((selector, elements)) = find_candidates(page, profile).await? else {
        return Ok(ScanReport::default());
    };

    let mut report = ScanReport {
        selector: Some(selector),
        matched: elements.len(),
        added: 0,
    };

    for element in elements {
        if page.is_tagged(element).await? {
            continue;
        }

        let content = match page.read_content(element, probe).await {
            Ok(content) => content,
            Err(PageError::ElementDetached(_)) => {
                debug!("Element {} detached during scan", element.0);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let id = session.next_id();
        match page.tag(element, id).await {
            Ok(()) => {}
            Err(PageError::AlreadyTagged { .. }) | Err(PageError::ElementDetached(_)) => continue,
            Err(e) => return Err(e.into()),
        }
        session.append(summarize(&content, extraction));
        report.added += 1;
    }

    Ok(report)
}
