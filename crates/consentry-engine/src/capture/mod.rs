//! Capture records for the external review service.

pub mod sanitizer;

pub use sanitizer::{SanitizeError, Sanitizer};

use crate::dom::DocumentNode;
use crate::model::DialogMatch;
use crate::selector::unique_selector;
use chrono::Utc;
use consentry_common::CaptureRecord;
use url::Url;

/// Truncate a URL at its first `?` or `#`.
pub fn strip_url(url: &str) -> &str {
    url.find(['?', '#']).map_or(url, |i| &url[..i])
}

/// Host of `url`, or an empty string when it cannot be parsed.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Build a capture record with the default sanitizer settings.
pub fn build_capture_record<N: DocumentNode>(
    dialog: &DialogMatch<N>,
    page_url: &str,
    raw_html: &str,
) -> CaptureRecord {
    Sanitizer::default().capture(dialog, page_url, raw_html)
}

impl Sanitizer {
    pub fn capture<N: DocumentNode>(
        &self,
        dialog: &DialogMatch<N>,
        page_url: &str,
        raw_html: &str,
    ) -> CaptureRecord {
        let target = dialog
            .accept_button
            .as_ref()
            .or(dialog.reject_button.as_ref())
            .unwrap_or(&dialog.container);

        CaptureRecord {
            url: strip_url(page_url.trim()).to_string(),
            domain: domain_of(page_url.trim()),
            selector: unique_selector(target),
            sanitized_html: self.sanitize(raw_html),
            jurisdiction: dialog.jurisdiction,
            variant: dialog.variant,
            captured_at: Utc::now(),
        }
    }
}
