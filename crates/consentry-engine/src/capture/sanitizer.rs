//! Markup redaction for capture records.
//!
//! Scripts and comments are dropped, identifying attributes stripped, emails
//! and phone numbers masked, and query strings and fragments removed from
//! embedded URLs. `sanitize` never fails: internal failures degrade to a
//! truncated, tag-free, masked rendition of the input.

use crate::config::SanitizerConfig;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

/// Attributes that can identify a visitor, a session or a site.
const STRIPPED_ATTRIBUTES: &[&str] = &[
    "id",
    "name",
    "value",
    "autocomplete",
    "placeholder",
    "title",
    "alt",
    "href",
    "src",
    "srcset",
    "action",
];
const STRIPPED_ATTRIBUTE_PREFIXES: &[&str] = &["data-", "aria-", "on"];

const MIN_PHONE_DIGITS: usize = 7;

/// Upper bound on nested-script unwrapping passes.
const MAX_SCRIPT_PASSES: usize = 16;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());
static SCRIPT_SELF_CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*/>").unwrap());
static SCRIPT_UNCLOSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*\z").unwrap());
static SCRIPT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</script\s*>").unwrap());
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap());
static START_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([a-zA-Z][a-zA-Z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#).unwrap()
});
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/>"']+)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'>]+))?"#).unwrap()
});
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*(?:>|\z)").unwrap());
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}").unwrap()
});
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\+|\b)\d[\d\s().-]{6,}\d\b").unwrap());
/// Calendar dates share the phone shape but are not contact data.
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12]\d|3[01])(?:[T\s]\d{1,2})?$").unwrap()
});
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(?:\bhttps?:)?//[^\s"'<>()]+"#).unwrap());

#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error("Input of {size} bytes exceeds limit of {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("Script content survived sanitization")]
    ResidualScript,
}

#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    config: SanitizerConfig,
}

impl Sanitizer {
    pub fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Total sanitization: falls back to a conservative rendition on failure.
    pub fn sanitize(&self, html: &str) -> String {
        match self.try_sanitize(html) {
            Ok(clean) => clean,
            Err(e) => {
                warn!(error = %e, "sanitizer fell back to truncated output");
                self.fallback(html)
            }
        }
    }

    pub fn try_sanitize(&self, html: &str) -> Result<String, SanitizeError> {
        if html.len() > self.config.max_input_bytes {
            return Err(SanitizeError::TooLarge {
                size: html.len(),
                limit: self.config.max_input_bytes,
            });
        }

        let mut out = remove_scripts(html);
        out = COMMENT.replace_all(&out, "").into_owned();
        out = START_TAG
            .replace_all(&out, |caps: &Captures| rewrite_tag(caps))
            .into_owned();
        out = self.mask_pii(&out);
        out = strip_embedded_urls(&out);

        if out.to_ascii_lowercase().contains("<script") {
            return Err(SanitizeError::ResidualScript);
        }
        Ok(out)
    }

    fn mask_pii(&self, text: &str) -> String {
        let masked = EMAIL.replace_all(text, self.config.email_placeholder.as_str());
        PHONE
            .replace_all(&masked, |caps: &Captures| {
                let candidate = &caps[0];
                let digits = candidate.chars().filter(char::is_ascii_digit).count();
                if digits >= MIN_PHONE_DIGITS && !ISO_DATE.is_match(candidate.trim()) {
                    self.config.phone_placeholder.clone()
                } else {
                    candidate.to_string()
                }
            })
            .into_owned()
    }

    /// Script bodies and comments go before truncation so a cut can never
    /// expose their text.
    fn fallback(&self, html: &str) -> String {
        let without_code = COMMENT.replace_all(&remove_scripts(html), "").into_owned();
        let truncated: String = without_code.chars().take(self.config.fallback_chars).collect();
        let text = ANY_TAG.replace_all(&truncated, " ");
        strip_embedded_urls(&self.mask_pii(&text))
    }
}

fn remove_scripts(html: &str) -> String {
    let mut out = html.to_string();
    for _ in 0..MAX_SCRIPT_PASSES {
        if !SCRIPT_BLOCK.is_match(&out) {
            break;
        }
        out = SCRIPT_BLOCK.replace_all(&out, "").into_owned();
    }
    out = SCRIPT_SELF_CLOSING.replace_all(&out, "").into_owned();
    out = SCRIPT_UNCLOSED.replace_all(&out, "").into_owned();
    SCRIPT_CLOSE.replace_all(&out, "").into_owned()
}

fn rewrite_tag(caps: &Captures) -> String {
    let tag = &caps[1];
    let raw = caps.get(2).map_or("", |m| m.as_str()).trim_end();
    let (raw, self_closing) = match raw.strip_suffix('/') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };

    let mut out = format!("<{tag}");
    for attr in ATTRIBUTE.captures_iter(raw) {
        let name = attr[1].to_ascii_lowercase();
        if is_stripped_attribute(&name) {
            continue;
        }
        out.push(' ');
        out.push_str(&attr[0]);
    }
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    out
}

fn is_stripped_attribute(name: &str) -> bool {
    STRIPPED_ATTRIBUTES.contains(&name)
        || STRIPPED_ATTRIBUTE_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

fn strip_embedded_urls(text: &str) -> String {
    URL.replace_all(text, |caps: &Captures| super::strip_url(&caps[0]).to_string())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_script_is_removed() {
        let out = remove_scripts("a<scr<script>x</script>ipt>alert(1)</script>b");
        assert!(!out.to_ascii_lowercase().contains("<script"));
        assert!(!out.contains("alert"));
    }

    #[test]
    fn test_attribute_filter() {
        assert!(is_stripped_attribute("data-id"));
        assert!(is_stripped_attribute("onclick"));
        assert!(is_stripped_attribute("aria-label"));
        assert!(!is_stripped_attribute("class"));
        assert!(!is_stripped_attribute("role"));
    }

    #[test]
    fn test_short_digit_runs_are_kept() {
        let s = Sanitizer::default();
        assert_eq!(s.mask_pii("2 of 3 - 4"), "2 of 3 - 4");
        assert_eq!(s.mask_pii("call +44 20 7946 0958 now"), "call [PHONE] now");
    }

    #[test]
    fn test_iso_dates_are_not_phones() {
        let s = Sanitizer::default();
        assert_eq!(s.mask_pii("Updated 2024-01-01"), "Updated 2024-01-01");
        assert_eq!(s.mask_pii("valid until 2025-12-31 23:59"), "valid until 2025-12-31 23:59");
        assert_eq!(
            s.mask_pii("Policy 2024-01-01, hotline 555-123-4567"),
            "Policy 2024-01-01, hotline [PHONE]"
        );
    }

    #[test]
    fn test_fallback_drops_script_text_before_truncating() {
        let s = Sanitizer::new(SanitizerConfig {
            fallback_chars: 12,
            ..Default::default()
        });
        let out = s.fallback("<div><script>var sessionToken='SECRET-abc123';</script>Hi</div>");
        assert!(!out.contains("SECRET"));
        assert!(!out.contains("sessionToken"));
        assert!(out.contains("Hi"));
    }
}
