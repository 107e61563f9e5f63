use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounding geometry of a rendered node, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Regulatory regime inferred from a dialog's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    Gdpr,
    Ccpa,
    Generic,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Gdpr => "gdpr",
            Jurisdiction::Ccpa => "ccpa",
            Jurisdiction::Generic => "generic",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual variant of a dialog, derived from its accept/reject controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Standard,
    DarkPattern,
    NoChoice,
    Unknown,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::DarkPattern => "dark-pattern",
            Variant::NoChoice => "no-choice",
            Variant::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consent intent carried by a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonType {
    Accept,
    Reject,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    #[default]
    Button,
}

/// A generic structural fingerprint from the signature catalog.
///
/// Signatures are never tied to a domain. `uses` only ever grows; `rating`
/// changes only through the review workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub selector: String,
    #[serde(rename = "type", default)]
    pub kind: SignatureKind,
    pub rating: u8,
    /// True when the control is a "necessary only" / reject control.
    #[serde(default)]
    pub necessary: bool,
    #[serde(default)]
    pub class_patterns: Vec<String>,
    #[serde(default)]
    pub structure_hint: String,
    #[serde(default)]
    pub uses: u64,
}

impl Signature {
    /// Catalog-wide identifier of a signature.
    pub fn id(&self) -> &str {
        &self.selector
    }

    pub fn button_type(&self) -> ButtonType {
        if self.necessary {
            ButtonType::Reject
        } else {
            ButtonType::Accept
        }
    }
}

/// Sanitized, transmittable summary of one classified dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRecord {
    pub url: String,
    pub domain: String,
    pub selector: String,
    pub sanitized_html: String,
    pub jurisdiction: Jurisdiction,
    pub variant: Variant,
    pub captured_at: DateTime<Utc>,
}

impl CaptureRecord {
    /// Key used to deduplicate retried submissions of the same capture.
    pub fn content_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.domain, self.url, self.selector, self.sanitized_html
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_wire_names() {
        let json = serde_json::to_string(&Variant::DarkPattern).unwrap();
        assert_eq!(json, "\"dark-pattern\"");
        let back: Variant = serde_json::from_str("\"no-choice\"").unwrap();
        assert_eq!(back, Variant::NoChoice);
    }

    #[test]
    fn test_signature_defaults() {
        let sig: Signature =
            serde_json::from_str(r##"{"selector": "#accept", "rating": 4}"##).unwrap();
        assert_eq!(sig.kind, SignatureKind::Button);
        assert_eq!(sig.uses, 0);
        assert!(!sig.necessary);
        assert_eq!(sig.button_type(), ButtonType::Accept);
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 10.0, 10.0).is_empty());
    }
}
