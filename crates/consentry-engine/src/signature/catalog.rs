use consentry_common::Signature;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::LazyLock;
use thiserror::Error;

/// Object keys that would make a catalog site-specific.
const SITE_KEYS: &[&str] = &["sites", "domains", "domain"];

const MAX_RATING: u64 = 5;

static HOSTNAME_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}$").unwrap()
});

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog contains site-specific entries at {0}")]
    SiteSpecific(String),
    #[error("Signature {selector} has rating {rating}, expected 0..=5")]
    InvalidRating { selector: String, rating: String },
    #[error("Duplicate signature selector: {0}")]
    DuplicateSignature(String),
    #[error("Unknown signature: {0}")]
    UnknownSignature(String),
}

/// Class and text hints for one button type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonTypeHints {
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionDetection {
    #[serde(default)]
    pub gdpr: Vec<String>,
    #[serde(default)]
    pub ccpa: Vec<String>,
}

/// Versioned, generic signature catalog. Also the persisted backing store
/// for lexicon extensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureCatalog {
    #[serde(default, deserialize_with = "deserialize_version")]
    pub version: String,
    #[serde(default)]
    pub dialog_selectors: Vec<String>,
    #[serde(default)]
    pub dialog_patterns: Vec<String>,
    /// Keyed by button type: `accept`, `reject`, `settings`.
    #[serde(default)]
    pub button_types: BTreeMap<String, ButtonTypeHints>,
    #[serde(default)]
    pub checkbox_types: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub region_detection: RegionDetection,
    #[serde(default)]
    pub signatures: Vec<Signature>,
    /// Recently counted `(signature id, request id)` pairs. Lives only as
    /// long as this loaded catalog.
    #[serde(skip)]
    applied: AppliedRequests,
}

/// Most recent pairs kept for replay detection. Retries arrive close to the
/// original call; older pairs are evicted first.
pub const MAX_TRACKED_REQUESTS: usize = 4096;

/// Insertion-ordered set capped at [`MAX_TRACKED_REQUESTS`].
#[derive(Debug, Clone, Default)]
struct AppliedRequests {
    seen: HashSet<(String, String)>,
    order: VecDeque<(String, String)>,
}

impl AppliedRequests {
    /// False when the pair is already tracked.
    fn insert(&mut self, key: (String, String)) -> bool {
        if self.seen.contains(&key) {
            return false;
        }
        if self.order.len() == MAX_TRACKED_REQUESTS
            && let Some(oldest) = self.order.pop_front()
        {
            self.seen.remove(&oldest);
        }
        self.seen.insert(key.clone());
        self.order.push_back(key);
        true
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Accept `"version": 3` as well as `"version": "3"`.
fn deserialize_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl SignatureCatalog {
    /// Parse and validate a catalog document. Validation failures reject the
    /// whole catalog.
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        validate(&value)?;
        let catalog: SignatureCatalog = serde_json::from_value(value)?;
        Ok(catalog)
    }

    pub fn signature(&self, id: &str) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Count one successful application of a signature.
    ///
    /// Repeating a call with the same `request_id` is a no-op while the pair
    /// is among the last [`MAX_TRACKED_REQUESTS`] recorded. Returns the
    /// current `uses` count.
    pub fn record_use(&mut self, signature_id: &str, request_id: &str) -> Result<u64, CatalogError> {
        let signature = self
            .signatures
            .iter_mut()
            .find(|s| s.selector == signature_id)
            .ok_or_else(|| CatalogError::UnknownSignature(signature_id.to_string()))?;

        if self
            .applied
            .insert((signature_id.to_string(), request_id.to_string()))
        {
            signature.uses += 1;
        }
        Ok(signature.uses)
    }
}

/// Fail-closed integrity checks on the raw document.
pub fn validate(value: &Value) -> Result<(), CatalogError> {
    check_generic_keys(value, "$")?;

    let Some(signatures) = value.get("signatures").and_then(Value::as_array) else {
        return Ok(());
    };
    let mut seen = HashSet::new();
    for entry in signatures {
        let selector = entry
            .get("selector")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if let Some(rating) = entry.get("rating")
            && !rating.as_u64().is_some_and(|r| r <= MAX_RATING)
        {
            return Err(CatalogError::InvalidRating {
                selector: selector.to_string(),
                rating: rating.to_string(),
            });
        }
        if !seen.insert(selector) {
            return Err(CatalogError::DuplicateSignature(selector.to_string()));
        }
    }
    Ok(())
}

fn check_generic_keys(value: &Value, path: &str) -> Result<(), CatalogError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = format!("{path}.{key}");
                let lowered = key.to_ascii_lowercase();
                if SITE_KEYS.contains(&lowered.as_str()) || HOSTNAME_KEY.is_match(&lowered) {
                    return Err(CatalogError::SiteSpecific(child_path));
                }
                check_generic_keys(child, &child_path)?;
            }
            Ok(())
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| check_generic_keys(item, &format!("{path}[{i}]"))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_keys() {
        assert!(HOSTNAME_KEY.is_match("example.com"));
        assert!(HOSTNAME_KEY.is_match("www.bank.co.uk"));
        assert!(!HOSTNAME_KEY.is_match("accept"));
        assert!(!HOSTNAME_KEY.is_match("v1.2"));
    }

    #[test]
    fn test_nested_site_key_is_rejected() {
        let value = serde_json::json!({
            "buttonTypes": { "accept": { "classes": [], "overrides": { "example.com": {} } } }
        });
        let err = validate(&value).unwrap_err();
        assert!(matches!(err, CatalogError::SiteSpecific(p) if p.ends_with("example.com")));
    }

    #[test]
    fn test_applied_requests_are_capped() {
        let mut catalog = SignatureCatalog::from_json_str(
            r##"{"signatures": [{"selector": "#cmp", "rating": 4}]}"##,
        )
        .unwrap();
        for i in 0..MAX_TRACKED_REQUESTS + 10 {
            catalog.record_use("#cmp", &format!("req-{i}")).unwrap();
        }
        assert_eq!(catalog.applied.len(), MAX_TRACKED_REQUESTS);
        assert_eq!(catalog.signatures[0].uses, (MAX_TRACKED_REQUESTS + 10) as u64);

        let last = format!("req-{}", MAX_TRACKED_REQUESTS + 9);
        assert_eq!(
            catalog.record_use("#cmp", &last).unwrap(),
            (MAX_TRACKED_REQUESTS + 10) as u64
        );
    }

    #[test]
    fn test_numeric_version() {
        let catalog = SignatureCatalog::from_json_str(r#"{"version": 2}"#).unwrap();
        assert_eq!(catalog.version, "2");
        assert!(catalog.is_empty());
    }
}
