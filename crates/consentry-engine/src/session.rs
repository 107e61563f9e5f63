//! Per-page dedupe of handled dialogs.

use crate::dom::DocumentNode;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

const FINGERPRINT_TEXT_CHARS: usize = 100;

/// Content-derived identifier of a container: SHA-256 (hex) of its tag, id,
/// class attribute and the first characters of its text.
pub fn dialog_fingerprint<N: DocumentNode>(node: &N) -> String {
    let text: String = node.text_content().chars().take(FINGERPRINT_TEXT_CHARS).collect();
    let mut hasher = Sha256::new();
    for part in [
        node.tag_name(),
        node.id(),
        node.attribute("class").unwrap_or_default(),
        text.as_str(),
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

/// Append-only set of dialog fingerprints seen during one page lifetime.
#[derive(Debug, Clone, Default)]
pub struct SeenDialogs {
    fingerprints: HashSet<String>,
}

impl SeenDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the fingerprint was not seen before.
    pub fn insert(&mut self, fingerprint: String) -> bool {
        self.fingerprints.insert(fingerprint)
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }
}
