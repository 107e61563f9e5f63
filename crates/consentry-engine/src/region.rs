//! Jurisdiction detection.

use crate::dom::DocumentNode;
use crate::lexicon::{Lexicon, find_term, identifier_tokens, normalize_text};
use consentry_common::Jurisdiction;

/// GDPR if GDPR-family terms or markers appear, else CCPA, else generic.
pub fn detect_jurisdiction<N: DocumentNode>(container: &N, lexicon: &Lexicon) -> Jurisdiction {
    let subtree = container.subtree();
    let tokens: Vec<String> = subtree.iter().flat_map(identifier_tokens).collect();
    let mut haystack = normalize_text(&container.text_content());
    for token in &tokens {
        haystack.push(' ');
        // Identifier separators become word boundaries: `gdpr-banner` -> `gdpr banner`.
        haystack.push_str(&token.replace(['-', '_'], " "));
    }

    if find_term(&haystack, lexicon.gdpr_terms.iter().map(String::as_str)).is_some()
        || has_gdpr_marker(&subtree, &tokens, lexicon)
    {
        return Jurisdiction::Gdpr;
    }
    if find_term(&haystack, lexicon.ccpa_terms.iter().map(String::as_str)).is_some() {
        return Jurisdiction::Ccpa;
    }
    Jurisdiction::Generic
}

fn has_gdpr_marker<N: DocumentNode>(subtree: &[N], tokens: &[String], lexicon: &Lexicon) -> bool {
    let marked = |name: &str| {
        let name = name.to_ascii_lowercase();
        lexicon.gdpr_markers.iter().any(|m| name.contains(m.as_str()))
    };
    tokens.iter().any(|t| marked(t))
        || subtree
            .iter()
            .any(|node| marked(node.tag_name()) || node.attribute_names().into_iter().any(marked))
}
