//! Keyword tables used by every detection stage.
//!
//! A [`Lexicon`] is an immutable value built once and passed by reference
//! into each call. Text terms are matched lowercase and word-bounded;
//! identifier hints are matched as substrings of id/class tokens.

mod builtin;

use crate::dom::DocumentNode;
use crate::signature::SignatureCatalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Accept / reject / settings terms for one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageTable {
    pub code: String,
    #[serde(default)]
    pub accept: Vec<String>,
    #[serde(default)]
    pub reject: Vec<String>,
    #[serde(default)]
    pub settings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub dialog_ids: Vec<String>,
    pub dialog_classes: Vec<String>,
    /// Tags eligible for the keyword scan.
    pub container_tags: Vec<String>,
    pub dialog_keywords: Vec<String>,
    pub accept_identifiers: Vec<String>,
    pub reject_identifiers: Vec<String>,
    pub settings_identifiers: Vec<String>,
    /// Checked in order.
    pub languages: Vec<LanguageTable>,
    /// Domain terms for compound phrases such as "accept all cookies".
    pub cookie_terms: Vec<String>,
    pub informational_phrases: Vec<String>,
    pub primary_class_hints: Vec<String>,
    pub secondary_class_hints: Vec<String>,
    pub gdpr_terms: Vec<String>,
    pub ccpa_terms: Vec<String>,
    /// Attribute-name / id / class fragments that mark a GDPR dialog.
    pub gdpr_markers: Vec<String>,
    /// Consent category -> label terms for preference toggles.
    pub checkbox_types: BTreeMap<String, Vec<String>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    pub fn builtin() -> Self {
        builtin::builtin()
    }

    pub fn accept_terms(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .flat_map(|l| l.accept.iter().map(String::as_str))
    }

    pub fn reject_terms(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .flat_map(|l| l.reject.iter().map(String::as_str))
    }

    pub fn settings_terms(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .flat_map(|l| l.settings.iter().map(String::as_str))
    }

    /// First accept term found in already-normalized text.
    pub fn find_accept_text(&self, text: &str) -> Option<&str> {
        find_term(text, self.accept_terms())
    }

    pub fn find_reject_text(&self, text: &str) -> Option<&str> {
        find_term(text, self.reject_terms())
    }

    pub fn find_settings_text(&self, text: &str) -> Option<&str> {
        find_term(text, self.settings_terms())
    }

    pub fn has_cookie_term(&self, text: &str) -> bool {
        find_term(text, self.cookie_terms.iter().map(String::as_str)).is_some()
    }

    pub fn has_dialog_keyword(&self, text: &str) -> bool {
        find_term(text, self.dialog_keywords.iter().map(String::as_str)).is_some()
    }

    /// Dialog keyword embedded in an id/class token, e.g. `cookie` in `cookiebanner`.
    pub fn find_dialog_identifier<'a>(&'a self, tokens: &[String]) -> Option<&'a str> {
        identifier_match(tokens, &self.dialog_keywords)
    }

    pub fn is_informational_text(&self, text: &str) -> bool {
        find_term(text, self.informational_phrases.iter().map(String::as_str)).is_some()
    }

    pub fn find_accept_identifier<'a>(&'a self, tokens: &[String]) -> Option<&'a str> {
        identifier_match(tokens, &self.accept_identifiers)
    }

    pub fn find_reject_identifier<'a>(&'a self, tokens: &[String]) -> Option<&'a str> {
        identifier_match(tokens, &self.reject_identifiers)
    }

    pub fn find_settings_identifier<'a>(&'a self, tokens: &[String]) -> Option<&'a str> {
        identifier_match(tokens, &self.settings_identifiers)
    }

    pub fn is_container_tag(&self, tag: &str) -> bool {
        self.container_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Append terms to the table with the given language code, creating it if absent.
    pub fn extend_language(
        &mut self,
        code: &str,
        accept: &[String],
        reject: &[String],
        settings: &[String],
    ) {
        let index = match self.languages.iter().position(|l| l.code == code) {
            Some(i) => i,
            None => {
                self.languages.push(LanguageTable {
                    code: code.to_string(),
                    ..Default::default()
                });
                self.languages.len() - 1
            }
        };
        let table = &mut self.languages[index];
        extend_unique(&mut table.accept, accept);
        extend_unique(&mut table.reject, reject);
        extend_unique(&mut table.settings, settings);
    }

    /// A copy of this lexicon extended with the generic tables of a catalog.
    ///
    /// Only `#id` and `.class` dialog selectors feed the locator tables;
    /// anything more complex stays a signature-only selector.
    pub fn with_catalog(&self, catalog: &SignatureCatalog) -> Lexicon {
        let mut lexicon = self.clone();

        for selector in &catalog.dialog_selectors {
            let selector = selector.trim();
            if let Some(id) = simple_name(selector, '#') {
                push_unique(&mut lexicon.dialog_ids, id);
            } else if let Some(class) = simple_name(selector, '.') {
                push_unique(&mut lexicon.dialog_classes, class);
            } else {
                debug!(selector, "dialog selector left to the signature matcher");
            }
        }
        for pattern in &catalog.dialog_patterns {
            push_unique(&mut lexicon.dialog_classes, pattern.trim());
        }

        let hints = |key: &str| catalog.button_types.get(key).cloned().unwrap_or_default();
        let (accept, reject, settings) = (hints("accept"), hints("reject"), hints("settings"));
        extend_unique(&mut lexicon.accept_identifiers, &accept.classes);
        extend_unique(&mut lexicon.reject_identifiers, &reject.classes);
        extend_unique(&mut lexicon.settings_identifiers, &settings.classes);
        lexicon.extend_language("catalog", &accept.texts, &reject.texts, &settings.texts);

        extend_unique(&mut lexicon.gdpr_terms, &catalog.region_detection.gdpr);
        extend_unique(&mut lexicon.ccpa_terms, &catalog.region_detection.ccpa);

        for (category, terms) in &catalog.checkbox_types {
            extend_unique(lexicon.checkbox_types.entry(category.clone()).or_default(), terms);
        }

        lexicon
    }
}

/// `#name` / `.name` with no further selector syntax.
fn simple_name(selector: &str, prefix: char) -> Option<&str> {
    let name = selector.strip_prefix(prefix)?;
    (!name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_'))
    .then_some(name)
}

/// Identifier lists keep their original case; comparison is case-insensitive.
fn push_unique(target: &mut Vec<String>, item: &str) {
    if !item.is_empty() && !target.iter().any(|t| t.eq_ignore_ascii_case(item)) {
        target.push(item.to_string());
    }
}

pub(crate) fn extend_unique(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        let item = normalize_text(item);
        if !item.is_empty() && !target.contains(&item) {
            target.push(item);
        }
    }
}

/// Lowercase, unify apostrophes, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
}

/// Word-bounded containment: `term` must not be flanked by alphanumerics.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + term.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

pub fn find_term<'t>(haystack: &str, terms: impl IntoIterator<Item = &'t str>) -> Option<&'t str> {
    terms.into_iter().find(|t| contains_term(haystack, t))
}

/// Lowercased id and class tokens of a node.
pub fn identifier_tokens<N: DocumentNode>(node: &N) -> Vec<String> {
    let mut tokens = Vec::new();
    let id = node.id().trim();
    if !id.is_empty() {
        tokens.push(id.to_lowercase());
    }
    tokens.extend(node.class_list().iter().map(|c| c.to_lowercase()));
    tokens
}

fn identifier_match<'a>(tokens: &[String], terms: &'a [String]) -> Option<&'a str> {
    terms
        .iter()
        .find(|term| tokens.iter().any(|tok| tok.contains(term.as_str())))
        .map(String::as_str)
}

/// True when a class token, or one of its `-`/`_` separated segments, equals a hint.
pub fn class_hint_match(class_tokens: &[&str], hints: &[String]) -> bool {
    class_tokens.iter().any(|token| {
        let token = token.to_lowercase();
        hints.iter().any(|hint| {
            token == *hint || token.split(['-', '_']).any(|segment| segment == hint)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_term_is_word_bounded() {
        assert!(contains_term("ok", "ok"));
        assert!(contains_term("ok, got it", "ok"));
        assert!(!contains_term("we use cookies", "ok"));
        assert!(!contains_term("accepted", "accept"));
        assert!(contains_term("accept all cookies", "accept all"));
        assert!(contains_term("j'accepte", "j'accepte"));
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  J\u{2019}ACCEPTE \n tout "), "j'accepte tout");
    }

    #[test]
    fn test_builtin_tables_are_lowercase() {
        let lex = Lexicon::builtin();
        for term in lex.accept_terms().chain(lex.reject_terms()).chain(lex.settings_terms()) {
            assert_eq!(term, term.to_lowercase(), "term {term} must be lowercase");
        }
        assert_eq!(lex.languages[0].code, "en");
    }

    #[test]
    fn test_class_hint_segments() {
        let hints = vec!["primary".to_string(), "cta".to_string()];
        assert!(class_hint_match(&["btn-primary"], &hints));
        assert!(class_hint_match(&["cta"], &hints));
        assert!(!class_hint_match(&["primaryish"], &hints));
    }
}
