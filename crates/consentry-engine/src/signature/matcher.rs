use super::catalog::SignatureCatalog;
use crate::dom::DocumentNode;
use crate::selector::Selector;
use crate::visibility::is_visible;
use consentry_common::Signature;
use tracing::debug;

/// How a signature was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Literal selector present in the document.
    Selector,
    /// Every class pattern present on one node.
    ClassPattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureMatch<'c, N> {
    pub signature: &'c Signature,
    pub node: N,
    pub kind: MatchKind,
}

/// Match `root` (a container or whole document) against the catalog.
///
/// Literal selectors are tried first, highest rating first; class patterns
/// only when no selector hits. Equal ratings keep catalog order.
pub fn match_signature<'c, N: DocumentNode>(
    root: &N,
    catalog: &'c SignatureCatalog,
) -> Option<SignatureMatch<'c, N>> {
    let mut ranked: Vec<&Signature> = catalog.signatures.iter().collect();
    ranked.sort_by(|a, b| b.rating.cmp(&a.rating));

    let nodes = root.subtree();

    for signature in ranked.iter().copied() {
        let selector = match Selector::parse(&signature.selector) {
            Ok(selector) => selector,
            Err(e) => {
                debug!(selector = %signature.selector, error = %e, "skipping unparsable signature");
                continue;
            }
        };
        if let Some(node) = nodes
            .iter()
            .find(|n| selector.matches(*n) && is_visible(*n))
        {
            debug!(selector = %signature.selector, "signature selector hit");
            return Some(SignatureMatch {
                signature,
                node: node.clone(),
                kind: MatchKind::Selector,
            });
        }
    }

    for signature in ranked.iter().copied() {
        if signature.class_patterns.is_empty() {
            continue;
        }
        if let Some(node) = nodes
            .iter()
            .find(|n| has_all_classes(*n, &signature.class_patterns) && is_visible(*n))
        {
            debug!(selector = %signature.selector, "signature class pattern hit");
            return Some(SignatureMatch {
                signature,
                node: node.clone(),
                kind: MatchKind::ClassPattern,
            });
        }
    }

    None
}

fn has_all_classes<N: DocumentNode>(node: &N, patterns: &[String]) -> bool {
    let classes = node.class_list();
    patterns
        .iter()
        .all(|p| classes.iter().any(|c| c.eq_ignore_ascii_case(p)))
}
