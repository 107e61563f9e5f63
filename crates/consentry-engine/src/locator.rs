//! Dialog Locator.
//!
//! Three tiers in strict priority order, first visible hit wins:
//! known container ids, known container classes, then a keyword scan over
//! container-like nodes that also hold an interactive control. Known
//! containers still need consent vocabulary in their text or identifiers.

use crate::classifier::{classify_buttons, is_button_like, is_interactive};
use crate::config::{ConsentryConfig, DetectionConfig};
use crate::dom::DocumentNode;
use crate::lexicon::{Lexicon, identifier_tokens, normalize_text};
use crate::model::{Candidate, DialogMatch, RuleId};
use crate::region::detect_jurisdiction;
use crate::variant::detect_variant;
use crate::visibility::is_visible;
use consentry_common::Variant;
use tracing::{debug, info};

pub const KNOWN_CONTAINER_ID: RuleId = "known_container_id";
pub const KNOWN_CONTAINER_CLASS: RuleId = "known_container_class";
pub const KEYWORD_INTERACTIVE_SCAN: RuleId = "keyword_interactive_scan";
pub const STANDALONE_BANNER: RuleId = "standalone_banner";

/// Confidence factor used when no accept control backs the container.
const MISSING_ACCEPT_FACTOR: f32 = 0.5;

/// A locator tier: a named pure function over the document's nodes.
pub struct LocatorRule<N> {
    pub name: RuleId,
    pub score: f32,
    pub find: fn(&[N], &Lexicon, &DetectionConfig) -> Option<N>,
}

/// Locator tiers in priority order.
pub fn locator_rules<N: DocumentNode>() -> Vec<LocatorRule<N>> {
    vec![
        LocatorRule {
            name: KNOWN_CONTAINER_ID,
            score: 1.0,
            find: by_known_id,
        },
        LocatorRule {
            name: KNOWN_CONTAINER_CLASS,
            score: 0.9,
            find: by_known_class,
        },
        LocatorRule {
            name: KEYWORD_INTERACTIVE_SCAN,
            score: 0.6,
            find: by_keyword_scan,
        },
    ]
}

const STANDALONE_SCORE: f32 = 0.4;

/// Find the most likely consent container under `root`.
pub fn find_container<N: DocumentNode>(
    root: &N,
    lexicon: &Lexicon,
    config: &DetectionConfig,
) -> Option<Candidate<N>> {
    let nodes = root.subtree();
    locator_rules().into_iter().find_map(|rule| {
        let node = (rule.find)(&nodes, lexicon, config)?;
        debug!(rule = rule.name, tag = node.tag_name(), id = node.id(), "container located");
        Some(Candidate::new(node, rule.score, rule.name))
    })
}

fn by_known_id<N: DocumentNode>(nodes: &[N], lexicon: &Lexicon, _: &DetectionConfig) -> Option<N> {
    lexicon.dialog_ids.iter().find_map(|id| {
        nodes
            .iter()
            .find(|n| {
                n.id().eq_ignore_ascii_case(id)
                    && is_visible(*n)
                    && has_dialog_vocabulary(*n, lexicon)
            })
            .cloned()
    })
}

fn by_known_class<N: DocumentNode>(
    nodes: &[N],
    lexicon: &Lexicon,
    _: &DetectionConfig,
) -> Option<N> {
    lexicon.dialog_classes.iter().find_map(|class| {
        nodes
            .iter()
            .find(|n| {
                n.class_list().iter().any(|c| c.eq_ignore_ascii_case(class))
                    && is_visible(*n)
                    && has_dialog_vocabulary(*n, lexicon)
            })
            .cloned()
    })
}

/// Vendor markup alone is not enough: the container's text or its own
/// id/class tokens must carry a dialog keyword.
fn has_dialog_vocabulary<N: DocumentNode>(node: &N, lexicon: &Lexicon) -> bool {
    lexicon.has_dialog_keyword(&normalize_text(&node.text_content()))
        || lexicon
            .find_dialog_identifier(&identifier_tokens(node))
            .is_some()
}

fn by_keyword_scan<N: DocumentNode>(
    nodes: &[N],
    lexicon: &Lexicon,
    config: &DetectionConfig,
) -> Option<N> {
    let qualifies = |n: &N| scan_qualifies(n, lexicon, config.max_scan_text_chars);
    let mut current = nodes.iter().find(|n| qualifies(n))?.clone();
    if config.narrow_scan_matches {
        while let Some(inner) = current.descendants().into_iter().find(|n| qualifies(n)) {
            current = inner;
        }
    }
    Some(current)
}

fn scan_qualifies<N: DocumentNode>(node: &N, lexicon: &Lexicon, max_chars: usize) -> bool {
    if !lexicon.is_container_tag(node.tag_name()) {
        return false;
    }
    let context = context_text(node);
    if context.chars().count() > max_chars || !lexicon.has_dialog_keyword(&context) {
        return false;
    }
    is_visible(node)
        && node
            .descendants()
            .iter()
            .any(|d| is_button_like(d) && is_visible(d))
}

/// Normalized text of `node`, leaving out the text of interactive descendants.
///
/// A row of buttons labelled "Accept cookies" is not itself a dialog.
pub fn context_text<N: DocumentNode>(node: &N) -> String {
    let mut pieces = Vec::new();
    collect_context(node, &mut pieces);
    normalize_text(&pieces.join(" "))
}

fn collect_context<N: DocumentNode>(node: &N, pieces: &mut Vec<String>) {
    let own = node.own_text().trim();
    if !own.is_empty() {
        pieces.push(own.to_string());
    }
    for child in node.children() {
        if !is_interactive(&child) {
            collect_context(&child, pieces);
        }
    }
}

/// Locate, classify and label the consent dialog under `root`.
pub fn locate_dialog<N: DocumentNode>(
    root: &N,
    lexicon: &Lexicon,
    config: &ConsentryConfig,
) -> Option<DialogMatch<N>> {
    let container = find_container(root, lexicon, &config.detection)
        .or_else(|| standalone_container(root, lexicon, &config.detection))?;

    let buttons = classify_buttons(&container.node, lexicon);
    let accept = buttons.accept.as_ref().map(|c| c.node.clone());
    let reject = buttons.reject.as_ref().map(|c| c.node.clone());

    let confidence = container.score
        * buttons
            .accept
            .as_ref()
            .map_or(MISSING_ACCEPT_FACTOR, |c| c.score);
    let jurisdiction = detect_jurisdiction(&container.node, lexicon);
    let variant = detect_variant(
        &container.node,
        accept.as_ref(),
        reject.as_ref(),
        lexicon,
        &config.dark_pattern,
    );
    debug_assert_eq!(variant == Variant::NoChoice, reject.is_none());

    info!(
        rule = container.source_rule,
        %jurisdiction,
        %variant,
        confidence,
        "consent dialog located"
    );
    Some(DialogMatch {
        container: container.node,
        accept_button: accept,
        reject_button: reject,
        jurisdiction,
        variant,
        confidence,
    })
}

/// Standalone banners: no recognisable container, but an accept control
/// whose ancestry mentions consent vocabulary.
fn standalone_container<N: DocumentNode>(
    root: &N,
    lexicon: &Lexicon,
    config: &DetectionConfig,
) -> Option<Candidate<N>> {
    let accept = classify_buttons(root, lexicon).accept?;
    let container = accept.node.ancestors().into_iter().find(|a| {
        let context = context_text(a);
        context.chars().count() <= config.max_scan_text_chars && lexicon.has_dialog_keyword(&context)
    })?;
    debug!(tag = container.tag_name(), "standalone banner container");
    Some(Candidate::new(container, STANDALONE_SCORE, STANDALONE_BANNER))
}
