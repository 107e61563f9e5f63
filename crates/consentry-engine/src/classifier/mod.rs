//! Button Classifier.
//!
//! Given a container, picks the accept and reject controls with the rule
//! tables in [`rules`]. Settings-like controls are reported but never fill a
//! slot, and the reject slot never reuses the accept node.

pub mod rules;

pub use rules::{ButtonRule, Pass, RuleInput, Slot, rules_for};

use crate::dom::DocumentNode;
use crate::lexicon::{Lexicon, contains_term, identifier_tokens, normalize_text};
use crate::model::Candidate;
use crate::visibility::is_visible;
use tracing::debug;

/// Result of classifying one container.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonClassification<N> {
    pub accept: Option<Candidate<N>>,
    pub reject: Option<Candidate<N>>,
    /// First settings-like control, reported for hosts that want to open it.
    pub settings: Option<N>,
}

impl<N> ButtonClassification<N> {
    pub fn accept_node(&self) -> Option<&N> {
        self.accept.as_ref().map(|c| &c.node)
    }

    pub fn reject_node(&self) -> Option<&N> {
        self.reject.as_ref().map(|c| &c.node)
    }
}

/// A consent category checkbox or switch inside a dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsentToggle<N> {
    pub node: N,
    /// Category key from the lexicon's checkbox table, if one matched.
    pub category: Option<String>,
    pub checked: bool,
}

/// Precomputed features of one candidate control.
struct Control<N> {
    node: N,
    label: String,
    tokens: Vec<String>,
    classes: Vec<String>,
}

impl<N: DocumentNode> Control<N> {
    fn new(node: N) -> Self {
        let label = normalize_text(&control_label(&node));
        let tokens = identifier_tokens(&node);
        let classes = node.class_list().iter().map(|c| c.to_lowercase()).collect();
        Self {
            node,
            label,
            tokens,
            classes,
        }
    }

    fn with_input<R>(&self, lexicon: &Lexicon, f: impl FnOnce(&RuleInput) -> R) -> R {
        let classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
        let input = RuleInput {
            lexicon,
            label: &self.label,
            tokens: &self.tokens,
            classes: &classes,
        };
        f(&input)
    }
}

/// Classify the interactive descendants of `container`.
pub fn classify_buttons<N: DocumentNode>(container: &N, lexicon: &Lexicon) -> ButtonClassification<N> {
    let controls: Vec<Control<N>> = container
        .descendants()
        .into_iter()
        .filter(|node| is_candidate(node, lexicon))
        .map(Control::new)
        .collect();

    let accept = fill_slot(Slot::Accept, &controls, lexicon, None);
    let reject = fill_slot(
        Slot::Reject,
        &controls,
        lexicon,
        accept.as_ref().map(|c| &c.node),
    );

    let settings = controls
        .iter()
        .find(|c| c.with_input(lexicon, |i| i.is_settings_identifier() || i.is_settings_text()))
        .map(|c| c.node.clone());

    ButtonClassification {
        accept,
        reject,
        settings,
    }
}

fn fill_slot<N: DocumentNode>(
    slot: Slot,
    controls: &[Control<N>],
    lexicon: &Lexicon,
    taken: Option<&N>,
) -> Option<Candidate<N>> {
    for rule in rules_for(slot) {
        for control in controls {
            if taken.is_some_and(|t| t.is_same_node(&control.node)) {
                continue;
            }
            let score = control.with_input(lexicon, |input| {
                if input.excluded_for(rule.pass) {
                    None
                } else {
                    rule.apply(input)
                }
            });
            if let Some(score) = score {
                debug!(rule = rule.name, score, label = %control.label, "button rule hit");
                return Some(Candidate::new(control.node.clone(), score, rule.name));
            }
        }
    }
    None
}

/// Visible, enabled, interactive and not an informational link.
fn is_candidate<N: DocumentNode>(node: &N, lexicon: &Lexicon) -> bool {
    is_interactive(node)
        && !is_disabled(node)
        && !is_informational_anchor(node, lexicon)
        && is_visible(node)
}

/// `button`, `a`, `input[type=button|submit]` or `[role=button]`.
pub fn is_interactive<N: DocumentNode>(node: &N) -> bool {
    node.is_tag("button") || node.is_tag("a") || is_input_button(node) || has_button_role(node)
}

/// Controls that make a container look actionable to the locator: anchors only
/// count when styled as buttons.
pub fn is_button_like<N: DocumentNode>(node: &N) -> bool {
    if node.is_tag("a") {
        return has_button_role(node)
            || node.class_list().iter().any(|c| {
                let c = c.to_lowercase();
                c.contains("btn") || c.contains("button")
            });
    }
    node.is_tag("button") || is_input_button(node) || has_button_role(node)
}

fn is_input_button<N: DocumentNode>(node: &N) -> bool {
    node.is_tag("input")
        && node.attribute("type").is_some_and(|t| {
            let t = t.trim();
            t.eq_ignore_ascii_case("button") || t.eq_ignore_ascii_case("submit")
        })
}

fn has_button_role<N: DocumentNode>(node: &N) -> bool {
    node.attribute("role")
        .is_some_and(|r| r.trim().eq_ignore_ascii_case("button"))
}

pub fn is_disabled<N: DocumentNode>(node: &N) -> bool {
    node.attribute("disabled").is_some()
        || node
            .attribute("aria-disabled")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// An anchor with a real navigation target whose label is an informational phrase.
pub fn is_informational_anchor<N: DocumentNode>(node: &N, lexicon: &Lexicon) -> bool {
    node.is_tag("a")
        && node.attribute("href").is_some_and(has_real_target)
        && lexicon.is_informational_text(&normalize_text(&control_label(node)))
}

fn has_real_target(href: &str) -> bool {
    let href = href.trim();
    !href.is_empty()
        && href != "#"
        && !href
            .get(..11)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
}

/// Human-readable label: text content, else `value`, `aria-label`, `title`.
pub fn control_label<N: DocumentNode>(node: &N) -> String {
    let text = node.text_content();
    if !text.trim().is_empty() {
        return text.trim().to_string();
    }
    ["value", "aria-label", "title"]
        .into_iter()
        .filter_map(|name| node.attribute(name))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Checkboxes and switches inside `container`, tagged with their consent category.
pub fn find_consent_toggles<N: DocumentNode>(container: &N, lexicon: &Lexicon) -> Vec<ConsentToggle<N>> {
    container
        .descendants()
        .into_iter()
        .filter(is_toggle)
        .map(|node| {
            let category = toggle_category(&node, lexicon);
            let checked = node
                .attribute("checked")
                .is_some_and(|v| !v.trim().eq_ignore_ascii_case("false"))
                || node
                    .attribute("aria-checked")
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
            ConsentToggle {
                node,
                category,
                checked,
            }
        })
        .collect()
}

fn is_toggle<N: DocumentNode>(node: &N) -> bool {
    (node.is_tag("input")
        && node
            .attribute("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("checkbox")))
        || node
            .attribute("role")
            .is_some_and(|r| r.trim().eq_ignore_ascii_case("switch"))
}

fn toggle_category<N: DocumentNode>(node: &N, lexicon: &Lexicon) -> Option<String> {
    let tokens = identifier_tokens(node);
    // Inputs carry no text; the surrounding label usually does.
    let label = node
        .parent()
        .map(|p| normalize_text(&p.text_content()))
        .unwrap_or_default();
    let own = normalize_text(&control_label(node));

    lexicon
        .checkbox_types
        .iter()
        .find(|(_, terms)| {
            terms.iter().any(|term| {
                tokens.iter().any(|t| t.contains(term.as_str()))
                    || contains_term(&own, term)
                    || contains_term(&label, term)
            })
        })
        .map(|(category, _)| category.clone())
}
