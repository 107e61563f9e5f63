use crate::classifier::control_label;
use crate::dom::DocumentNode;
use crate::selector::unique_selector;
use consentry_common::{Jurisdiction, Variant};
use serde::Serialize;

/// Name of the rule that produced a candidate.
pub type RuleId = &'static str;

/// A scored node produced by a locator or classifier rule. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<N> {
    pub node: N,
    pub score: f32,
    pub source_rule: RuleId,
}

impl<N> Candidate<N> {
    pub fn new(node: N, score: f32, source_rule: RuleId) -> Self {
        Self {
            node,
            score,
            source_rule,
        }
    }
}

/// A located and classified consent dialog.
///
/// `reject_button` is never the same node as `accept_button`, and `variant`
/// is [`Variant::NoChoice`] exactly when `reject_button` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogMatch<N> {
    pub container: N,
    pub accept_button: Option<N>,
    pub reject_button: Option<N>,
    pub jurisdiction: Jurisdiction,
    pub variant: Variant,
    pub confidence: f32,
}

impl<N: DocumentNode> DialogMatch<N> {
    pub fn summary(&self) -> DialogSummary {
        DialogSummary {
            container: unique_selector(&self.container),
            accept: self.accept_button.as_ref().map(ControlSummary::of),
            reject: self.reject_button.as_ref().map(ControlSummary::of),
            jurisdiction: self.jurisdiction,
            variant: self.variant,
            confidence: self.confidence,
        }
    }
}

/// Serializable view of a [`DialogMatch`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogSummary {
    pub container: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<ControlSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject: Option<ControlSummary>,
    pub jurisdiction: Jurisdiction,
    pub variant: Variant,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSummary {
    pub selector: String,
    pub label: String,
}

impl ControlSummary {
    fn of<N: DocumentNode>(node: &N) -> Self {
        Self {
            selector: unique_selector(node),
            label: control_label(node),
        }
    }
}
