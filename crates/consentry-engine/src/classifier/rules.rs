//! Named button rules, listed per slot in evaluation order.
//!
//! Each rule is a pure function over precomputed control features. The
//! first rule (in list order) that scores any control (in document order)
//! fills the slot.

use crate::lexicon::{Lexicon, class_hint_match};
use crate::model::RuleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pass {
    Identifier,
    CompoundText,
    BareText,
    Structural,
}

/// Features of one control, computed once per classification.
pub struct RuleInput<'a> {
    pub lexicon: &'a Lexicon,
    /// Normalized label text.
    pub label: &'a str,
    /// Lowercased id and class tokens.
    pub tokens: &'a [String],
    pub classes: &'a [&'a str],
}

impl RuleInput<'_> {
    pub fn is_settings_identifier(&self) -> bool {
        self.lexicon.find_settings_identifier(self.tokens).is_some()
    }

    pub fn is_settings_text(&self) -> bool {
        self.lexicon.find_settings_text(self.label).is_some()
    }

    /// Hard settings exclusion, checked before any rule of the given pass.
    ///
    /// Passes that do not read the label still honour a settings label: a
    /// "Manage preferences" control with an `allow` class is not an accept.
    pub fn excluded_for(&self, pass: Pass) -> bool {
        match pass {
            Pass::CompoundText | Pass::BareText => self.is_settings_text(),
            Pass::Identifier | Pass::Structural => {
                self.is_settings_identifier() || self.is_settings_text()
            }
        }
    }

    fn has_reject_text(&self) -> bool {
        self.lexicon.find_reject_text(self.label).is_some()
    }

    fn has_reject_identifier(&self) -> bool {
        self.lexicon.find_reject_identifier(self.tokens).is_some()
    }
}

/// A named classifier rule. `applies` is a pure predicate; a hit scores `score`.
pub struct ButtonRule {
    pub name: RuleId,
    pub slot: Slot,
    pub pass: Pass,
    pub score: f32,
    pub applies: fn(&RuleInput) -> bool,
}

impl ButtonRule {
    pub fn apply(&self, input: &RuleInput) -> Option<f32> {
        (self.applies)(input).then_some(self.score)
    }
}

/// Rules for a slot, in evaluation order.
pub fn rules_for(slot: Slot) -> Vec<ButtonRule> {
    match slot {
        Slot::Accept => accept_rules(),
        Slot::Reject => reject_rules(),
    }
}

fn accept_rules() -> Vec<ButtonRule> {
    vec![
        ButtonRule {
            name: "accept_identifier",
            slot: Slot::Accept,
            pass: Pass::Identifier,
            score: 1.0,
            applies: |input| {
                input.lexicon.find_accept_identifier(input.tokens).is_some()
                    && !input.has_reject_identifier()
            },
        },
        ButtonRule {
            name: "accept_compound_text",
            slot: Slot::Accept,
            pass: Pass::CompoundText,
            score: 0.9,
            applies: |input| {
                input.lexicon.find_accept_text(input.label).is_some()
                    && input.lexicon.has_cookie_term(input.label)
                    && !input.has_reject_text()
            },
        },
        ButtonRule {
            name: "accept_bare_text",
            slot: Slot::Accept,
            pass: Pass::BareText,
            score: 0.7,
            applies: |input| {
                input.lexicon.find_accept_text(input.label).is_some() && !input.has_reject_text()
            },
        },
        ButtonRule {
            name: "accept_primary_style",
            slot: Slot::Accept,
            pass: Pass::Structural,
            score: 0.4,
            applies: |input| {
                class_hint_match(input.classes, &input.lexicon.primary_class_hints)
                    && !input.has_reject_text()
                    && !input.has_reject_identifier()
            },
        },
    ]
}

fn reject_rules() -> Vec<ButtonRule> {
    vec![
        ButtonRule {
            name: "reject_identifier",
            slot: Slot::Reject,
            pass: Pass::Identifier,
            score: 1.0,
            applies: |input| input.has_reject_identifier(),
        },
        ButtonRule {
            name: "reject_compound_text",
            slot: Slot::Reject,
            pass: Pass::CompoundText,
            score: 0.9,
            applies: |input| input.has_reject_text() && input.lexicon.has_cookie_term(input.label),
        },
        ButtonRule {
            name: "reject_bare_text",
            slot: Slot::Reject,
            pass: Pass::BareText,
            score: 0.7,
            applies: |input| input.has_reject_text(),
        },
        ButtonRule {
            name: "reject_secondary_style",
            slot: Slot::Reject,
            pass: Pass::Structural,
            score: 0.35,
            applies: |input| class_hint_match(input.classes, &input.lexicon.secondary_class_hints),
        },
    ]
}
