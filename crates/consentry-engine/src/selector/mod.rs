//! CSS selector subset: compound selectors (`tag`, `*`, `#id`, `.class`,
//! `[attr]`, `[attr op value]`) joined by descendant or child combinators,
//! in comma-separated lists. Matching runs against any [`DocumentNode`].

mod path;

pub use path::unique_selector;

use crate::dom::DocumentNode;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "selector/selector.pest"]
pub struct SelectorParser;

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("Selector parse error: {0}")]
    Pest(#[from] pest::error::Error<Rule>),
    #[error("Unexpected rule in selector: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Includes(String),
    Prefix(String),
    Suffix(String),
    Substring(String),
    DashMatch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSelector {
    pub name: String,
    pub op: AttrOp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub ids: Vec<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrSelector>,
}

/// Compounds joined by combinators; `combinators[i]` sits between
/// `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<Compound>,
    pub combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut pairs = SelectorParser::parse(Rule::selector_list, input)?;
        let list = pairs
            .next()
            .ok_or_else(|| SelectorError::Unexpected("empty input".into()))?;

        let mut alternatives = Vec::new();
        for pair in list.into_inner() {
            match pair.as_rule() {
                Rule::complex => alternatives.push(parse_complex(pair)?),
                Rule::EOI => {}
                other => return Err(SelectorError::Unexpected(format!("{:?}", other))),
            }
        }

        Ok(Self {
            source: input.trim().to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn alternatives(&self) -> &[ComplexSelector] {
        &self.alternatives
    }

    pub fn matches<N: DocumentNode>(&self, node: &N) -> bool {
        self.alternatives
            .iter()
            .any(|c| matches_from(node, &c.compounds, &c.combinators))
    }
}

fn parse_complex(pair: Pair<Rule>) -> Result<ComplexSelector, SelectorError> {
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::compound => compounds.push(parse_compound(inner)?),
            Rule::combinator => {
                let kind = inner
                    .into_inner()
                    .next()
                    .ok_or_else(|| SelectorError::Unexpected("empty combinator".into()))?;
                combinators.push(match kind.as_rule() {
                    Rule::child => Combinator::Child,
                    _ => Combinator::Descendant,
                });
            }
            other => return Err(SelectorError::Unexpected(format!("{:?}", other))),
        }
    }
    Ok(ComplexSelector {
        compounds,
        combinators,
    })
}

fn parse_compound(pair: Pair<Rule>) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::universal => {}
            Rule::tag => compound.tag = Some(inner.as_str().to_ascii_lowercase()),
            Rule::id => compound.ids.push(name_of(inner)),
            Rule::class => compound.classes.push(name_of(inner)),
            Rule::attr => compound.attrs.push(parse_attr(inner)?),
            other => return Err(SelectorError::Unexpected(format!("{:?}", other))),
        }
    }
    Ok(compound)
}

fn name_of(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}

fn parse_attr(pair: Pair<Rule>) -> Result<AttrSelector, SelectorError> {
    let mut name = String::new();
    let mut op = None;
    let mut value = String::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::attr_name => name = inner.as_str().to_ascii_lowercase(),
            Rule::attr_op => op = Some(inner.as_str().to_string()),
            Rule::quoted_dq | Rule::quoted_sq => value = name_of(inner),
            Rule::bare_value => value = inner.as_str().to_string(),
            other => return Err(SelectorError::Unexpected(format!("{:?}", other))),
        }
    }
    let op = match op.as_deref() {
        None => AttrOp::Exists,
        Some("=") => AttrOp::Equals(value),
        Some("~=") => AttrOp::Includes(value),
        Some("^=") => AttrOp::Prefix(value),
        Some("$=") => AttrOp::Suffix(value),
        Some("*=") => AttrOp::Substring(value),
        Some("|=") => AttrOp::DashMatch(value),
        Some(other) => return Err(SelectorError::Unexpected(other.to_string())),
    };
    Ok(AttrSelector { name, op })
}

impl Compound {
    pub fn matches<N: DocumentNode>(&self, node: &N) -> bool {
        if let Some(tag) = &self.tag
            && !node.is_tag(tag)
        {
            return false;
        }
        if self.ids.iter().any(|id| node.id() != id) {
            return false;
        }
        if !self.classes.is_empty() {
            let classes = node.class_list();
            if !self.classes.iter().all(|c| classes.contains(&c.as_str())) {
                return false;
            }
        }
        self.attrs.iter().all(|a| a.matches(node))
    }
}

impl AttrSelector {
    pub fn matches<N: DocumentNode>(&self, node: &N) -> bool {
        let Some(actual) = node.attribute(&self.name) else {
            return false;
        };
        match &self.op {
            AttrOp::Exists => true,
            AttrOp::Equals(v) => actual == v,
            AttrOp::Includes(v) => actual.split_whitespace().any(|t| t == v),
            AttrOp::Prefix(v) => !v.is_empty() && actual.starts_with(v.as_str()),
            AttrOp::Suffix(v) => !v.is_empty() && actual.ends_with(v.as_str()),
            AttrOp::Substring(v) => !v.is_empty() && actual.contains(v.as_str()),
            AttrOp::DashMatch(v) => actual == v || actual.starts_with(&format!("{}-", v)),
        }
    }
}

fn matches_from<N: DocumentNode>(
    node: &N,
    compounds: &[Compound],
    combinators: &[Combinator],
) -> bool {
    let Some((last, rest)) = compounds.split_last() else {
        return false;
    };
    if !last.matches(node) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    let Some((combinator, rest_combinators)) = combinators.split_last() else {
        return false;
    };
    match combinator {
        Combinator::Child => node
            .parent()
            .is_some_and(|p| matches_from(&p, rest, rest_combinators)),
        Combinator::Descendant => node
            .ancestors()
            .iter()
            .any(|a| matches_from(a, rest, rest_combinators)),
    }
}

/// First node in `root`'s subtree (including `root`) matching `selector`.
pub fn query_first<N: DocumentNode>(root: &N, selector: &Selector) -> Option<N> {
    root.subtree().into_iter().find(|n| selector.matches(n))
}

pub fn query_all<N: DocumentNode>(root: &N, selector: &Selector) -> Vec<N> {
    root.subtree()
        .into_iter()
        .filter(|n| selector.matches(n))
        .collect()
}
