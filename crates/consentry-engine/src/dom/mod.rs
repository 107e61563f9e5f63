//! Read-only capability interface over a host document tree.
//!
//! The engine never touches a host DOM directly. Hosts adapt their tree to
//! [`DocumentNode`]; every accessor tolerates absence (missing attribute,
//! missing style, missing geometry) by returning `None` or an empty value.

pub mod snapshot;

pub use snapshot::{DomSnapshot, SnapshotError, SnapshotNode};

use consentry_common::Rect;
use std::fmt;

pub trait DocumentNode: Clone + PartialEq + fmt::Debug {
    /// Lowercase tag name.
    fn tag_name(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Text held directly by this node, excluding descendants.
    fn own_text(&self) -> &str;

    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self>;

    /// Computed style value for a CSS property, if the host could compute it.
    fn computed_style(&self, property: &str) -> Option<&str>;

    /// Rendered geometry, if the host could compute it.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Names of the attributes present on the node. Hosts that cannot
    /// enumerate attributes may keep the empty default.
    fn attribute_names(&self) -> Vec<&str> {
        Vec::new()
    }

    fn id(&self) -> &str {
        self.attribute("id").unwrap_or("")
    }

    fn class_list(&self) -> Vec<&str> {
        self.attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|c| *c == class)
    }

    fn is_tag(&self, tag: &str) -> bool {
        self.tag_name().eq_ignore_ascii_case(tag)
    }

    /// Own and descendant text, whitespace-collapsed.
    fn text_content(&self) -> String {
        let mut pieces: Vec<String> = Vec::new();
        collect_text(self, &mut pieces);
        pieces.join(" ")
    }

    /// Ancestors, nearest first.
    fn ancestors(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            out.push(node);
        }
        out
    }

    /// Descendants in document (pre-)order, excluding `self`.
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack: Vec<Self> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    /// `self` followed by its descendants in document order.
    fn subtree(&self) -> Vec<Self> {
        let mut out = vec![self.clone()];
        out.extend(self.descendants());
        out
    }

    fn next_sibling(&self) -> Option<Self> {
        let siblings = self.parent()?.children();
        let pos = siblings.iter().position(|s| s == self)?;
        siblings.into_iter().nth(pos + 1)
    }

    fn previous_sibling(&self) -> Option<Self> {
        let siblings = self.parent()?.children();
        let pos = siblings.iter().position(|s| s == self)?;
        if pos == 0 {
            return None;
        }
        siblings.into_iter().nth(pos - 1)
    }

    fn contains(&self, other: &Self) -> bool {
        self == other || other.ancestors().iter().any(|a| a == self)
    }

    fn is_same_node(&self, other: &Self) -> bool {
        self == other
    }
}

fn collect_text<N: DocumentNode>(node: &N, pieces: &mut Vec<String>) {
    let own = node.own_text().split_whitespace().collect::<Vec<_>>().join(" ");
    if !own.is_empty() {
        pieces.push(own);
    }
    for child in node.children() {
        collect_text(&child, pieces);
    }
}
