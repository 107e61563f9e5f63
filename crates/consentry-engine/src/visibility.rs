//! Visibility oracle.
//!
//! A node is visible when it and every ancestor pass [`is_self_visible`].
//! Values the host could not compute count as visible: later stages can still
//! reject a bad candidate, but a hidden real dialog is lost for good.

use crate::dom::DocumentNode;

pub fn is_visible<N: DocumentNode>(node: &N) -> bool {
    is_self_visible(node) && node.ancestors().iter().all(is_self_visible)
}

/// Visibility of the node alone, ignoring ancestors.
pub fn is_self_visible<N: DocumentNode>(node: &N) -> bool {
    if node
        .computed_style("display")
        .is_some_and(|d| d.trim().eq_ignore_ascii_case("none"))
    {
        return false;
    }

    if node
        .computed_style("visibility")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("hidden"))
    {
        return false;
    }

    if node
        .computed_style("opacity")
        .and_then(|o| o.trim().parse::<f32>().ok())
        .is_some_and(|o| o <= 0.0)
    {
        return false;
    }

    match node.bounding_rect() {
        Some(rect) => !rect.is_empty(),
        None => true,
    }
}
