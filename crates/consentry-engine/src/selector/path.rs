use crate::dom::DocumentNode;

const MAX_DEPTH: usize = 5;

fn is_simple_ident(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn segment<N: DocumentNode>(node: &N) -> String {
    let mut out = node.tag_name().to_string();
    for class in node.class_list() {
        if is_simple_ident(class) {
            out.push('.');
            out.push_str(class);
        }
    }
    out
}

fn id_selector<N: DocumentNode>(node: &N) -> Option<String> {
    let id = node.id();
    is_simple_ident(id).then(|| format!("#{}", id))
}

/// Derive a CSS path for `node`: its `#id` when it has one, otherwise a
/// `>` chain of `tag.class` segments up to the nearest ancestor with an id.
pub fn unique_selector<N: DocumentNode>(node: &N) -> String {
    if let Some(id) = id_selector(node) {
        return id;
    }

    let mut parts = vec![segment(node)];
    for ancestor in node.ancestors().iter().take(MAX_DEPTH) {
        if let Some(id) = id_selector(ancestor) {
            parts.push(id);
            break;
        }
        if ancestor.is_tag("html") || ancestor.is_tag("body") {
            break;
        }
        parts.push(segment(ancestor));
    }
    parts.reverse();
    parts.join(" > ")
}
