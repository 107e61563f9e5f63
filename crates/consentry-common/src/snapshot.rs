use crate::protocol::Rect;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Custom deserializer for attribute maps that drops null values.
/// Host scanners report missing attributes as `null`.
fn deserialize_nullable_string_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let map: BTreeMap<String, Option<String>> = BTreeMap::deserialize(deserializer)?;
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| v.map(|val| (k, val)))
        .collect())
}

/// One element of a host-provided document snapshot.
///
/// `text` holds the element's own text nodes only; descendant text lives in
/// `children`. `style` carries computed style values keyed by CSS property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string_map")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Append a class token.
    pub fn class(mut self, class: &str) -> Self {
        let entry = self.attributes.entry("class".to_string()).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(class);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    /// Set several computed style values from an inline `prop: value; ...` string.
    pub fn styles(mut self, declarations: &str) -> Self {
        for decl in declarations.split(';') {
            if let Some((prop, value)) = decl.split_once(':') {
                let prop = prop.trim();
                if !prop.is_empty() {
                    self.style
                        .insert(prop.to_ascii_lowercase(), value.trim().to_string());
                }
            }
        }
        self
    }

    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.rect = Some(Rect::new(x, y, width, height));
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }
}
