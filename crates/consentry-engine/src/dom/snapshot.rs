use super::DocumentNode;
use consentry_common::{NodeSpec, Rect};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    style: HashMap<String, String>,
    rect: Option<Rect>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena-backed, immutable copy of a host document tree.
#[derive(Debug, Clone)]
pub struct DomSnapshot {
    nodes: Vec<NodeData>,
}

impl DomSnapshot {
    pub fn from_spec(root: &NodeSpec) -> Self {
        let mut snapshot = Self { nodes: Vec::new() };
        snapshot.push(root, None);
        snapshot
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let spec: NodeSpec = serde_json::from_str(json)?;
        Ok(Self::from_spec(&spec))
    }

    fn push(&mut self, spec: &NodeSpec, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(NodeData {
            tag: spec.tag.to_ascii_lowercase(),
            attributes: spec
                .attributes
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
                .collect(),
            text: spec.text.clone(),
            style: spec
                .style
                .iter()
                .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
                .collect(),
            rect: spec.rect,
            parent,
            children: Vec::with_capacity(spec.children.len()),
        });
        for child in &spec.children {
            let child_index = self.push(child, Some(index));
            self.nodes[index].children.push(child_index);
        }
        index
    }

    pub fn root(&self) -> SnapshotNode<'_> {
        SnapshotNode {
            snapshot: self,
            index: 0,
        }
    }

    pub fn node(&self, index: usize) -> Option<SnapshotNode<'_>> {
        (index < self.nodes.len()).then_some(SnapshotNode {
            snapshot: self,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Handle to one node of a [`DomSnapshot`].
#[derive(Clone, Copy)]
pub struct SnapshotNode<'a> {
    snapshot: &'a DomSnapshot,
    index: usize,
}

impl<'a> SnapshotNode<'a> {
    fn data(&self) -> &'a NodeData {
        &self.snapshot.nodes[self.index]
    }

    /// Position of the node in document order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl PartialEq for SnapshotNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.snapshot, other.snapshot) && self.index == other.index
    }
}

impl Eq for SnapshotNode<'_> {}

impl fmt::Debug for SnapshotNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        write!(f, "<{}", data.tag)?;
        if let Some(id) = data.attributes.get("id") {
            write!(f, " id=\"{}\"", id)?;
        }
        if let Some(class) = data.attributes.get("class") {
            write!(f, " class=\"{}\"", class)?;
        }
        write!(f, "> #{}", self.index)
    }
}

impl DocumentNode for SnapshotNode<'_> {
    fn tag_name(&self) -> &str {
        &self.data().tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.data()
            .attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn own_text(&self) -> &str {
        &self.data().text
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|index| SnapshotNode {
            snapshot: self.snapshot,
            index,
        })
    }

    fn children(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|&index| SnapshotNode {
                snapshot: self.snapshot,
                index,
            })
            .collect()
    }

    fn computed_style(&self, property: &str) -> Option<&str> {
        self.data()
            .style
            .get(&property.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn bounding_rect(&self) -> Option<Rect> {
        self.data().rect
    }

    fn attribute_names(&self) -> Vec<&str> {
        self.data().attributes.keys().map(String::as_str).collect()
    }
}
