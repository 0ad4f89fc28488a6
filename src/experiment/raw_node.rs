//! Raw Node - tagged decode of one experiment-history element
//!
//! `dvc exp show --json` returns an array whose elements come in a few
//! shapes. Each element is classified once into a [`RawNode`] variant; the
//! rest of the normalizer matches on the variant instead of probing fields.

use serde_json::Value;

/// Revision label DVC uses for the uncommitted working state.
pub const WORKSPACE_REV: &str = "workspace";

/// Classification of a raw node, without borrowing its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Revision group with a nested `experiments` array.
    Group,
    /// `rev == "workspace"` with `data` directly on the node.
    Workspace,
    /// Any other revision with `data` directly on the node.
    Direct,
    /// Matches no known shape.
    Unrecognized,
}

/// One element of the experiment-history array, decoded by shape.
///
/// Precedence when a node matches several shapes:
/// `experiments` array → [`RawNode::Group`]; else `rev == "workspace"` with
/// `data` → [`RawNode::Workspace`]; else `rev` with `data` →
/// [`RawNode::Direct`]; else [`RawNode::Unrecognized`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode<'a> {
    /// Revision group with nested experiment entries.
    Group {
        /// Group revision, if any.
        rev: Option<&'a str>,
        /// Entries in source order.
        experiments: Vec<ExperimentEntry<'a>>,
    },
    /// Live working state.
    Workspace {
        /// The node's `data` object.
        data: &'a Value,
    },
    /// Revision carrying its data directly.
    Direct {
        /// Revision id.
        rev: &'a str,
        /// The node's `data` object.
        data: &'a Value,
    },
    /// Expected noise from the backend; contributes nothing.
    Unrecognized,
}

impl<'a> RawNode<'a> {
    /// Classify one node. Never fails: a missing or mistyped field is
    /// classification information, not an error.
    #[must_use]
    pub fn classify(node: &'a Value) -> Self {
        let Some(object) = node.as_object() else {
            return Self::Unrecognized;
        };

        let rev = object.get("rev").and_then(non_empty_str);

        if let Some(Value::Array(entries)) = object.get("experiments") {
            return Self::Group {
                rev,
                experiments: entries.iter().map(ExperimentEntry::decode).collect(),
            };
        }

        let data = object.get("data").filter(|data| !data.is_null());
        match (rev, data) {
            (Some(WORKSPACE_REV), Some(data)) => Self::Workspace { data },
            (Some(rev), Some(data)) => Self::Direct { rev, data },
            _ => Self::Unrecognized,
        }
    }

    /// Shape of this node.
    #[must_use]
    pub const fn shape(&self) -> NodeShape {
        match self {
            Self::Group { .. } => NodeShape::Group,
            Self::Workspace { .. } => NodeShape::Workspace,
            Self::Direct { .. } => NodeShape::Direct,
            Self::Unrecognized => NodeShape::Unrecognized,
        }
    }
}

/// One entry of a group's `experiments` array.
///
/// Only the first element of `revs` is significant.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentEntry<'a> {
    name: Option<&'a str>,
    head: Option<RevEntry<'a>>,
}

/// The significant (first) element of an entry's `revs` array.
#[derive(Debug, Clone, PartialEq)]
pub struct RevEntry<'a> {
    rev: Option<&'a str>,
    name: Option<&'a str>,
    data: Option<&'a Value>,
}

impl<'a> ExperimentEntry<'a> {
    fn decode(entry: &'a Value) -> Self {
        let name = entry.get("name").and_then(non_empty_str);
        let head = entry
            .get("revs")
            .and_then(Value::as_array)
            .and_then(|revs| revs.first())
            .map(|first| RevEntry {
                rev: first.get("rev").and_then(non_empty_str),
                name: first.get("name").and_then(non_empty_str),
                data: first.get("data").filter(|data| !data.is_null()),
            });
        Self { name, head }
    }

    /// Revision id of the first `revs` element, if it has one.
    #[must_use]
    pub fn rev(&self) -> Option<&'a str> {
        self.head.as_ref().and_then(|head| head.rev)
    }

    /// Display name: `revs[0].name`, else the entry's own name.
    #[must_use]
    pub fn display_name(&self) -> Option<&'a str> {
        self.head.as_ref().and_then(|head| head.name).or(self.name)
    }

    /// `data` of the first `revs` element.
    #[must_use]
    pub fn data(&self) -> Option<&'a Value> {
        self.head.as_ref().and_then(|head| head.data)
    }

    /// `false` when `revs` is missing, not an array, or empty.
    #[must_use]
    pub const fn has_revs(&self) -> bool {
        self.head.is_some()
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}
