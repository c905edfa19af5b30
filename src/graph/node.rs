//! Node identity and payload for the heterogeneous text graph.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node.
///
/// Identity is derived deterministically from the node's kind and content
/// (see [`NodeId::word`], [`NodeId::sentence`], [`NodeId::claim`],
/// [`NodeId::entity`]) so that a duplicate `add` call naturally resolves to
/// the same id rather than needing a side lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn word(text: &str, pos: &str) -> Self {
        Self(format!("w:{pos}:{text}"))
    }

    pub fn sentence(ordinal: usize) -> Self {
        Self(format!("s:{ordinal}"))
    }

    pub fn claim() -> Self {
        Self("c".to_string())
    }

    pub fn entity(name: &str) -> Self {
        Self(format!("e:{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the four node kinds a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Word,
    Sentence,
    Claim,
    Entity,
}

impl NodeKind {
    /// The single-letter tag used in beam-search path patterns.
    pub fn pattern_letter(self) -> char {
        match self {
            NodeKind::Claim => 'C',
            NodeKind::Word => 'W',
            NodeKind::Sentence => 'S',
            NodeKind::Entity => 'E',
        }
    }
}

/// Per-kind node payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeData {
    Word {
        text: String,
        pos: String,
        lemma: String,
    },
    Sentence {
        ordinal: usize,
        text: String,
    },
    Claim {
        text: String,
    },
    Entity {
        name: String,
        entity_type: String,
    },
}

/// A node in the heterogeneous text graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub data: NodeData,
}

impl Node {
    /// Surface text used for word-overlap scoring and substring matching.
    pub fn text(&self) -> &str {
        match &self.data {
            NodeData::Word { text, .. } => text,
            NodeData::Sentence { text, .. } => text,
            NodeData::Claim { text } => text,
            NodeData::Entity { name, .. } => name,
        }
    }

    /// POS tag, if this is a Word node.
    pub fn pos(&self) -> Option<&str> {
        match &self.data {
            NodeData::Word { pos, .. } => Some(pos),
            _ => None,
        }
    }
}
