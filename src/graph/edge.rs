//! Edge representation for the heterogeneous text graph.

use super::node::NodeId;
use serde::{Deserialize, Serialize};

/// Which of the four edge kinds an edge is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Structural,
    Dependency,
    Entity,
    Semantic,
}

/// An edge in the heterogeneous text graph.
///
/// Edges are undirected for traversal purposes but `source`/`target` record
/// the direction in which the edge was created (the dependent for
/// `dependency`, the word/entity for `structural`/`entity`, the first word
/// encountered for `semantic`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    /// Dependency relation label (`nmod`, `sub`, `dob`, ...), `dependency` edges only.
    pub relation: Option<String>,
    /// Cosine similarity rounded to four decimals, `semantic` edges only.
    pub similarity: Option<f64>,
}

impl Edge {
    pub fn structural(word: NodeId, utterance: NodeId) -> Self {
        Self {
            source: word,
            target: utterance,
            kind: EdgeKind::Structural,
            relation: None,
            similarity: None,
        }
    }

    pub fn dependency(dep_word: NodeId, head_word: NodeId, relation: impl Into<String>) -> Self {
        Self {
            source: dep_word,
            target: head_word,
            kind: EdgeKind::Dependency,
            relation: Some(relation.into()),
            similarity: None,
        }
    }

    pub fn entity(entity: NodeId, sentence: NodeId) -> Self {
        Self {
            source: entity,
            target: sentence,
            kind: EdgeKind::Entity,
            relation: None,
            similarity: None,
        }
    }

    pub fn semantic(a: NodeId, b: NodeId, similarity: f64) -> Self {
        Self {
            source: a,
            target: b,
            kind: EdgeKind::Semantic,
            relation: None,
            similarity: Some((similarity * 10_000.0).round() / 10_000.0),
        }
    }

    /// The unordered endpoint pair, normalized so `(a, b)` and `(b, a)`
    /// compare equal — used for the at-most-once-per-kind presence check.
    pub fn unordered_pair(&self) -> (NodeId, NodeId) {
        if self.source <= self.target {
            (self.source.clone(), self.target.clone())
        } else {
            (self.target.clone(), self.source.clone())
        }
    }
}
