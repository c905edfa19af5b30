//! The heterogeneous text graph: a single node table tagged by kind plus a
//! flat edge list. A tagged enum reads better here than a class hierarchy
//! because the operations that differ by kind (scoring, export) are few.

use super::edge::{Edge, EdgeKind};
use super::node::{Node, NodeData, NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A single-shot heterogeneous graph for one (context, claim) pair.
///
/// Built once by the graph builder, entity linker, and semantic edge
/// builder, in that order; read-only afterwards for beam search and
/// ranking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: HashMap<NodeId, Node>,
    /// Insertion order, preserved for deterministic export and the
    /// round-trip through serde depends on stable iteration order.
    order: Vec<NodeId>,
    edges: Vec<Edge>,
    #[serde(skip)]
    edge_presence: HashSet<(EdgeKind, NodeId, NodeId)>,
    sentence_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_node(&mut self, id: NodeId, kind: NodeKind, data: NodeData) -> NodeId {
        if self.nodes.contains_key(&id) {
            return id;
        }
        self.order.push(id.clone());
        self.nodes.insert(id.clone(), Node { id: id.clone(), kind, data });
        id
    }

    /// `add_word(text, pos, lemma) -> word_id`. A no-op on repeat calls for
    /// the same `(text, pos)` pair.
    pub fn add_word(&mut self, text: &str, pos: &str, lemma: &str) -> NodeId {
        let id = NodeId::word(text, pos);
        self.insert_node(
            id,
            NodeKind::Word,
            NodeData::Word {
                text: text.to_string(),
                pos: pos.to_string(),
                lemma: lemma.to_string(),
            },
        )
    }

    /// `add_sentence(text) -> sent_id`. Ordinals are assigned sequentially
    /// on first creation, in input order.
    pub fn add_sentence(&mut self, text: &str) -> NodeId {
        let ordinal = self.sentence_count;
        let id = NodeId::sentence(ordinal);
        let inserted = self.insert_node(
            id,
            NodeKind::Sentence,
            NodeData::Sentence {
                ordinal,
                text: text.to_string(),
            },
        );
        self.sentence_count += 1;
        inserted
    }

    /// `set_claim(text) -> claim_id`. Exactly one Claim node per graph;
    /// repeat calls are no-ops.
    pub fn set_claim(&mut self, text: &str) -> NodeId {
        self.insert_node(NodeId::claim(), NodeKind::Claim, NodeData::Claim { text: text.to_string() })
    }

    pub fn add_entity(&mut self, name: &str, entity_type: &str) -> NodeId {
        self.insert_node(
            NodeId::entity(name),
            NodeKind::Entity,
            NodeData::Entity {
                name: name.to_string(),
                entity_type: entity_type.to_string(),
            },
        )
    }

    fn try_add_edge(&mut self, edge: Edge) -> bool {
        let key = {
            let (a, b) = edge.unordered_pair();
            (edge.kind, a, b)
        };
        if !self.edge_presence.insert(key) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// `connect(word_id, utterance_id)` — structural edge.
    pub fn connect(&mut self, word_id: NodeId, utterance_id: NodeId) -> bool {
        self.try_add_edge(Edge::structural(word_id, utterance_id))
    }

    /// `connect_dependency(dep_word_id, head_word_id, relation)`.
    pub fn connect_dependency(&mut self, dep_word_id: NodeId, head_word_id: NodeId, relation: &str) -> bool {
        self.try_add_edge(Edge::dependency(dep_word_id, head_word_id, relation))
    }

    pub fn add_entity_edge(&mut self, entity_id: NodeId, sentence_id: NodeId) -> bool {
        self.try_add_edge(Edge::entity(entity_id, sentence_id))
    }

    pub fn add_semantic_edge(&mut self, a: NodeId, b: NodeId, similarity: f64) -> bool {
        self.try_add_edge(Edge::semantic(a, b, similarity))
    }

    /// Whether any `semantic` edge already connects this unordered pair —
    /// used by the semantic edge builder's at-most-once check.
    pub fn has_semantic_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        let (lo, hi) = if a <= b { (a.clone(), b.clone()) } else { (b.clone(), a.clone()) };
        self.edge_presence.contains(&(EdgeKind::Semantic, lo, hi))
    }

    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn claim_id(&self) -> NodeId {
        NodeId::claim()
    }

    /// Nodes in insertion order, for deterministic export.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(move |id| self.nodes.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes().filter(move |n| n.kind == kind)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// All neighbors of `id` reachable by any edge, for undirected traversal
    /// during beam search. Returns `(neighbor_id, edge)` pairs.
    pub fn neighbors(&self, id: &NodeId) -> Vec<(&NodeId, &Edge)> {
        self.edges
            .iter()
            .filter_map(|e| {
                if &e.source == id {
                    Some((&e.target, e))
                } else if &e.target == id {
                    Some((&e.source, e))
                } else {
                    None
                }
            })
            .collect()
    }
}
