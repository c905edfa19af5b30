//! Beam Search Engine: scored path exploration from the Claim node,
//! preferentially terminating at Sentence nodes.

use crate::config::Config;
use crate::graph::{EdgeKind, Graph, NodeId, NodeKind};
use ordered_float::OrderedFloat;
use std::collections::HashSet;

/// A generous slack added to the lowest completed score when deciding
/// whether a live path could still beat the current completed set; keeps
/// the beam from pruning paths that might still close out ahead.
const ADMISSIBILITY_MARGIN: f64 = 5.0;

const STEP_COST: f64 = -0.1;
const WORD_OVERLAP_BONUS: f64 = 1.0;
const ENTITY_BONUS: f64 = 2.0;
const SENTENCE_BONUS: f64 = 5.0;
const SEMANTIC_WEIGHT: f64 = 2.0;
const DEPENDENCY_BONUS: f64 = 0.5;
const TERMINAL_SENTENCE_BONUS: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId, EdgeKind)>,
    pub score: f64,
    pub reached_sentence: bool,
    pub visited_entity: bool,
    pub pattern: String,
}

impl Path {
    fn start(claim_id: NodeId) -> Self {
        Self {
            nodes: vec![claim_id],
            edges: Vec::new(),
            score: 0.0,
            reached_sentence: false,
            visited_entity: false,
            pattern: "C".to_string(),
        }
    }

    fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    fn last(&self) -> &NodeId {
        self.nodes.last().expect("path always has a start node")
    }

    /// Score including the terminal sentence-arrival bonus, computed only
    /// when the path is being considered as a finished result.
    pub fn final_score(&self) -> f64 {
        self.score + if self.reached_sentence { TERMINAL_SENTENCE_BONUS } else { 0.0 }
    }
}

fn claim_tokens(claim_text: &str) -> HashSet<String> {
    claim_text
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Run beam search from the Claim node, returning at most `max_paths`
/// results sorted by descending final score.
pub fn search(graph: &Graph, claim_text: &str, config: &Config) -> Vec<Path> {
    let tokens = claim_tokens(claim_text);
    let claim_id = graph.claim_id();

    let initial = Path::start(claim_id);
    let mut live = vec![initial.clone()];
    let mut completed: Vec<Path> = Vec::new();
    let mut all_explored: Vec<Path> = vec![initial];

    for _depth in 0..config.max_depth {
        if live.is_empty() {
            break;
        }

        let mut candidates: Vec<Path> = Vec::new();
        for path in &live {
            let last = path.last().clone();
            for (neighbor_id, edge) in graph.neighbors(&last) {
                if path.contains(neighbor_id) {
                    continue; // no revisits within a path
                }
                let Some(neighbor) = graph.get_node(neighbor_id) else { continue };

                let mut next = path.clone();
                let mut step_score = STEP_COST;

                match neighbor.kind {
                    NodeKind::Word => {
                        if tokens.contains(&neighbor.text().to_lowercase()) {
                            step_score += WORD_OVERLAP_BONUS;
                        }
                    }
                    NodeKind::Entity => {
                        step_score += ENTITY_BONUS;
                        next.visited_entity = true;
                    }
                    NodeKind::Sentence => {
                        step_score += SENTENCE_BONUS;
                        next.reached_sentence = true;
                    }
                    NodeKind::Claim => {}
                }

                match edge.kind {
                    EdgeKind::Semantic => {
                        step_score += edge.similarity.unwrap_or(0.0) * SEMANTIC_WEIGHT;
                    }
                    EdgeKind::Dependency => {
                        step_score += DEPENDENCY_BONUS;
                    }
                    EdgeKind::Structural | EdgeKind::Entity => {}
                }

                next.nodes.push(neighbor_id.clone());
                next.edges.push((last.clone(), neighbor_id.clone(), edge.kind));
                next.score += step_score;
                next.pattern.push_str("->");
                next.pattern.push(neighbor.kind.pattern_letter());

                candidates.push(next);
            }
        }

        if candidates.is_empty() {
            break;
        }

        candidates.sort_by_key(|p| (std::cmp::Reverse(OrderedFloat(p.final_score())), p.nodes.len()));
        candidates.truncate(config.beam_width);

        // A path whose current last node is a Sentence is emitted into the
        // completed set but may still be extended further.
        for candidate in &candidates {
            if matches!(graph.get_node(candidate.last()).map(|n| n.kind), Some(NodeKind::Sentence)) {
                completed.push(candidate.clone());
            }
        }

        all_explored.extend(candidates.iter().cloned());
        live = candidates;

        if completed.len() >= config.max_paths {
            let mut completed_scores: Vec<OrderedFloat<f64>> =
                completed.iter().map(|p| OrderedFloat(p.final_score())).collect();
            completed_scores.sort_by_key(|s| std::cmp::Reverse(*s));
            let cutoff = completed_scores[config.max_paths - 1].0 - ADMISSIBILITY_MARGIN;
            let best_live = live
                .iter()
                .map(Path::final_score)
                .fold(f64::NEG_INFINITY, f64::max);
            if best_live < cutoff {
                break;
            }
        }
    }

    let has_any_sentence = graph.nodes_of_kind(NodeKind::Sentence).next().is_some();
    let mut pool = completed;
    if pool.is_empty() && has_any_sentence {
        pool = all_explored;
    }

    pool.sort_by_key(|p| (std::cmp::Reverse(OrderedFloat(p.final_score())), p.nodes.len()));
    pool.truncate(config.max_paths);
    pool
}
