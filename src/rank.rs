//! Sentence Ranker: aggregates the beam-search path set into a ranked
//! sentence list under one of five methods.

use crate::beam::Path;
use crate::graph::{Graph, NodeId, NodeKind};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMethod {
    Frequency,
    AvgScore,
    MaxScore,
    TotalScore,
    Combined,
}

#[derive(Debug, Clone)]
pub struct RankedSentence {
    pub sentence_id: NodeId,
    pub text: String,
    pub frequency: usize,
    pub avg_score: f64,
    pub max_score: f64,
    pub total_score: f64,
    pub combined_score: f64,
}

/// Rank sentences that appear on at least one path, sorted by `method`
/// descending with ties broken by ascending `sentence_id`.
pub fn rank_sentences(graph: &Graph, paths: &[Path], method: RankMethod) -> Vec<RankedSentence> {
    let mut per_sentence: HashMap<NodeId, Vec<f64>> = HashMap::new();

    for path in paths {
        let score = path.final_score();
        for node_id in &path.nodes {
            if let Some(node) = graph.get_node(node_id) {
                if node.kind == NodeKind::Sentence {
                    per_sentence.entry(node_id.clone()).or_default().push(score);
                }
            }
        }
    }

    let mut ranked: Vec<RankedSentence> = per_sentence
        .into_iter()
        .map(|(sentence_id, scores)| {
            let frequency = scores.len();
            let total_score: f64 = scores.iter().sum();
            let avg_score = total_score / frequency as f64;
            let max_score = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let text = graph
                .get_node(&sentence_id)
                .map(|n| n.text().to_string())
                .unwrap_or_default();
            RankedSentence {
                sentence_id,
                text,
                frequency,
                avg_score,
                max_score,
                total_score,
                combined_score: frequency as f64 * avg_score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        let (ka, kb) = (key(a, method), key(b, method));
        kb.partial_cmp(&ka)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.sentence_id.cmp(&b.sentence_id))
    });

    ranked
}

fn key(s: &RankedSentence, method: RankMethod) -> f64 {
    match method {
        RankMethod::Frequency => s.frequency as f64,
        RankMethod::AvgScore => s.avg_score,
        RankMethod::MaxScore => s.max_score,
        RankMethod::TotalScore => s.total_score,
        RankMethod::Combined => s.combined_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::Path;
    use crate::graph::EdgeKind;

    fn sentence_path(claim_id: NodeId, sentence_id: NodeId, score: f64) -> Path {
        Path {
            nodes: vec![claim_id.clone(), sentence_id.clone()],
            edges: vec![(claim_id, sentence_id, EdgeKind::Structural)],
            score,
            reached_sentence: true,
            visited_entity: false,
            pattern: "C->S".to_string(),
        }
    }

    #[test]
    fn frequency_ranks_more_visited_sentence_first() {
        let mut graph = Graph::new();
        graph.set_claim("nước");
        let claim_id = graph.claim_id();
        let s1 = graph.add_sentence("nước một");
        let s2 = graph.add_sentence("phụ đề dependency only");

        let paths = vec![
            sentence_path(claim_id.clone(), s1.clone(), 6.0),
            sentence_path(claim_id.clone(), s1.clone(), 6.0),
            sentence_path(claim_id, s2.clone(), 6.0),
        ];

        let ranked = rank_sentences(&graph, &paths, RankMethod::Frequency);
        assert_eq!(ranked[0].sentence_id, s1);
        assert_eq!(ranked[0].frequency, 2);
        assert_eq!(ranked[1].sentence_id, s2);
    }

    #[test]
    fn ties_break_by_ascending_sentence_id() {
        let mut graph = Graph::new();
        graph.set_claim("a");
        let claim_id = graph.claim_id();
        let s1 = graph.add_sentence("s1");
        let s2 = graph.add_sentence("s2");

        let paths = vec![
            sentence_path(claim_id.clone(), s2.clone(), 5.0),
            sentence_path(claim_id, s1.clone(), 5.0),
        ];
        let ranked = rank_sentences(&graph, &paths, RankMethod::Frequency);
        assert_eq!(ranked[0].sentence_id, s1);
        assert_eq!(ranked[1].sentence_id, s2);
    }
}
