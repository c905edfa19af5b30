//! Semantic Edge Builder: per-word embeddings, L2 normalization, top-k
//! same-POS nearest-neighbor search above a similarity threshold.

use crate::config::Config;
use crate::embed::{dot, l2_normalize, Embedder};
use crate::error::{Diagnostics, RecoverableKind};
use crate::graph::{Graph, NodeId, NodeKind};
use ordered_float::OrderedFloat;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct SemanticEdgeStats {
    pub count: usize,
    pub min_similarity: f64,
    pub mean_similarity: f64,
    pub max_similarity: f64,
    /// `(bin_start, bin_end, count)` in 0.05 increments over `[threshold, 1]`.
    pub histogram: Vec<(f64, f64, usize)>,
}

struct WordEntry {
    id: NodeId,
    pos: String,
    vector: Vec<f32>,
}

/// Build `semantic` edges over all surviving Word nodes (stage C). Embedder
/// failures degrade to zero semantic edges rather than aborting the run.
pub fn build_semantic_edges(
    graph: &mut Graph,
    embedder: &dyn Embedder,
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> SemanticEdgeStats {
    if config.top_k == 0 {
        return SemanticEdgeStats::default();
    }

    let words: Vec<(NodeId, String, String)> = graph
        .nodes_of_kind(NodeKind::Word)
        .map(|n| match &n.data {
            crate::graph::NodeData::Word { text, pos, .. } => (n.id.clone(), text.clone(), pos.clone()),
            _ => unreachable!(),
        })
        .collect();

    let mut entries = Vec::with_capacity(words.len());
    for (id, text, pos) in &words {
        match embedder.embed(text, pos) {
            Ok(mut vector) => {
                let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm == 0.0 {
                    continue; // zero vector: no embedding, skip
                }
                l2_normalize(&mut vector);
                entries.push(WordEntry { id: id.clone(), pos: pos.clone(), vector });
            }
            Err(err) => {
                tracing::warn!(error = %err, word = %text, "embedder call failed, skipping word");
                diagnostics.record(RecoverableKind::ExternalUnavailable, err.to_string());
            }
        }
    }

    if entries.is_empty() {
        return SemanticEdgeStats::default();
    }

    let vectors: Vec<&[f32]> = entries.iter().map(|e| e.vector.as_slice()).collect();
    let neighbor_lists = search_top_k(&vectors, config.top_k, config.use_fast_index, config.fast_index_threshold);

    let mut similarities = Vec::new();

    for (i, neighbors) in neighbor_lists.into_iter().enumerate() {
        for (j, similarity) in neighbors {
            if i == j {
                continue;
            }
            let a = &entries[i];
            let b = &entries[j];
            if a.pos != b.pos {
                continue;
            }
            if similarity < config.similarity_threshold {
                continue;
            }
            if graph.add_semantic_edge(a.id.clone(), b.id.clone(), similarity) {
                similarities.push((similarity * 10_000.0).round() / 10_000.0);
            }
        }
    }

    build_stats(&similarities, config.similarity_threshold)
}

/// For each vector, the top-(k+1) most similar vectors (including itself)
/// as `(index, cosine_similarity)`, descending by similarity.
fn search_top_k(vectors: &[&[f32]], k: usize, use_fast_index: bool, fast_index_threshold: usize) -> Vec<Vec<(usize, f64)>> {
    #[cfg(feature = "fast_index")]
    if use_fast_index && vectors.len() > fast_index_threshold {
        if let Some(result) = fast_index::search_top_k(vectors, k) {
            return result;
        }
    }
    #[cfg(not(feature = "fast_index"))]
    let _ = (use_fast_index, fast_index_threshold);

    brute_force_top_k(vectors, k)
}

fn brute_force_top_k(vectors: &[&[f32]], k: usize) -> Vec<Vec<(usize, f64)>> {
    let n = vectors.len();
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let mut scored: Vec<(usize, f64)> = (0..n)
            .filter(|&j| j != i)
            .map(|j| (j, dot(vectors[i], vectors[j])))
            .collect();
        scored.sort_by_key(|(_, s)| std::cmp::Reverse(OrderedFloat(*s)));
        scored.truncate(k);
        result.push(scored);
    }
    result
}

#[cfg(feature = "fast_index")]
mod fast_index {
    use usearch::{IndexOptions, MetricKind, ScalarKind};

    /// Inner-product HNSW search, used above the configured word-count
    /// threshold. Falls back to brute force (returns `None`) on any index
    /// error so a flaky ANN backend never turns into a fatal error.
    pub fn search_top_k(vectors: &[&[f32]], k: usize) -> Option<Vec<Vec<(usize, f64)>>> {
        let dims = vectors.first()?.len();
        let options = IndexOptions {
            dimensions: dims,
            metric: MetricKind::IP,
            quantization: ScalarKind::F32,
            ..Default::default()
        };
        let index = usearch::new_index(&options).ok()?;
        index.reserve(vectors.len()).ok()?;
        for (i, vector) in vectors.iter().enumerate() {
            index.add(i as u64, vector).ok()?;
        }

        let mut result = Vec::with_capacity(vectors.len());
        for vector in vectors {
            let matches = index.search(vector, k + 1).ok()?;
            let neighbors = matches
                .keys
                .into_iter()
                .zip(matches.distances)
                .map(|(key, distance)| (key as usize, distance as f64))
                .collect();
            result.push(neighbors);
        }
        Some(result)
    }
}

fn build_stats(similarities: &[f64], threshold: f64) -> SemanticEdgeStats {
    if similarities.is_empty() {
        return SemanticEdgeStats::default();
    }
    let min = similarities.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = similarities.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = similarities.iter().sum::<f64>() / similarities.len() as f64;

    let mut bins: HashMap<usize, usize> = HashMap::new();
    for &s in similarities {
        let bin = (((s - threshold) / 0.05).floor().max(0.0)) as usize;
        *bins.entry(bin).or_insert(0) += 1;
    }
    let max_bin = bins.keys().copied().max().unwrap_or(0);
    let histogram = (0..=max_bin)
        .map(|b| {
            let start = threshold + b as f64 * 0.05;
            let end = (start + 0.05).min(1.0);
            (start, end, *bins.get(&b).unwrap_or(&0))
        })
        .collect();

    SemanticEdgeStats {
        count: similarities.len(),
        min_similarity: min,
        mean_similarity: mean,
        max_similarity: max,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::MockEmbedder;

    #[test]
    fn self_match_is_skipped_and_identical_words_share_an_edge() {
        let mut graph = Graph::new();
        graph.set_claim("SAWACO ngưng cấp nước.");
        let s1 = graph.add_sentence("SAWACO thông báo tạm ngưng cấp nước.");
        for text in ["SAWACO", "thông", "báo", "tạm", "ngưng", "cấp", "nước"] {
            let w = graph.add_word(text, "N", text);
            graph.connect(w, s1.clone());
        }

        let embedder = MockEmbedder::one_hot(32);
        let mut diagnostics = Diagnostics::new();
        let config = Config {
            similarity_threshold: 0.99,
            top_k: 5,
            ..Config::default()
        };
        let stats = build_semantic_edges(&mut graph, &embedder, &config, &mut diagnostics);

        // every word is identical to itself only; one-hot embeddings of
        // distinct surface forms are orthogonal, so no cross-word edges.
        assert_eq!(stats.count, 0);
        assert_eq!(graph.edges_of_kind(crate::graph::EdgeKind::Semantic).count(), 0);
    }

    #[test]
    fn top_k_zero_yields_zero_semantic_edges_regardless_of_threshold() {
        let mut graph = Graph::new();
        graph.set_claim("a");
        let w1 = graph.add_word("nước", "N", "nước");
        let w2 = graph.add_word("nước2", "N", "nước2");
        let s = graph.add_sentence("s");
        graph.connect(w1, s.clone());
        graph.connect(w2, s);

        let embedder = MockEmbedder::one_hot(32)
            .with_override("nước", "N", vec![1.0, 0.0])
            .with_override("nước2", "N", vec![1.0, 0.0]);
        let mut diagnostics = Diagnostics::new();
        let config = Config { top_k: 0, similarity_threshold: 0.0, ..Config::default() };
        let stats = build_semantic_edges(&mut graph, &embedder, &config, &mut diagnostics);
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn same_text_different_pos_nodes_never_pair_with_each_other() {
        let mut graph = Graph::new();
        graph.set_claim("a");
        let w1 = graph.add_word("tốt", "A", "tốt");
        let w2 = graph.add_word("tốt", "V", "tốt");
        let s = graph.add_sentence("s");
        graph.connect(w1, s.clone());
        graph.connect(w2, s);

        let embedder = MockEmbedder::one_hot(32)
            .with_override("tốt", "A", vec![1.0, 0.0])
            .with_override("tốt", "V", vec![1.0, 0.0]);
        let mut diagnostics = Diagnostics::new();
        let config = Config { top_k: 5, similarity_threshold: 0.5, ..Config::default() };
        let stats = build_semantic_edges(&mut graph, &embedder, &config, &mut diagnostics);
        // distinct POS, same embedding: still rejected, since POS must match.
        assert_eq!(stats.count, 0);
    }
}
