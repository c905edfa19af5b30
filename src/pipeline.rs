//! Ties stages A through E together into a single run over one
//! (context, claim) pair.

use crate::annotate::AnnotatedInput;
use crate::beam::{self, Path};
use crate::build::build_graph;
use crate::config::Config;
use crate::embed::Embedder;
use crate::entity::{link_entities, EntityExtractor};
use crate::error::{ClaimGraphError, Diagnostics};
use crate::graph::{Graph, NodeKind};
use crate::rank::{rank_sentences, RankMethod, RankedSentence};
use crate::semantic::build_semantic_edges;

pub struct Pipeline<'a> {
    config: Config,
    embedder: &'a dyn Embedder,
    entity_extractor: &'a dyn EntityExtractor,
}

pub struct PipelineResult {
    pub graph: Graph,
    pub paths: Vec<Path>,
    pub ranked_sentences: Vec<RankedSentence>,
    pub diagnostics: Diagnostics,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: Config, embedder: &'a dyn Embedder, entity_extractor: &'a dyn EntityExtractor) -> Self {
        Self { config, embedder, entity_extractor }
    }

    /// Run the full pipeline: build the graph (stage A), link entities and
    /// semantic edges (B, C — order-independent, run sequentially here),
    /// beam-search (D), then rank sentences (E) under `rank_method`.
    pub fn run(&self, input: &AnnotatedInput, rank_method: RankMethod) -> Result<PipelineResult, ClaimGraphError> {
        tracing::info!(sentences = input.sentences.len(), "starting pipeline run");

        let mut graph = build_graph(&input.sentences, &input.claim, &self.config)?;
        let mut diagnostics = Diagnostics::new();

        let sentence_texts: Vec<_> = graph
            .nodes_of_kind(NodeKind::Sentence)
            .map(|n| (n.id.clone(), n.text().to_string()))
            .collect();
        link_entities(&mut graph, self.entity_extractor, &input.context_text, &sentence_texts, &mut diagnostics);

        let semantic_stats = build_semantic_edges(&mut graph, self.embedder, &self.config, &mut diagnostics);
        tracing::debug!(edges = semantic_stats.count, "semantic edge builder finished");

        let paths = beam::search(&graph, &input.claim.text, &self.config);
        tracing::debug!(paths = paths.len(), "beam search finished");

        let ranked_sentences = rank_sentences(&graph, &paths, rank_method);

        if !diagnostics.is_clean() {
            tracing::warn!(
                external_unavailable = diagnostics.external_unavailable_count(),
                "pipeline run completed with degraded external collaborators"
            );
        }

        Ok(PipelineResult { graph, paths, ranked_sentences, diagnostics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{AnnotatedSentence, AnnotatedToken};
    use crate::embed::MockEmbedder;
    use crate::entity::{ExtractedEntity, MockEntityExtractor};

    fn token(index: usize, word_form: &str, pos_tag: &str, head_index: usize) -> AnnotatedToken {
        AnnotatedToken {
            index,
            word_form: word_form.to_string(),
            pos_tag: pos_tag.to_string(),
            lemma: word_form.to_string(),
            head_index,
            dep_label: "dep".to_string(),
        }
    }

    #[test]
    fn sawaco_end_to_end_scenario() {
        let claim = AnnotatedSentence {
            text: "SAWACO ngưng cấp nước.".to_string(),
            tokens: vec![
                token(1, "SAWACO", "N", 0),
                token(2, "ngưng", "N", 1),
                token(3, "cấp", "N", 1),
                token(4, "nước", "N", 1),
            ],
        };
        let sentence = AnnotatedSentence {
            text: "SAWACO thông báo tạm ngưng cấp nước.".to_string(),
            tokens: vec![
                token(1, "SAWACO", "N", 0),
                token(2, "thông", "N", 1),
                token(3, "báo", "N", 1),
                token(4, "tạm", "N", 1),
                token(5, "ngưng", "N", 1),
                token(6, "cấp", "N", 1),
                token(7, "nước", "N", 1),
            ],
        };
        let input = AnnotatedInput {
            context_text: sentence.text.clone(),
            sentences: vec![sentence],
            claim,
        };

        let embedder = MockEmbedder::one_hot(32);
        let extractor = MockEntityExtractor::with_entities(vec![ExtractedEntity {
            name: "SAWACO".to_string(),
            entity_type: "ORG".to_string(),
        }]);
        let config = Config {
            similarity_threshold: 0.99,
            top_k: 5,
            max_depth: 3,
            beam_width: 5,
            max_paths: 10,
            ..Config::default()
        };
        let pipeline = Pipeline::new(config, &embedder, &extractor);
        let result = pipeline.run(&input, RankMethod::Frequency).unwrap();

        assert!(!result.ranked_sentences.is_empty());
        assert!(result.diagnostics.is_clean());
        assert!(result.paths.iter().any(|p| p.reached_sentence));
    }

    #[test]
    fn malformed_entity_response_leaves_graph_otherwise_populated() {
        let claim = AnnotatedSentence {
            text: "SAWACO".to_string(),
            tokens: vec![token(1, "SAWACO", "N", 0)],
        };
        let sentence = AnnotatedSentence {
            text: "SAWACO ngưng nước.".to_string(),
            tokens: vec![token(1, "SAWACO", "N", 0), token(2, "nước", "N", 1)],
        };
        let input = AnnotatedInput {
            context_text: sentence.text.clone(),
            sentences: vec![sentence],
            claim,
        };

        let embedder = MockEmbedder::one_hot(32);
        let extractor = MockEntityExtractor::malformed();
        let pipeline = Pipeline::new(Config::default(), &embedder, &extractor);
        let result = pipeline.run(&input, RankMethod::Frequency).unwrap();

        assert_eq!(result.graph.nodes_of_kind(NodeKind::Entity).count(), 0);
        assert_eq!(result.diagnostics.external_unavailable_count(), 1);
        assert!(result.graph.nodes_of_kind(NodeKind::Sentence).count() > 0);
    }
}
