//! Graph Builder: materializes Word / Sentence / Claim nodes and
//! structural + dependency edges from annotator output.

use crate::annotate::{AnnotatedSentence, AnnotatedToken};
use crate::config::Config;
use crate::error::ClaimGraphError;
use crate::graph::{Graph, NodeId};
use std::collections::HashMap;

/// Build the graph's lexical/syntactic layer (stage A) from annotated
/// sentences and a claim, applying the configured POS filter.
pub fn build_graph(
    sentences: &[AnnotatedSentence],
    claim: &AnnotatedSentence,
    config: &Config,
) -> Result<Graph, ClaimGraphError> {
    let mut graph = Graph::new();
    graph.set_claim(&claim.text);

    add_utterance(&mut graph, graph.claim_id(), &claim.tokens, config)?;

    for sentence in sentences {
        let sent_id = graph.add_sentence(&sentence.text);
        add_utterance(&mut graph, sent_id, &sentence.tokens, config)?;
    }

    Ok(graph)
}

fn add_utterance(
    graph: &mut Graph,
    utterance_id: NodeId,
    tokens: &[AnnotatedToken],
    config: &Config,
) -> Result<(), ClaimGraphError> {
    let mut surviving: HashMap<usize, NodeId> = HashMap::new();

    for token in tokens {
        if token.index == 0 {
            return Err(ClaimGraphError::AnnotatorInput(format!(
                "token index must be 1-based, got 0 (word_form={:?})",
                token.word_form
            )));
        }
        if !passes_pos_filter(&token.pos_tag, config) {
            continue;
        }
        let word_id = graph.add_word(&token.word_form, &token.pos_tag, &token.lemma);
        graph.connect(word_id.clone(), utterance_id.clone());
        surviving.insert(token.index, word_id);
    }

    for token in tokens {
        if token.head_index == 0 {
            continue; // ROOT, no dependency edge
        }
        let (Some(dep_id), Some(head_id)) = (
            surviving.get(&token.index),
            surviving.get(&token.head_index),
        ) else {
            // Annotator inconsistency: head doesn't resolve to a surviving
            // word. Dropped silently, not an error.
            continue;
        };
        graph.connect_dependency(dep_id.clone(), head_id.clone(), &token.dep_label);
    }

    Ok(())
}

fn passes_pos_filter(pos: &str, config: &Config) -> bool {
    if !config.pos_filter_enabled {
        return true;
    }
    config.pos_filter_tags.contains(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    fn token(index: usize, word_form: &str, pos_tag: &str, head_index: usize, dep_label: &str) -> AnnotatedToken {
        AnnotatedToken {
            index,
            word_form: word_form.to_string(),
            pos_tag: pos_tag.to_string(),
            lemma: word_form.to_string(),
            head_index,
            dep_label: dep_label.to_string(),
        }
    }

    #[test]
    fn empty_context_keeps_single_claim_node() {
        let claim = AnnotatedSentence {
            text: "SAWACO ngưng cấp nước.".to_string(),
            tokens: vec![token(1, "SAWACO", "N", 0, "root")],
        };
        let graph = build_graph(&[], &claim, &Config::default()).unwrap();
        assert_eq!(graph.nodes_of_kind(NodeKind::Claim).count(), 1);
        assert_eq!(graph.nodes_of_kind(NodeKind::Sentence).count(), 0);
        assert_eq!(graph.nodes_of_kind(NodeKind::Word).count(), 1);
    }

    #[test]
    fn pos_filtered_tokens_are_not_added_and_drop_their_dependencies() {
        let claim = AnnotatedSentence {
            text: "x".to_string(),
            tokens: vec![
                token(1, "SAWACO", "N", 0, "root"),
                token(2, "đã", "T", 1, "adv"), // "T" not a content POS by default
            ],
        };
        let graph = build_graph(&[], &claim, &Config::default()).unwrap();
        assert_eq!(graph.nodes_of_kind(NodeKind::Word).count(), 1);
        assert_eq!(graph.edge_count(), 1); // one structural edge, no dependency edge
    }

    #[test]
    fn dangling_dependency_head_is_dropped_silently() {
        let claim = AnnotatedSentence {
            text: "x".to_string(),
            tokens: vec![token(1, "SAWACO", "N", 9, "root")],
        };
        let graph = build_graph(&[], &claim, &Config::default()).unwrap();
        assert_eq!(graph.edge_count(), 1); // structural only
    }

    #[test]
    fn zero_token_index_is_a_fatal_annotator_error() {
        let claim = AnnotatedSentence {
            text: "x".to_string(),
            tokens: vec![token(0, "SAWACO", "N", 0, "root")],
        };
        let err = build_graph(&[], &claim, &Config::default()).unwrap_err();
        assert!(matches!(err, ClaimGraphError::AnnotatorInput(_)));
    }
}
