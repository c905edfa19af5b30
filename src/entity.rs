//! Entity Linker: consumes the external entity extractor's output and adds
//! Entity nodes plus sentence-mention edges by substring match.

use crate::error::{Diagnostics, RecoverableKind};
use crate::graph::{Graph, NodeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entity as returned by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
}

#[derive(Debug, Error)]
pub enum EntityExtractError {
    #[error("entity extractor is unavailable: {0}")]
    Unavailable(String),
    #[error("entity extractor returned non-JSON output")]
    MalformedResponse,
}

/// External entity extractor boundary. Called once per context; a blocking
/// call per the synchronous, single-threaded core.
pub trait EntityExtractor {
    fn extract(&self, context_text: &str) -> Result<Vec<ExtractedEntity>, EntityExtractError>;
}

/// Deterministic stand-in for tests: returns a fixed response or fails on
/// command.
pub struct MockEntityExtractor {
    response: Result<Vec<ExtractedEntity>, EntityExtractError>,
}

impl MockEntityExtractor {
    pub fn with_entities(entities: Vec<ExtractedEntity>) -> Self {
        Self { response: Ok(entities) }
    }

    pub fn unavailable() -> Self {
        Self {
            response: Err(EntityExtractError::Unavailable("mock unavailable".to_string())),
        }
    }

    pub fn malformed() -> Self {
        Self { response: Err(EntityExtractError::MalformedResponse) }
    }
}

impl EntityExtractor for MockEntityExtractor {
    fn extract(&self, _context_text: &str) -> Result<Vec<ExtractedEntity>, EntityExtractError> {
        match &self.response {
            Ok(entities) => Ok(entities.clone()),
            Err(EntityExtractError::Unavailable(msg)) => Err(EntityExtractError::Unavailable(msg.clone())),
            Err(EntityExtractError::MalformedResponse) => Err(EntityExtractError::MalformedResponse),
        }
    }
}

/// Link entities into the graph: call the extractor once, then for every
/// sentence perform a case-insensitive substring match of each entity name
/// and add an `entity` edge on hit. Never aborts the pipeline; failures are
/// folded into `diagnostics`.
pub fn link_entities(
    graph: &mut Graph,
    extractor: &dyn EntityExtractor,
    context_text: &str,
    sentences: &[(NodeId, String)],
    diagnostics: &mut Diagnostics,
) {
    let entities = match extractor.extract(context_text) {
        Ok(entities) => entities,
        Err(err) => {
            tracing::warn!(error = %err, "entity extractor call failed, proceeding with zero entities");
            diagnostics.record(RecoverableKind::ExternalUnavailable, err.to_string());
            return;
        }
    };

    if entities.is_empty() {
        tracing::debug!("entity extractor returned zero entities");
        return;
    }

    for entity in entities {
        let entity_id = graph.add_entity(&entity.name, &entity.entity_type);
        let needle = entity.name.to_lowercase();
        for (sentence_id, text) in sentences {
            if text.to_lowercase().contains(&needle) {
                graph.add_entity_edge(entity_id.clone(), sentence_id.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, NodeKind};

    #[test]
    fn sawaco_entity_links_every_matching_sentence_once() {
        let mut graph = Graph::new();
        graph.set_claim("SAWACO ngưng cấp nước.");
        let s1 = graph.add_sentence("SAWACO thông báo tạm ngưng cấp nước.");
        let s2 = graph.add_sentence("Hà Nội đã khắc phục xong sự cố.");

        let extractor = MockEntityExtractor::with_entities(vec![ExtractedEntity {
            name: "SAWACO".to_string(),
            entity_type: "ORG".to_string(),
        }]);
        let mut diagnostics = Diagnostics::new();
        let sentences = vec![
            (s1.clone(), "SAWACO thông báo tạm ngưng cấp nước.".to_string()),
            (s2, "Hà Nội đã khắc phục xong sự cố.".to_string()),
        ];
        link_entities(&mut graph, &extractor, "...", &sentences, &mut diagnostics);

        assert_eq!(graph.nodes_of_kind(NodeKind::Entity).count(), 1);
        assert_eq!(graph.edges_of_kind(EdgeKind::Entity).count(), 1);
        assert!(diagnostics.is_clean());
    }

    #[test]
    fn malformed_extractor_response_yields_zero_entities_and_one_diagnostic() {
        let mut graph = Graph::new();
        graph.set_claim("claim");
        let extractor = MockEntityExtractor::malformed();
        let mut diagnostics = Diagnostics::new();
        link_entities(&mut graph, &extractor, "<<not JSON>>", &[], &mut diagnostics);

        assert_eq!(graph.nodes_of_kind(NodeKind::Entity).count(), 0);
        assert_eq!(diagnostics.external_unavailable_count(), 1);
    }
}
