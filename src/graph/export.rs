//! Graph and path export.
//!
//! The graph's own serde round-trip is the authoritative persistence
//! format (see the `round_trip` test below); the GEXF-equivalent writer
//! here is a one-directional projection for external graph tooling and is
//! not expected to be re-imported by this crate.

use super::edge::EdgeKind;
use super::graph::Graph;
use super::node::{NodeData, NodeKind};
use serde::Serialize;

/// Render the graph as a GEXF-equivalent XML document.
///
/// Missing attributes serialize to an empty string, never a null sentinel,
/// so round-tripping through external tooling that expects every attribute
/// present does not need to special-case absence.
pub fn to_gexf(graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<gexf version=\"1.3\" xmlns=\"http://gexf.net/1.3\">\n");
    out.push_str("  <graph defaultedgetype=\"undirected\">\n");
    out.push_str("    <nodes>\n");
    for node in graph.nodes() {
        let (kind, text, pos, lemma, entity_type) = node_attrs(node.kind, &node.data);
        out.push_str(&format!(
            "      <node id=\"{}\" label=\"{}\">\n",
            xml_escape(node.id.as_str()),
            xml_escape(text)
        ));
        out.push_str("        <attvalues>\n");
        push_attr(&mut out, "kind", kind);
        push_attr(&mut out, "text", text);
        push_attr(&mut out, "pos", pos);
        push_attr(&mut out, "lemma", lemma);
        push_attr(&mut out, "type", entity_type);
        out.push_str("        </attvalues>\n");
        out.push_str("      </node>\n");
    }
    out.push_str("    </nodes>\n");
    out.push_str("    <edges>\n");
    for (i, edge) in graph.edges().iter().enumerate() {
        let kind = edge_kind_str(edge.kind);
        let relation = edge.relation.as_deref().unwrap_or("");
        let similarity = edge
            .similarity
            .map(|s| s.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "      <edge id=\"{i}\" source=\"{}\" target=\"{}\">\n",
            xml_escape(edge.source.as_str()),
            xml_escape(edge.target.as_str())
        ));
        out.push_str("        <attvalues>\n");
        push_attr(&mut out, "kind", kind);
        push_attr(&mut out, "relation", relation);
        push_attr(&mut out, "similarity", &similarity);
        out.push_str("        </attvalues>\n");
        out.push_str("      </edge>\n");
    }
    out.push_str("    </edges>\n");
    out.push_str("  </graph>\n");
    out.push_str("</gexf>\n");
    out
}

fn node_attrs(kind: NodeKind, data: &NodeData) -> (&'static str, &str, &str, &str, &str) {
    match (kind, data) {
        (NodeKind::Word, NodeData::Word { text, pos, lemma }) => ("word", text, pos, lemma, ""),
        (NodeKind::Sentence, NodeData::Sentence { text, .. }) => ("sentence", text, "", "", ""),
        (NodeKind::Claim, NodeData::Claim { text }) => ("claim", text, "", "", ""),
        (NodeKind::Entity, NodeData::Entity { name, entity_type }) => ("entity", name, "", "", entity_type),
        _ => unreachable!("node kind/data mismatch"),
    }
}

fn edge_kind_str(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Structural => "structural",
        EdgeKind::Dependency => "dependency",
        EdgeKind::Entity => "entity",
        EdgeKind::Semantic => "semantic",
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!(
        "          <attvalue for=\"{name}\" value=\"{}\"/>\n",
        xml_escape(value)
    ));
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The path-export JSON document shape from the external-interfaces contract.
#[derive(Debug, Serialize)]
pub struct PathExport<'a> {
    pub claim: &'a str,
    pub parameters: PathExportParameters,
    pub paths: Vec<PathExportEntry>,
}

#[derive(Debug, Serialize)]
pub struct PathExportParameters {
    pub beam_width: usize,
    pub max_depth: usize,
    pub max_paths: usize,
}

#[derive(Debug, Serialize)]
pub struct PathExportEntry {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String, String)>,
    pub score: f64,
    pub reached_sentence: bool,
    pub visited_entity: bool,
    pub pattern: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::graph::Graph;

    #[test]
    fn gexf_escapes_and_empty_attrs_are_empty_strings() {
        let mut g = Graph::new();
        g.set_claim("a & b");
        let xml = to_gexf(&g);
        assert!(xml.contains("a &amp; b"));
        assert!(xml.contains("value=\"\""));
    }
}
