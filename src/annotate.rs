//! Input types produced by the external annotator. The annotator itself is
//! out of scope; this module only describes the record shape the graph
//! builder consumes.

use serde::{Deserialize, Serialize};

/// One annotated token within a sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// 1-based position within the sentence.
    pub index: usize,
    pub word_form: String,
    pub pos_tag: String,
    pub lemma: String,
    /// 0 means ROOT; otherwise the 1-based index of the syntactic head.
    pub head_index: usize,
    pub dep_label: String,
}

/// One sentence: its surface text plus its token annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub text: String,
    pub tokens: Vec<AnnotatedToken>,
}

/// The full annotated input to a single pipeline run: the context sentences
/// in order plus the claim, annotated the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedInput {
    pub context_text: String,
    pub sentences: Vec<AnnotatedSentence>,
    pub claim: AnnotatedSentence,
}
