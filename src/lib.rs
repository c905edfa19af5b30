//! Graph construction and beam-search evidence ranking for Vietnamese
//! fact-checking.
//!
//! Given a free-form claim and a supporting context document (both already
//! run through an external morphological/POS/dependency annotator), this
//! crate builds a heterogeneous text graph fusing lexical, syntactic,
//! semantic, and named-entity information, then ranks context sentences by
//! their likely relevance as evidence for the claim via a scored beam
//! search.
//!
//! # Example
//!
//! ```
//! use claimgraph::{Config, Pipeline, RankMethod};
//! use claimgraph::embed::MockEmbedder;
//! use claimgraph::entity::MockEntityExtractor;
//! use claimgraph::annotate::{AnnotatedInput, AnnotatedSentence, AnnotatedToken};
//!
//! let claim = AnnotatedSentence {
//!     text: "SAWACO ngưng nước.".to_string(),
//!     tokens: vec![AnnotatedToken {
//!         index: 1,
//!         word_form: "SAWACO".to_string(),
//!         pos_tag: "N".to_string(),
//!         lemma: "SAWACO".to_string(),
//!         head_index: 0,
//!         dep_label: "root".to_string(),
//!     }],
//! };
//! let input = AnnotatedInput {
//!     context_text: String::new(),
//!     sentences: vec![],
//!     claim,
//! };
//!
//! let embedder = MockEmbedder::one_hot(32);
//! let extractor = MockEntityExtractor::with_entities(vec![]);
//! let pipeline = Pipeline::new(Config::default(), &embedder, &extractor);
//! let result = pipeline.run(&input, RankMethod::Frequency).unwrap();
//! assert!(result.ranked_sentences.is_empty());
//! ```

pub mod annotate;
pub mod beam;
pub mod build;
pub mod config;
pub mod embed;
pub mod entity;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod rank;
pub mod semantic;

pub use config::Config;
pub use error::{ClaimGraphError, Diagnostics, RecoverableKind};
pub use pipeline::{Pipeline, PipelineResult};
pub use rank::{RankMethod, RankedSentence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
