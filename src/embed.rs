//! External embedder boundary: a narrow trait with a mock for tests and a
//! real ONNX-backed implementation behind a feature flag.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedder is unavailable: {0}")]
    Unavailable(String),
}

/// `embed(word_text, pos) -> vector<float, D>`. Must be deterministic per
/// input and constant-dimensional. A zero vector means "no embedding;
/// skip" rather than an error.
pub trait Embedder {
    fn embed(&self, text: &str, pos: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Deterministic stand-in for tests: one-hot-by-lowercased-text vectors, so
/// identical words always get identical embeddings and distinct words are
/// orthogonal.
pub struct MockEmbedder {
    dim: usize,
    overrides: HashMap<(String, String), Vec<f32>>,
}

impl MockEmbedder {
    pub fn one_hot(dim: usize) -> Self {
        Self {
            dim,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, text: &str, pos: &str, vector: Vec<f32>) -> Self {
        self.overrides.insert((text.to_string(), pos.to_string()), vector);
        self
    }

    fn hashed_one_hot(&self, text: &str) -> Vec<f32> {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        text.to_lowercase().hash(&mut hasher);
        let slot = (hasher.finish() as usize) % self.dim;
        let mut v = vec![0.0f32; self.dim];
        v[slot] = 1.0;
        v
    }
}

impl Embedder for MockEmbedder {
    fn embed(&self, text: &str, pos: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Some(v) = self.overrides.get(&(text.to_string(), pos.to_string())) {
            return Ok(v.clone());
        }
        Ok(self.hashed_one_hot(text))
    }
}

/// L2-normalize in place. Zero-norm vectors are left untouched by the
/// caller (see `crate::semantic`), never turned into NaN.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (*x as f64) * (*y as f64)).sum()
}

#[cfg(feature = "embeddings")]
pub mod fastembed_impl {
    use super::{Embedder, EmbeddingError};
    use fastembed::{InitOptions, TextEmbedding};
    use std::sync::Mutex;

    /// ONNX-backed embedder via `fastembed-rs`. Wraps the model in a mutex
    /// because `TextEmbedding::embed` takes `&mut self`.
    pub struct FastEmbedEmbedder {
        model: Mutex<TextEmbedding>,
    }

    impl FastEmbedEmbedder {
        pub fn try_new() -> Result<Self, EmbeddingError> {
            let model = TextEmbedding::try_new(InitOptions::default())
                .map_err(|e| EmbeddingError::Unavailable(e.to_string()))?;
            Ok(Self { model: Mutex::new(model) })
        }
    }

    impl Embedder for FastEmbedEmbedder {
        fn embed(&self, text: &str, _pos: &str) -> Result<Vec<f32>, EmbeddingError> {
            let mut model = self
                .model
                .lock()
                .map_err(|_| EmbeddingError::Unavailable("embedder lock poisoned".to_string()))?;
            let embeddings = model
                .embed(vec![text], None)
                .map_err(|e| EmbeddingError::Unavailable(e.to_string()))?;
            embeddings
                .into_iter()
                .next()
                .ok_or_else(|| EmbeddingError::Unavailable("empty embedding batch".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_yields_identical_vectors() {
        let embedder = MockEmbedder::one_hot(16);
        let a = embedder.embed("nước", "N").unwrap();
        let b = embedder.embed("nước", "N").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn l2_normalize_leaves_zero_vector_untouched() {
        let mut v = vec![0.0f32; 4];
        l2_normalize(&mut v);
        assert_eq!(v, vec![0.0f32; 4]);
    }
}
