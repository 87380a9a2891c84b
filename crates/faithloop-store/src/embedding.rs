//! Embedding Model for Text Vectorization
//!
//! Text-to-vector conversion for the `memory_embeddings` table. The bundled
//! model is hash-based: it produces deterministic, normalized vectors without
//! any model files, which is all the store needs to keep derived rows for
//! entries and extractions.
//!
//! # Examples
//!
//! ```rust
//! use faithloop_store::embedding::{EmbeddingModel, HashEmbeddingModel};
//!
//! let model = HashEmbeddingModel::new(64);
//! let embedding = model.embed("오늘 감사한 일").unwrap();
//! assert_eq!(embedding.len(), 64);
//! assert_eq!(embedding, model.embed("오늘 감사한 일").unwrap());
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Default embedding dimension
pub const DEFAULT_DIMENSION: usize = 384;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Stored vector has the wrong byte length
    #[error("Corrupt embedding: {0} bytes is not a whole number of f32 values")]
    Corrupt(usize),
}

/// Trait for embedding models
pub trait EmbeddingModel {
    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Get the dimension of embeddings produced by this model
    fn dimension(&self) -> usize;
}

/// Hash-based deterministic embedding model
///
/// The embeddings are deterministic for a given build and normalized to unit
/// length. They carry no semantic similarity.
#[derive(Debug, Clone, Copy)]
pub struct HashEmbeddingModel {
    dimension: usize,
}

impl HashEmbeddingModel {
    /// Create a new model producing `dimension`-length vectors
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    /// Hash text with a seed to get a deterministic f32 value in [-1, 1]
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }
}

impl Default for HashEmbeddingModel {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl EmbeddingModel for HashEmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }

        let mut embedding: Vec<f32> = (0..self.dimension)
            .map(|i| Self::hash_with_seed(text, i as u64))
            .collect();

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Encode a vector as little-endian bytes for BLOB storage
pub fn to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Decode a little-endian BLOB back into a vector
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<f32>, EmbeddingError> {
    if bytes.len() % 4 != 0 {
        return Err(EmbeddingError::Corrupt(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_deterministic() {
        let model = HashEmbeddingModel::new(384);
        let text = "말씀 묵상 후 하루를 시작했다";
        assert_eq!(model.embed(text).unwrap(), model.embed(text).unwrap());
    }

    #[test]
    fn test_embedding_dimension() {
        let model = HashEmbeddingModel::new(128);
        assert_eq!(model.embed("test").unwrap().len(), 128);
        assert_eq!(model.dimension(), 128);
    }

    #[test]
    fn test_embedding_normalized() {
        let model = HashEmbeddingModel::default();
        let embedding = model.embed("test text").unwrap();
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_embedding_different_texts() {
        let model = HashEmbeddingModel::new(64);
        assert_ne!(model.embed("hello").unwrap(), model.embed("goodbye").unwrap());
    }

    #[test]
    fn test_embedding_blank_text() {
        let model = HashEmbeddingModel::new(8);
        let result = model.embed("  \n");
        assert!(result.unwrap_err().to_string().contains("Empty text"));
    }

    #[test]
    fn test_byte_encoding() {
        let vector = vec![0.5_f32, -1.0, 0.25];
        let bytes = to_bytes(&vector);
        assert_eq!(bytes.len(), 12);
        assert_eq!(from_bytes(&bytes).unwrap(), vector);
        assert!(matches!(from_bytes(&bytes[..5]), Err(EmbeddingError::Corrupt(5))));
    }
}
