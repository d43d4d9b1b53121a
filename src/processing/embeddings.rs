//! Embedding capability and vector similarity

use crate::error::{Result, ResumeMatcherError};
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

/// Dense text embedding capability. Loaded once and shared read-only.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Identifier reported in output, e.g. the hub repo id
    fn model_name(&self) -> &str;
}

/// Static Model2Vec embeddings, loaded from a local folder or the HuggingFace Hub
pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEmbedder {
    pub fn load(source: &Path, normalize: Option<bool>) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", source.display());

        let model = StaticModel::from_pretrained(
            source,
            None, // token
            normalize,
            None, // subfolder
        )
        .map_err(|e| {
            ResumeMatcherError::ModelUnavailable(format!(
                "Failed to load embedding model {}: {}",
                source.display(),
                e
            ))
        })?;

        info!("Embedding model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: source.to_string_lossy().to_string(),
        })
    }
}

impl Embedder for Model2VecEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.model.encode_single(text);
        if embedding.is_empty() {
            return Err(ResumeMatcherError::Embedding(
                "Model returned an empty embedding".to_string(),
            ));
        }
        Ok(embedding)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Placeholder for analyzers built without a model; every embedding request
/// fails with `ModelUnavailable`
pub struct NoEmbedder;

impl Embedder for NoEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(ResumeMatcherError::ModelUnavailable(
            "No embedding model loaded".to_string(),
        ))
    }

    fn model_name(&self) -> &str {
        "none"
    }
}

/// Cosine similarity in `[-1, 1]`. Zero-norm or empty vectors score 0.0;
/// mismatched dimensions are an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ResumeMatcherError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0))
}
