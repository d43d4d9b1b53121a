//! Meaning-level similarity between two texts

use crate::error::Result;
use crate::processing::embeddings::{cosine_similarity, Embedder};
use crate::processing::text_processor::TextProcessor;
use log::debug;
use std::sync::Arc;

/// Embeds two texts after identical normalization and compares them.
///
/// Both sides go through [`TextProcessor::normalize_for_embedding`] first, so
/// punctuation, casing and spacing differences never move the score.
pub struct SemanticScorer {
    embedder: Arc<dyn Embedder>,
    processor: TextProcessor,
}

impl SemanticScorer {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            processor: TextProcessor::new(),
        }
    }

    /// Cosine similarity of the two normalized texts, in `[-1, 1]`
    pub fn similarity(&self, text_a: &str, text_b: &str) -> Result<f32> {
        let clean_a = self.processor.normalize_for_embedding(text_a);
        let clean_b = self.processor.normalize_for_embedding(text_b);

        let embedding_a = self.embedder.embed(&clean_a)?;
        let embedding_b = self.embedder.embed(&clean_b)?;
        let score = cosine_similarity(&embedding_a, &embedding_b)?;

        debug!(
            "Semantic similarity {:.4} ({} vs {} chars, dim {})",
            score,
            clean_a.len(),
            clean_b.len(),
            embedding_a.len()
        );
        Ok(score)
    }

    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumeMatcherError;
    use std::sync::Mutex;

    /// Records what it was asked to embed and returns letter-frequency vectors
    struct RecordingEmbedder {
        seen: Mutex<Vec<String>>,
    }

    impl Embedder for RecordingEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.seen.lock().unwrap().push(text.to_string());
            let mut v = vec![0.0; 26];
            for c in text.chars().filter(|c| c.is_ascii_lowercase()) {
                v[(c as u8 - b'a') as usize] += 1.0;
            }
            Ok(v)
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(ResumeMatcherError::Embedding("inference failed".to_string()))
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_inputs_are_normalized_before_embedding() {
        let embedder = Arc::new(RecordingEmbedder { seen: Mutex::new(Vec::new()) });
        let scorer = SemanticScorer::new(embedder.clone());

        let score = scorer.similarity("Python Developer", "need   python!!").unwrap();
        assert!(score > 0.0 && score <= 1.0);
        assert_eq!(
            *embedder.seen.lock().unwrap(),
            vec!["python developer".to_string(), "need python".to_string()]
        );
    }

    #[test]
    fn test_formatting_does_not_change_score() {
        let scorer = SemanticScorer::new(Arc::new(RecordingEmbedder { seen: Mutex::new(Vec::new()) }));
        let plain = scorer.similarity("python developer", "need python").unwrap();
        let noisy = scorer.similarity("PYTHON -- Developer!", "  Need\tpython?? ").unwrap();
        assert_eq!(plain, noisy);
    }

    #[test]
    fn test_embedding_errors_propagate() {
        let scorer = SemanticScorer::new(Arc::new(FailingEmbedder));
        assert!(scorer.similarity("a", "b").is_err());
        assert_eq!(scorer.model_name(), "failing");
    }
}
