//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub scoring: ScoringConfig,
    pub extraction: ExtractionConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    /// HuggingFace repo id, or a directory name under `models_dir`
    pub embedding_model: String,
    /// Normalize embeddings; `None` defers to the model's own config.json
    pub normalize_embeddings: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub semantic_weight: f32,
    pub keyword_weight: f32,
    pub structure_weight: f32,
    /// Presentation floor applied to the 0-100 ATS score. `None` exposes raw scores.
    pub score_floor: Option<f32>,
    pub score_ceiling: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Alternative skill taxonomy file; the bundled one is used when unset
    pub taxonomy_path: Option<PathBuf>,
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain substring containment: "java" also matches inside "javascript"
    Substring,
    /// Skill must not be glued to neighbouring letters or digits
    WordBoundary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub min_skills: usize,
    pub min_words: usize,
    pub max_words: usize,
    pub structure_threshold: f32,
    pub required_match_threshold: f32,
    pub missing_required_limit: usize,
    pub missing_preferred_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub top_n: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            semantic_weight: 0.4,
            keyword_weight: 0.4,
            structure_weight: 0.2,
            score_floor: Some(45.0),
            score_ceiling: 100.0,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            taxonomy_path: None,
            match_mode: MatchMode::Substring,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_skills: 5,
            min_words: 200,
            max_words: 800,
            structure_threshold: 0.8,
            required_match_threshold: 70.0,
            missing_required_limit: 5,
            missing_preferred_limit: 3,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                embedding_model: "minishlab/potion-base-8M".to_string(),
                normalize_embeddings: None,
            },
            scoring: ScoringConfig::default(),
            extraction: ExtractionConfig::default(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                top_n: 10,
            },
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = [self.semantic_weight, self.keyword_weight, self.structure_weight];
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(ResumeMatcherError::Configuration(
                "Scoring weights must be finite and non-negative".to_string(),
            ));
        }

        let total: f32 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-3 {
            return Err(ResumeMatcherError::Configuration(format!(
                "Scoring weights must sum to 1.0, got {:.3}",
                total
            )));
        }

        if let Some(floor) = self.score_floor {
            if floor > self.score_ceiling {
                return Err(ResumeMatcherError::Configuration(format!(
                    "Score floor {} is above the ceiling {}",
                    floor, self.score_ceiling
                )));
            }
        }

        Ok(())
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load from an explicit file; the file must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeMatcherError::Configuration(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;

        if self.analysis.min_words > self.analysis.max_words {
            return Err(ResumeMatcherError::Configuration(format!(
                "analysis.min_words ({}) exceeds analysis.max_words ({})",
                self.analysis.min_words, self.analysis.max_words
            )));
        }

        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    /// Where the embedding model should be loaded from: a local directory
    /// when one exists under `models_dir`, otherwise the hub repo id.
    pub fn embedding_model_source(&self) -> PathBuf {
        let local_path = self.models.models_dir.join(&self.models.embedding_model);
        if local_path.exists() {
            local_path
        } else {
            PathBuf::from(&self.models.embedding_model)
        }
    }
}
