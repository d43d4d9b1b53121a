//! Resume analysis facade tying the extractors and scorers together

use crate::config::{AnalysisConfig, Config};
use crate::error::Result;
use crate::input::jobs::JobRecord;
use crate::processing::ats_matcher::{AtsResult, AtsScorer};
use crate::processing::embeddings::{Embedder, Model2VecEmbedder, NoEmbedder};
use crate::processing::experience::{ExperienceExtractor, ExperienceInfo, OrganizationRecognizer};
use crate::processing::gap_analysis::{SkillsGapAnalyzer, SkillsGapReport};
use crate::processing::recommender::{JobRecommender, RecommendationBatch};
use crate::processing::round2;
use crate::processing::semantic::SemanticScorer;
use crate::processing::skill_extractor::{SkillExtractor, SkillSet};
use crate::processing::structure::{SectionType, StructureScorer};
use crate::processing::taxonomy::SkillTaxonomy;
use crate::processing::text_processor::TextProcessor;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub skills: SkillSet,
    pub experience: ExperienceInfo,
    /// 0 to 100
    pub structure_score: f32,
    pub missing_sections: Vec<SectionType>,
    pub suggestions: Vec<String>,
    pub word_count: usize,
    pub character_count: usize,
}

/// Entry point for every engine operation.
///
/// Holds the loaded taxonomy and model capabilities; all methods take `&self`
/// and leave no state behind, so one analyzer can serve any number of calls.
pub struct ResumeAnalyzer {
    skill_extractor: Arc<SkillExtractor>,
    experience_extractor: ExperienceExtractor,
    structure_scorer: StructureScorer,
    text_processor: TextProcessor,
    ats_scorer: Arc<AtsScorer>,
    recommender: JobRecommender,
    gap_analyzer: SkillsGapAnalyzer,
    settings: AnalysisConfig,
}

impl ResumeAnalyzer {
    /// Assemble an analyzer from already-loaded capabilities
    pub fn new(
        config: &Config,
        embedder: Arc<dyn Embedder>,
        recognizer: Option<Arc<dyn OrganizationRecognizer>>,
    ) -> Result<Self> {
        config.validate()?;

        let taxonomy = SkillTaxonomy::from_config(&config.extraction)?;
        let skill_extractor = Arc::new(SkillExtractor::with_match_mode(
            taxonomy,
            config.extraction.match_mode,
        )?);

        let ats_scorer = Arc::new(AtsScorer::new(
            skill_extractor.clone(),
            SemanticScorer::new(embedder),
            config.scoring.clone(),
        )?);

        Ok(Self {
            skill_extractor,
            experience_extractor: ExperienceExtractor::new(recognizer),
            structure_scorer: StructureScorer::new(),
            text_processor: TextProcessor::new(),
            recommender: JobRecommender::new(ats_scorer.clone()),
            gap_analyzer: SkillsGapAnalyzer::new(ats_scorer.clone(), config.analysis.clone()),
            ats_scorer,
            settings: config.analysis.clone(),
        })
    }

    /// Load the configured Model2Vec model and build an analyzer around it.
    /// A model that cannot be loaded is fatal.
    pub fn from_config(
        config: &Config,
        recognizer: Option<Arc<dyn OrganizationRecognizer>>,
    ) -> Result<Self> {
        let embedder = Model2VecEmbedder::load(
            &config.embedding_model_source(),
            config.models.normalize_embeddings,
        )?;
        let analyzer = Self::new(config, Arc::new(embedder), recognizer)?;
        info!(
            "Resume analyzer ready ({} skills, model {})",
            analyzer.skill_extractor.taxonomy().len(),
            analyzer.ats_scorer.model_name()
        );
        Ok(analyzer)
    }

    /// Analyzer for extraction-only work (`analyze`, `extract_skills`). No model
    /// is loaded; scoring operations fail with `ModelUnavailable`.
    pub fn without_embeddings(
        config: &Config,
        recognizer: Option<Arc<dyn OrganizationRecognizer>>,
    ) -> Result<Self> {
        Self::new(config, Arc::new(NoEmbedder), recognizer)
    }

    /// Skills, experience, structure and improvement suggestions for one resume
    pub fn analyze(&self, resume_text: &str) -> ResumeAnalysis {
        let skills = self.skill_extractor.extract(resume_text);
        let experience = self.experience_extractor.extract(resume_text);
        let structure = self.structure_scorer.report(resume_text);
        let stats = self.text_processor.stats(resume_text);

        let suggestions = self.generate_suggestions(resume_text, &skills, structure.score, stats.word_count);

        ResumeAnalysis {
            skills,
            experience,
            structure_score: round2(structure.score * 100.0),
            missing_sections: structure.missing_sections,
            suggestions,
            word_count: stats.word_count,
            character_count: stats.character_count,
        }
    }

    pub fn extract_skills(&self, text: &str) -> SkillSet {
        self.skill_extractor.extract(text)
    }

    pub fn ats_score(&self, resume_text: &str, job_description: &str) -> Result<AtsResult> {
        self.ats_scorer.evaluate(resume_text, job_description)
    }

    pub fn recommend_jobs(&self, resume_text: &str, jobs: &[JobRecord]) -> RecommendationBatch {
        self.recommender.recommend(resume_text, jobs)
    }

    pub fn skills_gap(&self, resume_text: &str, job: &JobRecord) -> Result<SkillsGapReport> {
        self.gap_analyzer.analyze(resume_text, job)
    }

    pub fn model_name(&self) -> &str {
        self.ats_scorer.model_name()
    }

    pub fn skill_count(&self) -> usize {
        self.skill_extractor.taxonomy().len()
    }

    /// Independent checks; several suggestions can fire for the same resume
    fn generate_suggestions(
        &self,
        resume_text: &str,
        skills: &SkillSet,
        structure_score: f32,
        word_count: usize,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        if !self.text_processor.has_contact_details(resume_text) {
            suggestions.push("Add contact information including email and phone number".to_string());
        }

        if !self.text_processor.has_quantified_achievements(resume_text) {
            suggestions.push("Include quantifiable achievements with numbers and percentages".to_string());
        }

        if skills.len() < self.settings.min_skills {
            suggestions.push("Consider adding more relevant technical skills".to_string());
        }

        if structure_score < self.settings.structure_threshold {
            suggestions.push(
                "Improve resume structure by adding clear sections for experience, education, and skills"
                    .to_string(),
            );
        }

        if word_count < self.settings.min_words {
            suggestions.push(
                "Resume appears too short. Consider adding more details about your experience".to_string(),
            );
        } else if word_count > self.settings.max_words {
            suggestions.push("Resume might be too long. Consider condensing to 1-2 pages".to_string());
        }

        suggestions
    }
}
