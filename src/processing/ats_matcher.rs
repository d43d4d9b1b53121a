//! ATS (Applicant Tracking System) composite scoring

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::processing::semantic::SemanticScorer;
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::structure::StructureScorer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// The three inputs of the composite score, each roughly in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub semantic: f32,
    pub keyword: f32,
    pub structure: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsResult {
    /// Final 0-100 score after the floor/ceiling policy
    pub score: f32,
    /// Weighted score on the 0-100 scale before bounds are applied
    pub raw_score: f32,
    pub components: ScoreComponents,
    pub matching_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub resume_skills: BTreeSet<String>,
    pub job_skills: BTreeSet<String>,
}

/// Weighted blend of semantic similarity, skill overlap and resume structure.
///
/// With the default configuration the result is clamped to `[45, 100]`. The
/// floor is a presentation policy so that no resume reads as an outright
/// rejection; it says nothing statistical about fit. Set
/// `ScoringConfig::score_floor` to `None` to see raw scores.
pub struct AtsScorer {
    skill_extractor: Arc<SkillExtractor>,
    semantic_scorer: SemanticScorer,
    structure_scorer: StructureScorer,
    scoring: ScoringConfig,
}

impl AtsScorer {
    pub fn new(
        skill_extractor: Arc<SkillExtractor>,
        semantic_scorer: SemanticScorer,
        scoring: ScoringConfig,
    ) -> Result<Self> {
        scoring.validate()?;

        Ok(Self {
            skill_extractor,
            semantic_scorer,
            structure_scorer: StructureScorer::new(),
            scoring,
        })
    }

    pub fn score(&self, resume_text: &str, job_description: &str) -> Result<f32> {
        Ok(self.evaluate(resume_text, job_description)?.score)
    }

    /// Full breakdown of the score for one resume/job pair
    pub fn evaluate(&self, resume_text: &str, job_description: &str) -> Result<AtsResult> {
        let semantic = self.semantic_scorer.similarity(resume_text, job_description)?;

        let resume_skills = self.skill_extractor.extract(resume_text).all_skills;
        let job_skills = self.skill_extractor.extract(job_description).all_skills;

        let matching_skills: BTreeSet<String> =
            resume_skills.intersection(&job_skills).cloned().collect();
        let missing_skills: BTreeSet<String> =
            job_skills.difference(&resume_skills).cloned().collect();

        let keyword = keyword_coverage(matching_skills.len(), job_skills.len());
        let structure = self.structure_scorer.score(resume_text);

        let components = ScoreComponents {
            semantic,
            keyword,
            structure,
        };
        let raw_score = self.raw_score(&components);
        let score = self.apply_bounds(raw_score);

        debug!(
            "ATS score {:.2} (raw {:.2}; semantic {:.3}, keyword {:.3}, structure {:.2})",
            score, raw_score, semantic, keyword, structure
        );

        Ok(AtsResult {
            score,
            raw_score,
            components,
            matching_skills,
            missing_skills,
            resume_skills,
            job_skills,
        })
    }

    /// Weighted sum on the 0-100 scale
    pub fn raw_score(&self, components: &ScoreComponents) -> f32 {
        (components.semantic * self.scoring.semantic_weight
            + components.keyword * self.scoring.keyword_weight
            + components.structure * self.scoring.structure_weight)
            * 100.0
    }

    pub fn apply_bounds(&self, raw_score: f32) -> f32 {
        let capped = raw_score.min(self.scoring.score_ceiling);
        match self.scoring.score_floor {
            Some(floor) => capped.max(floor),
            None => capped,
        }
    }

    pub fn skill_extractor(&self) -> &SkillExtractor {
        &self.skill_extractor
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn model_name(&self) -> &str {
        self.semantic_scorer.model_name()
    }
}

/// Share of job skills covered by the resume; 0 when the job lists none
fn keyword_coverage(matching: usize, required: usize) -> f32 {
    if required == 0 {
        0.0
    } else {
        matching as f32 / required as f32
    }
}
