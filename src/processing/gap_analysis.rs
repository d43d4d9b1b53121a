//! Skills gap between a resume and one job

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::input::jobs::JobRecord;
use crate::processing::ats_matcher::AtsScorer;
use crate::processing::recommender::match_percentage;
use crate::processing::round2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCoverage {
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    pub match_percentage: f32,
}

impl SkillCoverage {
    fn between(wanted: &BTreeSet<String>, available: &BTreeSet<String>) -> Self {
        let matching: Vec<String> = wanted.intersection(available).cloned().collect();
        let missing: Vec<String> = wanted.difference(available).cloned().collect();
        let match_percentage = round2(match_percentage(matching.len(), wanted.len()));

        Self {
            matching,
            missing,
            match_percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsGapReport {
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub ats_score: f32,
    pub required_skills: SkillCoverage,
    pub preferred_skills: SkillCoverage,
    pub recommendations: Vec<String>,
}

pub struct SkillsGapAnalyzer {
    ats_scorer: Arc<AtsScorer>,
    settings: AnalysisConfig,
}

impl SkillsGapAnalyzer {
    pub fn new(ats_scorer: Arc<AtsScorer>, settings: AnalysisConfig) -> Self {
        Self {
            ats_scorer,
            settings,
        }
    }

    pub fn analyze(&self, resume_text: &str, job: &JobRecord) -> Result<SkillsGapReport> {
        let resume_skills = self
            .ats_scorer
            .skill_extractor()
            .extract(resume_text)
            .normalized();

        let required_skills = SkillCoverage::between(&job.required_skill_set(), &resume_skills);
        let preferred_skills = SkillCoverage::between(&job.preferred_skill_set(), &resume_skills);
        let ats_score = round2(self.ats_scorer.score(resume_text, &job.description)?);
        let recommendations = self.recommendations(&required_skills, &preferred_skills);

        Ok(SkillsGapReport {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            ats_score,
            required_skills,
            preferred_skills,
            recommendations,
        })
    }

    fn recommendations(&self, required: &SkillCoverage, preferred: &SkillCoverage) -> Vec<String> {
        let mut advice = Vec::new();

        if !required.missing.is_empty() {
            let listed: Vec<&str> = required
                .missing
                .iter()
                .take(self.settings.missing_required_limit)
                .map(String::as_str)
                .collect();
            advice.push(format!(
                "Focus on learning these required skills: {}",
                listed.join(", ")
            ));
        }

        if !preferred.missing.is_empty() {
            let listed: Vec<&str> = preferred
                .missing
                .iter()
                .take(self.settings.missing_preferred_limit)
                .map(String::as_str)
                .collect();
            advice.push(format!(
                "Consider learning these preferred skills: {}",
                listed.join(", ")
            ));
        }

        if required.match_percentage < self.settings.required_match_threshold {
            advice.push(
                "Highlight your relevant experience more prominently in your resume".to_string(),
            );
        }

        advice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_coverage_partition() {
        let coverage = SkillCoverage::between(&set(&["python", "sql"]), &set(&["python", "rust"]));
        assert_eq!(coverage.matching, vec!["python"]);
        assert_eq!(coverage.missing, vec!["sql"]);
        assert_eq!(coverage.match_percentage, 50.0);
    }

    #[test]
    fn test_empty_requirement_set_is_zero_percent() {
        let coverage = SkillCoverage::between(&BTreeSet::new(), &set(&["python"]));
        assert!(coverage.matching.is_empty());
        assert!(coverage.missing.is_empty());
        assert_eq!(coverage.match_percentage, 0.0);
    }

    #[test]
    fn test_thirds_are_rounded() {
        let coverage = SkillCoverage::between(&set(&["a", "b", "c"]), &set(&["a"]));
        assert_eq!(coverage.match_percentage, 33.33);
    }
}
