//! Ranking job listings against a resume

use crate::error::Result;
use crate::input::jobs::{JobRecord, SalaryRange};
use crate::processing::ats_matcher::AtsScorer;
use crate::processing::round2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub ats_score: f32,
    /// Share of the job's required skills found in the resume, 0-100
    pub match_percentage: f32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub salary_range: Option<SalaryRange>,
    pub job_type: Option<String>,
}

/// A job that could not be scored; the rest of the batch is unaffected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFailure {
    pub job_id: String,
    pub title: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBatch {
    /// Best first: ATS score, then match percentage, then input order
    pub recommendations: Vec<Recommendation>,
    pub failures: Vec<JobFailure>,
    pub total_jobs: usize,
}

impl RecommendationBatch {
    pub fn top(&self, n: usize) -> &[Recommendation] {
        &self.recommendations[..n.min(self.recommendations.len())]
    }
}

pub struct JobRecommender {
    ats_scorer: Arc<AtsScorer>,
}

impl JobRecommender {
    pub fn new(ats_scorer: Arc<AtsScorer>) -> Self {
        Self { ats_scorer }
    }

    /// Score every job and rank the results. Every input job ends up either
    /// in `recommendations` or in `failures`; nothing is filtered out.
    pub fn recommend(&self, resume_text: &str, jobs: &[JobRecord]) -> RecommendationBatch {
        let resume_skills = self
            .ats_scorer
            .skill_extractor()
            .extract(resume_text)
            .normalized();

        let mut batch = RecommendationBatch {
            total_jobs: jobs.len(),
            ..RecommendationBatch::default()
        };

        for job in jobs {
            match self.score_job(resume_text, &resume_skills, job) {
                Ok(recommendation) => batch.recommendations.push(recommendation),
                Err(e) => {
                    warn!("Skipping job {} ({}): {}", job.id, job.title, e);
                    batch.failures.push(JobFailure {
                        job_id: job.id.clone(),
                        title: job.title.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        rank(&mut batch.recommendations);
        debug!(
            "Ranked {} jobs ({} failed)",
            batch.recommendations.len(),
            batch.failures.len()
        );
        batch
    }

    fn score_job(
        &self,
        resume_text: &str,
        resume_skills: &BTreeSet<String>,
        job: &JobRecord,
    ) -> Result<Recommendation> {
        let ats_score = self.ats_scorer.score(resume_text, &job.description)?;

        let required = job.required_skill_set();
        let matching_skills: Vec<String> = required.intersection(resume_skills).cloned().collect();
        let missing_skills: Vec<String> = required.difference(resume_skills).cloned().collect();

        Ok(Recommendation {
            job_id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            ats_score: round2(ats_score),
            match_percentage: round2(match_percentage(matching_skills.len(), required.len())),
            matching_skills,
            missing_skills,
            salary_range: job.salary_range.clone(),
            job_type: job.job_type.clone(),
        })
    }
}

/// `matching / total * 100`, or 0 when there is nothing to match against
pub fn match_percentage(matching: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        matching as f32 / total as f32 * 100.0
    }
}

/// Stable descending sort on (ats_score, match_percentage)
pub fn rank(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.ats_score
            .total_cmp(&a.ats_score)
            .then_with(|| b.match_percentage.total_cmp(&a.match_percentage))
    });
}
