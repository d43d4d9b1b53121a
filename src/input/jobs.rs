//! Job records supplied by an external listing store

use crate::error::{Result, ResumeMatcherError};
use log::info;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use strsim::jaro_winkler;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Filled,
    Expired,
}

/// A job listing as exported by the listing store. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Plain string, or the `{"$oid": ...}` form of a mongoexport dump
    #[serde(alias = "_id", deserialize_with = "deserialize_job_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub salary_range: Option<SalaryRange>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawJobId {
    Plain(String),
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

fn deserialize_job_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawJobId::deserialize(deserializer)? {
        RawJobId::Plain(id) => id,
        RawJobId::ObjectId { oid } => oid,
    })
}

impl JobRecord {
    /// Required skills, lowercased and deduplicated
    pub fn required_skill_set(&self) -> BTreeSet<String> {
        normalize_skills(&self.required_skills)
    }

    /// Preferred skills, lowercased and deduplicated
    pub fn preferred_skill_set(&self) -> BTreeSet<String> {
        normalize_skills(&self.preferred_skills)
    }

    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }
}

fn normalize_skills(skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Read a JSON array of job records, e.g. `mongoexport --jsonArray` output
pub async fn load_jobs(path: &Path) -> Result<Vec<JobRecord>> {
    if !path.exists() {
        return Err(ResumeMatcherError::InvalidInput(format!(
            "Job listing file does not exist: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).await?;
    let jobs = parse_jobs(&content)?;
    info!("Loaded {} job records from {}", jobs.len(), path.display());
    Ok(jobs)
}

pub fn parse_jobs(content: &str) -> Result<Vec<JobRecord>> {
    Ok(serde_json::from_str(content)?)
}

/// Look a job up by id. The error names the closest id when one is similar.
pub fn find_job<'a>(jobs: &'a [JobRecord], job_id: &str) -> Result<&'a JobRecord> {
    if let Some(job) = jobs.iter().find(|j| j.id == job_id) {
        return Ok(job);
    }

    let closest = jobs
        .iter()
        .map(|j| (jaro_winkler(&j.id, job_id), &j.id))
        .filter(|(similarity, _)| *similarity >= 0.85)
        .max_by(|a, b| a.0.total_cmp(&b.0));

    let message = match closest {
        Some((_, id)) => format!("Job {} not found (did you mean {}?)", job_id, id),
        None => format!("Job {} not found", job_id),
    };
    Err(ResumeMatcherError::NotFound(message))
}
