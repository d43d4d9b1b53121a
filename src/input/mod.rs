//! Input processing module
//! Handles file detection, text extraction, and job listing files

pub mod file_detector;
pub mod jobs;
pub mod manager;
pub mod text_extractor;

pub use manager::InputManager;

use crate::error::{Result, ResumeMatcherError};

/// Reject empty or whitespace-only text for a required input
pub fn require_text(role: &str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ResumeMatcherError::MissingInput(format!("{} text is empty", role)));
    }
    Ok(())
}
