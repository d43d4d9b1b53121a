//! Report formatting and saving

pub mod formatter;

pub use formatter::{save_report_to_file, suggest_filename, OutputFormatter, Report, ReportGenerator};
