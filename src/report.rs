use crate::analysis::AnalysisReport;
use crate::config::OutputConfig;
use crate::error::Result;
use crate::results::{ComparisonRecord, PageInput};
use crate::utils::timestamped_filename;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Fetch outcome for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub url: String,
    pub engagement: f64,
    pub fetched: bool,
}

impl From<&PageInput> for PageSummary {
    fn from(page: &PageInput) -> Self {
        Self {
            url: page.url.clone(),
            engagement: page.engagement,
            fetched: page.content.is_some(),
        }
    }
}

/// Everything one run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub pages: Vec<PageSummary>,
    pub comparisons: Vec<ComparisonRecord>,
    /// `None` when the narrative service could not be reached
    pub analysis: Option<AnalysisReport>,
}

impl Report {
    pub fn new(
        pages: &[PageInput],
        comparisons: Vec<ComparisonRecord>,
        analysis: Option<AnalysisReport>,
    ) -> Self {
        Self {
            generated_at: Local::now(),
            pages: pages.iter().map(PageSummary::from).collect(),
            comparisons,
            analysis,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes reports to stdout and/or a timestamped file
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: Option<PathBuf>,
    stdout: bool,
}

impl ReportWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            stdout: config.stdout,
        }
    }

    /// Writes the report, returning the file path when one was written
    pub fn write(&self, report: &Report) -> Result<Option<PathBuf>> {
        let json = report.to_json()?;

        if self.stdout {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{json}")?;
        }

        let Some(directory) = &self.directory else {
            return Ok(None);
        };

        fs::create_dir_all(directory)?;
        let path = directory.join(timestamped_filename(
            "analysis_results",
            "json",
            &report.generated_at,
        ));
        fs::write(&path, json)?;
        ::log::info!("Wrote report to {}", path.display());
        Ok(Some(path))
    }
}
