// Re-export modules
pub mod analysis;
pub mod compare;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod parsers;
pub mod report;
pub mod results;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use analysis::{AnalysisReport, NarrativeAnalyzer};
pub use compare::{compare, compare_strict};
pub use config::{AnalysisMode, AnalyzerConfig, FetcherConfig, PageSpec};
pub use error::{Error, Result};
pub use report::Report;
pub use results::{ComparisonRecord, DifferenceRecord, PageContent, PageInput};

use fetchers::Fetcher;

/// Main builder for a fetch, compare and analyze run
pub struct Contrast {
    config: AnalyzerConfig,
}

impl Contrast {
    /// Create a new builder for the given pages with default settings
    pub fn new(pages: Vec<PageSpec>) -> Self {
        Self {
            config: AnalyzerConfig {
                pages,
                ..AnalyzerConfig::default()
            },
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = AnalyzerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> Result<Self> {
        let config = AnalyzerConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Select statistical or narrative analysis
    pub fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.config.analysis.mode = mode;
        self
    }

    /// Select how pages are fetched
    pub fn with_fetcher(mut self, fetcher: FetcherConfig) -> Self {
        self.config.fetcher = fetcher;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Fetch every page, compare all pairs and analyze the result.
    ///
    /// Pages that cannot be fetched are reported as unfetched and left out of
    /// every pair. A narrative service failure leaves the analysis empty but
    /// keeps the comparisons.
    pub async fn run(self) -> Result<Report> {
        self.config.validate()?;

        // Build the analyzer first so a missing API key fails before any fetching
        let analyzer = NarrativeAnalyzer::from_config(&self.config.analysis)?;
        let fetcher = Fetcher::from_config(&self.config.fetcher)?;

        let pages = fetchers::fetch_all(&fetcher, &self.config.pages).await;
        Ok(analyze_pages(&analyzer, &pages).await)
    }
}

/// Compares already fetched pages and analyzes the comparisons
pub async fn analyze_pages<G: analysis::TextGenerator>(
    analyzer: &NarrativeAnalyzer<G>,
    pages: &[PageInput],
) -> Report {
    let comparisons = compare(pages);

    let analysis = match analyzer.analyze(&comparisons).await {
        Ok(report) => Some(report),
        Err(e) => {
            ::log::error!("Engagement analysis failed: {}", e);
            None
        }
    };

    Report::new(pages, comparisons, analysis)
}
