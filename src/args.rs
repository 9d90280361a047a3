use clap::{Parser, ValueEnum};
use page_contrast::config::{
    AnalysisMode, FetcherConfig, HttpFetcherConfig, PageSpec, WebDriverFetcherConfig,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-contrast")]
#[command(about = "Compares landing pages pairwise and relates their differences to engagement")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Page to compare as URL=ENGAGEMENT (repeatable, replaces pages from the config file)
    #[arg(short, long = "page", value_parser = parse_page_spec)]
    pub pages: Vec<PageSpec>,

    /// Analysis mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// How pages are fetched
    #[arg(short, long, value_enum)]
    pub fetcher: Option<FetcherArg>,

    /// Directory for the timestamped report file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Do not print the report to stdout
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Statistical,
    Narrative,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FetcherArg {
    Http,
    Webdriver,
}

/// Convert from CLI argument mode to the analysis mode
pub fn convert_mode(arg: ModeArg) -> AnalysisMode {
    match arg {
        ModeArg::Statistical => AnalysisMode::Statistical,
        ModeArg::Narrative => AnalysisMode::Narrative,
    }
}

/// Convert from CLI argument fetcher to a default fetcher configuration
pub fn convert_fetcher(arg: FetcherArg) -> FetcherConfig {
    match arg {
        FetcherArg::Http => FetcherConfig::Http(HttpFetcherConfig::default()),
        FetcherArg::Webdriver => FetcherConfig::WebDriver(WebDriverFetcherConfig::default()),
    }
}

/// Parses `URL=ENGAGEMENT`, splitting on the last `=` so query strings survive
pub fn parse_page_spec(value: &str) -> Result<PageSpec, String> {
    let (url, engagement) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected URL=ENGAGEMENT, got {value:?}"))?;

    if url.is_empty() {
        return Err(format!("missing URL in {value:?}"));
    }

    let engagement: f64 = engagement
        .trim()
        .parse()
        .map_err(|e| format!("invalid engagement {engagement:?}: {e}"))?;

    if !engagement.is_finite() {
        return Err(format!("engagement must be finite, got {engagement}"));
    }

    Ok(PageSpec::new(url, engagement))
}
