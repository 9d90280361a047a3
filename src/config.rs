use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A page to fetch, with its externally measured engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    /// URL of the page
    pub url: String,

    /// Engagement metric (e.g. conversion rate). Treated as an opaque scalar.
    pub engagement: f64,
}

impl PageSpec {
    pub fn new(url: impl Into<String>, engagement: f64) -> Self {
        Self {
            url: url.into(),
            engagement,
        }
    }
}

/// How raw page markup is retrieved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FetcherConfig {
    /// Plain HTTP GET
    #[serde(rename = "http")]
    Http(HttpFetcherConfig),

    /// Rendered page source through a WebDriver server
    #[serde(rename = "webdriver")]
    WebDriver(WebDriverFetcherConfig),
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self::Http(HttpFetcherConfig::default())
    }
}

/// Configuration for the HTTP fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpFetcherConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Configuration for the WebDriver fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebDriverFetcherConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

impl Default for WebDriverFetcherConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
        }
    }
}

/// Which analysis to run over the comparison records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Local repackaging of the comparison statistics
    #[default]
    Statistical,
    /// Delegate to a remote text-generation service
    Narrative,
}

/// Shape of the prompt sent in narrative mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Embed all records as pretty-printed JSON
    #[default]
    Json,
    /// Describe each pair in prose
    Detailed,
}

/// Settings for the text-generation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Messages endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Value of the `anthropic-version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub mode: AnalysisMode,

    #[serde(default)]
    pub prompt_style: PromptStyle,

    #[serde(default)]
    pub narrative: NarrativeConfig,
}

/// Where the finished report goes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for the timestamped report file; no file is written if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Whether to print the report to stdout
    #[serde(default = "default_stdout")]
    pub stdout: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            stdout: default_stdout(),
        }
    }
}

/// Complete configuration for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Pages to compare, in report order
    #[serde(default)]
    pub pages: Vec<PageSpec>,

    #[serde(default)]
    pub fetcher: FetcherConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl AnalyzerConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no run could use
    pub fn validate(&self) -> Result<()> {
        if let Some(page) = self.pages.iter().find(|p| !p.engagement.is_finite()) {
            return Err(Error::Config(format!(
                "engagement for {} must be a finite number",
                page.url
            )));
        }
        if self.analysis.narrative.max_tokens == 0 {
            return Err(Error::Config("max_tokens must be positive".to_string()));
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("page-contrast/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_model() -> String {
    "claude-3-opus-20240229".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_endpoint() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_stdout() -> bool {
    true
}
