//! Turns comparison records into an analysis report, either locally or by
//! delegating to a text-generation service.

pub mod anthropic;
pub mod prompt;

use crate::config::{AnalysisConfig, AnalysisMode, PromptStyle};
use crate::error::Result;
use crate::results::{ComparisonRecord, DifferenceRecord};
use serde::{Deserialize, Serialize};
use std::future::Future;

pub use anthropic::AnthropicClient;

pub const STATISTICAL_NOTICE: &str =
    "AI analysis disabled. Only statistical comparisons available.";

/// Something that turns a prompt into a completion.
///
/// `Ok(None)` means the service answered without any text.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Comparison fields regrouped into parallel sequences, aligned by pair index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticalAnalysis {
    pub content_similarities: Vec<f64>,
    pub engagement_differences: Vec<f64>,
    pub key_differences: Vec<DifferenceRecord>,
}

/// Structured answer from the text-generation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NarrativeAnalysis {
    pub key_differences: serde_json::Value,
    pub success_factors: serde_json::Value,
    pub recommendations: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Statistical {
        notice: String,
        statistical_analysis: StatisticalAnalysis,
    },
    Narrative(NarrativeAnalysis),
    /// The service answered with something that is not the expected JSON
    Error { error: String, raw_response: String },
}

/// Analyzer selected by an explicit mode
#[derive(Debug, Clone)]
pub enum NarrativeAnalyzer<G = AnthropicClient> {
    Statistical,
    Delegated { client: G, prompt_style: PromptStyle },
}

impl NarrativeAnalyzer<AnthropicClient> {
    /// Builds the analyzer the configuration asks for. Narrative mode without
    /// an API key is rejected here rather than at analysis time.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        match config.mode {
            AnalysisMode::Statistical => Ok(Self::Statistical),
            AnalysisMode::Narrative => Ok(Self::Delegated {
                client: AnthropicClient::new(&config.narrative)?,
                prompt_style: config.prompt_style,
            }),
        }
    }
}

impl<G: TextGenerator> NarrativeAnalyzer<G> {
    pub fn statistical() -> Self {
        Self::Statistical
    }

    pub fn delegated(client: G, prompt_style: PromptStyle) -> Self {
        Self::Delegated {
            client,
            prompt_style,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        match self {
            Self::Statistical => AnalysisMode::Statistical,
            Self::Delegated { .. } => AnalysisMode::Narrative,
        }
    }

    /// Analyzes the comparison records.
    ///
    /// Only transport failures are returned as errors; an unparseable answer
    /// becomes [`AnalysisReport::Error`] carrying the raw text.
    pub async fn analyze(&self, comparisons: &[ComparisonRecord]) -> Result<AnalysisReport> {
        ::log::info!(
            "Analyzing {} comparisons in {:?} mode",
            comparisons.len(),
            self.mode()
        );

        match self {
            Self::Statistical => Ok(statistical_report(comparisons)),
            Self::Delegated {
                client,
                prompt_style,
            } => {
                let prompt = prompt::build_prompt(comparisons, *prompt_style)?;
                let response = client.generate(&prompt).await?;
                Ok(interpret_response(response))
            }
        }
    }
}

/// Pure local summary of the comparison records
pub fn statistical_report(comparisons: &[ComparisonRecord]) -> AnalysisReport {
    AnalysisReport::Statistical {
        notice: STATISTICAL_NOTICE.to_string(),
        statistical_analysis: StatisticalAnalysis {
            content_similarities: comparisons.iter().map(|c| c.content_similarity).collect(),
            engagement_differences: comparisons
                .iter()
                .map(|c| c.engagement_difference)
                .collect(),
            key_differences: comparisons
                .iter()
                .map(|c| c.key_differences.clone())
                .collect(),
        },
    }
}

/// Parses the service's answer, keeping the raw text when it is not the
/// expected three-key JSON object.
pub fn interpret_response(response: Option<String>) -> AnalysisReport {
    let Some(text) = response else {
        return AnalysisReport::Error {
            error: "Failed to parse response: no text content in response".to_string(),
            raw_response: "No response".to_string(),
        };
    };

    match serde_json::from_str::<NarrativeAnalysis>(strip_code_fence(&text)) {
        Ok(analysis) => AnalysisReport::Narrative(analysis),
        Err(e) => {
            ::log::warn!("Narrative response was not valid JSON: {}", e);
            AnalysisReport::Error {
                error: format!("Failed to parse response: {e}"),
                raw_response: text,
            }
        }
    }
}

/// Removes a single Markdown code fence around the answer, if present
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line.
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => {
            let inner = inner.trim();
            inner.strip_prefix("json").unwrap_or(inner).trim()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::results::HeadingChanges;
    use std::sync::Mutex;

    /// Replays a canned answer and remembers the prompts it was given
    struct CannedGenerator {
        answer: Result<Option<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        fn answering(answer: Option<&str>) -> Self {
            Self {
                answer: Ok(answer.map(str::to_string)),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                answer: Err(Error::Narrative("connection refused".to_string())),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> Result<Option<String>> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.answer {
                Ok(answer) => Ok(answer.clone()),
                Err(e) => Err(Error::Narrative(e.to_string())),
            }
        }
    }

    fn record(similarity: f64, engagement: f64) -> ComparisonRecord {
        ComparisonRecord {
            page1_url: "a".to_string(),
            page2_url: "b".to_string(),
            content_similarity: similarity,
            engagement_difference: engagement,
            key_differences: DifferenceRecord {
                title_diff: 1.0,
                heading_changes: HeadingChanges::default(),
                content_length_diff: 3,
                link_count_diff: -1,
            },
        }
    }

    #[tokio::test]
    async fn test_statistical_mode_aligns_sequences() {
        let comparisons = vec![record(0.9, -0.39), record(0.1, 0.09)];
        let analyzer: NarrativeAnalyzer<CannedGenerator> = NarrativeAnalyzer::statistical();

        let report = analyzer.analyze(&comparisons).await.unwrap();
        match &report {
            AnalysisReport::Statistical {
                notice,
                statistical_analysis,
            } => {
                assert_eq!(notice, STATISTICAL_NOTICE);
                assert_eq!(statistical_analysis.content_similarities, vec![0.9, 0.1]);
                assert_eq!(statistical_analysis.engagement_differences, vec![-0.39, 0.09]);
                assert_eq!(statistical_analysis.key_differences.len(), 2);
            }
            other => panic!("expected statistical report, got {other:?}"),
        }

        assert_eq!(analyzer.analyze(&comparisons).await.unwrap(), report);
    }

    #[test]
    fn test_statistical_report_of_nothing() {
        let report = statistical_report(&[]);
        assert!(matches!(
            report,
            AnalysisReport::Statistical { statistical_analysis, .. }
                if statistical_analysis == StatisticalAnalysis::default()
        ));
    }

    #[tokio::test]
    async fn test_delegated_mode_parses_json_answer() {
        let generator = CannedGenerator::answering(Some(
            r#"{"key_differences": ["headline"], "success_factors": ["social proof"], "recommendations": ["shorten form"]}"#,
        ));
        let analyzer = NarrativeAnalyzer::delegated(generator, PromptStyle::Json);

        let report = analyzer.analyze(&[record(0.5, 0.2)]).await.unwrap();
        assert_eq!(
            report,
            AnalysisReport::Narrative(NarrativeAnalysis {
                key_differences: serde_json::json!(["headline"]),
                success_factors: serde_json::json!(["social proof"]),
                recommendations: serde_json::json!(["shorten form"]),
            })
        );

        if let NarrativeAnalyzer::Delegated { client, .. } = &analyzer {
            let prompts = client.prompts.lock().unwrap();
            assert_eq!(prompts.len(), 1);
            assert!(prompts[0].contains("\"content_similarity\": 0.5"));
        }
    }

    #[tokio::test]
    async fn test_delegated_mode_keeps_raw_text_on_parse_failure() {
        let generator = CannedGenerator::answering(Some("The blue page wins."));
        let analyzer = NarrativeAnalyzer::delegated(generator, PromptStyle::Detailed);

        match analyzer.analyze(&[record(0.5, 0.2)]).await.unwrap() {
            AnalysisReport::Error {
                error,
                raw_response,
            } => {
                assert!(error.starts_with("Failed to parse response"));
                assert_eq!(raw_response, "The blue page wins.");
            }
            other => panic!("expected error report, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let analyzer = NarrativeAnalyzer::delegated(CannedGenerator::failing(), PromptStyle::Json);
        let result = analyzer.analyze(&[record(0.5, 0.2)]).await;
        assert!(matches!(result, Err(Error::Narrative(_))));
    }

    #[test]
    fn test_empty_answer() {
        assert_eq!(
            interpret_response(None),
            AnalysisReport::Error {
                error: "Failed to parse response: no text content in response".to_string(),
                raw_response: "No response".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_or_extra_keys_are_rejected() {
        let missing = interpret_response(Some(
            r#"{"key_differences": [], "success_factors": []}"#.to_string(),
        ));
        assert!(matches!(missing, AnalysisReport::Error { .. }));

        let extra = interpret_response(Some(
            r#"{"key_differences": [], "success_factors": [], "recommendations": [], "summary": ""}"#
                .to_string(),
        ));
        assert!(matches!(extra, AnalysisReport::Error { .. }));
    }

    #[test]
    fn test_fenced_answer_is_accepted() {
        let answer = "```json\n{\"key_differences\": 1, \"success_factors\": 2, \"recommendations\": 3}\n```";
        assert!(matches!(
            interpret_response(Some(answer.to_string())),
            AnalysisReport::Narrative(_)
        ));
    }

    #[test]
    fn test_single_line_fence_is_accepted() {
        let tagged = "```json{\"key_differences\": 1, \"success_factors\": 2, \"recommendations\": 3}```";
        assert!(matches!(
            interpret_response(Some(tagged.to_string())),
            AnalysisReport::Narrative(_)
        ));

        let bare = "```{\"key_differences\": 1, \"success_factors\": 2, \"recommendations\": 3}```";
        assert!(matches!(
            interpret_response(Some(bare.to_string())),
            AnalysisReport::Narrative(_)
        ));
    }

    #[test]
    fn test_report_serialization_shapes() {
        let statistical = serde_json::to_value(statistical_report(&[])).unwrap();
        assert_eq!(statistical["notice"], STATISTICAL_NOTICE);
        assert!(statistical["statistical_analysis"]["content_similarities"].is_array());

        let error = serde_json::to_value(interpret_response(Some("nope".to_string()))).unwrap();
        assert_eq!(error["raw_response"], "nope");
        assert!(error["error"].is_string());
    }
}
