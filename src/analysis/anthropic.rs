use crate::analysis::TextGenerator;
use crate::config::NarrativeConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Text generation through the Anthropic messages API
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    config: NarrativeConfig,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    /// Fails with [`Error::MissingApiKey`] when the configuration carries no key.
    pub fn new(config: &NarrativeConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;

        Ok(Self {
            client: reqwest::Client::new(),
            config: config.clone(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn request<'a>(&'a self, prompt: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        }
    }
}

impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        ::log::info!("Requesting narrative analysis from {}", self.model());

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&self.request(prompt))
            .send()
            .await
            .map_err(|e| Error::Narrative(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Narrative(format!("HTTP {status}: {body}")));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::Narrative(e.to_string()))?;

        Ok(first_text(body))
    }
}

fn first_text(response: MessagesResponse) -> Option<String> {
    response.content.into_iter().next().and_then(|block| block.text)
}
