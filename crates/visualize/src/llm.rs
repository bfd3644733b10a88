use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::prompt::build_visualization_prompt;
use crate::schema::StructuringResult;

/// A text-generation backend. Output is raw text with no shape guarantee.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str, input: &StructuringResult) -> Result<String>;
}

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: String, // "json" for structured output
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_raw(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            format: "json".to_string(), // Force JSON output
        };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Ollama")?;

        if !response.status().is_success() {
            anyhow::bail!("Ollama request failed: {}", response.status());
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(ollama_response.response)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, instruction: &str, input: &StructuringResult) -> Result<String> {
        let prompt = build_visualization_prompt(instruction, input)?;
        self.generate_raw(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ClauseSummary;
    use mockito::Matcher;
    use serde_json::json;

    fn sample_input() -> StructuringResult {
        StructuringResult {
            document_summary: "Service agreement.".to_string(),
            clauses: vec![ClauseSummary::new("C1", "Deliver in 30 days.", "High")],
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> OllamaClient {
        let config = LlmConfig {
            base_url: format!("{}/", server.url()),
            model: "test-model".to_string(),
            request_timeout_secs: 5,
        };
        OllamaClient::from_config(&config).unwrap()
    }

    #[test]
    fn test_from_default_config() {
        let client = OllamaClient::from_config(&LlmConfig::default()).unwrap();

        assert_eq!(client.model(), "llama3");
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let config = LlmConfig {
            base_url: "http://models.internal:11434///".to_string(),
            ..LlmConfig::default()
        };
        let client = OllamaClient::from_config(&config).unwrap();

        assert_eq!(client.base_url, "http://models.internal:11434");
    }

    #[tokio::test]
    async fn test_generate_returns_response_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::PartialJson(json!({
                "model": "test-model",
                "stream": false,
                "format": "json"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": "{\"nodes\":[],\"edges\":[]}", "done": true}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let raw = client.generate("INSTRUCTION", &sample_input()).await.unwrap();

        assert_eq!(raw, r#"{"nodes":[],"edges":[]}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_prompt_carries_instruction_and_input() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("INSTRUCTION".to_string()),
                Matcher::Regex("Deliver in 30 days".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"response": "ok"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client.generate("INSTRUCTION", &sample_input()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_generation_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .with_status(500)
            .with_body("model not loaded")
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.generate("INSTRUCTION", &sample_input()).await.unwrap_err();

        assert!(err.to_string().contains("500"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bad_envelope_is_generation_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.generate("INSTRUCTION", &sample_input()).await.unwrap_err();

        assert!(err.to_string().contains("Failed to parse Ollama response"));
    }
}
