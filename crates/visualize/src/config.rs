use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::prompt::VISUALIZATION_AGENT_NAME;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisualizerConfig {
    pub agent_name: String,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            agent_name: VISUALIZATION_AGENT_NAME.to_string(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl VisualizerConfig {
    /// Load from a JSON document; missing keys keep their defaults
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse visualizer config")
    }
}
