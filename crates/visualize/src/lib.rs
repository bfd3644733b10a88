pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod schema;
pub mod validator;

pub use config::{LlmConfig, VisualizerConfig};
pub use error::{MalformedOutputError, VisualizeError};
pub use llm::{OllamaClient, TextGenerator};
pub use prompt::AgentDefinition;
pub use schema::{ClauseSummary, GraphEdge, GraphNode, StructuringResult, VisualizationResult};
pub use validator::parse_visualization;

use anyhow::Result;
use tracing::info;

/// Turns a structuring result into a node/edge graph via a text generator.
pub struct VisualizationAgent<G: TextGenerator> {
    definition: AgentDefinition,
    generator: G,
}

impl<G: TextGenerator> VisualizationAgent<G> {
    pub fn new(generator: G) -> Self {
        Self::with_definition(AgentDefinition::visualization(), generator)
    }

    pub fn with_definition(definition: AgentDefinition, generator: G) -> Self {
        Self {
            definition,
            generator,
        }
    }

    pub fn definition(&self) -> &AgentDefinition {
        &self.definition
    }

    /// One generation call, one strict parse. No retry.
    pub async fn render_visualization(
        &self,
        input: &StructuringResult,
    ) -> Result<VisualizationResult, VisualizeError> {
        info!(
            agent = %self.definition.name,
            clauses = input.clauses.len(),
            "Rendering visualization"
        );

        let raw = self.generator
            .generate(&self.definition.instruction, input)
            .await
            .map_err(VisualizeError::Generation)?;

        let result = parse_visualization(&raw)?;

        info!(
            agent = %self.definition.name,
            nodes = result.nodes.len(),
            edges = result.edges.len(),
            "Visualization rendered"
        );

        Ok(result)
    }
}

impl VisualizationAgent<OllamaClient> {
    pub fn from_config(config: &VisualizerConfig) -> Result<Self> {
        let client = OllamaClient::from_config(&config.llm)?;
        let definition = AgentDefinition {
            name: config.agent_name.clone(),
            ..AgentDefinition::visualization()
        };

        Ok(Self::with_definition(definition, client))
    }
}
