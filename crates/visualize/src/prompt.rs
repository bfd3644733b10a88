use anyhow::{Context, Result};

use crate::schema::StructuringResult;

pub const VISUALIZATION_AGENT_NAME: &str = "visualization_agent";

pub const VISUALIZATION_INSTRUCTION: &str = r#"You are a Visualization AI.

INPUT:
A JSON object with keys:
  - document_summary (string)
  - clauses (array of objects, each with clause_id, summary, risk and possibly more fields)

TASK:
1. Rewrite or creatively summarize each clause summary so it is concise and easy to display, keeping its meaning.
2. Keep each clause's risk, or an equivalent descriptive value.
3. Output ONLY valid JSON of this exact structure:

{
  "nodes": [
    {"id": "string", "label": "string", "summary": "string", "risk": "string"}
  ],
  "edges": [
    {"from": "string", "to": "string", "relationship": "string"}
  ]
}

FIELDS:
- nodes[].id: unique id for each node
- nodes[].label: short label for the graph
- nodes[].summary: your rewritten clause summary
- nodes[].risk: e.g. high / medium / low, or descriptive text
- edges[].from / edges[].to: ids of existing nodes
- edges[].relationship: e.g. follows / summary_of

RULES:
- Emit exactly one JSON object
- No markdown, no code fences, no Mermaid or other diagram syntax
- No text before or after the JSON"#;

/// Natural-language contract handed to a text generator.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDefinition {
    pub name: String,
    pub instruction: String,
}

impl AgentDefinition {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
        }
    }

    pub fn visualization() -> Self {
        Self::new(VISUALIZATION_AGENT_NAME, VISUALIZATION_INSTRUCTION)
    }
}

impl Default for AgentDefinition {
    fn default() -> Self {
        Self::visualization()
    }
}

pub fn build_visualization_prompt(instruction: &str, input: &StructuringResult) -> Result<String> {
    let input_json = serde_json::to_string_pretty(input)
        .context("Failed to serialize structuring result")?;

    Ok(format!(
        r#"{}

INPUT JSON:
{}

JSON OUTPUT:"#,
        instruction, input_json
    ))
}
