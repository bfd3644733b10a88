use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// One clause as produced by the structuring step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseSummary {
    pub clause_id: String,
    pub summary: String,
    pub risk: String,
    /// Any further fields the structuring step attached, kept as-is
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl ClauseSummary {
    pub fn new(clause_id: impl Into<String>, summary: impl Into<String>, risk: impl Into<String>) -> Self {
        Self {
            clause_id: clause_id.into(),
            summary: summary.into(),
            risk: risk.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuringResult {
    pub document_summary: String,
    pub clauses: Vec<ClauseSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub summary: String,
    pub risk: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub relationship: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationResult {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl VisualizationResult {
    /// Edges whose `from` or `to` does not name a node in this result.
    ///
    /// Parsing never rejects these; renderers that need a closed graph
    /// can check here before drawing.
    pub fn dangling_edges(&self) -> Vec<&GraphEdge> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();

        self.edges
            .iter()
            .filter(|e| !ids.contains(e.from.as_str()) || !ids.contains(e.to.as_str()))
            .collect()
    }

    /// Node ids that occur more than once, in first-repeat order
    pub fn duplicate_node_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for node in &self.nodes {
            let id = node.id.as_str();
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }

        duplicates
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
