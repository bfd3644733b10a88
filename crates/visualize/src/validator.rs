use tracing::{debug, warn, Level};

use crate::error::MalformedOutputError;
use crate::schema::VisualizationResult;

/// Strictly parse generator output into a [`VisualizationResult`].
///
/// The whole string must be one JSON value of the expected shape. Code
/// fences, surrounding prose and truncated objects are rejected as-is;
/// nothing is stripped or extracted. Referential integrity between edges
/// and nodes is not checked here (see [`VisualizationResult::dangling_edges`]).
pub fn parse_visualization(raw: &str) -> Result<VisualizationResult, MalformedOutputError> {
    match serde_json::from_str::<VisualizationResult>(raw) {
        Ok(result) => {
            if tracing::enabled!(Level::DEBUG) {
                if let Ok(pretty) = result.to_pretty_json() {
                    debug!(output = %pretty, "Parsed visualization result");
                }
            }
            Ok(result)
        }
        Err(source) => {
            warn!(
                raw_len = raw.len(),
                line = source.line(),
                column = source.column(),
                error = %source,
                "Visualization output is not valid JSON"
            );
            Err(MalformedOutputError {
                raw: raw.to_string(),
                source,
            })
        }
    }
}
