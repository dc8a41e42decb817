//! `toolrouter query`: one query through the orchestrator, printed to stdout.

use std::sync::Arc;

use config::Settings;
use serve::QueryResponse;
use toolrouter::{HeuristicLlm, Orchestrator, QueryOutcome, Toolbox};
use tracing::info;

/// Builds the orchestrator for a one-shot query.
///
/// Offline uses the rule-based model and mock weather, so no settings (and no API key) are
/// needed.
pub fn build_orchestrator(offline: bool) -> Result<Orchestrator, Box<dyn std::error::Error>> {
    if offline {
        info!("offline mode: rule-based routing, mock weather");
        return Ok(Orchestrator::new(
            Arc::new(HeuristicLlm::new()),
            Toolbox::mock(),
        )?);
    }
    let settings = Settings::from_env()?;
    Ok(Orchestrator::from_settings(&settings)?)
}

/// Plain output: one `tool_used:` line and one `result:` line.
pub fn render_text(outcome: &QueryOutcome) -> String {
    format!("tool_used: {}\nresult: {}", outcome.tool_used, outcome.result)
}

/// JSON output: the same object the REST endpoint returns.
pub fn render_json(query: &str, outcome: QueryOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string(&QueryResponse::new(query.to_string(), outcome))
}

pub async fn run(
    text: &[String],
    offline: bool,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let query = text.join(" ");
    let orchestrator = build_orchestrator(offline)?;
    let outcome = orchestrator.handle_query(&query).await?;
    if json {
        Ok(render_json(&query, outcome)?)
    } else {
        Ok(render_text(&outcome))
    }
}
