//! Agent module - conversational report generation
//!
//! Orchestrates the fixed prompt pipeline: build the partner texts, send
//! each prompt over one agent thread, persist the transcript.

mod client;
mod prompts;
mod transcript;

pub use client::{AgentClient, AgentConfig, AgentError};
pub use prompts::{analysis_sequence, PromptSection};
pub use transcript::Transcript;

use crate::data::DataStore;
use crate::report;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

/// Run the full analysis pipeline for one partner and write the report.
/// Returns the report path.
pub async fn run_report(
    store: &DataStore,
    client: &AgentClient,
    partner_id: i64,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let snapshot = store.snapshot();
    let summary = report::build_summary(&snapshot, partner_id)?;
    let comparison = report::build_comparison(&snapshot, partner_id)?;
    let sequence = analysis_sequence(&summary, &comparison);

    let thread_id = client
        .ensure_thread()
        .await
        .context("failed to open agent thread")?;
    info!(%thread_id, partner_id, "starting analysis pipeline");

    let mut transcript = Transcript::new(partner_id);
    for prompt in &sequence {
        info!(section = prompt.name, "sending prompt");
        let reply = client
            .send_message(&thread_id, &prompt.content)
            .await
            .with_context(|| format!("agent failed during '{}'", prompt.name))?;
        transcript.push(prompt.name, &prompt.content, &reply);
    }

    let backup = transcript.write_backup(output_dir)?;
    info!("responses backed up to {}", backup.display());
    let path = transcript.write_report(output_dir)?;
    info!("analysis saved to {}", path.display());
    Ok(path)
}
