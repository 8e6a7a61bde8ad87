//! `nec run`: read events, fill histograms, write the artifact.

use anyhow::{Context, Result};
use nec_analysis::{NecAnalysis, RunSummary};
use nec_core::{Error, EventSource};
use nec_hist::{HistogramArtifact, PendingArtifact};

use crate::config::ResolvedRun;
use crate::source::JsonLinesSource;

pub fn run_nec(run: &ResolvedRun) -> Result<RunSummary> {
    tracing::info!(
        min_q2 = run.analysis.min_q2,
        max_q2 = run.analysis.max_q2,
        threads = run.analysis.threads,
        "Starting NEC calculation"
    );

    // Output first so an unwritable destination fails before any work is done.
    let pending = PendingArtifact::create(&run.output)
        .with_context(|| format!("failed to open output {}", run.output.display()))?;
    tracing::info!(path = %run.output.display(), "opened output");

    let mut source = JsonLinesSource::open(&run.input)?;
    if let Some(max) = run.max_events {
        tracing::info!(max, "limiting input (--max-events)");
    }
    let events = source
        .collect_events(run.max_events)
        .with_context(|| format!("failed to read events from {}", run.input.display()))?;
    if events.is_empty() {
        return Err(Error::ResourceUnavailable(format!(
            "input {} contains no events",
            run.input.display()
        ))
        .into());
    }
    tracing::info!(path = %run.input.display(), events = events.len(), "opened input");

    let analysis = NecAnalysis::new(&run.analysis)?;
    tracing::info!(histograms = analysis.new_registry().len(), "defined histograms");

    let (registry, summary) = analysis.run(&events)?;
    tracing::info!(
        read = summary.events_read,
        accepted = summary.events_accepted,
        missing_collection = summary.skipped_missing_collection,
        out_of_range = summary.skipped_out_of_range,
        anomalies = summary.domain_anomalies,
        "finished event loop"
    );
    if summary.domain_anomalies > 0 {
        tracing::warn!(
            count = summary.domain_anomalies,
            "skipped fills with undefined values (non-positive log argument or degenerate momentum)"
        );
    }

    let artifact = HistogramArtifact::from_registry(
        registry,
        "nec",
        nec_core::VERSION,
        Some(run.input.display().to_string()),
        serde_json::json!({
            "options": &run.analysis,
            "max_events": run.max_events,
            "summary": summary,
        }),
    );
    pending
        .commit(&artifact)
        .with_context(|| format!("failed to write output {}", run.output.display()))?;
    tracing::info!(path = %run.output.display(), "wrote output");

    Ok(summary)
}
