//! JSON persistence for a finished set of histograms.
//!
//! Output is staged in a `<name>.tmp` sibling and renamed into place only on
//! [`PendingArtifact::commit`]. A pending artifact that is dropped without a
//! commit removes its staging file, so a failed run never leaves partial output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::histogram::Histogram;
use crate::registry::HistogramRegistry;

/// Schema tag written into every artifact.
pub const ARTIFACT_SCHEMA_VERSION: &str = "nec_histograms_v1";

/// Top-level artifact document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramArtifact {
    /// Always [`ARTIFACT_SCHEMA_VERSION`] for artifacts written by this crate.
    pub schema_version: String,
    /// Provenance.
    pub meta: ArtifactMeta,
    /// Histograms in declaration order.
    pub histograms: Vec<Histogram>,
}

/// Provenance block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Producing tool.
    pub tool: String,
    /// Producing tool version.
    pub tool_version: String,
    /// Wall-clock creation time.
    pub created_unix_ms: u128,
    /// Input location, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Free-form run information (options, counters).
    #[serde(default)]
    pub run: serde_json::Value,
}

impl HistogramArtifact {
    /// Snapshot a registry.
    pub fn from_registry(
        registry: HistogramRegistry,
        tool: &str,
        tool_version: &str,
        input: Option<String>,
        run: serde_json::Value,
    ) -> Self {
        let created_unix_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
        Self {
            schema_version: ARTIFACT_SCHEMA_VERSION.to_string(),
            meta: ArtifactMeta {
                tool: tool.to_string(),
                tool_version: tool_version.to_string(),
                created_unix_ms,
                input,
                run,
            },
            histograms: registry.into_histograms(),
        }
    }

    /// Histogram by name.
    pub fn get(&self, name: &str) -> Option<&Histogram> {
        self.histograms.iter().find(|h| h.name() == name)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// An output location that has been opened but not yet written.
#[derive(Debug)]
pub struct PendingArtifact {
    path: PathBuf,
    staging: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl PendingArtifact {
    /// Create the staging file next to `path`.
    ///
    /// Fails if the parent directory does not exist or is not writable.
    pub fn create(path: &Path) -> Result<Self> {
        let staging = staging_path(path);
        let file = File::create(&staging)?;
        tracing::debug!(path = %staging.display(), "staging output");
        Ok(Self { path: path.to_path_buf(), staging, file: Some(file), committed: false })
    }

    /// Final destination.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `artifact` and move it into place.
    pub fn commit(mut self, artifact: &HistogramArtifact) -> Result<()> {
        if let Some(file) = self.file.take() {
            let mut w = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut w, artifact)?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        std::fs::rename(&self.staging, &self.path)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingArtifact {
    fn drop(&mut self) {
        if !self.committed {
            self.file.take();
            let _ = std::fs::remove_file(&self.staging);
        }
    }
}

/// Write `artifact` to `path` in one step.
pub fn write_artifact(path: &Path, artifact: &HistogramArtifact) -> Result<()> {
    PendingArtifact::create(path)?.commit(artifact)
}

/// Load an artifact written by [`write_artifact`].
pub fn read_artifact(path: &Path) -> Result<HistogramArtifact> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
