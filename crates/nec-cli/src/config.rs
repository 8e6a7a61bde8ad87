//! Run configuration: optional YAML/JSON file, overridden by command-line flags.

use anyhow::{Context, Result};
use nec_analysis::AnalysisOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunConfig {
    /// Input events (JSON Lines).
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// Output artifact (JSON).
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Stop after this many events.
    #[serde(default)]
    pub max_events: Option<usize>,
    #[serde(flatten)]
    pub analysis: AnalysisOptions,
}

pub fn read_run_config(path: &Path) -> Result<RunConfig> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    let cfg: RunConfig = if ext == "json" {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("invalid JSON config {}", path.display()))?
    } else {
        // Default: YAML (serde_yaml_ng).
        serde_yaml_ng::from_slice(&bytes)
            .with_context(|| format!("invalid YAML config {}", path.display()))?
    };
    Ok(cfg)
}

/// Flag values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub max_events: Option<usize>,
    pub min_q2: Option<f64>,
    pub max_q2: Option<f64>,
    pub n_pow: Option<f64>,
    pub rec_particles: Option<String>,
    pub gen_particles: Option<String>,
    pub threads: Option<usize>,
}

/// Fully resolved, immutable run settings.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub input: PathBuf,
    pub output: PathBuf,
    pub max_events: Option<usize>,
    pub analysis: AnalysisOptions,
}

impl RunConfig {
    pub fn apply(mut self, o: Overrides) -> Result<ResolvedRun> {
        if let Some(v) = o.min_q2 {
            self.analysis.min_q2 = v;
        }
        if let Some(v) = o.max_q2 {
            self.analysis.max_q2 = v;
        }
        if let Some(v) = o.n_pow {
            self.analysis.n_pow = v;
        }
        if let Some(v) = o.rec_particles {
            self.analysis.rec_particles = v;
        }
        if let Some(v) = o.gen_particles {
            self.analysis.gen_particles = v;
        }
        if let Some(v) = o.threads {
            self.analysis.threads = v;
        }
        let Some(input) = o.input.or(self.input) else {
            anyhow::bail!("no input given (use --input or `input:` in the config file)");
        };
        let Some(output) = o.output.or(self.output) else {
            anyhow::bail!("no output given (use --output or `output:` in the config file)");
        };
        Ok(ResolvedRun {
            input,
            output,
            max_events: o.max_events.or(self.max_events),
            analysis: self.analysis,
        })
    }
}
