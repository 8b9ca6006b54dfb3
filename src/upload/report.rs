//! Per-artifact and per-run upload results.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use crate::maven::Coordinate;

/// What happened to one artifact version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Submitted with `assets` files besides the descriptor.
    Uploaded {
        /// Non-descriptor files in the request.
        assets: usize,
    },
    /// Submitted with the descriptor only; every other file was already present.
    Refreshed,
    /// Not submitted.
    Skipped {
        /// Why the artifact was not submitted.
        reason: String,
    },
    /// The submission failed; later artifacts are still processed.
    Failed {
        /// Rendered error, including request context for remote rejections.
        error: String,
    },
}

impl Outcome {
    fn label(&self) -> &'static str {
        match self {
            Self::Uploaded { .. } => "uploaded",
            Self::Refreshed => "descriptor-only",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Result for one artifact version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    /// Coordinate that was processed.
    pub coordinate: Coordinate,
    /// Files included in the submission, in asset order.
    pub files: Vec<String>,
    /// What happened.
    pub outcome: Outcome,
}

/// Aggregate of one run over one repository root.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Identifier attached to every log line of the run.
    pub run_id: Uuid,
    /// Repository root that was scanned.
    pub root: PathBuf,
    /// One entry per selected record, in processing order.
    pub artifacts: Vec<ArtifactReport>,
    /// Records rejected by include patterns.
    pub filtered_out: usize,
    /// Records dropped by the version limit.
    pub discarded: usize,
}

impl RunReport {
    /// Creates an empty report for `root`.
    #[must_use]
    pub fn new(run_id: Uuid, root: PathBuf) -> Self {
        Self { run_id, root, artifacts: Vec::new(), filtered_out: 0, discarded: 0 }
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.artifacts.iter().filter(|a| pred(&a.outcome)).count()
    }

    /// Artifacts submitted with at least one new file.
    #[must_use]
    pub fn uploaded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Uploaded { .. }))
    }

    /// Artifacts submitted with only the descriptor.
    #[must_use]
    pub fn refreshed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Refreshed))
    }

    /// Artifacts not submitted.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    /// Artifacts whose submission failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    /// Renders a summary table followed by totals.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.artifacts.is_empty() {
            let _ = writeln!(out, "No artifacts selected in {}.", self.root.display());
        } else {
            let rows: Vec<(String, &str, String)> = self
                .artifacts
                .iter()
                .map(|a| (a.coordinate.to_string(), a.outcome.label(), a.files.len().to_string()))
                .collect();

            let coord_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(10).max(10);
            let outcome_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(7).max(7);

            let _ = writeln!(out, "{:<coord_width$}  {:<outcome_width$}  FILES", "COORDINATE", "OUTCOME");
            let _ = writeln!(out, "{:-<coord_width$}  {:-<outcome_width$}  -----", "", "");
            for (coordinate, outcome, files) in &rows {
                let _ = writeln!(out, "{coordinate:<coord_width$}  {outcome:<outcome_width$}  {files}");
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(
            out,
            "{} uploaded, {} descriptor-only, {} skipped, {} failed ({} filtered out, {} discarded by limit).",
            self.uploaded(),
            self.refreshed(),
            self.skipped(),
            self.failed(),
            self.filtered_out,
            self.discarded,
        );
        out
    }
}
