//! `--dry-run`: print what would be uploaded without touching the network.

use std::fmt::Write as _;

use crate::config::UploadConfig;
use crate::maven;
use crate::select::{self, Selection};

/// Scan and select `config.root`, then print the selection.
pub fn run(config: &UploadConfig) {
    let records = maven::scan(&config.root, &config.layout);
    let selection = select::select(records, &config.patterns, config.limit);
    print!("{}", render(config, &selection));
}

/// Renders the selection grouped by artifact key.
#[must_use]
pub fn render(config: &UploadConfig, selection: &Selection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", config.root.display());
    for (key, records) in &selection.groups {
        let _ = writeln!(out, "  {key}");
        for record in records {
            let _ = writeln!(out, "    {}", record.coordinate.version);
            let _ = writeln!(out, "      {}", record.descriptor);
            if let Some(primary) = &record.primary {
                let _ = writeln!(out, "      {primary}");
            }
            for (classifier, files) in &record.classifiers {
                for file in files {
                    let _ = writeln!(out, "      {file} [{classifier}]");
                }
            }
        }
    }
    let _ = writeln!(
        out,
        "\n{} artifact(s) selected ({} filtered out, {} discarded by limit).",
        selection.total(),
        selection.filtered_out,
        selection.discarded,
    );
    out
}
