//! `nexus-uploader` upload run over one repository root.

use uuid::Uuid;

use crate::config::UploadConfig;
use crate::context::ServiceContext;
use crate::maven;
use crate::select;
use crate::upload::{RunReport, Uploader};

/// Scan `config.root`, select records and upload them through `ctx`.
///
/// Every log line emitted during the run carries the run id and root.
#[must_use]
pub fn run(config: &UploadConfig, ctx: &ServiceContext) -> RunReport {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id, root = %config.root.display());
    let _entered = span.enter();

    tracing::info!(
        target_repository = %config.remote.repository_id,
        url = %config.remote.base_url,
        "Starting upload"
    );

    let records = maven::scan(&config.root, &config.layout);
    let selection = select::select(records, &config.patterns, config.limit);
    tracing::info!(
        selected = selection.total(),
        filtered_out = selection.filtered_out,
        discarded = selection.discarded,
        "Selection complete"
    );

    let mut report = RunReport::new(run_id, config.root.clone());
    Uploader::new(ctx.remote.as_ref(), config.force_upload).upload_all(&selection, &mut report);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;
    use crate::error::SubmitError;
    use crate::maven::AssetLayout;
    use crate::ports::{ArtifactRepository, Existence, Submission};
    use crate::select::IncludePatterns;
    use std::sync::{Arc, Mutex};

    struct Capture(Arc<Mutex<Vec<Submission>>>);

    impl ArtifactRepository for Capture {
        fn check_exists(&self, _asset_path: &str) -> Existence {
            Existence::Missing
        }

        fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
            self.0.lock().unwrap().push(submission.clone());
            Ok(())
        }
    }

    #[test]
    fn uploads_every_descriptor_under_root() {
        let dir = tempfile::tempdir().unwrap();
        for version in ["1.0", "2.0"] {
            let vdir = dir.path().join("com/acme/widget").join(version);
            std::fs::create_dir_all(&vdir).unwrap();
            std::fs::write(vdir.join(format!("widget-{version}.pom")), "<project/>").unwrap();
            std::fs::write(vdir.join(format!("widget-{version}.jar")), "jar").unwrap();
        }

        let config = UploadConfig {
            root: dir.path().to_path_buf(),
            remote: RemoteConfig::new("http://localhost:8081", "releases", None).unwrap(),
            patterns: IncludePatterns::default(),
            force_upload: false,
            layout: AssetLayout::default(),
            limit: None,
        };
        let submitted = Arc::new(Mutex::new(Vec::new()));
        let ctx = ServiceContext::with_remote(Box::new(Capture(Arc::clone(&submitted))));

        let report = run(&config, &ctx);
        assert_eq!(report.uploaded(), 2);
        assert_eq!(report.root, dir.path());
        let submitted = submitted.lock().unwrap();
        assert_eq!(submitted.len(), 2);
        assert_eq!(submitted[0].coordinate.to_string(), "com.acme:widget:1.0");
        assert_eq!(submitted[1].assets[1].file_name, "widget-2.0.jar");
    }
}
