//! Upload orchestration: decide which files each artifact needs and submit
//! them in one request.

mod report;

pub use report::{ArtifactReport, Outcome, RunReport};

use crate::maven::ArtifactRecord;
use crate::ports::{ArtifactRepository, Existence, Submission};
use crate::select::Selection;

/// Walks a selection and publishes each record through an [`ArtifactRepository`].
pub struct Uploader<'a> {
    remote: &'a dyn ArtifactRepository,
    force: bool,
}

impl<'a> Uploader<'a> {
    /// Creates an uploader. With `force` set, existence checks are skipped
    /// and every file is sent.
    #[must_use]
    pub fn new(remote: &'a dyn ArtifactRepository, force: bool) -> Self {
        Self { remote, force }
    }

    /// Uploads every selected record in order, appending one report per
    /// record to `run`. A failed artifact never stops the run.
    pub fn upload_all(&self, selection: &Selection, run: &mut RunReport) {
        let total = selection.total();
        for (index, record) in selection.records().enumerate() {
            tracing::info!("Processing: {}, {}/{total}", record.coordinate, index + 1);
            run.artifacts.push(self.upload(record));
        }
        run.filtered_out = selection.filtered_out;
        run.discarded = selection.discarded;
    }

    /// Stages and submits one record.
    pub fn upload(&self, record: &ArtifactRecord) -> ArtifactReport {
        if !record.coordinate.is_well_formed() {
            tracing::warn!(location = %record.location.display(), "Skipping malformed coordinate");
            return ArtifactReport {
                coordinate: record.coordinate.clone(),
                files: Vec::new(),
                outcome: Outcome::Skipped { reason: "malformed coordinate".into() },
            };
        }

        let submission = self.stage(record);
        let files = submission.assets.iter().map(|a| a.file_name.clone()).collect();

        let outcome = match self.remote.submit(&submission) {
            Ok(()) => {
                tracing::info!(
                    coordinate = %record.coordinate,
                    assets = submission.assets.len(),
                    "Uploaded"
                );
                match submission.extra_assets() {
                    0 => Outcome::Refreshed,
                    assets => Outcome::Uploaded { assets },
                }
            }
            Err(e) => {
                tracing::error!(coordinate = %record.coordinate, "Upload failed: {e}");
                Outcome::Failed { error: e.to_string() }
            }
        };

        ArtifactReport { coordinate: record.coordinate.clone(), files, outcome }
    }

    /// Builds the submission: descriptor first, then the primary file and
    /// each classifier file that is forced or missing remotely.
    fn stage(&self, record: &ArtifactRecord) -> Submission {
        let mut submission = Submission::new(
            record.coordinate.clone(),
            &record.descriptor,
            record.local_path(&record.descriptor),
        );

        if let Some(primary) = &record.primary {
            if self.wanted(record, primary) {
                submission.push(primary, record.local_path(primary), None);
            }
        }

        for (classifier, files) in &record.classifiers {
            for file in files {
                if self.wanted(record, file) {
                    submission.push(file, record.local_path(file), Some(classifier));
                }
            }
        }

        submission
    }

    fn wanted(&self, record: &ArtifactRecord, file: &str) -> bool {
        if self.force {
            return true;
        }
        let path = record.remote_path(file);
        let existence = self.remote.check_exists(&path);
        match &existence {
            Existence::Missing => tracing::debug!("Missing remotely: {path}"),
            Existence::Present => tracing::info!("Skipping {path}, already exists"),
            Existence::Indeterminate(reason) => tracing::warn!("Assuming {path} exists: {reason}"),
        }
        existence.needs_upload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitError;
    use crate::maven::Coordinate;
    use chrono::{DateTime, Utc};
    use std::collections::{BTreeMap, HashMap};
    use std::num::NonZeroUsize;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// In-memory server: answers existence from a map and remembers submissions.
    #[derive(Default)]
    struct FakeRepository {
        answers: HashMap<String, Existence>,
        fail_for: Option<String>,
        checks: Mutex<Vec<String>>,
        submitted: Mutex<Vec<Submission>>,
    }

    impl FakeRepository {
        fn all_present() -> Self {
            Self::default()
        }

        fn submitted(&self) -> Vec<Submission> {
            self.submitted.lock().unwrap().clone()
        }
    }

    impl ArtifactRepository for FakeRepository {
        fn check_exists(&self, asset_path: &str) -> Existence {
            self.checks.lock().unwrap().push(asset_path.to_string());
            self.answers.get(asset_path).cloned().unwrap_or(Existence::Present)
        }

        fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
            self.submitted.lock().unwrap().push(submission.clone());
            if self.fail_for.as_deref() == Some(submission.coordinate.version.as_str()) {
                return Err(SubmitError::Rejected {
                    url: "http://nexus/service/rest/v1/components?repository=r".into(),
                    status: 400,
                    body: "nope".into(),
                });
            }
            Ok(())
        }
    }

    fn record(group: &str, version: &str) -> ArtifactRecord {
        let coordinate = Coordinate {
            group_id: group.into(),
            artifact_id: "widget".into(),
            version: version.into(),
        };
        ArtifactRecord {
            location: PathBuf::from(format!("/m2/com/acme/widget/{version}")),
            descriptor: format!("widget-{version}.pom"),
            coordinate,
            primary: Some(format!("widget-{version}.jar")),
            classifiers: BTreeMap::from([
                ("sources".to_string(), vec![format!("widget-{version}-sources.jar")]),
                (
                    "linux-x86_64".to_string(),
                    vec![
                        format!("widget-{version}-linux-x86_64.jar"),
                        format!("widget-{version}-linux-x86_64.exe"),
                    ],
                ),
            ]),
            modified: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn selection_of(records: Vec<ArtifactRecord>) -> Selection {
        crate::select::select(records, &crate::select::IncludePatterns::default(), None)
    }

    fn missing(paths: &[String]) -> HashMap<String, Existence> {
        paths.iter().map(|p| (p.clone(), Existence::Missing)).collect()
    }

    #[test]
    fn numbers_assets_contiguously_with_metadata() {
        let r = record("com.acme", "1.0");
        let repo = FakeRepository {
            answers: missing(&[
                r.remote_path("widget-1.0.jar"),
                r.remote_path("widget-1.0-sources.jar"),
            ]),
            ..FakeRepository::default()
        };

        let report = Uploader::new(&repo, false).upload(&r);
        assert_eq!(report.outcome, Outcome::Uploaded { assets: 2 });

        let submitted = repo.submitted();
        let assets = &submitted[0].assets;
        let numbers: Vec<_> = assets.iter().map(|a| a.number).collect();
        assert_eq!(numbers, [1, 2, 3]);
        assert_eq!(assets[0].file_name, "widget-1.0.pom");
        assert_eq!(assets[0].extension, "pom");
        assert_eq!(assets[1].file_name, "widget-1.0.jar");
        assert_eq!(assets[1].classifier, None);
        assert_eq!(assets[2].extension, "jar");
        assert_eq!(assets[2].classifier.as_deref(), Some("sources"));
    }

    #[test]
    fn descriptor_is_never_checked() {
        let r = record("com.acme", "1.0");
        let repo = FakeRepository::all_present();
        let _ = Uploader::new(&repo, false).upload(&r);
        let checks = repo.checks.lock().unwrap();
        assert_eq!(checks.len(), 4);
        assert!(checks.iter().all(|c| !c.ends_with(".pom")));
    }

    #[test]
    fn second_run_against_full_server_sends_descriptor_only() {
        let records = vec![record("com.acme", "1.0"), record("com.acme", "2.0")];
        let first = FakeRepository {
            answers: records
                .iter()
                .flat_map(|r| {
                    [r.primary.clone().unwrap()]
                        .into_iter()
                        .chain(r.classifiers.values().flatten().cloned())
                        .map(|f| (r.remote_path(&f), Existence::Missing))
                        .collect::<Vec<_>>()
                })
                .collect(),
            ..FakeRepository::default()
        };
        let mut run = RunReport::new(Uuid::nil(), PathBuf::from("/m2"));
        Uploader::new(&first, false).upload_all(&selection_of(records.clone()), &mut run);
        assert_eq!(run.uploaded(), 2);
        assert!(first.submitted().iter().all(|s| s.assets.len() == 5));

        let second = FakeRepository::all_present();
        let mut run = RunReport::new(Uuid::nil(), PathBuf::from("/m2"));
        Uploader::new(&second, false).upload_all(&selection_of(records), &mut run);
        assert_eq!(run.refreshed(), 2);
        let submitted = second.submitted();
        assert_eq!(submitted.len(), 2);
        assert!(submitted.iter().all(|s| s.assets.len() == 1 && s.extra_assets() == 0));
    }

    #[test]
    fn force_includes_everything_without_checking() {
        let r = record("com.acme", "1.0");
        let repo = FakeRepository::all_present();
        let report = Uploader::new(&repo, true).upload(&r);

        assert_eq!(report.outcome, Outcome::Uploaded { assets: 4 });
        assert!(repo.checks.lock().unwrap().is_empty());
        let submitted = repo.submitted();
        let exe = submitted[0].assets.iter().find(|a| a.extension == "exe").unwrap();
        assert_eq!(exe.classifier.as_deref(), Some("linux-x86_64"));
        assert_eq!(report.files.len(), 5);
    }

    #[test]
    fn classifier_assets_follow_classifier_name_order() {
        let repo = FakeRepository::default();
        let _ = Uploader::new(&repo, true).upload(&record("com.acme", "1.0"));
        let submitted = repo.submitted();
        let order: Vec<_> =
            submitted[0].assets.iter().map(|a| (a.number, a.file_name.as_str())).collect();
        assert_eq!(
            order,
            [
                (1, "widget-1.0.pom"),
                (2, "widget-1.0.jar"),
                (3, "widget-1.0-linux-x86_64.jar"),
                (4, "widget-1.0-linux-x86_64.exe"),
                (5, "widget-1.0-sources.jar"),
            ]
        );
    }

    #[test]
    fn indeterminate_existence_counts_as_present() {
        let r = record("com.acme", "1.0");
        let repo = FakeRepository {
            answers: [(r.remote_path("widget-1.0.jar"), Existence::Indeterminate("503".into()))]
                .into_iter()
                .collect(),
            ..FakeRepository::default()
        };
        let report = Uploader::new(&repo, false).upload(&r);
        assert_eq!(report.outcome, Outcome::Refreshed);
    }

    #[test]
    fn failure_does_not_stop_the_run() {
        let repo = FakeRepository { fail_for: Some("1.0".into()), ..FakeRepository::default() };
        let records = vec![record("com.acme", "1.0"), record("com.acme", "2.0")];
        let mut run = RunReport::new(Uuid::nil(), PathBuf::from("/m2"));
        Uploader::new(&repo, false).upload_all(&selection_of(records), &mut run);

        assert_eq!(run.artifacts.len(), 2);
        assert_eq!(run.failed(), 1);
        assert_eq!(run.refreshed(), 1);
        let Outcome::Failed { error } = &run.artifacts[0].outcome else {
            panic!("expected failure, got {:?}", run.artifacts[0].outcome);
        };
        assert!(error.contains("code=400"));
        assert!(error.contains("msg=nope"));
    }

    #[test]
    fn malformed_coordinate_is_skipped() {
        let repo = FakeRepository::default();
        let report = Uploader::new(&repo, false).upload(&record("", "1.0"));
        assert_eq!(report.outcome, Outcome::Skipped { reason: "malformed coordinate".into() });
        assert!(repo.submitted().is_empty());
    }

    #[test]
    fn run_report_carries_selection_counts() {
        let repo = FakeRepository::default();
        let records =
            vec![record("com.acme", "1.0"), record("com.acme", "2.0"), record("org.other", "1.0")];
        let patterns =
            crate::select::IncludePatterns::compile(Some(r"com\.acme"), None, None).unwrap();
        let selection = crate::select::select(records, &patterns, NonZeroUsize::new(1));
        let mut run = RunReport::new(Uuid::nil(), PathBuf::from("/m2"));
        Uploader::new(&repo, false).upload_all(&selection, &mut run);

        assert_eq!(run.artifacts.len(), 1);
        assert_eq!(run.filtered_out, 1);
        assert_eq!(run.discarded, 1);
    }
}
