//! Live adapter for the `ArtifactRepository` port using the Nexus 3 REST API.

use reqwest::blocking::{multipart::Form, Client, RequestBuilder};
use reqwest::StatusCode;

use crate::config::RemoteConfig;
use crate::error::SubmitError;
use crate::ports::repository::{ArtifactRepository, Existence, Submission};

/// Form field namespace of the maven2 repository format.
const FORMAT: &str = "maven2";

/// Talks to a Nexus Repository Manager 3 server over HTTP.
pub struct Nexus3Repository {
    client: Client,
    remote: RemoteConfig,
}

impl Nexus3Repository {
    /// Creates a client for the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. TLS backend
    /// initialisation fails).
    pub fn new(remote: RemoteConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, remote })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.remote.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }

    /// Builds the multipart body. Files are opened here and closed when the
    /// form is dropped with its request.
    fn form(submission: &Submission) -> Result<Form, SubmitError> {
        let mut form = Form::new().text(format!("{FORMAT}.generate-pom"), "false");
        for asset in &submission.assets {
            let field = format!("{FORMAT}.asset{}", asset.number);
            form = form
                .file(field.clone(), &asset.path)
                .map_err(|source| SubmitError::Io { path: asset.path.clone(), source })?
                .text(format!("{field}.extension"), asset.extension.clone());
            if let Some(classifier) = &asset.classifier {
                form = form.text(format!("{field}.classifier"), classifier.clone());
            }
        }
        Ok(form)
    }
}

impl ArtifactRepository for Nexus3Repository {
    fn check_exists(&self, asset_path: &str) -> Existence {
        let url = self.remote.asset_url(asset_path);
        tracing::debug!(%url, "Checking for");
        match self.authorize(self.client.head(&url)).send() {
            Ok(response) => match response.status() {
                StatusCode::NOT_FOUND => Existence::Missing,
                StatusCode::OK => Existence::Present,
                other => Existence::Indeterminate(format!("unexpected status {}", other.as_u16())),
            },
            Err(e) => Existence::Indeterminate(e.to_string()),
        }
    }

    fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
        let url = self.remote.components_url();
        let form = Self::form(submission)?;

        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .map_err(|source| SubmitError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if status.as_u16() > 299 {
            let body = response.text().unwrap_or_default();
            return Err(SubmitError::Rejected { url, status: status.as_u16(), body });
        }
        Ok(())
    }
}
