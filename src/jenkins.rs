use reqwest::Client;
use thiserror::Error;

/// Failure of a Jenkins build invocation.
///
/// `Display` is the underlying message unmodified; the handler embeds it
/// verbatim in the chat reply.
#[derive(Debug, Error)]
pub enum JenkinsError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Remote(String),
}

/// Thin client for the Jenkins job-trigger API.
///
/// Holds the base URL and basic-auth credentials alongside a shared
/// `reqwest::Client`; cheap to clone and safe for concurrent use.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    client: Client,
    base_url: String,
    user: String,
    token: String,
}

impl JenkinsClient {
    pub fn new(base_url: &str, user: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            token: token.to_string(),
        }
    }

    /// Start the `{service}-{environment}` job.
    ///
    /// Exactly one `POST {base}/job/{name}/build`; no retry, no
    /// deduplication. A second call with the same arguments starts a second
    /// independent build. On success the opaque response body is returned
    /// (Jenkins normally answers `201 Created` with an empty body and a
    /// queue `Location` header).
    pub async fn trigger_build(
        &self,
        environment: &str,
        service: &str,
    ) -> Result<String, JenkinsError> {
        let job = job_name(environment, service);
        let url = format!("{}/job/{}/build", self.base_url, job);
        tracing::debug!(job = %job, "triggering jenkins build");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user, Some(&self.token))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(JenkinsError::Remote(message));
        }

        Ok(body)
    }
}

/// Jenkins job key for an environment/service pair.
pub fn job_name(environment: &str, service: &str) -> String {
    format!("{service}-{environment}")
}
