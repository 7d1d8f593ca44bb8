//! User directory answered by a remote user registry over HTTP.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::binding::ports::{UserDirectory, UserDirectoryError, UserDirectoryResult};
use crate::config::UserDirectoryConfig;

/// Queries `GET {base_url}/users?email=<email>` on a remote registry.
///
/// `200` means the user exists and `404` means it does not. Transport
/// failures and `5xx` answers are retried up to the configured number of
/// attempts; every other status is an error.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: reqwest::Client,
    users_url: Url,
    max_attempts: u32,
    retry_backoff: Duration,
}

impl HttpUserDirectory {
    /// Builds a directory client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::InvalidBaseUrl`] when the base URL does
    /// not parse or cannot carry a path, and
    /// [`UserDirectoryError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: &UserDirectoryConfig) -> UserDirectoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            users_url: users_endpoint(&config.base_url)?,
            max_attempts: config.max_attempts.max(1),
            retry_backoff: config.retry_backoff,
        })
    }

    async fn probe(&self, url: &Url) -> UserDirectoryResult<bool> {
        let response = self.client.get(url.clone()).send().await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(UserDirectoryError::UnexpectedStatus(other.as_u16())),
        }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    #[instrument(name = "taskmanager.binding.directory.exists", skip_all)]
    async fn exists(&self, email: &str) -> UserDirectoryResult<bool> {
        let mut url = self.users_url.clone();
        url.query_pairs_mut().append_pair("email", email);

        let mut attempt = 1;
        loop {
            match self.probe(&url).await {
                Ok(found) => {
                    debug!(attempt, found, "user directory answered");
                    return Ok(found);
                }
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(attempt, error = %err, "user directory lookup failed, retrying");
                    tokio::time::sleep(self.retry_backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Appends the `users` segment to `base_url`, keeping any existing path.
fn users_endpoint(base_url: &str) -> UserDirectoryResult<Url> {
    let mut url =
        Url::parse(base_url).map_err(|err| UserDirectoryError::InvalidBaseUrl(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| UserDirectoryError::InvalidBaseUrl(base_url.to_owned()))?
        .pop_if_empty()
        .push("users");
    Ok(url)
}
