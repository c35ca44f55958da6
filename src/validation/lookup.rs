//! Remote dictionary lookup.

use super::error::LookupError;
use crate::config::DictionarySettings;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// A service that can tell whether a word exists.
#[async_trait::async_trait]
pub trait DictionaryLookup: Send + Sync {
    /// Looks up an already lowercased word.
    ///
    /// Returns `Ok(true)` when the service knows the word, `Ok(false)` when it
    /// answered but does not, and an error when no answer was obtained.
    async fn lookup(&self, word: &str) -> Result<bool, LookupError>;
}

/// Dictionary lookup over HTTP.
///
/// Issues `GET {base_url}{word}`; any 2xx status means the word exists.
#[derive(Debug, Clone)]
pub struct HttpDictionary {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDictionary {
    /// Creates a lookup against `base_url` with a default client.
    #[instrument(skip(base_url), fields(base_url = %base_url))]
    pub fn new(base_url: &str) -> Result<Self, LookupError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a lookup using an existing client.
    #[instrument(skip(client, base_url), fields(base_url = %base_url))]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| LookupError::new(format!("Invalid dictionary URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::new(format!(
                "Dictionary URL '{}' cannot take path segments",
                base_url
            )));
        }
        info!(base_url = %base_url, "Created HTTP dictionary");
        Ok(Self { client, base_url })
    }

    /// Creates a lookup from configuration, applying the optional timeout.
    #[instrument(skip(settings), fields(base_url = %settings.base_url()))]
    pub fn from_settings(settings: &DictionarySettings) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs() {
            debug!(secs, "Applying lookup timeout");
            builder = builder.timeout(Duration::from_secs(*secs));
        }
        let client = builder.build()?;
        Self::with_client(client, settings.base_url())
    }

    /// URL queried for `word`.
    #[instrument(skip(self))]
    pub fn url_for(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url
    }
}

#[async_trait::async_trait]
impl DictionaryLookup for HttpDictionary {
    #[instrument(skip(self))]
    async fn lookup(&self, word: &str) -> Result<bool, LookupError> {
        let url = self.url_for(word);
        debug!(url = %url, "Querying dictionary");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(status = %status, "Dictionary responded");

        Ok(status.is_success())
    }
}
