use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::RegistryError;

/// Community-maintained list of disposable email domains (JSON array).
pub const DEFAULT_REGISTRY_URL: &str = "https://raw.githubusercontent.com/disposable-email-domains/disposable-email-domains/master/domains.json";

/// Where the disposable-domain list comes from.
#[async_trait]
pub trait DomainListSource: Send + Sync {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<String>, RegistryError>;
}

/// Fetches the list with a single HTTP GET. Anything but `200 OK` is an error.
#[derive(Debug, Clone)]
pub struct HttpListSource {
    client: reqwest::Client,
    url: String,
}

impl HttpListSource {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, RegistryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| RegistryError::ClientInit { source })?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DomainListSource for HttpListSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<String>, RegistryError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| RegistryError::request(&self.url, err))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RegistryError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| RegistryError::request(&self.url, err))?;
        parse_domain_list(&body).map_err(|err| RegistryError::parse(&self.url, err))
    }
}

/// Reads the list from a local JSON file (same format as the remote list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListSource {
    path: PathBuf,
}

impl FileListSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DomainListSource for FileListSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<String>, RegistryError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| RegistryError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_domain_list(&bytes).map_err(|err| RegistryError::parse(self.describe(), err))
    }
}

pub(crate) fn parse_domain_list(bytes: &[u8]) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
