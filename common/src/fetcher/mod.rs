//! Fetching remote resources

mod data;
pub use data::*;

use crate::utils::pem::add_cert;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, header};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("hkp/", env!("CARGO_PKG_VERSION"));

/// Performing a single GET request.
///
/// This is the seam used by the keyserver client. The default implementation is the
/// [`Fetcher`], tests or callers with special needs can provide their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> Result<Fetched, Error>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: Url) -> Result<Fetched, Error> {
        (**self).get(url).await
    }
}

/// Fetch data using HTTP.
///
/// This is a thin layer on top of an HTTP client. There are no retries, every call to
/// [`Transport::get`] results in exactly one request.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
}

/// Error when retrieving
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Transport error: {0}")]
    Transport(anyhow::Error),
}

/// Options for the [`Fetcher`]
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct FetcherOptions {
    pub timeout: Duration,
    pub connect_timeout: Option<Duration>,
    /// Root certificates to trust in addition to the system trust store.
    pub additional_root_certificates: Vec<PathBuf>,
    /// A CA bundle replacing the system trust store.
    pub ca_bundle: Option<PathBuf>,
}

impl FetcherOptions {
    /// Create a new instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: impl Into<Duration>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, connect_timeout: impl Into<Duration>) -> Self {
        self.connect_timeout = Some(connect_timeout.into());
        self
    }

    pub fn add_additional_root_certificate(
        mut self,
        additional_root_certificate: impl Into<PathBuf>,
    ) -> Self {
        self.additional_root_certificates
            .push(additional_root_certificate.into());
        self
    }

    pub fn extend_additional_root_certificates<I>(mut self, additional_root_certificates: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.additional_root_certificates
            .extend(additional_root_certificates);
        self
    }

    /// Only trust the certificates of the provided CA bundle.
    pub fn ca_bundle(mut self, ca_bundle: impl Into<PathBuf>) -> Self {
        self.ca_bundle = Some(ca_bundle.into());
        self
    }
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: None,
            additional_root_certificates: vec![],
            ca_bundle: None,
        }
    }
}

impl From<Client> for Fetcher {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher {
    /// Create a new fetcher from options
    pub async fn new(options: FetcherOptions) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        let mut client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(options.timeout);

        if let Some(connect_timeout) = options.connect_timeout {
            client = client.connect_timeout(connect_timeout);
        }

        if let Some(ca_bundle) = &options.ca_bundle {
            log::debug!("Replacing system trust store with: {}", ca_bundle.display());
            client = add_cert(client.tls_built_in_root_certs(false), ca_bundle)?;
        }

        for cert in &options.additional_root_certificates {
            client = add_cert(client, cert)?;
        }

        Ok(client.build()?.into())
    }

    async fn fetch_once(&self, url: Url) -> Result<Fetched, Error> {
        let response = self.client.request(Method::GET, url).send().await?;

        Ok(Fetched::from_response(response).await?)
    }
}

#[async_trait]
impl Transport for Fetcher {
    async fn get(&self, url: Url) -> Result<Fetched, Error> {
        log::debug!("Fetching: {url}");
        self.fetch_once(url).await
    }
}
