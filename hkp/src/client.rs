//! The keyserver client

use crate::{
    Error,
    fingerprint::Fingerprint,
    keyring::{Aggregation, KeyringWriter},
    url::lookup_url,
};
use bytes::Bytes;
use hkp_common::{
    fetcher::{Fetched, Fetcher, FetcherOptions, Transport},
    progress::{Progress, ProgressBar},
};
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// The keyserver used when none is configured.
pub const DEFAULT_KEYSERVER: &str = "keyserver.ubuntu.com";

/// A client for an HKP keyserver.
///
/// Requests are performed one after the other, a client doesn't run requests in parallel.
/// Cancelling is done by dropping the future of an operation, for example using
/// [`tokio::time::timeout`](https://docs.rs/tokio/latest/tokio/time/fn.timeout.html). This
/// aborts the request in flight, and no further keys get fetched.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    keyserver: String,
    aggregation: Aggregation,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("keyserver", &self.keyserver)
            .field("aggregation", &self.aggregation)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client using the default settings.
    pub async fn new() -> Result<Self, Error> {
        Self::builder().build().await
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The configured keyserver endpoint.
    pub fn keyserver(&self) -> &str {
        &self.keyserver
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Retrieve the armored key with the provided fingerprint.
    ///
    /// The fingerprint must consist of exactly 40 hex characters, otherwise the call fails with
    /// [`Error::InvalidKeyId`] without contacting the keyserver. Any non-success response of the
    /// keyserver is reported as [`Error::KeyNotFound`].
    ///
    /// On success, the response body is returned as is.
    pub async fn get_key(&self, fingerprint: &str) -> Result<Bytes, Error> {
        let fingerprint = Fingerprint::new(fingerprint)?;
        self.fetch(&fingerprint).await
    }

    /// Retrieve the key of an already validated fingerprint.
    pub async fn fetch(&self, fingerprint: &Fingerprint) -> Result<Bytes, Error> {
        let search = fingerprint.search();
        let url = lookup_url(
            &self.keyserver,
            &["op", "get", "options", "mr", "search", search.as_str()],
        )?;

        log::debug!("Requesting key {fingerprint}: {url}");

        match self.transport.get(url).await? {
            Fetched::Success(body) => Ok(body),
            Fetched::Status(status) => {
                log::info!("Keyserver responded with {status} for key {fingerprint}");
                Err(Error::KeyNotFound)
            }
        }
    }

    /// Retrieve several keys, combining them according to the configured [`Aggregation`].
    ///
    /// Keys are fetched in the provided order. The first failure aborts the operation, and is
    /// reported as [`Error::Key`], naming the fingerprint which failed.
    pub async fn get_keys<I>(&self, fingerprints: I) -> Result<Vec<u8>, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.get_keys_with_progress(fingerprints, ()).await
    }

    /// Same as [`Client::get_keys`], reporting progress.
    pub async fn get_keys_with_progress<I, P>(
        &self,
        fingerprints: I,
        progress: P,
    ) -> Result<Vec<u8>, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        P: Progress,
    {
        let fingerprints = fingerprints.into_iter().collect::<Vec<_>>();

        let mut bar = progress.start(fingerprints.len());
        let result = self.collect(&fingerprints, &mut bar).await;
        bar.finish();

        result
    }

    async fn collect<S, B>(&self, fingerprints: &[S], bar: &mut B) -> Result<Vec<u8>, Error>
    where
        S: AsRef<str>,
        B: ProgressBar,
    {
        let mut keyring = KeyringWriter::new(self.aggregation)?;

        for fingerprint in fingerprints {
            let fingerprint = fingerprint.as_ref();
            bar.retrieving(fingerprint);

            let key = self
                .get_key(fingerprint)
                .await
                .map_err(|err| err.for_key(fingerprint))?;
            keyring
                .add(&key)
                .map_err(|err| err.for_key(fingerprint))?;

            bar.retrieved();
        }

        keyring.finish()
    }
}

/// Configuration of a [`Client`].
pub struct ClientBuilder {
    keyserver: String,
    aggregation: Aggregation,
    options: FetcherOptions,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            keyserver: DEFAULT_KEYSERVER.to_string(),
            aggregation: Aggregation::default(),
            options: FetcherOptions::default(),
            transport: None,
        }
    }
}

impl ClientBuilder {
    /// Set the keyserver, either a host or a URL.
    pub fn keyserver(mut self, keyserver: impl Into<String>) -> Self {
        self.keyserver = keyserver.into();
        self
    }

    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Replace all options of the HTTP fetcher.
    pub fn fetcher_options(mut self, options: FetcherOptions) -> Self {
        self.options = options;
        self
    }

    pub fn timeout(mut self, timeout: impl Into<Duration>) -> Self {
        self.options = self.options.timeout(timeout);
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: impl Into<Duration>) -> Self {
        self.options = self.options.connect_timeout(connect_timeout);
        self
    }

    pub fn additional_root_certificate(mut self, certificate: impl Into<PathBuf>) -> Self {
        self.options = self.options.add_additional_root_certificate(certificate);
        self
    }

    /// Use an alternate pool of keyservers, trusted only through the provided CA bundle.
    pub fn pool(mut self, keyserver: impl Into<String>, ca_bundle: impl Into<PathBuf>) -> Self {
        self.keyserver = keyserver.into();
        self.options = self.options.ca_bundle(ca_bundle);
        self
    }

    /// Use an existing HTTP client.
    ///
    /// This ignores the fetcher options.
    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.transport(Fetcher::from(client))
    }

    /// Use a custom transport.
    ///
    /// This ignores the fetcher options.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub async fn build(self) -> Result<Client, Error> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                Fetcher::new(self.options)
                    .await
                    .map_err(Error::Setup)?,
            ),
        };

        Ok(Client {
            transport,
            keyserver: self.keyserver,
            aggregation: self.aggregation,
        })
    }
}

/// Retrieve a key from the default keyserver.
pub async fn get_key(fingerprint: &str) -> Result<Bytes, Error> {
    Client::new().await?.get_key(fingerprint).await
}

/// Retrieve several keys from the default keyserver, as one armored keyring.
pub async fn get_keys<I>(fingerprints: I) -> Result<Vec<u8>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Client::new().await?.get_keys(fingerprints).await
}
