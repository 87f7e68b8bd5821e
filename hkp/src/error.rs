/// Errors of the keyserver client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid key id")]
    InvalidKeyId,
    #[error("invalid params")]
    InvalidParams,
    #[error("invalid scheme")]
    InvalidScheme,
    #[error("key not found")]
    KeyNotFound,
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Transport(#[from] hkp_common::fetcher::Error),
    #[error("armor error: {0}")]
    Armor(#[source] std::io::Error),
    #[error("client setup: {0}")]
    Setup(anyhow::Error),
    #[error("key {fingerprint}: {source}")]
    Key {
        fingerprint: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the fingerprint of the key the error happened for.
    pub(crate) fn for_key(self, fingerprint: &str) -> Self {
        Self::Key {
            fingerprint: fingerprint.to_string(),
            source: Box::new(self),
        }
    }

    /// The error without any key context.
    pub fn root(&self) -> &Error {
        match self {
            Self::Key { source, .. } => source.root(),
            other => other,
        }
    }

    /// The fingerprint of the key which failed, if known.
    pub fn fingerprint(&self) -> Option<&str> {
        match self {
            Self::Key { fingerprint, .. } => Some(fingerprint),
            _ => None,
        }
    }
}
