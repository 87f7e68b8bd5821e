use crate::Error;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

/// Exactly 40 hex characters, the length of a v4 fingerprint.
static FINGERPRINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{40}$").expect("fingerprint pattern must compile"));

/// The fingerprint of an OpenPGP key, as used for keyserver lookups.
///
/// The value is kept exactly as provided, including its case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Validate and wrap a fingerprint.
    pub fn new(fingerprint: impl Into<String>) -> Result<Self, Error> {
        let fingerprint = fingerprint.into();
        match FINGERPRINT.is_match(&fingerprint) {
            true => Ok(Self(fingerprint)),
            false => Err(Error::InvalidKeyId),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value of the `search` parameter of a lookup for this key.
    pub fn search(&self) -> String {
        format!("0x{}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Fingerprint {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
