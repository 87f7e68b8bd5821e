//! Combining several armored keys into one keyring

use crate::Error;
use sequoia_openpgp::armor::{Kind, Reader, ReaderMode, Writer};
use std::io;

/// How keys fetched from a keyserver get combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Aggregation {
    /// Decode every key and encode all of them into a single armor block.
    ///
    /// The result is one standard armored keyring.
    #[default]
    Armor,
    /// Append the armored keys, as returned by the keyserver.
    ///
    /// The result is a sequence of armor blocks, which only readers processing blocks one after
    /// the other will accept.
    Concatenate,
}

fn armor_error(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Error {
    Error::Armor(io::Error::other(err))
}

/// Collects keys according to an [`Aggregation`].
///
/// Nothing is usable before [`KeyringWriter::finish`] was called. Dropping the writer early
/// discards the keys collected so far.
pub enum KeyringWriter {
    Armor(Writer<Vec<u8>>),
    Concatenate(Vec<u8>),
}

impl KeyringWriter {
    pub fn new(aggregation: Aggregation) -> Result<Self, Error> {
        Ok(match aggregation {
            Aggregation::Armor => {
                Self::Armor(Writer::new(Vec::new(), Kind::PublicKey).map_err(armor_error)?)
            }
            Aggregation::Concatenate => Self::Concatenate(Vec::new()),
        })
    }

    /// Add an armored key.
    pub fn add(&mut self, armored: &[u8]) -> Result<(), Error> {
        match self {
            Self::Armor(writer) => {
                let mut reader =
                    Reader::from_reader(armored, ReaderMode::Tolerant(Some(Kind::PublicKey)));
                let len = io::copy(&mut reader, writer).map_err(Error::Armor)?;
                log::debug!("Copied {len} bytes of key material");
            }
            Self::Concatenate(buf) => {
                buf.extend_from_slice(armored);
            }
        }

        Ok(())
    }

    /// Close the keyring, returning its bytes.
    ///
    /// A keyring without any keys is empty for both aggregations.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        match self {
            Self::Armor(writer) => writer.finalize().map_err(armor_error),
            Self::Concatenate(buf) => Ok(buf),
        }
    }
}
