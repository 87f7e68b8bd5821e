//! A client for the HTTP Keyserver Protocol (HKP)
//!
//! The client looks up OpenPGP public keys by their fingerprint, and can combine several keys
//! into a single armored keyring.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hkp_client::{Aggregation, Client};
//!
//! async fn fetch() -> anyhow::Result<()> {
//!     let client = Client::builder()
//!         .keyserver("hkps://keyserver.ubuntu.com")
//!         .aggregation(Aggregation::Armor)
//!         .build()
//!         .await?;
//!
//!     let keyring = client
//!         .get_keys([
//!             "4ED778F539E3634C779C87C6D7062848A1AB005C",
//!             "94AE36675C464D64BAFA68DD7434390BDBE9B9C5",
//!         ])
//!         .await?;
//!
//!     std::io::Write::write_all(&mut std::io::stdout(), &keyring)?;
//!
//!     Ok(())
//! }
//! ```
#![deny(clippy::unwrap_used)]

pub mod client;
pub mod fingerprint;
pub mod keyring;
pub mod url;

mod error;

pub use client::{Client, ClientBuilder, DEFAULT_KEYSERVER, get_key, get_keys};
pub use error::Error;
pub use fingerprint::Fingerprint;
pub use keyring::Aggregation;
