pub mod get;
pub mod url;

use hkp_client::{Aggregation, Client, DEFAULT_KEYSERVER};
use hkp_common::cli::client::ClientArguments;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(next_help_heading = "Keyserver")]
pub struct KeyserverArguments {
    /// The keyserver to query, either a host or a URL.
    #[arg(short, long, env = "HKP_KEYSERVER", default_value = DEFAULT_KEYSERVER)]
    pub keyserver: String,

    /// Only trust this CA bundle (PEM) for the keyserver, replacing the system trust store.
    #[arg(long)]
    pub ca_bundle: Option<PathBuf>,

    /// Append the keys as returned by the keyserver, instead of creating a single armor block.
    #[arg(long)]
    pub concatenate: bool,
}

impl KeyserverArguments {
    pub async fn new_client(self, client: ClientArguments) -> anyhow::Result<Client> {
        let aggregation = match self.concatenate {
            true => Aggregation::Concatenate,
            false => Aggregation::Armor,
        };

        let builder = Client::builder()
            .fetcher_options(client.into())
            .aggregation(aggregation);

        let builder = match self.ca_bundle {
            Some(ca_bundle) => builder.pool(self.keyserver, ca_bundle),
            None => builder.keyserver(self.keyserver),
        };

        Ok(builder.build().await?)
    }
}
