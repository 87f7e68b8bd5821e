use crate::fetcher::FetcherOptions;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(next_help_heading = "Client")]
pub struct ClientArguments {
    /// Per-request HTTP timeout, in humantime duration format.
    #[arg(short, long, default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Timeout for establishing a connection, in humantime duration format.
    #[arg(long)]
    pub connect_timeout: Option<humantime::Duration>,

    /// Additional root certificates (PEM) to trust, on top of the system trust store.
    #[arg(long = "additional-root-certificate")]
    pub additional_root_certificates: Vec<PathBuf>,
}

impl From<ClientArguments> for FetcherOptions {
    fn from(value: ClientArguments) -> Self {
        let options = FetcherOptions::new()
            .timeout(value.timeout)
            .extend_additional_root_certificates(value.additional_root_certificates);

        match value.connect_timeout {
            Some(connect_timeout) => options.connect_timeout(connect_timeout),
            None => options,
        }
    }
}
