use crate::cmd::KeyserverArguments;
use anyhow::Context;
use hkp_common::{cli::CommandDefaults, cli::client::ClientArguments, progress::Progress};
use std::io::Write;
use std::path::PathBuf;

/// Retrieve keys by their fingerprint
#[derive(clap::Args, Debug)]
pub struct Get {
    #[command(flatten)]
    pub client: ClientArguments,

    #[command(flatten)]
    pub keyserver: KeyserverArguments,

    /// Write the keyring to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fingerprints of the keys, 40 hex characters each
    #[arg(required = true, num_args = 1..)]
    pub fingerprints: Vec<String>,
}

impl CommandDefaults for Get {
    fn progress(&self) -> bool {
        self.fingerprints.len() > 1
    }
}

impl Get {
    pub async fn run<P: Progress>(self, progress: P) -> anyhow::Result<()> {
        let client = self.keyserver.new_client(self.client).await?;

        log::info!(
            "Retrieving {} key(s) from {}",
            self.fingerprints.len(),
            client.keyserver()
        );

        let keyring = client
            .get_keys_with_progress(&self.fingerprints, progress)
            .await?;

        match &self.output {
            Some(output) => {
                std::fs::write(output, &keyring)
                    .with_context(|| format!("Failed to write keyring: {}", output.display()))?;
                log::info!("Wrote {} bytes to {}", keyring.len(), output.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(&keyring)
                    .and_then(|()| stdout.flush())
                    .context("Failed to write keyring")?;
            }
        }

        Ok(())
    }
}
