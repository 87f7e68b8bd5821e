#![forbid(unsafe_code)]

mod cmd;

use clap::Parser;
use cmd::{get::Get, url::Url};
use hkp_common::{
    cli::{CommandDefaults, log::Logging},
    progress::Progress,
    utils::measure::MeasureTime,
};
use std::{ops::Deref, process::ExitCode};

#[derive(Debug, Parser)]
#[command(version, about = "HKP keyserver client", author, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    logging: Logging,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    Get(Get),
    Url(Url),
}

impl Deref for Command {
    type Target = dyn CommandDefaults;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Get(cmd) => cmd,
            Self::Url(cmd) => cmd,
        }
    }
}

impl Command {
    pub async fn run<P: Progress>(self, progress: P) -> anyhow::Result<()> {
        match self {
            Self::Get(cmd) => cmd.run(progress).await,
            Self::Url(cmd) => cmd.run(),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let progress = self
            .logging
            .init(&["hkp", "hkp_client"], self.command.progress());

        log::debug!("Setup complete, start processing");

        let time = MeasureTime::new();
        self.command.run(progress).await?;
        drop(time);

        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let logs_errors = cli.logging.logs_errors();

    if let Err(err) = cli.run().await {
        log::error!("Failed to execute: {err}");
        if !logs_errors {
            eprintln!("Failed to execute: {err}");
        }
        for (n, cause) in err.chain().enumerate().skip(1) {
            log::info!("  {n}: {cause}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
