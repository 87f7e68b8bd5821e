use env_logger::Builder;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::LevelFilter;
use std::io::Write;

#[derive(Clone, Debug, clap::Args)]
#[command(next_help_heading = "Logging")]
pub struct Logging {
    /// Be quiet. Conflicts with 'verbose'.
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    /// Be more verbose. May be repeated multiple times to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Add timestamps to the output messages
    #[arg(long, global = true)]
    pub log_timestamps: bool,

    /// Disable progress bar
    #[arg(long, global = true, conflicts_with = "progress")]
    pub no_progress: bool,

    /// Enable progress bar
    #[arg(long, global = true)]
    pub progress: bool,

    /// Provide a RUST_LOG filter, conflicts with --verbose and --quiet
    #[arg(long, global = true, conflicts_with_all(["verbose", "quiet"]), env("RUST_LOG"))]
    pub log: Option<String>,
}

/// Log levels as `(everything else, app modules)`.
///
/// `None` for the app modules means they follow the global level.
fn levels(quiet: bool, verbose: u8) -> (LevelFilter, Option<LevelFilter>) {
    match (quiet, verbose) {
        (true, _) => (LevelFilter::Off, None),
        (_, 0) => (LevelFilter::Warn, None),
        (_, 1) => (LevelFilter::Warn, Some(LevelFilter::Info)),
        (_, 2) => (LevelFilter::Warn, Some(LevelFilter::Debug)),
        (_, 3) => (LevelFilter::Info, Some(LevelFilter::Debug)),
        (_, 4) => (LevelFilter::Debug, None),
        (_, 5) => (LevelFilter::Debug, Some(LevelFilter::Trace)),
        (_, _) => (LevelFilter::Trace, None),
    }
}

impl Logging {
    /// Whether a progress bar is shown, given the default of the command.
    fn show_progress(&self, default_progress: bool) -> bool {
        match (self.quiet, self.no_progress, self.progress) {
            (true, _, _) | (_, true, _) => false,
            (_, _, true) => true,
            _ => default_progress,
        }
    }

    /// Whether error messages make it through the logger configured by [`Logging::init`].
    ///
    /// `--quiet` turns them off, and a custom filter (`--log` or `RUST_LOG`) may not include
    /// the application modules.
    pub fn logs_errors(&self) -> bool {
        !self.quiet && self.log.is_none()
    }

    /// Initialize the logger, returning the progress handle if a progress bar should be shown.
    pub fn init(
        self,
        app_modules: &[&'static str],
        default_progress: bool,
    ) -> Option<MultiProgress> {
        let show_progress = self.show_progress(default_progress);
        let mut builder = Builder::new();

        match &self.log {
            Some(log) => {
                builder.parse_filters(log);
            }
            None => {
                if !self.log_timestamps {
                    builder.format(|buf, record| writeln!(buf, "{}", record.args()));
                }

                let (global, app) = levels(self.quiet, self.verbose);
                builder.filter_level(global);
                if let Some(app) = app {
                    builder.filter_module("hkp_common", app);
                    for module in app_modules {
                        builder.filter_module(module, app);
                    }
                }
            }
        };

        if !show_progress {
            builder.init();
            return None;
        }

        let logger = builder.build();
        let max_level = logger.filter();
        let multi = MultiProgress::new();
        let log = LogWrapper::new(multi.clone(), logger);
        // NOTE: LogWrapper::try_init is buggy and messes up the log levels
        let _ = log::set_boxed_logger(Box::new(log));
        log::set_max_level(max_level);

        Some(multi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity() {
        assert_eq!(levels(true, 3), (LevelFilter::Off, None));
        assert_eq!(levels(false, 0), (LevelFilter::Warn, None));
        assert_eq!(
            levels(false, 2),
            (LevelFilter::Warn, Some(LevelFilter::Debug))
        );
        assert_eq!(levels(false, 9), (LevelFilter::Trace, None));
    }

    #[derive(Debug, clap::Parser)]
    struct Cli {
        #[command(flatten)]
        logging: Logging,
    }

    fn logging(args: &[&str]) -> Logging {
        use clap::Parser;
        Cli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .expect("must parse")
            .logging
    }

    #[test]
    fn progress() {
        assert!(logging(&[]).show_progress(true));
        assert!(!logging(&[]).show_progress(false));
        assert!(logging(&["--progress"]).show_progress(false));
        assert!(!logging(&["--no-progress"]).show_progress(true));
    }

    #[test]
    fn errors_reach_the_log() {
        let defaults = Logging {
            quiet: false,
            verbose: 0,
            log_timestamps: false,
            no_progress: false,
            progress: false,
            log: None,
        };
        assert!(defaults.logs_errors());

        assert!(
            !Logging {
                quiet: true,
                ..defaults.clone()
            }
            .logs_errors()
        );
        assert!(
            !Logging {
                log: Some("reqwest=debug".to_string()),
                ..defaults
            }
            .logs_errors()
        );
        assert!(!logging(&["--log", "reqwest=debug"]).logs_errors());
    }

    #[test]
    fn init_with_progress() {
        let multi = logging(&["--log", "hkp=info", "--progress"]).init(&["hkp"], false);
        assert!(multi.is_some());
    }
}
