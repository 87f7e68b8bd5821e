//! Command line helpers
#[cfg(feature = "cli")]
pub mod client;
#[cfg(feature = "cli")]
pub mod log;

/// Defaults a command can provide to the application setup.
pub trait CommandDefaults {
    /// Whether a progress bar is shown by default.
    fn progress(&self) -> bool {
        true
    }
}
