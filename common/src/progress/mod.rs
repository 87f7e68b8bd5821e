//! Progress reporting for retrieving a batch of keys

pub mod indicatif;

/// A source of progress bars.
///
/// `()` reports nothing. `Option<P>` reports through `P`, if present.
pub trait Progress {
    type Instance: ProgressBar;

    /// Start tracking a batch of `keys` keys.
    fn start(&self, keys: usize) -> Self::Instance;
}

/// Progress of a single batch.
pub trait ProgressBar {
    /// The key with this fingerprint is being retrieved.
    fn retrieving(&mut self, fingerprint: &str);

    /// The key currently being retrieved was added to the keyring.
    fn retrieved(&mut self);

    /// The batch ended, either completed or aborted.
    fn finish(self);
}

impl Progress for () {
    type Instance = ();

    fn start(&self, _keys: usize) -> Self::Instance {}
}

impl ProgressBar for () {
    fn retrieving(&mut self, _fingerprint: &str) {}

    fn retrieved(&mut self) {}

    fn finish(self) {}
}

impl<P: Progress> Progress for Option<P> {
    type Instance = Option<P::Instance>;

    fn start(&self, keys: usize) -> Self::Instance {
        self.as_ref().map(|progress| progress.start(keys))
    }
}

impl<B: ProgressBar> ProgressBar for Option<B> {
    fn retrieving(&mut self, fingerprint: &str) {
        if let Some(bar) = self {
            bar.retrieving(fingerprint);
        }
    }

    fn retrieved(&mut self) {
        if let Some(bar) = self {
            bar.retrieved();
        }
    }

    fn finish(self) {
        if let Some(bar) = self {
            bar.finish();
        }
    }
}
