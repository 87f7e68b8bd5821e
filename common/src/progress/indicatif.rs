use super::{Progress, ProgressBar};
use indicatif::{MultiProgress, ProgressStyle};

const TEMPLATE: &str = "{spinner} {wide_msg} [{pos}/{len}] {elapsed}";

impl Progress for MultiProgress {
    type Instance = KeyProgressBar;

    fn start(&self, keys: usize) -> Self::Instance {
        let bar = indicatif::ProgressBar::new(keys as u64);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style);
        }
        KeyProgressBar {
            bar: self.add(bar),
            multi: self.clone(),
        }
    }
}

/// A progress bar of a [`MultiProgress`], removed from it once finished.
pub struct KeyProgressBar {
    bar: indicatif::ProgressBar,
    multi: MultiProgress,
}

impl ProgressBar for KeyProgressBar {
    fn retrieving(&mut self, fingerprint: &str) {
        self.bar.set_message(fingerprint.to_string());
    }

    fn retrieved(&mut self) {
        self.bar.inc(1);
    }

    fn finish(self) {
        self.bar.finish_and_clear();
        self.multi.remove(&self.bar);
    }
}
