use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress over the yearly files of a build. A silent reporter is a no-op.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(years: u64, message: &str, silent: bool) -> Self {
        if silent {
            return Self::silent();
        }

        let bar = ProgressBar::new(years);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:30.green/white}] {pos}/{len} years",
        ) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { bar: Some(bar) }
    }

    pub fn silent() -> Self {
        Self { bar: None }
    }

    pub fn increment(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }
}
