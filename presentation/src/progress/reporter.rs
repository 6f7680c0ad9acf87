//! Progress reporting for batch decoding

use colored::Colorize;
use commlog_application::DecodeProgressNotifier;
use commlog_domain::CodecError;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports decode progress with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeProgressNotifier for ProgressReporter {
    fn on_batch_start(&self, total_records: usize) {
        let bar = ProgressBar::new(total_records as u64);
        bar.set_style(Self::bar_style());
        bar.set_prefix("Decoding");
        bar.set_message("Starting...");

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_record_accepted(&self, _line: usize) {
        self.with_bar(|bar| bar.inc(1));
    }

    fn on_record_rejected(&self, line: usize, error: &CodecError) {
        self.with_bar(|bar| {
            bar.set_message(format!("{} line {} ({})", "x".red(), line, error.category()));
            bar.inc(1);
        });
    }

    fn on_batch_complete(&self, accepted: usize, rejected: usize) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message(format!(
                "{} accepted, {} rejected",
                accepted.to_string().green(),
                rejected.to_string().red()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DecodeProgressNotifier for SimpleProgress {
    fn on_batch_start(&self, total_records: usize) {
        eprintln!("{} {} ({} records)", "->".cyan(), "Decoding".bold(), total_records);
    }

    fn on_record_rejected(&self, line: usize, error: &CodecError) {
        eprintln!("  {} line {}: {}", "x".red(), line, error);
    }

    fn on_batch_complete(&self, accepted: usize, rejected: usize) {
        eprintln!("  {} {} accepted, {} rejected", "v".green(), accepted, rejected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tolerates_events_without_start() {
        let reporter = ProgressReporter::new();
        reporter.on_record_accepted(1);
        reporter.on_batch_complete(0, 0);
    }

    #[test]
    fn test_reporter_full_cycle() {
        let reporter = ProgressReporter::new();
        reporter.on_batch_start(2);
        reporter.on_record_accepted(1);
        reporter.on_record_rejected(2, &CodecError::UnknownVariant("X".to_string()));
        reporter.with_bar(|bar| assert_eq!(bar.position(), 2));
        reporter.on_batch_complete(1, 1);
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
