//! Spinner-based progress reporting for interactive terminals.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use sprout_core::application::ports::ProgressReporter;

const TICK: Duration = Duration::from_millis(80);

/// Shows one spinner per pipeline step and leaves a ✓/✗ line behind.
pub struct SpinnerReporter {
    current: Mutex<Option<ProgressBar>>,
    no_color: bool,
}

impl SpinnerReporter {
    pub fn new(no_color: bool) -> Self {
        Self {
            current: Mutex::new(None),
            no_color,
        }
    }

    fn take(&self) -> Option<ProgressBar> {
        self.current.lock().ok().and_then(|mut slot| slot.take())
    }

    fn mark(&self, symbol: &str, ok: bool) -> String {
        match (self.no_color, ok) {
            (true, _) => symbol.to_string(),
            (false, true) => symbol.green().bold().to_string(),
            (false, false) => symbol.red().bold().to_string(),
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn start(&self, message: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(style("{spinner} {msg}"));
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK);

        if let Ok(mut slot) = self.current.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn succeed(&self, message: &str) {
        if let Some(bar) = self.take() {
            bar.set_style(style("{msg}"));
            bar.finish_with_message(format!("{} {message}", self.mark("\u{2713}", true)));
        }
    }

    fn fail(&self, message: &str) {
        if let Some(bar) = self.take() {
            bar.set_style(style("{msg}"));
            bar.abandon_with_message(format!("{} {message}", self.mark("\u{2717}", false)));
        }
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}
