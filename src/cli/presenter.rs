//! CLI presenter for output formatting

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::recording::{InputDevice, RecorderState, StateChangeEvent};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.print(|| eprintln!("{} {}", "ℹ".cyan(), message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.print(|| eprintln!("{} {}", "✓".green(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.print(|| eprintln!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.print(|| eprintln!("{} {}", "✗".red(), message));
    }

    /// Output text to stdout (command results)
    pub fn output(&self, text: &str) {
        self.print(|| println!("{}", text));
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        self.print(|| println!("{}: {}", key.cyan(), value));
    }

    /// Print one input device per line
    pub fn devices(&self, devices: &[InputDevice]) {
        if devices.is_empty() {
            self.info("No input devices reported");
            return;
        }
        for device in devices {
            self.key_value(device.id(), device.label());
        }
    }

    /// Run `f` with the spinner hidden so lines are not overdrawn
    fn print<F: FnOnce()>(&self, f: F) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(f),
            None => f(),
        }
    }

    /// Print a state-change notification
    pub fn state_change(&self, event: &StateChangeEvent) {
        self.print(|| println!("{} {}", "●".color(state_color(event.state)), event.state));
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn state_color(state: RecorderState) -> Color {
    match state {
        RecorderState::Recording => Color::Red,
        RecorderState::Paused => Color::Yellow,
        RecorderState::Stopped => Color::White,
    }
}
