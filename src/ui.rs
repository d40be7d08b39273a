//! UI utilities for consistent terminal output formatting.
//!
//! Provides the terminal side of the gallery: framed notification boxes,
//! the y/N confirmation prompt and the loading spinner.

use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::gallery::{Confirm, Notice, Notifier};

/// Width of box separators.
const BOX_WIDTH: usize = 60;

/// Print an error box with a title and optional detail.
///
/// Outputs:
/// ```text
/// ============================================================
/// Upload failed!
/// ============================================================
///
/// <detail>
/// ```
pub fn print_error_box(title: &str, detail: Option<&str>) {
    eprintln!("\n{}", "=".repeat(BOX_WIDTH));
    eprintln!("{title}");
    eprintln!("{}", "=".repeat(BOX_WIDTH));

    if let Some(detail) = detail
        && !detail.is_empty()
    {
        eprintln!("\n{detail}");
    }
    eprintln!();
}

/// Print an error box with troubleshooting hints.
pub fn print_error_box_with_hints(title: &str, detail: Option<&str>, hints: &[&str]) {
    print_error_box(title, detail);

    if !hints.is_empty() {
        eprintln!("Common Issues:");
        for (i, hint) in hints.iter().enumerate() {
            eprintln!("  {}. {hint}", i + 1);
        }
        eprintln!();
    }
}

/// Create a steady-ticking spinner on stderr.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Terminal notifier: boxes for errors, a line for successes, a spinner
/// while loading.
#[derive(Default)]
pub struct TerminalNotifier {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            let hint = match notice {
                Notice::NoFileSelected => Some("Pick a file with `select <path>` first."),
                Notice::UploadFailed | Notice::DeleteFailed => {
                    Some("Run with -v for the underlying error.")
                },
                _ => None,
            };
            print_error_box(notice.message(), hint);
        } else {
            println!("{}", notice.message());
        }
    }

    fn loading_changed(&self, loading: bool) {
        let mut current = self.spinner.lock();
        if loading {
            *current = Some(spinner("Uploading..."));
        } else if let Some(bar) = current.take() {
            bar.finish_and_clear();
        }
    }
}

/// Asks on stdin; anything but `y`/`yes` declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let stdin = io::stdin();
        prompt_yes_no(prompt, &mut stdin.lock(), &mut io::stdout())
    }
}

/// Ask a y/N question on `output` and read the answer from `input`.
///
/// Read or write failures count as "no".
pub fn prompt_yes_no<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> bool {
    if write!(output, "{prompt} [y/N]: ").and_then(|()| output.flush()).is_err() {
        return false;
    }

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
