//! Terminal progress bar for `generate`.

use colored::Colorize;
use snipweave_audio::{ProgressObserver, SynthesisStage};
use std::io::Write;

const BAR_WIDTH: usize = 40;

/// Draws a single-line progress bar on stderr.
#[derive(Debug, Default)]
pub struct TerminalProgress {
    quiet: bool,
    drawn: bool,
}

impl TerminalProgress {
    /// Creates a bar; a quiet bar draws nothing.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            drawn: false,
        }
    }

    /// Ends the bar line so later output starts on a fresh line.
    pub fn finish(&mut self) {
        if self.drawn {
            eprintln!();
            self.drawn = false;
        }
    }
}

impl ProgressObserver for TerminalProgress {
    fn progress(&mut self, percent: u8) {
        if self.quiet {
            return;
        }
        let filled = BAR_WIDTH * percent.min(100) as usize / 100;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r  [{}] {:>3}%", bar.green(), percent);
        let _ = stderr.flush();
        self.drawn = true;
    }

    fn stage(&mut self, stage: SynthesisStage) {
        tracing::debug!(stage = stage.label(), "synthesis stage");
        if self.quiet || stage == SynthesisStage::Accumulating {
            return;
        }
        self.finish();
        if stage == SynthesisStage::ApplyingGain {
            eprintln!("{}", format!("{}…", stage.label()).dimmed());
        }
    }
}
