//! Progress notifications from a running synthesis.
//!
//! Observers are called synchronously on whatever thread runs the synthesis.
//! They are notifications only; nothing they do feeds back into the run.

/// Coarse phases of a run, reported alongside percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisStage {
    /// Snippets are being placed (0-80%).
    Accumulating,
    /// Gain and clipping are being applied (90%).
    ApplyingGain,
    /// The buffer is ready for the caller (100%).
    Done,
}

impl SynthesisStage {
    /// Short status line for display.
    pub fn label(&self) -> &'static str {
        match self {
            SynthesisStage::Accumulating => "Placing snippets",
            SynthesisStage::ApplyingGain => "Applying gain",
            SynthesisStage::Done => "Done",
        }
    }
}

/// Receives progress from [`synthesize`](crate::synthesize).
pub trait ProgressObserver {
    /// Called with a percentage in `[0, 100]`; values never decrease.
    fn progress(&mut self, percent: u8);

    /// Called when the run enters a new stage.
    fn stage(&mut self, _stage: SynthesisStage) {}
}

impl<F: FnMut(u8)> ProgressObserver for F {
    fn progress(&mut self, percent: u8) {
        self(percent)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn progress(&mut self, _percent: u8) {}
}

/// Share of the bar covered by accumulation.
pub(crate) const ACCUMULATE_SPAN: u8 = 80;
/// Reported after the gain stage.
pub(crate) const GAIN_DONE: u8 = 90;
/// Reported when the buffer is returned.
pub(crate) const COMPLETE: u8 = 100;

/// Maps an output cursor to the accumulation share of the bar.
///
/// The cursor may overshoot the output on the final hop; it is clamped so
/// the value never exceeds [`ACCUMULATE_SPAN`].
pub(crate) fn accumulate_percent(pos: usize, output_len: usize) -> u8 {
    if output_len == 0 {
        return ACCUMULATE_SPAN;
    }
    let pos = pos.min(output_len) as u128;
    ((pos * ACCUMULATE_SPAN as u128) / output_len as u128) as u8
}

/// Forwards percentages only when they change.
pub(crate) struct Throttled<'a> {
    inner: &'a mut dyn ProgressObserver,
    last: Option<u8>,
}

impl<'a> Throttled<'a> {
    pub(crate) fn new(inner: &'a mut dyn ProgressObserver) -> Self {
        Self { inner, last: None }
    }

    pub(crate) fn report(&mut self, percent: u8) {
        if self.last != Some(percent) {
            self.last = Some(percent);
            self.inner.progress(percent);
        }
    }

    pub(crate) fn stage(&mut self, stage: SynthesisStage) {
        self.inner.stage(stage);
    }
}
