//! Overlap-add accumulation of windowed random snippets.
//!
//! The engine owns the output buffer for the whole run. Each [`step`]
//! draws one snippet start, windows the snippet, and sums it into the output
//! at the current cursor; the cursor then advances by the hop length. The
//! finished buffer is only handed out by [`finish`].
//!
//! [`step`]: OverlapAdd::step
//! [`finish`]: OverlapAdd::finish

use snipweave_spec::hop_length;

use crate::buffer::AudioBuffer;
use crate::error::{AudioError, AudioResult};
use crate::sampler::SnippetSampler;
use crate::window::WindowCurve;

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, nothing accumulated yet.
    Idle,
    /// At least one snippet placed, output not yet full.
    Accumulating,
    /// Output is full.
    Complete,
}

/// Where one snippet came from and where it went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// First source frame read.
    pub source_start: usize,
    /// First output frame written.
    pub output_pos: usize,
    /// Frames accumulated; shorter than the clip only for the final chunk.
    pub len: usize,
}

/// Overlap-add engine for one synthesis run.
#[derive(Debug)]
pub struct OverlapAdd<'a> {
    source: &'a AudioBuffer,
    window: &'a WindowCurve,
    sampler: SnippetSampler,
    output: AudioBuffer,
    output_len: usize,
    clip_len: usize,
    hop: usize,
    pos: usize,
    snippets: usize,
    state: EngineState,
}

impl<'a> OverlapAdd<'a> {
    /// Prepares a run and allocates the zero-filled output.
    ///
    /// A hop of zero or less (`overlap_len >= clip_len`) is forced to one
    /// sample so the run always terminates.
    ///
    /// # Errors
    /// Fails if the source is empty, the clip is empty or longer than the
    /// source, the window length does not match the clip, or the output
    /// cannot be allocated.
    pub fn new(
        source: &'a AudioBuffer,
        window: &'a WindowCurve,
        sampler: SnippetSampler,
        output_len: usize,
        clip_len: usize,
        overlap_len: usize,
    ) -> AudioResult<Self> {
        if source.is_empty() {
            return Err(AudioError::invalid_buffer("source has no frames"));
        }
        if clip_len == 0 || clip_len > source.frames() {
            return Err(AudioError::invalid_buffer(format!(
                "clip of {} frames cannot be read from a {}-frame source",
                clip_len,
                source.frames()
            )));
        }
        if window.len() != clip_len {
            return Err(AudioError::invalid_buffer(format!(
                "window has {} coefficients, clip has {} frames",
                window.len(),
                clip_len
            )));
        }

        let hop = hop_length(clip_len, overlap_len);
        if overlap_len >= clip_len {
            tracing::warn!(
                clip_len,
                overlap_len,
                "overlap leaves no hop; advancing one sample per snippet"
            );
        }

        Ok(Self {
            source,
            window,
            sampler,
            output: AudioBuffer::silent(output_len, source.channels())?,
            output_len,
            clip_len,
            hop,
            pos: 0,
            snippets: 0,
            state: if output_len == 0 {
                EngineState::Complete
            } else {
                EngineState::Idle
            },
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Output cursor in frames.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Hop length in frames.
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Target output length in frames.
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Snippets placed so far.
    pub fn snippets(&self) -> usize {
        self.snippets
    }

    /// Seed driving snippet placement.
    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    /// Total snippets a complete run places: `ceil(output_len / hop)`.
    pub fn total_snippets(&self) -> usize {
        self.output_len.div_ceil(self.hop)
    }

    /// Places one snippet.
    ///
    /// Returns `None` once the output is full.
    pub fn step(&mut self) -> Option<Placement> {
        if self.state == EngineState::Complete {
            return None;
        }
        self.state = EngineState::Accumulating;

        let start = self.sampler.next_start(self.source.frames(), self.clip_len);
        let len = self.clip_len.min(self.output_len - self.pos);
        let channels = self.source.channels();

        let src = self.source.frame_range(start, len);
        let dst = self.output.frame_range_mut(self.pos, len);
        for ((out_frame, in_frame), &coeff) in dst
            .chunks_exact_mut(channels)
            .zip(src.chunks_exact(channels))
            .zip(&self.window[..len])
        {
            for (out, &sample) in out_frame.iter_mut().zip(in_frame) {
                *out += sample * coeff;
            }
        }

        let placement = Placement {
            source_start: start,
            output_pos: self.pos,
            len,
        };

        self.snippets += 1;
        self.pos += self.hop;
        if self.pos >= self.output_len {
            self.state = EngineState::Complete;
        }
        Some(placement)
    }

    /// Places snippets until the output is full.
    pub fn run(&mut self) {
        while self.step().is_some() {}
    }

    /// Completes the run if needed and hands over the output buffer.
    pub fn finish(mut self) -> AudioBuffer {
        self.run();
        self.output
    }
}
