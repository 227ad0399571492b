//! Main entry point for snippet synthesis.
//!
//! Takes a decoded source buffer and synthesis parameters and produces a new
//! buffer deterministically for a given seed. No file I/O happens here.

use snipweave_spec::{SynthesisConfig, SynthesisParams};

use crate::buffer::AudioBuffer;
use crate::error::{AudioError, AudioResult};
use crate::gain::apply_gain;
use crate::overlap_add::OverlapAdd;
use crate::progress::{
    accumulate_percent, ProgressObserver, SynthesisStage, Throttled, COMPLETE, GAIN_DONE,
};
use crate::sampler::SnippetSampler;
use crate::window::WindowCurve;

/// Result of a synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Synthesized audio, same channel count as the source.
    pub buffer: AudioBuffer,
    /// Seed that drove snippet placement. For unseeded runs this is the
    /// entropy seed that was drawn, so the run can be repeated.
    pub seed: u64,
    /// Snippet length in frames.
    pub clip_len: usize,
    /// Overlap in frames.
    pub overlap_len: usize,
    /// Distance between placements in frames.
    pub hop: usize,
    /// Number of snippets accumulated.
    pub snippets: usize,
    /// BLAKE3 hash of the output samples.
    pub pcm_hash: String,
}

/// Synthesizes a new buffer from random windowed snippets of `source`.
///
/// # Arguments
/// * `source` - Decoded source audio; never modified
/// * `sample_rate` - Source sample rate in Hz; the output shares it
/// * `params` - Time-domain synthesis parameters
/// * `observer` - Receives monotonic progress in `[0, 100]`
///
/// # Errors
/// Parameter errors are reported before any allocation or random draw.
pub fn synthesize(
    source: &AudioBuffer,
    sample_rate: u32,
    params: &SynthesisParams,
    observer: &mut dyn ProgressObserver,
) -> AudioResult<SynthesisResult> {
    if sample_rate == 0 {
        return Err(AudioError::InvalidSampleRate { rate: sample_rate });
    }
    if source.is_empty() {
        return Err(AudioError::invalid_buffer("source has no frames"));
    }

    let config = SynthesisConfig::resolve(params, sample_rate, source.frames())?;
    tracing::debug!(
        clip_len = config.clip_len,
        overlap_len = config.overlap_len,
        output_len = config.output_len,
        window = ?config.window,
        "resolved synthesis config"
    );
    synthesize_config(source, &config, observer)
}

/// Runs an already resolved configuration.
///
/// The config is re-checked against `source`, so a config resolved for a
/// different source is rejected rather than read out of bounds.
pub fn synthesize_config(
    source: &AudioBuffer,
    config: &SynthesisConfig,
    observer: &mut dyn ProgressObserver,
) -> AudioResult<SynthesisResult> {
    if source.is_empty() {
        return Err(AudioError::invalid_buffer("source has no frames"));
    }
    config.validate(source.frames())?;
    config.output_samples(source.channels())?;

    let window = WindowCurve::for_kind(config.window, config.clip_len);
    let sampler = SnippetSampler::from_optional_seed(config.seed);
    let seed = sampler.seed();
    if config.seed.is_none() {
        tracing::debug!(seed, "no seed given; drew one from entropy");
    }

    let mut progress = Throttled::new(observer);
    progress.stage(SynthesisStage::Accumulating);

    let mut engine = OverlapAdd::new(
        source,
        &window,
        sampler,
        config.output_len,
        config.clip_len,
        config.overlap_len,
    )?;
    let hop = engine.hop();
    tracing::debug!(hop, snippets = engine.total_snippets(), "placing snippets");
    while engine.step().is_some() {
        progress.report(accumulate_percent(engine.position(), config.output_len));
    }
    let snippets = engine.snippets();
    let mut buffer = engine.finish();

    progress.stage(SynthesisStage::ApplyingGain);
    apply_gain(&mut buffer, config.gain);
    progress.report(GAIN_DONE);

    let pcm_hash = buffer.pcm_hash();
    tracing::info!(
        seed,
        snippets,
        frames = buffer.frames(),
        channels = buffer.channels(),
        "synthesis complete"
    );

    progress.stage(SynthesisStage::Done);
    progress.report(COMPLETE);

    Ok(SynthesisResult {
        buffer,
        seed,
        clip_len: config.clip_len,
        overlap_len: config.overlap_len,
        hop,
        snippets,
        pcm_hash,
    })
}
