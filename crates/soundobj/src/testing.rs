use std::path::Path;

use crate::config::EngineConfig;

pub(crate) const RATE: u32 = 48000;

/// Device-less engine settings, so tests run without audio hardware
pub(crate) fn offline_config() -> EngineConfig {
    EngineConfig::new().no_device(true).channels(2).sample_rate(RATE)
}

/// Mono 16-bit WAV holding a quiet square wave
pub(crate) fn write_wav(path: &Path, frames: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let sample: i16 = if (i / 50) % 2 == 0 { 1000 } else { -1000 };
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
}
