//! Engine configuration.
//!
//! Every numeric field left at 0 and every flag left `false` keeps the
//! value miniaudio picks in `ma_engine_config_init`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use soundobj_sys as sys;

use crate::error::SoundResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of 3D listeners
    pub listener_count: u32,
    /// Output channels, typically 2
    pub channels: u32,
    /// Output sample rate in Hz
    pub sample_rate: u32,
    pub period_size_in_frames: u32,
    pub period_size_in_milliseconds: u32,
    pub gain_smooth_time_in_frames: u32,
    pub gain_smooth_time_in_milliseconds: u32,
    pub default_volume_smooth_time_in_pcm_frames: u32,
    pub pre_mix_stack_size_in_bytes: u32,
    /// Leave the engine stopped after initialization
    pub no_auto_start: bool,
    /// Run without a playback device (offline processing)
    pub no_device: bool,
    /// Skip the resource manager that carries the custom decoders and let
    /// the engine create its own
    pub no_resource_manager: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> SoundResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> SoundResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn listener_count(mut self, count: u32) -> Self {
        self.listener_count = count;
        self
    }

    pub fn channels(mut self, channels: u32) -> Self {
        self.channels = channels;
        self
    }

    pub fn sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self
    }

    pub fn period_size_in_frames(mut self, frames: u32) -> Self {
        self.period_size_in_frames = frames;
        self
    }

    pub fn period_size_in_milliseconds(mut self, ms: u32) -> Self {
        self.period_size_in_milliseconds = ms;
        self
    }

    pub fn gain_smooth_time_in_frames(mut self, frames: u32) -> Self {
        self.gain_smooth_time_in_frames = frames;
        self
    }

    pub fn gain_smooth_time_in_milliseconds(mut self, ms: u32) -> Self {
        self.gain_smooth_time_in_milliseconds = ms;
        self
    }

    pub fn default_volume_smooth_time_in_pcm_frames(mut self, frames: u32) -> Self {
        self.default_volume_smooth_time_in_pcm_frames = frames;
        self
    }

    pub fn pre_mix_stack_size_in_bytes(mut self, bytes: u32) -> Self {
        self.pre_mix_stack_size_in_bytes = bytes;
        self
    }

    pub fn no_auto_start(mut self, enabled: bool) -> Self {
        self.no_auto_start = enabled;
        self
    }

    pub fn no_device(mut self, enabled: bool) -> Self {
        self.no_device = enabled;
        self
    }

    pub fn no_resource_manager(mut self, enabled: bool) -> Self {
        self.no_resource_manager = enabled;
        self
    }

    /// Copy the overrides onto a native config. Zero and `false` fields are
    /// skipped so the native default survives.
    pub fn apply(&self, native: &mut sys::ma_engine_config) {
        let overrides = [
            (self.listener_count, &mut native.listenerCount),
            (self.channels, &mut native.channels),
            (self.sample_rate, &mut native.sampleRate),
            (self.period_size_in_frames, &mut native.periodSizeInFrames),
            (self.period_size_in_milliseconds, &mut native.periodSizeInMilliseconds),
            (self.gain_smooth_time_in_frames, &mut native.gainSmoothTimeInFrames),
            (self.gain_smooth_time_in_milliseconds, &mut native.gainSmoothTimeInMilliseconds),
            (
                self.default_volume_smooth_time_in_pcm_frames,
                &mut native.defaultVolumeSmoothTimeInPCMFrames,
            ),
            (self.pre_mix_stack_size_in_bytes, &mut native.preMixStackSizeInBytes),
        ];
        for (value, field) in overrides {
            if value > 0 {
                *field = value;
            }
        }

        if self.no_auto_start {
            native.noAutoStart = sys::MA_TRUE;
        }
        if self.no_device {
            native.noDevice = sys::MA_TRUE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(c: &sys::ma_engine_config) -> [u32; 11] {
        [
            c.listenerCount,
            c.channels,
            c.sampleRate,
            c.periodSizeInFrames,
            c.periodSizeInMilliseconds,
            c.gainSmoothTimeInFrames,
            c.gainSmoothTimeInMilliseconds,
            c.defaultVolumeSmoothTimeInPCMFrames,
            c.preMixStackSizeInBytes,
            c.noAutoStart,
            c.noDevice,
        ]
    }

    fn native_defaults() -> sys::ma_engine_config {
        unsafe { sys::ma_engine_config_init() }
    }

    #[test]
    fn test_default_config_keeps_native_defaults() {
        let mut native = native_defaults();
        EngineConfig::default().apply(&mut native);
        assert_eq!(snapshot(&native), snapshot(&native_defaults()));
    }

    #[test]
    fn test_each_override_touches_only_its_field() {
        let defaults = snapshot(&native_defaults());

        // Values differ from every native default, in snapshot order
        let overrides = [
            EngineConfig::new().listener_count(3),
            EngineConfig::new().channels(5),
            EngineConfig::new().sample_rate(22050),
            EngineConfig::new().period_size_in_frames(777),
            EngineConfig::new().period_size_in_milliseconds(33),
            EngineConfig::new().gain_smooth_time_in_frames(123),
            EngineConfig::new().gain_smooth_time_in_milliseconds(45),
            EngineConfig::new().default_volume_smooth_time_in_pcm_frames(99),
            EngineConfig::new().pre_mix_stack_size_in_bytes(8192),
            EngineConfig::new().no_auto_start(true),
            EngineConfig::new().no_device(true),
        ];
        let expected = [3, 5, 22050, 777, 33, 123, 45, 99, 8192, sys::MA_TRUE, sys::MA_TRUE];

        for (field, config) in overrides.iter().enumerate() {
            let mut native = native_defaults();
            config.apply(&mut native);
            let applied = snapshot(&native);

            for (i, (got, default)) in applied.iter().zip(defaults.iter()).enumerate() {
                if i == field {
                    assert_eq!(*got, expected[field], "field {i} not applied");
                } else {
                    assert_eq!(got, default, "field {i} changed by override of field {field}");
                }
            }
        }
    }

    #[test]
    fn test_resource_manager_flag_leaves_native_config_alone() {
        let mut native = native_defaults();
        EngineConfig::new().no_resource_manager(true).apply(&mut native);
        assert_eq!(snapshot(&native), snapshot(&native_defaults()));
    }

    #[test]
    fn test_flags_applied() {
        let mut native = native_defaults();
        EngineConfig::new()
            .no_device(true)
            .no_auto_start(true)
            .channels(1)
            .listener_count(2)
            .apply(&mut native);
        assert_eq!(native.noDevice, sys::MA_TRUE);
        assert_eq!(native.noAutoStart, sys::MA_TRUE);
        assert_eq!(native.channels, 1);
        assert_eq!(native.listenerCount, 2);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json_str(r#"{"channels": 2, "no_device": true}"#).unwrap();
        assert_eq!(config, EngineConfig::new().channels(2).no_device(true));

        assert!(EngineConfig::from_json_str("{\"channels\": -1}").is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{"sample_rate": 48000, "listener_count": 4}"#).unwrap();

        let config = EngineConfig::from_json_file(&path).unwrap();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.listener_count, 4);
        assert!(!config.no_device);
    }
}
