use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use soundobj_sys as sys;

use crate::error::SoundError;

pub use glam::Vec3;

/// Listener index miniaudio reports for a sound that is not pinned and
/// follows whichever listener is closest.
pub const LISTENER_INDEX_CLOSEST: u32 = u8::MAX as u32;

/// Distance attenuation model for spatialized sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttenuationModel {
    /// No distance attenuation
    #[default]
    None,
    /// Inverse distance (OpenAL style)
    Inverse,
    /// Linear falloff between min and max distance
    Linear,
    /// Exponential falloff
    Exponential,
}

impl AttenuationModel {
    pub const ALL: [AttenuationModel; 4] = [
        AttenuationModel::None,
        AttenuationModel::Inverse,
        AttenuationModel::Linear,
        AttenuationModel::Exponential,
    ];

    /// Convert raw `ma_attenuation_model`, falling back to `None` for values
    /// this binding does not know about.
    pub fn from_raw(raw: sys::ma_attenuation_model) -> Self {
        match raw {
            sys::ma_attenuation_model_inverse => AttenuationModel::Inverse,
            sys::ma_attenuation_model_linear => AttenuationModel::Linear,
            sys::ma_attenuation_model_exponential => AttenuationModel::Exponential,
            _ => AttenuationModel::None,
        }
    }

    pub fn to_raw(self) -> sys::ma_attenuation_model {
        match self {
            AttenuationModel::None => sys::ma_attenuation_model_none,
            AttenuationModel::Inverse => sys::ma_attenuation_model_inverse,
            AttenuationModel::Linear => sys::ma_attenuation_model_linear,
            AttenuationModel::Exponential => sys::ma_attenuation_model_exponential,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttenuationModel::None => "none",
            AttenuationModel::Inverse => "inverse",
            AttenuationModel::Linear => "linear",
            AttenuationModel::Exponential => "exponential",
        }
    }
}

impl fmt::Display for AttenuationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttenuationModel {
    type Err = SoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| SoundError::UnknownAttenuationModel(s.to_string()))
    }
}

impl TryFrom<&str> for AttenuationModel {
    type Error = SoundError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// How a sound's position is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositioningMode {
    /// Position is in world space
    #[default]
    Absolute,
    /// Position is relative to the listener
    Relative,
}

impl PositioningMode {
    pub const ALL: [PositioningMode; 2] = [PositioningMode::Absolute, PositioningMode::Relative];

    pub fn from_raw(raw: sys::ma_positioning) -> Self {
        match raw {
            sys::ma_positioning_relative => PositioningMode::Relative,
            _ => PositioningMode::Absolute,
        }
    }

    pub fn to_raw(self) -> sys::ma_positioning {
        match self {
            PositioningMode::Absolute => sys::ma_positioning_absolute,
            PositioningMode::Relative => sys::ma_positioning_relative,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PositioningMode::Absolute => "absolute",
            PositioningMode::Relative => "relative",
        }
    }
}

impl fmt::Display for PositioningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositioningMode {
    type Err = SoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| SoundError::UnknownPositioningMode(s.to_string()))
    }
}

impl TryFrom<&str> for PositioningMode {
    type Error = SoundError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Directional cone of a sound or listener.
///
/// Inside `inner_angle` the gain is 1, outside `outer_angle` it is
/// `outer_gain`, and it is interpolated in between. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub inner_angle: f32,
    pub outer_angle: f32,
    pub outer_gain: f32,
}

impl Cone {
    pub fn new(inner_angle: f32, outer_angle: f32, outer_gain: f32) -> Self {
        Self {
            inner_angle,
            outer_angle,
            outer_gain,
        }
    }
}

impl Default for Cone {
    fn default() -> Self {
        Self {
            inner_angle: 0.0,
            outer_angle: 0.0,
            outer_gain: 1.0,
        }
    }
}

pub(crate) fn vec3_from_raw(v: sys::ma_vec3f) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub(crate) fn bool_to_raw(value: bool) -> sys::ma_bool32 {
    if value {
        sys::MA_TRUE
    } else {
        sys::MA_FALSE
    }
}

pub(crate) fn bool_from_raw(raw: sys::ma_bool32) -> bool {
    raw == sys::MA_TRUE
}
