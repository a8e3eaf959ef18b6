//! Sounds bound to an [`Engine`].
//!
//! A sound starts as an [`UnloadedSound`] and turns into a [`LoadedSound`]
//! once a native handle exists. Only `LoadedSound` talks to miniaudio.
//! [`Sound`] is the enum over both for callers that want to hold either
//! state in one place.

use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};

use soundobj_sys as sys;
use tracing::debug;
use url::Url;

use crate::engine::Engine;
use crate::error::{MaResult, SoundError, SoundResult};
use crate::native;
use crate::types::{
    bool_from_raw, bool_to_raw, vec3_from_raw, AttenuationModel, Cone, PositioningMode, Vec3,
    LISTENER_INDEX_CLOSEST,
};

/// Where a sound's audio comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    File(PathBuf),
    Url(Url),
    Memory(Vec<u8>),
}

impl SoundSource {
    /// A string is a URL only when it has both a scheme and a host, so
    /// `C:\a.wav` and `a.wav` stay file paths. Strings the `url` parser
    /// rejects (a host containing spaces, say) also stay file paths and fail
    /// later as a file load.
    pub fn classify(s: &str) -> Self {
        match Url::parse(s) {
            Ok(url) if !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()) => {
                SoundSource::Url(url)
            }
            _ => SoundSource::File(PathBuf::from(s)),
        }
    }
}

impl From<&str> for SoundSource {
    fn from(s: &str) -> Self {
        Self::classify(s)
    }
}

impl From<String> for SoundSource {
    fn from(s: String) -> Self {
        Self::classify(&s)
    }
}

impl From<PathBuf> for SoundSource {
    fn from(path: PathBuf) -> Self {
        SoundSource::File(path)
    }
}

impl From<&Path> for SoundSource {
    fn from(path: &Path) -> Self {
        SoundSource::File(path.to_path_buf())
    }
}

impl From<Url> for SoundSource {
    fn from(url: Url) -> Self {
        SoundSource::Url(url)
    }
}

impl From<Vec<u8>> for SoundSource {
    fn from(bytes: Vec<u8>) -> Self {
        SoundSource::Memory(bytes)
    }
}

impl From<&[u8]> for SoundSource {
    fn from(bytes: &[u8]) -> Self {
        SoundSource::Memory(bytes.to_vec())
    }
}

/// A sound with no native handle yet
pub struct UnloadedSound<'e> {
    engine: &'e Engine,
    source: Option<SoundSource>,
}

impl<'e> UnloadedSound<'e> {
    pub fn new(engine: &'e Engine) -> Self {
        Self { engine, source: None }
    }

    pub fn with_source(engine: &'e Engine, source: impl Into<SoundSource>) -> Self {
        Self {
            engine,
            source: Some(source.into()),
        }
    }

    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    pub fn source(&self) -> Option<&SoundSource> {
        self.source.as_ref()
    }

    /// Load `source`, or the source given at construction when `None`.
    /// `stream` decodes on the fly instead of decoding the whole file up front.
    pub fn load(&self, source: Option<SoundSource>, stream: bool) -> SoundResult<LoadedSound<'e>> {
        match source.or_else(|| self.source.clone()) {
            Some(SoundSource::File(path)) => self.load_from_file(path, stream),
            Some(SoundSource::Url(url)) => self.load_from_url(&url, stream),
            Some(SoundSource::Memory(bytes)) => self.load_from_memory(&bytes, stream),
            None => Err(SoundError::NoSource),
        }
    }

    pub fn load_from_file(&self, path: impl AsRef<Path>, stream: bool) -> SoundResult<LoadedSound<'e>> {
        let path = path.as_ref();
        let c_path = native::path_to_cstring(path)?;
        let flags = if stream {
            sys::MA_SOUND_FLAG_STREAM
        } else {
            sys::MA_SOUND_FLAG_DECODE
        };

        let sound = native::alloc_zeroed::<sys::ma_sound>();
        let result = unsafe {
            sys::ma_sound_init_from_file(
                self.engine.raw(),
                c_path.as_ptr(),
                flags as u32,
                ptr::null_mut(),
                ptr::null_mut(),
                sound.as_ptr(),
            )
        };
        if let Err(result) = MaResult::check(result) {
            unsafe { native::free(sound) };
            debug!("Failed to load {}: {result}", path.display());
            return Err(SoundError::LoadFile(result));
        }

        debug!(
            "Loaded {} ({})",
            path.display(),
            if stream { "streaming" } else { "decoded" }
        );
        Ok(LoadedSound {
            engine: self.engine,
            sound,
            source: SoundSource::File(path.to_path_buf()),
        })
    }

    pub fn load_from_url(&self, _url: &Url, _stream: bool) -> SoundResult<LoadedSound<'e>> {
        Err(SoundError::NotImplemented("URL"))
    }

    pub fn load_from_memory(&self, _bytes: &[u8], _stream: bool) -> SoundResult<LoadedSound<'e>> {
        Err(SoundError::NotImplemented("Memory"))
    }
}

/// A sound owning one initialized `ma_sound`.
///
/// Borrows its engine, so the engine cannot be dropped first.
pub struct LoadedSound<'e> {
    engine: &'e Engine,
    sound: NonNull<sys::ma_sound>,
    source: SoundSource,
}

impl<'e> LoadedSound<'e> {
    fn raw(&self) -> *mut sys::ma_sound {
        self.sound.as_ptr()
    }

    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    pub fn source(&self) -> &SoundSource {
        &self.source
    }

    // ─── Transport ─────────────────────────────────────────────────────────

    pub fn play(&self) -> bool {
        unsafe { sys::ma_sound_start(self.raw()) == sys::MA_SUCCESS }
    }

    /// Stop without rewinding; `play` resumes from the same cursor
    pub fn pause(&self) -> bool {
        unsafe { sys::ma_sound_stop(self.raw()) == sys::MA_SUCCESS }
    }

    pub fn stop(&self) -> bool {
        unsafe { sys::ma_sound_stop(self.raw()) == sys::MA_SUCCESS }
    }

    pub fn is_playing(&self) -> bool {
        unsafe { bool_from_raw(sys::ma_sound_is_playing(self.raw())) }
    }

    pub fn looping(&self) -> bool {
        unsafe { bool_from_raw(sys::ma_sound_is_looping(self.raw())) }
    }

    pub fn set_looping(&self, looping: bool) {
        unsafe { sys::ma_sound_set_looping(self.raw(), bool_to_raw(looping)) }
    }

    /// Total length, or 0.0 when the decoder cannot tell
    pub fn length_in_seconds(&self) -> f32 {
        let mut length = 0.0;
        match unsafe { sys::ma_sound_get_length_in_seconds(self.raw(), &mut length) } {
            sys::MA_SUCCESS => length,
            _ => 0.0,
        }
    }

    pub fn position_in_seconds(&self) -> f32 {
        let mut cursor = 0.0;
        match unsafe { sys::ma_sound_get_cursor_in_seconds(self.raw(), &mut cursor) } {
            sys::MA_SUCCESS => cursor,
            _ => 0.0,
        }
    }

    pub fn seek_to_second(&self, seconds: f32) -> bool {
        unsafe { sys::ma_sound_seek_to_second(self.raw(), seconds) == sys::MA_SUCCESS }
    }

    // ─── Mixing ────────────────────────────────────────────────────────────

    pub fn volume(&self) -> f32 {
        unsafe { sys::ma_sound_get_volume(self.raw()) }
    }

    pub fn set_volume(&self, volume: f32) {
        unsafe { sys::ma_sound_set_volume(self.raw(), volume) }
    }

    /// Pitch multiplier, 1.0 is unchanged
    pub fn pitch(&self) -> f32 {
        unsafe { sys::ma_sound_get_pitch(self.raw()) }
    }

    pub fn set_pitch(&self, pitch: f32) {
        unsafe { sys::ma_sound_set_pitch(self.raw(), pitch) }
    }

    /// Stereo pan from -1.0 (left) to 1.0 (right)
    pub fn pan(&self) -> f32 {
        unsafe { sys::ma_sound_get_pan(self.raw()) }
    }

    pub fn set_pan(&self, pan: f32) {
        unsafe { sys::ma_sound_set_pan(self.raw(), pan) }
    }

    /// Linear volume ramp from `start` to `end`
    pub fn fade_in(&self, duration_ms: u64, start: f32, end: f32) {
        unsafe { sys::ma_sound_set_fade_in_milliseconds(self.raw(), start, end, duration_ms) }
    }

    /// Linear volume ramp from the current fade volume to `end`. The sound
    /// keeps playing afterwards.
    pub fn fade_out(&self, duration_ms: u64, end: f32) {
        // A negative start volume makes miniaudio begin at the current fade level
        unsafe { sys::ma_sound_set_fade_in_milliseconds(self.raw(), -1.0, end, duration_ms) }
    }

    // ─── Spatialization ────────────────────────────────────────────────────

    pub fn spatialization_enabled(&self) -> bool {
        unsafe { bool_from_raw(sys::ma_sound_is_spatialization_enabled(self.raw())) }
    }

    pub fn set_spatialization_enabled(&self, enabled: bool) {
        unsafe { sys::ma_sound_set_spatialization_enabled(self.raw(), bool_to_raw(enabled)) }
    }

    pub fn position(&self) -> Vec3 {
        unsafe { vec3_from_raw(sys::ma_sound_get_position(self.raw())) }
    }

    pub fn set_position(&self, position: Vec3) {
        unsafe { sys::ma_sound_set_position(self.raw(), position.x, position.y, position.z) }
    }

    pub fn direction(&self) -> Vec3 {
        unsafe { vec3_from_raw(sys::ma_sound_get_direction(self.raw())) }
    }

    pub fn set_direction(&self, direction: Vec3) {
        unsafe { sys::ma_sound_set_direction(self.raw(), direction.x, direction.y, direction.z) }
    }

    pub fn velocity(&self) -> Vec3 {
        unsafe { vec3_from_raw(sys::ma_sound_get_velocity(self.raw())) }
    }

    pub fn set_velocity(&self, velocity: Vec3) {
        unsafe { sys::ma_sound_set_velocity(self.raw(), velocity.x, velocity.y, velocity.z) }
    }

    pub fn attenuation_model(&self) -> AttenuationModel {
        unsafe { AttenuationModel::from_raw(sys::ma_sound_get_attenuation_model(self.raw())) }
    }

    /// Names such as `"linear"` convert with `str::parse` or `try_into`
    pub fn set_attenuation_model(&self, model: AttenuationModel) {
        unsafe { sys::ma_sound_set_attenuation_model(self.raw(), model.to_raw()) }
    }

    pub fn positioning(&self) -> PositioningMode {
        unsafe { PositioningMode::from_raw(sys::ma_sound_get_positioning(self.raw())) }
    }

    /// Names such as `"relative"` convert with `str::parse` or `try_into`
    pub fn set_positioning(&self, mode: PositioningMode) {
        unsafe { sys::ma_sound_set_positioning(self.raw(), mode.to_raw()) }
    }

    pub fn rolloff(&self) -> f32 {
        unsafe { sys::ma_sound_get_rolloff(self.raw()) }
    }

    pub fn set_rolloff(&self, rolloff: f32) {
        unsafe { sys::ma_sound_set_rolloff(self.raw(), rolloff) }
    }

    pub fn min_distance(&self) -> f32 {
        unsafe { sys::ma_sound_get_min_distance(self.raw()) }
    }

    pub fn set_min_distance(&self, distance: f32) {
        unsafe { sys::ma_sound_set_min_distance(self.raw(), distance) }
    }

    pub fn max_distance(&self) -> f32 {
        unsafe { sys::ma_sound_get_max_distance(self.raw()) }
    }

    pub fn set_max_distance(&self, distance: f32) {
        unsafe { sys::ma_sound_set_max_distance(self.raw(), distance) }
    }

    pub fn min_gain(&self) -> f32 {
        unsafe { sys::ma_sound_get_min_gain(self.raw()) }
    }

    pub fn set_min_gain(&self, gain: f32) {
        unsafe { sys::ma_sound_set_min_gain(self.raw(), gain) }
    }

    pub fn max_gain(&self) -> f32 {
        unsafe { sys::ma_sound_get_max_gain(self.raw()) }
    }

    pub fn set_max_gain(&self, gain: f32) {
        unsafe { sys::ma_sound_set_max_gain(self.raw(), gain) }
    }

    pub fn cone(&self) -> Cone {
        let mut cone = Cone::default();
        unsafe {
            sys::ma_sound_get_cone(
                self.raw(),
                &mut cone.inner_angle,
                &mut cone.outer_angle,
                &mut cone.outer_gain,
            );
        }
        cone
    }

    pub fn set_cone(&self, cone: Cone) {
        unsafe { sys::ma_sound_set_cone(self.raw(), cone.inner_angle, cone.outer_angle, cone.outer_gain) }
    }

    pub fn doppler_factor(&self) -> f32 {
        unsafe { sys::ma_sound_get_doppler_factor(self.raw()) }
    }

    pub fn set_doppler_factor(&self, factor: f32) {
        unsafe { sys::ma_sound_set_doppler_factor(self.raw(), factor) }
    }

    pub fn directional_attenuation_factor(&self) -> f32 {
        unsafe { sys::ma_sound_get_directional_attenuation_factor(self.raw()) }
    }

    pub fn set_directional_attenuation_factor(&self, factor: f32) {
        unsafe { sys::ma_sound_set_directional_attenuation_factor(self.raw(), factor) }
    }

    /// Direction from the sound to the listener it is heard by
    pub fn direction_to_listener(&self) -> Vec3 {
        unsafe { vec3_from_raw(sys::ma_sound_get_direction_to_listener(self.raw())) }
    }

    /// Listener the sound is pinned to, `None` when it follows the closest one
    pub fn pinned_listener_index(&self) -> Option<u32> {
        match unsafe { sys::ma_sound_get_pinned_listener_index(self.raw()) } {
            LISTENER_INDEX_CLOSEST => None,
            index => Some(index),
        }
    }

    pub fn set_pinned_listener_index(&self, index: Option<u32>) {
        let index = index.unwrap_or(LISTENER_INDEX_CLOSEST);
        unsafe { sys::ma_sound_set_pinned_listener_index(self.raw(), index) }
    }

    /// Listener currently used to spatialize the sound
    pub fn listener_index(&self) -> u32 {
        unsafe { sys::ma_sound_get_listener_index(self.raw()) }
    }
}

impl Drop for LoadedSound<'_> {
    fn drop(&mut self) {
        unsafe {
            sys::ma_sound_uninit(self.sound.as_ptr());
            native::free(self.sound);
        }
        debug!("Sound released: {:?}", self.source);
    }
}

/// Either state of a sound.
///
/// Accessors on an unloaded sound return inert defaults and mutators
/// return `false` without touching native memory.
pub enum Sound<'e> {
    Unloaded(UnloadedSound<'e>),
    Loaded(LoadedSound<'e>),
}

macro_rules! loaded_get {
    ($($name:ident -> $ty:ty = $default:expr;)*) => {
        $(
            pub fn $name(&self) -> $ty {
                match self {
                    Sound::Loaded(sound) => sound.$name(),
                    Sound::Unloaded(_) => $default,
                }
            }
        )*
    };
}

macro_rules! loaded_set {
    ($($name:ident($arg:ident: $ty:ty);)*) => {
        $(
            pub fn $name(&self, $arg: $ty) -> bool {
                match self {
                    Sound::Loaded(sound) => {
                        sound.$name($arg);
                        true
                    }
                    Sound::Unloaded(_) => false,
                }
            }
        )*
    };
}

impl<'e> Sound<'e> {
    pub fn new(engine: &'e Engine) -> Self {
        Sound::Unloaded(UnloadedSound::new(engine))
    }

    /// Create and load immediately, streaming from disk
    pub fn with_source(engine: &'e Engine, source: impl Into<SoundSource>) -> SoundResult<Self> {
        let loaded = UnloadedSound::with_source(engine, source).load(None, true)?;
        Ok(Sound::Loaded(loaded))
    }

    pub fn engine(&self) -> &'e Engine {
        match self {
            Sound::Unloaded(sound) => sound.engine(),
            Sound::Loaded(sound) => sound.engine(),
        }
    }

    pub fn source(&self) -> Option<&SoundSource> {
        match self {
            Sound::Unloaded(sound) => sound.source(),
            Sound::Loaded(sound) => Some(sound.source()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Sound::Loaded(_))
    }

    pub fn as_loaded(&self) -> Option<&LoadedSound<'e>> {
        match self {
            Sound::Loaded(sound) => Some(sound),
            Sound::Unloaded(_) => None,
        }
    }

    /// Returns `Ok(false)` when there is nothing to load. A sound is never
    /// reloaded in place.
    pub fn load(&mut self, source: Option<SoundSource>, stream: bool) -> SoundResult<bool> {
        let loaded = match self {
            Sound::Loaded(_) => return Err(SoundError::AlreadyLoaded),
            Sound::Unloaded(sound) => match sound.load(source, stream) {
                Ok(loaded) => loaded,
                Err(SoundError::NoSource) => return Ok(false),
                Err(e) => return Err(e),
            },
        };
        *self = Sound::Loaded(loaded);
        Ok(true)
    }

    pub fn load_from_file(&mut self, path: impl AsRef<Path>, stream: bool) -> SoundResult<()> {
        let loaded = match self {
            Sound::Loaded(_) => return Err(SoundError::AlreadyLoaded),
            Sound::Unloaded(sound) => sound.load_from_file(path, stream)?,
        };
        *self = Sound::Loaded(loaded);
        Ok(())
    }

    pub fn load_from_url(&mut self, url: &Url, stream: bool) -> SoundResult<()> {
        let loaded = match self {
            Sound::Loaded(_) => return Err(SoundError::AlreadyLoaded),
            Sound::Unloaded(sound) => sound.load_from_url(url, stream)?,
        };
        *self = Sound::Loaded(loaded);
        Ok(())
    }

    pub fn load_from_memory(&mut self, bytes: &[u8], stream: bool) -> SoundResult<()> {
        let loaded = match self {
            Sound::Loaded(_) => return Err(SoundError::AlreadyLoaded),
            Sound::Unloaded(sound) => sound.load_from_memory(bytes, stream)?,
        };
        *self = Sound::Loaded(loaded);
        Ok(())
    }

    loaded_get! {
        play -> bool = false;
        pause -> bool = false;
        stop -> bool = false;
        is_playing -> bool = false;
        looping -> bool = false;
        length_in_seconds -> f32 = 0.0;
        position_in_seconds -> f32 = 0.0;
        volume -> f32 = 0.0;
        pitch -> f32 = 1.0;
        pan -> f32 = 0.0;
        spatialization_enabled -> bool = false;
        position -> Vec3 = Vec3::ZERO;
        direction -> Vec3 = Vec3::ZERO;
        velocity -> Vec3 = Vec3::ZERO;
        attenuation_model -> AttenuationModel = AttenuationModel::None;
        positioning -> PositioningMode = PositioningMode::Absolute;
        rolloff -> f32 = 1.0;
        min_distance -> f32 = 1.0;
        max_distance -> f32 = 1000.0;
        min_gain -> f32 = 0.0;
        max_gain -> f32 = 1.0;
        cone -> Cone = Cone::default();
        doppler_factor -> f32 = 1.0;
        directional_attenuation_factor -> f32 = 1.0;
        direction_to_listener -> Vec3 = Vec3::ZERO;
        pinned_listener_index -> Option<u32> = None;
        listener_index -> u32 = 0;
    }

    loaded_set! {
        set_looping(looping: bool);
        set_volume(volume: f32);
        set_pitch(pitch: f32);
        set_pan(pan: f32);
        set_spatialization_enabled(enabled: bool);
        set_position(position: Vec3);
        set_direction(direction: Vec3);
        set_velocity(velocity: Vec3);
        set_attenuation_model(model: AttenuationModel);
        set_positioning(mode: PositioningMode);
        set_rolloff(rolloff: f32);
        set_min_distance(distance: f32);
        set_max_distance(distance: f32);
        set_min_gain(gain: f32);
        set_max_gain(gain: f32);
        set_cone(cone: Cone);
        set_doppler_factor(factor: f32);
        set_directional_attenuation_factor(factor: f32);
        set_pinned_listener_index(index: Option<u32>);
    }

    pub fn seek_to_second(&self, seconds: f32) -> bool {
        match self {
            Sound::Loaded(sound) => sound.seek_to_second(seconds),
            Sound::Unloaded(_) => false,
        }
    }

    pub fn fade_in(&self, duration_ms: u64, start: f32, end: f32) -> bool {
        match self {
            Sound::Loaded(sound) => {
                sound.fade_in(duration_ms, start, end);
                true
            }
            Sound::Unloaded(_) => false,
        }
    }

    pub fn fade_out(&self, duration_ms: u64, end: f32) -> bool {
        match self {
            Sound::Loaded(sound) => {
                sound.fade_out(duration_ms, end);
                true
            }
            Sound::Unloaded(_) => false,
        }
    }
}

impl<'e> From<UnloadedSound<'e>> for Sound<'e> {
    fn from(sound: UnloadedSound<'e>) -> Self {
        Sound::Unloaded(sound)
    }
}

impl<'e> From<LoadedSound<'e>> for Sound<'e> {
    fn from(sound: LoadedSound<'e>) -> Self {
        Sound::Loaded(sound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{offline_config, write_wav, RATE};

    fn offline_engine() -> Engine {
        Engine::with_config(&offline_config()).unwrap()
    }

    #[test]
    fn test_classify_source() {
        assert!(matches!(
            SoundSource::classify("http://example.com/a.wav"),
            SoundSource::Url(_)
        ));
        assert_eq!(SoundSource::classify("a.wav"), SoundSource::File(PathBuf::from("a.wav")));
        assert!(matches!(SoundSource::classify("C:\\music\\a.wav"), SoundSource::File(_)));
        assert!(matches!(SoundSource::classify("file:///tmp/a.wav"), SoundSource::File(_)));
        assert!(matches!(SoundSource::from(&b"RIFF"[..]), SoundSource::Memory(_)));
        // Rejected by the URL parser, so it is treated as a path
        assert!(matches!(SoundSource::classify("http://exa mple.com/a.wav"), SoundSource::File(_)));
    }

    #[test]
    fn test_unloaded_defaults() {
        let engine = offline_engine();
        let sound = Sound::new(&engine);

        assert!(!sound.is_loaded());
        assert!(sound.as_loaded().is_none());
        assert!(sound.source().is_none());
        assert!(std::ptr::eq(sound.engine(), &engine));

        assert_eq!(sound.volume(), 0.0);
        assert!(!sound.is_playing());
        assert!(!sound.looping());
        assert_eq!(sound.length_in_seconds(), 0.0);
        assert_eq!(sound.position_in_seconds(), 0.0);
        assert_eq!(sound.pitch(), 1.0);
        assert_eq!(sound.pan(), 0.0);
        assert!(!sound.spatialization_enabled());
        assert_eq!(sound.position(), Vec3::ZERO);
        assert_eq!(sound.direction(), Vec3::ZERO);
        assert_eq!(sound.velocity(), Vec3::ZERO);
        assert_eq!(sound.direction_to_listener(), Vec3::ZERO);
        assert_eq!(sound.attenuation_model(), AttenuationModel::None);
        assert_eq!(sound.positioning(), PositioningMode::Absolute);
        assert_eq!(sound.rolloff(), 1.0);
        assert_eq!(sound.min_distance(), 1.0);
        assert_eq!(sound.max_distance(), 1000.0);
        assert_eq!(sound.min_gain(), 0.0);
        assert_eq!(sound.max_gain(), 1.0);
        assert_eq!(sound.cone(), Cone::default());
        assert_eq!(sound.doppler_factor(), 1.0);
        assert_eq!(sound.directional_attenuation_factor(), 1.0);
        assert_eq!(sound.pinned_listener_index(), None);
        assert_eq!(sound.listener_index(), 0);
    }

    #[test]
    fn test_unloaded_mutators_are_noops() {
        let engine = offline_engine();
        let sound = Sound::new(&engine);

        assert!(!sound.play());
        assert!(!sound.pause());
        assert!(!sound.stop());
        assert!(!sound.seek_to_second(1.0));
        assert!(!sound.fade_in(100, 0.0, 1.0));
        assert!(!sound.fade_out(100, 0.0));

        let applied = [
            sound.set_looping(true),
            sound.set_volume(0.5),
            sound.set_pitch(2.0),
            sound.set_pan(-1.0),
            sound.set_spatialization_enabled(true),
            sound.set_position(Vec3::ONE),
            sound.set_direction(Vec3::X),
            sound.set_velocity(Vec3::Y),
            sound.set_attenuation_model(AttenuationModel::Exponential),
            sound.set_positioning(PositioningMode::Relative),
            sound.set_rolloff(2.0),
            sound.set_min_distance(5.0),
            sound.set_max_distance(50.0),
            sound.set_min_gain(0.1),
            sound.set_max_gain(0.9),
            sound.set_cone(Cone::new(0.5, 1.0, 0.5)),
            sound.set_doppler_factor(0.0),
            sound.set_directional_attenuation_factor(0.5),
            sound.set_pinned_listener_index(Some(1)),
        ];
        assert!(applied.iter().all(|ok| !ok));

        // Nothing stuck
        assert_eq!(sound.volume(), 0.0);
        assert!(!sound.looping());
        assert_eq!(sound.position(), Vec3::ZERO);
        assert_eq!(sound.attenuation_model(), AttenuationModel::None);
        assert_eq!(sound.pinned_listener_index(), None);
        assert!(!sound.is_loaded());
    }

    #[test]
    fn test_load_without_source() {
        let engine = offline_engine();
        let mut sound = Sound::new(&engine);
        assert!(!sound.load(None, true).unwrap());
        assert!(!sound.is_loaded());
    }

    #[test]
    fn test_url_and_memory_not_implemented() {
        let engine = offline_engine();
        let mut sound = Sound::new(&engine);

        let err = sound.load(Some("http://example.com/a.wav".into()), true).unwrap_err();
        assert!(err.is_not_implemented());
        assert_eq!(err.to_string(), "URL loading not yet implemented");

        let err = sound.load(Some(vec![0u8; 16].into()), false).unwrap_err();
        assert!(matches!(err, SoundError::NotImplemented("Memory")));
        assert!(sound.load_from_memory(b"RIFF", true).unwrap_err().is_not_implemented());
        assert!(!sound.is_loaded());
    }

    #[test]
    fn test_bare_path_routes_to_file_loading() {
        let engine = offline_engine();
        let mut sound = Sound::new(&engine);
        let err = sound.load(Some("a.wav".into()), true).unwrap_err();
        assert!(matches!(err, SoundError::LoadFile(_)));
        assert!(err.result_code().is_some());
    }

    #[test]
    fn test_load_play_and_volume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, RATE / 10);

        let engine = offline_engine();
        let mut sound = Sound::new(&engine);
        assert!(sound.load(Some(path.clone().into()), false).unwrap());
        assert!(sound.is_loaded());
        assert_eq!(sound.source(), Some(&SoundSource::File(path.clone())));

        assert!(sound.play());
        assert!(sound.set_volume(0.5));
        assert!((sound.volume() - 0.5).abs() < 1e-6);
        assert!((sound.length_in_seconds() - 0.1).abs() < 0.01);

        assert!(matches!(
            sound.load(Some(path.into()), false),
            Err(SoundError::AlreadyLoaded)
        ));

        assert!(sound.pause());
        assert!(!sound.is_playing());
        assert!(sound.play());
        assert!(sound.stop());
        assert!(!sound.is_playing());
    }

    #[test]
    fn test_attenuation_name_and_enum_are_equivalent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, RATE / 10);

        let engine = offline_engine();
        let by_name = Sound::with_source(&engine, path.as_path()).unwrap();
        let by_enum = Sound::with_source(&engine, path.as_path()).unwrap();

        assert!(by_name.set_attenuation_model("linear".parse().unwrap()));
        assert!(by_enum.set_attenuation_model(AttenuationModel::Linear));
        assert_eq!(by_name.attenuation_model(), AttenuationModel::Linear);
        assert_eq!(by_name.attenuation_model(), by_enum.attenuation_model());

        assert!(by_name.set_positioning("relative".try_into().unwrap()));
        assert_eq!(by_name.positioning(), PositioningMode::Relative);
    }

    #[test]
    fn test_loaded_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, RATE / 10);

        let engine = offline_engine();
        let sound = UnloadedSound::with_source(&engine, path.as_path()).load(None, true).unwrap();

        sound.set_attenuation_model("linear".parse().unwrap());
        assert_eq!(sound.attenuation_model(), AttenuationModel::Linear);
        sound.set_positioning(PositioningMode::Relative);
        assert_eq!(sound.positioning(), PositioningMode::Relative);

        sound.set_position(Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(sound.position(), Vec3::new(1.0, 0.0, -2.0));

        sound.set_looping(true);
        assert!(sound.looping());

        sound.set_pitch(1.5);
        assert!((sound.pitch() - 1.5).abs() < 1e-6);

        let cone = Cone::new(0.5, 1.5, 0.2);
        sound.set_cone(cone);
        assert_eq!(sound.cone(), cone);

        assert_eq!(sound.pinned_listener_index(), None);
        sound.set_pinned_listener_index(Some(0));
        assert_eq!(sound.pinned_listener_index(), Some(0));
        sound.set_pinned_listener_index(None);
        assert_eq!(sound.pinned_listener_index(), None);

        assert!(sound.seek_to_second(0.05));
        sound.fade_in(10, 0.0, 1.0);
        sound.fade_out(10, 0.0);
        assert!(std::ptr::eq(sound.engine(), &engine));
    }
}
