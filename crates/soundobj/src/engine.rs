//! Safe wrapper around `ma_engine`.
//!
//! The engine owns the playback device, the node graph every sound mixes
//! into, and up to four 3D listeners.

use std::path::Path;
use std::ptr::{self, NonNull};

use soundobj_sys as sys;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{MaResult, SoundError, SoundResult};
use crate::native;
use crate::types::{bool_from_raw, bool_to_raw, vec3_from_raw, Cone, Vec3};

/// Owns one initialized `ma_engine` and, unless disabled, the resource
/// manager that carries the custom decoding backends.
///
/// NOT Send/Sync: the raw handles tie it to the thread that created it.
/// Sounds borrow the engine, so it always outlives them.
pub struct Engine {
    engine: NonNull<sys::ma_engine>,
    resource_manager: Option<NonNull<sys::ma_resource_manager>>,
    custom_decoder_count: u32,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with miniaudio's default configuration.
    pub fn new() -> SoundResult<Self> {
        Self::with_config(&EngineConfig::default())
    }

    /// Create an engine, overriding the native defaults with every non-zero
    /// field of `config`.
    pub fn with_config(config: &EngineConfig) -> SoundResult<Self> {
        let rm_config = if config.no_resource_manager {
            None
        } else {
            Some(custom_decoder_resource_manager_config())
        };
        Self::with_resource_manager_config(config, rm_config)
    }

    fn with_resource_manager_config(
        config: &EngineConfig,
        rm_config: Option<sys::ma_resource_manager_config>,
    ) -> SoundResult<Self> {
        let mut ma_config = unsafe { sys::ma_engine_config_init() };
        config.apply(&mut ma_config);

        let resource_manager = rm_config.as_ref().and_then(init_resource_manager);
        let custom_decoder_count = match (resource_manager, &rm_config) {
            (Some(_), Some(rm_config)) => rm_config.customDecodingBackendCount,
            _ => 0,
        };
        if let Some(rm) = resource_manager {
            ma_config.pResourceManager = rm.as_ptr();
        }

        let engine = native::alloc_zeroed::<sys::ma_engine>();
        let result = unsafe { sys::ma_engine_init(&ma_config, engine.as_ptr()) };
        if let Err(result) = MaResult::check(result) {
            unsafe {
                native::free(engine);
                if let Some(rm) = resource_manager {
                    sys::ma_resource_manager_uninit(rm.as_ptr());
                    native::free(rm);
                }
            }
            return Err(SoundError::EngineInit(result));
        }

        let engine = Self {
            engine,
            resource_manager,
            custom_decoder_count,
            config: config.clone(),
        };
        info!(
            "Engine created: {} channels at {} Hz, {} listener(s)",
            engine.channels(),
            engine.sample_rate(),
            engine.listener_count()
        );
        Ok(engine)
    }

    /// Get the raw pointer (for FFI calls within the same thread)
    pub fn raw(&self) -> *mut sys::ma_engine {
        self.engine.as_ptr()
    }

    /// The configuration this engine was created with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the custom-decoder resource manager is in use
    pub fn has_resource_manager(&self) -> bool {
        self.resource_manager.is_some()
    }

    /// Number of custom decoding backends registered with the resource manager
    pub fn custom_decoder_count(&self) -> u32 {
        self.custom_decoder_count
    }

    pub fn start(&self) -> bool {
        unsafe { sys::ma_engine_start(self.raw()) == sys::MA_SUCCESS }
    }

    pub fn stop(&self) -> bool {
        unsafe { sys::ma_engine_stop(self.raw()) == sys::MA_SUCCESS }
    }

    /// Master volume as a linear factor (1.0 = unchanged)
    pub fn volume(&self) -> f32 {
        unsafe { sys::ma_engine_get_volume(self.raw()) }
    }

    pub fn set_volume(&self, volume: f32) -> bool {
        unsafe { sys::ma_engine_set_volume(self.raw(), volume) == sys::MA_SUCCESS }
    }

    pub fn channels(&self) -> u32 {
        unsafe { sys::ma_engine_get_channels(self.raw()) }
    }

    pub fn sample_rate(&self) -> u32 {
        unsafe { sys::ma_engine_get_sample_rate(self.raw()) }
    }

    /// Engine clock in milliseconds
    pub fn time_in_milliseconds(&self) -> u64 {
        unsafe { sys::ma_engine_get_time_in_milliseconds(self.raw()) }
    }

    /// Fire-and-forget playback of a file. The engine owns the sound and
    /// recycles it once it finishes.
    pub fn play_sound(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let c_path = match native::path_to_cstring(path) {
            Ok(p) => p,
            Err(e) => {
                warn!("play_sound rejected: {e}");
                return false;
            }
        };
        let result = unsafe { sys::ma_engine_play_sound(self.raw(), c_path.as_ptr(), ptr::null_mut()) };
        match MaResult::check(result) {
            Ok(()) => {
                debug!("Playing {}", path.display());
                true
            }
            Err(result) => {
                debug!("play_sound {} failed: {result}", path.display());
                false
            }
        }
    }

    // ─── Listeners ─────────────────────────────────────────────────────────

    pub fn listener_count(&self) -> u32 {
        unsafe { sys::ma_engine_get_listener_count(self.raw()) }
    }

    fn has_listener(&self, index: u32) -> bool {
        index < self.listener_count()
    }

    /// Index of the enabled listener closest to `position`
    pub fn find_closest_listener(&self, position: Vec3) -> u32 {
        unsafe { sys::ma_engine_find_closest_listener(self.raw(), position.x, position.y, position.z) }
    }

    pub fn set_listener_position(&self, index: u32, position: Vec3) -> bool {
        if !self.has_listener(index) {
            return false;
        }
        unsafe {
            sys::ma_engine_listener_set_position(self.raw(), index, position.x, position.y, position.z);
        }
        true
    }

    pub fn listener_position(&self, index: u32) -> Vec3 {
        if !self.has_listener(index) {
            return Vec3::ZERO;
        }
        unsafe { vec3_from_raw(sys::ma_engine_listener_get_position(self.raw(), index)) }
    }

    /// Set the direction the listener is facing
    pub fn set_listener_direction(&self, index: u32, direction: Vec3) -> bool {
        if !self.has_listener(index) {
            return false;
        }
        unsafe {
            sys::ma_engine_listener_set_direction(self.raw(), index, direction.x, direction.y, direction.z);
        }
        true
    }

    pub fn listener_direction(&self, index: u32) -> Vec3 {
        if !self.has_listener(index) {
            return Vec3::ZERO;
        }
        unsafe { vec3_from_raw(sys::ma_engine_listener_get_direction(self.raw(), index)) }
    }

    /// Set the listener velocity used for the Doppler effect
    pub fn set_listener_velocity(&self, index: u32, velocity: Vec3) -> bool {
        if !self.has_listener(index) {
            return false;
        }
        unsafe {
            sys::ma_engine_listener_set_velocity(self.raw(), index, velocity.x, velocity.y, velocity.z);
        }
        true
    }

    pub fn listener_velocity(&self, index: u32) -> Vec3 {
        if !self.has_listener(index) {
            return Vec3::ZERO;
        }
        unsafe { vec3_from_raw(sys::ma_engine_listener_get_velocity(self.raw(), index)) }
    }

    pub fn set_listener_cone(&self, index: u32, cone: Cone) -> bool {
        if !self.has_listener(index) {
            return false;
        }
        unsafe {
            sys::ma_engine_listener_set_cone(
                self.raw(),
                index,
                cone.inner_angle,
                cone.outer_angle,
                cone.outer_gain,
            );
        }
        true
    }

    pub fn listener_cone(&self, index: u32) -> Cone {
        if !self.has_listener(index) {
            return Cone::default();
        }
        let mut cone = Cone::default();
        unsafe {
            sys::ma_engine_listener_get_cone(
                self.raw(),
                index,
                &mut cone.inner_angle,
                &mut cone.outer_angle,
                &mut cone.outer_gain,
            );
        }
        cone
    }

    pub fn set_listener_world_up(&self, index: u32, up: Vec3) -> bool {
        if !self.has_listener(index) {
            return false;
        }
        unsafe {
            sys::ma_engine_listener_set_world_up(self.raw(), index, up.x, up.y, up.z);
        }
        true
    }

    pub fn listener_world_up(&self, index: u32) -> Vec3 {
        if !self.has_listener(index) {
            return Vec3::Y;
        }
        unsafe { vec3_from_raw(sys::ma_engine_listener_get_world_up(self.raw(), index)) }
    }

    pub fn set_listener_enabled(&self, index: u32, enabled: bool) -> bool {
        if !self.has_listener(index) {
            return false;
        }
        unsafe {
            sys::ma_engine_listener_set_enabled(self.raw(), index, bool_to_raw(enabled));
        }
        true
    }

    pub fn is_listener_enabled(&self, index: u32) -> bool {
        if !self.has_listener(index) {
            return false;
        }
        unsafe { bool_from_raw(sys::ma_engine_listener_is_enabled(self.raw(), index)) }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        unsafe {
            sys::ma_engine_uninit(self.engine.as_ptr());
            native::free(self.engine);

            // The engine references the resource manager, so it goes second
            if let Some(rm) = self.resource_manager.take() {
                sys::ma_resource_manager_uninit(rm.as_ptr());
                native::free(rm);
                debug!("Resource manager destroyed");
            }
        }
        info!("Engine destroyed");
    }
}

/// Resource manager settings carrying the shim's custom decoding backends
fn custom_decoder_resource_manager_config() -> sys::ma_resource_manager_config {
    let mut rm_config = unsafe { sys::ma_resource_manager_config_init() };
    let mut count = 0;
    rm_config.ppCustomDecodingBackendVTables = unsafe { sys::soundobj_get_custom_decoders(&mut count) };
    rm_config.customDecodingBackendCount = count;
    rm_config
}

/// Best effort: on failure the engine falls back to its internal resource
/// manager and only the built-in formats are available.
fn init_resource_manager(
    rm_config: &sys::ma_resource_manager_config,
) -> Option<NonNull<sys::ma_resource_manager>> {
    let rm = native::alloc_zeroed::<sys::ma_resource_manager>();
    let result = unsafe { sys::ma_resource_manager_init(rm_config, rm.as_ptr()) };
    match MaResult::check(result) {
        Ok(()) => {
            debug!(
                "Resource manager created with {} custom decoder(s)",
                rm_config.customDecodingBackendCount
            );
            Some(rm)
        }
        Err(result) => {
            warn!("Resource manager unavailable, custom decoders disabled: {result}");
            unsafe { native::free(rm) };
            None
        }
    }
}
