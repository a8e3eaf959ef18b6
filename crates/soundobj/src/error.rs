use std::ffi::CStr;
use std::fmt;

use soundobj_sys as sys;
use thiserror::Error;

/// Raw result code returned by a native miniaudio call.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaResult(pub sys::ma_result);

impl MaResult {
    pub const SUCCESS: MaResult = MaResult(sys::MA_SUCCESS);

    /// Turn a native return code into `Ok(())` or the failing code.
    pub fn check(raw: sys::ma_result) -> Result<(), MaResult> {
        if raw == sys::MA_SUCCESS {
            Ok(())
        } else {
            Err(MaResult(raw))
        }
    }

    pub fn code(self) -> i32 {
        self.0 as i32
    }

    pub fn is_success(self) -> bool {
        self.0 == sys::MA_SUCCESS
    }

    /// Human readable description from miniaudio itself.
    pub fn description(self) -> String {
        unsafe {
            let ptr = sys::ma_result_description(self.0);
            if ptr.is_null() {
                return String::new();
            }
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    }

    /// Symbolic name of the code, as spelled in miniaudio's `ma_result` enum.
    pub fn name(self) -> &'static str {
        match self.0 {
            sys::MA_SUCCESS => "MA_SUCCESS",
            sys::MA_ERROR => "MA_ERROR",
            sys::MA_INVALID_ARGS => "MA_INVALID_ARGS",
            sys::MA_INVALID_OPERATION => "MA_INVALID_OPERATION",
            sys::MA_OUT_OF_MEMORY => "MA_OUT_OF_MEMORY",
            sys::MA_OUT_OF_RANGE => "MA_OUT_OF_RANGE",
            sys::MA_ACCESS_DENIED => "MA_ACCESS_DENIED",
            sys::MA_DOES_NOT_EXIST => "MA_DOES_NOT_EXIST",
            sys::MA_ALREADY_EXISTS => "MA_ALREADY_EXISTS",
            sys::MA_TOO_MANY_OPEN_FILES => "MA_TOO_MANY_OPEN_FILES",
            sys::MA_INVALID_FILE => "MA_INVALID_FILE",
            sys::MA_TOO_BIG => "MA_TOO_BIG",
            sys::MA_PATH_TOO_LONG => "MA_PATH_TOO_LONG",
            sys::MA_NAME_TOO_LONG => "MA_NAME_TOO_LONG",
            sys::MA_NOT_DIRECTORY => "MA_NOT_DIRECTORY",
            sys::MA_IS_DIRECTORY => "MA_IS_DIRECTORY",
            sys::MA_DIRECTORY_NOT_EMPTY => "MA_DIRECTORY_NOT_EMPTY",
            sys::MA_AT_END => "MA_AT_END",
            sys::MA_NO_SPACE => "MA_NO_SPACE",
            sys::MA_BUSY => "MA_BUSY",
            sys::MA_IO_ERROR => "MA_IO_ERROR",
            sys::MA_INTERRUPT => "MA_INTERRUPT",
            sys::MA_UNAVAILABLE => "MA_UNAVAILABLE",
            sys::MA_ALREADY_IN_USE => "MA_ALREADY_IN_USE",
            sys::MA_BAD_ADDRESS => "MA_BAD_ADDRESS",
            sys::MA_BAD_SEEK => "MA_BAD_SEEK",
            sys::MA_BAD_PIPE => "MA_BAD_PIPE",
            sys::MA_DEADLOCK => "MA_DEADLOCK",
            sys::MA_TOO_MANY_LINKS => "MA_TOO_MANY_LINKS",
            sys::MA_NOT_IMPLEMENTED => "MA_NOT_IMPLEMENTED",
            sys::MA_NO_MESSAGE => "MA_NO_MESSAGE",
            sys::MA_BAD_MESSAGE => "MA_BAD_MESSAGE",
            sys::MA_NO_DATA_AVAILABLE => "MA_NO_DATA_AVAILABLE",
            sys::MA_INVALID_DATA => "MA_INVALID_DATA",
            sys::MA_TIMEOUT => "MA_TIMEOUT",
            sys::MA_NO_NETWORK => "MA_NO_NETWORK",
            sys::MA_NOT_UNIQUE => "MA_NOT_UNIQUE",
            sys::MA_NOT_SOCKET => "MA_NOT_SOCKET",
            sys::MA_NO_ADDRESS => "MA_NO_ADDRESS",
            sys::MA_BAD_PROTOCOL => "MA_BAD_PROTOCOL",
            sys::MA_PROTOCOL_UNAVAILABLE => "MA_PROTOCOL_UNAVAILABLE",
            sys::MA_PROTOCOL_NOT_SUPPORTED => "MA_PROTOCOL_NOT_SUPPORTED",
            sys::MA_PROTOCOL_FAMILY_NOT_SUPPORTED => "MA_PROTOCOL_FAMILY_NOT_SUPPORTED",
            sys::MA_ADDRESS_FAMILY_NOT_SUPPORTED => "MA_ADDRESS_FAMILY_NOT_SUPPORTED",
            sys::MA_SOCKET_NOT_SUPPORTED => "MA_SOCKET_NOT_SUPPORTED",
            sys::MA_CONNECTION_RESET => "MA_CONNECTION_RESET",
            sys::MA_ALREADY_CONNECTED => "MA_ALREADY_CONNECTED",
            sys::MA_NOT_CONNECTED => "MA_NOT_CONNECTED",
            sys::MA_CONNECTION_REFUSED => "MA_CONNECTION_REFUSED",
            sys::MA_NO_HOST => "MA_NO_HOST",
            sys::MA_IN_PROGRESS => "MA_IN_PROGRESS",
            sys::MA_CANCELLED => "MA_CANCELLED",
            sys::MA_MEMORY_ALREADY_MAPPED => "MA_MEMORY_ALREADY_MAPPED",
            sys::MA_CRC_MISMATCH => "MA_CRC_MISMATCH",
            sys::MA_FORMAT_NOT_SUPPORTED => "MA_FORMAT_NOT_SUPPORTED",
            sys::MA_DEVICE_TYPE_NOT_SUPPORTED => "MA_DEVICE_TYPE_NOT_SUPPORTED",
            sys::MA_SHARE_MODE_NOT_SUPPORTED => "MA_SHARE_MODE_NOT_SUPPORTED",
            sys::MA_NO_BACKEND => "MA_NO_BACKEND",
            sys::MA_NO_DEVICE => "MA_NO_DEVICE",
            sys::MA_API_NOT_FOUND => "MA_API_NOT_FOUND",
            sys::MA_INVALID_DEVICE_CONFIG => "MA_INVALID_DEVICE_CONFIG",
            sys::MA_LOOP => "MA_LOOP",
            sys::MA_BACKEND_NOT_ENABLED => "MA_BACKEND_NOT_ENABLED",
            sys::MA_DEVICE_NOT_INITIALIZED => "MA_DEVICE_NOT_INITIALIZED",
            sys::MA_DEVICE_ALREADY_INITIALIZED => "MA_DEVICE_ALREADY_INITIALIZED",
            sys::MA_DEVICE_NOT_STARTED => "MA_DEVICE_NOT_STARTED",
            sys::MA_DEVICE_NOT_STOPPED => "MA_DEVICE_NOT_STOPPED",
            sys::MA_FAILED_TO_INIT_BACKEND => "MA_FAILED_TO_INIT_BACKEND",
            sys::MA_FAILED_TO_OPEN_BACKEND_DEVICE => "MA_FAILED_TO_OPEN_BACKEND_DEVICE",
            sys::MA_FAILED_TO_START_BACKEND_DEVICE => "MA_FAILED_TO_START_BACKEND_DEVICE",
            sys::MA_FAILED_TO_STOP_BACKEND_DEVICE => "MA_FAILED_TO_STOP_BACKEND_DEVICE",
            _ => "UNKNOWN_MA_RESULT",
        }
    }
}

impl fmt::Display for MaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

impl fmt::Debug for MaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MaResult({}, {})", self.name(), self.0)
    }
}

#[derive(Error, Debug)]
pub enum SoundError {
    #[error("Failed to initialize engine: {0}")]
    EngineInit(MaResult),

    #[error("Failed to load sound from file: {0}")]
    LoadFile(MaResult),

    #[error("{0} loading not yet implemented")]
    NotImplemented(&'static str),

    #[error("Sound is already loaded")]
    AlreadyLoaded,

    #[error("No source to load")]
    NoSource,

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unknown attenuation model: {0}")]
    UnknownAttenuationModel(String),

    #[error("Unknown positioning mode: {0}")]
    UnknownPositioningMode(String),

    #[error("Invalid engine config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SoundError {
    /// Native result code carried by the error, if it came from miniaudio.
    pub fn result_code(&self) -> Option<i32> {
        match self {
            SoundError::EngineInit(result) | SoundError::LoadFile(result) => Some(result.code()),
            _ => None,
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, SoundError::NotImplemented(_))
    }
}

pub type SoundResult<T> = Result<T, SoundError>;
