//! Host debug-output channel: `OutputDebugStringA` on Windows, the system
//! log (`logcat`) on Android. Other hosts have no such channel and the sink
//! cannot be constructed there.

use crate::log::{
    log_msg::{FormattedRecord, LogMsg},
    log_sink::LogSink,
    sink_error::SinkError,
};

#[cfg(any(windows, target_os = "android"))]
use std::ffi::CString;

/// Whether this build targets a host with a debug-output channel.
pub const PLATFORM_DEBUG_AVAILABLE: bool = cfg!(any(windows, target_os = "android"));

#[cfg(windows)]
mod ffi {
    use std::ffi::c_char;

    unsafe extern "system" {
        pub fn OutputDebugStringA(output: *const c_char);
    }
}

#[cfg(target_os = "android")]
mod ffi {
    use std::ffi::{c_char, c_int};

    #[link(name = "log")]
    unsafe extern "C" {
        pub fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
    }
}

/// Tag shown next to each line in `logcat`.
#[cfg(target_os = "android")]
const ANDROID_TAG: &str = "emulog";

#[derive(Debug)]
pub struct PlatformDebugSink {
    _priv: (),
}

impl PlatformDebugSink {
    /// Returns the sink when the host offers a debug channel.
    #[must_use]
    pub fn new() -> Option<Self> {
        PLATFORM_DEBUG_AVAILABLE.then_some(Self { _priv: () })
    }
}

#[cfg(any(windows, target_os = "android"))]
fn to_c_line(text: &str, newline: bool) -> Result<CString, SinkError> {
    let mut bytes: Vec<u8> = text.bytes().filter(|b| *b != 0).collect();
    if newline {
        bytes.push(b'\n');
    }
    CString::new(bytes).map_err(|e| SinkError::Platform(e.to_string()))
}

#[cfg(windows)]
fn write_platform(_msg: &LogMsg, formatted: &FormattedRecord) -> Result<(), SinkError> {
    let line = to_c_line(&formatted.text, true)?;
    // SAFETY: `line` is a valid nul-terminated string for the duration of the call.
    unsafe { ffi::OutputDebugStringA(line.as_ptr()) };
    Ok(())
}

#[cfg(target_os = "android")]
fn write_platform(msg: &LogMsg, formatted: &FormattedRecord) -> Result<(), SinkError> {
    use crate::log::log_level::LogLevel;

    let prio = match msg.level {
        LogLevel::Trace => 2,
        LogLevel::Debug => 3,
        LogLevel::Info => 4,
        LogLevel::Warn => 5,
        LogLevel::Error => 6,
        LogLevel::Critical | LogLevel::Off => 7,
    };
    let tag = to_c_line(ANDROID_TAG, false)?;
    let line = to_c_line(&formatted.text, false)?;
    // SAFETY: both pointers are valid nul-terminated strings for the call.
    let rc = unsafe { ffi::__android_log_write(prio, tag.as_ptr(), line.as_ptr()) };
    if rc < 0 {
        return Err(SinkError::Platform(format!("__android_log_write returned {rc}")));
    }
    Ok(())
}

#[cfg(not(any(windows, target_os = "android")))]
fn write_platform(_msg: &LogMsg, _formatted: &FormattedRecord) -> Result<(), SinkError> {
    Ok(())
}

impl LogSink for PlatformDebugSink {
    fn name(&self) -> &'static str {
        "platform-debug"
    }

    fn log(&self, msg: &LogMsg, formatted: &FormattedRecord) -> Result<(), SinkError> {
        write_platform(msg, formatted)
    }

    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_matches_target() {
        assert_eq!(PlatformDebugSink::new().is_some(), PLATFORM_DEBUG_AVAILABLE);
    }
}
