//! Registry of the emulator subsystems a log record can be tagged with.
//!
//! Classes are contiguous integers indexing [`LOG_CLASSES`]. A [`LogClass`]
//! can hold any raw value so call sites on failure paths never have to
//! validate before logging; every lookup rejects out-of-range values instead.

use std::fmt;

/// Static description of one subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogClassInfo {
    /// Short tag printed in log lines and used as config key.
    pub short_name: &'static str,
    /// Descriptive name for UIs.
    pub long_name: &'static str,
}

macro_rules! log_classes {
    ($( $konst:ident => ($short:literal, $long:literal) ),+ $(,)?) => {
        /// Every known subsystem, indexed by class id.
        pub const LOG_CLASSES: &[LogClassInfo] = &[
            $( LogClassInfo { short_name: $short, long_name: $long } ),+
        ];

        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[repr(u16)]
        enum ClassIndex { $( $konst ),+ }

        impl LogClass {
            $( pub const $konst: LogClass = LogClass(ClassIndex::$konst as u16); )+
        }
    };
}

log_classes! {
    COMMON        => ("common", "Common utilities"),
    CORE          => ("core", "Emulator core"),
    CPU           => ("cpu", "CPU interpreter"),
    MEMORY        => ("mem", "Memory subsystem"),
    TIMING        => ("timing", "Core timing"),
    KERNEL        => ("kernel", "Kernel"),
    LOADER        => ("loader", "Image and SIS loader"),
    DISASM        => ("disasm", "Disassembler"),
    HLE           => ("hle", "High level emulation"),
    SERVICE_EFSRV => ("fs", "File server"),
    SERVICE_WINDOW => ("window", "Window server"),
    SERVICE_FBS   => ("fbs", "Font and bitmap server"),
    SERVICE_AUDIO => ("audio", "Audio server"),
    FRONTEND_UI   => ("ui", "Front-end UI"),
}

/// Number of valid classes. Ids `>= LOG_CLASS_COUNT` are invalid.
pub const LOG_CLASS_COUNT: usize = LOG_CLASSES.len();

/// Subsystem identifier used as filtering key and output tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogClass(u16);

impl LogClass {
    /// Wraps a raw id without validation.
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        LogClass(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < LOG_CLASS_COUNT
    }

    /// Table slot for this class, or `None` when out of range.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.0 as usize)
        } else {
            None
        }
    }

    #[must_use]
    pub fn info(self) -> Option<&'static LogClassInfo> {
        LOG_CLASSES.get(self.index()?)
    }

    #[must_use]
    pub fn short_name(self) -> Option<&'static str> {
        self.info().map(|i| i.short_name)
    }

    #[must_use]
    pub fn long_name(self) -> Option<&'static str> {
        self.info().map(|i| i.long_name)
    }

    /// Looks a class up by its short name (exact, case-insensitive).
    #[must_use]
    pub fn from_short_name(name: &str) -> Option<Self> {
        let name = name.trim();
        LOG_CLASSES
            .iter()
            .position(|i| i.short_name.eq_ignore_ascii_case(name))
            .and_then(|pos| u16::try_from(pos).ok())
            .map(LogClass)
    }

    /// Iterates over every valid class in id order.
    pub fn all() -> impl Iterator<Item = LogClass> {
        (0..LOG_CLASS_COUNT).filter_map(|i| u16::try_from(i).ok().map(LogClass))
    }
}

impl fmt::Display for LogClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.short_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "class#{}", self.0),
        }
    }
}

/// Short name of `class`, or `None` when the id is out of range.
#[must_use]
pub fn name_of(class: LogClass) -> Option<&'static str> {
    class.short_name()
}

/// Descriptive name of `class`, or `None` when the id is out of range.
#[must_use]
pub fn long_name_of(class: LogClass) -> Option<&'static str> {
    class.long_name()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn every_valid_class_has_both_names() {
        for class in LogClass::all() {
            let short = name_of(class).expect("short name");
            let long = long_name_of(class).expect("long name");
            assert!(!short.is_empty());
            assert!(!long.is_empty());
        }
        assert_eq!(LogClass::all().count(), LOG_CLASS_COUNT);
    }

    #[test]
    fn out_of_range_ids_have_no_name() {
        let count = u16::try_from(LOG_CLASS_COUNT).unwrap();
        for raw in [count, count + 1, u16::MAX] {
            let class = LogClass::from_raw(raw);
            assert!(!class.is_valid());
            assert_eq!(name_of(class), None);
            assert_eq!(long_name_of(class), None);
            assert_eq!(class.index(), None);
        }
    }

    #[test]
    fn constants_match_table_order() {
        assert_eq!(LogClass::COMMON.raw(), 0);
        assert_eq!(name_of(LogClass::SERVICE_EFSRV), Some("fs"));
        assert_eq!(long_name_of(LogClass::KERNEL), Some("Kernel"));
    }

    #[test]
    fn short_name_lookup() {
        assert_eq!(LogClass::from_short_name("FS"), Some(LogClass::SERVICE_EFSRV));
        assert_eq!(LogClass::from_short_name(" cpu "), Some(LogClass::CPU));
        assert_eq!(LogClass::from_short_name("nope"), None);
    }

    #[test]
    fn display_falls_back_for_invalid_ids() {
        assert_eq!(LogClass::CPU.to_string(), "cpu");
        assert_eq!(LogClass::from_raw(9999).to_string(), "class#9999");
    }
}
