//! spdlog-style line patterns.
//!
//! | flag | expands to |
//! |------|------------|
//! | `%v` | message text |
//! | `%L` | one-letter level marker |
//! | `%l` | level name |
//! | `%n` | logger name |
//! | `%c` / `%C` | class short / long name |
//! | `%Y %m %d %H %M %S` | UTC date and time parts |
//! | `%e` | milliseconds |
//! | `%T` | `%H:%M:%S` |
//! | `%^` / `%$` | start / end of the color span |
//! | `%%` | a literal `%` |
//!
//! Unknown flags are copied through verbatim.

use std::fmt::Write as _;

use crate::log::{
    log_msg::{FormattedRecord, LogMsg},
    time_utils,
};

/// Pattern used when nothing else is configured: level marker, then the
/// colorized message.
pub const DEFAULT_PATTERN: &str = "%L %^%v%$";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Literal(String),
    Message,
    LevelMarker,
    LevelName,
    LoggerName,
    ClassShort,
    ClassLong,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millis,
    Time,
    ColorStart,
    ColorEnd,
}

/// A parsed line pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    items: Vec<Item>,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl Pattern {
    /// Parses `source`. Parsing never fails; unknown flags stay literal.
    pub fn new(source: &str) -> Self {
        let mut items = Vec::new();
        let mut lit = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                lit.push(c);
                continue;
            }
            let item = match chars.next() {
                Some('v') => Item::Message,
                Some('L') => Item::LevelMarker,
                Some('l') => Item::LevelName,
                Some('n') => Item::LoggerName,
                Some('c') => Item::ClassShort,
                Some('C') => Item::ClassLong,
                Some('Y') => Item::Year,
                Some('m') => Item::Month,
                Some('d') => Item::Day,
                Some('H') => Item::Hour,
                Some('M') => Item::Minute,
                Some('S') => Item::Second,
                Some('e') => Item::Millis,
                Some('T') => Item::Time,
                Some('^') => Item::ColorStart,
                Some('$') => Item::ColorEnd,
                Some('%') => {
                    lit.push('%');
                    continue;
                }
                Some(other) => {
                    lit.push('%');
                    lit.push(other);
                    continue;
                }
                None => {
                    lit.push('%');
                    continue;
                }
            };
            if !lit.is_empty() {
                items.push(Item::Literal(std::mem::take(&mut lit)));
            }
            items.push(item);
        }
        if !lit.is_empty() {
            items.push(Item::Literal(lit));
        }

        Self {
            source: source.to_string(),
            items,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Renders `msg` into a single line (without trailing newline).
    pub fn format(&self, msg: &LogMsg, logger_name: &str) -> FormattedRecord {
        let mut out = String::with_capacity(msg.text.len() + 32);
        let mut color_start = None;
        let mut color_range = None;
        let mut tm = None;

        for item in &self.items {
            // Time parts are only computed when the pattern asks for them.
            let mut utc = || *tm.get_or_insert_with(|| time_utils::split_millis(msg.ts_ms));
            // Writing into a String cannot fail.
            let _ = match item {
                Item::Literal(s) => out.write_str(s),
                Item::Message => out.write_str(&msg.text),
                Item::LevelMarker => out.write_str(msg.level.marker()),
                Item::LevelName => out.write_str(msg.level.as_str()),
                Item::LoggerName => out.write_str(logger_name),
                Item::ClassShort => write!(out, "{}", msg.class),
                Item::ClassLong => out.write_str(msg.class.long_name().unwrap_or("?")),
                Item::Year => write!(out, "{:04}", utc().0.year),
                Item::Month => write!(out, "{:02}", utc().0.mon),
                Item::Day => write!(out, "{:02}", utc().0.day),
                Item::Hour => write!(out, "{:02}", utc().0.hour),
                Item::Minute => write!(out, "{:02}", utc().0.min),
                Item::Second => write!(out, "{:02}", utc().0.sec),
                Item::Millis => write!(out, "{:03}", utc().1),
                Item::Time => {
                    let (t, _) = utc();
                    write!(out, "{:02}:{:02}:{:02}", t.hour, t.min, t.sec)
                }
                Item::ColorStart => {
                    color_start = Some(out.len());
                    Ok(())
                }
                Item::ColorEnd => {
                    if let Some(start) = color_start.take() {
                        color_range = Some(start..out.len());
                    }
                    Ok(())
                }
            };
        }

        // An unterminated `%^` colors up to the end of the line.
        if let Some(start) = color_start {
            color_range = Some(start..out.len());
        }

        FormattedRecord {
            text: out,
            color_range,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::{log_class::LogClass, log_level::LogLevel};

    fn msg(text: &str) -> LogMsg {
        // 2025-11-02 02:30:45.123 UTC
        LogMsg::new(LogLevel::Warn, LogClass::KERNEL, text, 1_762_050_645_123)
    }

    #[test]
    fn default_pattern_marks_level_and_colors_message() {
        let rec = Pattern::default().format(&msg("hello"), "emu");
        assert_eq!(rec.text, "W hello");
        assert_eq!(rec.color_range, Some(2..7));
    }

    #[test]
    fn expands_time_class_and_names() {
        let p = Pattern::new("[%Y-%m-%d %T.%e] [%n] [%l] [%c/%C] %v");
        let rec = p.format(&msg("boot"), "emu");
        assert_eq!(
            rec.text,
            "[2025-11-02 02:30:45.123] [emu] [warn] [kernel/Kernel] boot"
        );
        assert_eq!(rec.color_range, None);
    }

    #[test]
    fn escapes_and_unknown_flags_are_literal() {
        let rec = Pattern::new("100%% %q %v%").format(&msg("x"), "emu");
        assert_eq!(rec.text, "100% %q x%");
    }

    #[test]
    fn unterminated_color_runs_to_end() {
        let rec = Pattern::new("%L %^%v").format(&msg("abc"), "emu");
        assert_eq!(rec.color_range, Some(2..5));
    }

    #[test]
    fn invalid_class_renders_placeholder() {
        let m = LogMsg::new(LogLevel::Info, LogClass::from_raw(500), "t", 0);
        let rec = Pattern::new("%c %C").format(&m, "emu");
        assert_eq!(rec.text, "class#500 ?");
    }
}
