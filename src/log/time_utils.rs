use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the UNIX epoch; zero if the clock is before it.
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimpleUtc {
    pub year: i32,
    pub mon: u32,
    pub day: u32,
    pub hour: u32,
    pub min: u32,
    pub sec: u32,
}

#[derive(Debug)]
pub enum UtcConvError {
    Year,
    Month,
    Day,
}

/// Minimal UTC conversion (civil time) to avoid importing `chrono`.
///
/// Implements the algorithm to convert a UNIX timestamp to a Gregorian date.
///
/// # Errors
///
/// Returns a [`UtcConvError`] if a calculated component cannot be represented
/// in its integer type.
#[allow(clippy::many_single_char_names)]
pub fn unix_to_utc(mut s: u64) -> Result<SimpleUtc, UtcConvError> {
    let sec = (s % 60) as u32;
    s /= 60;
    let min = (s % 60) as u32;
    s /= 60;
    let hour = (s % 24) as u32;
    s /= 24;

    // i128 keeps the intermediate math overflow free.
    let z: i128 = i128::from(s) + 719_468;

    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = mp + if mp < 10 { 3 } else { -9 }; // [1, 12]

    let year_i = y + i128::from(m <= 2);

    let year = i32::try_from(year_i).map_err(|_| UtcConvError::Year)?;
    let mon = u32::try_from(m).map_err(|_| UtcConvError::Month)?;
    let day = u32::try_from(d).map_err(|_| UtcConvError::Day)?;

    Ok(SimpleUtc {
        year,
        mon,
        day,
        hour,
        min,
        sec,
    })
}

/// Splits a millisecond timestamp into its UTC date and the millisecond part.
pub fn split_millis(ts_ms: u128) -> (SimpleUtc, u32) {
    let secs = u64::try_from(ts_ms / 1_000).unwrap_or(u64::MAX);
    let millis = (ts_ms % 1_000) as u32;
    let tm = unix_to_utc(secs).unwrap_or(SimpleUtc {
        year: 1970,
        mon: 1,
        day: 1,
        hour: 0,
        min: 0,
        sec: 0,
    });
    (tm, millis)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn epoch_is_first_of_january_1970() {
        let tm = unix_to_utc(0).unwrap();
        assert_eq!((tm.year, tm.mon, tm.day), (1970, 1, 1));
        assert_eq!((tm.hour, tm.min, tm.sec), (0, 0, 0));
    }

    #[test]
    fn known_timestamp_converts() {
        // 2025-11-02 02:30:45 UTC
        let tm = unix_to_utc(1_762_050_645).unwrap();
        assert_eq!((tm.year, tm.mon, tm.day), (2025, 11, 2));
        assert_eq!((tm.hour, tm.min, tm.sec), (2, 30, 45));
    }

    #[test]
    fn leap_day() {
        // 2024-02-29 12:00:00 UTC
        let tm = unix_to_utc(1_709_208_000).unwrap();
        assert_eq!((tm.year, tm.mon, tm.day), (2024, 2, 29));
        assert_eq!(tm.hour, 12);
    }

    #[test]
    fn split_millis_keeps_sub_second_part() {
        let (tm, ms) = split_millis(1_000 * 61 + 250);
        assert_eq!(ms, 250);
        assert_eq!((tm.min, tm.sec), (1, 1));
    }
}
