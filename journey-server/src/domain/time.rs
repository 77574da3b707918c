//! Time-of-day and trip duration handling.
//!
//! Timetables give times as "HH:MM" strings in a single local timezone with
//! no date attached. A journey whose arrival is earlier than its departure is
//! taken to cross midnight exactly once, so no journey is ever 24h or longer.

use chrono::{NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when a time string is not a valid `HH:MM` time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time format {input:?}: {reason}")]
pub struct InvalidTimeFormat {
    input: String,
    reason: &'static str,
}

impl InvalidTimeFormat {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A time of day with minute precision.
///
/// # Examples
///
/// ```
/// use journey_server::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse("07:05").unwrap();
/// assert_eq!(t.minutes_since_midnight(), 425);
/// assert_eq!(t.to_string(), "07:05");
///
/// // Unpadded hours are accepted and normalised
/// assert_eq!(TimeOfDay::parse("7:05").unwrap().to_string(), "07:05");
///
/// // Anything else is rejected
/// assert!(TimeOfDay::parse("0705").is_err());
/// assert!(TimeOfDay::parse("24:00").is_err());
/// assert!(TimeOfDay::parse("07:5").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build a time from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from `HH:MM` (or `H:MM`) 24-hour format.
    pub fn parse(s: &str) -> Result<Self, InvalidTimeFormat> {
        let bytes = s.as_bytes();

        // Colon sits after one or two hour digits
        let colon = match bytes.len() {
            4 => 1,
            5 => 2,
            _ => return Err(InvalidTimeFormat::new(s, "expected HH:MM format")),
        };

        if bytes[colon] != b':' {
            return Err(InvalidTimeFormat::new(
                s,
                "expected colon between hours and minutes",
            ));
        }

        let hour = parse_digits(&bytes[..colon])
            .ok_or_else(|| InvalidTimeFormat::new(s, "invalid hour digits"))?;
        if hour > 23 {
            return Err(InvalidTimeFormat::new(s, "hour must be 0-23"));
        }

        let minute = parse_digits(&bytes[colon + 1..])
            .ok_or_else(|| InvalidTimeFormat::new(s, "invalid minute digits"))?;
        if minute > 59 {
            return Err(InvalidTimeFormat::new(s, "minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| InvalidTimeFormat::new(s, "invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight, in `0..1440`.
    pub fn minutes_since_midnight(&self) -> u16 {
        (self.hour() * 60 + self.minute()) as u16
    }
}

impl Ord for TimeOfDay {
    fn cmp(&self, other: &Self) -> Ordering {
        self.minutes_since_midnight()
            .cmp(&other.minutes_since_midnight())
    }
}

impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse one or two ASCII digit bytes into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 2 {
        return None;
    }
    bytes.iter().try_fold(0u32, |acc, &b| {
        let digit = (b as char).to_digit(10)?;
        Some(acc * 10 + digit)
    })
}

/// Elapsed time of a trip, always in `0..1440` minutes.
///
/// Sorting and display both go through the total minute count; formatted
/// strings are never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TripDuration(u16);

impl TripDuration {
    /// Duration from `departure` to `arrival`, wrapping past midnight once.
    ///
    /// ```
    /// use journey_server::domain::{TimeOfDay, TripDuration};
    ///
    /// let dep = TimeOfDay::parse("23:30").unwrap();
    /// let arr = TimeOfDay::parse("00:15").unwrap();
    /// let d = TripDuration::between(dep, arr);
    /// assert_eq!((d.hours(), d.minutes()), (0, 45));
    /// ```
    pub fn between(departure: TimeOfDay, arrival: TimeOfDay) -> Self {
        let delta = i32::from(arrival.minutes_since_midnight())
            - i32::from(departure.minutes_since_midnight());
        let delta = if delta < 0 {
            delta + i32::from(MINUTES_PER_DAY)
        } else {
            delta
        };
        Self(delta as u16)
    }

    pub fn total_minutes(&self) -> u16 {
        self.0
    }

    pub fn hours(&self) -> u16 {
        self.0 / 60
    }

    pub fn minutes(&self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours(), self.minutes())
    }
}

/// Trip duration between two `HH:MM` strings.
///
/// Fails if either input is malformed; nothing is coerced.
///
/// ```
/// use journey_server::domain::trip_duration;
///
/// let d = trip_duration("07:00", "14:00").unwrap();
/// assert_eq!((d.hours(), d.minutes()), (7, 0));
/// assert!(trip_duration("7am", "14:00").is_err());
/// ```
pub fn trip_duration(departure: &str, arrival: &str) -> Result<TripDuration, InvalidTimeFormat> {
    let departure = TimeOfDay::parse(departure)?;
    let arrival = TimeOfDay::parse(arrival)?;
    Ok(TripDuration::between(departure, arrival))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let time = t("00:00");
        assert_eq!((time.hour(), time.minute()), (0, 0));

        let time = t("23:59");
        assert_eq!((time.hour(), time.minute()), (23, 59));

        let time = t("9:45");
        assert_eq!((time.hour(), time.minute()), (9, 45));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(TimeOfDay::parse("").is_err());
        assert!(TimeOfDay::parse("12").is_err());
        assert!(TimeOfDay::parse("1230").is_err());
        assert!(TimeOfDay::parse("12-30").is_err());
        assert!(TimeOfDay::parse("12:3").is_err());
        assert!(TimeOfDay::parse("12:300").is_err());
        assert!(TimeOfDay::parse("ab:cd").is_err());
        assert!(TimeOfDay::parse("+1:30").is_err());
        assert!(TimeOfDay::parse(" 1:30").is_err());
        assert!(TimeOfDay::parse("24:00").is_err());
        assert!(TimeOfDay::parse("12:60").is_err());
        assert!(TimeOfDay::parse("１2:30").is_err());
    }

    #[test]
    fn error_carries_input() {
        let err = TimeOfDay::parse("25:00").unwrap_err();
        assert_eq!(err.input(), "25:00");
        assert_eq!(
            err.to_string(),
            "invalid time format \"25:00\": hour must be 0-23"
        );
    }

    #[test]
    fn minutes_since_midnight() {
        assert_eq!(t("00:00").minutes_since_midnight(), 0);
        assert_eq!(t("01:01").minutes_since_midnight(), 61);
        assert_eq!(t("23:59").minutes_since_midnight(), 1439);
    }

    #[test]
    fn unpadded_orders_numerically() {
        // "9:00" > "10:00" as strings, but not as times
        assert!(t("9:00") < t("10:00"));
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(t("7:05").to_string(), "07:05");
        assert_eq!(format!("{:?}", t("7:05")), "TimeOfDay(07:05)");
    }

    #[test]
    fn same_day_duration() {
        let d = TripDuration::between(t("07:00"), t("14:00"));
        assert_eq!((d.hours(), d.minutes()), (7, 0));
        assert_eq!(d.total_minutes(), 420);
    }

    #[test]
    fn overnight_duration() {
        let d = TripDuration::between(t("23:30"), t("00:15"));
        assert_eq!((d.hours(), d.minutes()), (0, 45));

        let d = TripDuration::between(t("22:00"), t("06:15"));
        assert_eq!(d.total_minutes(), 8 * 60 + 15);
    }

    #[test]
    fn zero_duration_is_valid() {
        let d = TripDuration::between(t("10:10"), t("10:10"));
        assert_eq!(d.total_minutes(), 0);
        assert_eq!(d.to_string(), "0h 0m");
    }

    #[test]
    fn display_duration() {
        assert_eq!(
            TripDuration::between(t("03:15"), t("11:30")).to_string(),
            "8h 15m"
        );
        assert_eq!(
            TripDuration::between(t("06:00"), t("11:50")).to_string(),
            "5h 50m"
        );
    }

    #[test]
    fn numeric_order_disagrees_with_string_order() {
        let longer = TripDuration::between(t("08:00"), t("18:00"));
        let shorter = TripDuration::between(t("08:00"), t("17:00"));
        assert_eq!(longer.to_string(), "10h 0m");
        assert_eq!(shorter.to_string(), "9h 0m");
        assert!(shorter < longer);
        assert!(shorter.to_string() > longer.to_string());
    }

    #[test]
    fn trip_duration_from_strings() {
        let d = trip_duration("23:30", "00:15").unwrap();
        assert_eq!(d.total_minutes(), 45);

        let err = trip_duration("07:00", "14h00").unwrap_err();
        assert_eq!(err.input(), "14h00");
    }
}
