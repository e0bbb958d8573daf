//! UTC fix time reconstruction.
//!
//! A fix time is assembled from a time of day and, when a sentence reported
//! one, a calendar date. GGA carries no date, so a GGA-only stream has its day
//! inferred from the wall clock at the moment the time of day was received.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;
const HALF_DAY: i64 = SECONDS_PER_DAY / 2;

/// Where the date of a [`Fixtime`] came from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// A sentence (RMC or ZDA) carried the date.
    Reported,
    /// The date was guessed from the wall clock. The guess is off by a day
    /// when the receiver and the clock disagree by more than 12 hours.
    Inferred,
}

/// A fix time in seconds since the Unix epoch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixtime {
    pub epoch_seconds: i64,
    pub date_source: DateSource,
}

impl Fixtime {
    /// Combines a reported date with a time of day. Sub-second digits are dropped.
    pub fn from_date_time(date: time::Date, time: time::Time) -> Self {
        let day = epoch_day(date.year() as i64, date.month() as i64, date.day() as i64);

        Fixtime {
            epoch_seconds: day * SECONDS_PER_DAY + seconds_of_day(time),
            date_source: DateSource::Reported,
        }
    }

    /// Places `time` on the day of `reference` (epoch seconds).
    ///
    /// If the time of day is more than 12 hours ahead of the reference's time
    /// of day, the fix is taken to belong to the previous day; more than 12
    /// hours behind, to the next day.
    pub fn infer(time: time::Time, reference: i64) -> Self {
        let mut day = reference.div_euclid(SECONDS_PER_DAY);
        let reference_seconds = reference.rem_euclid(SECONDS_PER_DAY);
        let fix_seconds = seconds_of_day(time);

        if fix_seconds - reference_seconds > HALF_DAY {
            day -= 1;
        } else if reference_seconds - fix_seconds > HALF_DAY {
            day += 1;
        }

        Fixtime {
            epoch_seconds: day * SECONDS_PER_DAY + fix_seconds,
            date_source: DateSource::Inferred,
        }
    }

    pub fn is_inferred(&self) -> bool {
        self.date_source == DateSource::Inferred
    }

    /// The fix time as a UTC [`time::OffsetDateTime`], if representable.
    pub fn to_offset_date_time(&self) -> Option<time::OffsetDateTime> {
        time::OffsetDateTime::from_unix_timestamp(self.epoch_seconds).ok()
    }
}

impl fmt::Display for Fixtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_offset_date_time() {
            Some(dt) => write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                dt.year(),
                dt.month() as u8,
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            )?,
            None => write!(f, "@{}", self.epoch_seconds)?,
        }

        if self.is_inferred() {
            write!(f, " (inferred date)")?;
        }

        Ok(())
    }
}

/// Days since 1970-01-01 for a Gregorian calendar date.
///
/// Integer-only day count, exact for the years GPS receivers report.
pub fn epoch_day(year: i64, month: i64, day: i64) -> i64 {
    let yr = 1000 * year + 1000 * (month - 3) / 12;

    (367 * yr + 625) / 1000 - 2 * (yr / 1000) + yr / 4000 - yr / 100_000 + yr / 400_000 + day
        - 719_469
}

fn seconds_of_day(time: time::Time) -> i64 {
    time.hour() as i64 * 3600 + time.minute() as i64 * 60 + time.second() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn hms(h: u8, m: u8, s: u8) -> time::Time {
        time::Time::from_hms(h, m, s).unwrap()
    }

    #[test]
    fn test_epoch_day() {
        assert_eq!(epoch_day(1970, 1, 1), 0);
        assert_eq!(epoch_day(1969, 12, 31), -1);
        assert_eq!(epoch_day(2000, 2, 29), 11_016);
        assert_eq!(epoch_day(2000, 3, 1), 11_017);
        assert_eq!(epoch_day(2007, 9, 13), 13_769);
    }

    #[test]
    fn test_reported_date() {
        let date = time::Date::from_calendar_date(2007, time::Month::September, 13).unwrap();
        let fixtime = Fixtime::from_date_time(date, hms(12, 56, 53));

        assert_eq!(fixtime.epoch_seconds, 1_189_688_213);
        assert_eq!(fixtime.date_source, DateSource::Reported);
        assert_eq!(fixtime.to_string(), "2007-09-13T12:56:53Z");

        let with_millis = time::Time::from_hms_milli(2, 54, 23, 494).unwrap();
        let date = time::Date::from_calendar_date(2005, time::Month::May, 20).unwrap();
        assert_eq!(
            Fixtime::from_date_time(date, with_millis).epoch_seconds,
            1_116_557_663
        );
    }

    #[test]
    fn test_inferred_same_day() {
        // 2007-09-13 13:00:00
        let reference = 1_189_688_400;
        let fixtime = Fixtime::infer(hms(12, 56, 53), reference);

        assert_eq!(fixtime.epoch_seconds, 1_189_688_213);
        assert!(fixtime.is_inferred());
        assert_eq!(fixtime.to_string(), "2007-09-13T12:56:53Z (inferred date)");
    }

    #[test]
    fn test_inferred_day_boundary() {
        // 2007-09-13 00:05:00, fix from just before midnight belongs to the 12th
        let reference = 1_189_641_900;
        let fixtime = Fixtime::infer(hms(23, 59, 58), reference);
        assert_eq!(fixtime.epoch_seconds, 1_189_641_598);

        // 2007-09-13 23:59:00, fix from just after midnight belongs to the 14th
        let reference = 1_189_727_940;
        let fixtime = Fixtime::infer(hms(0, 0, 3), reference);
        assert_eq!(fixtime.epoch_seconds, 1_189_728_003);

        // exactly 12 hours apart stays on the reference day
        let reference = 1_189_641_600;
        let fixtime = Fixtime::infer(hms(12, 0, 0), reference);
        assert_eq!(fixtime.epoch_seconds, 1_189_684_800);
    }

    quickcheck! {
        fn prop_epoch_day_matches_calendar(days: u16) -> bool {
            // 1970-01-01 through 2149
            let date = time::Date::from_calendar_date(1970, time::Month::January, 1).unwrap()
                + time::Duration::days(days as i64);

            epoch_day(date.year() as i64, date.month() as i64, date.day() as i64) == days as i64
        }

        fn prop_inferred_within_half_day(reference: u32, seconds: u32) -> bool {
            let reference = reference as i64;
            let seconds = seconds % 86_400;
            let time = hms((seconds / 3600) as u8, (seconds / 60 % 60) as u8, (seconds % 60) as u8);

            (Fixtime::infer(time, reference).epoch_seconds - reference).abs() <= HALF_DAY
        }
    }
}
