use nom::{Parser, combinator::opt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    IResult,
    nmea_content::{
        Parsable,
        parse::{calendar_date, field, raw_field, sep, time_of_day},
    },
};

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
///
/// Fields 1 to 4 are required. The local zone fields are read but a fix is
/// always kept in UTC.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ZDA {
    /// Fix time in UTC
    pub time: Option<time::Time>,
    /// Fix date in UTC
    pub date: Option<time::Date>,
    /// Local zone description, offset from UTC
    pub utc_offset: Option<time::UtcOffset>,
}

impl From<ZDA> for Option<time::OffsetDateTime> {
    fn from(value: ZDA) -> Self {
        if let (Some(time), Some(date)) = (value.time, value.date) {
            Some(time::PrimitiveDateTime::new(date, time).assume_utc())
        } else {
            None
        }
    }
}

impl Parsable for ZDA {
    fn parser(i: &str) -> IResult<&str, Self> {
        let (i, time) = time_of_day(i)?;
        let (i, day) = sep(field::<u8>).parse(i)?;
        let (i, month) = sep(field::<u8>).parse(i)?;
        let (i, year) = sep(field::<i32>).parse(i)?;
        let (i, zone_hours) = opt(sep(raw_field)).parse(i)?;
        let (i, zone_minutes) = opt(sep(field::<u8>)).map(Option::flatten).parse(i)?;

        let date = match (day, month, year) {
            (Some(day), Some(month), Some(year)) => calendar_date(i, day, month, year)
                .ok()
                .map(|(_, date)| date),
            _ => None,
        };

        Ok((
            i,
            Self {
                time,
                date,
                utc_offset: zone_hours.and_then(|hours| utc_offset(hours, zone_minutes)),
            },
        ))
    }
}

fn utc_offset(hours: &str, minutes: Option<u8>) -> Option<time::UtcOffset> {
    let hours = hours.trim();
    let offset_hours = hours.parse::<i8>().ok()?;
    let offset_minutes = minutes.unwrap_or(0) as i8;
    let offset_minutes = if hours.starts_with('-') {
        -offset_minutes
    } else {
        offset_minutes
    };

    time::UtcOffset::from_hms(offset_hours, offset_minutes, 0).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zda_parsing() {
        let cases = [
            "123456.78,01,01,2023,,",
            "132502.00,11,07,2025,+03,00",
            ",,,,,",
            "132502.00,11,07,2025,,",
            "132502.00,,,,,",
            "132502.00,,,,-03,30",
            "120000.00,29,02,2024,01,00",
            "101112.13,12,11,2025,+14,00",
            "101112.13,12,11,2025",
        ];

        for &input in &cases {
            let result = ZDA::parser(input);
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }

        let cases = ["132502.00,11", "132502.00,11,07", ""];

        for &input in &cases {
            let result = ZDA::parser(input);
            assert!(result.is_err(), "Failed: {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_zda_fields() {
        let (_, zda) = ZDA::parser("125653.00,13,09,2007,00,00").unwrap();
        assert_eq!(zda.time, Some(time::Time::from_hms(12, 56, 53).unwrap()));
        assert_eq!(
            zda.date,
            Some(time::Date::from_calendar_date(2007, time::Month::September, 13).unwrap())
        );
        assert_eq!(zda.utc_offset, Some(time::UtcOffset::UTC));

        let (_, zda) = ZDA::parser("132502.00,,,,-03,30").unwrap();
        assert_eq!(zda.date, None);
        assert_eq!(
            zda.utc_offset,
            Some(time::UtcOffset::from_hms(-3, -30, 0).unwrap())
        );

        let (_, zda) = ZDA::parser("132502.00,00,07,2025,,").unwrap();
        assert_eq!(zda.date, None);
        assert_eq!(zda.utc_offset, None);
    }

    #[test]
    fn test_zda_to_datetime() {
        let (_, zda) = ZDA::parser("125653.00,13,09,2007,00,00").unwrap();
        let datetime: Option<time::OffsetDateTime> = zda.into();
        assert_eq!(datetime.map(|dt| dt.unix_timestamp()), Some(1_189_688_213));
    }
}
