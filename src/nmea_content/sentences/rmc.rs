use nom::{Parser, combinator::opt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    IResult,
    nmea_content::{
        FaaMode, Parsable, Status,
        parse::{date, latlon, lenient, magnetic_variation, number, sep, time_of_day},
    },
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 11
///         |         | |       | |        |  |   |   |    |  |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh<CR><LF>
/// ```
///
/// NMEA 2.3:
/// ```text
///         1         2 3       4 5        6  7   8   9    10 1112
///         |         | |       | |        |  |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
///
/// Fields 1 to 9 are required; the magnetic variation and the mode indicator
/// are read when present.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RMC {
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// Fix date in UTC
    pub fix_date: Option<time::Date>,
    /// Status Mode Indicator, anything but `A` is treated as invalid
    pub status: Option<Status>,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
    /// Speed over ground in knots
    pub speed_over_ground: Option<f64>,
    /// Course over ground in degrees true
    pub course_over_ground: Option<f64>,
    /// Magnetic variation in degrees, westerly variation is negative
    pub magnetic_variation: Option<f64>,
    /// FAA Mode Indicator
    pub faa_mode: Option<FaaMode>,
}

impl RMC {
    /// Returns `true` if the receiver reported a valid fix (`A`).
    pub fn is_valid(&self) -> bool {
        self.status == Some(Status::Valid)
    }
}

impl Parsable for RMC {
    fn parser(i: &str) -> IResult<&str, Self> {
        let (i, fix_time) = time_of_day(i)?;
        let (i, status) = sep(lenient(Status::parser)).parse(i)?;
        let (i, (latitude, longitude)) = sep(latlon).parse(i)?;
        let (i, speed_over_ground) = sep(number).parse(i)?;
        let (i, course_over_ground) = sep(number).parse(i)?;
        let (i, fix_date) = sep(date).parse(i)?;
        let (i, magnetic_variation) = opt(sep(magnetic_variation))
            .map(Option::flatten)
            .parse(i)?;
        let (i, faa_mode) = opt(sep(lenient(FaaMode::parser)))
            .map(Option::flatten)
            .parse(i)?;

        Ok((
            i,
            Self {
                fix_time,
                fix_date,
                status,
                latitude,
                longitude,
                speed_over_ground,
                course_over_ground,
                magnetic_variation,
                faa_mode,
            },
        ))
    }
}
