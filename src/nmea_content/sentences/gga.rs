use std::time::Duration;

use nom::{Parser, combinator::opt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    IResult,
    nmea_content::{
        FixType, Parsable,
        parse::{field, latlon, number, raw_field, sep, time_of_day},
    },
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// Fields 1 to 9 are required. GGA carries no date.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GGA {
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
    /// GPS Quality Indicator
    pub fix_quality: Option<FixType>,
    /// Number of satellites in use
    pub satellite_count: Option<u8>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<f64>,
    /// Altitude above/below mean sea level (geoid) in meters
    pub altitude: Option<f64>,
    /// Geoidal separation in meters, the difference between the WGS-84 earth ellipsoid and mean sea level (geoid),
    /// negative values indicate that the geoid is below the ellipsoid
    pub geoidal_separation: Option<f64>,
    /// Age of Differential GPS data, null field when DGPS is not used
    pub age_of_dgps: Option<Duration>,
    /// Differential reference station ID
    pub ref_station_id: Option<u16>,
}

impl GGA {
    /// A GGA fix is valid when the quality indicator is present and not `0`.
    pub fn is_valid(&self) -> bool {
        matches!(self.fix_quality, Some(quality) if quality != FixType::NoFix)
    }
}

impl Parsable for GGA {
    fn parser(i: &str) -> IResult<&str, Self> {
        let (i, fix_time) = time_of_day(i)?;
        let (i, (latitude, longitude)) = sep(latlon).parse(i)?;
        let (i, fix_quality) = sep(field::<u8>)
            .map(|code| code.map(FixType::from_code))
            .parse(i)?;
        let (i, satellite_count) = sep(field::<u8>).parse(i)?;
        let (i, hdop) = sep(number).parse(i)?;
        let (i, altitude) = sep(number).parse(i)?;

        let (i, _altitude_unit) = opt(sep(raw_field)).parse(i)?;
        let (i, geoidal_separation) = opt(sep(number)).map(Option::flatten).parse(i)?;
        let (i, _separation_unit) = opt(sep(raw_field)).parse(i)?;
        let (i, age_of_dgps) = opt(sep(number))
            .map(|age| {
                age.flatten()
                    .filter(|sec| *sec >= 0.0)
                    .map(|sec| Duration::from_millis((sec * 1000.0) as u64))
            })
            .parse(i)?;
        let (i, ref_station_id) = opt(sep(field::<u16>)).map(Option::flatten).parse(i)?;

        Ok((
            i,
            Self {
                fix_time,
                latitude,
                longitude,
                fix_quality,
                satellite_count,
                hdop,
                altitude,
                geoidal_separation,
                age_of_dgps,
                ref_station_id,
            },
        ))
    }
}
