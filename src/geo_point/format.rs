use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Text representation of a coordinate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateFormat {
    /// Signed decimal degrees, `-142.96119`
    #[default]
    Decimal,
    /// Degrees and decimal minutes, `142°57.67140'W`
    DegreesMinutes,
    /// Degrees, minutes and decimal seconds, `142°57'40.3"W`
    DegreesMinutesSeconds,
}

/// Hemisphere letter appended to degree/minute coordinates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassDirection {
    North,
    South,
    East,
    West,
}

impl CompassDirection {
    /// `North` for latitudes `>= 0`, otherwise `South`.
    pub fn for_latitude(latitude: f64) -> Self {
        if latitude.is_sign_negative() && latitude != 0.0 {
            Self::South
        } else {
            Self::North
        }
    }

    /// `East` for longitudes `>= 0`, otherwise `West`.
    pub fn for_longitude(longitude: f64) -> Self {
        if longitude.is_sign_negative() && longitude != 0.0 {
            Self::West
        } else {
            Self::East
        }
    }

    pub fn abbreviation(&self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "North",
            Self::South => "South",
            Self::East => "East",
            Self::West => "West",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl GeoPoint {
    /// Formats the latitude with `precision` decimal digits (clamped to `1..=7`).
    ///
    /// ```rust
    /// use nmea0183_fix::{CoordinateFormat, GeoPoint};
    ///
    /// let point = GeoPoint::new(31.479233, -142.96119);
    /// assert_eq!(point.format_latitude(CoordinateFormat::Decimal, 4), "31.4792");
    /// assert_eq!(point.format_latitude(CoordinateFormat::DegreesMinutes, 3), "31°28.754'N");
    /// assert_eq!(point.format_longitude(CoordinateFormat::DegreesMinutesSeconds, 1), "142°57'40.3\"W");
    /// ```
    pub fn format_latitude(&self, format: CoordinateFormat, precision: u8) -> String {
        format_coordinate(
            self.latitude,
            CompassDirection::for_latitude(self.latitude),
            format,
            precision,
        )
    }

    /// Formats the longitude with `precision` decimal digits (clamped to `1..=7`).
    pub fn format_longitude(&self, format: CoordinateFormat, precision: u8) -> String {
        format_coordinate(
            self.longitude,
            CompassDirection::for_longitude(self.longitude),
            format,
            precision,
        )
    }
}

fn format_coordinate(
    value: f64,
    direction: CompassDirection,
    format: CoordinateFormat,
    precision: u8,
) -> String {
    let precision = precision.clamp(1, 7) as usize;
    let scale = 10u64.pow(precision as u32);

    match format {
        CoordinateFormat::Decimal => format!("{value:.precision$}"),
        CoordinateFormat::DegreesMinutes => {
            // Round once in the smallest unit so that 59.9999' carries into the degrees
            let units_per_degree = 60 * scale;
            let total = (value.abs() * units_per_degree as f64).round() as u64;
            let degrees = total / units_per_degree;
            let minutes = (total % units_per_degree) as f64 / scale as f64;

            format!(
                "{degrees}°{minutes:0width$.precision$}'{direction}",
                width = precision + 3
            )
        }
        CoordinateFormat::DegreesMinutesSeconds => {
            let units_per_minute = 60 * scale;
            let units_per_degree = 60 * units_per_minute;
            let total = (value.abs() * units_per_degree as f64).round() as u64;
            let degrees = total / units_per_degree;
            let minutes = (total % units_per_degree) / units_per_minute;
            let seconds = (total % units_per_minute) as f64 / scale as f64;

            format!(
                "{degrees}°{minutes:02}'{seconds:0width$.precision$}\"{direction}",
                width = precision + 3
            )
        }
    }
}
