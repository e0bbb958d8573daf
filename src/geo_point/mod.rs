//! # Geographic Points
//!
//! A latitude/longitude pair on a spherical earth, with great-circle geodesy
//! (distance, heading, destination and bounding box), a compact fixed-point
//! binary encoding and string formatting.
//!
//! ```rust
//! use nmea0183_fix::GeoPoint;
//!
//! let london = GeoPoint::new(51.5007, -0.1246);
//! let new_york = GeoPoint::new(40.6892, -74.0445);
//!
//! let km = london.distance_to(&new_york) / 1000.0;
//! assert!((km - 5574.8).abs() < 1.0);
//! assert!(london.heading_to(&new_york) > 270.0);
//! ```

mod encoding;
mod format;

pub use encoding::EncodedLength;
pub use format::{CompassDirection, CoordinateFormat};

use std::{f64::consts::PI, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean earth radius in meters (IUGG).
pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_371_008.8;

/// Points closer than this to `(0, 0)` on both axes are not valid fixes.
///
/// A receiver without a fix commonly reports zeroes, so the threshold is a
/// heuristic for "uninitialized" and will also reject real positions in the
/// Gulf of Guinea.
pub const ORIGIN_EPSILON_DEGREES: f64 = 0.0001;

/// Returns `true` if `latitude`/`longitude` form a usable fix.
///
/// The latitude must lie strictly inside `(-90, 90)`, the longitude strictly
/// inside `(-180, 180)`, and the point must not sit on the origin (see
/// [`ORIGIN_EPSILON_DEGREES`]). `NaN` is never valid.
pub fn is_valid_coordinates(latitude: f64, longitude: f64) -> bool {
    if !(latitude.abs() < 90.0 && longitude.abs() < 180.0) {
        return false;
    }

    !(latitude.abs() < ORIGIN_EPSILON_DEGREES && longitude.abs() < ORIGIN_EPSILON_DEGREES)
}

/// Great-circle formula used for [`GeoPoint::distance_to_with`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DistanceFormula {
    /// Numerically stable for small separations.
    #[default]
    Haversine,
    /// Spherical law of cosines, loses precision below a few meters.
    LawOfCosines,
}

/// A point on the earth in degrees.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    pub fn from_radians(latitude: f64, longitude: f64) -> Self {
        GeoPoint::new(latitude.to_degrees(), longitude.to_degrees())
    }

    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }

    /// See [`is_valid_coordinates`].
    pub fn is_valid(&self) -> bool {
        is_valid_coordinates(self.latitude, self.longitude)
    }

    /// Central angle to `other` in radians, using the haversine formula.
    pub fn radians_to(&self, other: &GeoPoint) -> f64 {
        self.radians_to_with(other, DistanceFormula::Haversine)
    }

    /// Central angle to `other` in radians.
    ///
    /// Identical points are exactly `0.0` apart with either formula.
    pub fn radians_to_with(&self, other: &GeoPoint, formula: DistanceFormula) -> f64 {
        if self == other {
            return 0.0;
        }

        let (lat1, lon1) = (self.latitude_radians(), self.longitude_radians());
        let (lat2, lon2) = (other.latitude_radians(), other.longitude_radians());

        match formula {
            DistanceFormula::Haversine => {
                let d_lat = lat2 - lat1;
                let d_lon = lon2 - lon1;

                let a = (d_lat / 2.0).sin().powi(2)
                    + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

                2.0 * a.sqrt().atan2((1.0 - a).sqrt())
            }
            DistanceFormula::LawOfCosines => {
                let cos_c = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon2 - lon1).cos();
                cos_c.clamp(-1.0, 1.0).acos()
            }
        }
    }

    /// Great-circle distance to `other` in meters, using the haversine formula.
    ///
    /// Returns exactly `0.0` for identical points. A `NaN` coordinate on
    /// either side yields `NaN`.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        self.distance_to_with(other, DistanceFormula::Haversine)
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to_with(&self, other: &GeoPoint, formula: DistanceFormula) -> f64 {
        self.radians_to_with(other, formula) * EARTH_MEAN_RADIUS_METERS
    }

    /// Initial great-circle heading towards `other`, in degrees `[0, 360)`.
    ///
    /// Identical points yield `0.0`. Starting from a pole every direction is
    /// south (`180.0`) or north (`0.0`).
    pub fn heading_to(&self, other: &GeoPoint) -> f64 {
        let dist = self.radians_to(other);
        if dist == 0.0 {
            return 0.0;
        }

        let lat1 = self.latitude_radians();
        let lat2 = other.latitude_radians();
        let d_lon = other.longitude_radians() - self.longitude_radians();

        let denominator = dist.sin() * lat1.cos();
        if denominator.abs() < f64::EPSILON {
            return if self.latitude > 0.0 { 180.0 } else { 0.0 };
        }

        let cos_heading = (lat2.sin() - lat1.sin() * dist.cos()) / denominator;
        let mut heading = cos_heading.clamp(-1.0, 1.0).acos();
        if d_lon.sin() < 0.0 {
            heading = 2.0 * PI - heading;
        }

        normalize_heading(heading.to_degrees())
    }

    /// The point reached by travelling `distance_meters` along the great circle
    /// starting at `heading_degrees`.
    ///
    /// The resulting longitude is normalized to `[-180, 180)`.
    pub fn destination_point(&self, distance_meters: f64, heading_degrees: f64) -> GeoPoint {
        let delta = distance_meters / EARTH_MEAN_RADIUS_METERS;
        let theta = heading_degrees.to_radians();

        let lat1 = self.latitude_radians();
        let lon1 = self.longitude_radians();

        let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos();
        let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

        GeoPoint::new(lat2.to_degrees(), normalize_longitude(lon2.to_degrees()))
    }

    /// The smallest latitude/longitude box enclosing the circle of
    /// `radius_meters` around this point.
    ///
    /// When the circle reaches over a pole the box spans every longitude. A box
    /// crossing the antimeridian has `min_longitude > max_longitude`.
    pub fn bounding_box(&self, radius_meters: f64) -> GeoBounds {
        let delta = (radius_meters / EARTH_MEAN_RADIUS_METERS).to_degrees();

        let min_latitude = self.latitude - delta;
        let max_latitude = self.latitude + delta;

        if max_latitude >= 90.0 || min_latitude <= -90.0 {
            return GeoBounds {
                min_latitude: min_latitude.max(-90.0),
                max_latitude: max_latitude.min(90.0),
                min_longitude: -180.0,
                max_longitude: 180.0,
            };
        }

        let d_lon = (delta.to_radians().sin() / self.latitude_radians().cos())
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees();

        if d_lon >= 180.0 {
            return GeoBounds {
                min_latitude,
                max_latitude,
                min_longitude: -180.0,
                max_longitude: 180.0,
            };
        }

        GeoBounds {
            min_latitude,
            max_latitude,
            min_longitude: normalize_longitude(self.longitude - d_lon),
            max_longitude: normalize_longitude(self.longitude + d_lon),
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// A latitude/longitude box, see [`GeoPoint::bounding_box`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl GeoBounds {
    /// Returns `true` if `point` lies inside the box, edges included.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        if point.latitude < self.min_latitude || point.latitude > self.max_latitude {
            return false;
        }

        if self.min_longitude <= self.max_longitude {
            (self.min_longitude..=self.max_longitude).contains(&point.longitude)
        } else {
            point.longitude >= self.min_longitude || point.longitude <= self.max_longitude
        }
    }
}

fn normalize_heading(degrees: f64) -> f64 {
    let heading = degrees.rem_euclid(360.0);
    if heading >= 360.0 { 0.0 } else { heading }
}

fn normalize_longitude(degrees: f64) -> f64 {
    let longitude = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if longitude >= 180.0 { -180.0 } else { longitude }
}
