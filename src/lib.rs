//! # NMEA 0183 Fix
//!
//! This library turns a stream of NMEA 0183 sentences into a single GPS fix.
//! A position report is usually spread over several sentences (`RMC`, `GGA`,
//! `VTG`, `ZDA`), each one is validated and merged into an accumulated [`Fix`].
//!
//! The crate is layered:
//! - [`frame`] / [`Nmea0183ParserBuilder`]: the `$...*CC\r\n` framing and
//!   the XOR checksum
//! - [`nmea_content`]: parsers for the content of the supported sentences
//! - [`Fix`]: the immutable accumulated state and its merge rules
//! - [`Nmea0183Record`]: a mutable convenience wrapper owning a [`Fix`]
//! - [`GeoPoint`]: great-circle geodesy, fixed-point encoding and formatting
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_fix::{Nmea0183Record, SentenceType};
//!
//! let mut record = Nmea0183Record::new();
//!
//! let result = record.parse(
//!     "$GPRMC,080701.00,A,3128.7540,N,14257.6714,W,000.0,000.0,180707,13.1,E,A*1C",
//! );
//! assert_eq!(result, Ok(SentenceType::RMC));
//!
//! let fix = record.fix();
//! assert!(fix.is_valid_gps());
//! assert_eq!(fix.ddmmyy(), Some(180707));
//!
//! let point = fix.geo_point().unwrap();
//! assert_eq!(point.to_string(), "31.47923,-142.96119");
//! ```

pub mod error;
pub mod fix;
pub mod geo_point;
mod nmea0183;
pub mod nmea_content;
pub mod parsing;
mod record;

pub use error::{Error, IResult, NmeaError};
pub use fix::{DateSource, Fix, Fixtime, SentenceSet};
pub use geo_point::{
    CompassDirection, CoordinateFormat, DistanceFormula, EncodedLength, GeoBounds, GeoPoint,
};
pub use nmea0183::*;
pub use nmea_content::{FixType, NmeaSentence, SentenceType};
pub use record::{Clock, Nmea0183Record, RecordOptions, RecordOptionsBuilder};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
