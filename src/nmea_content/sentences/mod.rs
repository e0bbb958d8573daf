mod gga;
mod rmc;
mod vtg;
mod zda;

pub use gga::GGA;
pub use rmc::RMC;
pub use vtg::{KILOMETERS_PER_KNOT, VTG};
pub use zda::ZDA;

use std::fmt;

use nom::{Parser, bytes::complete::take, character::complete::char};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, IResult};

/// A trait for types that can be parsed from a string input.
///
/// This trait is implemented by all strongly-typed NMEA sentence structs
/// and the `NmeaSentence` enum, allowing them to be parsed using the
/// [`frame`](crate::frame) framing parser.
pub trait Parsable: Sized {
    /// Parses the input and returns a result.
    ///
    /// # Returns
    ///
    /// Returns an [`IResult`] containing:
    /// - On success: A tuple of `(remaining_input, parsed_value)`, where `remaining_input`
    ///   is the unparsed portion of the input and `parsed_value` is the successfully parsed
    ///   instance of `Self`.
    /// - On failure: An [`Error`] indicating the parsing error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nmea0183_fix::nmea_content::{NmeaSentence, Parsable};
    ///
    /// // Parse complete sentence content (including talker ID and sentence type)
    /// let content = "GPGGA,123456.00,4916.29,N,12311.76,W,1,08,0.9,545.4,M,46.9,M,,";
    /// let result = NmeaSentence::parser(content);
    /// assert!(result.is_ok());
    /// ```
    fn parser(input: &str) -> IResult<&str, Self>;
}

/// The sentence kinds understood by this crate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceType {
    /// Recommended Minimum Navigation Information
    RMC,
    /// Global Positioning System Fix Data
    GGA,
    /// Track made good and Ground speed
    VTG,
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA,
}

impl SentenceType {
    /// All sentence types, in bit order.
    pub const ALL: [SentenceType; 4] = [Self::RMC, Self::GGA, Self::VTG, Self::ZDA];

    /// The three letter sentence formatter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RMC => "RMC",
            Self::GGA => "GGA",
            Self::VTG => "VTG",
            Self::ZDA => "ZDA",
        }
    }

    pub(crate) fn bit(&self) -> u8 {
        match self {
            Self::RMC => 0x01,
            Self::GGA => 0x02,
            Self::VTG => 0x04,
            Self::ZDA => 0x08,
        }
    }
}

impl fmt::Display for SentenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unified enum representing all supported NMEA 0183 sentence types.
///
/// While the framing parser handles the outer NMEA structure (`$`, checksum, CRLF),
/// [`NmeaSentence::parser`] parses the inner sentence content. Any two-letter
/// talker id is accepted (`GP`, `GN`, `GL`, ...).
///
/// Numeric fields are lenient: an empty or malformed value becomes `None`.
/// A sentence with fewer fields than its type requires is an error.
///
/// ## Example Usage
///
/// ```rust
/// use nmea0183_fix::nmea_content::{NmeaSentence, Parsable};
///
/// let result = NmeaSentence::parser("GPZDA,123456.78,29,02,2024,03,00");
/// assert!(result.is_ok());
///
/// let sentence = result.unwrap().1;
/// match sentence {
///     NmeaSentence::ZDA(zda) => {
///         assert!(zda.time.is_some());
///         assert!(zda.date.is_some());
///         assert!(zda.utc_offset.is_some());
///     }
///     _ => println!("Other NMEA sentence parsed"),
/// }
/// ```
///
/// ## Supported Sentence Types
///
/// | Variant      | Sentence Type                                           | Description                      |
/// |--------------|---------------------------------------------------------|----------------------------------|
/// | GGA([`GGA`]) | Global Positioning System Fix Data                      | GPS position and fix quality     |
/// | RMC([`RMC`]) | Recommended Minimum Navigation Information              | Essential navigation data        |
/// | VTG([`VTG`]) | Track made good and Ground speed                        | Velocity information             |
/// | ZDA([`ZDA`]) | Time & Date - UTC, day, month, year and local time zone | UTC time and date with time zone |
///
/// ## Error Handling
///
/// ```rust
/// use nmea0183_fix::{Error, nmea_content::{NmeaSentence, Parsable}};
///
/// // Unrecognized sentence type
/// let result = NmeaSentence::parser("GPGSV,3,2,12,01,40,083,45");
/// assert!(matches!(result, Err(nom::Err::Error(Error::UnknownSentenceType(_)))));
///
/// // Too few fields for a GGA sentence
/// let result = NmeaSentence::parser("GPGGA,invalid,data");
/// assert!(result.is_err());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum NmeaSentence {
    /// Global Positioning System Fix Data
    GGA(GGA),
    /// Recommended Minimum Navigation Information
    RMC(RMC),
    /// Track made good and Ground speed
    VTG(VTG),
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA(ZDA),
}

impl NmeaSentence {
    /// The kind of this sentence.
    pub fn sentence_type(&self) -> SentenceType {
        match self {
            Self::GGA(_) => SentenceType::GGA,
            Self::RMC(_) => SentenceType::RMC,
            Self::VTG(_) => SentenceType::VTG,
            Self::ZDA(_) => SentenceType::ZDA,
        }
    }
}

impl Parsable for NmeaSentence {
    fn parser(i: &str) -> IResult<&str, Self> {
        let msg = i;

        let (i, _talker_id) = take(2u8).parse(i)?;
        let (i, sentence_type) = take(3u8).parse(i)?;

        let (i, sentence) = match sentence_type {
            "GGA" => (char(','), GGA::parser).map(|(_, s)| Self::GGA(s)).parse(i)?,
            "RMC" => (char(','), RMC::parser).map(|(_, s)| Self::RMC(s)).parse(i)?,
            "VTG" => (char(','), VTG::parser).map(|(_, s)| Self::VTG(s)).parse(i)?,
            "ZDA" => (char(','), ZDA::parser).map(|(_, s)| Self::ZDA(s)).parse(i)?,
            _ => return Err(nom::Err::Error(Error::UnknownSentenceType(msg))),
        };

        Ok((i, sentence))
    }
}

macro_rules! parsable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl Parsable for $name {
            fn parser(i: &str) -> IResult<&str, Self> {
                nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*)).parse(i)
            }
        }
    };
}

parsable_enum! {
    /// Status Mode Indicator
    pub enum Status {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid
        'V' => Invalid,
    }
}

parsable_enum! {
    /// FAA Mode Indicator
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
    pub enum FaaMode {
        /// A - Autonomous mode
        'A' => Autonomous,
        /// C - Quectel Querk, "Caution"
        'C' => Caution,
        /// D - Differential Mode
        'D' => Differential,
        /// E - Estimated (dead-reckoning) mode
        'E' => Estimated,
        /// F - RTK Float mode
        'F' => FloatRtk,
        /// M - Manual Input Mode
        'M' => Manual,
        /// N - Data Not Valid
        'N' => DataNotValid,
        /// P - Precise
        'P' => Precise,
        /// R - RTK Integer mode
        'R' => FixedRtk,
        /// S - Simulated Mode
        'S' => Simulator,
        /// U - Quectel Querk, "Unsafe"
        'U' => Unsafe,
    }
}

/// Quality of the GPS fix, as reported by the GGA quality field.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixType {
    /// 0 - Fix not available
    NoFix,
    /// 1 - GPS fix
    Gps,
    /// 2 - Differential GPS fix
    Dgps,
    /// 3 - PPS fix
    Pps,
    /// 4 - Real Time Kinematic
    Rtk,
    /// 5 - Float RTK
    FloatRtk,
    /// 6 - estimated (dead reckoning)
    DeadReckoning,
    /// 7 - Manual input mode
    Manual,
    /// 8 - Simulation mode
    Simulation,
    /// Any other non-zero code, e.g. 9 for SBAS on NMEA 4.x receivers
    Other(u8),
}

impl FixType {
    /// Maps a GGA quality code to a fix type.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::NoFix,
            1 => Self::Gps,
            2 => Self::Dgps,
            3 => Self::Pps,
            4 => Self::Rtk,
            5 => Self::FloatRtk,
            6 => Self::DeadReckoning,
            7 => Self::Manual,
            8 => Self::Simulation,
            other => Self::Other(other),
        }
    }

    /// The GGA quality code.
    pub fn code(&self) -> u8 {
        match self {
            Self::NoFix => 0,
            Self::Gps => 1,
            Self::Dgps => 2,
            Self::Pps => 3,
            Self::Rtk => 4,
            Self::FloatRtk => 5,
            Self::DeadReckoning => 6,
            Self::Manual => 7,
            Self::Simulation => 8,
            Self::Other(code) => *code,
        }
    }
}
