//! # Error Types
//!
//! This module defines the error types used throughout the NMEA parsing library.

use nom::error::{ErrorKind, FromExternalError, ParseError};
use std::fmt::{self, Debug, Display};

/// Holds the result of parsing functions.
///
/// It depends on the input type `I`, the output type `O`, and the error type `E`
/// (by default `nom::error::Error<I>`).
///
/// The `Ok` side is a pair containing the remainder of the input (the part of the data that
/// was not parsed) and the produced value. The `Err` side contains an instance of `nom::Err`.
///
/// Outside of the parsing code, you can use the [nom::Finish::finish] method to convert
/// it to a more common result type.
pub type IResult<I, O, E = nom::error::Error<I>> = nom::IResult<I, O, Error<I, E>>;

/// The error returned when a raw sentence is rejected by [`Nmea0183Record`](crate::Nmea0183Record)
/// or [`Fix::parse`](crate::Fix::parse).
pub type NmeaError<'a> = Error<&'a str, nom::error::Error<&'a str>>;

/// Represents all possible errors that can occur during NMEA message parsing.
///
/// None of these are fatal: a rejected sentence never alters an accumulated fix.
#[derive(Debug, PartialEq)]
pub enum Error<I, E> {
    /// The provided input contains non-ASCII characters.
    ///
    /// NMEA messages must be ASCII-only for proper parsing and checksum calculation.
    NonAscii,

    /// The checksum of the sentence was corrupt or incorrect.
    ChecksumMismatch {
        /// The checksum calculated from the message content
        expected: u8,
        /// The checksum found in the message
        found: u8,
    },

    /// The sentence could not be parsed because its format was invalid.
    ///
    /// Covers a missing leading `$`, a malformed checksum field and sentences
    /// with fewer fields than their type requires.
    ParsingError(E),

    /// The sentence type is not one of `RMC`, `GGA`, `VTG` or `ZDA`.
    ///
    /// Contains the sentence content, starting at the talker id.
    UnknownSentenceType(I),

    /// An unknown error occurred.
    Unknown,
}

impl<I, E> ParseError<I> for Error<I, E>
where
    E: ParseError<I>,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Error::ParsingError(E::from_error_kind(input, kind))
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, E, EX> FromExternalError<I, EX> for Error<I, E>
where
    E: FromExternalError<I, EX>,
{
    fn from_external_error(input: I, kind: ErrorKind, e: EX) -> Self {
        Error::ParsingError(E::from_external_error(input, kind, e))
    }
}

impl<I, E> Display for Error<I, E>
where
    I: Display,
    E: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NonAscii => write!(f, "sentence contains non-ASCII characters"),
            Error::ChecksumMismatch { expected, found } => write!(
                f,
                "checksum mismatch: calculated {expected:02X}, sentence carries {found:02X}"
            ),
            Error::ParsingError(e) => write!(f, "malformed sentence: {e:?}"),
            Error::UnknownSentenceType(i) => write!(f, "unknown sentence type: {i}"),
            Error::Unknown => write!(f, "unknown error"),
        }
    }
}

impl<I, E> std::error::Error for Error<I, E>
where
    I: Debug + Display,
    E: Debug,
{
}

/// Converts a nom error wrapper into the inner [`Error`].
///
/// `Incomplete` can not occur with the complete parsers used in this crate and
/// is reported as [`Error::Unknown`].
pub(crate) fn flatten<I, E>(err: nom::Err<Error<I, E>>) -> Error<I, E> {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e,
        nom::Err::Incomplete(_) => Error::Unknown,
    }
}
