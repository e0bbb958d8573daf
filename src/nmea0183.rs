//! # NMEA 0183 Message Framing
//!
//! This module provides the framing layer for NMEA 0183-style messages.
//! It handles the standard NMEA 0183 format: `$HHH,D1,D2,...,Dn*CC[extra]\r\n`
//!
//! The framing is configurable to handle variations in:
//! - Checksum requirements (required, optional or ignored)
//! - Line ending requirements (CRLF required, optional or forbidden)
//!
//! Anything that follows the two checksum digits (vendor extensions) is kept
//! as extra data and returned as the remaining input.

use nom::{
    Compare, Err, FindSubstring, Input, Parser,
    branch::alt,
    bytes::complete::{tag, take, take_until},
    character::complete::{char, hex_digit1},
    combinator::{opt, rest},
    error::{ErrorKind, ParseError},
    number::complete::hex_u32,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, IResult, parsing::consumed};

/// Defines how the parser should handle NMEA message checksums.
///
/// NMEA 0183 messages can include an optional checksum in the format `*CC` where
/// CC is a two-digit hexadecimal value representing the XOR of all bytes in the
/// message content (excluding the '$' prefix and '*' delimiter).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum ChecksumMode {
    #[default]
    /// Checksum is required and must be present.
    ///
    /// The parser will fail if no `*CC` checksum is found at the end of the message.
    /// If a checksum is present, it will be validated against the calculated checksum.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// Use this mode when working with mixed message sources or legacy equipment
    /// that may not always include checksums.
    Optional,

    /// Checksum is never validated.
    ///
    /// A `*CC` field is still recognized (so that extra data after it is split off),
    /// but a mismatching or malformed value does not reject the message.
    Ignore,
}

/// Defines how the parser should handle CRLF line endings.
///
/// NMEA 0183 messages typically end with a carriage return and line feed (`\r\n`),
/// but line-oriented readers usually strip them before the sentence reaches the parser.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum LineEndingMode {
    /// CRLF line ending is required and must be present.
    ///
    /// Use this mode when parsing raw serial port data.
    Required,

    #[default]
    /// CRLF line ending is accepted but not required.
    ///
    /// A bare LF or CR, as left by line-oriented readers, is stripped as well.
    Optional,

    /// CRLF line ending is forbidden and must not be present.
    ///
    /// Use this mode when parsing messages from APIs, databases, or other
    /// sources where line endings have been removed.
    Forbidden,
}

/// The pieces of a framed NMEA 0183 message.
///
/// ```text
///  $GPVTG,229.86,T,,M,0.00,N,0.0046,K*55,vendor
///   \______________________________/ \/ \_____/
///                content          checksum extra_data
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Everything between `$` and `*`, talker id included.
    pub content: &'a str,
    /// The checksum carried by the message, if any.
    pub checksum: Option<u8>,
    /// Characters following the checksum digits, line ending excluded.
    pub extra_data: &'a str,
}

impl Frame<'_> {
    /// XOR checksum of the message content.
    pub fn calculated_checksum(&self) -> u8 {
        checksum(self.content).1
    }

    /// Returns `true` if the message carried a checksum and it matches the content.
    pub fn has_valid_checksum(&self) -> bool {
        self.checksum == Some(self.calculated_checksum())
    }
}

/// Creates a configurable NMEA 0183-style parser factory.
///
/// This struct allows you to configure the NMEA 0183 framing parser with different
/// checksum and line ending modes before building the final parser.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{ChecksumMode, IResult, LineEndingMode, Nmea0183ParserBuilder};
///
/// fn content_parser(i: &str) -> IResult<&str, usize> {
///     Ok(("", i.split(',').count()))
/// }
///
/// // Strict: checksum and CRLF both required
/// let mut strict_parser = Nmea0183ParserBuilder::new()
///     .checksum_mode(ChecksumMode::Required)
///     .line_ending_mode(LineEndingMode::Required)
///     .build(content_parser);
/// assert_eq!(strict_parser("$GPGGA,data*6A\r\n"), Ok(("", 2)));
/// assert!(strict_parser("$GPGGA,data*6A").is_err()); // (missing CRLF)
/// assert!(strict_parser("$GPGGA,data\r\n").is_err()); // (missing checksum)
///
/// // Checksum optional, CRLF forbidden
/// let mut lenient_parser = Nmea0183ParserBuilder::new()
///     .checksum_mode(ChecksumMode::Optional)
///     .line_ending_mode(LineEndingMode::Forbidden)
///     .build(content_parser);
/// assert!(lenient_parser("$GPGGA,data*6A").is_ok()); // (with valid checksum)
/// assert!(lenient_parser("$GPGGA,data").is_ok()); // (without checksum)
/// assert!(lenient_parser("$GPGGA,data*99").is_err()); // (invalid checksum)
///
/// // Checksum ignored, trailing vendor data returned as remaining input
/// let mut bypass_parser = Nmea0183ParserBuilder::new()
///     .checksum_mode(ChecksumMode::Ignore)
///     .build(content_parser);
/// assert_eq!(bypass_parser("$GPGGA,data*99,xyz"), Ok((",xyz", 2)));
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nmea0183ParserBuilder {
    /// Checksum mode for the parser.
    checksum_mode: ChecksumMode,

    /// Line ending mode for the parser.
    line_ending_mode: LineEndingMode,
}

impl Nmea0183ParserBuilder {
    /// Creates a new NMEA 0183 parser builder with default settings.
    ///
    /// The default settings are:
    /// - Checksum mode: [`ChecksumMode::Required`]
    /// - Line ending mode: [`LineEndingMode::Optional`]
    pub fn new() -> Self {
        Nmea0183ParserBuilder {
            checksum_mode: ChecksumMode::Required,
            line_ending_mode: LineEndingMode::Optional,
        }
    }

    /// Sets the checksum mode for the parser.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the line ending mode for the parser.
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Builds the NMEA 0183-style parser with the configured settings.
    ///
    /// The returned parser frames the message with [`frame`] and then runs
    /// `content_parser` on the message content. The remaining input of a successful
    /// parse is the extra data that followed the checksum.
    pub fn build<'a, O, F, E>(self, mut content_parser: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
    where
        F: Parser<&'a str, Output = O, Error = Error<&'a str, E>>,
        E: ParseError<&'a str>,
    {
        let mut framing = frame(self.checksum_mode, self.line_ending_mode);

        move |i: &'a str| {
            let (extra_data, frame) = framing(i)?;
            let (_, output) = content_parser.parse(frame.content)?;

            Ok((extra_data, output))
        }
    }
}

impl Default for Nmea0183ParserBuilder {
    fn default() -> Self {
        Nmea0183ParserBuilder::new()
    }
}

/// Splits a raw message into its [`Frame`].
///
/// The returned parser will:
/// * Validate that the input is ASCII-only
/// * Strip the line ending according to `le`
/// * Expect the message to start with `$`
/// * Extract the message content (everything before `*`)
/// * Parse the checksum and validate it according to `cc`
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{ChecksumMode, Error, IResult, LineEndingMode, frame};
///
/// let mut parser = frame(ChecksumMode::Required, LineEndingMode::Optional);
///
/// let result: IResult<_, _> = parser("$GPGGA,data*6a,extra\r\n");
/// let (extra, frame) = result.unwrap();
/// assert_eq!(frame.content, "GPGGA,data");
/// assert_eq!(frame.checksum, Some(0x6A));
/// assert_eq!(extra, ",extra");
///
/// let result: IResult<_, _> = parser("$GPGGA,data*6B");
/// assert_eq!(
///     result,
///     Err(nom::Err::Error(Error::ChecksumMismatch { expected: 0x6A, found: 0x6B }))
/// );
/// ```
pub fn frame<'a, E>(
    cc: ChecksumMode,
    le: LineEndingMode,
) -> impl FnMut(&'a str) -> IResult<&'a str, Frame<'a>, E>
where
    E: ParseError<&'a str>,
{
    move |i: &'a str| {
        if !i.is_ascii() {
            return Err(nom::Err::Error(Error::NonAscii));
        }

        let (body, _) = crlf(le).parse(i)?;
        let body = match le {
            LineEndingMode::Optional => body.strip_suffix(['\n', '\r']).unwrap_or(body),
            _ => body,
        };
        let (body, _) = char('$').parse(body)?;
        let (tail, content) = alt((take_until("*"), rest)).parse(body)?;
        let (extra_data, cc_found) = checksum_field(cc).parse(tail)?;

        let frame = Frame {
            content,
            checksum: cc_found,
            extra_data,
        };

        if cc != ChecksumMode::Ignore
            && let Some(found) = cc_found
        {
            let expected = frame.calculated_checksum();
            if found != expected {
                return Err(nom::Err::Error(Error::ChecksumMismatch { expected, found }));
            }
        }

        Ok((extra_data, frame))
    }
}

/// Parses the `*CC` checksum field at the start of `i`.
///
/// Returns the checksum value ([`None`] if no checksum present) and leaves whatever
/// follows the two hex digits as the remaining input.
pub(crate) fn checksum_field<'a, E: ParseError<&'a str>>(
    cc: ChecksumMode,
) -> impl FnMut(&'a str) -> nom::IResult<&'a str, Option<u8>, E> {
    move |i: &'a str| {
        let (i, asterisk) = opt(char('*')).parse(i)?;

        if asterisk.is_none() {
            return match cc {
                ChecksumMode::Required => Err(Err::Error(E::from_error_kind(i, ErrorKind::Char))),
                _ => Ok((i, None)),
            };
        }

        let hex = |i: &'a str| -> nom::IResult<&'a str, Option<u8>, E> {
            let (i, digits) = take(2u8).parse(i)?;
            let (_, digits) = consumed(hex_digit1, ErrorKind::IsA).parse(digits)?;
            let (_, value) = hex_u32.parse(digits)?;

            Ok((i, Some(value as u8)))
        };

        match cc {
            ChecksumMode::Ignore => Ok(opt(hex)
                .map(Option::flatten)
                .parse(i)
                .unwrap_or((i, None))),
            _ => hex(i),
        }
    }
}

/// Parses CRLF line endings based on configuration.
///
/// On success the remaining input is the message without its line ending.
pub(crate) fn crlf<'a, I, E: ParseError<I>>(crlf: LineEndingMode) -> impl Fn(I) -> nom::IResult<I, (), E>
where
    I: Input + Compare<&'a str> + FindSubstring<&'a str>,
{
    move |i: I| {
        let (i, data) = opt(take_until("\r\n")).parse(i)?;

        let data = match (crlf, data) {
            (LineEndingMode::Forbidden, Some(_)) | (LineEndingMode::Required, None) => {
                return Err(Err::Error(E::from_error_kind(i, ErrorKind::CrLf)));
            }
            (_, Some(data)) => {
                let (_, _) = consumed(tag("\r\n"), ErrorKind::CrLf).parse(i)?;
                data
            }
            (_, None) => i,
        };

        Ok((data, ()))
    }
}

/// Calculates the NMEA 0183 checksum for the given message content.
///
/// The checksum is the XOR of every byte between the '$' prefix and the '*'
/// checksum delimiter, both excluded.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::checksum;
///
/// let (_, cc) = checksum("GPGGA,123456,data");
/// assert_eq!(cc, 0x41);
/// ```
pub fn checksum<I>(input: I) -> (I, u8)
where
    I: Input + nom::AsBytes,
{
    let calculated_checksum = input
        .as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte);

    (input, calculated_checksum)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}
