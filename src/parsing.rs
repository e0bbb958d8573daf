//! # Parsing Utilities
//!
//! Combinators shared by the framing layer and the sentence parsers.

use nom::{
    Err, Input, Mode, OutputMode, PResult, Parser,
    error::{ErrorKind, ParseError},
};

/// Ensures that the parser consumes all input.
///
/// Runs `f` and fails with `e` unless nothing is left afterwards. Used for
/// fixed-width fields such as the two checksum digits, where a partial match
/// (`"1z"`) must be rejected instead of silently truncated.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::parsing::consumed;
/// use nom::{IResult, Parser, character::complete::hex_digit1, error::ErrorKind};
///
/// let mut parser = consumed(hex_digit1, ErrorKind::IsA);
/// let result: IResult<_, _> = parser.parse("1F");
/// assert_eq!(result, Ok(("", "1F")));
///
/// let result: IResult<_, _> = parser.parse("1z");
/// assert!(result.is_err());
/// ```
pub fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    Consumed { f, e }
}

struct Consumed<F> {
    f: F,
    e: ErrorKind,
}

impl<I, F> Parser<I> for Consumed<F>
where
    I: Input,
    F: Parser<I>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = <F as Parser<I>>::Error;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| {
                <F as Parser<I>>::Error::from_error_kind(i, self.e)
            })));
        }

        Ok((i, o))
    }
}
