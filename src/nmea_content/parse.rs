//! Field-level parsers shared by the sentence parsers.
//!
//! Every field is delimited by `,`. A missing separator is a parsing error (the
//! sentence has too few fields), while an empty or malformed value inside a
//! present field yields `None`.

use std::str::FromStr;

use nom::{
    Parser,
    bytes::complete::{take, take_till},
    character::complete::{char, u8},
    error::ErrorKind,
    number::complete::double,
    sequence::preceded,
};

use crate::{IResult, NmeaError, parsing::consumed};

/// Takes the raw text of one field, which may be empty.
pub fn raw_field(i: &str) -> IResult<&str, &str> {
    take_till(|c| c == ',').parse(i)
}

/// Runs `f` after a `,` separator.
pub fn sep<'a, O, F>(f: F) -> impl Parser<&'a str, Output = O, Error = NmeaError<'a>>
where
    F: Parser<&'a str, Output = O, Error = NmeaError<'a>>,
{
    preceded(char(','), f)
}

/// Parses one field with [`FromStr`], yielding `None` when it is empty or malformed.
pub fn field<'a, T: FromStr>(i: &'a str) -> IResult<&'a str, Option<T>> {
    raw_field.map(|raw: &str| raw.trim().parse().ok()).parse(i)
}

/// Parses one numeric field; non-finite values (`NaN`, `inf`) are rejected.
pub fn number(i: &str) -> IResult<&str, Option<f64>> {
    field::<f64>
        .map(|value| value.filter(|v| v.is_finite()))
        .parse(i)
}

/// Applies `f` to the whole text of one field.
///
/// The field value is `None` unless `f` succeeds and consumes the field entirely.
pub fn lenient<'a, O, F>(mut f: F) -> impl Parser<&'a str, Output = Option<O>, Error = NmeaError<'a>>
where
    F: Parser<&'a str, Output = O, Error = NmeaError<'a>>,
{
    move |i: &'a str| -> IResult<&'a str, Option<O>> {
        let (i, raw) = raw_field(i)?;
        let value = consumed(|x: &'a str| f.parse(x), ErrorKind::Eof)
            .parse(raw)
            .ok()
            .map(|(_, value)| value);

        Ok((i, value))
    }
}

fn two_digits(i: &str) -> IResult<&str, u8> {
    take(2u8).and_then(consumed(u8, ErrorKind::Digit)).parse(i)
}

/// `hhmmss.sss`
pub fn hms(i: &str) -> IResult<&str, time::Time> {
    let (i, (hour, minute, second)) = (two_digits, two_digits, double).parse(i)?;

    if second.is_sign_negative() || !second.is_finite() {
        return Err(nom::Err::Error(nom::error::make_error(
            i,
            nom::error::ErrorKind::Verify,
        )));
    }

    let milliseconds = (second.fract() * 1000.0).round().min(999.0);
    let second = second.trunc();

    let time = time::Time::from_hms_milli(hour, minute, second as u8, milliseconds as u16).or(
        Err(nom::Err::Error(nom::error::make_error(
            i,
            nom::error::ErrorKind::Verify,
        ))),
    )?;

    Ok((i, time))
}

/// `DDMMYY`, two digit years 83-99 map to the 1900s and the rest to the 2000s.
pub fn ddmmyy(i: &str) -> IResult<&str, time::Date> {
    let (i, (day, month, year)) = (two_digits, two_digits, two_digits).parse(i)?;

    let year = match year {
        83..=99 => year as i32 + 1900,
        _ => year as i32 + 2000,
    };

    calendar_date(i, day, month, year)
}

pub(crate) fn calendar_date(i: &str, day: u8, month: u8, year: i32) -> IResult<&str, time::Date> {
    let month = month
        .try_into()
        .or(Err(nom::Err::Error(nom::error::make_error(
            i,
            nom::error::ErrorKind::Verify,
        ))))?;

    let date = time::Date::from_calendar_date(year, month, day).or(Err(nom::Err::Error(
        nom::error::make_error(i, nom::error::ErrorKind::Verify),
    )))?;

    Ok((i, date))
}

/// UTC time of day field.
pub fn time_of_day(i: &str) -> IResult<&str, Option<time::Time>> {
    lenient(hms).parse(i)
}

/// `DDMMYY` date field.
pub fn date(i: &str) -> IResult<&str, Option<time::Date>> {
    lenient(ddmmyy).parse(i)
}

/// Parses a `(d)ddmm.mmmm,H` coordinate pair of fields into signed degrees.
///
/// The value is negative when the hemisphere field is `negative`; any other
/// hemisphere letter (or none) is taken as positive. An unparsable value yields `None`.
pub fn coordinate<'a>(negative: char) -> impl Parser<&'a str, Output = Option<f64>, Error = NmeaError<'a>> {
    (number, sep(raw_field)).map(move |(value, hemisphere)| {
        value.map(|ddmm| {
            let degrees = (ddmm / 100.0).trunc();
            let decimal = degrees + (ddmm - degrees * 100.0) / 60.0;

            if hemisphere.trim().starts_with(negative) {
                -decimal
            } else {
                decimal
            }
        })
    })
}

/// Latitude and longitude, four fields in total.
pub fn latlon(i: &str) -> IResult<&str, (Option<f64>, Option<f64>)> {
    (coordinate('S'), sep(coordinate('W'))).parse(i)
}

/// Magnetic variation `x.x,E|W`, westerly variation is negative.
pub fn magnetic_variation(i: &str) -> IResult<&str, Option<f64>> {
    coordinate_less('W').parse(i)
}

fn coordinate_less<'a>(negative: char) -> impl Parser<&'a str, Output = Option<f64>, Error = NmeaError<'a>> {
    (number, sep(raw_field)).map(move |(value, direction)| {
        value.map(|value| {
            if direction.trim().starts_with(negative) {
                -value
            } else {
                value
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_field_defaults_on_failure() {
        let result: IResult<_, _> = field::<u8>("12,rest");
        assert_eq!(result, Ok((",rest", Some(12))));

        let result: IResult<_, _> = field::<u8>(",rest");
        assert_eq!(result, Ok((",rest", None)));

        let result: IResult<_, _> = field::<u8>("1x,rest");
        assert_eq!(result, Ok((",rest", None)));

        let result: IResult<_, _> = number("nan");
        assert_eq!(result, Ok(("", None)));
    }

    #[test]
    fn test_time_of_day() {
        let (_, time) = time_of_day("025423.494").unwrap();
        assert_eq!(time, Some(time::Time::from_hms_milli(2, 54, 23, 494).unwrap()));

        let (_, time) = time_of_day("125653").unwrap();
        assert_eq!(time, Some(time::Time::from_hms(12, 56, 53).unwrap()));

        assert_eq!(time_of_day("").unwrap().1, None);
        assert_eq!(time_of_day("256000").unwrap().1, None);
        assert_eq!(time_of_day("12a653").unwrap().1, None);
        assert_eq!(time_of_day("1256nan").unwrap().1, None);
        assert_eq!(time_of_day("1256inf").unwrap().1, None);
    }

    #[test]
    fn test_date() {
        let (_, date) = date("180707").unwrap();
        assert_eq!(
            date,
            Some(time::Date::from_calendar_date(2007, time::Month::July, 18).unwrap())
        );

        let (_, date) = super::date("311299").unwrap();
        assert_eq!(
            date,
            Some(time::Date::from_calendar_date(1999, time::Month::December, 31).unwrap())
        );

        assert_eq!(super::date("320107").unwrap().1, None);
        assert_eq!(super::date("1807071").unwrap().1, None);
    }

    #[test]
    fn test_latlon() {
        let (i, (lat, lon)) = latlon("3128.7540,N,14257.6714,W,000.0").unwrap();
        assert_eq!(i, ",000.0");
        assert_relative_eq!(lat.unwrap(), 31.479233, epsilon = 1e-6);
        assert_relative_eq!(lon.unwrap(), -142.961190, epsilon = 1e-6);

        let (_, (lat, lon)) = latlon("3845.165,S,00828.961,E").unwrap();
        assert_relative_eq!(lat.unwrap(), -38.75275, epsilon = 1e-6);
        assert_relative_eq!(lon.unwrap(), 8.482683, epsilon = 1e-6);

        let (_, (lat, lon)) = latlon(",,,").unwrap();
        assert_eq!((lat, lon), (None, None));

        assert!(latlon("3845.165,N,00828.961").is_err());
    }

    #[test]
    fn test_magnetic_variation() {
        assert_eq!(magnetic_variation("13.1,E").unwrap().1, Some(13.1));
        assert_eq!(magnetic_variation("4.2,W").unwrap().1, Some(-4.2));
        assert_eq!(magnetic_variation(",").unwrap().1, None);
    }
}
