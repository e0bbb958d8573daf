use nom::{
    Parser,
    character::complete::char,
    multi::separated_list0,
    sequence::separated_pair,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    IResult,
    nmea_content::{Parsable, parse::raw_field},
};

/// Kilometers per nautical mile.
pub const KILOMETERS_PER_KNOT: f64 = 1.852;

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8
///          |  |  |  |  |  |  |  |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K*hh<CR><LF>
/// ```
///
/// The fields are scanned as `(value, unit)` pairs, so older receivers that
/// omit the unit letters of some pairs or reorder them are still understood.
/// Pairs with an unknown unit (such as a trailing NMEA 2.3 mode indicator) are skipped.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VTG {
    /// Course over ground in degrees true (`T`)
    pub course_over_ground_true: Option<f64>,
    /// Course over ground in degrees magnetic (`M`)
    pub course_over_ground_magnetic: Option<f64>,
    /// Speed over ground in knots (`N`)
    pub speed_over_ground_knots: Option<f64>,
    /// Speed over ground in kilometers per hour (`K`)
    pub speed_over_ground_kph: Option<f64>,
}

impl VTG {
    /// Speed over ground in knots.
    ///
    /// The kilometers per hour value takes precedence over the knots value when
    /// both are present, as it is usually reported with more digits.
    pub fn speed_over_ground(&self) -> Option<f64> {
        self.speed_over_ground_kph
            .map(|kph| kph / KILOMETERS_PER_KNOT)
            .or(self.speed_over_ground_knots)
    }
}

impl Parsable for VTG {
    fn parser(i: &str) -> IResult<&str, Self> {
        let (i, pairs) =
            separated_list0(char(','), separated_pair(raw_field, char(','), raw_field)).parse(i)?;

        let mut vtg = VTG::default();
        for (value, unit) in pairs {
            let Some(value) = value.trim().parse::<f64>().ok().filter(|v| v.is_finite()) else {
                continue;
            };

            match unit.trim() {
                "T" => vtg.course_over_ground_true = Some(value),
                "M" => vtg.course_over_ground_magnetic = Some(value),
                "N" => vtg.speed_over_ground_knots = Some(value),
                "K" => vtg.speed_over_ground_kph = Some(value),
                _ => {}
            }
        }

        Ok((i, vtg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vtg_parsing() {
        let cases = [
            ",T,,M,,N,,K,N",
            "360.0,T,348.7,M,000.0,N,000.0,K,N",
            "360.0,T,348.7,M,100.0,N,,,N",
            "360.0,T,348.7,M,,,100.0,K,N",
            "360.0,T,348.7,M,,,,,N",
            "",
        ];

        for &input in &cases {
            let result = VTG::parser(input);
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_vtg_speed_units() {
        let (i, vtg) = VTG::parser("229.86,T,,M,0.00,N,0.0046,K").unwrap();
        assert_eq!(i, "");
        assert_eq!(vtg.course_over_ground_true, Some(229.86));
        assert_eq!(vtg.course_over_ground_magnetic, None);
        assert_eq!(vtg.speed_over_ground_knots, Some(0.0));
        assert_relative_eq!(vtg.speed_over_ground().unwrap(), 0.0024838, epsilon = 1e-7);

        let (_, vtg) = VTG::parser("054.7,T,034.4,M,005.5,N,,K,A").unwrap();
        assert_eq!(vtg.speed_over_ground(), Some(5.5));

        let (_, vtg) = VTG::parser("360.0,T,348.7,M,,,100.0,K,N").unwrap();
        assert_relative_eq!(vtg.speed_over_ground().unwrap(), 53.995680, epsilon = 1e-6);

        let (_, vtg) = VTG::parser(",T,,M,,N,,K").unwrap();
        assert_eq!(vtg, VTG::default());
        assert_eq!(vtg.speed_over_ground(), None);
    }
}
