//! # Accumulated Fix State
//!
//! A complete GPS fix is usually spread over several sentences: RMC reports
//! the date, GGA the altitude and satellite count, VTG the ground speed. A
//! [`Fix`] is the union of everything read so far. It is an immutable value,
//! each accepted sentence produces a new one with the sentence merged in.
//!
//! ```rust
//! use nmea0183_fix::{Fix, RecordOptions, SentenceType};
//!
//! let options = RecordOptions::default();
//! let now = time::OffsetDateTime::now_utc();
//!
//! let (fix, result) = Fix::parse(
//!     "$GPGGA,125653.00,3845.165,N,14228.961,W,1,05,,102.1331,M,,M,,*75",
//!     &Fix::default(),
//!     &options,
//!     now,
//! );
//! assert_eq!(result, Ok(SentenceType::GGA));
//!
//! let (fix, result) = Fix::parse("$GPVTG,229.86,T,,M,0.00,N,0.0046,K*55", &fix, &options, now);
//! assert_eq!(result, Ok(SentenceType::VTG));
//! assert_eq!(fix.heading(), Some(229.86));
//! assert_eq!(fix.satellites(), Some(5));
//! ```

mod fixtime;

pub use fixtime::{DateSource, Fixtime, epoch_day};

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    GeoPoint, NmeaError, RecordOptions,
    error::flatten,
    frame,
    nmea_content::{
        FixType, GGA, KILOMETERS_PER_KNOT, NmeaSentence, Parsable, RMC, SentenceType, VTG, ZDA,
    },
};

/// Miles per hour in one knot.
pub const MPH_PER_KNOT: f64 = 1.150_779_448;

/// A set of [`SentenceType`]s.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentenceSet(u8);

impl SentenceSet {
    pub const fn new() -> Self {
        SentenceSet(0)
    }

    pub fn insert(&mut self, kind: SentenceType) {
        self.0 |= kind.bit();
    }

    pub fn contains(&self, kind: SentenceType) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// The contained sentence types, in the order of [`SentenceType::ALL`].
    pub fn iter(&self) -> impl Iterator<Item = SentenceType> + '_ {
        SentenceType::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<SentenceType> for SentenceSet {
    fn from_iter<T: IntoIterator<Item = SentenceType>>(iter: T) -> Self {
        let mut set = SentenceSet::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Display for SentenceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, kind) in self.iter().enumerate() {
            if n > 0 {
                f.write_str("+")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// The fix assembled from every sentence accepted so far.
///
/// Each field is [`None`] until a sentence supplies it. A field missing from a
/// sentence keeps its previous value, except that an invalid RMC/GGA fix
/// clears the position (and for RMC the speed and heading as well).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fix {
    parsed_sentences: SentenceSet,
    last_sentence: Option<SentenceType>,
    date: Option<time::Date>,
    time: Option<time::Time>,
    /// Wall clock (epoch seconds) when `time` was last set
    received_at: Option<i64>,
    valid_gps: bool,
    latitude: Option<f64>,
    longitude: Option<f64>,
    speed_knots: Option<f64>,
    heading: Option<f64>,
    magnetic_variation: Option<f64>,
    hdop: Option<f64>,
    satellites: Option<u8>,
    altitude_meters: Option<f64>,
    geoid_separation_meters: Option<f64>,
    fix_type: Option<FixType>,
    extra_data: Option<String>,
    checksum_verified: bool,
}

impl Fix {
    /// Parses one raw sentence and merges it into `previous`.
    ///
    /// Always returns a state: the merged fix on success, an unchanged copy of
    /// `previous` on failure. `now` is the wall clock used as the reference
    /// for day inference.
    pub fn parse<'a>(
        sentence: &'a str,
        previous: &Fix,
        options: &RecordOptions,
        now: time::OffsetDateTime,
    ) -> (Fix, Result<SentenceType, NmeaError<'a>>) {
        match previous.apply(sentence, options, now) {
            Ok((fix, kind)) => (fix, Ok(kind)),
            Err(e) => (previous.clone(), Err(e)),
        }
    }

    /// Frames, validates and parses `sentence`, then merges it into a copy of `self`.
    pub(crate) fn apply<'a>(
        &self,
        sentence: &'a str,
        options: &RecordOptions,
        now: time::OffsetDateTime,
    ) -> Result<(Fix, SentenceType), NmeaError<'a>> {
        let mut framing =
            frame::<nom::error::Error<&'a str>>(options.checksum_mode(), options.line_ending_mode());

        let (_, framed) = framing(sentence).map_err(flatten)?;
        let (_, nmea) = NmeaSentence::parser(framed.content).map_err(flatten)?;

        let mut fix = self.merge(&nmea, now);
        fix.extra_data = Some(framed.extra_data)
            .filter(|extra| !extra.is_empty())
            .map(str::to_string);
        fix.checksum_verified = framed.has_valid_checksum();

        Ok((fix, nmea.sentence_type()))
    }

    /// Merges an already parsed sentence into a copy of `self`.
    pub fn merge(&self, sentence: &NmeaSentence, now: time::OffsetDateTime) -> Fix {
        let mut fix = self.clone();
        let kind = sentence.sentence_type();

        fix.parsed_sentences.insert(kind);
        fix.last_sentence = Some(kind);

        match sentence {
            NmeaSentence::RMC(rmc) => fix.merge_rmc(rmc, now),
            NmeaSentence::GGA(gga) => fix.merge_gga(gga, now),
            NmeaSentence::VTG(vtg) => fix.merge_vtg(vtg),
            NmeaSentence::ZDA(zda) => fix.merge_zda(zda, now),
        }

        log::trace!("merged {kind}: {fix}");
        fix
    }

    fn merge_rmc(&mut self, rmc: &RMC, now: time::OffsetDateTime) {
        self.set_time(rmc.fix_time, now);
        update(&mut self.date, rmc.fix_date);

        if !rmc.is_valid() {
            self.invalidate();
            self.speed_knots = None;
            self.heading = None;
            return;
        }

        self.valid_gps = true;
        self.latitude = rmc.latitude;
        self.longitude = rmc.longitude;
        update(&mut self.speed_knots, rmc.speed_over_ground);
        update(&mut self.heading, rmc.course_over_ground);
        update(&mut self.magnetic_variation, rmc.magnetic_variation);

        self.check_position();
    }

    fn merge_gga(&mut self, gga: &GGA, now: time::OffsetDateTime) {
        self.set_time(gga.fix_time, now);
        update(&mut self.fix_type, gga.fix_quality);

        if !gga.is_valid() {
            self.invalidate();
            return;
        }

        self.valid_gps = true;
        self.latitude = gga.latitude;
        self.longitude = gga.longitude;
        update(&mut self.satellites, gga.satellite_count);
        update(&mut self.hdop, gga.hdop);
        update(&mut self.altitude_meters, gga.altitude);
        update(&mut self.geoid_separation_meters, gga.geoidal_separation);

        self.check_position();
    }

    fn merge_vtg(&mut self, vtg: &VTG) {
        update(&mut self.heading, vtg.course_over_ground_true);
        update(&mut self.speed_knots, vtg.speed_over_ground());
    }

    fn merge_zda(&mut self, zda: &ZDA, now: time::OffsetDateTime) {
        self.set_time(zda.time, now);
        update(&mut self.date, zda.date);
    }

    fn set_time(&mut self, time: Option<time::Time>, now: time::OffsetDateTime) {
        if time.is_some() {
            self.time = time;
            self.received_at = Some(now.unix_timestamp());
        }
    }

    fn invalidate(&mut self) {
        self.valid_gps = false;
        self.latitude = None;
        self.longitude = None;
    }

    /// Downgrades a fix whose position is missing or out of range.
    fn check_position(&mut self) {
        let in_range = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => lat.abs() < 90.0 && lon.abs() < 180.0,
            _ => false,
        };

        if !in_range {
            log::debug!(
                "position {:?},{:?} out of range, fix downgraded to invalid",
                self.latitude,
                self.longitude
            );
            self.invalidate();
        }
    }

    /// Latitude in degrees, positive north.
    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    /// Longitude in degrees, positive east.
    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// The position, if the fix is valid and not on the origin.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        if !self.valid_gps {
            return None;
        }

        let point = GeoPoint::new(self.latitude?, self.longitude?);
        point.is_valid().then_some(point)
    }

    pub fn speed_knots(&self) -> Option<f64> {
        self.speed_knots
    }

    pub fn speed_kph(&self) -> Option<f64> {
        self.speed_knots.map(|knots| knots * KILOMETERS_PER_KNOT)
    }

    pub fn speed_mph(&self) -> Option<f64> {
        self.speed_knots.map(|knots| knots * MPH_PER_KNOT)
    }

    /// Course over ground in degrees true.
    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    /// Magnetic variation in degrees, westerly variation is negative.
    pub fn magnetic_variation(&self) -> Option<f64> {
        self.magnetic_variation
    }

    pub fn hdop(&self) -> Option<f64> {
        self.hdop
    }

    pub fn satellites(&self) -> Option<u8> {
        self.satellites
    }

    /// Altitude above mean sea level in meters.
    pub fn altitude_meters(&self) -> Option<f64> {
        self.altitude_meters
    }

    pub fn geoid_separation_meters(&self) -> Option<f64> {
        self.geoid_separation_meters
    }

    pub fn fix_type(&self) -> Option<FixType> {
        self.fix_type
    }

    pub fn date(&self) -> Option<time::Date> {
        self.date
    }

    pub fn time(&self) -> Option<time::Time> {
        self.time
    }

    /// The date as the `DDMMYY` number found in RMC sentences.
    pub fn ddmmyy(&self) -> Option<u32> {
        self.date.map(|date| {
            date.day() as u32 * 10_000
                + date.month() as u32 * 100
                + date.year().rem_euclid(100) as u32
        })
    }

    /// The time of day as an `HHMMSS` number, sub-second digits dropped.
    pub fn hhmmss(&self) -> Option<u32> {
        self.time.map(|time| {
            time.hour() as u32 * 10_000 + time.minute() as u32 * 100 + time.second() as u32
        })
    }

    /// The UTC fix time.
    ///
    /// Uses the reported date when one was received; otherwise the date is
    /// inferred from the wall clock at the time the time of day was received
    /// (see [`Fixtime::infer`]).
    ///
    /// [`None`] until a time of day has been received, even if a date is
    /// already known. Midnight is not assumed.
    pub fn fixtime(&self) -> Option<Fixtime> {
        let time = self.time?;

        match self.date {
            Some(date) => Some(Fixtime::from_date_time(date, time)),
            None => Some(Fixtime::infer(time, self.received_at?)),
        }
    }

    pub fn has_sentence(&self, kind: SentenceType) -> bool {
        self.parsed_sentences.contains(kind)
    }

    pub fn parsed_sentences(&self) -> SentenceSet {
        self.parsed_sentences
    }

    pub fn last_sentence(&self) -> Option<SentenceType> {
        self.last_sentence
    }

    /// Text that followed the checksum of the last sentence.
    pub fn extra_data(&self) -> Option<&str> {
        self.extra_data.as_deref()
    }

    pub fn is_valid_gps(&self) -> bool {
        self.valid_gps
    }

    /// Whether the last sentence carried a checksum matching its content.
    pub fn checksum_verified(&self) -> bool {
        self.checksum_verified
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.parsed_sentences)?;

        match (self.valid_gps, self.latitude, self.longitude) {
            (true, Some(lat), Some(lon)) => write!(f, " {}", GeoPoint::new(lat, lon))?,
            _ => write!(f, " no fix")?,
        }

        if let Some(altitude) = self.altitude_meters {
            write!(f, " alt={altitude:.1}m")?;
        }
        if let Some(speed) = self.speed_knots {
            write!(f, " speed={speed:.2}kn")?;
        }
        if let Some(heading) = self.heading {
            write!(f, " heading={heading:.1}")?;
        }
        if let Some(satellites) = self.satellites {
            write!(f, " sats={satellites}")?;
        }
        if let Some(fixtime) = self.fixtime() {
            write!(f, " {fixtime}")?;
        }

        Ok(())
    }
}

fn update<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
