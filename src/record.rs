//! # NMEA 0183 Record
//!
//! [`Nmea0183Record`] owns a [`Fix`] and feeds it one sentence at a time.
//!
//! ```rust
//! use nmea0183_fix::{Nmea0183Record, SentenceType};
//!
//! let mut record = Nmea0183Record::new();
//!
//! let sentences = [
//!     "$GPGGA,125653.00,3845.165,N,14228.961,W,1,05,,102.1331,M,,M,,*75",
//!     "$GPVTG,229.86,T,,M,0.00,N,0.0046,K*55",
//!     "$GPZDA,125653.00,13,09,2007,00,00*6E",
//! ];
//!
//! for sentence in sentences {
//!     record.parse(sentence).unwrap();
//! }
//!
//! let fix = record.fix();
//! assert!(fix.has_sentence(SentenceType::GGA));
//! assert_eq!(fix.heading(), Some(229.86));
//! assert_eq!(fix.fixtime().unwrap().epoch_seconds, 1_189_688_213);
//!
//! // A corrupted sentence is rejected and the fix is left as it was
//! assert!(record.parse("$GPVTG,100.00,T,,M,0.00,N,0.0046,K*56").is_err());
//! assert_eq!(record.fix().heading(), Some(229.86));
//! ```

use crate::{ChecksumMode, Fix, LineEndingMode, NmeaError, SentenceType};

/// Wall clock source used as the reference for day inference.
pub type Clock = fn() -> time::OffsetDateTime;

/// Settings of an [`Nmea0183Record`].
#[derive(Debug, Clone, Copy)]
pub struct RecordOptions {
    checksum_mode: ChecksumMode,
    line_ending_mode: LineEndingMode,
    clock: Clock,
}

impl RecordOptions {
    /// Creates a builder starting from the default options.
    pub fn builder() -> RecordOptionsBuilder {
        RecordOptionsBuilder::new()
    }

    pub fn checksum_mode(&self) -> ChecksumMode {
        self.checksum_mode
    }

    pub fn line_ending_mode(&self) -> LineEndingMode {
        self.line_ending_mode
    }

    /// Reads the configured clock.
    pub fn now(&self) -> time::OffsetDateTime {
        (self.clock)()
    }
}

impl Default for RecordOptions {
    fn default() -> Self {
        RecordOptionsBuilder::new().build()
    }
}

/// Builder for [`RecordOptions`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{ChecksumMode, LineEndingMode, Nmea0183Record, RecordOptions};
///
/// fn fixed_clock() -> time::OffsetDateTime {
///     time::OffsetDateTime::from_unix_timestamp(1_189_688_400).unwrap()
/// }
///
/// let options = RecordOptions::builder()
///     .checksum_mode(ChecksumMode::Optional)
///     .line_ending_mode(LineEndingMode::Required)
///     .clock(fixed_clock)
///     .build();
///
/// let mut record = Nmea0183Record::with_options(options);
/// assert!(record.parse("$GPGGA,125653.00,3845.165,N,14228.961,W,1,05,,102.1331,M,,M,,\r\n").is_ok());
/// assert!(!record.fix().checksum_verified());
/// assert!(record.fix().fixtime().unwrap().is_inferred());
/// ```
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct RecordOptionsBuilder {
    checksum_mode: ChecksumMode,
    line_ending_mode: LineEndingMode,
    clock: Clock,
}

impl RecordOptionsBuilder {
    /// Creates a builder with the default settings:
    /// - Checksum mode: [`ChecksumMode::Required`]
    /// - Line ending mode: [`LineEndingMode::Optional`]
    /// - Clock: [`time::OffsetDateTime::now_utc`]
    pub fn new() -> Self {
        RecordOptionsBuilder {
            checksum_mode: ChecksumMode::Required,
            line_ending_mode: LineEndingMode::Optional,
            clock: time::OffsetDateTime::now_utc,
        }
    }

    /// Sets the checksum mode, [`ChecksumMode::Ignore`] bypasses validation.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Replaces the wall clock, mostly useful for replaying recorded data.
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> RecordOptions {
        RecordOptions {
            checksum_mode: self.checksum_mode,
            line_ending_mode: self.line_ending_mode,
            clock: self.clock,
        }
    }
}

impl Default for RecordOptionsBuilder {
    fn default() -> Self {
        RecordOptionsBuilder::new()
    }
}

/// A fix accumulated over a stream of sentences.
///
/// Not synchronized, wrap it in a mutex to share it, or pass [`Fix`]
/// snapshots between threads instead.
#[derive(Debug, Clone, Default)]
pub struct Nmea0183Record {
    fix: Fix,
    options: RecordOptions,
}

impl Nmea0183Record {
    pub fn new() -> Self {
        Nmea0183Record::default()
    }

    pub fn with_options(options: RecordOptions) -> Self {
        Nmea0183Record {
            fix: Fix::default(),
            options,
        }
    }

    /// Parses one sentence and merges it into the fix.
    ///
    /// On error the fix is left untouched and the rejected sentence is logged
    /// at debug level.
    pub fn parse<'a>(&mut self, sentence: &'a str) -> Result<SentenceType, NmeaError<'a>> {
        match self.fix.apply(sentence, &self.options, self.options.now()) {
            Ok((fix, kind)) => {
                self.fix = fix;
                Ok(kind)
            }
            Err(e) => {
                log::debug!("rejected sentence {:?}: {e}", sentence.trim_end());
                Err(e)
            }
        }
    }

    pub fn fix(&self) -> &Fix {
        &self.fix
    }

    pub fn into_fix(self) -> Fix {
        self.fix
    }

    pub fn options(&self) -> &RecordOptions {
        &self.options
    }

    /// Forgets everything read so far.
    pub fn reset(&mut self) {
        self.fix = Fix::default();
    }
}
