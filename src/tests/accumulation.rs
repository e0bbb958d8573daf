use approx::assert_relative_eq;

use crate::{ChecksumMode, DateSource, FixType, Nmea0183Record, RecordOptions, SentenceType};

fn clock() -> time::OffsetDateTime {
    // 2007-09-13 13:00:00 UTC
    time::OffsetDateTime::from_unix_timestamp(1_189_688_400).unwrap()
}

fn record() -> Nmea0183Record {
    Nmea0183Record::with_options(RecordOptions::builder().clock(clock).build())
}

#[test]
fn test_rmc_valid_fix() {
    let mut record = record();

    let result = record
        .parse("$GPRMC,080701.00,A,3128.7540,N,14257.6714,W,000.0,000.0,180707,13.1,E,A*1C");
    assert_eq!(result, Ok(SentenceType::RMC));

    let fix = record.fix();
    assert!(fix.is_valid_gps());
    assert!(fix.checksum_verified());
    assert_relative_eq!(fix.latitude().unwrap(), 31.47923, epsilon = 1e-5);
    assert_relative_eq!(fix.longitude().unwrap(), -142.96119, epsilon = 1e-5);
    assert_eq!(fix.speed_knots(), Some(0.0));
    assert_eq!(fix.heading(), Some(0.0));
    assert_eq!(fix.magnetic_variation(), Some(13.1));
    assert_eq!(fix.ddmmyy(), Some(180707));
    assert_eq!(fix.hhmmss(), Some(80701));
    assert_eq!(
        fix.date(),
        Some(time::Date::from_calendar_date(2007, time::Month::July, 18).unwrap())
    );

    let fixtime = fix.fixtime().unwrap();
    assert_eq!(fixtime.epoch_seconds, 1_184_746_021);
    assert_eq!(fixtime.date_source, DateSource::Reported);
}

#[test]
fn test_gga_vtg_zda_accumulation() {
    let mut record = record();

    assert_eq!(
        record.parse("$GPGGA,125653.00,3845.165,N,14228.961,W,1,05,,102.1331,M,,M,,*75"),
        Ok(SentenceType::GGA)
    );
    assert_eq!(
        record.parse("$GPVTG,229.86,T,,M,0.00,N,0.0046,K*55"),
        Ok(SentenceType::VTG)
    );
    assert_eq!(
        record.parse("$GPZDA,125653.00,13,09,2007,00,00*6E"),
        Ok(SentenceType::ZDA)
    );

    let fix = record.fix();
    assert!(fix.is_valid_gps());
    assert_eq!(fix.last_sentence(), Some(SentenceType::ZDA));
    assert_eq!(fix.parsed_sentences().to_string(), "GGA+VTG+ZDA");
    assert!(!fix.has_sentence(SentenceType::RMC));

    assert_relative_eq!(fix.latitude().unwrap(), 38.75275, epsilon = 1e-6);
    assert_relative_eq!(fix.longitude().unwrap(), -142.48268, epsilon = 1e-5);
    assert_eq!(fix.satellites(), Some(5));
    assert_eq!(fix.hdop(), None);
    assert_eq!(fix.altitude_meters(), Some(102.1331));
    assert_eq!(fix.fix_type(), Some(FixType::Gps));

    assert_relative_eq!(fix.heading().unwrap(), 229.86);
    assert_relative_eq!(fix.speed_knots().unwrap(), 0.00248, epsilon = 1e-5);

    assert_eq!(
        fix.date(),
        Some(time::Date::from_calendar_date(2007, time::Month::September, 13).unwrap())
    );
    assert_eq!(fix.hhmmss(), Some(125653));
    assert_eq!(
        fix.fixtime().map(|t| (t.epoch_seconds, t.date_source)),
        Some((1_189_688_213, DateSource::Reported))
    );

    let point = fix.geo_point().unwrap();
    assert_eq!(point.to_string(), "38.75275,-142.48268");
}

#[test]
fn test_invalid_fix_clears_motion() {
    let mut record = record();

    record
        .parse("$GPRMC,025423.494,A,3709.0642,N,11907.8315,W,7.094,108.52,200505,,*20")
        .unwrap();
    assert!(record.fix().is_valid_gps());
    assert_eq!(record.fix().speed_knots(), Some(7.094));

    let content = "GPRMC,025424.494,V,3709.0642,N,11907.8315,W,7.094,108.52,200505,,";
    let sentence = format!("${content}*{}", crate::format_checksum(crate::checksum(content).1));
    assert_eq!(record.parse(&sentence), Ok(SentenceType::RMC));

    let fix = record.fix();
    assert!(!fix.is_valid_gps());
    assert_eq!(fix.latitude(), None);
    assert_eq!(fix.longitude(), None);
    assert_eq!(fix.speed_knots(), None);
    assert_eq!(fix.heading(), None);
    assert_eq!(fix.latitude().unwrap_or_default(), 0.0);
    assert_eq!(fix.geo_point(), None);

    assert_eq!(fix.hhmmss(), Some(25424));
    assert_eq!(fix.ddmmyy(), Some(200505));
    assert!(fix.fixtime().is_some());
}

#[test]
fn test_bad_checksum_preserves_state() {
    let mut record = record();

    record
        .parse("$GPRMC,080701.00,A,3128.7540,N,14257.6714,W,000.0,000.0,180707,13.1,E,A*1C")
        .unwrap();
    record
        .parse("$GPGGA,125653.00,3845.165,N,14228.961,W,1,05,,102.1331,M,,M,,*75")
        .unwrap();
    let before = record.fix().clone();

    let result =
        record.parse("$GPRMC,080702.00,A,3128.7540,N,14257.6714,W,010.0,090.0,180707,13.1,E,A*1D");
    assert!(result.is_err());
    assert_eq!(record.fix(), &before);

    assert!(record.parse("$GPGGA,125654.00,3845.165,N*75").is_err());
    assert!(record.parse("not a sentence").is_err());
    assert_eq!(record.fix(), &before);
}

#[test]
fn test_extra_data() {
    let mut record = Nmea0183Record::with_options(
        RecordOptions::builder()
            .checksum_mode(ChecksumMode::Optional)
            .clock(clock)
            .build(),
    );

    record
        .parse("$GPZDA,125653.00,13,09,2007,00,00*6E,vendor-tail\r\n")
        .unwrap();
    assert_eq!(record.fix().extra_data(), Some(",vendor-tail"));

    record.parse("$GNZDA,125654.00,13,09,2007,00,00").unwrap();
    assert_eq!(record.fix().extra_data(), None);
    assert!(!record.fix().checksum_verified());

    record
        .parse("$GPZDA,125653.00,13,09,2007,00,00*6E,vendor-tail\r\n")
        .unwrap();
    record.parse("$GPZDA,125653.00,13,09,2007,00,00*6E\n").unwrap();
    assert_eq!(record.fix().extra_data(), None);
    assert!(record.fix().checksum_verified());
}

#[test]
fn test_gga_only_infers_date() {
    let mut record = record();

    record
        .parse("$GPGGA,025425.494,3509.0743,N,14207.6314,W,1,04,2.3,530.3,M,-21.9,M,0.0,0000*45")
        .unwrap();

    let fix = record.fix();
    assert_eq!(fix.date(), None);
    assert_eq!(fix.altitude_meters(), Some(530.3));
    assert_eq!(fix.geoid_separation_meters(), Some(-21.9));

    // 02:54:25 is within 12 hours of the 13:00 clock, so it's the same day
    let fixtime = fix.fixtime().unwrap();
    assert!(fixtime.is_inferred());
    assert_eq!(fixtime.epoch_seconds, 1_189_652_065);
}
