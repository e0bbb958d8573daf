use quickcheck::{TestResult, quickcheck};

use crate::{
    ChecksumMode, IResult, LineEndingMode, Nmea0183Record, RecordOptions, checksum,
    format_checksum, frame,
};

fn clock() -> time::OffsetDateTime {
    time::OffsetDateTime::from_unix_timestamp(1_189_688_400).unwrap()
}

#[test]
fn test_known_checksums() {
    let cases = [
        ("GPRMC,080701.00,A,3128.7540,N,14257.6714,W,000.0,000.0,180707,13.1,E,A", 0x1C),
        ("GPGGA,125653.00,3845.165,N,14228.961,W,1,05,,102.1331,M,,M,,", 0x75),
        ("GPVTG,229.86,T,,M,0.00,N,0.0046,K", 0x55),
        ("GPZDA,125653.00,13,09,2007,00,00", 0x6E),
        ("GPGGA,025425.494,3509.0743,N,14207.6314,W,1,04,2.3,530.3,M,-21.9,M,0.0,0000", 0x45),
        ("", 0x00),
    ];

    for (content, expected) in cases {
        assert_eq!(checksum(content).1, expected, "{content}");
    }
}

#[test]
fn test_checksum_case_insensitive() {
    let mut record = Nmea0183Record::with_options(RecordOptions::builder().clock(clock).build());

    assert!(record.parse("$GPZDA,125653.00,13,09,2007,00,00*6e").is_ok());
    assert!(record.fix().checksum_verified());
    assert!(record.parse("$GPZDA,125653.00,13,09,2007,00,00*6E").is_ok());
    assert!(record.fix().checksum_verified());
}

quickcheck! {
    fn prop_checksum_round_trip(payload: String) -> TestResult {
        if !payload.is_ascii() || payload.contains(['$', '*', '\r', '\n']) {
            return TestResult::discard();
        }

        let sentence = format!("${payload}*{}", format_checksum(checksum(payload.as_str()).1));
        let res: IResult<_, _> =
            frame(ChecksumMode::Required, LineEndingMode::Forbidden)(sentence.as_str());

        match res {
            Ok((extra, framed)) => TestResult::from_bool(
                extra.is_empty() && framed.content == payload && framed.has_valid_checksum(),
            ),
            Err(_) => TestResult::failed(),
        }
    }

    fn prop_record_accepts_checksummed_zda(day: u8, hour: u8) -> bool {
        let content = format!("GPZDA,{:02}0000.00,{:02},01,2024,,", hour % 24, day % 28 + 1);
        let sentence = format!("${content}*{}", format_checksum(checksum(content.as_str()).1));

        let mut record = Nmea0183Record::with_options(RecordOptions::builder().clock(clock).build());
        record.parse(&sentence).is_ok() && record.fix().checksum_verified()
    }
}
