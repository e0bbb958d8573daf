use nom::{Err, error::ErrorKind};

use crate::{ChecksumMode, Error, Frame, IResult, LineEndingMode, Nmea0183ParserBuilder, frame};

#[test]
fn test_frame_parts() {
    let mut parser = frame(ChecksumMode::Required, LineEndingMode::Required);

    let res: IResult<_, _> = parser("$GPVTG,229.86,T,,M,0.00,N,0.0046,K*55\r\n");
    assert_eq!(
        res,
        Ok((
            "",
            Frame {
                content: "GPVTG,229.86,T,,M,0.00,N,0.0046,K",
                checksum: Some(0x55),
                extra_data: "",
            }
        ))
    );

    let (_, framed) = res.unwrap();
    assert!(framed.has_valid_checksum());
    assert_eq!(framed.calculated_checksum(), 0x55);
}

#[test]
fn test_frame_missing_dollar() {
    let mut parser = frame(ChecksumMode::Required, LineEndingMode::Optional);

    let res: IResult<_, _> = parser("GPZDA,125653.00,13,09,2007,00,00*6E");
    match res {
        Err(Err::Error(Error::ParsingError(e))) => assert_eq!(e.code, ErrorKind::Char),
        other => panic!("Unexpected result {other:?}"),
    }
}

#[test]
fn test_frame_non_ascii() {
    let mut parser = frame(ChecksumMode::Ignore, LineEndingMode::Optional);

    let res: IResult<_, _> = parser("$GPZDA,125653.00,13,09,2007,00,00*6E°");
    assert_eq!(res, Err(Err::Error(Error::NonAscii)));
}

#[test]
fn test_frame_checksum_modes() {
    let sentence = "$GPZDA,125653.00,13,09,2007,00,00*6F";

    let res: IResult<_, _> = frame(ChecksumMode::Required, LineEndingMode::Optional)(sentence);
    assert_eq!(
        res,
        Err(Err::Error(Error::ChecksumMismatch {
            expected: 0x6E,
            found: 0x6F
        }))
    );

    let res: IResult<_, _> = frame(ChecksumMode::Optional, LineEndingMode::Optional)(sentence);
    assert!(res.is_err());

    let res: IResult<_, _> = frame(ChecksumMode::Ignore, LineEndingMode::Optional)(sentence);
    let (_, framed) = res.unwrap();
    assert_eq!(framed.checksum, Some(0x6F));
    assert!(!framed.has_valid_checksum());

    let res: IResult<_, _> = frame(ChecksumMode::Optional, LineEndingMode::Optional)(
        "$GPZDA,125653.00,13,09,2007,00,00",
    );
    let (_, framed) = res.unwrap();
    assert_eq!(framed.checksum, None);
    assert!(!framed.has_valid_checksum());
}

#[test]
fn test_frame_extra_data() {
    let mut parser = frame(ChecksumMode::Required, LineEndingMode::Optional);

    let res: IResult<_, _> = parser("$GPZDA,125653.00,13,09,2007,00,00*6E,PGRMZ,93,f,3\r\n");
    let (rest, framed) = res.unwrap();
    assert_eq!(rest, ",PGRMZ,93,f,3");
    assert_eq!(framed.extra_data, ",PGRMZ,93,f,3");
    assert_eq!(framed.content, "GPZDA,125653.00,13,09,2007,00,00");
}

#[test]
fn test_frame_bare_line_feed() {
    let mut parser = frame(ChecksumMode::Required, LineEndingMode::Optional);

    for sentence in [
        "$GPZDA,125653.00,13,09,2007,00,00*6E\n",
        "$GPZDA,125653.00,13,09,2007,00,00*6E\r",
    ] {
        let res: IResult<_, _> = parser(sentence);
        let (rest, framed) = res.unwrap();
        assert_eq!(rest, "");
        assert_eq!(framed.extra_data, "");
        assert_eq!(framed.checksum, Some(0x6E));
    }

    let mut parser = frame(ChecksumMode::Required, LineEndingMode::Required);
    let res: IResult<_, _> = parser("$GPZDA,125653.00,13,09,2007,00,00*6E\n");
    match res {
        Err(Err::Error(Error::ParsingError(e))) => assert_eq!(e.code, ErrorKind::CrLf),
        other => panic!("Unexpected result {other:?}"),
    }
}

#[test]
fn test_builder_content_parser() {
    fn field_count(i: &str) -> IResult<&str, usize> {
        Ok(("", i.split(',').count()))
    }

    let mut parser = Nmea0183ParserBuilder::default().build(field_count);
    assert_eq!(parser("$GPZDA,125653.00,13,09,2007,00,00*6E"), Ok(("", 7)));
    assert_eq!(parser("$GPZDA,125653.00,13,09,2007,00,00*6Exyz\r\n"), Ok(("xyz", 7)));
    assert!(parser("$GPZDA,125653.00,13,09,2007,00,00").is_err());
}
