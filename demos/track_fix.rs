//! Reads NMEA 0183 sentences from stdin and prints the fix after each one.
//!
//! ```text
//! cargo run --example track_fix < track.nmea
//! ```

use std::io::{self, BufRead};

use nmea0183_fix::{ChecksumMode, CoordinateFormat, GeoPoint, Nmea0183Record, RecordOptions};

fn main() -> io::Result<()> {
    let ignore_checksum = std::env::args().any(|arg| arg == "--ignore-checksum");

    let mut options = RecordOptions::builder();
    if ignore_checksum {
        options = options.checksum_mode(ChecksumMode::Ignore);
    }
    let mut record = Nmea0183Record::with_options(options.build());

    let mut previous: Option<GeoPoint> = None;
    let mut travelled = 0.0;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match record.parse(&line) {
            Ok(kind) => println!("{kind}: {}", record.fix()),
            Err(e) => {
                eprintln!("skipped {line:?}: {e}");
                continue;
            }
        }

        if let Some(point) = record.fix().geo_point() {
            if let Some(last) = previous {
                travelled += last.distance_to(&point);
            }
            previous = Some(point);
        }
    }

    if let Some(point) = previous {
        println!(
            "last position {} {}, {:.1} m travelled",
            point.format_latitude(CoordinateFormat::DegreesMinutesSeconds, 1),
            point.format_longitude(CoordinateFormat::DegreesMinutesSeconds, 1),
            travelled
        );
    }

    Ok(())
}
