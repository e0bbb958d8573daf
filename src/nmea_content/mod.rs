//! # NMEA Content Parsing
//!
//! Parsers for the content of the sentences that contribute to a fix: everything
//! between the leading `$` and the `*` checksum delimiter, talker id included.

pub mod parse;
mod sentences;

pub use sentences::*;
