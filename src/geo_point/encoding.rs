//! Fixed-point binary encoding of a [`GeoPoint`].
//!
//! ```text
//!  6 bytes:  | lat (24 bit BE) | lon (24 bit BE) |
//!  8 bytes:  | lat (32 bit BE) | lon (32 bit BE) |
//! ```
//!
//! Latitude `[-90, 90)` and longitude `[-180, 180)` are scaled onto the full
//! unsigned range of each field. An axis of exactly `0.0` is stored as raw `0`
//! and raw `0` decodes to exactly `0.0`, so equator and prime meridian
//! coordinates survive a round trip unchanged. The lowest quantum of each
//! range (`-90` latitude, `-180` longitude) shares that raw value and decodes
//! to `0.0` as well.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Width of an encoded [`GeoPoint`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EncodedLength {
    /// 6 bytes, about 0.00001 degree latitude resolution
    #[default]
    Standard,
    /// 8 bytes, about 0.00000004 degree latitude resolution
    HighResolution,
}

impl EncodedLength {
    /// Number of encoded bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Standard => 6,
            Self::HighResolution => 8,
        }
    }

    /// Encoding for a buffer of `len` bytes, if any.
    pub const fn from_bytes(len: usize) -> Option<Self> {
        match len {
            6 => Some(Self::Standard),
            8 => Some(Self::HighResolution),
            _ => None,
        }
    }

    const fn axis_bytes(self) -> usize {
        self.bytes() / 2
    }

    fn scale(self) -> f64 {
        (1u64 << (self.axis_bytes() * 8)) as f64
    }
}

impl GeoPoint {
    /// Encodes this point into `len.bytes()` bytes.
    ///
    /// ```rust
    /// use nmea0183_fix::{EncodedLength, GeoPoint};
    ///
    /// let point = GeoPoint::new(31.479233, -142.96119);
    /// let bytes = point.encode(EncodedLength::HighResolution);
    /// assert_eq!(bytes.len(), 8);
    ///
    /// let decoded = GeoPoint::decode(&bytes, 0, bytes.len()).unwrap();
    /// assert!((decoded.latitude - point.latitude).abs() < 1e-7);
    /// assert!((decoded.longitude - point.longitude).abs() < 1e-7);
    /// ```
    pub fn encode(&self, len: EncodedLength) -> heapless::Vec<u8, 8> {
        let mut buf = [0u8; 8];
        let n = self.encode_into(&mut buf, 0, len).unwrap_or_default();

        buf.into_iter().take(n).collect()
    }

    /// Writes the encoded point into `buf` starting at `offset`.
    ///
    /// Returns the number of bytes written, or [`None`] if `buf` is too short.
    pub fn encode_into(&self, buf: &mut [u8], offset: usize, len: EncodedLength) -> Option<usize> {
        let out = buf.get_mut(offset..offset.checked_add(len.bytes())?)?;

        let lat = to_fixed(self.latitude, 90.0, len);
        let lon = to_fixed(self.longitude, 180.0, len);

        let (lat_out, lon_out) = out.split_at_mut(len.axis_bytes());
        write_be(lat_out, lat);
        write_be(lon_out, lon);

        Some(len.bytes())
    }

    /// Decodes a point from `len` bytes of `bytes` starting at `offset`.
    ///
    /// `len` must be 6 or 8 and the slice must hold that many bytes past `offset`,
    /// otherwise [`None`] is returned.
    ///
    /// A raw axis of `0` decodes as exactly `0.0`, which shadows the lowest
    /// quantum of that axis (`-90` or `-180`).
    pub fn decode(bytes: &[u8], offset: usize, len: usize) -> Option<GeoPoint> {
        let encoding = EncodedLength::from_bytes(len)?;
        let data = bytes.get(offset..offset.checked_add(len)?)?;

        let (lat, lon) = data.split_at(encoding.axis_bytes());
        let (lat, lon) = (read_be(lat), read_be(lon));

        Some(GeoPoint::new(
            from_fixed(lat, 90.0, encoding),
            from_fixed(lon, 180.0, encoding),
        ))
    }
}

/// Maps `[-half_range, half_range)` onto `[0, 2^N)`, truncating towards the
/// lower edge of the quantum. Exact zero maps to `0`.
fn to_fixed(value: f64, half_range: f64, len: EncodedLength) -> u64 {
    if value == 0.0 {
        return 0;
    }

    let scale = len.scale();
    let raw = ((value + half_range) * scale / (2.0 * half_range)).floor();

    // NaN saturates to zero
    raw.clamp(0.0, scale - 1.0) as u64
}

/// Inverse of [`to_fixed`], returning the centre of the quantum.
fn from_fixed(raw: u64, half_range: f64, len: EncodedLength) -> f64 {
    if raw == 0 {
        return 0.0;
    }

    (raw as f64 + 0.5) * (2.0 * half_range) / len.scale() - half_range
}

fn write_be(out: &mut [u8], value: u64) {
    let bytes = value.to_be_bytes();
    out.copy_from_slice(&bytes[bytes.len() - out.len()..]);
}

fn read_be(data: &[u8]) -> u64 {
    data.iter().fold(0, |acc, &byte| (acc << 8) | byte as u64)
}
