//! Encoded-polyline codec
//!
//! Implements the Google polyline algorithm: each point is stored as two
//! zig-zag-encoded variable-length integers (delta latitude, delta
//! longitude) scaled by 1e5, split into 5-bit groups offset by +63 into
//! printable ASCII, with bit 0x20 marking continuation.
//!
//! Decoding is deliberately permissive. Map providers occasionally hand
//! back truncated or mangled strings, and a partial path drawn on the map
//! beats a hard failure, so [`decode`] never fails: it returns every fully
//! decodable leading point and silently drops the malformed tail.

use crate::value_objects::Coordinate;

/// Degrees are stored as integers scaled by this factor (1e-5 precision).
const PRECISION: f64 = 1e5;

/// Decode an encoded polyline into an ordered path of coordinates
///
/// Pure and idempotent. Empty input yields an empty path. A byte outside
/// the polyline alphabet, a truncated final integer, or a point outside
/// valid coordinate ranges ends the decode at the last complete point.
#[must_use]
pub fn decode(encoded: &str) -> Vec<Coordinate> {
    let bytes = encoded.as_bytes();
    let mut path = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        let Some((delta_lat, next)) = decode_value(bytes, index) else {
            break;
        };
        let Some((delta_lon, next)) = decode_value(bytes, next) else {
            break;
        };
        index = next;
        lat += delta_lat;
        lon += delta_lon;

        #[allow(clippy::cast_precision_loss)] // scaled degrees fit well within f64
        let Ok(point) = Coordinate::new(lat as f64 / PRECISION, lon as f64 / PRECISION) else {
            break;
        };
        path.push(point);
    }

    path
}

/// Encode a path of coordinates as a polyline string
///
/// Inverse of [`decode`] at 1e-5 degree precision: coordinates rounded to
/// five decimals survive an encode/decode round trip exactly.
#[must_use]
pub fn encode(path: &[Coordinate]) -> String {
    let mut out = String::with_capacity(path.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for point in path {
        #[allow(clippy::cast_possible_truncation)] // valid degrees scale to < 2^26
        let lat = (point.latitude() * PRECISION).round() as i64;
        #[allow(clippy::cast_possible_truncation)]
        let lon = (point.longitude() * PRECISION).round() as i64;

        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

/// Read one zig-zag varint starting at `index`
///
/// Returns the signed value and the index of the next unread byte, or
/// `None` when the stream is truncated or a byte falls outside the
/// printable polyline alphabet.
fn decode_value(bytes: &[u8], mut index: usize) -> Option<(i64, usize)> {
    let mut shift = 0u32;
    let mut accum: u64 = 0;

    loop {
        let byte = *bytes.get(index)?;
        if !(63..=127).contains(&byte) {
            return None;
        }
        index += 1;

        let group = u64::from(byte - 63);
        accum |= (group & 0x1f) << shift;
        shift += 5;

        if group < 0x20 {
            break;
        }
        // 12 groups would exceed any delta a real path can contain
        if shift > 60 {
            return None;
        }
    }

    #[allow(clippy::cast_possible_wrap)] // zig-zag halves the magnitude first
    let half = (accum >> 1) as i64;
    let value = if accum & 1 == 1 { !half } else { half };
    Some((value, index))
}

/// Append one value as a zig-zag varint
fn encode_value(value: i64, out: &mut String) {
    #[allow(clippy::cast_sign_loss)] // zig-zag folds the sign into bit 0
    let mut accum = ((value << 1) ^ (value >> 63)) as u64;

    loop {
        #[allow(clippy::cast_possible_truncation)]
        let mut group = (accum & 0x1f) as u8;
        accum >>= 5;
        if accum > 0 {
            group |= 0x20;
        }
        out.push(char::from(group + 63));
        if accum == 0 {
            break;
        }
    }
}
