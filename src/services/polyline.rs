//! Google encoded polyline format (precision 1e5).
//!
//! Each coordinate delta is zig-zag encoded and emitted as 5-bit chunks
//! offset by 63, latitude before longitude.

use crate::models::Coordinates;

const PRECISION: f64 = 1e5;

/// Largest chunk shift a value may use. Real deltas fit in 32 bits, so
/// longer chunk runs are treated as malformed.
const MAX_SHIFT: u32 = 30;

/// Decode an encoded polyline. Malformed trailing input is dropped; points
/// decoded before the error are returned.
pub fn decode(encoded: &str) -> Vec<Coordinates> {
    let bytes = encoded.as_bytes();
    let mut path = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let Some((dlat, next)) = decode_value(bytes, index) else {
            break;
        };
        let Some((dlng, next)) = decode_value(bytes, next) else {
            break;
        };
        let (Some(next_lat), Some(next_lng)) = (lat.checked_add(dlat), lng.checked_add(dlng))
        else {
            break;
        };
        index = next;
        lat = next_lat;
        lng = next_lng;

        match Coordinates::new(lat as f64 / PRECISION, lng as f64 / PRECISION) {
            Ok(point) => path.push(point),
            Err(e) => {
                tracing::debug!("Skipping out-of-range polyline point: {}", e);
            }
        }
    }

    path
}

fn decode_value(bytes: &[u8], mut index: usize) -> Option<(i64, usize)> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(index)? as i64 - 63;
        if !(0..64).contains(&byte) || shift > MAX_SHIFT {
            return None;
        }
        index += 1;
        result |= (byte & 0x1f) << shift;
        shift += 5;
        if byte < 0x20 {
            break;
        }
    }

    let value = if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Some((value, index))
}

/// Encode a path as a polyline
pub fn encode(path: &[Coordinates]) -> String {
    let mut encoded = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in path {
        let lat = (point.lat * PRECISION).round() as i64;
        let lng = (point.lng * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut encoded);
        encode_value(lng - prev_lng, &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}
