//! Base64 decoding (RFC 4648 standard alphabet)
//!
//! Decoding runs back to front: the partial group at the end is resolved
//! first, then full 4-character groups fill the output from its tail.
//!
//! Characters outside the alphabet are not rejected. They decode to
//! arithmetic garbage, deterministically and without panicking.

use crate::array::BinaryArray;
use crate::error::BinaryError;

/// `=`
const CHAR_PAD: u8 = 61;

/// Consume base64 text from `array` and decode it
///
/// Reads `byte_length` characters, or everything unread when `None`. Up to
/// two trailing `=` are accepted. A zero length returns an empty vector and
/// leaves the array untouched.
pub fn read_base64(
    array: &mut BinaryArray,
    byte_length: Option<usize>,
) -> Result<Vec<u8>, BinaryError> {
    let length = byte_length.unwrap_or_else(|| array.byte_length());
    if length == 0 {
        return Ok(Vec::new());
    }

    let encoded = array.read_bytes(length)?;
    Ok(decode_base64(encoded))
}

/// Decode base64 text held in memory
pub fn decode_base64(encoded: &[u8]) -> Vec<u8> {
    let mut length = encoded.len();
    let mut overhang = length & 3;

    // aligned input may end in padding
    if overhang == 0 && length > 0 && encoded[length - 1] == CHAR_PAD {
        length -= if encoded[length - 2] == CHAR_PAD { 2 } else { 1 };
        overhang = length & 3;
    }

    // a lone trailing character carries fewer than 8 bits, drop it
    if overhang == 1 {
        length -= 1;
        overhang = 0;
    }

    let mut j = (length - overhang) / 4 * 3 + overhang.saturating_sub(1);
    let mut output = vec![0u8; j];
    let mut i = length;

    if overhang == 3 {
        let a = decode_char(encoded[i - 3]);
        let b = decode_char(encoded[i - 2]);
        let c = decode_char(encoded[i - 1]);
        i -= 3;

        // a   b   c
        // |  /|  /|
        // 6+2 4+4 -
        output[j - 1] = ((b & 0x0f) << 4) | (c >> 2);
        output[j - 2] = (a << 2) | (b >> 4);
        j -= 2;
    } else if overhang == 2 {
        let a = decode_char(encoded[i - 2]);
        let b = decode_char(encoded[i - 1]);
        i -= 2;

        // a   b
        // |  /|
        // 6+2 -
        output[j - 1] = (a << 2) | (b >> 4);
        j -= 1;
    }

    while i > 0 {
        let a = decode_char(encoded[i - 4]);
        let b = decode_char(encoded[i - 3]);
        let c = decode_char(encoded[i - 2]);
        let d = decode_char(encoded[i - 1]);
        i -= 4;

        // a   b   c   d
        // |  /|  /|   |
        // 6+2 4+4 2+6 -
        output[j - 1] = ((c & 0x03) << 6) | d;
        output[j - 2] = ((b & 0x0f) << 4) | (c >> 2);
        output[j - 3] = (a << 2) | (b >> 4);
        j -= 3;
    }

    output
}

/// Decode base64 text from a string
pub fn parse_base64(text: &str) -> Vec<u8> {
    let mut binary = BinaryArray::little_endian();
    binary.append_ascii(text);
    decode_base64(binary.as_bytes())
}

/// Map one alphabet character to its 6-bit value by ASCII offset
#[inline]
fn decode_char(byte: u8) -> u8 {
    match byte {
        b'+' => 62,
        b'/' => 63,
        // '0'..='9' -> 52..=61
        ..=b'9' => byte.wrapping_add(4),
        // 'A'..='Z' -> 0..=25
        ..=b'Z' => byte.wrapping_sub(b'A'),
        // 'a'..='z' -> 26..=51
        _ => byte.wrapping_sub(71),
    }
}
