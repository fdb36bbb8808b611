//! Ambush-Binary: growable byte array and base64 decoding
//!
//! [`BinaryArray`] is a byte buffer with independent read and write cursors.
//! Values are appended at the write cursor and consumed from the read cursor,
//! so the same array serves as an encoder and a decoder. Multi-byte numbers
//! use a per-array default [`Endian`] that each call may override.
//!
//! # Usage
//!
//! ```
//! use ambush_binary::{BinaryArray, Endian};
//!
//! let mut binary = BinaryArray::little_endian();
//! binary.append_u32(0x46546C67);
//! binary.append_utf8("glTF", None);
//!
//! assert_eq!(binary.read_u32_with(Endian::Big).unwrap(), 0x676C5446);
//! assert_eq!(binary.read_utf8(4).unwrap(), "glTF");
//! assert!(binary.is_empty());
//! ```
//!
//! # Base64
//!
//! ```
//! use ambush_binary::parse_base64;
//!
//! assert_eq!(parse_base64("bGlnaHQgd29yay4="), b"light work.");
//! ```

mod array;
pub mod base64;
mod endian;
mod error;

pub use array::BinaryArray;
pub use self::base64::{decode_base64, parse_base64, read_base64};
pub use endian::Endian;
pub use error::BinaryError;

// =============================================================================
// Constants
// =============================================================================

/// Bytes reserved by a freshly created array, and the minimum reallocation size
pub const START_SIZE: usize = 32;

pub const NUM_BYTES_INT8: usize = 1;
pub const NUM_BYTES_INT16: usize = 2;
pub const NUM_BYTES_INT32: usize = 4;
pub const NUM_BYTES_FLOAT16: usize = 2;
pub const NUM_BYTES_FLOAT32: usize = 4;
pub const NUM_BYTES_FLOAT64: usize = 8;
