//! Runtime-selectable byte order
//!
//! `byteorder` picks the order at compile time through a type parameter. A
//! [`BinaryArray`](crate::BinaryArray) carries its order as data and lets each
//! call override it, so this enum dispatches to the matching `ByteOrder` impl.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order used for multi-byte numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Least significant byte first (glTF, GLB, x86)
    Little,
    /// Most significant byte first (network order)
    #[default]
    Big,
}

macro_rules! dispatch {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            Endian::Little => LittleEndian::$method($($arg),*),
            Endian::Big => BigEndian::$method($($arg),*),
        }
    };
}

impl Endian {
    /// Byte order of the compiling target
    pub const NATIVE: Endian = if cfg!(target_endian = "little") {
        Endian::Little
    } else {
        Endian::Big
    };

    pub fn is_little(self) -> bool {
        self == Endian::Little
    }

    #[inline]
    pub(crate) fn write_u16(self, buf: &mut [u8], value: u16) {
        dispatch!(self, write_u16(buf, value))
    }

    #[inline]
    pub(crate) fn write_u32(self, buf: &mut [u8], value: u32) {
        dispatch!(self, write_u32(buf, value))
    }

    #[inline]
    pub(crate) fn write_i32(self, buf: &mut [u8], value: i32) {
        dispatch!(self, write_i32(buf, value))
    }

    #[inline]
    pub(crate) fn write_f32(self, buf: &mut [u8], value: f32) {
        dispatch!(self, write_f32(buf, value))
    }

    #[inline]
    pub(crate) fn read_u16(self, buf: &[u8]) -> u16 {
        dispatch!(self, read_u16(buf))
    }

    #[inline]
    pub(crate) fn read_u32(self, buf: &[u8]) -> u32 {
        dispatch!(self, read_u32(buf))
    }

    #[inline]
    pub(crate) fn read_i32(self, buf: &[u8]) -> i32 {
        dispatch!(self, read_i32(buf))
    }

    #[inline]
    pub(crate) fn read_f32(self, buf: &[u8]) -> f32 {
        dispatch!(self, read_f32(buf))
    }
}
