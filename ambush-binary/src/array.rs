//! Growable byte array with independent read and write cursors
//!
//! # Layout
//!
//! ```text
//! 0           read_index        write_index          capacity
//! ├─ consumed ──┼──── content ──────┼──── reserved ────────┤
//! ```
//!
//! Reads advance `read_index`, appends advance `write_index`. When an append
//! does not fit, the array reallocates and drops the consumed prefix in the
//! same copy, so growth doubles as compaction.

use std::borrow::Cow;
use std::io;

use crate::endian::Endian;
use crate::error::BinaryError;
use crate::{NUM_BYTES_FLOAT32, NUM_BYTES_INT8, NUM_BYTES_INT16, NUM_BYTES_INT32, START_SIZE};

/// Cursor-based binary reader/writer
///
/// Reading an `u32` and then another `u32` is equivalent to interpreting the
/// front 8 bytes as two integers. Writing is done with appends; the backing
/// store is reallocated automatically when an append runs past it.
///
/// Views handed out by [`read_bytes`](Self::read_bytes),
/// [`as_bytes`](Self::as_bytes) and [`backing`](Self::backing) borrow the
/// array, so they cannot outlive the next mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryArray {
    bytes: Vec<u8>,
    read_index: usize,
    write_index: usize,
    endian: Endian,
}

impl Default for BinaryArray {
    fn default() -> Self {
        Self::new(Endian::default())
    }
}

impl BinaryArray {
    /// Create an empty array with [`START_SIZE`] bytes reserved
    pub fn new(endian: Endian) -> Self {
        Self {
            bytes: vec![0; START_SIZE],
            read_index: 0,
            write_index: 0,
            endian,
        }
    }

    /// Create an empty little-endian array
    pub fn little_endian() -> Self {
        Self::new(Endian::Little)
    }

    /// Create an empty big-endian array
    pub fn big_endian() -> Self {
        Self::new(Endian::Big)
    }

    /// Wrap existing bytes for reading
    ///
    /// The cursors span the whole input, so every byte is readable content.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, endian: Endian) -> Self {
        let bytes = bytes.into();
        let write_index = bytes.len();
        Self {
            bytes,
            read_index: 0,
            write_index,
            endian,
        }
    }

    /// Reuse existing bytes as pre-allocated space for writing
    ///
    /// The current content is ignored and the write cursor starts at 0.
    pub fn overwrite(bytes: impl Into<Vec<u8>>, endian: Endian) -> Self {
        Self {
            bytes: bytes.into(),
            read_index: 0,
            write_index: 0,
            endian,
        }
    }

    /// Create an array, fill it with `builder` and return it
    pub fn build<F>(endian: Endian, builder: F) -> Self
    where
        F: FnOnce(&mut BinaryArray),
    {
        let mut array = Self::new(endian);
        builder(&mut array);
        array
    }

    /// Default byte order for numeric operations
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Number of unread bytes (`write_index - read_index`)
    pub fn byte_length(&self) -> usize {
        self.write_index - self.read_index
    }

    pub fn is_empty(&self) -> bool {
        self.byte_length() == 0
    }

    /// Number of bytes written into the backing store (the write cursor)
    pub fn num_bytes(&self) -> usize {
        self.write_index
    }

    /// Size of the backing store
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Position of the read cursor within the backing store
    pub fn read_index(&self) -> usize {
        self.read_index
    }

    /// The unread content, `[read_index, write_index)`
    pub fn as_bytes(&self) -> &[u8] {
        if self.read_index < self.write_index {
            &self.bytes[self.read_index..self.write_index]
        } else {
            &[]
        }
    }

    /// The whole backing store, consumed and reserved bytes included
    ///
    /// Offsets returned by [`claim_bytes`](Self::claim_bytes) and
    /// [`shift_read_index`](Self::shift_read_index) index into this slice.
    pub fn backing(&self) -> &[u8] {
        &self.bytes
    }

    /// Copy the unread content out, consuming the array
    pub fn into_vec(mut self) -> Vec<u8> {
        self.bytes.truncate(self.write_index);
        self.bytes.drain(..self.read_index);
        self.bytes
    }

    // =========================================================================
    // Cursors
    // =========================================================================

    /// Reserve `count` bytes for writing and return the offset to write them at
    ///
    /// When the bytes do not fit, the store is replaced by one of
    /// `max(2 * (capacity - read_index), START_SIZE, count)` bytes holding only
    /// the unread content, and the read cursor resets to 0.
    pub fn claim_bytes(&mut self, count: usize) -> usize {
        let index = self.write_index;
        let end = index + count;

        if end <= self.bytes.len() {
            self.write_index = end;
            return index;
        }

        let offset = self.read_index;
        let live = index - offset;
        let allocated = (2 * (self.bytes.len() - offset))
            .max(START_SIZE)
            .max(count)
            .max(live + count);

        let mut data = vec![0; allocated];
        data[..live].copy_from_slice(&self.bytes[offset..index]);

        tracing::trace!(
            from = self.bytes.len(),
            to = allocated,
            dropped = offset,
            "binary array reallocated"
        );

        self.bytes = data;
        self.read_index = 0;
        self.write_index = live + count;
        live
    }

    /// Make sure `count` more bytes can be appended without reallocating
    pub fn ensure_additional_bytes(&mut self, count: usize) {
        self.write_index = self.claim_bytes(count);
    }

    /// Advance the read cursor by `count` and return its previous position
    ///
    /// Fails without moving the cursor if fewer than `count` bytes are unread.
    pub fn shift_read_index(&mut self, count: usize) -> Result<usize, BinaryError> {
        let start = self.read_index;
        let available = self.write_index - start;
        if count > available {
            return Err(BinaryError::Underflow {
                requested: count,
                available,
            });
        }

        self.read_index = start + count;
        Ok(start)
    }

    /// Drop unread content past the first `len` bytes
    pub fn truncate(&mut self, len: usize) {
        if len < self.byte_length() {
            self.write_index = self.read_index + len;
        }
    }

    // =========================================================================
    // Appending
    // =========================================================================

    pub fn append_u8(&mut self, value: u8) {
        let index = self.claim_bytes(NUM_BYTES_INT8);
        self.bytes[index] = value;
    }

    pub fn append_u16(&mut self, value: u16) {
        self.append_u16_with(value, self.endian);
    }

    pub fn append_u16_with(&mut self, value: u16, endian: Endian) {
        let index = self.claim_bytes(NUM_BYTES_INT16);
        endian.write_u16(&mut self.bytes[index..], value);
    }

    pub fn append_u32(&mut self, value: u32) {
        self.append_u32_with(value, self.endian);
    }

    pub fn append_u32_with(&mut self, value: u32, endian: Endian) {
        let index = self.claim_bytes(NUM_BYTES_INT32);
        endian.write_u32(&mut self.bytes[index..], value);
    }

    pub fn append_i32(&mut self, value: i32) {
        self.append_i32_with(value, self.endian);
    }

    pub fn append_i32_with(&mut self, value: i32, endian: Endian) {
        let index = self.claim_bytes(NUM_BYTES_INT32);
        endian.write_i32(&mut self.bytes[index..], value);
    }

    pub fn append_f32(&mut self, value: f32) {
        self.append_f32_with(value, self.endian);
    }

    pub fn append_f32_with(&mut self, value: f32, endian: Endian) {
        let index = self.claim_bytes(NUM_BYTES_FLOAT32);
        endian.write_f32(&mut self.bytes[index..], value);
    }

    /// Append raw bytes verbatim
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        let index = self.claim_bytes(bytes.len());
        self.bytes[index..index + bytes.len()].copy_from_slice(bytes);
    }

    /// Append UTF-8 text, writing at most `max_bytes` bytes
    ///
    /// Only whole characters are written: a character that would straddle the
    /// limit is dropped along with everything after it. Any space claimed but
    /// not written is handed back. Returns the number of bytes written.
    pub fn append_utf8(&mut self, text: &str, max_bytes: Option<usize>) -> usize {
        let length = max_bytes.unwrap_or(text.len());
        let index = self.claim_bytes(length);

        let written = utf8_prefix_len(text, length);
        self.bytes[index..index + written].copy_from_slice(&text.as_bytes()[..written]);

        self.write_index = index + written;
        written
    }

    /// Append text assuming one byte per character
    pub fn append_ascii(&mut self, text: &str) -> usize {
        self.append_utf8(text, Some(text.len()))
    }

    // =========================================================================
    // Reading
    // =========================================================================

    pub fn read_u8(&mut self) -> Result<u8, BinaryError> {
        let index = self.shift_read_index(NUM_BYTES_INT8)?;
        Ok(self.bytes[index])
    }

    pub fn read_u16(&mut self) -> Result<u16, BinaryError> {
        self.read_u16_with(self.endian)
    }

    pub fn read_u16_with(&mut self, endian: Endian) -> Result<u16, BinaryError> {
        let index = self.shift_read_index(NUM_BYTES_INT16)?;
        Ok(endian.read_u16(&self.bytes[index..]))
    }

    pub fn read_u32(&mut self) -> Result<u32, BinaryError> {
        self.read_u32_with(self.endian)
    }

    pub fn read_u32_with(&mut self, endian: Endian) -> Result<u32, BinaryError> {
        let index = self.shift_read_index(NUM_BYTES_INT32)?;
        Ok(endian.read_u32(&self.bytes[index..]))
    }

    pub fn read_i32(&mut self) -> Result<i32, BinaryError> {
        self.read_i32_with(self.endian)
    }

    pub fn read_i32_with(&mut self, endian: Endian) -> Result<i32, BinaryError> {
        let index = self.shift_read_index(NUM_BYTES_INT32)?;
        Ok(endian.read_i32(&self.bytes[index..]))
    }

    pub fn read_f32(&mut self) -> Result<f32, BinaryError> {
        self.read_f32_with(self.endian)
    }

    pub fn read_f32_with(&mut self, endian: Endian) -> Result<f32, BinaryError> {
        let index = self.shift_read_index(NUM_BYTES_FLOAT32)?;
        Ok(endian.read_f32(&self.bytes[index..]))
    }

    /// Consume `length` bytes and borrow them without copying
    pub fn read_bytes(&mut self, length: usize) -> Result<&[u8], BinaryError> {
        let index = self.shift_read_index(length)?;
        Ok(&self.bytes[index..index + length])
    }

    /// Consume `length` bytes and decode them as UTF-8
    ///
    /// Invalid sequences decode to U+FFFD instead of failing.
    pub fn read_utf8(&mut self, length: usize) -> Result<Cow<'_, str>, BinaryError> {
        let bytes = self.read_bytes(length)?;
        Ok(String::from_utf8_lossy(bytes))
    }
}

/// Longest prefix of `text` that is at most `limit` bytes and ends on a char boundary
fn utf8_prefix_len(text: &str, limit: usize) -> usize {
    if limit >= text.len() {
        return text.len();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}

impl io::Write for BinaryArray {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for BinaryArray {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = buf.len().min(self.byte_length());
        let index = self.read_index;
        buf[..count].copy_from_slice(&self.bytes[index..index + count]);
        self.read_index += count;
        Ok(count)
    }
}
