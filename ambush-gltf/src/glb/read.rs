//! GLB container parsing

use std::borrow::Cow;
use std::ops::Range;

use ambush_binary::{BinaryArray, Endian};

use super::GlbFile;
use crate::config::{ChunkPolicy, LoadConfig};
use crate::error::GlbError;
use crate::{
    CHUNK_TYPE_BIN, CHUNK_TYPE_JSON, GLB_CHUNK_HEADER_LENGTH, GLB_HEADER_LENGTH, GLB_MAGIC,
    GLB_MIN_LENGTH, GLB_VERSION,
};

/// Parse a GLB container with the default [`LoadConfig`]
pub fn parse_glb(array: &mut BinaryArray) -> Result<GlbFile<'_>, GlbError> {
    parse_glb_with(array, &LoadConfig::default())
}

/// Parse a GLB container from the unread content of `array`
///
/// The container is consumed from the read cursor. Bytes past its declared
/// length are discarded from the array. The returned chunks borrow the
/// array's storage, so nothing is copied unless the JSON is not valid UTF-8.
///
/// # Errors
/// Checked in order: [`TooSmall`](GlbError::TooSmall),
/// [`BadMagic`](GlbError::BadMagic),
/// [`UnsupportedVersion`](GlbError::UnsupportedVersion),
/// [`TooLarge`](GlbError::TooLarge), [`Truncated`](GlbError::Truncated),
/// then [`UnexpectedChunkType`](GlbError::UnexpectedChunkType) for a first
/// chunk that is not JSON. Chunk lengths that overrun the container surface
/// as [`Binary`](GlbError::Binary) underflows.
pub fn parse_glb_with<'a>(
    array: &'a mut BinaryArray,
    config: &LoadConfig,
) -> Result<GlbFile<'a>, GlbError> {
    let container_start = array.read_index();
    let body_length = claim_glb_contents(array, config)?;

    // re-scope to the declared length
    array.truncate(body_length);

    let json_length = array.read_u32_with(Endian::Little)? as usize;
    let json_type = array.read_u32_with(Endian::Little)?;
    if json_type != CHUNK_TYPE_JSON {
        return Err(GlbError::UnexpectedChunkType {
            expected: CHUNK_TYPE_JSON,
            found: json_type,
        });
    }
    let json_range = take_range(array, json_length)?;

    // a BIN chunk, if any, is always the second
    let mut bin_range = None;
    if !array.is_empty() {
        let chunk_length = array.read_u32_with(Endian::Little)? as usize;
        let chunk_type = array.read_u32_with(Endian::Little)?;

        if chunk_type == CHUNK_TYPE_BIN {
            bin_range = Some(take_range(array, chunk_length)?);
        } else {
            tracing::debug!(
                chunk_type,
                length = chunk_length,
                "skipping unrecognized second chunk"
            );
            skip_payload(array, chunk_length, container_start, config.trailing_chunks)?;
        }
    }

    if !array.is_empty() {
        match config.trailing_chunks {
            ChunkPolicy::Ignore => {
                tracing::debug!(bytes = array.byte_length(), "ignoring trailing GLB chunks");
            }
            ChunkPolicy::Validate => validate_chunks(array, container_start)?,
        }
    }

    // the whole container is consumed
    let rest = array.byte_length();
    array.shift_read_index(rest)?;

    let array: &'a BinaryArray = array;
    let bytes = array.backing();

    Ok(GlbFile {
        json: String::from_utf8_lossy(&bytes[json_range]),
        bin: bin_range.map(|range| Cow::Borrowed(&bytes[range])),
    })
}

/// Validate the 12-byte header and return the length of what follows it
fn claim_glb_contents(array: &mut BinaryArray, config: &LoadConfig) -> Result<usize, GlbError> {
    let available = array.byte_length();
    if available < GLB_MIN_LENGTH {
        return Err(GlbError::TooSmall { length: available });
    }

    let magic = array.read_u32_with(Endian::Little)?;
    if magic != GLB_MAGIC {
        return Err(GlbError::BadMagic(magic));
    }

    let version = array.read_u32_with(Endian::Little)?;
    if version != GLB_VERSION {
        return Err(GlbError::UnsupportedVersion(version));
    }

    let length = array.read_u32_with(Endian::Little)?;
    if u64::from(length) > config.max_container_bytes {
        return Err(GlbError::TooLarge {
            declared: u64::from(length),
            limit: config.max_container_bytes,
        });
    }
    if length as usize > available {
        return Err(GlbError::Truncated {
            declared: length,
            available,
        });
    }
    if (length as usize) < GLB_MIN_LENGTH {
        return Err(GlbError::TooSmall {
            length: length as usize,
        });
    }

    tracing::trace!(length, available, "claimed GLB container");
    Ok(length as usize - GLB_HEADER_LENGTH)
}

/// Consume `length` bytes and return where they sit in the backing store
fn take_range(array: &mut BinaryArray, length: usize) -> Result<Range<usize>, GlbError> {
    let start = array.shift_read_index(length)?;
    Ok(start..start + length)
}

fn skip_payload(
    array: &mut BinaryArray,
    length: usize,
    container_start: usize,
    policy: ChunkPolicy,
) -> Result<(), GlbError> {
    let available = array.byte_length();
    if length > available {
        if policy == ChunkPolicy::Validate {
            return Err(GlbError::MalformedChunk {
                offset: array.read_index() - GLB_CHUNK_HEADER_LENGTH - container_start,
            });
        }
        tracing::warn!(length, available, "chunk payload overruns GLB container");
    }
    array.shift_read_index(length.min(available))?;
    Ok(())
}

/// Walk every remaining chunk header, failing on the first that overruns
fn validate_chunks(array: &mut BinaryArray, container_start: usize) -> Result<(), GlbError> {
    while !array.is_empty() {
        let offset = array.read_index() - container_start;
        if array.byte_length() < GLB_CHUNK_HEADER_LENGTH {
            return Err(GlbError::MalformedChunk { offset });
        }

        let length = array.read_u32_with(Endian::Little)? as usize;
        let chunk_type = array.read_u32_with(Endian::Little)?;
        if length > array.byte_length() {
            return Err(GlbError::MalformedChunk { offset });
        }
        array.shift_read_index(length)?;

        tracing::debug!(offset, chunk_type, length, "validated trailing chunk");
    }
    Ok(())
}
