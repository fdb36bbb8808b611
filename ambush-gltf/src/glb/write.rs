//! GLB container packing

use ambush_binary::{BinaryArray, Endian};

use crate::{
    CHUNK_TYPE_BIN, CHUNK_TYPE_JSON, GLB_CHUNK_HEADER_LENGTH, GLB_HEADER_LENGTH, GLB_MAGIC,
    GLB_VERSION,
};

/// Pack a JSON document and optional binary payload into a GLB container
///
/// The JSON chunk is padded with spaces and the BIN chunk with zeros, each to
/// 4-byte alignment. No BIN chunk is written when `bin` is `None`.
pub fn write_glb(json: &str, bin: Option<&[u8]>) -> BinaryArray {
    let json_padding = padding(json.len());
    let json_chunk_length = json.len() + json_padding;

    let bin_chunk_length = bin.map(|bin| bin.len() + padding(bin.len()));

    let total_length = GLB_HEADER_LENGTH
        + GLB_CHUNK_HEADER_LENGTH
        + json_chunk_length
        + bin_chunk_length.map_or(0, |length| GLB_CHUNK_HEADER_LENGTH + length);

    BinaryArray::build(Endian::Little, |glb| {
        glb.ensure_additional_bytes(total_length);

        // GLB header
        glb.append_u32(GLB_MAGIC);
        glb.append_u32(GLB_VERSION);
        glb.append_u32(total_length as u32);

        // JSON chunk
        glb.append_u32(json_chunk_length as u32);
        glb.append_u32(CHUNK_TYPE_JSON);
        glb.append_utf8(json, None);
        for _ in 0..json_padding {
            glb.append_u8(0x20);
        }

        // Binary chunk
        if let (Some(bin), Some(length)) = (bin, bin_chunk_length) {
            glb.append_u32(length as u32);
            glb.append_u32(CHUNK_TYPE_BIN);
            glb.append_bytes(bin);
            for _ in bin.len()..length {
                glb.append_u8(0);
            }
        }
    })
}

/// [`write_glb`] into a plain byte vector
pub fn assemble_glb(json: &str, bin: Option<&[u8]>) -> Vec<u8> {
    write_glb(json, bin).into_vec()
}

fn padding(length: usize) -> usize {
    (4 - (length % 4)) % 4
}
