//! GLB container (binary glTF)
//!
//! ```text
//! header   magic:u32  version:u32  length:u32
//! chunk 0  length:u32 type:u32 = JSON   payload (space padded)
//! chunk 1  length:u32 type:u32 = BIN    payload (zero padded), optional
//! chunk n  ...
//! ```
//!
//! Everything is little-endian regardless of the array's default order.
//!
//! - `read` - Validating a container and borrowing its chunks
//! - `write` - Packing JSON and BIN payloads into a container

mod read;
mod write;


use std::borrow::Cow;

pub use read::{parse_glb, parse_glb_with};
pub use write::{assemble_glb, write_glb};

/// The two chunks of a GLB container
///
/// Both fields borrow from the array the container was parsed out of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlbFile<'a> {
    /// Metadata text of the JSON chunk
    pub json: Cow<'a, str>,
    /// Payload of the BIN chunk, when the second chunk is one
    pub bin: Option<Cow<'a, [u8]>>,
}

impl GlbFile<'_> {
    /// Copy borrowed chunks so the file outlives its source array
    pub fn into_owned(self) -> GlbFile<'static> {
        GlbFile {
            json: Cow::Owned(self.json.into_owned()),
            bin: self.bin.map(|bin| Cow::Owned(bin.into_owned())),
        }
    }
}
