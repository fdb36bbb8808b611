//! Ambush-glTF: GLB container parser and index-checked glTF asset model
//!
//! Loads binary glTF (`.glb`) assets out of an [`ambush_binary::BinaryArray`]
//! without copying the chunks, deserializes the JSON chunk into a typed
//! [`Document`], and exposes the document's indexed tables through bounds
//! checked lookups on [`Gltf`].
//!
//! Fetching bytes is left to the caller; nothing in this crate does I/O.
//!
//! # Usage
//!
//! ```
//! use ambush_gltf::{Gltf, Table, write_glb};
//!
//! let json = r#"{"asset":{"version":"2.0"},"buffers":[{"byteLength":4}]}"#;
//! let mut array = write_glb(json, Some(&[1, 2, 3, 4]));
//!
//! let gltf = Gltf::load_glb(&mut array).unwrap();
//! assert_eq!(&gltf.buffer_data(0).unwrap()[..], &[1, 2, 3, 4]);
//! assert!(gltf.get(Table::Accessors, 0).is_err());
//! ```
//!
//! # Format Reference
//!
//! - glTF 2.0, section 4.4 "GLB File Format Specification"
//! - <https://registry.khronos.org/glTF/specs/2.0/glTF-2.0.html#glb-file-format-specification>

mod asset;
mod config;
pub mod document;
mod error;
mod glb;

pub use asset::{Entry, Gltf, Table};
pub use config::{ChunkPolicy, LoadConfig};
pub use document::Document;
pub use error::{GlbError, GltfError, ParseTableError};
pub use glb::{GlbFile, assemble_glb, parse_glb, parse_glb_with, write_glb};

// =============================================================================
// Constants
// =============================================================================

/// `glTF` read as a little-endian u32
pub const GLB_MAGIC: u32 = 0x46546C67;

/// The only container version supported
pub const GLB_VERSION: u32 = 2;

/// magic + version + length
pub const GLB_HEADER_LENGTH: usize = 12;

/// chunk length + chunk type
pub const GLB_CHUNK_HEADER_LENGTH: usize = 8;

/// Header, one chunk header and the shortest JSON document (`{}`)
pub const GLB_MIN_LENGTH: usize = GLB_HEADER_LENGTH + GLB_CHUNK_HEADER_LENGTH + 2;

/// `JSON`
pub const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;

/// `BIN\0`
pub const CHUNK_TYPE_BIN: u32 = 0x004E4942;
