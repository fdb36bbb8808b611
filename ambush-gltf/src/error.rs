//! GLB and glTF error types

use ambush_binary::BinaryError;

/// Container-format validation failures
///
/// All of these are terminal for the parse call; no partial result is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlbError {
    /// Fewer bytes than the smallest possible container
    #[error("{length} bytes is too small for a GLB container (min {min})", min = crate::GLB_MIN_LENGTH)]
    TooSmall { length: usize },

    /// First word is not `glTF`
    #[error("invalid GLB magic 0x{0:08X}")]
    BadMagic(u32),

    #[error("unsupported GLB version {0} (expected {expected})", expected = crate::GLB_VERSION)]
    UnsupportedVersion(u32),

    /// Declared total length runs past the available bytes
    #[error("GLB declares {declared} bytes but only {available} are available")]
    Truncated { declared: u32, available: usize },

    #[error("unexpected chunk type 0x{found:08X} (expected 0x{expected:08X})")]
    UnexpectedChunkType { expected: u32, found: u32 },

    /// A chunk header or payload overruns the container
    #[error("malformed chunk at byte {offset}")]
    MalformedChunk { offset: usize },

    /// Declared total length exceeds the configured limit
    #[error("GLB declares {declared} bytes, over the {limit} byte limit")]
    TooLarge { declared: u64, limit: u64 },

    #[error(transparent)]
    Binary(#[from] BinaryError),
}

/// Asset loading and lookup failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GltfError {
    /// Lookup into an absent table or past its end
    ///
    /// Terminal for that lookup only; the rest of the asset stays usable.
    #[error("unknown index {index} in {table}")]
    UnknownIndex { table: String, index: usize },

    /// JSON chunk failed to deserialize
    #[error("invalid glTF JSON: {0}")]
    Json(String),

    #[error(transparent)]
    Glb(#[from] GlbError),

    /// Buffer is GLB-stored but the container has no BIN chunk
    #[error("buffer {buffer} refers to the BIN chunk but none is present")]
    MissingBinChunk { buffer: usize },

    /// Buffer URI this layer cannot resolve without I/O
    #[error("buffer {buffer} has unsupported uri {uri:?}")]
    UnsupportedUri { buffer: usize, uri: String },

    #[error("byte range ending at {end} exceeds buffer {buffer} ({length} bytes)")]
    BufferOutOfRange {
        buffer: usize,
        end: usize,
        length: usize,
    },

    /// Loader configuration failed to parse
    #[error("invalid load config: {0}")]
    Config(String),
}

/// Name that is not one of the indexed glTF tables
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown glTF table {0:?}")]
pub struct ParseTableError(pub String);

impl From<serde_json::Error> for GltfError {
    fn from(e: serde_json::Error) -> Self {
        GltfError::Json(e.to_string())
    }
}

impl From<toml::de::Error> for GltfError {
    fn from(e: toml::de::Error) -> Self {
        GltfError::Config(e.to_string())
    }
}

impl From<BinaryError> for GltfError {
    fn from(e: BinaryError) -> Self {
        GltfError::Glb(GlbError::Binary(e))
    }
}
