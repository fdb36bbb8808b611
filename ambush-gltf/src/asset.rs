//! Read-only asset model over a glTF document and its binary payload

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use ambush_binary::BinaryArray;

use crate::config::LoadConfig;
use crate::document::{Accessor, Buffer, BufferView, Document, Mesh, Node, Scene};
use crate::error::{GltfError, ParseTableError};
use crate::glb::{GlbFile, parse_glb_with};

/// The indexed top-level tables of a glTF document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Buffers,
    BufferViews,
    Accessors,
    Meshes,
    Nodes,
    Scenes,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Buffers,
        Table::BufferViews,
        Table::Accessors,
        Table::Meshes,
        Table::Nodes,
        Table::Scenes,
    ];

    /// glTF JSON property name of the table
    pub fn name(self) -> &'static str {
        match self {
            Table::Buffers => "buffers",
            Table::BufferViews => "bufferViews",
            Table::Accessors => "accessors",
            Table::Meshes => "meshes",
            Table::Nodes => "nodes",
            Table::Scenes => "scenes",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = ParseTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|table| table.name() == s)
            .ok_or_else(|| ParseTableError(s.to_string()))
    }
}

/// One element of an indexed table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'d> {
    Buffer(&'d Buffer),
    BufferView(&'d BufferView),
    Accessor(&'d Accessor),
    Mesh(&'d Mesh),
    Node(&'d Node),
    Scene(&'d Scene),
}

impl Entry<'_> {
    /// Table the entry was looked up in
    pub fn table(&self) -> Table {
        match self {
            Entry::Buffer(_) => Table::Buffers,
            Entry::BufferView(_) => Table::BufferViews,
            Entry::Accessor(_) => Table::Accessors,
            Entry::Mesh(_) => Table::Meshes,
            Entry::Node(_) => Table::Nodes,
            Entry::Scene(_) => Table::Scenes,
        }
    }
}

/// A loaded glTF asset
///
/// Holds the parsed document and, for GLB input, the BIN chunk. The BIN chunk
/// is borrowed from the array the container was parsed from until
/// [`into_owned`](Self::into_owned) detaches it. Every table lookup is bounds
/// checked and fails with [`GltfError::UnknownIndex`]; a failed lookup leaves
/// the asset usable.
#[derive(Debug, Clone, PartialEq)]
pub struct Gltf<'a> {
    document: Document,
    bin: Option<Cow<'a, [u8]>>,
    allow_data_uris: bool,
}

impl<'a> Gltf<'a> {
    /// Load a GLB container with the default [`LoadConfig`]
    pub fn load_glb(array: &'a mut BinaryArray) -> Result<Self, GltfError> {
        Self::load_glb_with(array, &LoadConfig::default())
    }

    /// Parse a GLB container out of `array` and deserialize its JSON chunk
    pub fn load_glb_with(
        array: &'a mut BinaryArray,
        config: &LoadConfig,
    ) -> Result<Self, GltfError> {
        let glb = parse_glb_with(array, config)?;
        let mut gltf = Self::from_glb(glb)?;
        gltf.allow_data_uris = config.allow_data_uris;
        Ok(gltf)
    }

    /// Build from an already parsed container
    pub fn from_glb(glb: GlbFile<'a>) -> Result<Self, GltfError> {
        let document = Document::from_json(&glb.json)?;
        Ok(Self::from_document(document, glb.bin))
    }

    /// Build from glTF JSON text and an optional BIN payload
    pub fn from_json(text: &str, bin: Option<Cow<'a, [u8]>>) -> Result<Self, GltfError> {
        Ok(Self::from_document(Document::from_json(text)?, bin))
    }

    pub fn from_document(document: Document, bin: Option<Cow<'a, [u8]>>) -> Self {
        let stored_in_bin = document
            .buffers
            .first()
            .is_some_and(|buffer| buffer.uri.is_none());
        if bin.is_some() && !stored_in_bin {
            tracing::warn!("BIN chunk present but no buffer refers to it");
        }

        tracing::debug!(
            version = %document.asset.version,
            buffers = document.buffers.len(),
            meshes = document.meshes.len(),
            nodes = document.nodes.len(),
            bin = bin.as_ref().map_or(0, |bin| bin.len()),
            "loaded glTF asset"
        );

        Self {
            document,
            bin,
            allow_data_uris: true,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Payload of the GLB BIN chunk
    pub fn bin(&self) -> Option<&[u8]> {
        self.bin.as_deref()
    }

    /// Copy the BIN chunk so the asset outlives its source array
    pub fn into_owned(self) -> Gltf<'static> {
        Gltf {
            document: self.document,
            bin: self.bin.map(|bin| Cow::Owned(bin.into_owned())),
            allow_data_uris: self.allow_data_uris,
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Number of entries in `table`, 0 when the document omits it
    pub fn table_len(&self, table: Table) -> usize {
        match table {
            Table::Buffers => self.document.buffers.len(),
            Table::BufferViews => self.document.buffer_views.len(),
            Table::Accessors => self.document.accessors.len(),
            Table::Meshes => self.document.meshes.len(),
            Table::Nodes => self.document.nodes.len(),
            Table::Scenes => self.document.scenes.len(),
        }
    }

    /// Entry `index` of `table`
    pub fn get(&self, table: Table, index: usize) -> Result<Entry<'_>, GltfError> {
        Ok(match table {
            Table::Buffers => Entry::Buffer(self.buffer(index)?),
            Table::BufferViews => Entry::BufferView(self.buffer_view(index)?),
            Table::Accessors => Entry::Accessor(self.accessor(index)?),
            Table::Meshes => Entry::Mesh(self.mesh(index)?),
            Table::Nodes => Entry::Node(self.node(index)?),
            Table::Scenes => Entry::Scene(self.scene(index)?),
        })
    }

    /// [`get`](Self::get) with the table named by its glTF property name
    ///
    /// A name that is not an indexed table is treated as an absent table.
    pub fn get_by_name(&self, table: &str, index: usize) -> Result<Entry<'_>, GltfError> {
        match table.parse::<Table>() {
            Ok(table) => self.get(table, index),
            Err(_) => Err(GltfError::UnknownIndex {
                table: table.to_string(),
                index,
            }),
        }
    }

    pub fn buffer(&self, index: usize) -> Result<&Buffer, GltfError> {
        lookup(&self.document.buffers, Table::Buffers, index)
    }

    pub fn buffer_view(&self, index: usize) -> Result<&BufferView, GltfError> {
        lookup(&self.document.buffer_views, Table::BufferViews, index)
    }

    pub fn accessor(&self, index: usize) -> Result<&Accessor, GltfError> {
        lookup(&self.document.accessors, Table::Accessors, index)
    }

    pub fn mesh(&self, index: usize) -> Result<&Mesh, GltfError> {
        lookup(&self.document.meshes, Table::Meshes, index)
    }

    pub fn node(&self, index: usize) -> Result<&Node, GltfError> {
        lookup(&self.document.nodes, Table::Nodes, index)
    }

    pub fn scene(&self, index: usize) -> Result<&Scene, GltfError> {
        lookup(&self.document.scenes, Table::Scenes, index)
    }

    /// The scene named by the document's `scene` property, if any
    pub fn default_scene(&self) -> Result<Option<&Scene>, GltfError> {
        self.document
            .scene
            .map(|index| self.scene(index))
            .transpose()
    }

    // =========================================================================
    // Buffer data
    // =========================================================================

    /// The first `byteLength` bytes of buffer `index`
    ///
    /// The GLB-stored buffer (index 0 without `uri`) borrows the BIN chunk.
    /// `data:` URIs with base64 payloads are decoded. Any other URI needs I/O
    /// and fails [`UnsupportedUri`](GltfError::UnsupportedUri).
    pub fn buffer_data(&self, index: usize) -> Result<Cow<'_, [u8]>, GltfError> {
        let buffer = self.buffer(index)?;

        let data = match buffer.uri.as_deref() {
            Some(uri) => Cow::Owned(self.decode_data_uri(index, uri)?),
            None if index == 0 => match self.bin.as_deref() {
                Some(bin) => Cow::Borrowed(bin),
                None => return Err(GltfError::MissingBinChunk { buffer: index }),
            },
            None => return Err(GltfError::MissingBinChunk { buffer: index }),
        };

        // the BIN chunk may carry up to 3 bytes of padding past byteLength
        if data.len() < buffer.byte_length {
            return Err(GltfError::BufferOutOfRange {
                buffer: index,
                end: buffer.byte_length,
                length: data.len(),
            });
        }
        Ok(slice_cow(data, 0, buffer.byte_length))
    }

    /// The byte window of buffer view `index`
    pub fn buffer_view_data(&self, index: usize) -> Result<Cow<'_, [u8]>, GltfError> {
        let view = self.buffer_view(index)?;
        let data = self.buffer_data(view.buffer)?;

        let end = view.byte_offset.saturating_add(view.byte_length);
        if end > data.len() {
            return Err(GltfError::BufferOutOfRange {
                buffer: view.buffer,
                end,
                length: data.len(),
            });
        }
        Ok(slice_cow(data, view.byte_offset, end))
    }

    fn decode_data_uri(&self, index: usize, uri: &str) -> Result<Vec<u8>, GltfError> {
        let unsupported = || GltfError::UnsupportedUri {
            buffer: index,
            uri: uri.to_string(),
        };

        let (header, payload) = uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or_else(unsupported)?;
        if !header.ends_with(";base64") {
            return Err(unsupported());
        }
        if !self.allow_data_uris {
            tracing::warn!(buffer = index, "data uri buffers are disabled");
            return Err(unsupported());
        }

        Ok(ambush_binary::parse_base64(payload))
    }
}

fn lookup<T>(items: &[T], table: Table, index: usize) -> Result<&T, GltfError> {
    items.get(index).ok_or_else(|| GltfError::UnknownIndex {
        table: table.to_string(),
        index,
    })
}

fn slice_cow(data: Cow<'_, [u8]>, start: usize, end: usize) -> Cow<'_, [u8]> {
    match data {
        Cow::Borrowed(bytes) => Cow::Borrowed(&bytes[start..end]),
        Cow::Owned(mut bytes) => {
            bytes.truncate(end);
            bytes.drain(..start);
            Cow::Owned(bytes)
        }
    }
}
