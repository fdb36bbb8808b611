//! Typed glTF JSON document
//!
//! Only the indexed tables the asset model exposes are typed. Properties this
//! schema does not name (materials, extensions, extras, ...) are ignored on
//! deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GltfError;

/// Buffer view target for vertex attributes
pub const ARRAY_BUFFER: u32 = 34962;

/// Buffer view target for vertex indices
pub const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Top-level glTF document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub asset: AssetInfo,
    /// Index of the scene to show by default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<Scene>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meshes: Vec<Mesh>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<Accessor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buffer_views: Vec<BufferView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buffers: Vec<Buffer>,
}

impl Document {
    /// Deserialize a document from glTF JSON text
    pub fn from_json(text: &str) -> Result<Self, GltfError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to compact glTF JSON text
    pub fn to_json(&self) -> Result<String, GltfError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Metadata about the glTF asset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    /// Target glTF version, e.g. `"2.0"`
    pub version: String,
    /// Minimum version a loader must support
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Binary blob referenced by buffer views
///
/// A buffer without `uri` at index 0 is stored in the GLB BIN chunk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub byte_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Contiguous byte window into a buffer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub buffer: usize,
    pub byte_length: usize,
    #[serde(default)]
    pub byte_offset: usize,
    /// Distance in bytes between vertex attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_stride: Option<usize>,
    /// [`ARRAY_BUFFER`] or [`ELEMENT_ARRAY_BUFFER`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
}

/// Typed view of elements within a buffer view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absent for accessors initialized to zeros
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<usize>,
    #[serde(default)]
    pub byte_offset: usize,
    pub component_type: ComponentType,
    #[serde(default)]
    pub normalized: bool,
    /// Number of elements
    pub count: usize,
    #[serde(rename = "type")]
    pub element_type: AccessorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec<f64>>,
}

impl Accessor {
    /// Size in bytes of one tightly packed element
    pub fn element_size(&self) -> usize {
        self.element_type.component_count() * self.component_type.byte_size()
    }
}

/// Scalar type of accessor components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ComponentType {
    I8 = 5120,
    U8 = 5121,
    I16 = 5122,
    U16 = 5123,
    U32 = 5125,
    /// NaN and infinities must not be present
    F32 = 5126,
}

impl ComponentType {
    pub fn byte_size(self) -> usize {
        match self {
            ComponentType::I8 | ComponentType::U8 => ambush_binary::NUM_BYTES_INT8,
            ComponentType::I16 | ComponentType::U16 => ambush_binary::NUM_BYTES_INT16,
            ComponentType::U32 => ambush_binary::NUM_BYTES_INT32,
            ComponentType::F32 => ambush_binary::NUM_BYTES_FLOAT32,
        }
    }
}

impl TryFrom<u32> for ComponentType {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5120 => Ok(ComponentType::I8),
            5121 => Ok(ComponentType::U8),
            5122 => Ok(ComponentType::I16),
            5123 => Ok(ComponentType::U16),
            5125 => Ok(ComponentType::U32),
            5126 => Ok(ComponentType::F32),
            other => Err(format!("unknown accessor component type {other}")),
        }
    }
}

impl From<ComponentType> for u32 {
    fn from(value: ComponentType) -> Self {
        value as u32
    }
}

/// Shape of one accessor element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AccessorType {
    /// Components per element
    pub fn component_count(self) -> usize {
        match self {
            AccessorType::Scalar => 1,
            AccessorType::Vec2 => 2,
            AccessorType::Vec3 => 3,
            AccessorType::Vec4 | AccessorType::Mat2 => 4,
            AccessorType::Mat3 => 9,
            AccessorType::Mat4 => 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mesh {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
}

/// Geometry to be rendered with one material
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Primitive {
    /// Attribute semantic (`POSITION`, `NORMAL`, `TEXCOORD_0`, ...) to accessor index
    #[serde(default)]
    pub attributes: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<usize>,
    /// Topology, 4 (triangles) when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
}

/// Node in the scene hierarchy
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<usize>,
    /// Column-major local transform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<[f32; 16]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f32; 3]>,
    /// Unit quaternion, `[x, y, z, w]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f32; 3]>,
}

/// Local transform of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Matrix([f32; 16]),
    Trs {
        translation: [f32; 3],
        rotation: [f32; 4],
        scale: [f32; 3],
    },
}

impl Node {
    /// The node's transform, with missing TRS parts at identity
    ///
    /// `matrix` wins when both forms are present.
    pub fn transform(&self) -> Transform {
        match self.matrix {
            Some(matrix) => Transform::Matrix(matrix),
            None => Transform::Trs {
                translation: self.translation.unwrap_or([0.0; 3]),
                rotation: self.rotation.unwrap_or([0.0, 0.0, 0.0, 1.0]),
                scale: self.scale.unwrap_or([1.0; 3]),
            },
        }
    }
}

/// Set of root nodes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<usize>,
}
