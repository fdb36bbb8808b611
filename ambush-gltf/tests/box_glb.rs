//! End-to-end loading of the Khronos Box sample
//!
//! <https://github.com/KhronosGroup/glTF-Sample-Assets/blob/main/Models/Box/glTF-Binary/Box.glb>

use ambush_binary::{BinaryArray, Endian, read_base64};
use ambush_gltf::document::{AccessorType, ComponentType, ELEMENT_ARRAY_BUFFER, Transform};
use ambush_gltf::{
    ChunkPolicy, Entry, GlbError, Gltf, GltfError, LoadConfig, Table, parse_glb, parse_glb_with,
};
use serde_json::json;

const BOX_FILE: &str = "Z2xURgIAAACABgAA3AMAAEpTT057ImFzc2V0Ijp7ImdlbmVyYXRvciI6IkNPTExBREEyR0xURiIsInZlcnNpb24i\
    OiIyLjAifSwic2NlbmUiOjAsInNjZW5lcyI6W3sibm9kZXMiOlswXX1dLCJub2RlcyI6W3siY2hpbGRyZW4iOlsx\
    XSwibWF0cml4IjpbMS4wLDAuMCwwLjAsMC4wLDAuMCwwLjAsLTEuMCwwLjAsMC4wLDEuMCwwLjAsMC4wLDAuMCww\
    LjAsMC4wLDEuMF19LHsibWVzaCI6MH1dLCJtZXNoZXMiOlt7InByaW1pdGl2ZXMiOlt7ImF0dHJpYnV0ZXMiOnsi\
    Tk9STUFMIjoxLCJQT1NJVElPTiI6Mn0sImluZGljZXMiOjAsIm1vZGUiOjQsIm1hdGVyaWFsIjowfV0sIm5hbWUi\
    OiJNZXNoIn1dLCJhY2Nlc3NvcnMiOlt7ImJ1ZmZlclZpZXciOjAsImJ5dGVPZmZzZXQiOjAsImNvbXBvbmVudFR5\
    cGUiOjUxMjMsImNvdW50IjozNiwibWF4IjpbMjNdLCJtaW4iOlswXSwidHlwZSI6IlNDQUxBUiJ9LHsiYnVmZmVy\
    VmlldyI6MSwiYnl0ZU9mZnNldCI6MCwiY29tcG9uZW50VHlwZSI6NTEyNiwiY291bnQiOjI0LCJtYXgiOlsxLjAs\
    MS4wLDEuMF0sIm1pbiI6Wy0xLjAsLTEuMCwtMS4wXSwidHlwZSI6IlZFQzMifSx7ImJ1ZmZlclZpZXciOjEsImJ5\
    dGVPZmZzZXQiOjI4OCwiY29tcG9uZW50VHlwZSI6NTEyNiwiY291bnQiOjI0LCJtYXgiOlswLjUsMC41LDAuNV0s\
    Im1pbiI6Wy0wLjUsLTAuNSwtMC41XSwidHlwZSI6IlZFQzMifV0sIm1hdGVyaWFscyI6W3sicGJyTWV0YWxsaWNS\
    b3VnaG5lc3MiOnsiYmFzZUNvbG9yRmFjdG9yIjpbMC44MDAwMDAwMTE5MjA5MjksMC4wLDAuMCwxLjBdLCJtZXRh\
    bGxpY0ZhY3RvciI6MC4wfSwibmFtZSI6IlJlZCJ9XSwiYnVmZmVyVmlld3MiOlt7ImJ1ZmZlciI6MCwiYnl0ZU9m\
    ZnNldCI6NTc2LCJieXRlTGVuZ3RoIjo3MiwidGFyZ2V0IjozNDk2M30seyJidWZmZXIiOjAsImJ5dGVPZmZzZXQi\
    OjAsImJ5dGVMZW5ndGgiOjU3NiwiYnl0ZVN0cmlkZSI6MTIsInRhcmdldCI6MzQ5NjJ9XSwiYnVmZmVycyI6W3si\
    Ynl0ZUxlbmd0aCI6NjQ4fV19iAIAAEJJTgAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAgD8AAAAAAAAAAAAAgD8AAAAA\
    AAAAAAAAgD8AAAAAAACAvwAAAAAAAAAAAACAvwAAAAAAAAAAAACAvwAAAAAAAAAAAACAvwAAAAAAAIA/AAAAAAAA\
    AAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAACAPwAAAAAAAAAA\
    AACAPwAAAAAAAAAAAACAPwAAAAAAAIC/AAAAAAAAAAAAAIC/AAAAAAAAAAAAAIC/AAAAAAAAAAAAAIC/AAAAAAAA\
    AAAAAAAAAAAAAAAAgL8AAAAAAAAAAAAAgL8AAAAAAAAAAAAAgL8AAAAAAAAAAAAAgL8AAAC/AAAAvwAAAD8AAAA/\
    AAAAvwAAAD8AAAC/AAAAPwAAAD8AAAA/AAAAPwAAAD8AAAA/AAAAvwAAAD8AAAC/AAAAvwAAAD8AAAA/AAAAvwAA\
    AL8AAAC/AAAAvwAAAL8AAAA/AAAAPwAAAD8AAAA/AAAAvwAAAD8AAAA/AAAAPwAAAL8AAAA/AAAAvwAAAL8AAAC/\
    AAAAPwAAAD8AAAA/AAAAPwAAAD8AAAC/AAAAPwAAAL8AAAA/AAAAPwAAAL8AAAC/AAAAvwAAAD8AAAC/AAAAPwAA\
    AD8AAAC/AAAAvwAAAL8AAAC/AAAAPwAAAL8AAAC/AAAAvwAAAL8AAAC/AAAAPwAAAL8AAAA/AAAAvwAAAL8AAAA/\
    AAAAPwAAAL8AAAEAAgADAAIAAQAEAAUABgAHAAYABQAIAAkACgALAAoACQAMAA0ADgAPAA4ADQAQABEAEgATABIA\
    EQAUABUAFgAXABYAFQA=";

/// Three VEC3 positions of a single triangle, as embedded in a data uri
const TRIANGLE_POSITIONS: &str = "AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA";

/// Decode the base64 text in place, leaving only the container bytes unread
fn box_array() -> anyhow::Result<BinaryArray> {
    let mut binary = BinaryArray::little_endian();
    binary.append_utf8(BOX_FILE, None);
    let bytes = read_base64(&mut binary, None)?;
    binary.append_bytes(&bytes);
    Ok(binary)
}

fn read_f32s(bytes: &[u8], count: usize) -> anyhow::Result<Vec<f32>> {
    let mut reader = BinaryArray::from_bytes(bytes, Endian::Little);
    let values = (0..count)
        .map(|_| reader.read_f32())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(values)
}

#[test]
fn test_box_file() -> anyhow::Result<()> {
    let mut binary = box_array()?;
    assert_eq!(binary.byte_length(), 1664);

    let glb = parse_glb(&mut binary)?;
    let asset: serde_json::Value = serde_json::from_str(&glb.json)?;

    assert_eq!(
        asset,
        json!({
            "accessors": [
                {
                    "bufferView": 0,
                    "byteOffset": 0,
                    "componentType": 5123,
                    "count": 36,
                    "max": [23],
                    "min": [0],
                    "type": "SCALAR"
                },
                {
                    "bufferView": 1,
                    "byteOffset": 0,
                    "componentType": 5126,
                    "count": 24,
                    "max": [1.0, 1.0, 1.0],
                    "min": [-1.0, -1.0, -1.0],
                    "type": "VEC3"
                },
                {
                    "bufferView": 1,
                    "byteOffset": 288,
                    "componentType": 5126,
                    "count": 24,
                    "max": [0.5, 0.5, 0.5],
                    "min": [-0.5, -0.5, -0.5],
                    "type": "VEC3"
                }
            ],
            "asset": { "generator": "COLLADA2GLTF", "version": "2.0" },
            "bufferViews": [
                { "buffer": 0, "byteLength": 72, "byteOffset": 576, "target": 34963 },
                { "buffer": 0, "byteLength": 576, "byteOffset": 0, "byteStride": 12, "target": 34962 }
            ],
            "buffers": [{ "byteLength": 648 }],
            "materials": [
                {
                    "name": "Red",
                    "pbrMetallicRoughness": {
                        "baseColorFactor": [0.800000011920929, 0.0, 0.0, 1.0],
                        "metallicFactor": 0.0
                    }
                }
            ],
            "meshes": [
                {
                    "name": "Mesh",
                    "primitives": [
                        {
                            "attributes": { "NORMAL": 1, "POSITION": 2 },
                            "indices": 0,
                            "material": 0,
                            "mode": 4
                        }
                    ]
                }
            ],
            "nodes": [
                {
                    "children": [1],
                    "matrix": [
                        1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0
                    ]
                },
                { "mesh": 0 }
            ],
            "scene": 0,
            "scenes": [{ "nodes": [0] }]
        })
    );

    assert_eq!(glb.bin.as_deref().map(<[u8]>::len), Some(648));
    Ok(())
}

#[test]
fn test_box_asset_model() -> anyhow::Result<()> {
    let mut binary = box_array()?;
    let gltf = Gltf::load_glb(&mut binary)?;

    assert_eq!(gltf.document().asset.generator.as_deref(), Some("COLLADA2GLTF"));
    assert_eq!(gltf.table_len(Table::Accessors), 3);
    assert_eq!(gltf.table_len(Table::Nodes), 2);

    let indices = gltf.accessor(0)?;
    assert_eq!(indices.component_type, ComponentType::U16);
    assert_eq!(indices.element_type, AccessorType::Scalar);
    assert_eq!(indices.count, 36);
    assert_eq!(gltf.buffer_view(0)?.target, Some(ELEMENT_ARRAY_BUFFER));

    let Entry::Mesh(mesh) = gltf.get_by_name("meshes", 0)? else {
        panic!("expected a mesh");
    };
    assert_eq!(mesh.name.as_deref(), Some("Mesh"));
    assert_eq!(mesh.primitives[0].attributes["POSITION"], 2);

    match gltf.node(0)?.transform() {
        Transform::Matrix(matrix) => assert_eq!(matrix[6], -1.0),
        other => panic!("expected a matrix, got {other:?}"),
    }
    assert_eq!(gltf.node(1)?.mesh, Some(0));

    let scene = gltf.default_scene()?.expect("box has a default scene");
    assert_eq!(scene.nodes, vec![0]);

    assert_eq!(
        gltf.get(Table::Accessors, 3),
        Err(GltfError::UnknownIndex {
            table: "accessors".to_string(),
            index: 3,
        })
    );
    Ok(())
}

#[test]
fn test_box_buffer_views() -> anyhow::Result<()> {
    let mut binary = box_array()?;
    let gltf = Gltf::load_glb(&mut binary)?;

    assert_eq!(gltf.buffer_data(0)?.len(), 648);

    let index_bytes = gltf.buffer_view_data(0)?;
    assert_eq!(index_bytes.len(), 72);
    let mut reader = BinaryArray::from_bytes(&index_bytes[..24], Endian::Little);
    let first: Vec<u16> = (0..12).map(|_| reader.read_u16()).collect::<Result<_, _>>()?;
    assert_eq!(first, vec![0, 1, 2, 3, 2, 1, 4, 5, 6, 7, 6, 5]);

    // accessor 1 (NORMAL) starts the vertex view, accessor 2 (POSITION) sits 288 bytes in
    let vertices = gltf.buffer_view_data(1)?;
    assert_eq!(gltf.buffer_view(1)?.byte_stride, Some(12));
    assert_eq!(read_f32s(&vertices[..12], 3)?, vec![0.0, 0.0, 1.0]);

    let position_offset = gltf.accessor(2)?.byte_offset;
    assert_eq!(
        read_f32s(&vertices[position_offset..position_offset + 12], 3)?,
        vec![-0.5, -0.5, 0.5]
    );
    Ok(())
}

#[test]
fn test_box_strict_chunks() -> anyhow::Result<()> {
    let mut binary = box_array()?;
    let config = LoadConfig {
        trailing_chunks: ChunkPolicy::Validate,
        ..LoadConfig::default()
    };
    let glb = parse_glb_with(&mut binary, &config)?;
    assert_eq!(glb.bin.map(|bin| bin.len()), Some(648));
    Ok(())
}

#[test]
fn test_box_truncated() -> anyhow::Result<()> {
    let mut bytes = box_array()?.into_vec();
    bytes.pop();
    let mut binary = BinaryArray::from_bytes(bytes, Endian::Little);

    assert_eq!(
        parse_glb(&mut binary).unwrap_err(),
        GlbError::Truncated {
            declared: 1664,
            available: 1663,
        }
    );
    Ok(())
}

#[test]
fn test_triangle_positions_from_base64() -> anyhow::Result<()> {
    let bytes = ambush_binary::parse_base64(TRIANGLE_POSITIONS);
    assert_eq!(bytes.len(), 36);
    assert_eq!(
        read_f32s(&bytes, 9)?,
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
    );
    Ok(())
}
