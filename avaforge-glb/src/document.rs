//! Minimal glTF scene document for a single avatar mesh
//!
//! One scene, one node, one mesh, one triangle primitive referencing the
//! position/UV/normal/index accessors packed into the binary blob.

use crate::blob::{AccessorIndex, BinaryBlob};
use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use std::collections::BTreeMap;

/// Accessor indices for the avatar primitive.
#[derive(Debug, Clone, Copy)]
pub struct AvatarAccessors {
    pub positions: AccessorIndex,
    pub uvs: AccessorIndex,
    pub normals: AccessorIndex,
    pub indices: AccessorIndex,
}

/// Build the complete glTF root for one avatar mesh.
pub fn build_document(name: &str, blob: &BinaryBlob, accessors: &AvatarAccessors) -> json::Root {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        Valid(json::mesh::Semantic::Positions),
        accessors.positions.as_json_index(),
    );
    attributes.insert(
        Valid(json::mesh::Semantic::TexCoords(0)),
        accessors.uvs.as_json_index(),
    );
    attributes.insert(
        Valid(json::mesh::Semantic::Normals),
        accessors.normals.as_json_index(),
    );

    let primitive = json::mesh::Primitive {
        attributes,
        extensions: Default::default(),
        extras: Default::default(),
        indices: Some(accessors.indices.as_json_index()),
        material: None,
        mode: Valid(json::mesh::Mode::Triangles),
        targets: None,
    };

    let mesh = json::Mesh {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some(name.to_string()),
        primitives: vec![primitive],
        weights: None,
    };

    let node = json::Node {
        camera: None,
        children: None,
        extensions: Default::default(),
        extras: Default::default(),
        matrix: None,
        mesh: Some(json::Index::new(0)),
        name: Some(name.to_string()),
        rotation: None,
        scale: None,
        skin: None,
        translation: None,
        weights: None,
    };

    let scene = json::Scene {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some("Scene".to_string()),
        nodes: vec![json::Index::new(0)],
    };

    let buffer = json::Buffer {
        byte_length: (blob.bytes().len() as u64).into(),
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        uri: None,
    };

    json::Root {
        accessors: blob.accessors().to_vec(),
        animations: Vec::new(),
        asset: json::Asset {
            copyright: None,
            extensions: Default::default(),
            extras: Default::default(),
            generator: Some("avaforge".to_string()),
            min_version: None,
            version: "2.0".to_string(),
        },
        buffers: vec![buffer],
        buffer_views: blob.views().to_vec(),
        cameras: Vec::new(),
        extensions: Default::default(),
        extensions_required: Vec::new(),
        extensions_used: Vec::new(),
        extras: Default::default(),
        images: Vec::new(),
        materials: Vec::new(),
        meshes: vec![mesh],
        nodes: vec![node],
        samplers: Vec::new(),
        scene: Some(json::Index::new(0)),
        scenes: vec![scene],
        skins: Vec::new(),
        textures: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_references_single_primitive() {
        let mut blob = BinaryBlob::new();
        let accessors = AvatarAccessors {
            positions: blob
                .push_positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]])
                .unwrap(),
            uvs: blob.push_uvs(&[[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]]),
            normals: blob.push_normals(&[[0.0, 0.0, 1.0]; 3]),
            indices: blob.push_indices(&[0, 1, 2]),
        };
        let root = build_document("Avatar", &blob, &accessors);

        assert_eq!(root.scenes.len(), 1);
        assert_eq!(root.nodes.len(), 1);
        assert_eq!(root.meshes.len(), 1);
        assert_eq!(root.meshes[0].primitives.len(), 1);
        assert_eq!(root.buffers.len(), 1);
        assert_eq!(root.accessors.len(), 4);
        assert_eq!(root.asset.version, "2.0");
        assert!(root.skins.is_empty());
        assert!(root.animations.is_empty());
    }
}
