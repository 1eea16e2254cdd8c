//! Binary blob packing with aligned block offsets
//!
//! All attribute blocks live in a single glTF buffer. Each block starts at
//! the smallest offset that is a multiple of 4 and not before the previous
//! block's end; positions always land at offset 0.

use crate::error::GlbEncodingError;
use gltf_json as json;
use gltf_json::validation::Checked::Valid;

/// Index of an accessor recorded in the blob, for wiring into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorIndex(pub u32);

impl AccessorIndex {
    pub fn as_json_index(&self) -> json::Index<json::Accessor> {
        json::Index::new(self.0)
    }
}

/// Accumulates the BIN-chunk payload plus the bufferViews and accessors
/// describing it.
pub struct BinaryBlob {
    bytes: Vec<u8>,
    views: Vec<json::buffer::View>,
    accessors: Vec<json::Accessor>,
}

impl BinaryBlob {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            views: Vec::new(),
            accessors: Vec::new(),
        }
    }

    /// Raw BIN-chunk payload (unpadded; `assemble_glb` pads the chunk).
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn views(&self) -> &[json::buffer::View] {
        &self.views
    }

    pub fn accessors(&self) -> &[json::Accessor] {
        &self.accessors
    }

    /// Align to 4 bytes and return the offset the next block starts at.
    fn begin_block(&mut self) -> usize {
        while self.bytes.len() % 4 != 0 {
            self.bytes.push(0);
        }
        self.bytes.len()
    }

    fn push_view(
        &mut self,
        offset: usize,
        byte_length: usize,
        target: json::buffer::Target,
    ) -> json::Index<json::buffer::View> {
        self.views.push(json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: (byte_length as u64).into(),
            byte_offset: Some((offset as u64).into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            target: Some(Valid(target)),
        });
        json::Index::new(self.views.len() as u32 - 1)
    }

    fn push_accessor(
        &mut self,
        view: json::Index<json::buffer::View>,
        count: usize,
        component: json::accessor::ComponentType,
        type_: json::accessor::Type,
        bounds: Option<(Vec<f32>, Vec<f32>)>,
    ) -> AccessorIndex {
        let (min, max) = match bounds {
            Some((min, max)) => (
                Some(json::Value::Array(
                    min.into_iter().map(json::Value::from).collect(),
                )),
                Some(json::Value::Array(
                    max.into_iter().map(json::Value::from).collect(),
                )),
            ),
            None => (None, None),
        };
        let index = AccessorIndex(self.accessors.len() as u32);
        self.accessors.push(json::Accessor {
            buffer_view: Some(view),
            byte_offset: Some(0u64.into()),
            count: count.into(),
            component_type: Valid(json::accessor::GenericComponentType(component)),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(type_),
            min,
            max,
            name: None,
            normalized: false,
            sparse: None,
        });
        index
    }

    /// Pack vertex positions with finite-checked min/max bounds.
    ///
    /// A non-finite component here would corrupt the accessor metadata and
    /// with it the whole container, so it is rejected rather than clamped.
    pub fn push_positions(
        &mut self,
        positions: &[[f32; 3]],
    ) -> Result<AccessorIndex, GlbEncodingError> {
        let (min, max) = compute_bounds(positions)?;
        let offset = self.begin_block();
        for pos in positions {
            self.bytes.extend_from_slice(bytemuck::cast_slice(pos));
        }
        let view = self.push_view(
            offset,
            positions.len() * 12,
            json::buffer::Target::ArrayBuffer,
        );
        Ok(self.push_accessor(
            view,
            positions.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec3,
            Some((min.to_vec(), max.to_vec())),
        ))
    }

    /// Pack texture coordinates.
    pub fn push_uvs(&mut self, uvs: &[[f32; 2]]) -> AccessorIndex {
        let offset = self.begin_block();
        for uv in uvs {
            self.bytes.extend_from_slice(bytemuck::cast_slice(uv));
        }
        let view = self.push_view(offset, uvs.len() * 8, json::buffer::Target::ArrayBuffer);
        self.push_accessor(
            view,
            uvs.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec2,
            None,
        )
    }

    /// Pack vertex normals.
    pub fn push_normals(&mut self, normals: &[[f32; 3]]) -> AccessorIndex {
        let offset = self.begin_block();
        for normal in normals {
            self.bytes.extend_from_slice(bytemuck::cast_slice(normal));
        }
        let view = self.push_view(
            offset,
            normals.len() * 12,
            json::buffer::Target::ArrayBuffer,
        );
        self.push_accessor(
            view,
            normals.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec3,
            None,
        )
    }

    /// Pack u16 triangle indices.
    pub fn push_indices(&mut self, indices: &[u16]) -> AccessorIndex {
        let offset = self.begin_block();
        for index in indices {
            self.bytes.extend_from_slice(&index.to_le_bytes());
        }
        let view = self.push_view(
            offset,
            indices.len() * 2,
            json::buffer::Target::ElementArrayBuffer,
        );
        self.push_accessor(
            view,
            indices.len(),
            json::accessor::ComponentType::U16,
            json::accessor::Type::Scalar,
            None,
        )
    }
}

impl Default for BinaryBlob {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned bounding box over all positions, rejecting non-finite input.
pub fn compute_bounds(positions: &[[f32; 3]]) -> Result<([f32; 3], [f32; 3]), GlbEncodingError> {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for (vertex, pos) in positions.iter().enumerate() {
        for axis in 0..3 {
            if !pos[axis].is_finite() {
                return Err(GlbEncodingError::NonFiniteBounds { vertex });
            }
            min[axis] = min[axis].min(pos[axis]);
            max[axis] = max[axis].max(pos[axis]);
        }
    }
    Ok((min, max))
}
