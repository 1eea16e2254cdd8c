//! GLB container assembly
//!
//! Byte layout:
//! ```text
//! 0x00: magic 'glTF' (0x46546C67 LE)
//! 0x04: version u32 = 2
//! 0x08: totalLength u32 (entire file, exact)
//! 0x0C: JSON chunk: length u32 (padding included), type 'JSON', payload
//!       padded to a 4-byte boundary with ASCII spaces
//! var:  BIN chunk: length u32 (padding included), type 'BIN\0', payload
//!       padded to a 4-byte boundary with zero bytes
//! ```
//! All integers little-endian.

use crate::error::GlbEncodingError;
use gltf_json as json;

/// 'glTF' magic, little-endian.
pub const GLB_MAGIC: u32 = 0x4654_6C67;

const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

/// Length after padding to the next 4-byte boundary.
pub fn padded_len(len: usize) -> usize {
    len + (4 - (len % 4)) % 4
}

/// Serialize the document and assemble the final GLB byte buffer.
pub fn assemble_glb(root: &json::Root, bin: &[u8]) -> Result<Vec<u8>, GlbEncodingError> {
    let json_string = json::serialize::to_string(root)?;
    let json_bytes = json_string.as_bytes();

    let json_chunk_len = padded_len(json_bytes.len());
    let bin_chunk_len = padded_len(bin.len());
    let total_len = 12 + 8 + json_chunk_len + 8 + bin_chunk_len;

    let mut out = Vec::with_capacity(total_len);

    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total_len as u32).to_le_bytes());

    out.extend_from_slice(&(json_chunk_len as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(json_bytes);
    out.resize(out.len() + json_chunk_len - json_bytes.len(), 0x20);

    out.extend_from_slice(&(bin_chunk_len as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(bin);
    out.resize(out.len() + bin_chunk_len - bin.len(), 0);

    // The declared length is a hard contract with downstream parsers.
    if out.len() != total_len {
        return Err(GlbEncodingError::LengthMismatch {
            declared: total_len,
            actual: out.len(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::BinaryBlob;
    use crate::document::{AvatarAccessors, build_document};

    fn sample_glb() -> Vec<u8> {
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
        assemble_glb(&root, blob.bytes()).unwrap()
    }

    #[test]
    fn padded_len_rounds_up() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 4);
        assert_eq!(padded_len(4), 4);
        assert_eq!(padded_len(6), 8);
    }

    #[test]
    fn header_fields_round_trip() {
        let glb = sample_glb();
        let magic = u32::from_le_bytes(glb[0..4].try_into().unwrap());
        let version = u32::from_le_bytes(glb[4..8].try_into().unwrap());
        let total = u32::from_le_bytes(glb[8..12].try_into().unwrap());
        assert_eq!(magic, GLB_MAGIC);
        assert_eq!(version, 2);
        assert_eq!(total as usize, glb.len());
    }

    #[test]
    fn chunk_lengths_are_multiples_of_four() {
        let glb = sample_glb();
        let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
        assert_eq!(json_len % 4, 0);
        assert_eq!(&glb[16..20], b"JSON");

        let bin_header = 20 + json_len;
        let bin_len =
            u32::from_le_bytes(glb[bin_header..bin_header + 4].try_into().unwrap()) as usize;
        assert_eq!(bin_len % 4, 0);
        assert_eq!(&glb[bin_header + 4..bin_header + 8], b"BIN\0");
        assert_eq!(bin_header + 8 + bin_len, glb.len());
    }

    #[test]
    fn json_padding_is_ascii_space() {
        let glb = sample_glb();
        let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
        let payload = &glb[20..20 + json_len];
        // Trailing padding, if any, must be spaces so the JSON stays valid.
        assert!(payload.iter().rev().take_while(|&&b| b == 0x20).count() < 4);
        let text = std::str::from_utf8(payload).unwrap();
        assert!(text.trim_end().ends_with('}'));
    }
}
