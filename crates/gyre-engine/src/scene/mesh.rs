use bytemuck::{Pod, Zeroable};

/// Cube vertex: position plus packed RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Unorm8x4   // color
    ];

    /// Buffer layout matching the vertex shader's `@location(0)` / `@location(1)` inputs.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(x: f32, y: f32, z: f32, rgb: u32) -> Vertex {
    Vertex {
        position: [x, y, z],
        color: [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 0xff],
    }
}

pub const CUBE_VERTICES: [Vertex; 8] = [
    v(-1.0, 1.0, -1.0, 0xff00ff),
    v(1.0, 1.0, -1.0, 0x00ffff),
    v(1.0, 1.0, 1.0, 0xffff00),
    v(-1.0, 1.0, 1.0, 0x00ff00),
    v(-1.0, -1.0, -1.0, 0xff0000),
    v(1.0, -1.0, -1.0, 0x0000ff),
    v(1.0, -1.0, 1.0, 0xffffff),
    v(-1.0, -1.0, 1.0, 0xff80ff),
];

/// Two clockwise triangles per face.
#[rustfmt::skip]
pub const CUBE_INDICES: [u16; 36] = [
    3, 1, 0,  2, 1, 3, // top
    0, 5, 4,  1, 5, 0, // front
    3, 4, 7,  0, 4, 3, // left
    1, 6, 5,  2, 6, 1, // right
    2, 7, 6,  3, 7, 2, // back
    6, 4, 5,  7, 4, 6, // bottom
];

/// 64-bit FNV-1a over the little-endian bytes of the vertices, then the indices.
pub fn checksum() -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    let mut feed = |bytes: &[u8]| {
        for b in bytes {
            hash ^= u64::from(*b);
            hash = hash.wrapping_mul(PRIME);
        }
    };

    for vertex in &CUBE_VERTICES {
        for p in vertex.position {
            feed(&p.to_le_bytes());
        }
        feed(&vertex.color);
    }
    for index in CUBE_INDICES {
        feed(&index.to_le_bytes());
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_matches_known_checksum() {
        assert_eq!(checksum(), 0xf425_e0f7_2498_c001);
    }

    #[test]
    fn vertex_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 16);
        assert_eq!(Vertex::layout().array_stride, 16);
        assert_eq!(Vertex::layout().attributes[1].offset, 12);
    }

    #[test]
    fn colors_pack_as_rgba_bytes() {
        assert_eq!(CUBE_VERTICES[0].color, [0xff, 0x00, 0xff, 0xff]);
        assert_eq!(CUBE_VERTICES[7].color, [0xff, 0x80, 0xff, 0xff]);
    }

    #[test]
    fn indices_reference_every_vertex() {
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
        for v in 0..CUBE_VERTICES.len() as u16 {
            assert!(CUBE_INDICES.contains(&v), "vertex {v} unused");
        }
    }

    #[test]
    fn triangles_are_not_degenerate() {
        for tri in CUBE_INDICES.chunks_exact(3) {
            assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
        }
    }
}
