use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Number of scene constant buffers written in rotation.
pub const SCENE_SLOTS: usize = 2;

/// World transform of the cube (binding 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct WorldMatrixBuffer {
    pub world: [[f32; 4]; 4],
}

impl WorldMatrixBuffer {
    pub fn new(world: Mat4) -> Self {
        Self {
            world: world.to_cols_array_2d(),
        }
    }
}

impl Default for WorldMatrixBuffer {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

/// Combined view-projection (binding 1).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneMatrixBuffer {
    pub view_proj: [[f32; 4]; 4],
}

impl SceneMatrixBuffer {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

/// Picks which scene buffer the next frame writes.
///
/// The slot written for frame N is the one bound for frame N's draw, and frame
/// N+1 writes the other one, so the CPU never rewrites a buffer the previous
/// frame's draw may still read.
#[derive(Debug, Default, Copy, Clone)]
pub struct SlotCursor {
    frames: u64,
}

impl SlotCursor {
    pub fn next_slot(&mut self) -> usize {
        let slot = (self.frames % SCENE_SLOTS as u64) as usize;
        self.frames = self.frames.wrapping_add(1);
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_buffers_are_64_bytes() {
        assert_eq!(std::mem::size_of::<WorldMatrixBuffer>(), 64);
        assert_eq!(std::mem::size_of::<SceneMatrixBuffer>(), 64);
    }

    #[test]
    fn world_buffer_starts_as_identity() {
        let w = WorldMatrixBuffer::default();
        assert_eq!(Mat4::from_cols_array_2d(&w.world), Mat4::IDENTITY);
    }

    #[test]
    fn scene_matrix_keeps_column_major_layout() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let s = SceneMatrixBuffer::new(m);
        assert_eq!(s.view_proj[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn cursor_alternates_slots() {
        let mut cursor = SlotCursor::default();
        let slots: Vec<usize> = (0..5).map(|_| cursor.next_slot()).collect();
        assert_eq!(slots, vec![0, 1, 0, 1, 0]);
    }
}
