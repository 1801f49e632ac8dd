use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Vertex layout shared by every mesh (40 bytes):
///
///  offset  0  position  [f32; 3]   loc 0
///  offset 12  normal    [f32; 3]   loc 1
///  offset 24  color     [f32; 4]   loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x4  // color
    ];

    #[inline]
    pub fn new(position: Vec3, normal: Vec3, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: color.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
