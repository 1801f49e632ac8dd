//! GPU-side uniform layouts shared by both passes.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::scene::{Camera, Light, Renderable};

/// Per-object uniform (320 bytes), bound at group 0 in the depth pass and
/// group 1 in the lit pass.
///
///  offset   0  mvp           camera projection * view * model
///  offset  64  model_view    camera view * model
///  offset 128  normal        inverse-transpose of model_view's 3x3, padded to 4x4
///  offset 192  shadow        bias * light projection * light view * model
///  offset 256  light_mvp     light projection * light view * model
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ObjectUniform {
    pub mvp: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub shadow: [[f32; 4]; 4],
    pub light_mvp: [[f32; 4]; 4],
}

impl ObjectUniform {
    pub(super) fn new(object: &Renderable, light: &Light) -> Self {
        let model = object.model();
        Self {
            mvp: object.mvp().to_cols_array_2d(),
            model_view: object.model_view().to_cols_array_2d(),
            normal: Mat4::from_mat3(object.normal_matrix()).to_cols_array_2d(),
            shadow: light.shadow_matrix_for(model).to_cols_array_2d(),
            light_mvp: (light.view_projection() * model).to_cols_array_2d(),
        }
    }

    pub(super) fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("umbra object bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<Self>() as u64),
                },
                count: None,
            }],
        })
    }
}

/// Per-frame light uniform (32 bytes), bound at group 0 in the lit pass.
///
/// The position is in camera view space, the space the lit pass shades in.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct LightUniform {
    pub position: [f32; 4],
    pub intensity: [f32; 4],
}

impl LightUniform {
    pub(super) fn new(light: &Light, camera: &Camera) -> Self {
        let position: Vec3 = camera.view().transform_point3(light.position());
        Self {
            position: position.extend(1.0).to_array(),
            intensity: light.intensity().extend(0.0).to_array(),
        }
    }

    /// Layout of the lit pass' frame group: light uniform, shadow map, sampler.
    pub(super) fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("umbra frame bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(std::mem::size_of::<Self>() as u64),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        })
    }
}
