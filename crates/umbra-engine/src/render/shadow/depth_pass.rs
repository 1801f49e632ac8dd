use crate::scene::Vertex;

use super::renderer::GpuObject;
use super::{ShadowMap, ShadowSettings};

/// Depth-only pass rendering the scene from the light into the shadow map.
pub(super) struct DepthPass {
    pipeline: wgpu::RenderPipeline,
}

impl DepthPass {
    pub(super) fn new(
        device: &wgpu::Device,
        object_bgl: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        settings: &ShadowSettings,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("umbra depth shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/depth.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("umbra depth pipeline layout"),
            bind_group_layouts: &[object_bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("umbra depth pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            // No color output: only depth is written.
            fragment: None,

            // Culling front faces stores the back side of closed meshes,
            // which keeps lit surfaces from shadowing themselves.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Front),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: settings.depth_bias(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        Self { pipeline }
    }

    /// Clears the shadow map to the far plane and draws every object with its
    /// light-space MVP.
    pub(super) fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        shadow_map: &ShadowMap,
        objects: &[GpuObject],
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("umbra depth pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: shadow_map.view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let size = shadow_map.size() as f32;
        rpass.set_viewport(0.0, 0.0, size, size, 0.0, 1.0);
        rpass.set_pipeline(&self.pipeline);

        for object in objects.iter().filter(|o| o.vertex_count > 0) {
            rpass.set_bind_group(0, &object.bind_group, &[]);
            rpass.set_vertex_buffer(0, object.vbo.slice(..));
            rpass.draw(0..object.vertex_count, 0..1);
        }
    }
}
