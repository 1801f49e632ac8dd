use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget, Viewport};
use crate::scene::{Light, Scene};

use super::depth_pass::DepthPass;
use super::lit_pass::LitPass;
use super::uniforms::{LightUniform, ObjectUniform};
use super::{ShadowMap, ShadowSettings, DEPTH_FORMAT};

/// GPU resources of one scene object: vertex buffer plus its uniform binding.
pub(super) struct GpuObject {
    pub vbo: wgpu::Buffer,
    pub vertex_count: u32,
    pub ubo: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

/// Window-sized depth buffer of the lit pass.
struct DepthTarget {
    view: wgpu::TextureView,
    viewport: Viewport,
}

/// Two-pass shadow-mapping renderer.
///
/// All GPU resources are created on the first frame. The lit pipeline follows
/// the surface format and the camera depth buffer follows the viewport.
#[derive(Default)]
pub struct ShadowRenderer {
    settings: ShadowSettings,

    object_bgl: Option<wgpu::BindGroupLayout>,
    frame_bgl: Option<wgpu::BindGroupLayout>,

    shadow_map: Option<ShadowMap>,
    depth_pass: Option<DepthPass>,

    lit_pass_format: Option<wgpu::TextureFormat>,
    lit_pass: Option<LitPass>,

    light_ubo: Option<wgpu::Buffer>,
    frame_bind_group: Option<wgpu::BindGroup>,

    objects: Vec<GpuObject>,
    depth_target: Option<DepthTarget>,
}

impl ShadowRenderer {
    pub fn new(settings: ShadowSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Records the depth pass and then the lit pass for `scene` under `light`.
    ///
    /// The color target must already be cleared; the lit pass loads it.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &Scene,
        light: &Light,
    ) {
        if !ctx.viewport.is_valid() {
            return;
        }

        self.ensure_layouts(ctx);
        self.ensure_shadow_map(ctx);
        self.ensure_pipelines(ctx);
        self.ensure_frame_bindings(ctx);
        self.ensure_objects(ctx, scene);
        self.ensure_depth_target(ctx);

        self.write_uniforms(ctx, scene, light);

        let Some(shadow_map) = self.shadow_map.as_ref() else { return };
        let Some(depth_pass) = self.depth_pass.as_ref() else { return };
        let Some(lit_pass) = self.lit_pass.as_ref() else { return };
        let Some(frame_bind_group) = self.frame_bind_group.as_ref() else { return };
        let Some(depth_target) = self.depth_target.as_ref() else { return };

        depth_pass.record(target.encoder, shadow_map, &self.objects);
        lit_pass.record(
            target.encoder,
            target.color_view,
            &depth_target.view,
            frame_bind_group,
            &self.objects,
        );
    }

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.object_bgl.is_none() {
            self.object_bgl = Some(ObjectUniform::bind_group_layout(ctx.device));
        }
        if self.frame_bgl.is_none() {
            self.frame_bgl = Some(LightUniform::bind_group_layout(ctx.device));
        }
    }

    fn ensure_shadow_map(&mut self, ctx: &RenderCtx<'_>) {
        if self.shadow_map.is_some() {
            return;
        }
        self.shadow_map = Some(ShadowMap::new(ctx, &self.settings));
        self.frame_bind_group = None;
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        let Some(object_bgl) = self.object_bgl.as_ref() else { return };
        let Some(frame_bgl) = self.frame_bgl.as_ref() else { return };
        let Some(shadow_map) = self.shadow_map.as_ref() else { return };

        if self.depth_pass.is_none() {
            self.depth_pass = Some(DepthPass::new(
                ctx.device,
                object_bgl,
                shadow_map.format(),
                &self.settings,
            ));
        }

        if self.lit_pass_format == Some(ctx.surface_format) && self.lit_pass.is_some() {
            return;
        }
        self.lit_pass = Some(LitPass::new(
            ctx.device,
            ctx.surface_format,
            frame_bgl,
            object_bgl,
        ));
        self.lit_pass_format = Some(ctx.surface_format);
    }

    fn ensure_frame_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.frame_bind_group.is_some() && self.light_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.frame_bgl.as_ref() else { return };
        let Some(shadow_map) = self.shadow_map.as_ref() else { return };

        let light_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("umbra light ubo"),
            size: std::mem::size_of::<LightUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("umbra frame bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: light_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(shadow_map.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(shadow_map.sampler()),
                },
            ],
        });

        self.light_ubo = Some(light_ubo);
        self.frame_bind_group = Some(bind_group);
    }

    /// Uploads every mesh once. The scene is fixed, so a matching object count
    /// means the buffers are current.
    fn ensure_objects(&mut self, ctx: &RenderCtx<'_>, scene: &Scene) {
        if self.objects.len() == scene.objects().len() {
            return;
        }
        let Some(bgl) = self.object_bgl.as_ref() else { return };

        self.objects = scene
            .objects()
            .iter()
            .map(|object| {
                let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(object.name),
                    contents: bytemuck::cast_slice(&object.mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });

                let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("umbra object ubo"),
                    size: std::mem::size_of::<ObjectUniform>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });

                let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("umbra object bind group"),
                    layout: bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: ubo.as_entire_binding(),
                    }],
                });

                GpuObject {
                    vbo,
                    vertex_count: object.vertex_count(),
                    ubo,
                    bind_group,
                }
            })
            .collect();

        log::debug!("uploaded {} scene objects", self.objects.len());
    }

    fn ensure_depth_target(&mut self, ctx: &RenderCtx<'_>) {
        if self
            .depth_target
            .as_ref()
            .is_some_and(|t| t.viewport == ctx.viewport)
        {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("umbra depth buffer"),
            size: wgpu::Extent3d {
                width: ctx.viewport.width.max(1),
                height: ctx.viewport.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.depth_target = Some(DepthTarget {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            viewport: ctx.viewport,
        });
    }

    fn write_uniforms(&self, ctx: &RenderCtx<'_>, scene: &Scene, light: &Light) {
        if let Some(ubo) = self.light_ubo.as_ref() {
            let u = LightUniform::new(light, scene.camera());
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }

        for (gpu, object) in self.objects.iter().zip(scene.objects()) {
            let u = ObjectUniform::new(object, light);
            ctx.queue.write_buffer(&gpu.ubo, 0, bytemuck::bytes_of(&u));
        }
    }
}
