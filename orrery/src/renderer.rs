//! Rendering system for the orrery

use std::f64::consts::TAU;
use std::ops::Range;

use common::{
    create_depth_texture, create_uniform_buffer, linear_rgb_from_hex, resolve_asset_path,
    srgb8_from_hex, Camera3D, GpuMesh, GraphicsContext, Mesh, MeshVertex, Texture, DEPTH_FORMAT,
};
use glam::{Mat4, Quat, Vec3};

use crate::config::{LightingConfig, SceneConfig};
use crate::simulation::SolarSystem;

/// Fallback texel for a star whose texture is missing
const STAR_FALLBACK: [u8; 4] = [255, 255, 0, 255];
/// Fallback texel for a planet whose texture is missing
const PLANET_FALLBACK: [u8; 4] = [128, 128, 128, 255];

/// Camera and lighting uniform
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    /// Linear ambient colour premultiplied by intensity
    pub ambient: [f32; 4],
    /// xyz position, w range
    pub light_position: [f32; 4],
    /// Linear point light colour premultiplied by intensity
    pub light_color: [f32; 4],
}

impl SceneUniform {
    pub fn new(camera: &Camera3D, lighting: &LightingConfig) -> Self {
        let [ar, ag, ab] = linear_rgb_from_hex(lighting.ambient_color);
        let [lr, lg, lb] = linear_rgb_from_hex(lighting.point_color);
        let ai = lighting.ambient_intensity;
        let li = lighting.point_intensity;
        let [px, py, pz] = lighting.point_position;

        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
            ambient: [ar * ai, ag * ai, ab * ai, 1.0],
            light_position: [px, py, pz, lighting.point_range],
            light_color: [lr * li, lg * li, lb * li, 1.0],
        }
    }
}

/// Per-body instance data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub model: [[f32; 4]; 4],
    /// 0 draws the texture as-is (the sun), 1 applies lighting
    pub lit: u32,
    pub _padding: [u32; 3],
}

impl BodyInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Uint32,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }

    /// `spin` may be any accumulated angle; it is wrapped before narrowing to `f32`
    pub fn new(position: Vec3, radius: f32, spin: f64, lit: bool) -> Self {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(radius),
            Quat::from_rotation_y(spin.rem_euclid(TAU) as f32),
            position,
        );

        Self {
            model: model.to_cols_array_2d(),
            lit: u32::from(lit),
            _padding: [0; 3],
        }
    }
}

/// Instances in draw order: the star, then each planet, then each moon
pub fn body_instances(system: &SolarSystem) -> Vec<BodyInstance> {
    let star = std::iter::once(BodyInstance::new(
        Vec3::ZERO,
        system.star.radius,
        system.sun_spin,
        false,
    ));

    let planets = system
        .bodies
        .iter()
        .map(|state| BodyInstance::new(state.position, state.body.radius, state.spin, true));

    let moons = system
        .moons
        .iter()
        .map(|moon| BodyInstance::new(moon.position, moon.satellite.radius, 0.0, true));

    star.chain(planets).chain(moons).collect()
}

pub struct Renderer {
    pipeline: wgpu::RenderPipeline,

    sphere: GpuMesh,
    moon_sphere: GpuMesh,
    instance_buffer: wgpu::Buffer,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    /// One per instance, in draw order
    materials: Vec<wgpu::BindGroup>,

    depth_texture: wgpu::TextureView,

    lighting: LightingConfig,
    instance_count: u32,
    /// Instances from here on are moons
    first_moon: u32,
}

impl Renderer {
    pub fn new(ctx: &GraphicsContext, system: &SolarSystem, config: &SceneConfig) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Orrery Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/orrery.wgsl").into()),
        });

        let camera = Camera3D::new(ctx.aspect_ratio());
        let scene_buffer =
            create_uniform_buffer(device, &SceneUniform::new(&camera, &config.lighting));

        let scene_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let texture_bind_group_layout = Texture::bind_group_layout(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &[&scene_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Body Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_body",
                buffers: &[MeshVertex::layout(), BodyInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_body",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let sphere = Mesh::uv_sphere(32, 32).upload(device, "Body Sphere");
        let moon_sphere = Mesh::uv_sphere(16, 16).upload(device, "Moon Sphere");

        let instance_count = 1 + system.bodies.len() + system.moons.len();
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (std::mem::size_of::<BodyInstance>() * instance_count) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Materials, in the same order as `body_instances`
        let root = &config.assets.root;
        let mut textures = Vec::with_capacity(instance_count);
        textures.push(Texture::load_or_solid(
            device,
            &ctx.queue,
            &resolve_asset_path(root, system.star.texture_ref),
            STAR_FALLBACK,
        ));
        for state in &system.bodies {
            textures.push(Texture::load_or_solid(
                device,
                &ctx.queue,
                &resolve_asset_path(root, state.body.texture_ref),
                PLANET_FALLBACK,
            ));
        }
        for moon in &system.moons {
            let [r, g, b] = srgb8_from_hex(moon.satellite.color);
            textures.push(Texture::solid(device, &ctx.queue, [r, g, b, 255], moon.satellite.name));
        }

        let materials = textures
            .iter()
            .map(|t| t.bind_group(device, &texture_bind_group_layout))
            .collect();

        let depth_texture = create_depth_texture(device, ctx.size.width, ctx.size.height);

        log::info!(
            "Renderer ready: {} bodies, {} moons",
            system.bodies.len(),
            system.moons.len()
        );

        Self {
            pipeline,
            sphere,
            moon_sphere,
            instance_buffer,
            scene_buffer,
            scene_bind_group,
            materials,
            depth_texture,
            lighting: config.lighting.clone(),
            instance_count: instance_count as u32,
            first_moon: (1 + system.bodies.len()) as u32,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = create_depth_texture(device, width, height);
    }

    /// Upload camera, lighting and body transforms for this frame
    pub fn update(&mut self, queue: &wgpu::Queue, camera: &Camera3D, system: &SolarSystem) {
        let scene_uniform = SceneUniform::new(camera, &self.lighting);
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[scene_uniform]));

        let instances = body_instances(system);
        let count = instances.len().min(self.materials.len());
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&instances[..count]),
        );
        self.instance_count = count as u32;
    }

    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.scene_bind_group, &[]);
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

        let first_moon = self.first_moon.min(self.instance_count);
        Self::draw_range(&mut pass, &self.sphere, &self.materials, 0..first_moon);
        Self::draw_range(
            &mut pass,
            &self.moon_sphere,
            &self.materials,
            first_moon..self.instance_count,
        );
    }

    /// Draw `instances` with `mesh`, binding each instance's own material
    fn draw_range<'a>(
        pass: &mut wgpu::RenderPass<'a>,
        mesh: &'a GpuMesh,
        materials: &'a [wgpu::BindGroup],
        instances: Range<u32>,
    ) {
        if instances.is_empty() {
            return;
        }

        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for i in instances {
            pass.set_bind_group(1, &materials[i as usize], &[]);
            pass.draw_indexed(0..mesh.index_count, 0, i..i + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{MOON, SUN};

    fn translation(instance: &BodyInstance) -> Vec3 {
        Mat4::from_cols_array_2d(&instance.model).w_axis.truncate()
    }

    #[test]
    fn test_instance_layout_size() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 80);
        assert_eq!(std::mem::size_of::<SceneUniform>(), 128);
    }

    #[test]
    fn test_instances_in_draw_order() {
        let system = SolarSystem::default();
        let instances = body_instances(&system);

        assert_eq!(instances.len(), 1 + 8 + 1);
        assert_eq!(instances[0].lit, 0);
        assert!(instances[1..].iter().all(|i| i.lit == 1));
    }

    #[test]
    fn test_instances_follow_simulation() {
        let mut system = SolarSystem::default();
        system.advance(42);
        let instances = body_instances(&system);

        assert_eq!(translation(&instances[0]), Vec3::ZERO);
        for (instance, state) in instances[1..9].iter().zip(&system.bodies) {
            assert!((translation(instance) - state.position).length() < 1e-3);
        }
        assert!((translation(&instances[9]) - system.moons[0].position).length() < 1e-3);
    }

    #[test]
    fn test_instance_scale_is_radius() {
        let system = SolarSystem::default();
        let instances = body_instances(&system);

        let (sun_scale, _, _) =
            Mat4::from_cols_array_2d(&instances[0].model).to_scale_rotation_translation();
        assert!((sun_scale - Vec3::splat(SUN.radius)).length() < 1e-4);

        let (moon_scale, _, _) =
            Mat4::from_cols_array_2d(&instances[9].model).to_scale_rotation_translation();
        assert!((moon_scale - Vec3::splat(MOON.radius)).length() < 1e-4);
    }

    #[test]
    fn test_large_spin_wraps_before_narrowing() {
        let turns = 10_000.0 * TAU;
        let a = BodyInstance::new(Vec3::ZERO, 1.0, turns + 0.5, true);
        let b = BodyInstance::new(Vec3::ZERO, 1.0, 0.5, true);

        let ma = Mat4::from_cols_array_2d(&a.model);
        let mb = Mat4::from_cols_array_2d(&b.model);
        assert!(ma.abs_diff_eq(mb, 1e-4));
    }

    #[test]
    fn test_scene_uniform_premultiplies_intensity() {
        let camera = Camera3D::new(1.0);
        let uniform = SceneUniform::new(&camera, &LightingConfig::default());

        assert!((uniform.light_color[0] - 3.0).abs() < 1e-6);
        // 0x888888 decodes to about 0.246 linear before the 1.5 intensity
        assert!((uniform.ambient[0] - 1.5 * 0.2462).abs() < 2e-3);
        assert_eq!(uniform.light_position, [0.0, 0.0, 0.0, 2000.0]);
    }
}
