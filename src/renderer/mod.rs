//! Draws a [`FrameSnapshot`] with one instanced icosphere pipeline.
//!
//! Every body is a scaled unit sphere. Three pipeline variants share the
//! shader: the starfield shell is drawn from the inside (front faces
//! culled), opaque bodies write depth, and the cloud layer is alpha
//! blended on top without writing depth.

pub mod instances;
pub mod mesh;

use wgpu::util::DeviceExt;

use self::instances::{
    frame_instances, placeholder_materials, static_instances, BodyInstance,
};
use self::mesh::{icosphere, MeshVertex};
use crate::camera::{Camera, CameraUniform};
use crate::gpu::render_context::DEPTH_FORMAT;
use crate::gpu::{FrameAcquire, InstanceBuffer, RenderContext};
use crate::scene::{FrameSnapshot, Light, StaticBodies};

/// Icosphere subdivision level (320 triangles at level 2, 1280 at 3).
const SUBDIVISIONS: u32 = 3;

/// Initial room for per-frame instances (planet, comet, labels, path).
const DYNAMIC_CAPACITY: usize = 128;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Camera plus light, bound at group 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniform {
    camera: CameraUniform,
    /// xyz: direction the light travels, w: intensity.
    light: [f32; 4],
}

impl SceneUniform {
    fn new(camera: &Camera, light: &Light) -> Self {
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(camera);
        Self {
            camera: camera_uniform,
            light: light.direction().extend(light.intensity).to_array(),
        }
    }
}

/// Which face culling and blending a pipeline variant uses.
#[derive(Clone, Copy)]
enum Variant {
    Shell,
    Opaque,
    Translucent,
}

impl Variant {
    fn label(self) -> &'static str {
        match self {
            Self::Shell => "Starfield Shell Pipeline",
            Self::Opaque => "Opaque Body Pipeline",
            Self::Translucent => "Translucent Body Pipeline",
        }
    }

    fn cull_mode(self) -> wgpu::Face {
        match self {
            Self::Shell => wgpu::Face::Front,
            Self::Opaque | Self::Translucent => wgpu::Face::Back,
        }
    }

    fn blend(self) -> Option<wgpu::BlendState> {
        match self {
            Self::Translucent => Some(wgpu::BlendState::ALPHA_BLENDING),
            Self::Shell | Self::Opaque => None,
        }
    }

    fn depth_write(self) -> bool {
        !matches!(self, Self::Translucent)
    }
}

/// Owns the GPU resources for drawing the scene.
pub struct SceneRenderer {
    shell_pipeline: wgpu::RenderPipeline,
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    static_instances: InstanceBuffer<BodyInstance>,
    opaque_instances: InstanceBuffer<BodyInstance>,
    translucent_instances: InstanceBuffer<BodyInstance>,
    bodies: StaticBodies,
}

impl SceneRenderer {
    /// Build pipelines and upload the mesh and static bodies.
    #[must_use]
    pub fn new(context: &RenderContext, bodies: &StaticBodies) -> Self {
        let device = &context.device;
        let mesh = icosphere(SUBDIVISIONS);

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Icosphere Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Icosphere Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform Buffer"),
            size: size_of::<SceneUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Uniform Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let uniform_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Scene Uniform Bind Group"),
                layout: &uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Bodies Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../assets/shaders/bodies.wgsl").into(),
            ),
        });
        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Bodies Pipeline Layout"),
                bind_group_layouts: &[&uniform_layout],
                push_constant_ranges: &[],
            });
        let pipeline = |variant| {
            create_pipeline(
                device,
                &pipeline_layout,
                &shader,
                context.format(),
                variant,
            )
        };

        for (texture, color) in placeholder_materials(&bodies.textures) {
            log::debug!("{texture}: drawn with placeholder colour {color:?}");
        }

        let statics = static_instances(bodies);
        let mut static_buffer =
            InstanceBuffer::new(device, "Static Instances", statics.len());
        static_buffer.write(device, &context.queue, &statics);

        Self {
            shell_pipeline: pipeline(Variant::Shell),
            opaque_pipeline: pipeline(Variant::Opaque),
            translucent_pipeline: pipeline(Variant::Translucent),
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            static_instances: static_buffer,
            opaque_instances: InstanceBuffer::new(
                device,
                "Opaque Instances",
                DYNAMIC_CAPACITY,
            ),
            translucent_instances: InstanceBuffer::new(
                device,
                "Translucent Instances",
                1,
            ),
            bodies: bodies.clone(),
        }
    }

    /// Draw one frame seen through `camera` and present it.
    pub fn render(
        &mut self,
        context: &mut RenderContext,
        snapshot: &FrameSnapshot,
        camera: &Camera,
    ) {
        let uniform = SceneUniform::new(camera, &self.bodies.light);
        context.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );

        let frame = frame_instances(&self.bodies, snapshot);
        self.opaque_instances
            .write(&context.device, &context.queue, &frame.opaque);
        self.translucent_instances
            .write(&context.device, &context.queue, &frame.translucent);

        let output = match context.acquire_frame() {
            FrameAcquire::Ready(output) => output,
            FrameAcquire::Reconfigured | FrameAcquire::Skipped => return,
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Render Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: context.depth_view(),
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(
                self.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );

            // Shell is instance 0 of the static buffer, stars follow.
            let statics = self.static_instances.len();
            pass.set_vertex_buffer(1, self.static_instances.slice());
            pass.set_pipeline(&self.shell_pipeline);
            pass.draw_indexed(0..self.index_count, 0, 0..statics.min(1));
            pass.set_pipeline(&self.opaque_pipeline);
            pass.draw_indexed(0..self.index_count, 0, statics.min(1)..statics);

            if !self.opaque_instances.is_empty() {
                pass.set_vertex_buffer(1, self.opaque_instances.slice());
                pass.draw_indexed(
                    0..self.index_count,
                    0,
                    0..self.opaque_instances.len(),
                );
            }
            if !self.translucent_instances.is_empty() {
                pass.set_pipeline(&self.translucent_pipeline);
                pass.set_vertex_buffer(1, self.translucent_instances.slice());
                pass.draw_indexed(
                    0..self.index_count,
                    0,
                    0..self.translucent_instances.len(),
                );
            }
        }
        context.submit(encoder);
        output.present();
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    variant: Variant,
) -> wgpu::RenderPipeline {
    let vertex_layout = wgpu::VertexBufferLayout {
        array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };
    // Model matrix as four columns, then colour and material.
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: size_of::<BodyInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x4,
        ],
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(variant.label()),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout, instance_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: variant.blend(),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: Some(variant.cull_mode()),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: variant.depth_write(),
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_uniform_is_std140_sized() {
        assert_eq!(size_of::<CameraUniform>(), 96);
        assert_eq!(size_of::<SceneUniform>(), 112);
        assert_eq!(size_of::<BodyInstance>(), 96);
    }

    #[test]
    fn uniform_carries_light_direction_and_intensity() {
        let camera = Camera::from_state(
            crate::camera::CameraState {
                position: glam::Vec3::new(0.0, 0.0, 30.0),
                look_target: glam::Vec3::ZERO,
            },
            &crate::options::CameraOptions::default(),
            1.0,
        );
        let light = Light {
            position: glam::Vec3::new(0.0, 0.0, 500.0),
            intensity: 2.0,
        };
        let uniform = SceneUniform::new(&camera, &light);
        assert_eq!(uniform.light, [0.0, 0.0, -1.0, 2.0]);
        assert_eq!(uniform.camera.position, [0.0, 0.0, 30.0]);
    }
}
