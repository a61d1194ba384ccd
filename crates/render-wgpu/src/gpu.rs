use crate::RenderError;
use crate::shaders;
use crate::texture::{self, GpuTexture};
use bytemuck::{Pod, Zeroable};
use deskscene_assets::DecodedTexture;
use deskscene_common::{TextureSlot, Vertex};
use deskscene_render::{Frame, Pipeline};
use deskscene_scene::MeshKind;
use glam::{Mat3, Mat4};
use std::collections::HashMap;
use wgpu::util::DeviceExt;

/// Upper bound on draws per frame. The desk scene issues 39.
const MAX_DRAWS: u32 = 256;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    light_color: [f32; 4],
    light_position: [f32; 4],
    view_position: [f32; 4],
    object_color: [f32; 4],
    material: [f32; 4],
}

impl Uniforms {
    fn from_frame(frame: &Frame) -> Self {
        let lighting = &frame.lighting;
        Self {
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection_matrix.to_cols_array_2d(),
            light_color: lighting.light_color.extend(1.0).to_array(),
            light_position: lighting.light_position.extend(1.0).to_array(),
            view_position: frame.view_position.extend(1.0).to_array(),
            object_color: lighting.object_color.extend(1.0).to_array(),
            material: [
                lighting.ambient_strength,
                lighting.specular_strength,
                lighting.shininess,
                0.0,
            ],
        }
    }
}

/// Per-draw model matrix and its normal matrix, fed as an instance stream.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    normal_0: [f32; 4],
    normal_1: [f32; 4],
    normal_2: [f32; 4],
}

impl InstanceData {
    fn from_model(model: Mat4) -> Self {
        let cols = model.to_cols_array_2d();
        let normal = normal_matrix(model);
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            normal_0: normal.x_axis.extend(0.0).to_array(),
            normal_1: normal.y_axis.extend(0.0).to_array(),
            normal_2: normal.z_axis.extend(0.0).to_array(),
        }
    }
}

/// Inverse-transpose of the upper 3x3, so non-uniform scale keeps normals perpendicular.
fn normal_matrix(model: Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(model);
    if linear.determinant().abs() <= f32::EPSILON {
        return Mat3::IDENTITY;
    }
    linear.inverse().transpose()
}

struct GpuMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// Draws a composed `Frame` with the lit and lamp programs.
pub struct WgpuRenderer {
    lit_pipeline: wgpu::RenderPipeline,
    lamp_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    meshes: HashMap<MeshKind, GpuMesh>,
    textures: Vec<GpuTexture>,
    instance_buffer: wgpu::Buffer,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    /// Build pipelines and upload every mesh and texture.
    ///
    /// `textures` must hold one decoded image per `TextureSlot`, in slot order.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        textures: &[DecodedTexture],
    ) -> Result<Self, RenderError> {
        if textures.len() != TextureSlot::COUNT {
            return Err(RenderError::TextureCount {
                expected: TextureSlot::COUNT,
                actual: textures.len(),
            });
        }

        let max_dimension = device.limits().max_texture_dimension_2d;
        for decoded in textures {
            check_texture_size(decoded, max_dimension)?;
        }

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Capture shader and pipeline validation errors instead of aborting.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let lit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lit_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LIT_SHADER.into()),
        });
        let lit_pipeline = create_pipeline(
            device,
            "lit_pipeline",
            &lit_layout,
            &lit_shader,
            ("vs_main", "fs_main"),
            &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2,
                    ],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceData>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        3 => Float32x4,
                        4 => Float32x4,
                        5 => Float32x4,
                        6 => Float32x4,
                        7 => Float32x4,
                        8 => Float32x4,
                        9 => Float32x4,
                    ],
                },
            ],
            surface_format,
        );

        let lamp_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lamp_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });
        let lamp_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lamp_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LAMP_SHADER.into()),
        });
        let lamp_pipeline = create_pipeline(
            device,
            "lamp_pipeline",
            &lamp_layout,
            &lamp_shader,
            ("vs_lamp", "fs_lamp"),
            &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceData>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        3 => Float32x4,
                        4 => Float32x4,
                        5 => Float32x4,
                        6 => Float32x4,
                    ],
                },
            ],
            surface_format,
        );

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::Pipeline(error.to_string()));
        }

        let meshes = MeshKind::ALL
            .iter()
            .map(|&kind| {
                let vertices = kind.vertices();
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(kind.label()),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let mesh = GpuMesh {
                    buffer,
                    vertex_count: vertices.len() as u32,
                };
                (kind, mesh)
            })
            .collect();

        let sampler = texture::create_sampler(device);
        let textures = textures
            .iter()
            .map(|decoded| GpuTexture::upload(device, queue, decoded, &texture_layout, &sampler))
            .collect();

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: MAX_DRAWS as u64 * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::info!(
            "renderer ready: {} meshes, {} textures, {surface_format:?}",
            MeshKind::ALL.len(),
            TextureSlot::COUNT
        );

        Ok(Self {
            lit_pipeline,
            lamp_pipeline,
            uniform_buffer,
            uniform_bind_group,
            meshes,
            textures,
            instance_buffer,
            depth_texture,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Clear, then replay the frame's draw list in order.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &Frame,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::from_frame(frame)),
        );

        let draws = if frame.draws.len() > MAX_DRAWS as usize {
            tracing::warn!(
                "frame has {} draws, only the first {MAX_DRAWS} are submitted",
                frame.draws.len()
            );
            &frame.draws[..MAX_DRAWS as usize]
        } else {
            &frame.draws[..]
        };

        let instances: Vec<InstanceData> = draws
            .iter()
            .map(|draw| InstanceData::from_model(draw.model))
            .collect();
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b, a] = frame.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
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
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            let mut bound_pipeline = None;
            for (index, draw) in draws.iter().enumerate() {
                let Some(mesh) = self.meshes.get(&draw.mesh) else {
                    continue;
                };

                if bound_pipeline != Some(draw.pipeline) {
                    match draw.pipeline {
                        Pipeline::Lit => pass.set_pipeline(&self.lit_pipeline),
                        Pipeline::Lamp => pass.set_pipeline(&self.lamp_pipeline),
                    }
                    bound_pipeline = Some(draw.pipeline);
                }

                if draw.pipeline == Pipeline::Lit {
                    let Some(texture) = draw.texture.and_then(|slot| self.textures.get(slot.index()))
                    else {
                        tracing::warn!("lit draw {} has no texture, skipped", draw.label);
                        continue;
                    };
                    pass.set_bind_group(1, &texture.bind_group, &[]);
                }

                let count = draw.vertex_count.min(mesh.vertex_count);
                let instance = index as u32;
                pass.set_vertex_buffer(0, mesh.buffer.slice(..));
                pass.draw(0..count, instance..instance + 1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// Reject images the device cannot hold before any upload is attempted.
fn check_texture_size(decoded: &DecodedTexture, max_dimension: u32) -> Result<(), RenderError> {
    if decoded.width > max_dimension || decoded.height > max_dimension {
        return Err(RenderError::TextureTooLarge {
            name: decoded.name.clone(),
            width: decoded.width,
            height: decoded.height,
            max: max_dimension,
        });
    }
    Ok(())
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    (vs_entry, fs_entry): (&str, &str),
    buffers: &[wgpu::VertexBufferLayout<'_>],
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            compilation_options: Default::default(),
            buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        // Wedges and the plane are seen from both sides.
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskscene_assets::AssetError;
    use deskscene_common::ViewMode;
    use deskscene_render::FlyCamera;
    use deskscene_scene::Scene;
    use glam::{Quat, Vec3};

    #[test]
    fn uniform_layout_matches_wgsl() {
        // two mat4x4 + five vec4
        assert_eq!(std::mem::size_of::<Uniforms>(), 2 * 64 + 5 * 16);
        assert_eq!(std::mem::size_of::<InstanceData>(), 7 * 16);
    }

    #[test]
    fn uniforms_carry_lighting() {
        let scene = Scene::desk();
        let camera = FlyCamera::new(Vec3::new(0.0, 0.0, 3.0));
        let frame = Frame::compose(&scene, &camera, ViewMode::Perspective, 800, 600);
        let u = Uniforms::from_frame(&frame);

        assert_eq!(u.view_position, [0.0, 0.0, 3.0, 1.0]);
        assert_eq!(&u.light_position[..3], &scene.lighting.light_position.to_array());
        assert_eq!(u.material, [0.1, 0.8, 16.0, 0.0]);
        assert_eq!(u.projection, frame.projection_matrix.to_cols_array_2d());
    }

    #[test]
    fn normal_matrix_ignores_translation() {
        let model = Mat4::from_translation(Vec3::new(4.0, -2.0, 9.0));
        let data = InstanceData::from_model(model);
        assert_eq!(data.normal_0, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(data.normal_1, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(data.normal_2, [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(data.model_3, [4.0, -2.0, 9.0, 1.0]);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 0.5, 1.0),
            Quat::IDENTITY,
            Vec3::ZERO,
        );
        let n = normal_matrix(model);
        assert!((n.x_axis.x - 0.5).abs() < 1e-6);
        assert!((n.y_axis.y - 2.0).abs() < 1e-6);
        assert!((n.z_axis.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_model_falls_back_to_identity() {
        let model = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(normal_matrix(model), Mat3::IDENTITY);
    }

    fn blank(name: &str, width: u32, height: u32) -> Result<DecodedTexture, AssetError> {
        DecodedTexture::from_image(name, image::DynamicImage::new_rgb8(width, height))
    }

    #[test]
    fn oversized_texture_is_reported() {
        let max = wgpu::Limits::default().max_texture_dimension_2d;
        let wide = blank("wide", max + 1, 1).unwrap();
        match check_texture_size(&wide, max) {
            Err(RenderError::TextureTooLarge {
                name,
                width,
                height,
                max: limit,
            }) => {
                assert_eq!(name, "wide");
                assert_eq!((width, height), (max + 1, 1));
                assert_eq!(limit, max);
            }
            other => panic!("expected TextureTooLarge, got {other:?}"),
        }

        let tall = blank("tall", 1, 20).unwrap();
        assert!(check_texture_size(&tall, 16).is_err());
    }

    #[test]
    fn texture_at_the_limit_is_accepted() {
        let edge = blank("edge", 16, 16).unwrap();
        assert!(check_texture_size(&edge, 16).is_ok());
    }

    #[test]
    fn desk_frame_fits_instance_buffer() {
        let frame = Frame::compose(
            &Scene::desk(),
            &FlyCamera::new(Vec3::ZERO),
            ViewMode::Orthographic,
            640,
            480,
        );
        assert!(frame.draws.len() <= MAX_DRAWS as usize);
    }
}
