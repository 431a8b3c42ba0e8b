//! Line renderer for oscillator scenes

use common::{create_uniform_buffer, create_vertex_buffer, Camera2D, CameraUniform, GraphicsContext, Vertex};

use crate::scene::Scene;

/// Pixel rectangle the scene is drawn into: `[x, y, width, height]`
pub type Viewport = [f32; 4];

/// Two vertices per segment, ready for a `LineList` draw.
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    scene
        .segments
        .iter()
        .flat_map(|s| {
            [
                Vertex::flat(s.a.x, s.a.y, s.color),
                Vertex::flat(s.b.x, s.b.y, s.color),
            ]
        })
        .collect()
}

pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    max_vertices: usize,
    num_vertices: u32,
}

impl LineRenderer {
    pub fn new(ctx: &GraphicsContext, max_vertices: usize) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.wgsl").into()),
        });

        let camera_buffer = create_uniform_buffer(device, &CameraUniform::from_camera_2d(&Camera2D::new(ctx.aspect_ratio())));

        let camera_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let vertex_buffer = create_vertex_buffer(device, max_vertices);

        Self {
            pipeline,
            vertex_buffer,
            camera_buffer,
            camera_bind_group,
            max_vertices,
            num_vertices: 0,
        }
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera2D) {
        let uniform = CameraUniform::from_camera_2d(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload the scene. Segments past the buffer capacity are dropped.
    pub fn update_scene(&mut self, queue: &wgpu::Queue, scene: &Scene) {
        let mut vertices = scene_vertices(scene);
        if vertices.len() > self.max_vertices {
            log::warn!(
                "scene has {} vertices, drawing the first {}",
                vertices.len(),
                self.max_vertices
            );
            // Keep whole segments
            vertices.truncate(self.max_vertices & !1);
        }
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        self.num_vertices = vertices.len() as u32;
    }

    pub fn clear_scene(&mut self) {
        self.num_vertices = 0;
    }

    /// Clear the frame and draw the uploaded scene into `viewport`.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, viewport: Option<Viewport>) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.02,
                        g: 0.02,
                        b: 0.05,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.num_vertices == 0 {
            return;
        }
        if let Some([x, y, w, h]) = viewport {
            if w < 1.0 || h < 1.0 {
                return;
            }
            render_pass.set_viewport(x, y, w, h, 0.0, 1.0);
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.num_vertices, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Segment, STRUCTURE_COLOR};
    use glam::Vec2;

    #[test]
    fn test_scene_vertices_pairs_segments() {
        let scene = Scene {
            segments: vec![
                Segment { a: Vec2::ZERO, b: Vec2::new(1.0, -2.0), color: STRUCTURE_COLOR },
                Segment { a: Vec2::new(3.0, 4.0), b: Vec2::ONE, color: STRUCTURE_COLOR },
            ],
            bob: Vec2::ZERO,
        };
        let vertices = scene_vertices(&scene);
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[1].position, [1.0, -2.0, 0.0]);
        assert_eq!(vertices[2].position, [3.0, 4.0, 0.0]);
        assert_eq!(vertices[3].color, STRUCTURE_COLOR);
    }
}
