//! Flat-shaded label meshes.
//!
//! Label geometry never changes after the scene is built, so vertex and
//! index buffers are uploaded once. Only the model matrix (grid scroll) and
//! the shared colour/fog uniform are rewritten per frame.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers::{self, MeshPipelineDesc};
use crate::gpu::render_context::RenderContext;
use crate::scene::{Label, Scene};

/// Per-label shader parameters, laid out to match `text.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LabelUniform {
    /// World transform of the label mesh.
    pub model: [[f32; 4]; 4],
    /// Linear RGB fill colour.
    pub color: [f32; 3],
    /// Fog start distance.
    pub fog_near: f32,
    /// Linear RGB fog colour.
    pub fog_color: [f32; 3],
    /// Fog end distance.
    pub fog_far: f32,
}

impl LabelUniform {
    /// Pack a label's placement and the scene's shared colours.
    #[must_use]
    pub fn new(label: &Label, scene: &Scene) -> Self {
        let offset = label.position + Vec3::Z * scene.grid_z.value();
        Self {
            model: Mat4::from_translation(offset).to_cols_array_2d(),
            color: scene.label_color.value().to_array(),
            fog_near: scene.fog.near,
            fog_color: scene.fog.color.value().to_array(),
            fog_far: scene.fog.far,
        }
    }
}

const LABEL_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];

struct LabelResources {
    label: usize,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Pipeline and per-label GPU buffers.
pub struct TextPass {
    pipeline: wgpu::RenderPipeline,
    labels: Vec<LabelResources>,
}

impl TextPass {
    /// Upload every non-empty label mesh.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        scene: &Scene,
    ) -> Self {
        let device = &context.device;
        let label_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Label Bind Group Layout"),
                entries: &[pipeline_helpers::uniform_buffer(0)],
            });
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/raster/text.wgsl"
        ));
        let pipeline = pipeline_helpers::create_mesh_pipeline(
            device,
            MeshPipelineDesc {
                label: "Label",
                shader: &shader,
                format: context.format(),
                vertex_layout: wgpu::VertexBufferLayout {
                    array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &LABEL_ATTRIBUTES,
                },
                bind_group_layouts: &[camera_layout, &label_layout],
                depth_write: true,
            },
        );

        let labels = scene
            .labels
            .iter()
            .enumerate()
            .filter(|(_, label)| !label.mesh.is_empty())
            .map(|(index, label)| {
                let positions: Vec<[f32; 3]> =
                    label.mesh.positions.iter().map(|p| p.to_array()).collect();
                let vertex_buffer =
                    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("Label '{}' Vertices", label.text)),
                        contents: bytemuck::cast_slice(&positions),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
                let index_buffer =
                    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("Label '{}' Indices", label.text)),
                        contents: bytemuck::cast_slice(&label.mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    });
                let uniform = LabelUniform::new(label, scene);
                let uniform_buffer =
                    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("Label '{}' Uniform", label.text)),
                        contents: bytemuck::bytes_of(&uniform),
                        usage: wgpu::BufferUsages::UNIFORM
                            | wgpu::BufferUsages::COPY_DST,
                    });
                let bind_group =
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some(&format!("Label '{}' Bind Group", label.text)),
                        layout: &label_layout,
                        entries: &[wgpu::BindGroupEntry {
                            binding: 0,
                            resource: uniform_buffer.as_entire_binding(),
                        }],
                    });
                LabelResources {
                    label: index,
                    vertex_buffer,
                    index_buffer,
                    index_count: label.mesh.indices.len() as u32,
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect();

        Self { pipeline, labels }
    }

    /// Rewrite every label uniform for the current grid offset and colours.
    pub fn prepare(&self, queue: &wgpu::Queue, scene: &Scene) {
        for resources in &self.labels {
            if let Some(label) = scene.labels.get(resources.label) {
                let uniform = LabelUniform::new(label, scene);
                queue.write_buffer(
                    &resources.uniform_buffer,
                    0,
                    bytemuck::bytes_of(&uniform),
                );
            }
        }
    }

    /// Draw all labels. The camera bind group must already be set.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.labels.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        for resources in &self.labels {
            render_pass.set_bind_group(1, &resources.bind_group, &[]);
            render_pass.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                resources.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..resources.index_count, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;
    use crate::options::{srgb_hex_to_linear, Palette};
    use crate::text::TextMesh;

    #[test]
    fn uniform_matches_shader_layout() {
        assert_eq!(size_of::<LabelUniform>(), 96);
    }

    #[test]
    fn model_follows_grid_scroll() {
        let palette = Palette::opening();
        let mut scene = Scene::new(&palette, 1400.0, 2000.0);
        scene.grid_z = crate::animation::Animated::new(500.0);
        let label = Label {
            text: "1969".into(),
            position: Vec3::new(10.0, 20.0, -300.0),
            mesh: TextMesh::default(),
        };
        let uniform = LabelUniform::new(&label, &scene);
        let origin = Mat4::from_cols_array_2d(&uniform.model) * Vec4::W;
        assert_eq!(origin, Vec4::new(10.0, 20.0, 200.0, 1.0));
        let expected = srgb_hex_to_linear(palette.label).to_array();
        assert_eq!(uniform.color, expected);
    }
}
