//! Textured grid-item planes.
//!
//! Every item draws the same unit quad scaled by its model matrix. Each
//! item owns a uniform buffer, a media texture and a bind group. Items are
//! drawn far to near with alpha blending and without depth writes so faded
//! planes never hide what is behind them.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::assets::AssetRegistry;
use crate::gpu::pipeline_helpers::{self, MeshPipelineDesc};
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{media_sampler, MediaTexture};
use crate::scene::{Fog, GridItem, Scene};

/// Per-item shader parameters, laid out to match `item.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ItemUniform {
    /// World transform of the unit quad.
    pub model: [[f32; 4]; 4],
    /// Linear RGB tint.
    pub gradient: [f32; 3],
    /// Overall alpha.
    pub opacity: f32,
    /// Linear RGB fog colour.
    pub fog_color: [f32; 3],
    /// Focus progress.
    pub progress: f32,
    /// Fog start distance.
    pub fog_near: f32,
    /// Fog end distance.
    pub fog_far: f32,
    /// Seconds since the scene was built.
    pub time: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl ItemUniform {
    /// Pack an item's current state for the GPU.
    #[must_use]
    pub fn new(item: &GridItem, grid_z: f32, fog: &Fog) -> Self {
        let translation = item.local_position() + Vec3::Z * grid_z;
        let model = Mat4::from_translation(translation)
            * Mat4::from_scale(item.size.extend(1.0));
        Self {
            model: model.to_cols_array_2d(),
            gradient: item.params.gradient.value().to_array(),
            opacity: item.params.opacity.value(),
            fog_color: fog.color.value().to_array(),
            progress: item.params.progress.value(),
            fog_near: fog.near,
            fog_far: fog.far,
            time: item.params.time,
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadVertex {
    position: [f32; 2],
    uv: [f32; 2],
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [-0.5, -0.5],
        uv: [0.0, 1.0],
    },
    QuadVertex {
        position: [0.5, -0.5],
        uv: [1.0, 1.0],
    },
    QuadVertex {
        position: [0.5, 0.5],
        uv: [1.0, 0.0],
    },
    QuadVertex {
        position: [-0.5, 0.5],
        uv: [0.0, 0.0],
    },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

struct ItemResources {
    item: usize,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: MediaTexture,
}

/// Pipeline and per-item GPU resources for the grid.
pub struct ItemPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    items: Vec<ItemResources>,
    draw_order: Vec<usize>,
}

impl ItemPass {
    /// Upload every item's texture and build its bind group.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        registry: &AssetRegistry,
        scene: &Scene,
    ) -> Self {
        let device = &context.device;
        let item_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Item Bind Group Layout"),
                entries: &[
                    pipeline_helpers::uniform_buffer(0),
                    pipeline_helpers::texture_2d(1),
                    pipeline_helpers::filtering_sampler(2),
                ],
            });
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/raster/item.wgsl"
        ));
        let pipeline = pipeline_helpers::create_mesh_pipeline(
            device,
            MeshPipelineDesc {
                label: "Item",
                shader: &shader,
                format: context.format(),
                vertex_layout: wgpu::VertexBufferLayout {
                    array_stride: size_of::<QuadVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &QUAD_ATTRIBUTES,
                },
                bind_group_layouts: &[camera_layout, &item_layout],
                depth_write: false,
            },
        );

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Item Quad Vertices"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Item Quad Indices"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });

        let sampler = media_sampler(device);
        let items: Vec<_> = scene
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let Some(asset) = registry.texture_at(item.texture) else {
                    log::warn!(
                        "{}: texture slot {} missing",
                        item.id,
                        item.texture
                    );
                    return None;
                };
                let texture = MediaTexture::new(
                    device,
                    &context.queue,
                    &item.id,
                    &asset.surface,
                );
                let uniform =
                    ItemUniform::new(item, scene.grid_z.value(), &scene.fog);
                let uniform_buffer =
                    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("{} Uniform", item.id)),
                        contents: bytemuck::bytes_of(&uniform),
                        usage: wgpu::BufferUsages::UNIFORM
                            | wgpu::BufferUsages::COPY_DST,
                    });
                let bind_group =
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some(&format!("{} Bind Group", item.id)),
                        layout: &item_layout,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: uniform_buffer.as_entire_binding(),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: wgpu::BindingResource::TextureView(
                                    &texture.view,
                                ),
                            },
                            wgpu::BindGroupEntry {
                                binding: 2,
                                resource: wgpu::BindingResource::Sampler(&sampler),
                            },
                        ],
                    });
                Some(ItemResources {
                    item: index,
                    uniform_buffer,
                    bind_group,
                    texture,
                })
            })
            .collect();
        let slots: Vec<usize> = items.iter().map(|r| r.item).collect();
        let draw_order = far_to_near(scene, &slots);

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            items,
            draw_order,
        }
    }

    /// Write uniforms and advance clip frames.
    pub fn prepare(
        &mut self,
        queue: &wgpu::Queue,
        registry: &AssetRegistry,
        scene: &Scene,
        elapsed: std::time::Duration,
    ) {
        let grid_z = scene.grid_z.value();
        for resources in &mut self.items {
            let Some(item) = scene.items.get(resources.item) else {
                continue;
            };
            let uniform = ItemUniform::new(item, grid_z, &scene.fog);
            queue.write_buffer(
                &resources.uniform_buffer,
                0,
                bytemuck::bytes_of(&uniform),
            );
            if let Some(asset) = registry.texture_at(item.texture) {
                if asset.surface.is_animated() {
                    let frame = asset.surface.frame_at(elapsed);
                    let _ = resources.texture.show_frame(
                        queue,
                        &asset.surface,
                        frame,
                    );
                }
            }
        }
    }

    /// Draw the items far to near.
    ///
    /// The camera bind group must already be set at group 0.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.draw_order.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass
            .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        for &i in &self.draw_order {
            render_pass.set_bind_group(1, &self.items[i].bind_group, &[]);
            render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
        }
    }
}

/// Indices into `slots` ordered far to near. Item depth is fixed at build
/// time, so the order never changes after the pass is created.
fn far_to_near(scene: &Scene, slots: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..slots.len())
        .filter(|&i| slots[i] < scene.items.len())
        .collect();
    order.sort_by(|&a, &b| {
        let a = &scene.items[slots[a]];
        let b = &scene.items[slots[b]];
        a.depth.total_cmp(&b.depth)
    });
    order
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec4};

    use super::*;
    use crate::options::Palette;

    #[test]
    fn uniform_matches_shader_layout() {
        assert_eq!(size_of::<ItemUniform>(), 112);
        assert_eq!(size_of::<ItemUniform>() % 16, 0);
    }

    #[test]
    fn model_places_scaled_quad_in_grid_space() {
        let scene = Scene::new(&Palette::opening(), 1400.0, 2000.0);
        let item = GridItem::new(
            "a".into(),
            0,
            Vec2::new(320.0, 240.0),
            Vec2::new(-350.0, 350.0),
            -300.0,
            Vec3::ONE,
        );
        let uniform = ItemUniform::new(&item, 100.0, &scene.fog);
        let model = Mat4::from_cols_array_2d(&uniform.model);
        let corner = model * Vec4::new(0.5, 0.5, 0.0, 1.0);
        assert_eq!(corner, Vec4::new(-190.0, 470.0, -200.0, 1.0));
        assert_eq!(uniform.opacity, 1.0);
        assert_eq!(uniform.fog_near, 1400.0);
    }

    #[test]
    fn draw_order_runs_far_to_near() {
        let mut scene = Scene::new(&Palette::opening(), 1400.0, 2000.0);
        for (i, depth) in [0.0, -600.0, -300.0].into_iter().enumerate() {
            scene.items.push(GridItem::new(
                format!("item{i}"),
                i,
                Vec2::splat(100.0),
                Vec2::ZERO,
                depth,
                Vec3::ONE,
            ));
        }
        assert_eq!(far_to_near(&scene, &[0, 1, 2]), [1, 2, 0]);
        // A resource whose texture was missing skips its item.
        assert_eq!(far_to_near(&scene, &[0, 2]), [1, 0]);
        assert_eq!(far_to_near(&scene, &[0, 7]), [0]);
    }
}
