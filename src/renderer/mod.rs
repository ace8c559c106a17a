//! Rendering of the timeline scene.
//!
//! One colour pass per frame: clear to the background colour, draw labels
//! (opaque, depth-writing), then items far to near (blended, depth-tested).

pub mod item_pass;
pub mod text_pass;

use std::time::Duration;

use wgpu::util::DeviceExt;

use self::item_pass::ItemPass;
use self::text_pass::TextPass;
use crate::assets::AssetRegistry;
use crate::camera::{Camera, CameraUniform};
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::scene::Scene;

/// GPU resources for drawing a [`Scene`].
pub struct TimelineRenderer {
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    items: ItemPass,
    labels: TextPass,
}

impl TimelineRenderer {
    /// Upload textures and label meshes for `scene`.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        registry: &AssetRegistry,
        scene: &Scene,
        camera: &Camera,
    ) -> Self {
        let device = &context.device;
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(camera);
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(&camera_uniform),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[pipeline_helpers::uniform_buffer(0)],
            });
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let items = ItemPass::new(context, &camera_layout, registry, scene);
        let labels = TextPass::new(context, &camera_layout, scene);
        log::debug!(
            "renderer ready: {} items, {} labels",
            scene.items.len(),
            scene.labels.len()
        );

        Self {
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            items,
            labels,
        }
    }

    /// Write every uniform for the current frame.
    fn prepare(
        &mut self,
        queue: &wgpu::Queue,
        registry: &AssetRegistry,
        scene: &Scene,
        camera: &Camera,
        elapsed: Duration,
    ) {
        self.camera_uniform.update_view_proj(camera);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
        self.items.prepare(queue, registry, scene, elapsed);
        self.labels.prepare(queue, scene);
    }

    /// Draw one frame to the window surface and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot
    /// be acquired.
    pub fn render(
        &mut self,
        context: &RenderContext,
        registry: &AssetRegistry,
        scene: &Scene,
        camera: &Camera,
        elapsed: Duration,
    ) -> Result<(), wgpu::SurfaceError> {
        self.prepare(&context.queue, registry, scene, camera, elapsed);

        let frame = context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context.create_encoder();
        self.encode(&mut encoder, &view, &context.depth.view, scene);
        context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        scene: &Scene,
    ) {
        let background = scene.background.value();
        let mut render_pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Timeline Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(background.x),
                            g: f64::from(background.y),
                            b: f64::from(background.z),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        self.labels.draw(&mut render_pass);
        self.items.draw(&mut render_pass);
    }
}
