use egui_wgpu::ScreenDescriptor;

use crate::preview::OrbitCamera;
use crate::renderer::Renderer;

impl Renderer {
    /// Draws one frame: the preview scene clipped to the viewport rect the
    /// UI reserved, then the egui pass over the whole surface. With no
    /// viewport (window too small) only the UI is drawn.
    pub fn render(
        &mut self,
        camera: &OrbitCamera,
        viewport: Option<egui::Rect>,
        paint_jobs: Vec<egui::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        screen_descriptor: ScreenDescriptor,
    ) -> Result<(), wgpu::SurfaceError> {
        // Minimized or not yet configured.
        if self.config.width == 0 || self.config.height == 0 {
            return Ok(());
        }

        let viewport_px = viewport.and_then(|rect| {
            let ppp = screen_descriptor.pixels_per_point;
            let x = (rect.min.x * ppp).max(0.0);
            let y = (rect.min.y * ppp).max(0.0);
            let w = (rect.width() * ppp).min(self.config.width as f32 - x);
            let h = (rect.height() * ppp).min(self.config.height as f32 - y);
            (w >= 1.0 && h >= 1.0).then_some((x, y, w, h))
        });

        if let Some((_, _, w, h)) = viewport_px {
            let view_proj = camera.view_proj(w / h);
            self.queue.write_buffer(
                &self.camera_buffer,
                0,
                bytemuck::cast_slice(view_proj.as_slice()),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Preview Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.10,
                            g: 0.11,
                            b: 0.12,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some((x, y, w, h)) = viewport_px {
                render_pass.set_viewport(x, y, w, h, 0.0, 1.0);
                render_pass.set_scissor_rect(x as u32, y as u32, w as u32, h as u32);

                // The viewport always shows at least the grid; the skeleton
                // only exists while an instance does.
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.grid_vertex_buffer.slice(..));
                render_pass.draw(0..self.num_grid_vertices, 0..1);

                if let Some(skeleton_buffer) = &self.skeleton_vertex_buffer {
                    render_pass.set_vertex_buffer(0, skeleton_buffer.slice(..));
                    render_pass.draw(0..self.num_skeleton_vertices, 0..1);
                }
            }
        }

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut egui_rpass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui render pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut egui_rpass, &paint_jobs, &screen_descriptor);
        }

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
