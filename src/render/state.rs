use std::sync::Arc;

use anyhow::Result;
use egui::{Rect, pos2};
use wgpu::{
    CommandEncoderDescriptor, LoadOp, Operations, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp, SurfaceError,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    game::Game,
    render::context::DrawContext,
    ui::{UI, debug::DEBUG_WINDOW},
    util::stopwatch::StopWatch,
};

const WATER: wgpu::Color = wgpu::Color {
    r: 0.05,
    g: 0.25,
    b: 0.45,
    a: 1.0,
};

pub struct RenderState {
    pub draw_context: DrawContext,
    pub ui: UI,
    stopwatch: StopWatch,
}

impl RenderState {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let draw_context = DrawContext::new(window).await?;
        let ui = UI::new(
            &draw_context.device,
            draw_context.config.format,
            &draw_context.window,
        );

        Ok(Self {
            draw_context,
            ui,
            stopwatch: StopWatch::new(),
        })
    }

    /// Drawable area in egui points, which is the space the map and panels are laid out in
    pub fn screen_rect(&self) -> Rect {
        let scale = self.draw_context.window.scale_factor() as f32;
        let config = &self.draw_context.config;
        Rect::from_min_max(
            pos2(0., 0.),
            pos2(config.width as f32 / scale, config.height as f32 / scale),
        )
    }

    // Resize the window
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.draw_context.resize(size);
    }

    /// Perform the actual rendering to the screen
    pub fn render(&mut self, game: &Game) {
        self.stopwatch.reset();

        // Get a view on the surface texture that we'll draw to
        let (output, texture_view) = match self.draw_context.get_texture_view() {
            Ok(target) => target,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                log::debug!("Surface out of date, reconfiguring");
                self.draw_context.reconfigure();
                return;
            }
            Err(e) => {
                log::warn!("Skipping frame: {e}");
                return;
            }
        };

        // Encoder is used to send operations to the GPU queue
        let mut encoder =
            self.draw_context
                .device
                .create_command_encoder(&CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        {
            // Clear the screen to open water
            let _render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &texture_view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(WATER),
                        store: StoreOp::Store,
                    },
                })],
                ..Default::default()
            });
        }
        self.stopwatch.stamp_and_reset("Clear pass");

        DEBUG_WINDOW.extend(self.stopwatch.get_debug_strings());
        self.ui
            .render(&self.draw_context, &mut encoder, &texture_view, game);
        DEBUG_WINDOW.clear();

        // Actually run the operations on the GPU
        self.draw_context
            .queue
            .submit(std::iter::once(encoder.finish()));
        self.stopwatch.stamp_and_reset("UI pass");

        // Show the new output to the screen
        output.present();
    }
}
