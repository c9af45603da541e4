pub mod debug;
pub mod hud;
pub mod map;
pub mod panels;
pub mod windows;

use debug::DEBUG_WINDOW;
use egui::{Context, Ui};
use egui_wgpu::{Renderer, ScreenDescriptor};
use egui_winit::State;
use hud::{FeedbackList, Hud, Pointer};
use map::WorldMap;
use wgpu::{
    CommandEncoder, Device, LoadOp, Operations, RenderPassColorAttachment, RenderPassDescriptor,
    StoreOp, TextureFormat, TextureView,
};
use windows::{BuildMenu, BuildingDetails, MenuScreen, PauseOverlay, ShipInventory};

use crate::{GameMode, game::Game, render::context::DrawContext};

/// Trait to enable easy drawing of UI elements
pub trait Drawable {
    /// Draw a new window with the UI
    fn show_window(&self, _ctx: &Context) {}
    /// Draw the UI in an existing window
    fn show_widget(&self, _ui: &mut Ui) {}
}

pub struct UI {
    // Rendering
    pub egui_state: State,
    egui_context: Context,
    pub egui_renderer: Renderer,
}

impl UI {
    pub fn new(device: &Device, format: TextureFormat, window: &winit::window::Window) -> Self {
        let egui_renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);
        let egui_context = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_context.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        Self {
            egui_state,
            egui_context,
            egui_renderer,
        }
    }

    /// Draw everything the player sees on top of the water
    fn draw(ctx: &Context, game: &Game) {
        let session = game.session();
        let panels = game.router().panels();
        let placement = game.router().placement().phase();
        let view = game.view();

        WorldMap {
            view: &view,
            world: &game.world,
            player: &game.player,
            placement,
        }
        .show_window(ctx);

        Hud {
            player: &game.player,
            placement,
        }
        .show_window(ctx);
        FeedbackList {
            feedback: &game.feedback,
        }
        .show_window(ctx);

        let ui = &session.ui;
        if ui.building_menu_open {
            BuildMenu {
                layout: panels.build_menu(),
                pending: ui.pending_building_type,
            }
            .show_window(ctx);
        }
        if ui.ship_inventory_open {
            ShipInventory {
                layout: panels.ship_inventory(),
                player: &game.player,
            }
            .show_window(ctx);
        }
        if let Some(building) = ui.building_interaction {
            BuildingDetails {
                layout: panels.building_interaction(),
                world: &game.world,
                building,
            }
            .show_window(ctx);
        }

        match session.mode {
            GameMode::Playing => {
                // The system cursor is hidden while playing
                if ui.any_panel_active() {
                    Pointer {
                        pos: ctx.input(|i| i.pointer.latest_pos()),
                    }
                    .show_window(ctx);
                }
            }
            GameMode::Paused => PauseOverlay.show_window(ctx),
            GameMode::Menu => MenuScreen.show_window(ctx),
        }

        DEBUG_WINDOW.show_window(ctx);
    }

    /// Render the UI
    pub fn render(
        &mut self,
        draw_context: &DrawContext,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        game: &Game,
    ) {
        let inputs = self.egui_state.take_egui_input(&draw_context.window);
        let output = self.egui_context.run(inputs, |ctx| Self::draw(ctx, game));

        self.egui_state
            .handle_platform_output(&draw_context.window, output.platform_output);

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [draw_context.config.width, draw_context.config.height],
            pixels_per_point: draw_context.window.scale_factor() as f32,
        };

        // Prepare triangles
        let primitives = self
            .egui_context
            .tessellate(output.shapes, screen_descriptor.pixels_per_point);

        // Send new changed textures to GPU
        output
            .textures_delta
            .set
            .iter()
            .for_each(|(id, image_delta)| {
                self.egui_renderer.update_texture(
                    &draw_context.device,
                    &draw_context.queue,
                    *id,
                    image_delta,
                );
            });

        self.egui_renderer.update_buffers(
            &draw_context.device,
            &draw_context.queue,
            encoder,
            &primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&RenderPassDescriptor {
                    label: Some("UI Render Pass"),
                    color_attachments: &[Some(RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: Operations {
                            load: LoadOp::Load,
                            store: StoreOp::Store,
                        },
                    })],
                    ..Default::default()
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &primitives, &screen_descriptor);
        }

        // Clean up any un-needed textures
        output.textures_delta.free.iter().for_each(|id| {
            self.egui_renderer.free_texture(id);
        });
    }
}
