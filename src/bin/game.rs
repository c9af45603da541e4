use std::{sync::Arc, time::Instant};

use anyhow::{Context, Result};
use egui::{Rect, pos2};
use oil_frontier::{
    config::GameConfig,
    game::Game,
    input::{InputEvent, KeyBindings, pointer_button},
    render::state::RenderState,
    router::RoutingDecision,
    ui::debug::DEBUG_WINDOW,
};
use tokio::runtime::Runtime;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const WINDOW_SIZE: PhysicalSize<u32> = PhysicalSize::new(1600, 900);

struct App {
    runtime: Runtime,
    render_state: Option<RenderState>,
    game: Game,
    bindings: KeyBindings,
    cursor_pos: Option<PhysicalPosition<f64>>,
    /// Set when the event loop had to bail out
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: GameConfig) -> Result<Self> {
        let screen = Rect::from_min_max(
            pos2(0., 0.),
            pos2(WINDOW_SIZE.width as f32, WINDOW_SIZE.height as f32),
        );

        Ok(Self {
            runtime: Runtime::new().context("Failed to start async runtime")?,
            render_state: None,
            game: Game::new(config, screen),
            bindings: KeyBindings::default(),
            cursor_pos: None,
            error: None,
        })
    }

    fn init_render_state(&mut self, event_loop: &ActiveEventLoop) -> Result<RenderState> {
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Oil Frontier")
                        .with_inner_size(WINDOW_SIZE),
                )
                .context("Failed to create window")?,
        );
        self.runtime.block_on(RenderState::new(window))
    }

    /// Send an event through the game and carry out any window side effects
    fn handle_input(&mut self, event: InputEvent) {
        let decision = self.game.handle_event(event);

        if let RoutingDecision::ModeChanged { cursor, .. } = decision
            && let Some(render_state) = &self.render_state
        {
            render_state.draw_context.apply_cursor(cursor);
        }
    }

    /// Where the cursor is in egui points
    fn pointer_pos(&self) -> Option<egui::Pos2> {
        let render_state = self.render_state.as_ref()?;
        let position = self.cursor_pos?;
        let scale = render_state.draw_context.window.scale_factor();
        Some(pos2(
            (position.x / scale) as f32,
            (position.y / scale) as f32,
        ))
    }

    fn redraw(&mut self) {
        let dt = self.game.tick(Instant::now());

        DEBUG_WINDOW.add_line(&format!("Last frame: {dt:?}"));
        let player = &self.game.player;
        DEBUG_WINDOW.extend([
            format!("pos: ({:.1}, {:.1})", player.position.0.x, player.position.0.z),
            format!("Mode: {:?}", self.game.session().mode),
            format!("Nearby: {}", player.nearby_objects.len()),
        ]);

        if let Some(render_state) = &mut self.render_state {
            render_state.render(&self.game);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Initialise RenderState once
        if self.render_state.is_some() {
            return;
        }

        match self.init_render_state(event_loop) {
            Ok(render_state) => {
                self.game.resize(render_state.screen_rect());
                render_state
                    .draw_context
                    .apply_cursor(self.game.session().cursor());
                self.render_state = Some(render_state);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event
            && let Some(render_state) = &self.render_state
            && self.game.session().camera_look_enabled()
        {
            let config = &render_state.draw_context.config;
            let normalised_delta = (
                delta.0 as f32 / config.width as f32,
                delta.1 as f32 / config.height as f32,
            );

            // Leave the cursor alone while it's aiming a placement
            if !self.game.session().ui.any_panel_active()
                && render_state.draw_context.centre_cursor().is_err()
            {
                log::warn!("Failed to centre cursor!");
            }

            self.handle_input(InputEvent::PointerMotion {
                delta: normalised_delta,
            });
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        log::trace!("Event: {event:?}");

        // Handle UI events
        if let Some(render_state) = &mut self.render_state {
            let _ = render_state
                .ui
                .egui_state
                .on_window_event(&render_state.draw_context.window, &event);
        }

        match &event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::Resized(size) => {
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(*size);
                    self.game.resize(render_state.screen_rect());
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(render_state) = &self.render_state {
                    self.game.resize(render_state.screen_rect());
                }
            }
            WindowEvent::Focused(false) => self.game.movement.release_all(),
            WindowEvent::KeyboardInput {
                event:
                    event @ KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                if *key == KeyCode::F4 {
                    event_loop.exit();
                }

                if self.game.session().playing() {
                    self.game.movement.handle_keypress(event);
                }
                if let Some(input) = self.bindings.translate(event) {
                    self.handle_input(input);
                }
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_pos = Some(*position),
            WindowEvent::CursorLeft { .. } => self.cursor_pos = None,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                if let Some(button) = pointer_button(*button)
                    && let Some(pos) = self.pointer_pos()
                {
                    self.handle_input(InputEvent::PointerDown { pos, button });
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let clock = self.game.clock();
        if clock.frame_due(Instant::now())
            && let Some(render_state) = &self.render_state
        {
            render_state.draw_context.window.request_redraw();
        }

        event_loop.set_control_flow(match clock.next_frame() {
            Some(next) => ControlFlow::WaitUntil(next),
            None => ControlFlow::Poll,
        });
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(GameConfig::default())?;
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
