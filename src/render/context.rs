use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::{
    Backends, Device, DeviceDescriptor, Features, Instance, InstanceDescriptor, Queue,
    RequestAdapterOptions, Surface, SurfaceConfiguration, SurfaceError, SurfaceTexture,
    TextureView, TextureViewDescriptor,
};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    error::ExternalError,
    window::{CursorGrabMode, Window},
};

use crate::CursorCapture;

pub struct DrawContext {
    pub window: Arc<Window>,
    surface: Surface<'static>,
    pub config: SurfaceConfiguration,

    _gpu_handle: Instance,
    pub device: Device,
    pub queue: Queue,
}

impl DrawContext {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let (surface, gpu_handle, device, queue, config) = Self::init_gpu(window.clone()).await?;

        Ok(Self {
            window,
            surface,
            config,
            _gpu_handle: gpu_handle,
            device,
            queue,
        })
    }

    async fn init_gpu<'a>(
        window: Arc<Window>,
    ) -> Result<(Surface<'a>, Instance, Device, Queue, SurfaceConfiguration)> {
        // Get handle to GPU
        let gpu_handle = Instance::new(&InstanceDescriptor {
            backends: Backends::PRIMARY,
            ..Default::default()
        });

        // Create a texture surface - this is what we draw on
        let surface = gpu_handle
            .create_surface(window.clone())
            .context("Failed to create window surface")?;
        let adapter = gpu_handle
            .request_adapter(&RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::None,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        // Queue - Used to send draw operations to the GPU
        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                required_features: Features::empty(),
                ..Default::default()
            })
            .await
            .context("Failed to open GPU device")?;

        // Configure the draw surface to match the window
        let window_size = window.inner_size();
        let config = surface
            .get_default_config(&adapter, window_size.width.max(1), window_size.height.max(1))
            .context("Surface isn't supported by the adapter")?;
        surface.configure(&device, &config);

        Ok((surface, gpu_handle, device, queue, config))
    }

    // Resize the window
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        // Minimised windows report a zero size which the surface can't take
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.height = size.height;
        self.config.width = size.width;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn get_texture_view(&self) -> Result<(SurfaceTexture, TextureView), SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&TextureViewDescriptor::default());

        Ok((output, view))
    }

    /// Reconfigure the surface after it was lost or went out of date
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Grab cursor control so the camera can be moved around
    pub fn grab_cursor(&self) -> Result<(), ExternalError> {
        self.window.set_cursor_grab(CursorGrabMode::Confined)?;
        self.window.set_cursor_visible(false);

        // Centre the cursor in the window
        self.centre_cursor()
    }

    /// Unlock the cursor so the player can interact with UI
    pub fn ungrab_cursor(&self) -> Result<(), ExternalError> {
        self.window.set_cursor_grab(CursorGrabMode::None)?;
        self.window.set_cursor_visible(true);
        Ok(())
    }

    /// Bring the window's cursor in line with the game mode. Failures are logged, the
    /// game keeps running with whatever cursor it has
    pub fn apply_cursor(&self, cursor: CursorCapture) {
        let result = if cursor.grabbed {
            self.grab_cursor()
        } else {
            self.ungrab_cursor()
        };
        if let Err(e) = result {
            log::warn!("Failed to apply {cursor:?}: {e}");
        }
        self.window.set_cursor_visible(cursor.visible);
    }

    /// Set the cursor's position, position is in pixel space
    pub fn set_cursor_pos(&self, position: &PhysicalPosition<u32>) -> Result<(), ExternalError> {
        // On Wayland we need to lock it first
        let wayland = self.window.set_cursor_grab(CursorGrabMode::Locked).is_ok();

        self.window.set_cursor_position(*position)?;

        if wayland {
            self.window.set_cursor_grab(CursorGrabMode::Confined)?;
        }
        Ok(())
    }

    /// Centre the cursor on the screen
    pub fn centre_cursor(&self) -> Result<(), ExternalError> {
        self.set_cursor_pos(&PhysicalPosition::new(
            self.config.width / 2,
            self.config.height / 2,
        ))
    }
}
