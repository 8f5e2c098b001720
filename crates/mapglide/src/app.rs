//! Application state and main frame loop

use std::sync::Arc;

use anyhow::Result;
use mapglide_core::{AccessToken, Coordinate, ResizeOverrides, ViewportController};
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::config::{AppConfig, GestureConfig};
use crate::map::MapView;
use crate::render::Renderer;
use crate::ui::{ControlPanel, PanelStatus};

/// Longest frame delta fed to the controller; stalls (window drag, breakpoint) skip ahead
/// at most this far instead of finishing a flight in one jump.
const MAX_FRAME_DELTA_SECS: f64 = 0.25;

pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    controller: ViewportController,
    map_view: MapView,
    control_panel: ControlPanel,
    gestures: GestureConfig,
    resize_overrides: ResizeOverrides,
    last_frame: Instant,
}

impl App {
    pub async fn new(config: AppConfig, access_token: AccessToken) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoop::new()?;

        let window_attrs = WindowAttributes::default()
            .with_title("mapglide")
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ));

        // Use deprecated create_window to avoid async complexity for now
        #[allow(deprecated)]
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = Renderer::new(window.clone()).await?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None, // max_texture_side
        );

        let catalog = config.catalog();
        let initial = config.initial_viewport();
        let mut controller = ViewportController::new(initial, config.transition_settings());
        let resize_overrides = config.resize_overrides();
        controller.on_resize(logical_size(&window, window.inner_size()), resize_overrides);

        log::info!(
            "Map style {} with {} destinations, access token {}",
            config.map.style,
            catalog.len(),
            access_token
        );

        let app = Self {
            map_view: MapView::new(
                config.map.style.clone(),
                access_token,
                *controller.viewport(),
                &catalog,
            ),
            control_panel: ControlPanel::new(catalog),
            window,
            renderer,
            egui_ctx,
            egui_state,
            controller,
            gestures: config.gestures,
            resize_overrides,
            last_frame: Instant::now(),
        };

        Ok((app, event_loop))
    }

    pub fn run(event_loop: EventLoop<()>, mut app: Self) -> Result<()> {
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    fn fly_to(&mut self, destination: Coordinate) {
        self.controller.request_transition(destination);
    }

    fn handle_redraw(&mut self) {
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_frame)
            .as_secs_f64()
            .min(MAX_FRAME_DELTA_SECS);
        self.last_frame = now;

        // Advance the flight and hand the result to the map view
        self.controller.tick(dt, &mut self.map_view);

        let status = PanelStatus {
            viewport: *self.map_view.viewport(),
            progress: self.controller.transition_progress(),
        };
        let target = self.controller.transition_destination();

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let mut picked = None;
        let mut gesture = None;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            picked = self.control_panel.render(ctx, &status);
            gesture = self.map_view.show(ctx, &self.gestures, target);
        });

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        if let Some(state) = gesture {
            self.controller.apply_user_change(state);
        }
        if let Some(destination) = picked {
            self.fly_to(destination);
        }

        if let Err(e) = self.renderer.render(
            &self.egui_ctx,
            full_output.textures_delta,
            full_output.shapes,
            full_output.pixels_per_point,
        ) {
            log::error!("Render error: {:#}", e);
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Escape => {
                if self.controller.cancel_transition() {
                    log::info!("Transition stopped");
                }
            }
            KeyCode::KeyH => self.control_panel.toggle(),
            _ => {
                if let Some(index) = digit_index(code) {
                    if let Some(destination) = self.control_panel.select_index(index) {
                        self.fly_to(destination);
                    }
                }
            }
        }
    }
}

/// Window size in logical pixels, the unit the viewport is measured in.
fn logical_size(window: &Window, size: PhysicalSize<u32>) -> (u32, u32) {
    let logical = size.to_logical::<f64>(window.scale_factor());
    (
        logical.width.round().max(0.0) as u32,
        logical.height.round().max(0.0) as u32,
    )
}

/// Destination hotkeys 1-9.
fn digit_index(code: KeyCode) -> Option<usize> {
    let index = match code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        KeyCode::Digit8 => 7,
        KeyCode::Digit9 => 8,
        _ => return None,
    };
    Some(index)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window and renderer are already initialized in new()
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle events first
        let _ = self.egui_state.on_window_event(&self.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size.width, size.height);
                self.controller
                    .on_resize(logical_size(&self.window, size), self.resize_overrides);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.window.inner_size();
                self.controller
                    .on_resize(logical_size(&self.window, size), self.resize_overrides);
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                // Skip input if egui wants it
                if self.egui_ctx.wants_keyboard_input() {
                    return;
                }
                if key_event.state != ElementState::Pressed || key_event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = key_event.physical_key {
                    log::debug!("Keyboard: {:?}", code);
                    self.handle_key(code);
                }
            }
            WindowEvent::RedrawRequested => {
                self.handle_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.window.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_hotkeys() {
        assert_eq!(digit_index(KeyCode::Digit1), Some(0));
        assert_eq!(digit_index(KeyCode::Digit9), Some(8));
        assert_eq!(digit_index(KeyCode::Digit0), None);
        assert_eq!(digit_index(KeyCode::KeyA), None);
    }
}
