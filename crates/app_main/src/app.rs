//! Application main loop

use crate::gpu::Gpu;
use anyhow::Result;
use app_core::{
    spawn_probe, AppConfig, FsAssetSource, JsonFileStore, MemoryStore, PlayOrigin,
    PreferenceStore, ProbeEvent, ProbeHandle, ViewerController,
};
use app_ui::{
    components::{GalleryGrid, Lightbox, ProbeStatus, SettingsBounds, SettingsPanel},
    InputHandler, TextureCache, Theme, UiAction,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// How often background work (probe, decoders) is polled while it runs
const BACKGROUND_POLL: Duration = Duration::from_millis(30);

/// Main application state for the event loop
struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    egui_ctx: egui::Context,
    egui_state: Option<egui_winit::State>,

    // Viewer
    controller: ViewerController,
    probe: ProbeHandle,
    textures: TextureCache,

    // UI Components
    grid: GalleryGrid,
    settings_panel: SettingsPanel,
    input_handler: InputHandler,
    theme: Theme,

    /// When egui last asked to be repainted
    egui_repaint_at: Option<Instant>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let store: Box<dyn PreferenceStore> = match AppConfig::config_dir() {
            Some(dir) => Box::new(JsonFileStore::in_dir(&dir)),
            None => {
                tracing::warn!("No config directory; preferences will not be saved");
                Box::new(MemoryStore::new())
            }
        };

        let controller = ViewerController::new(
            store,
            Duration::from_millis(config.viewer.cursor_idle_ms),
        );

        tracing::info!("Album directory: {:?}", config.album.base_path);
        let source = Arc::new(FsAssetSource::new(config.album.clone()));
        let probe = spawn_probe(source, config.album.total_images);

        let textures = TextureCache::new(config.viewer.thumbnail_size.round().max(1.0) as u32);
        let grid = GalleryGrid::new(config.viewer.thumbnail_size);
        let settings_panel = SettingsPanel::new(SettingsBounds::from_config(&config.viewer));
        let theme = Theme::by_name(&config.general.theme);

        Self {
            config,
            window: None,
            gpu: None,
            egui_ctx: egui::Context::default(),
            egui_state: None,
            controller,
            probe,
            textures,
            grid,
            settings_panel,
            input_handler: InputHandler::new(),
            theme,
            egui_repaint_at: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.general.window_title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let gpu = pollster::block_on(Gpu::new(window.clone()))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        self.theme.apply(&self.egui_ctx);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);

        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Feed background results and due timers into the controller
    fn pump(&mut self, now: Instant) -> bool {
        let mut changed = false;

        for event in self.probe.drain() {
            match event {
                ProbeEvent::Found(image) => {
                    changed |= self.controller.asset_resolved(image).is_some();
                }
                ProbeEvent::Finished { found, missing } => {
                    tracing::info!("Album probe finished: {} found, {} missing", found, missing);
                    self.controller.probe_finished();
                    changed = true;
                }
            }
        }

        changed |= self.controller.tick(now).changed();
        changed |= self.textures.poll(&self.egui_ctx);
        changed
    }

    fn apply_action(&mut self, action: UiAction, now: Instant) {
        match action {
            UiAction::Click(target) => self.controller.click(target, now),
            UiAction::ToggleZoom => self.controller.toggle_zoom(),
            UiAction::TogglePlay => self.controller.toggle_play(PlayOrigin::Control, now),
            UiAction::ChangeDelay { ms } => self.controller.change_delay(ms, now),
            UiAction::SetShowCounter(show) => self.controller.set_show_counter(show),
        }
    }

    fn render(&mut self) {
        let window = match &self.window {
            Some(w) => w.clone(),
            None => return,
        };

        self.pump(Instant::now());

        let frame = self.controller.frame();
        if let Some(overlay) = &frame.overlay {
            self.textures.request_full(&overlay.image);
        }

        let egui_state = match &mut self.egui_state {
            Some(s) => s,
            None => return,
        };
        let raw_input = egui_state.take_egui_input(&window);

        let status = if self.probe.is_finished() {
            ProbeStatus::Finished
        } else {
            ProbeStatus::Scanning
        };
        let images = self.controller.gallery().as_slice();
        let textures = &mut self.textures;
        let grid = &self.grid;
        let settings_panel = &self.settings_panel;
        let theme = &self.theme;
        let mut actions: Vec<UiAction> = Vec::new();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none().fill(theme.background).inner_margin(16.0))
                .show(ctx, |ui| {
                    grid.ui(ui, images, textures, status, theme, &mut actions);
                });

            if let Some(overlay) = &frame.overlay {
                let number = overlay.image.number;
                Lightbox::ui(
                    ctx,
                    overlay,
                    textures.full(number),
                    textures.has_failed(number),
                    theme,
                    &mut actions,
                );
                if overlay.settings_visible {
                    settings_panel.ui(ctx, &frame, theme, &mut actions);
                }
            }
        });

        let now = Instant::now();
        let acted = !actions.is_empty();
        for action in actions {
            self.apply_action(action, now);
        }

        if let Some(egui_state) = &mut self.egui_state {
            egui_state.handle_platform_output(&window, full_output.platform_output);
        }

        self.egui_repaint_at = full_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .and_then(|viewport| now.checked_add(viewport.repaint_delay));

        let clipped_primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        if let Some(gpu) = &mut self.gpu {
            gpu.paint(
                &clipped_primitives,
                &full_output.textures_delta,
                full_output.pixels_per_point,
            );
        }

        if acted {
            window.request_redraw();
        }
    }

    /// Earliest moment the loop needs to wake up on its own
    fn next_wakeup(&self, now: Instant) -> Option<Instant> {
        let background = (!self.probe.is_finished() || self.textures.is_busy())
            .then(|| now + BACKGROUND_POLL);

        [background, self.controller.next_deadline(), self.egui_repaint_at]
            .into_iter()
            .flatten()
            .min()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to initialize window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let now = Instant::now();

        // Viewer keys win over egui; consumed keys never reach it
        if let WindowEvent::KeyboardInput { event: key_event, .. } = &event {
            if let Some(key) = self.input_handler.handle_key(key_event) {
                if self.controller.key(key, now).is_consumed() {
                    self.request_redraw();
                    return;
                }
            }
        }

        if let WindowEvent::CursorMoved { .. } = &event {
            let was_hidden = self.controller.is_open() && !self.controller.state().cursor_visible;
            self.controller.pointer_moved(now);
            if was_hidden {
                self.request_redraw();
            }
        }

        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if self.pump(now) {
            self.request_redraw();
        }
        if self.egui_repaint_at.map_or(false, |at| at <= now) {
            self.egui_repaint_at = None;
            self.request_redraw();
        }

        match self.next_wakeup(now) {
            Some(at) => event_loop.set_control_flow(ControlFlow::WaitUntil(at)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

/// Run the application
pub fn run(config: AppConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
