use std::path::PathBuf;

use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::file_handler::{self, PendingImport};
use crate::panels;
use crate::renderer::Renderer;
use crate::session::CanvasSession;

pub struct CanvasApp {
    pub(crate) session: CanvasSession,
    pub(crate) renderer: Renderer,
    pending_import: PendingImport,
    export_dir: PathBuf,
    /// Screen position of the surface's top-left corner in the last frame
    pub(crate) canvas_origin: egui::Pos2,
    /// Set on the frame a text overlay opens so its field grabs focus once
    pub(crate) focus_overlay: bool,
    pub(crate) font_size: f32,
}

impl CanvasApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: &CanvasConfig) -> CanvasResult<Self> {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Ok(Self::from_session(CanvasSession::new(config)?, config))
    }

    pub fn from_session(session: CanvasSession, config: &CanvasConfig) -> Self {
        Self {
            session,
            renderer: Renderer::new(),
            pending_import: PendingImport::new(),
            export_dir: config.export_dir.clone(),
            canvas_origin: egui::Pos2::ZERO,
            focus_overlay: false,
            font_size: config.font_size,
        }
    }

    pub fn session(&self) -> &CanvasSession {
        &self.session
    }

    pub fn pending_import(&self) -> &PendingImport {
        &self.pending_import
    }

    pub fn export(&self) {
        let result = self
            .session
            .export_jpeg()
            .and_then(|bytes| file_handler::deliver_export(&bytes, &self.export_dir));
        if let Err(err) = result {
            log::error!("Export failed: {}", err);
        }
    }

    pub fn request_import(&self, ctx: &egui::Context) {
        self.pending_import.request(ctx);
    }

    /// Applies a finished file pick, if any. Decode failures leave the
    /// surface unchanged and are only logged.
    pub fn drain_import(&mut self) {
        let Some(file) = self.pending_import.take() else {
            return;
        };
        log::info!("Importing {} ({} bytes)", file.name, file.bytes.len());
        if let Err(err) = self.session.import_image_bytes(&file.bytes) {
            log::debug!("Surface left unchanged: {}", err);
        }
    }

    /// Lays out one frame of the UI
    pub fn show(&mut self, ctx: &egui::Context) {
        self.drain_import();

        panels::toolbar(self, ctx);
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
    }

    /// Maps a screen position over the canvas to surface coordinates
    pub fn screen_to_surface(&self, screen: egui::Pos2) -> egui::Pos2 {
        let scale = self.session.zoom().scale();
        egui::Pos2::ZERO + (screen - self.canvas_origin) / scale
    }

    /// Inverse of [`CanvasApp::screen_to_surface`]
    pub fn surface_to_screen(&self, surface: egui::Pos2) -> egui::Pos2 {
        self.canvas_origin + surface.to_vec2() * self.session.zoom().scale()
    }
}

impl eframe::App for CanvasApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_handler::ImportedFile;

    fn test_app() -> CanvasApp {
        let config = CanvasConfig {
            width: 40,
            height: 30,
            ..CanvasConfig::default()
        };
        CanvasApp::from_session(CanvasSession::new(&config).unwrap(), &config)
    }

    #[test]
    fn test_coordinate_mapping_accounts_for_zoom_and_origin() {
        let mut app = test_app();
        app.canvas_origin = egui::pos2(100.0, 50.0);
        app.session.zoom_in();
        app.session.zoom_in();

        let surface = app.screen_to_surface(egui::pos2(112.0, 62.0));
        assert!((surface.x - 10.0).abs() < 1e-3 && (surface.y - 10.0).abs() < 1e-3);

        let screen = app.surface_to_screen(surface);
        assert!((screen.x - 112.0).abs() < 1e-3 && (screen.y - 62.0).abs() < 1e-3);
    }

    #[test]
    fn test_drain_import_ignores_bad_file() {
        let mut app = test_app();
        let version = app.session().surface().version();

        assert!(app.pending_import().begin());
        app.pending_import().finish(Some(ImportedFile {
            name: "broken.png".to_owned(),
            bytes: b"garbage".to_vec(),
        }));
        app.drain_import();

        assert_eq!(app.session().surface().version(), version);
        assert!(app.pending_import().begin());
    }

    #[test]
    fn test_drain_import_replaces_surface() {
        let mut app = test_app();
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([0, 0, 255, 255]),
        ))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

        assert!(app.pending_import().begin());
        app.pending_import().finish(Some(ImportedFile {
            name: "blue.png".to_owned(),
            bytes: png,
        }));
        app.drain_import();

        let pixel = app.session().surface().pixel(39, 29).unwrap();
        assert!(pixel[2] > 250 && pixel[0] < 5);
    }

    // Drives whole frames through the panels the way eframe would
    struct UiHarness {
        ctx: egui::Context,
        app: CanvasApp,
    }

    impl UiHarness {
        fn with_text_tool() -> Self {
            let config = CanvasConfig {
                width: 300,
                height: 200,
                ..CanvasConfig::default()
            };
            let mut app = CanvasApp::from_session(CanvasSession::new(&config).unwrap(), &config);
            app.session.select_tool(crate::ToolKind::Text);
            let mut harness = Self {
                ctx: egui::Context::default(),
                app,
            };
            // First frame lays the canvas out so its origin is known
            harness.frame(Vec::new());
            harness
        }

        fn frame(&mut self, events: Vec<egui::Event>) {
            let input = egui::RawInput {
                screen_rect: Some(egui::Rect::from_min_size(
                    egui::Pos2::ZERO,
                    egui::vec2(1024.0, 768.0),
                )),
                events,
                ..Default::default()
            };
            let app = &mut self.app;
            let _ = self.ctx.run(input, |ctx| app.show(ctx));
        }

        fn canvas_point(&self, x: f32, y: f32) -> egui::Pos2 {
            self.app.canvas_origin + egui::vec2(x, y)
        }

        fn press(&mut self, pos: egui::Pos2) {
            self.frame(vec![
                egui::Event::PointerMoved(pos),
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    modifiers: egui::Modifiers::NONE,
                },
            ]);
        }

        fn release(&mut self, pos: egui::Pos2) {
            self.frame(vec![egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: false,
                modifiers: egui::Modifiers::NONE,
            }]);
        }

        fn click(&mut self, pos: egui::Pos2) {
            self.press(pos);
            self.release(pos);
        }

        fn type_text(&mut self, text: &str) {
            self.frame(vec![egui::Event::Text(text.to_owned())]);
        }

        fn press_enter(&mut self) {
            self.frame(vec![egui::Event::Key {
                key: egui::Key::Enter,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }]);
        }

        fn inked_in(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
            let surface = self.app.session().surface();
            (y0..y1)
                .flat_map(|y| (x0..x1).map(move |x| (x, y)))
                .filter(|&(x, y)| surface.pixel(x, y).is_some_and(|p| p[0] < 200))
                .count()
        }
    }

    #[test]
    fn test_overlay_commits_on_enter() {
        let mut ui = UiHarness::with_text_tool();
        let at = ui.canvas_point(50.0, 60.0);

        ui.click(at);
        let entry = ui.app.session().text_entry();
        assert!(entry.is_composing());
        assert_eq!(entry.anchor(), Some(egui::pos2(50.0, 60.0)));

        ui.type_text("Hi");
        assert_eq!(ui.app.session.text_buffer_mut().map(|b| b.as_str()), Some("Hi"));

        ui.press_enter();
        ui.frame(Vec::new());

        assert!(ui.app.session().text_entry().is_idle());
        assert!(ui.inked_in(48, 40, 120, 62) > 0);
        assert_eq!(ui.inked_in(0, 100, 300, 200), 0);
    }

    #[test]
    fn test_overlay_commits_on_click_elsewhere_without_reopening() {
        let mut ui = UiHarness::with_text_tool();
        ui.click(ui.canvas_point(50.0, 60.0));
        ui.type_text("Hi");
        assert!(ui.app.session().text_entry().is_composing());

        let elsewhere = ui.canvas_point(150.0, 150.0);
        ui.press(elsewhere);
        assert!(ui.app.session().text_entry().is_idle());
        ui.release(elsewhere);
        ui.frame(Vec::new());

        assert!(ui.app.session().text_entry().is_idle());
        assert!(!ui.app.focus_overlay);
        assert!(ui.inked_in(48, 40, 120, 62) > 0);
    }

    #[test]
    fn test_overlay_anchor_maps_through_zoom() {
        let mut ui = UiHarness::with_text_tool();
        ui.app.session.zoom_in();
        ui.app.session.zoom_in();
        ui.frame(Vec::new());

        ui.click(ui.canvas_point(120.0, 120.0));

        let anchor = ui.app.session().text_entry().anchor().unwrap();
        assert!((anchor.x - 100.0).abs() < 1e-3, "anchor {anchor:?}");
        assert!((anchor.y - 100.0).abs() < 1e-3, "anchor {anchor:?}");
    }
}
