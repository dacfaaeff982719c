//! The canvas session: one owned object holding the surface, the active
//! tool, zoom, the undo/redo counters and the text overlay.
//!
//! Every UI affordance maps onto exactly one method here. Methods that
//! change observable state emit a [`SessionEvent`] on the session's bus.

use egui::{CursorIcon, Pos2};

use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::event::{EventBus, EventHandler, LogEventHandler, SessionEvent};
use crate::file_handler;
use crate::history::UndoRedoCounters;
use crate::surface::Surface;
use crate::text::{TextEntry, TextRasterizer};
use crate::tool::{ToolControls, ToolKind};
use crate::zoom::ZoomLevel;

#[derive(Debug)]
pub struct CanvasSession {
    surface: Surface,
    controls: ToolControls,
    zoom: ZoomLevel,
    counters: UndoRedoCounters,
    text_entry: TextEntry,
    rasterizer: TextRasterizer,
    jpeg_quality: u8,
    event_bus: EventBus,
}

impl CanvasSession {
    /// Allocates the surface and runs [`CanvasSession::initialize`]
    pub fn new(config: &CanvasConfig) -> CanvasResult<Self> {
        let mut session = Self {
            surface: Surface::new(config.width, config.height)?,
            controls: ToolControls::new(),
            zoom: ZoomLevel::default(),
            counters: UndoRedoCounters::new(),
            text_entry: TextEntry::default(),
            rasterizer: TextRasterizer::bundled(config.font_size)?,
            jpeg_quality: config.jpeg_quality,
            event_bus: EventBus::new(),
        };
        session.event_bus.subscribe(Box::new(LogEventHandler));
        session.initialize();
        Ok(session)
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    /// Fills the whole surface with opaque white
    pub fn initialize(&mut self) {
        self.surface.fill_white();
        self.event_bus.emit(SessionEvent::Initialized {
            width: self.surface.width(),
            height: self.surface.height(),
        });
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn counters(&self) -> UndoRedoCounters {
        self.counters
    }

    pub fn controls(&self) -> &ToolControls {
        &self.controls
    }

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.controls.active()
    }

    pub fn cursor(&self) -> CursorIcon {
        self.controls.cursor()
    }

    pub fn text_entry(&self) -> &TextEntry {
        &self.text_entry
    }

    /// Encodes the current surface as JPEG
    pub fn export_jpeg(&self) -> CanvasResult<Vec<u8>> {
        let bytes = file_handler::encode_jpeg(&self.surface, self.jpeg_quality)?;
        self.event_bus.emit(SessionEvent::Exported { bytes: bytes.len() });
        Ok(bytes)
    }

    /// Decodes `bytes` and stretches the result over the whole surface.
    /// On failure the surface is left untouched.
    pub fn import_image_bytes(&mut self, bytes: &[u8]) -> CanvasResult<()> {
        let image = match file_handler::decode_image(bytes) {
            Ok(image) => image,
            Err(err) => {
                self.event_bus.emit(SessionEvent::ImportFailed {
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };
        self.surface.replace_scaled(&image);
        self.event_bus.emit(SessionEvent::Imported {
            source_width: image.width(),
            source_height: image.height(),
        });
        Ok(())
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.zoom.zoom_in();
        self.emit_zoom(changed);
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.zoom.zoom_out();
        self.emit_zoom(changed);
        changed
    }

    fn emit_zoom(&self, changed: bool) {
        if changed {
            self.event_bus.emit(SessionEvent::ZoomChanged {
                percent: self.zoom.percent(),
            });
        }
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.counters.undo();
        self.emit_counters(changed);
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.counters.redo();
        self.emit_counters(changed);
        changed
    }

    fn emit_counters(&self, changed: bool) {
        if changed {
            self.event_bus.emit(SessionEvent::CountersChanged {
                undo: self.counters.undo_count(),
                redo: self.counters.redo_count(),
            });
        }
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        let old = self.controls.select(tool);
        self.event_bus.emit(SessionEvent::ToolChanged { old, new: tool });
    }

    /// Pointer pressed on the canvas at `pos` (surface coordinates).
    ///
    /// Starts a text overlay when the Text tool is active and none is open.
    /// Returns true if an overlay was opened.
    pub fn pointer_down(&mut self, pos: Pos2) -> bool {
        if self.active_tool() != Some(ToolKind::Text) || !self.text_entry.is_idle() {
            return false;
        }
        match self.text_entry.begin(pos) {
            Ok(()) => {
                self.event_bus
                    .emit(SessionEvent::TextCompositionStarted { anchor: pos });
                true
            }
            Err(err) => {
                log::debug!("Ignoring pointer down: {}", err);
                false
            }
        }
    }

    /// Editable buffer of the open overlay, if any
    pub fn text_buffer_mut(&mut self) -> Option<&mut String> {
        self.text_entry.buffer_mut()
    }

    /// Rasterizes the overlay text (even when empty) at its anchor and
    /// closes the overlay. Called for both Enter and focus loss. No-op when
    /// no overlay is open.
    pub fn commit_text(&mut self) -> CanvasResult<()> {
        if !self.text_entry.is_composing() {
            return Ok(());
        }
        self.text_entry.start_commit()?;
        let (anchor, text) = self.text_entry.finish_commit()?;
        self.rasterizer.draw(&mut self.surface, &text, anchor);
        self.event_bus.emit(SessionEvent::TextCommitted { text, anchor });
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_counters(&mut self, counters: UndoRedoCounters) {
        self.counters = counters;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;
    use egui::pos2;

    fn small_session() -> CanvasSession {
        let config = CanvasConfig {
            width: 120,
            height: 90,
            ..CanvasConfig::default()
        };
        CanvasSession::new(&config).unwrap()
    }

    #[test]
    fn test_new_session_defaults() {
        let session = small_session();
        assert_eq!(session.surface().size(), [120, 90]);
        assert_eq!(session.zoom().percent(), 100);
        assert_eq!(session.active_tool(), None);
        assert!(session.text_entry().is_idle());
        assert_eq!(session.cursor(), CursorIcon::Default);
    }

    #[test]
    fn test_new_session_rejects_non_positive_font_size() {
        for font_size in [0.0, -4.0, f32::NAN] {
            let config = CanvasConfig {
                width: 120,
                height: 90,
                font_size,
                ..CanvasConfig::default()
            };
            assert!(matches!(
                CanvasSession::new(&config),
                Err(CanvasError::InvalidFontSize(_))
            ));
        }
    }

    #[test]
    fn test_pointer_down_ignored_without_text_tool() {
        let mut session = small_session();
        assert!(!session.pointer_down(pos2(10.0, 10.0)));
        session.select_tool(ToolKind::Brush);
        assert!(!session.pointer_down(pos2(10.0, 10.0)));
        assert!(session.text_entry().is_idle());
    }

    #[test]
    fn test_second_click_while_composing_is_ignored() {
        let mut session = small_session();
        session.select_tool(ToolKind::Text);
        assert!(session.pointer_down(pos2(10.0, 20.0)));
        assert!(!session.pointer_down(pos2(70.0, 80.0)));
        assert_eq!(session.text_entry().anchor(), Some(pos2(10.0, 20.0)));
    }

    #[test]
    fn test_commit_without_overlay_is_noop() {
        let mut session = small_session();
        let version = session.surface().version();
        session.commit_text().unwrap();
        assert_eq!(session.surface().version(), version);
    }

    #[test]
    fn test_undo_redo_only_count_down() {
        let mut session = small_session();
        session.set_counters(UndoRedoCounters::with_counts(1, 0));
        let version = session.surface().version();

        assert!(session.undo());
        assert!(!session.undo());
        assert!(!session.redo());
        assert_eq!(session.counters().undo_count(), 0);
        assert_eq!(session.surface().version(), version);
    }
}
