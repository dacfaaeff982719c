use crate::event::{EventHandler, SessionEvent};

/// Forwards session events to the `log` facade
#[derive(Debug, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::ToolChanged { new, .. } => log::info!("{} selected", new),
            SessionEvent::ImportFailed { reason } => log::warn!("Image import failed: {}", reason),
            SessionEvent::Exported { bytes } => log::info!("Exported surface ({} bytes)", bytes),
            SessionEvent::Imported {
                source_width,
                source_height,
            } => log::info!("Imported {}x{} image", source_width, source_height),
            other => log::debug!("{:?}", other),
        }
    }
}
