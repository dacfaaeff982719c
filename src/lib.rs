#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod history;
pub mod panels;
pub mod renderer;
pub mod session;
pub mod surface;
pub mod text;
pub mod tool;
pub mod zoom;

pub use app::CanvasApp;
pub use config::CanvasConfig;
pub use error::{CanvasError, CanvasResult, TransitionError};
pub use event::{EventBus, EventHandler, SessionEvent};
pub use history::UndoRedoCounters;
pub use renderer::Renderer;
pub use session::CanvasSession;
pub use surface::Surface;
pub use text::{TextEntry, TextRasterizer};
pub use tool::{ToolControls, ToolKind};
pub use zoom::ZoomLevel;
