mod controls;

pub use controls::{ToolControl, ToolControls};

use egui::CursorIcon;

/// Every tool exposed on the tool rail.
///
/// Only `Text` has behaviour on the canvas; the rest are selectable but
/// do not touch pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Brush,
    Eraser,
    Move,
    Shape,
    ColorPicker,
    PaintBucket,
    Text,
    CloneStamp,
    Selection,
}

impl ToolKind {
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Move,
        ToolKind::Shape,
        ToolKind::ColorPicker,
        ToolKind::PaintBucket,
        ToolKind::Text,
        ToolKind::CloneStamp,
        ToolKind::Selection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Eraser => "Eraser",
            Self::Move => "Move",
            Self::Shape => "Shape",
            Self::ColorPicker => "Color Picker",
            Self::PaintBucket => "Paint Bucket",
            Self::Text => "Text",
            Self::CloneStamp => "Clone Stamp",
            Self::Selection => "Selection",
        }
    }

    /// Stable identifier of the control bound to this tool
    pub fn control_id(self) -> &'static str {
        match self {
            Self::Brush => "brush-tool",
            Self::Eraser => "eraser-tool",
            Self::Move => "move-tool",
            Self::Shape => "shape-tool",
            Self::ColorPicker => "color-picker",
            Self::PaintBucket => "paint-bucket",
            Self::Text => "text-tool",
            Self::CloneStamp => "clone-stamp",
            Self::Selection => "selection-tool",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Brush => "🖌",
            Self::Eraser => "⌫",
            Self::Move => "✋",
            Self::Shape => "⬜",
            Self::ColorPicker => "💧",
            Self::PaintBucket => "🪣",
            Self::Text => "T",
            Self::CloneStamp => "⎘",
            Self::Selection => "◻",
        }
    }

    /// Pointer cursor shown over the canvas while this tool is active
    pub fn cursor(self) -> CursorIcon {
        match self {
            Self::Text => CursorIcon::Text,
            _ => CursorIcon::Grab,
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.control_id())
    }
}
