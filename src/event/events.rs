use egui::Pos2;

use crate::tool::ToolKind;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Initialized {
        width: u32,
        height: u32,
    },
    ToolChanged {
        old: Option<ToolKind>,
        new: ToolKind,
    },
    ZoomChanged {
        percent: u32,
    },
    CountersChanged {
        undo: u32,
        redo: u32,
    },
    Exported {
        bytes: usize,
    },
    Imported {
        source_width: u32,
        source_height: u32,
    },
    ImportFailed {
        reason: String,
    },
    TextCompositionStarted {
        anchor: Pos2,
    },
    TextCommitted {
        text: String,
        anchor: Pos2,
    },
}
