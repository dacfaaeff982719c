use egui::CursorIcon;

use super::ToolKind;

/// Handle for one tool button on the rail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolControl {
    pub tool: ToolKind,
    pub highlighted: bool,
}

/// Fixed mapping from each tool to its control, built once at startup.
///
/// Invariant: after the first `select`, exactly one control is highlighted
/// and it belongs to the active tool.
#[derive(Debug, Clone)]
pub struct ToolControls {
    controls: [ToolControl; ToolKind::ALL.len()],
    active: Option<ToolKind>,
}

impl Default for ToolControls {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolControls {
    pub fn new() -> Self {
        Self {
            controls: ToolKind::ALL.map(|tool| ToolControl {
                tool,
                highlighted: false,
            }),
            active: None,
        }
    }

    pub fn active(&self) -> Option<ToolKind> {
        self.active
    }

    pub fn controls(&self) -> &[ToolControl] {
        &self.controls
    }

    pub fn control(&self, tool: ToolKind) -> &ToolControl {
        &self.controls[Self::slot(tool)]
    }

    /// Makes `tool` the active tool. Returns the previously active one.
    pub fn select(&mut self, tool: ToolKind) -> Option<ToolKind> {
        for control in &mut self.controls {
            control.highlighted = false;
        }
        self.controls[Self::slot(tool)].highlighted = true;
        self.active.replace(tool)
    }

    pub fn highlighted_count(&self) -> usize {
        self.controls.iter().filter(|c| c.highlighted).count()
    }

    pub fn cursor(&self) -> CursorIcon {
        self.active.map_or(CursorIcon::Default, ToolKind::cursor)
    }

    fn slot(tool: ToolKind) -> usize {
        // ALL is declared in enum order
        tool as usize
    }
}
