/// Display zoom in whole percent. Only affects how the surface is drawn,
/// never its resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevel(u32);

impl ZoomLevel {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 200;
    pub const STEP: u32 = 10;

    pub fn new(percent: u32) -> Self {
        Self(percent.clamp(Self::MIN, Self::MAX))
    }

    pub fn percent(self) -> u32 {
        self.0
    }

    /// Returns true if the level changed
    pub fn zoom_in(&mut self) -> bool {
        self.set((self.0 + Self::STEP).min(Self::MAX))
    }

    /// Returns true if the level changed
    pub fn zoom_out(&mut self) -> bool {
        self.set(self.0.saturating_sub(Self::STEP).max(Self::MIN))
    }

    /// Scale factor applied to the surface when drawn
    pub fn scale(self) -> f32 {
        self.0 as f32 / 100.0
    }

    pub fn label(self) -> String {
        format!("{}%", self.0)
    }

    fn set(&mut self, percent: u32) -> bool {
        let changed = self.0 != percent;
        self.0 = percent;
        changed
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(100)
    }
}
