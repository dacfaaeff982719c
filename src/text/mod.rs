mod rasterizer;

pub use rasterizer::TextRasterizer;

use egui::Pos2;

use crate::error::TransitionError;

/// Lifecycle of the single-line text overlay.
///
/// ```text
/// Idle --pointer down (Text tool)--> Composing --Enter / focus lost--> Committing --> Idle
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TextEntry {
    #[default]
    Idle,
    Composing {
        /// Surface position the text will be drawn at
        anchor: Pos2,
        buffer: String,
    },
    Committing {
        anchor: Pos2,
        text: String,
    },
}

/// Discriminant of [`TextEntry`], used in transition errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEntryKind {
    Idle,
    Composing,
    Committing,
}

impl TextEntry {
    pub fn kind(&self) -> TextEntryKind {
        match self {
            Self::Idle => TextEntryKind::Idle,
            Self::Composing { .. } => TextEntryKind::Composing,
            Self::Committing { .. } => TextEntryKind::Committing,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_composing(&self) -> bool {
        matches!(self, Self::Composing { .. })
    }

    pub fn anchor(&self) -> Option<Pos2> {
        match self {
            Self::Idle => None,
            Self::Composing { anchor, .. } | Self::Committing { anchor, .. } => Some(*anchor),
        }
    }

    pub fn buffer_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Composing { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: TextEntryKind) -> bool {
        matches!(
            (self.kind(), next),
            (TextEntryKind::Idle, TextEntryKind::Composing)
                | (TextEntryKind::Composing, TextEntryKind::Committing)
                | (TextEntryKind::Committing, TextEntryKind::Idle)
        )
    }

    /// Idle -> Composing, anchored at `anchor` with an empty buffer
    pub fn begin(&mut self, anchor: Pos2) -> Result<(), TransitionError> {
        self.check(TextEntryKind::Composing)?;
        *self = Self::Composing {
            anchor,
            buffer: String::new(),
        };
        Ok(())
    }

    /// Composing -> Committing. The buffer contents move into the new state.
    pub fn start_commit(&mut self) -> Result<(), TransitionError> {
        self.check(TextEntryKind::Committing)?;
        if let Self::Composing { anchor, buffer } = std::mem::take(self) {
            *self = Self::Committing {
                anchor,
                text: buffer,
            };
        }
        Ok(())
    }

    /// Committing -> Idle, handing back what has to be drawn
    pub fn finish_commit(&mut self) -> Result<(Pos2, String), TransitionError> {
        self.check(TextEntryKind::Idle)?;
        match std::mem::take(self) {
            Self::Committing { anchor, text } => Ok((anchor, text)),
            // check() only lets Committing through
            other => Err(TransitionError::InvalidStateTransition {
                from: other.kind(),
                to: TextEntryKind::Idle,
            }),
        }
    }

    fn check(&self, next: TextEntryKind) -> Result<(), TransitionError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(TransitionError::InvalidStateTransition {
                from: self.kind(),
                to: next,
            })
        }
    }
}
