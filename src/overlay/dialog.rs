/// Visibility of the settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

impl DialogState {
    pub fn is_open(self) -> bool {
        matches!(self, DialogState::Open)
    }
}

/// The two actions the overlay offers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayControl {
    EditSettings,
    Delete,
}

impl OverlayControl {
    pub fn tooltip(self) -> &'static str {
        match self {
            OverlayControl::EditSettings => "Edit settings",
            OverlayControl::Delete => "Delete widget",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            OverlayControl::EditSettings => "⚙",
            OverlayControl::Delete => "🗑",
        }
    }
}
