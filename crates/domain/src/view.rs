//! Panel view toggle: either the log or the map is visible, never both.

/// Which of the two main panels is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelView {
    #[default]
    Log,
    Map,
}

impl PanelView {
    /// Flip to the other panel.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Log => Self::Map,
            Self::Map => Self::Log,
        }
    }

    /// Flip in place and return the new view.
    pub fn toggle(&mut self) -> Self {
        *self = self.toggled();
        *self
    }

    #[must_use]
    pub fn log_visible(self) -> bool {
        self == Self::Log
    }

    #[must_use]
    pub fn map_visible(self) -> bool {
        self == Self::Map
    }

    /// Label of the toggle button: names the panel a click would show.
    #[must_use]
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Log => "Map",
            Self::Map => "Log",
        }
    }
}
