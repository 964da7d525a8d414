#![forbid(unsafe_code)]

//! Light/dark presentation flag.

/// Presentation mode, mirrored by the renderer as a class on the document
/// root. Persistence, if any, is the host's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ThemeMode {
    /// Dark presentation (the page default).
    #[default]
    Dark,
    /// Light presentation.
    Light,
}

impl ThemeMode {
    /// The opposite mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Flip in place.
    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    /// The class the renderer mirrors onto the document root.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}
