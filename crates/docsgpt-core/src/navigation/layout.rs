use crate::dismissal::Bounds;

/// Top-level view of the application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Chat,
    Settings,
    About,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Chat => "chat",
            Route::Settings => "settings",
            Route::About => "about",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewport width against the narrow breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    narrow_breakpoint: u32,
}

impl Viewport {
    pub fn new(width: u32, narrow_breakpoint: u32) -> Self {
        Self {
            width,
            narrow_breakpoint,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Narrow up to and including the breakpoint.
    pub fn is_narrow(&self) -> bool {
        self.width <= self.narrow_breakpoint
    }

    pub(super) fn with_width(self, width: u32) -> Self {
        Self { width, ..self }
    }
}

/// Measured bounds of the panel's hit-test regions.
///
/// `None` means the element is not laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelLayout {
    pub panel: Option<Bounds>,
    pub panel_toggle: Option<Bounds>,
    pub docs_list: Option<Bounds>,
    pub docs_toggle: Option<Bounds>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert!(Viewport::new(768, 768).is_narrow());
        assert!(!Viewport::new(769, 768).is_narrow());
        assert!(Viewport::new(320, 768).is_narrow());
    }

    #[test]
    fn test_with_width_keeps_breakpoint() {
        let viewport = Viewport::new(1280, 768).with_width(500);
        assert_eq!(viewport.width(), 500);
        assert!(viewport.is_narrow());
    }
}
