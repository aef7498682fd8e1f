// Scroll-to-top button state.

/// Offset, in pixels, past which the button is shown.
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// Where activating the button scrolls to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    pub top: u32,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollToTop {
    threshold: u32,
    visible: bool,
}

impl Default for ScrollToTop {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl ScrollToTop {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Updates visibility for the current page offset. Returns true if it changed.
    pub fn on_scroll(&mut self, page_offset: u32) -> bool {
        let visible = page_offset > self.threshold;
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }

    pub fn activate(&self) -> ScrollTarget {
        ScrollTarget {
            top: 0,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let mut btn = ScrollToTop::default();
        assert!(!btn.is_visible());
        assert!(!btn.on_scroll(300));
        assert!(!btn.is_visible());
        assert!(btn.on_scroll(301));
        assert!(btn.is_visible());
        assert!(!btn.on_scroll(900));
        assert!(btn.on_scroll(0));
        assert!(!btn.is_visible());
    }

    #[test]
    fn test_activate_goes_to_top() {
        let btn = ScrollToTop::new(50);
        assert_eq!(
            btn.activate(),
            ScrollTarget {
                top: 0,
                behavior: ScrollBehavior::Smooth
            }
        );
    }
}
