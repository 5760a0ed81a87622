//! Menu visibility and scroll position.

use serde::{Deserialize, Serialize};

/// Accumulated scroll offset of the menu content, in gesture units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// A change in menu visibility, reported so the surrounding UI can run its
/// own side effects (e.g. collecting or re-applying edited parameters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuTransition {
    Shown,
    Hidden,
}

/// Whether the menu is shown, plus its scroll state.
///
/// Setters return `Some(transition)` only when visibility actually changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuState {
    shown: bool,
    scroll: ScrollOffset,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    pub fn set_shown(&mut self, shown: bool) -> Option<MenuTransition> {
        if self.shown == shown {
            return None;
        }
        self.shown = shown;
        Some(if shown {
            MenuTransition::Shown
        } else {
            MenuTransition::Hidden
        })
    }

    pub fn show(&mut self) -> Option<MenuTransition> {
        self.set_shown(true)
    }

    pub fn hide(&mut self) -> Option<MenuTransition> {
        self.set_shown(false)
    }

    /// Inverts visibility; always produces a transition.
    pub fn toggle(&mut self) -> MenuTransition {
        let shown = !self.shown;
        self.shown = shown;
        if shown {
            MenuTransition::Shown
        } else {
            MenuTransition::Hidden
        }
    }

    /// Moves the content opposite to the finger, like native touch scrolling.
    pub fn scroll_by(&mut self, delta_x: f64, delta_y: f64) {
        self.scroll.x -= delta_x;
        self.scroll.y -= delta_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_starts_hidden() {
        assert!(!MenuState::new().is_shown());
    }

    #[test]
    fn test_set_shown_reports_only_real_transitions() {
        let mut menu = MenuState::new();
        assert_eq!(menu.show(), Some(MenuTransition::Shown));
        assert_eq!(menu.show(), None);
        assert_eq!(menu.hide(), Some(MenuTransition::Hidden));
        assert_eq!(menu.hide(), None);
    }

    #[test]
    fn test_toggle_inverts() {
        let mut menu = MenuState::new();
        assert_eq!(menu.toggle(), MenuTransition::Shown);
        assert!(menu.is_shown());
        assert_eq!(menu.toggle(), MenuTransition::Hidden);
        assert!(!menu.is_shown());
    }

    #[test]
    fn test_scroll_moves_against_drag() {
        let mut menu = MenuState::new();
        menu.scroll_by(5.0, -3.0);
        menu.scroll_by(1.0, 1.0);
        assert_eq!(menu.scroll(), ScrollOffset { x: -6.0, y: 2.0 });
    }
}
