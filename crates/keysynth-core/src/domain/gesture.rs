//! Swipe gestures that show, hide and scroll the menu.
//!
//! - Menu hidden: a near-horizontal swipe to the right that *starts* near the
//!   left edge shows it.
//! - Menu shown: a near-horizontal swipe to the left hides it; any other drag
//!   scrolls its content.
//!
//! The controller never consumes the gesture, so other handlers (e.g. the
//! touch-to-mouse emulation) still receive it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::menu::{MenuState, MenuTransition};

/// Distances (in gesture units, normally CSS pixels) that qualify a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Minimum horizontal travel to show or hide the menu.
    pub drag_delta: f64,
    /// Maximum start X for a swipe that may show the menu.
    pub drag_margin: f64,
    /// Vertical travel must stay strictly below this.
    pub vertical_tolerance: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            drag_delta: 64.0,
            drag_margin: 64.0,
            vertical_tolerance: 10.0,
        }
    }
}

/// One drag callback: where it started, where it is now, and the delta since
/// the previous callback.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragGesture {
    pub in_progress: bool,
    pub start_x: f64,
    pub start_y: f64,
    pub current_x: f64,
    pub current_y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl DragGesture {
    fn is_near_horizontal(&self, tolerance: f64) -> bool {
        (self.current_y - self.start_y).abs() < tolerance
    }
}

/// Applies [`GestureThresholds`] to drag events.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureController {
    thresholds: GestureThresholds,
}

impl GestureController {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> GestureThresholds {
        self.thresholds
    }

    /// Updates `menu` for one drag callback.
    ///
    /// Returns `(consumed, transition)`.  `consumed` is always `false`.
    pub fn on_drag(
        &self,
        menu: &mut MenuState,
        drag: &DragGesture,
    ) -> (bool, Option<MenuTransition>) {
        let t = &self.thresholds;

        if menu.is_shown() {
            if drag.is_near_horizontal(t.vertical_tolerance)
                && drag.start_x - drag.current_x >= t.drag_delta
            {
                debug!(start_x = drag.start_x, current_x = drag.current_x, "swipe hides menu");
                return (false, menu.hide());
            }
            menu.scroll_by(drag.delta_x, drag.delta_y);
            return (false, None);
        }

        if drag.start_x <= t.drag_margin
            && drag.is_near_horizontal(t.vertical_tolerance)
            && drag.current_x - drag.start_x >= t.drag_delta
        {
            debug!(start_x = drag.start_x, current_x = drag.current_x, "swipe shows menu");
            return (false, menu.show());
        }

        (false, None)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::ScrollOffset;

    fn drag(start: (f64, f64), current: (f64, f64)) -> DragGesture {
        DragGesture {
            in_progress: true,
            start_x: start.0,
            start_y: start.1,
            current_x: current.0,
            current_y: current.1,
            delta_x: 0.0,
            delta_y: 0.0,
        }
    }

    #[test]
    fn test_swipe_from_left_edge_shows_menu() {
        // Arrange
        let controller = GestureController::default();
        let mut menu = MenuState::new();

        // Act
        let (consumed, transition) =
            controller.on_drag(&mut menu, &drag((30.0, 200.0), (100.0, 205.0)));

        // Assert
        assert!(!consumed);
        assert_eq!(transition, Some(MenuTransition::Shown));
        assert!(menu.is_shown());
    }

    #[test]
    fn test_swipe_starting_away_from_edge_never_shows_menu() {
        let controller = GestureController::default();
        let mut menu = MenuState::new();

        for end_x in [300.0, 500.0, 2000.0] {
            controller.on_drag(&mut menu, &drag((200.0, 200.0), (end_x, 200.0)));
        }

        assert!(!menu.is_shown());
    }

    #[test]
    fn test_short_or_diagonal_swipe_does_not_show_menu() {
        let controller = GestureController::default();
        let mut menu = MenuState::new();

        // 63 units: one short of the threshold
        controller.on_drag(&mut menu, &drag((0.0, 0.0), (63.0, 0.0)));
        assert!(!menu.is_shown());

        // Vertical drift of exactly the tolerance is too much
        controller.on_drag(&mut menu, &drag((0.0, 0.0), (100.0, 10.0)));
        assert!(!menu.is_shown());
    }

    #[test]
    fn test_swipe_left_hides_shown_menu() {
        let controller = GestureController::default();
        let mut menu = MenuState::new();
        menu.show();

        let (_, transition) =
            controller.on_drag(&mut menu, &drag((500.0, 100.0), (436.0, 95.0)));

        assert_eq!(transition, Some(MenuTransition::Hidden));
        assert!(!menu.is_shown());
    }

    #[test]
    fn test_other_drags_scroll_shown_menu() {
        // Arrange
        let controller = GestureController::default();
        let mut menu = MenuState::new();
        menu.show();
        let mut vertical = drag((100.0, 100.0), (100.0, 160.0));
        vertical.delta_x = 2.0;
        vertical.delta_y = 60.0;

        // Act
        let (consumed, transition) = controller.on_drag(&mut menu, &vertical);

        // Assert
        assert!(!consumed);
        assert_eq!(transition, None);
        assert!(menu.is_shown());
        assert_eq!(menu.scroll(), ScrollOffset { x: -2.0, y: -60.0 });
    }

    #[test]
    fn test_custom_thresholds() {
        let controller = GestureController::new(GestureThresholds {
            drag_delta: 20.0,
            drag_margin: 10.0,
            vertical_tolerance: 5.0,
        });
        let mut menu = MenuState::new();

        controller.on_drag(&mut menu, &drag((15.0, 0.0), (60.0, 0.0)));
        assert!(!menu.is_shown(), "start outside the 10-unit margin");

        controller.on_drag(&mut menu, &drag((5.0, 0.0), (25.0, 4.0)));
        assert!(menu.is_shown());
    }
}
