//! Click vs Drag Classification
//!
//! Transient per-pointer press state. Nothing here is stored on the
//! dragged entity.

use std::collections::HashMap;

/// Pointer key used for plain mouse input
pub const MOUSE_POINTER_ID: i32 = 1;

/// Press shorter than this (ms) counts as a click
pub const DEFAULT_CLICK_THRESHOLD_MS: f64 = 150.0;

/// Movement beyond this (px) turns a press into a drag
pub const DEFAULT_DRAG_THRESHOLD_PX: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Click,
    Drag,
    /// Held too long without moving; neither opens nor moves anything
    LongPress,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Press {
    started_at_ms: f64,
    x: i32,
    y: i32,
}

#[derive(Clone, Debug)]
pub struct GestureTracker {
    presses: HashMap<i32, Press>,
    click_threshold_ms: f64,
    drag_threshold_px: i32,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_THRESHOLD_MS, DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl GestureTracker {
    pub fn new(click_threshold_ms: f64, drag_threshold_px: i32) -> Self {
        Self {
            presses: HashMap::new(),
            click_threshold_ms,
            drag_threshold_px,
        }
    }

    pub fn drag_threshold_px(&self) -> i32 {
        self.drag_threshold_px
    }

    /// Record a press; a second press on the same pointer restarts it
    pub fn press(&mut self, pointer_id: i32, x: i32, y: i32, now_ms: f64) {
        self.presses.insert(pointer_id, Press { started_at_ms: now_ms, x, y });
    }

    /// True once the pointer has moved past the drag threshold
    pub fn exceeds_drag_threshold(&self, pointer_id: i32, x: i32, y: i32) -> bool {
        self.presses.get(&pointer_id).map_or(false, |p| {
            (x - p.x).abs() > self.drag_threshold_px || (y - p.y).abs() > self.drag_threshold_px
        })
    }

    /// Finish the press and classify it. `None` if the pointer was never pressed.
    pub fn release(&mut self, pointer_id: i32, x: i32, y: i32, now_ms: f64) -> Option<Gesture> {
        let moved = self.exceeds_drag_threshold(pointer_id, x, y);
        let press = self.presses.remove(&pointer_id)?;
        if moved {
            Some(Gesture::Drag)
        } else if now_ms - press.started_at_ms < self.click_threshold_ms {
            Some(Gesture::Click)
        } else {
            Some(Gesture::LongPress)
        }
    }

    pub fn cancel(&mut self, pointer_id: i32) {
        self.presses.remove(&pointer_id);
    }

    pub fn is_pressed(&self, pointer_id: i32) -> bool {
        self.presses.contains_key(&pointer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_release_is_click() {
        let mut tracker = GestureTracker::default();
        tracker.press(MOUSE_POINTER_ID, 10, 10, 1_000.0);
        assert_eq!(tracker.release(MOUSE_POINTER_ID, 11, 10, 1_100.0), Some(Gesture::Click));
        assert!(!tracker.is_pressed(MOUSE_POINTER_ID));
    }

    #[test]
    fn test_slow_release_is_not_click() {
        let mut tracker = GestureTracker::default();
        tracker.press(MOUSE_POINTER_ID, 10, 10, 1_000.0);
        assert_eq!(tracker.release(MOUSE_POINTER_ID, 10, 10, 1_150.0), Some(Gesture::LongPress));
    }

    #[test]
    fn test_movement_is_drag_even_when_fast() {
        let mut tracker = GestureTracker::default();
        tracker.press(MOUSE_POINTER_ID, 10, 10, 0.0);
        assert!(tracker.exceeds_drag_threshold(MOUSE_POINTER_ID, 10, 16));
        assert_eq!(tracker.release(MOUSE_POINTER_ID, 10, 16, 20.0), Some(Gesture::Drag));
    }

    #[test]
    fn test_pointers_are_independent() {
        let mut tracker = GestureTracker::new(100.0, 3);
        tracker.press(1, 0, 0, 0.0);
        tracker.press(2, 50, 50, 500.0);
        assert_eq!(tracker.release(2, 50, 50, 520.0), Some(Gesture::Click));
        assert_eq!(tracker.release(1, 0, 0, 600.0), Some(Gesture::LongPress));
    }

    #[test]
    fn test_release_without_press() {
        let mut tracker = GestureTracker::default();
        assert_eq!(tracker.release(MOUSE_POINTER_ID, 0, 0, 0.0), None);
        tracker.press(MOUSE_POINTER_ID, 0, 0, 0.0);
        tracker.cancel(MOUSE_POINTER_ID);
        assert_eq!(tracker.release(MOUSE_POINTER_ID, 0, 0, 10.0), None);
    }
}
