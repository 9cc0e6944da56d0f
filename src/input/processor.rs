//! Converts raw platform events into experience commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! drag detection) and the key-binding map. It is the only thing that sits
//! between raw window events and the experience's
//! [`execute`](crate::experience::Experience::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use crate::experience::Command;
use crate::options::KeybindingOptions;

/// Squared cursor travel (pixels²) past which a press becomes a drag.
const DRAG_THRESHOLD_SQ: f32 = 16.0;

/// Converts raw window events into [`Command`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     experience.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("Enter") {
///     experience.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Last cursor position; `None` until the first move.
    cursor: Option<Vec2>,
    /// Where the primary button went down.
    press_origin: Option<Vec2>,
    /// Whether the current press has moved far enough to count as a drag.
    dragging: bool,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            cursor: None,
            press_origin: None,
            dragging: false,
            key_bindings,
        }
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.press_origin.is_some()
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<Command> {
        self.key_bindings.lookup(key).map(KeyAction::to_command)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Wheel { delta_y } => {
                Some(Command::ScrollTimeline { delta_y })
            }
        }
    }

    /// Cursor moved: orbit the camera while the primary button is held.
    fn handle_cursor_moved(&mut self, position: Vec2) -> Option<Command> {
        let previous = self.cursor.replace(position);
        let origin = self.press_origin?;
        let previous = previous?;

        if position.distance_squared(origin) > DRAG_THRESHOLD_SQ {
            self.dragging = true;
        }
        let delta = position - previous;
        (self.dragging && delta != Vec2::ZERO)
            .then_some(Command::OrbitCamera { delta })
    }

    /// A primary-button click (press and release without dragging) is the
    /// intro's call to action.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<Command> {
        if button != MouseButton::Left {
            return None;
        }

        if pressed {
            self.press_origin = Some(self.cursor.unwrap_or(Vec2::ZERO));
            self.dragging = false;
            return None;
        }

        let was_click = self.press_origin.take().is_some() && !self.dragging;
        self.dragging = false;
        was_click.then_some(Command::Begin)
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(processor: &mut InputProcessor, pressed: bool) -> Option<Command> {
        processor.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        })
    }

    fn move_to(processor: &mut InputProcessor, x: f32, y: f32) -> Option<Command> {
        processor.handle_event(InputEvent::CursorMoved { x, y })
    }

    #[test]
    fn wheel_becomes_timeline_scroll() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.handle_event(InputEvent::Wheel { delta_y: 100.0 }),
            Some(Command::ScrollTimeline { delta_y: 100.0 })
        );
    }

    #[test]
    fn click_without_drag_begins() {
        let mut processor = InputProcessor::new();
        let _ = move_to(&mut processor, 10.0, 10.0);
        assert_eq!(press(&mut processor, true), None);
        assert!(processor.mouse_pressed());
        assert_eq!(press(&mut processor, false), Some(Command::Begin));
        assert!(!processor.mouse_pressed());
    }

    #[test]
    fn drag_orbits_and_suppresses_click() {
        let mut processor = InputProcessor::new();
        let _ = move_to(&mut processor, 10.0, 10.0);
        let _ = press(&mut processor, true);

        // Jitter under the threshold is not a drag.
        assert_eq!(move_to(&mut processor, 11.0, 10.0), None);

        assert_eq!(
            move_to(&mut processor, 30.0, 14.0),
            Some(Command::OrbitCamera {
                delta: Vec2::new(19.0, 4.0)
            })
        );
        assert_eq!(press(&mut processor, false), None);
    }

    #[test]
    fn hover_without_press_does_nothing() {
        let mut processor = InputProcessor::new();
        assert_eq!(move_to(&mut processor, 0.0, 0.0), None);
        assert_eq!(move_to(&mut processor, 50.0, 50.0), None);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut processor = InputProcessor::new();
        let event = InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: false,
        };
        assert_eq!(processor.handle_event(event), None);
    }

    #[test]
    fn release_without_press_is_not_a_click() {
        let mut processor = InputProcessor::new();
        assert_eq!(press(&mut processor, false), None);
    }

    #[test]
    fn key_presses_use_bindings() {
        let processor = InputProcessor::new();
        assert_eq!(processor.handle_key_press("Enter"), Some(Command::Begin));
        assert_eq!(
            processor.handle_key_press("KeyR"),
            Some(Command::ResetTimeline)
        );
        assert_eq!(processor.handle_key_press("KeyZ"), None);
    }
}
