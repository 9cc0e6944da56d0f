/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`Command`](crate::experience::Command) values.
///
/// # Example
///
/// ```ignore
/// if let Some(cmd) = processor.handle_event(InputEvent::Wheel { delta_y: 100.0 }) {
///     experience.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel, in pixels. Positive scrolls down the page, which moves
    /// the comet forward along its path.
    Wheel {
        /// Vertical scroll amount in pixels.
        delta_y: f32,
    },
}

/// Pixels reported per wheel line by browsers; used to convert line-based
/// wheel deltas.
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Back, forward and any extra buttons.
    Other,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Convert a winit wheel delta. winit reports positive `y` when the
    /// wheel turns away from the user (page up), so the sign is flipped.
    #[must_use]
    pub fn from_scroll(delta: winit::event::MouseScrollDelta) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let delta_y = match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => {
                -y * PIXELS_PER_LINE
            }
            winit::event::MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
        };
        Self::Wheel { delta_y }
    }
}
