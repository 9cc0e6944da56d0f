//! Input handling: event types and the input processor that converts raw
//! window events into experience commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable keyboard actions.
pub mod keyboard;
/// Converts raw events into experience commands.
pub mod processor;

pub use event::{InputEvent, MouseButton, PIXELS_PER_LINE};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
