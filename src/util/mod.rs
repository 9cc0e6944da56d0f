//! Shared utilities.

/// Frame delta, FPS and frame-rate cap bookkeeping.
pub mod frame_timing;
