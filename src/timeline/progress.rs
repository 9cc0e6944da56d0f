//! Scroll-wheel input → smoothed timeline progress.
//!
//! Raw wheel deltas only move the `target`; the rendered `current` value
//! chases it once per frame. Bursts of input therefore never show up as
//! jumps in the animation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How `current` approaches `target` on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Smoothing {
    /// Fixed fraction of the remaining distance per frame, regardless of
    /// how long the frame took. Speed depends on the display refresh rate.
    PerFrame {
        /// Fraction of the remaining distance covered per frame (0, 1].
        factor: f32,
    },
    /// `factor` per frame at `reference_fps`, rescaled by the real frame
    /// time so the approach speed is the same at any refresh rate.
    FrameTime {
        /// Fraction of the remaining distance covered per reference frame.
        factor: f32,
        /// Frame rate at which `factor` applies unchanged.
        reference_fps: f32,
    },
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::PerFrame { factor: 0.05 }
    }
}

impl Smoothing {
    /// Interpolation weight for a frame lasting `dt` seconds, in [0, 1].
    #[must_use]
    pub fn alpha(&self, dt: f32) -> f32 {
        match *self {
            Self::PerFrame { factor } => sanitize_factor(factor),
            Self::FrameTime {
                factor,
                reference_fps,
            } => {
                let factor = sanitize_factor(factor);
                if !(dt.is_finite() && dt > 0.0)
                    || !(reference_fps.is_finite() && reference_fps > 0.0)
                {
                    return 0.0;
                }
                let frames = dt * reference_fps;
                1.0 - (1.0 - factor).powf(frames)
            }
        }
    }
}

fn sanitize_factor(factor: f32) -> f32 {
    if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    }
}

/// Current and target progress, both in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressState {
    /// Rendered progress, moved only by [`ProgressController::tick`].
    pub current: f32,
    /// Requested progress, moved only by
    /// [`ProgressController::on_scroll`] and
    /// [`ProgressController::reset`].
    pub target: f32,
}

/// Owns the timeline [`ProgressState`] and the wheel listener lifecycle.
#[derive(Debug, Clone)]
pub struct ProgressController {
    state: ProgressState,
    gain: f32,
    smoothing: Smoothing,
    mounted: bool,
}

impl ProgressController {
    /// Controller at progress 0 with the given wheel gain and smoothing.
    /// Starts unmounted: scroll input is ignored until [`mount`](Self::mount).
    #[must_use]
    pub fn new(gain: f32, smoothing: Smoothing) -> Self {
        Self {
            state: ProgressState::default(),
            gain,
            smoothing,
            mounted: false,
        }
    }

    /// Start accepting wheel input. Idempotent.
    pub fn mount(&mut self) {
        if !self.mounted {
            log::debug!("timeline scroll listener attached");
        }
        self.mounted = true;
    }

    /// Stop accepting wheel input. Idempotent.
    pub fn unmount(&mut self) {
        if self.mounted {
            log::debug!("timeline scroll listener detached");
        }
        self.mounted = false;
    }

    /// Whether wheel input is currently accepted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Apply one wheel event. Moves only the target; `current` follows on
    /// the next [`tick`](Self::tick).
    pub fn on_scroll(&mut self, delta_y: f32) {
        if !self.mounted {
            log::trace!("scroll {delta_y} ignored: listener not mounted");
            return;
        }
        if !delta_y.is_finite() {
            log::trace!("non-finite scroll delta dropped");
            return;
        }
        let target = self.state.target + delta_y * self.gain;
        self.state.target = if target.is_nan() {
            self.state.target
        } else {
            target.clamp(0.0, 1.0)
        };
    }

    /// Advance one render frame of `dt` seconds and return the new
    /// `current`.
    ///
    /// The step never passes the target, so the approach is monotone.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let ProgressState { current, target } = self.state;
        let alpha = self.smoothing.alpha(dt);
        let next = current + (target - current) * alpha;
        if next.is_finite() {
            self.state.current =
                next.clamp(current.min(target), current.max(target));
        }
        self.state.current
    }

    /// Send the target back to the start of the timeline. `current` eases
    /// there over the following ticks.
    pub fn reset(&mut self) {
        self.state.target = 0.0;
    }

    /// Rendered progress.
    #[must_use]
    pub fn current(&self) -> f32 {
        self.state.current
    }

    /// Requested progress.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.state.target
    }

    /// Snapshot of both values.
    #[must_use]
    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// Wheel gain (progress per unit of wheel delta).
    #[must_use]
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Active smoothing mode.
    #[must_use]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn mounted(gain: f32) -> ProgressController {
        let mut controller = ProgressController::new(gain, Smoothing::default());
        controller.mount();
        controller
    }

    #[test]
    fn fifty_small_scrolls_reach_five_percent() {
        let mut controller = mounted(0.00001);
        for _ in 0..50 {
            controller.on_scroll(100.0);
        }
        assert!((controller.target() - 0.05).abs() < 1e-5);
        assert_eq!(controller.current(), 0.0);
    }

    #[test]
    fn target_clamps_to_unit_interval() {
        let mut controller = mounted(0.01);
        for _ in 0..500 {
            controller.on_scroll(100.0);
            assert!((0.0..=1.0).contains(&controller.target()));
        }
        assert_eq!(controller.target(), 1.0);

        controller.on_scroll(-1.0e30);
        assert_eq!(controller.target(), 0.0);
        controller.on_scroll(f32::MAX);
        assert_eq!(controller.target(), 1.0);
    }

    #[test]
    fn mixed_sign_sequences_stay_bounded() {
        let mut controller = mounted(0.003);
        let deltas = [120.0, -900.0, 40.0, 5000.0, -3.0, -70.0, 260.0];
        for _ in 0..40 {
            for delta in deltas {
                controller.on_scroll(delta);
                assert!((0.0..=1.0).contains(&controller.target()));
            }
        }
    }

    #[test]
    fn non_finite_deltas_are_dropped() {
        let mut controller = mounted(0.001);
        controller.on_scroll(100.0);
        let before = controller.target();
        controller.on_scroll(f32::NAN);
        controller.on_scroll(f32::INFINITY);
        assert_eq!(controller.target(), before);
    }

    #[test]
    fn scroll_before_mount_is_ignored() {
        let mut controller = ProgressController::new(0.001, Smoothing::default());
        controller.on_scroll(100.0);
        assert_eq!(controller.target(), 0.0);

        controller.mount();
        controller.on_scroll(100.0);
        assert!(controller.target() > 0.0);

        controller.unmount();
        controller.unmount();
        let frozen = controller.target();
        controller.on_scroll(100.0);
        assert_eq!(controller.target(), frozen);
    }

    #[test]
    fn tick_is_idempotent_at_rest() {
        let mut controller = mounted(0.001);
        for _ in 0..10 {
            assert_eq!(controller.tick(FRAME), 0.0);
        }
    }

    #[test]
    fn tick_converges_monotonically_without_overshoot() {
        let mut controller = mounted(0.001);
        controller.on_scroll(600.0);
        let target = controller.target();

        let mut previous = controller.current();
        for _ in 0..400 {
            let current = controller.tick(FRAME);
            assert!(current >= previous);
            assert!(current <= target);
            previous = current;
        }
        assert!((target - previous).abs() < 1e-4);
    }

    #[test]
    fn convergence_downwards_never_undershoots() {
        let mut controller = mounted(0.01);
        controller.on_scroll(100.0);
        for _ in 0..1000 {
            let _ = controller.tick(FRAME);
        }
        controller.on_scroll(-50.0);
        let target = controller.target();
        let mut previous = controller.current();
        for _ in 0..200 {
            let current = controller.tick(FRAME);
            assert!(current <= previous);
            assert!(current >= target);
            previous = current;
        }
    }

    #[test]
    fn per_frame_smoothing_ignores_frame_time() {
        let smoothing = Smoothing::PerFrame { factor: 0.1 };
        assert_eq!(smoothing.alpha(FRAME), smoothing.alpha(0.5));
    }

    #[test]
    fn frame_time_smoothing_is_rate_independent() {
        let smoothing = Smoothing::FrameTime {
            factor: 0.05,
            reference_fps: 60.0,
        };
        let mut fast = ProgressController::new(0.001, smoothing);
        let mut slow = ProgressController::new(0.001, smoothing);
        fast.mount();
        slow.mount();
        fast.on_scroll(500.0);
        slow.on_scroll(500.0);

        // One second at 120 Hz versus one second at 30 Hz.
        for _ in 0..120 {
            let _ = fast.tick(1.0 / 120.0);
        }
        for _ in 0..30 {
            let _ = slow.tick(1.0 / 30.0);
        }
        assert!((fast.current() - slow.current()).abs() < 1e-4);
    }

    #[test]
    fn factor_is_clamped() {
        assert_eq!(Smoothing::PerFrame { factor: 4.0 }.alpha(FRAME), 1.0);
        assert_eq!(Smoothing::PerFrame { factor: -1.0 }.alpha(FRAME), 0.0);
    }

    #[test]
    fn non_finite_reference_fps_keeps_current_finite() {
        for reference_fps in [f32::NAN, f32::INFINITY, -60.0, 0.0] {
            let smoothing = Smoothing::FrameTime {
                factor: 0.05,
                reference_fps,
            };
            assert_eq!(smoothing.alpha(FRAME), 0.0);

            let mut controller = ProgressController::new(0.001, smoothing);
            controller.mount();
            controller.on_scroll(300.0);
            for _ in 0..10 {
                assert!(controller.tick(FRAME).is_finite());
            }
            controller.on_scroll(100.0);
            assert!(controller.target() > 0.3);
        }
    }

    #[test]
    fn reset_eases_back_instead_of_jumping() {
        let mut controller = mounted(0.01);
        controller.on_scroll(1000.0);
        for _ in 0..1000 {
            let _ = controller.tick(FRAME);
        }
        let before = controller.current();
        assert!(before > 0.99);

        controller.reset();
        assert_eq!(controller.target(), 0.0);
        assert_eq!(controller.current(), before);

        let after = controller.tick(FRAME);
        assert!(after < before);
        assert!((after - before * 0.95).abs() < 1e-5);
        for _ in 0..1000 {
            let _ = controller.tick(FRAME);
        }
        assert!(controller.current() < 1e-4);
    }
}
