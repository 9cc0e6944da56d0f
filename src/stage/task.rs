use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A fixed-period task advanced by elapsed time.
///
/// The task does not own a clock: its owner feeds it frame deltas and gets
/// back the number of periods that elapsed. Once cancelled it never fires
/// again. Dropping the task cancels it.
#[derive(Debug)]
pub struct TimedTask {
    period: Duration,
    elapsed: Duration,
    cancelled: bool,
}

impl TimedTask {
    /// Task firing every `period`. A zero period is treated as one
    /// millisecond.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            cancelled: false,
        }
    }

    /// Add `dt` and return how many whole periods completed, saturating
    /// at `u32::MAX`. The remainder carries over to the next call.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.cancelled {
            return 0;
        }
        let elapsed = self.elapsed.saturating_add(dt).as_nanos();
        let period = self.period.as_nanos();
        let remainder = elapsed % period;
        self.elapsed = Duration::new(
            (remainder / NANOS_PER_SEC) as u64,
            (remainder % NANOS_PER_SEC) as u32,
        );
        u32::try_from(elapsed / period).unwrap_or(u32::MAX)
    }

    /// Stop the task. Calling this more than once is a no-op.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.elapsed = Duration::ZERO;
            log::trace!("timed task cancelled");
        }
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Firing period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for TimedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(40);

    #[test]
    fn fires_once_per_period() {
        let mut task = TimedTask::new(PERIOD);
        assert_eq!(task.advance(Duration::from_millis(39)), 0);
        assert_eq!(task.advance(Duration::from_millis(1)), 1);
        assert_eq!(task.advance(Duration::from_millis(120)), 3);
    }

    #[test]
    fn remainder_carries_over() {
        let mut task = TimedTask::new(PERIOD);
        assert_eq!(task.advance(Duration::from_millis(60)), 1);
        assert_eq!(task.advance(Duration::from_millis(20)), 1);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut task = TimedTask::new(PERIOD);
        task.cancel();
        task.cancel();
        assert!(task.is_cancelled());
        assert_eq!(task.advance(Duration::from_secs(10)), 0);
    }

    #[test]
    fn huge_delta_saturates_without_overflow() {
        let mut task = TimedTask::new(PERIOD);
        assert_eq!(task.advance(Duration::from_millis(1)), 0);
        assert_eq!(task.advance(Duration::MAX), u32::MAX);
        assert!(task.advance(Duration::MAX) > 0);
        assert_eq!(task.advance(Duration::ZERO), 0);
    }

    #[test]
    fn zero_period_does_not_spin() {
        let mut task = TimedTask::new(Duration::ZERO);
        assert_eq!(task.period(), Duration::from_millis(1));
        assert_eq!(task.advance(Duration::from_millis(5)), 5);
    }
}
