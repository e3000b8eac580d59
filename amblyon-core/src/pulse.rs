//! Projector pulse timer
//!
//! Holds a projector trigger open for a fixed duration using a deadline
//! check, so a manual pulse never stalls the control loop.

/// One-shot trigger hold timer
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseTimer {
    started_ms: u32,
    duration_ms: u32,
    armed: bool,
}

impl PulseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start holding the trigger for `duration_ms`
    ///
    /// Restarting an armed timer extends the hold from `now_ms`.
    pub fn start(&mut self, now_ms: u32, duration_ms: u32) {
        self.started_ms = now_ms;
        self.duration_ms = duration_ms;
        self.armed = true;
    }

    /// Release the trigger immediately
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// Check if the trigger should be held at `now_ms`
    ///
    /// Disarms itself once the hold elapses.
    pub fn is_held(&mut self, now_ms: u32) -> bool {
        if !self.armed {
            return false;
        }
        if now_ms.wrapping_sub(self.started_ms) >= self.duration_ms {
            self.armed = false;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_for_duration_then_releases() {
        let mut timer = PulseTimer::new();
        assert!(!timer.is_held(0));

        timer.start(1_000, 200);
        assert!(timer.is_held(1_000));
        assert!(timer.is_held(1_199));
        assert!(!timer.is_held(1_200));
        assert!(!timer.is_held(1_201));
    }

    #[test]
    fn test_zero_duration_never_holds() {
        let mut timer = PulseTimer::new();
        timer.start(500, 0);
        assert!(!timer.is_held(500));
    }

    #[test]
    fn test_restart_extends_hold() {
        let mut timer = PulseTimer::new();
        timer.start(0, 200);
        timer.start(150, 200);
        assert!(timer.is_held(300));
        assert!(!timer.is_held(350));
    }

    #[test]
    fn test_cancel_releases_early() {
        let mut timer = PulseTimer::new();
        timer.start(0, 1_000);
        assert!(timer.is_held(100));
        timer.cancel();
        assert!(!timer.is_held(200));
    }
}
