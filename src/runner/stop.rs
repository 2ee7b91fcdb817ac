use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared one-shot stop signal for a run.
///
/// Once set the flag never clears for the rest of the run. `trip` is the
/// single false-to-true transition; the caller that wins it is the only
/// one allowed to report the failure, which keeps reports at exactly one
/// per run even when several workers fail at the same time.
#[derive(Clone, Debug, Default)]
pub struct StopFlag {
    stopped: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Sets the flag without claiming the report. Used for external
    /// interruption, which stops the run silently.
    pub fn set(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Returns true for exactly one caller per run.
    pub fn trip(&self) -> bool {
        self.stopped
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_wins_only_once() {
        let stop = StopFlag::new();

        assert!(!stop.is_set());
        assert!(stop.trip());
        assert!(stop.is_set());
        assert!(!stop.trip());
    }

    #[test]
    fn test_set_blocks_later_trips() {
        let stop = StopFlag::new();

        stop.set();

        assert!(stop.is_set());
        assert!(!stop.trip());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let stop = StopFlag::new();
        let observer = stop.clone();

        assert!(stop.trip());
        assert!(observer.is_set());
        assert!(!observer.trip());
    }
}
