use std::time::{Duration, Instant};

use crate::engine::driver::{FrameHandle, FrameScheduler};

/// Frame requests paced to a fixed rate. The event loop asks `due` after
/// every wake-up and delivers whatever handle it gets back.
#[derive(Debug)]
pub struct TerminalScheduler {
    interval: Duration,
    next: u64,
    pending: Option<(FrameHandle, Instant)>,
}

impl TerminalScheduler {
    pub fn new(fps: u32) -> Self {
        TerminalScheduler {
            interval: Duration::from_secs(1) / fps.max(1),
            next: 0,
            pending: None,
        }
    }

    /// How long until the pending frame is due, if one is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|(_, at)| at.saturating_duration_since(now))
    }

    /// Take the pending frame if its time has come.
    pub fn due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, at)) if now >= at => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

impl FrameScheduler for TerminalScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some((handle, Instant::now() + self.interval));
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_due_after_interval() {
        let mut sched = TerminalScheduler::new(10);
        let handle = sched.request_frame();
        let now = Instant::now();
        assert!(sched.time_until_due(now).unwrap() <= Duration::from_millis(100));
        assert_eq!(sched.due(now + Duration::from_millis(200)), Some(handle));
        assert_eq!(sched.due(now + Duration::from_millis(300)), None);
    }

    #[test]
    fn cancel_only_drops_matching_handle() {
        let mut sched = TerminalScheduler::new(30);
        let old = sched.request_frame();
        let current = sched.request_frame();
        sched.cancel(old);
        assert!(sched.time_until_due(Instant::now()).is_some());
        sched.cancel(current);
        assert_eq!(sched.time_until_due(Instant::now()), None);
        assert_eq!(sched.due(Instant::now() + Duration::from_secs(1)), None);
    }
}
