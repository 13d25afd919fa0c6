//! Animation driver — the per-frame loop.
//!
//! The driver never owns a timer. It asks a `FrameScheduler` for the next
//! frame and expects the host to call `on_frame` with the handle it was
//! given. A handle that is no longer pending (because the loop was stopped
//! or restarted in between) is ignored, so a cancelled frame cannot draw.

use log::{debug, trace};

use crate::sprites;
use crate::surface::Surface;

use super::instance::{Instance, InstanceId};
use super::kinematics::{advance, KinematicParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// "Call me before the next repaint", with cancellation.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel(&mut self, handle: FrameHandle);
}

/// Receives each instance's momentum after it is drawn. `None` means the
/// value is withheld (quiz mode).
pub trait MomentumSink {
    fn notify(&mut self, id: InstanceId, momentum: Option<f64>);
}

impl MomentumSink for () {
    fn notify(&mut self, _id: InstanceId, _momentum: Option<f64>) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running { pending: FrameHandle },
}

#[derive(Debug)]
pub struct AnimationDriver {
    state: DriverState,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        AnimationDriver {
            state: DriverState::Idle,
        }
    }
}

impl AnimationDriver {
    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    /// Enter Running. Starting while already running restarts the loop
    /// with a fresh frame request.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.stop(scheduler);
        let pending = scheduler.request_frame();
        debug!("animation started");
        self.state = DriverState::Running { pending };
    }

    /// Enter Idle, cancelling the outstanding frame request.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let DriverState::Running { pending } = self.state {
            scheduler.cancel(pending);
            debug!("animation stopped");
        }
        self.state = DriverState::Idle;
    }

    /// Run one frame if `handle` is the one we are waiting for, then
    /// schedule the next. Returns whether a frame was drawn.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        frame: FrameContext<'_>,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        match self.state {
            DriverState::Running { pending } if pending == handle => {}
            _ => {
                trace!("ignoring stale frame {handle:?}");
                return false;
            }
        }
        frame.tick();
        self.state = DriverState::Running {
            pending: scheduler.request_frame(),
        };
        true
    }
}

/// Everything one tick reads and writes.
pub struct FrameContext<'a> {
    pub instances: &'a mut [Instance],
    pub surface: &'a mut dyn Surface,
    pub sink: &'a mut dyn MomentumSink,
    pub params: &'a KinematicParams,
    pub withhold_momentum: bool,
}

impl FrameContext<'_> {
    /// Clear, paint the background, then advance, draw and report each
    /// instance in order.
    pub fn tick(self) {
        let (width, _) = self.surface.size();
        self.surface.clear();
        sprites::paint_background(self.surface);
        for inst in self.instances.iter_mut() {
            advance(inst, width, self.params);
            sprites::render(inst, self.surface);
            let momentum = (!self.withhold_momentum).then(|| inst.momentum());
            self.sink.notify(inst.id, momentum);
        }
        trace!("frame: {} instances", self.instances.len());
    }
}

/// Draw the current state without advancing anything.
pub fn draw_still(instances: &[Instance], surface: &mut dyn Surface) {
    surface.clear();
    sprites::paint_background(surface);
    for inst in instances {
        sprites::render(inst, surface);
    }
}

/// Scheduler for headless runs and tests: frames fire only when asked.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: Option<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    /// The frame currently waiting to fire, if any. Firing consumes it.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}
