//! Frame-driven light animation.
//!
//! The driver is an explicit `{Stopped, Running}` state machine. Frames are
//! requested from a [`FrameScheduler`]; stopping cancels the pending request
//! before returning, so no tick runs until the driver is started again.

use std::collections::VecDeque;
use std::time::Duration;

use cornu_math::{Point3, Vector3};

use crate::scene::SceneConfig;

/// Nominal frame rate of the animation clock.
pub const FRAMES_PER_SECOND: f64 = 60.0;

/// Period of the light oscillation, in milliseconds per radian.
const OSCILLATION_MS: f64 = 500.0;

/// Milliseconds added to the animation clock per tick.
pub fn frame_delta_ms() -> f64 {
    1000.0 / FRAMES_PER_SECOND
}

/// Delay between the end of one tick and the next.
pub fn frame_delay() -> Duration {
    Duration::from_secs_f64(frame_delta_ms() / 1000.0)
}

/// Mutable animation state owned by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub light_position: Point3,
    pub velocity_dir: Vector3,
    pub elapsed_ms: f64,
    pub running: bool,
}

impl AnimationState {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            light_position: config.initial_light,
            velocity_dir: config.velocity.normalize_or_zero(),
            elapsed_ms: 0.0,
            running: false,
        }
    }

    /// Light position for the current clock; `z` keeps its last value.
    pub fn light_at_current_time(&self, model_radius: f64) -> Point3 {
        let swing = (self.elapsed_ms / OSCILLATION_MS).sin() * 2.0 * model_radius;
        Point3::new(
            swing * self.velocity_dir.x,
            swing * self.velocity_dir.y,
            self.light_position.z,
        )
    }

    /// Commit the light position for this frame.
    pub fn update_light(&mut self, model_radius: f64) -> Point3 {
        self.light_position = self.light_at_current_time(model_radius);
        self.light_position
    }

    /// Advance the clock after a frame has been drawn.
    pub fn advance_clock(&mut self) {
        self.elapsed_ms += frame_delta_ms();
    }
}

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

/// Source of delayed frame callbacks.
pub trait FrameScheduler {
    /// Request a frame after `delay`; the returned handle identifies the callback.
    fn schedule(&mut self, delay: Duration) -> TaskHandle;

    /// Drop a pending callback. Cancelling an unknown handle is a no-op.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Scheduler whose callbacks fire only when the owner pops them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<(TaskHandle, Duration)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest pending callback.
    pub fn pop(&mut self) -> Option<(TaskHandle, Duration)> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.pending.push_back((handle, delay));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    /// Waiting for the frame identified by the handle.
    Running(TaskHandle),
}

/// Owns the [`AnimationState`] and the pending frame request.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    state: DriverState,
    pub animation: AnimationState,
}

impl AnimationDriver {
    pub fn new(animation: AnimationState) -> Self {
        Self {
            state: DriverState::Stopped,
            animation,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running(_))
    }

    /// Enter `Running` and request the first frame immediately.
    ///
    /// Returns `false` if already running.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.is_running() {
            return false;
        }
        let handle = scheduler.schedule(Duration::ZERO);
        self.state = DriverState::Running(handle);
        self.animation.running = true;
        true
    }

    /// Cancel the pending frame and enter `Stopped`.
    ///
    /// Light position and clock are kept so a later start resumes from them.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        let DriverState::Running(handle) = self.state else {
            return false;
        };
        scheduler.cancel(handle);
        self.state = DriverState::Stopped;
        self.animation.running = false;
        true
    }

    pub fn toggle(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.is_running() {
            self.stop(scheduler);
        } else {
            self.start(scheduler);
        }
    }

    /// Whether `handle` is the frame the driver is waiting for.
    pub fn accepts(&self, handle: TaskHandle) -> bool {
        self.state == DriverState::Running(handle)
    }

    /// Record the request for the next frame after a tick completed.
    pub fn rearm(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.is_running() {
            self.state = DriverState::Running(scheduler.schedule(frame_delay()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn driver() -> AnimationDriver {
        AnimationDriver::new(AnimationState::new(&SceneConfig::default()))
    }

    #[test]
    fn test_initial_state() {
        let d = driver();
        assert_eq!(d.state(), DriverState::Stopped);
        assert_eq!(d.animation.light_position, Point3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(d.animation.velocity_dir.length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_light_oscillation() {
        let mut state = AnimationState::new(&SceneConfig::default());
        state.elapsed_ms = 250.0 * std::f64::consts::PI; // sin(PI/2) = 1
        let light = state.update_light(1.0);
        let expected = 2.0 / 2f64.sqrt();
        assert_relative_eq!(light.x, expected, epsilon = 1e-12);
        assert_relative_eq!(light.y, expected, epsilon = 1e-12);
        assert_eq!(light.z, 5.0);
    }

    #[test]
    fn test_light_at_time_zero_is_on_axis() {
        let mut state = AnimationState::new(&SceneConfig::default());
        let light = state.update_light(1.0);
        assert_eq!(light, Point3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_start_stop_cancels_pending() {
        let mut sched = ManualScheduler::new();
        let mut d = driver();

        assert!(d.start(&mut sched));
        assert!(!d.start(&mut sched));
        assert_eq!(sched.pending(), 1);
        assert!(d.animation.running);

        assert!(d.stop(&mut sched));
        assert_eq!(sched.pending(), 0);
        assert_eq!(d.state(), DriverState::Stopped);
        assert!(!d.animation.running);
        assert!(!d.stop(&mut sched));
    }

    #[test]
    fn test_rearm_replaces_handle() {
        let mut sched = ManualScheduler::new();
        let mut d = driver();
        d.start(&mut sched);
        let (first, delay) = sched.pop().unwrap();
        assert_eq!(delay, Duration::ZERO);
        assert!(d.accepts(first));

        d.rearm(&mut sched);
        assert!(!d.accepts(first));
        let (second, delay) = sched.pop().unwrap();
        assert!(d.accepts(second));
        assert_eq!(delay, frame_delay());
    }

    #[test]
    fn test_rearm_when_stopped_does_nothing() {
        let mut sched = ManualScheduler::new();
        let mut d = driver();
        d.rearm(&mut sched);
        assert_eq!(sched.pending(), 0);
    }
}
