//! Time sources and eased motions.
//!
//! A [`Motion`] maps elapsed time to an integer value. The [`Animator`] owns running motions and
//! produces one [`Frame`] per motion when ticked; callers react to frames instead of registering
//! per-motion callbacks.

use log::trace;
use parking_lot::Mutex;
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// A monotonic time source.
pub trait Clock {
    /// Time since some fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> MonotonicClock {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        MonotonicClock::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<Mutex<Duration>>);

impl ManualClock {
    pub fn new() -> ManualClock {
        ManualClock::default()
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock() += by;
    }

    pub fn set(&self, to: Duration) {
        *self.0.lock() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.0.lock()
    }
}

/// Easing functions, mapping linear progress in [0, 1] to eased progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    SineEaseIn,
    SineEaseInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.max(0.).min(1.);
        match self {
            Easing::Linear => t,
            Easing::SineEaseIn => 1. - (t * PI / 2.).cos(),
            Easing::SineEaseInOut => -((PI * t).cos() - 1.) / 2.,
        }
    }
}

/// A value moving from `start` to `stop` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub easing: Easing,
    pub start: i32,
    pub stop: i32,
    pub duration: Duration,
}

impl Motion {
    pub fn new(easing: Easing, start: i32, stop: i32, duration: Duration) -> Motion {
        Motion {
            easing,
            start,
            stop,
            duration,
        }
    }

    /// Returns the value after `elapsed` time, rounded to the nearest integer.
    ///
    /// Past the end (or for an empty duration) this is exactly `stop`.
    pub fn value_at(&self, elapsed: Duration) -> i32 {
        if self.is_finished_at(elapsed) {
            return self.stop;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let span = f64::from(self.stop) - f64::from(self.start);
        (f64::from(self.start) + span * self.easing.apply(t)).round() as i32
    }

    pub fn is_finished_at(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Animation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u32, u16, u16, [u8; 8]);

impl AnimationId {
    fn new() -> AnimationId {
        let uuid = Uuid::new_v4();
        let (a, b, c, d) = uuid.as_fields();
        AnimationId(a, b, c, *d)
    }
}

/// The state of one animation after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub id: AnimationId,
    pub value: i32,
    /// If true, this is the last frame and the animation has been removed.
    pub finished: bool,
}

#[derive(Debug)]
struct Running {
    id: AnimationId,
    motion: Motion,
    started_at: Duration,
}

/// Drives running motions from explicit ticks.
#[derive(Debug, Default)]
pub struct Animator {
    running: Vec<Running>,
}

impl Animator {
    pub fn new() -> Animator {
        Animator::default()
    }

    /// Starts a motion at `now` and returns its id.
    pub fn start(&mut self, motion: Motion, now: Duration) -> AnimationId {
        let id = AnimationId::new();
        trace!(
            "animator: start {:?} {} -> {} over {:?}",
            motion.easing,
            motion.start,
            motion.stop,
            motion.duration
        );
        self.running.push(Running {
            id,
            motion,
            started_at: now,
        });
        id
    }

    /// Stops an animation. No further frames are produced for it.
    ///
    /// Returns false if it was not running.
    pub fn stop(&mut self, id: AnimationId) -> bool {
        let len = self.running.len();
        self.running.retain(|running| running.id != id);
        len != self.running.len()
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.running.iter().any(|running| running.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Advances all animations to `now`, in start order.
    ///
    /// Finished animations produce a final frame with their stop value and are removed.
    pub fn tick(&mut self, now: Duration) -> Vec<Frame> {
        let frames: Vec<Frame> = self
            .running
            .iter()
            .map(|running| {
                let elapsed = now.checked_sub(running.started_at).unwrap_or_default();
                Frame {
                    id: running.id,
                    value: running.motion.value_at(elapsed),
                    finished: running.motion.is_finished_at(elapsed),
                }
            })
            .collect();

        for frame in frames.iter().filter(|frame| frame.finished) {
            self.stop(frame.id);
        }
        frames
    }
}
