//! The navigation orchestrator.
//!
//! [`Ui`] owns the navigation state and two motions:
//!
//! - the *overlay* motion, a 700 ms linear run of the overlay animation between two points of its
//!   timeline, which also drives the transition sweep;
//! - the *parallax* motion, a sine-eased swing of the home page background that keeps going back
//!   and forth while home is shown.
//!
//! The overlay timeline has one segment per route. Home to inside plays 2200 to 3200 and home to
//! outside plays 0 to 1000; going home plays the same segment backward. A transition that ends on
//! one of the home points (0, 2200 or 4000) ends at home.

use crate::canvas::{Canvas, Page, Scene};
use crate::config::Config;
use crate::context::{NavigationContext, NavigationState};
use crate::desktop::NavigationDesktop;
use crate::events::Pointer;
use crate::motion::{AnimationId, Animator, Clock, Easing, Frame, Motion, MonotonicClock};
use crate::navigation::{NavigationController, Trigger};
use crate::progress::{Direction, ProgressRange, HUNDRED};
use log::{debug, info, warn};
use std::time::Duration;

pub const OVERLAY_HOME_START: i32 = 0;
pub const OVERLAY_HOME_TO_INSIDE: i32 = 2200;
pub const OVERLAY_HOME_TO_OUTSIDE: i32 = 4000;
pub const OVERLAY_INSIDE_END: i32 = 3200;
pub const OVERLAY_OUTSIDE_END: i32 = 1000;
/// Length of the way back home from a settled page.
pub const OVERLAY_RETURN: i32 = 1000;

/// Overlay timeline points where the home page is shown.
const HOME_SENTINELS: [i32; 3] = [OVERLAY_HOME_START, OVERLAY_HOME_TO_INSIDE, OVERLAY_HOME_TO_OUTSIDE];

/// Which side the last transition went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Inside,
    Outside,
}

impl Route {
    /// Overlay segment `(home, page)` of this route.
    fn overlay_span(self) -> (i32, i32) {
        match self {
            Route::Inside => (OVERLAY_HOME_TO_INSIDE, OVERLAY_INSIDE_END),
            Route::Outside => (OVERLAY_HOME_START, OVERLAY_OUTSIDE_END),
        }
    }
}

/// Drives navigation, the transition and parallax motions, and the canvas.
#[derive(Debug)]
pub struct Ui<C: Canvas, K: Clock = MonotonicClock> {
    canvas: C,
    clock: K,
    desktop: NavigationDesktop,
    navigation: NavigationController,

    transition_duration: Duration,
    parallax_duration: Duration,
    half_width: i32,
    motion_range: i32,
    parallax_half_width: i32,

    animator: Animator,
    overlay: Option<AnimationId>,
    parallax: Option<AnimationId>,
    route: Route,

    overlay_elapsed: i32,
    parallax_value: i32,
    /// Sweep position, reconfigured for each route.
    transition_progress: ProgressRange,
    /// Maps the overlay position onto a percentage of its segment.
    motion_progress: ProgressRange,
}

impl<C: Canvas, K: Clock> Ui<C, K> {
    /// Creates the UI at home and starts the parallax motion.
    pub fn new(config: &Config, canvas: C, clock: K) -> Ui<C, K> {
        let mut ui = Ui {
            canvas,
            clock,
            desktop: NavigationDesktop::new(config),
            navigation: NavigationController::new(),
            transition_duration: config.transition_duration(),
            parallax_duration: Duration::from_millis(config.parallax_duration_ms),
            half_width: config.half_width(),
            motion_range: config.motion_range(),
            parallax_half_width: config.parallax_half_width(),
            animator: Animator::new(),
            overlay: None,
            parallax: None,
            route: Route::Inside,
            overlay_elapsed: OVERLAY_HOME_START,
            parallax_value: 0,
            transition_progress: ProgressRange::new(),
            motion_progress: ProgressRange::new(),
        };
        ui.canvas.build_page(Page::Home, ui.navigation.context());
        let now = ui.clock.now();
        ui.start_parallax(now);
        info!("ui: started at home");
        ui
    }

    pub fn context(&self) -> &NavigationContext {
        self.navigation.context()
    }

    pub fn state(&self) -> NavigationState {
        self.navigation.state()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn desktop(&self) -> &NavigationDesktop {
        &self.desktop
    }

    pub fn overlay_elapsed(&self) -> i32 {
        self.overlay_elapsed
    }

    pub fn parallax_value(&self) -> i32 {
        self.parallax_value
    }

    pub fn transition_progress(&self) -> &ProgressRange {
        &self.transition_progress
    }

    pub fn is_transition_running(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn is_parallax_running(&self) -> bool {
        self.parallax.is_some()
    }

    /// Current animated values.
    pub fn scene(&self) -> Scene {
        Scene {
            overlay_elapsed: self.overlay_elapsed,
            parallax_value: self.parallax_value,
            transition_percent: self.transition_progress.percent(),
            transition_value: self.transition_progress.value(),
        }
    }

    /// Seam offset of the transition sweep.
    pub fn sweep_offset(&self) -> i32 {
        self.scene().sweep_offset(self.half_width)
    }

    /// X position of the inside parallax image.
    pub fn parallax_inside_x(&self) -> i32 {
        self.scene().parallax_inside_x(self.motion_range)
    }

    /// X position of the outside parallax image.
    pub fn parallax_outside_x(&self) -> i32 {
        self.scene().parallax_outside_x(self.motion_range)
    }

    /// Returns true if the overlay rests on a point where home is shown.
    pub fn at_home(&self) -> bool {
        HOME_SENTINELS.contains(&self.overlay_elapsed)
    }

    /// Navigates to the home page.
    ///
    /// Returns false if already at home. A running transition is cut short and reversed.
    pub fn navigate_home(&mut self) -> bool {
        if self.navigation.apply(Trigger::NavigateHome).is_none() {
            return false;
        }
        self.canvas.build_transition(self.navigation.context());
        let (home, _) = self.route.overlay_span();
        self.animate_overlay(self.overlay_elapsed, home);
        true
    }

    /// Navigates to the inside page. Only possible from home.
    pub fn navigate_inside(&mut self) -> bool {
        if self.navigation.apply(Trigger::NavigateInside).is_none() {
            return false;
        }
        self.canvas.build_transition(self.navigation.context());
        self.route = Route::Inside;
        self.configure_sweep(0., f64::from(self.half_width), Direction::Forward);
        self.animate_overlay(OVERLAY_HOME_TO_INSIDE, OVERLAY_INSIDE_END);
        true
    }

    /// Navigates to the outside page. Only possible from home.
    pub fn navigate_outside(&mut self) -> bool {
        if self.navigation.apply(Trigger::NavigateOutside).is_none() {
            return false;
        }
        self.canvas.build_transition(self.navigation.context());
        self.route = Route::Outside;
        self.configure_sweep(-f64::from(self.half_width), 0., Direction::Backward);
        self.animate_overlay(OVERLAY_HOME_START, OVERLAY_OUTSIDE_END);
        true
    }

    /// Handles a pointer event.
    ///
    /// Touches in the navigation bands navigate; everything else goes to the canvas. Returns true
    /// if the event was consumed.
    pub fn handle_event(&mut self, pointer: &Pointer) -> bool {
        match self.desktop.intent(self.navigation.context(), pointer) {
            Some(Trigger::NavigateInside) => self.navigate_inside(),
            Some(Trigger::NavigateOutside) => self.navigate_outside(),
            Some(Trigger::NavigateHome) => self.navigate_home(),
            Some(_) | None => self.canvas.handle_event(pointer),
        }
    }

    /// Advances all motions to the current time.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.canvas.poll();
        for frame in self.animator.tick(now) {
            self.on_frame(frame, now);
        }
    }

    fn on_frame(&mut self, frame: Frame, now: Duration) {
        if self.overlay == Some(frame.id) {
            self.on_overlay_frame(frame.value, frame.finished);
        } else if self.parallax == Some(frame.id) {
            self.on_parallax_frame(frame.value, frame.finished, now);
        }
    }

    fn on_overlay_frame(&mut self, value: i32, finished: bool) {
        self.overlay_elapsed = value;
        self.motion_progress.set_value(f64::from(value));
        self.transition_progress
            .set_percent(self.motion_progress.percent());
        let scene = self.scene();
        self.canvas.request_layout(&scene);

        if finished {
            self.overlay = None;
            self.finish_transition();
        }
    }

    fn finish_transition(&mut self) {
        let trigger = if self.at_home() {
            Trigger::ArriveHome
        } else if self.state() == NavigationState::TransitionToInside {
            Trigger::ArriveInside
        } else {
            Trigger::ArriveOutside
        };

        let state = match self.navigation.apply(trigger) {
            Some(state) => state,
            None => {
                warn!("ui: transition ended at {} in {:?}", self.overlay_elapsed, self.state());
                return;
            }
        };
        if let Some(page) = Page::for_state(state) {
            self.canvas.build_page(page, self.navigation.context());
        }
        if state == NavigationState::Home {
            let now = self.clock.now();
            self.start_parallax(now);
        }
        debug!("ui: arrived at {:?}", state);
    }

    fn on_parallax_frame(&mut self, value: i32, finished: bool, now: Duration) {
        self.parallax_value = value;
        let scene = self.scene();
        self.canvas.render(now, &scene);

        if finished {
            self.parallax = None;
            self.canvas.on_parallax_finished();
            if self.state() == NavigationState::Home {
                self.start_parallax(now);
            }
        }
    }

    /// Starts the next parallax swing, toward whichever end is farther from where it is.
    ///
    /// The duration scales with the distance left, so restarting mid-swing keeps the pace.
    fn start_parallax(&mut self, now: Duration) {
        let from = self.parallax_value;
        let to = if from >= 0 {
            -self.motion_range
        } else {
            self.motion_range
        };
        let distance = f64::from((from - to).abs());
        let percent = if self.parallax_half_width > 0 {
            distance / f64::from(self.parallax_half_width) * HUNDRED
        } else {
            HUNDRED
        };
        let millis = self.parallax_duration.as_millis() as f64 * percent / HUNDRED;
        let duration = Duration::from_millis(millis as u64);

        let motion = Motion::new(Easing::SineEaseInOut, from, to, duration);
        self.parallax = Some(self.animator.start(motion, now));
        self.canvas.on_parallax_started();
    }

    /// Replaces the running overlay motion.
    ///
    /// The parallax motion is stopped as well; it restarts once home is reached.
    fn animate_overlay(&mut self, from: i32, to: i32) {
        let (home, page) = self.route.overlay_span();
        if let Err(err) = self
            .motion_progress
            .configure(f64::from(home), f64::from(page), Direction::Forward)
        {
            warn!("ui: {}", err);
        }
        self.stop_animations();
        self.overlay_elapsed = from;

        let now = self.clock.now();
        let motion = Motion::new(Easing::Linear, from, to, self.transition_duration);
        self.overlay = Some(self.animator.start(motion, now));
        debug!("ui: overlay {} -> {}", from, to);
    }

    fn configure_sweep(&mut self, min: f64, max: f64, direction: Direction) {
        if let Err(err) = self.transition_progress.configure(min, max, direction) {
            warn!("ui: {}", err);
        }
    }

    fn stop_animations(&mut self) {
        if let Some(id) = self.overlay.take() {
            self.animator.stop(id);
        }
        if let Some(id) = self.parallax.take() {
            self.animator.stop(id);
        }
    }
}
