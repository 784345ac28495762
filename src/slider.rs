//! Temperature threshold slider.
//!
//! The slider is an animated image scrubbed by the pointer: its position is a time in
//! `[0, duration]`, and the threshold is linear in that time, 90 °F at the top and 60 °F at the
//! bottom.

use crate::config::Config;
use crate::events::{Handler, Pointer, PointerAction};
use crate::model::{Subscription, ThermostatModel, ValueKind};
use crate::rect::Rect;
use cgmath::Point2;
use log::debug;
use std::sync::Arc;

pub const THRESHOLD_MIN: i32 = 60;
pub const THRESHOLD_MAX: i32 = 90;

const BUTTONS_CLICK_AREA_X: i32 = 508;
const BUTTON_PLUS_CLICK_AREA_Y: i32 = 358;
const BUTTON_MINUS_CLICK_AREA_Y: i32 = 561;
const SLIDER_CLICK_AREA_Y: i32 = 220;
const SLIDER_CLICK_AREA_SIZE: i32 = 620;
const CLICKING_OFFSET_ONE_SIDE: i32 = 12;
const BUTTON_SIZE: i32 = 84;
const SLIDER_BUTTON_SPACING: i32 = 20;

/// Slider position on the inside page.
pub fn slider_origin(config: &Config) -> Point2<i32> {
    if config.high_resolution {
        Point2::new(487, 373)
    } else {
        Point2::new(324, 267)
    }
}

/// Size and length of the slider animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderImage {
    pub width: i32,
    pub height: i32,
    pub duration_ms: i32,
}

impl Default for SliderImage {
    fn default() -> Self {
        SliderImage {
            width: 190,
            height: 504,
            duration_ms: 3000,
        }
    }
}

/// Notifications sent to slider listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEvent {
    Dragged,
    Released,
}

/// The threshold slider with its plus and minus buttons.
#[derive(Debug)]
pub struct CircularSlider {
    model: Arc<ThermostatModel>,
    origin: Point2<i32>,
    height: i32,
    duration: i32,
    /// Degrees per unit of slider time.
    k: f64,

    elapsed: i32,
    threshold: i32,
    pressed: bool,
    plus_pressed: bool,
    minus_pressed: bool,

    slider_area: Rect,
    plus_area: Rect,
    minus_area: Rect,

    listeners: Vec<Handler<SliderEvent>>,
    subscription: Option<Subscription>,
}

impl CircularSlider {
    pub fn new(model: Arc<ThermostatModel>, config: &Config, image: SliderImage) -> Self {
        let origin = slider_origin(config);
        let duration = image.duration_ms.max(1);
        let s = |v: i32| f64::from(config.scale(v));
        let button_area = s(CLICKING_OFFSET_ONE_SIDE) * 2. + s(BUTTON_SIZE);
        let buttons_x = s(BUTTONS_CLICK_AREA_X) - s(CLICKING_OFFSET_ONE_SIDE);

        let mut slider = CircularSlider {
            origin,
            height: config.scale(image.height).max(1),
            duration,
            k: f64::from(THRESHOLD_MAX - THRESHOLD_MIN) / f64::from(duration),
            elapsed: 0,
            threshold: 0,
            pressed: false,
            plus_pressed: false,
            minus_pressed: false,
            slider_area: Rect::from_xywh(
                f64::from(origin.x),
                s(SLIDER_CLICK_AREA_Y),
                f64::from(image.width - config.scale(SLIDER_BUTTON_SPACING)),
                s(SLIDER_CLICK_AREA_SIZE),
            ),
            plus_area: Rect::from_xywh(
                buttons_x,
                s(BUTTON_PLUS_CLICK_AREA_Y) - s(CLICKING_OFFSET_ONE_SIDE),
                button_area,
                button_area,
            ),
            minus_area: Rect::from_xywh(
                buttons_x,
                s(BUTTON_MINUS_CLICK_AREA_Y) - s(CLICKING_OFFSET_ONE_SIDE),
                button_area,
                button_area,
            ),
            listeners: Vec::new(),
            subscription: None,
            model,
        };
        let threshold = slider.model.temperature_threshold();
        slider.set_threshold(threshold);
        slider
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Slider position, in `[0, duration]`.
    pub fn elapsed(&self) -> i32 {
        self.elapsed
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn plus_pressed(&self) -> bool {
        self.plus_pressed
    }

    pub fn minus_pressed(&self) -> bool {
        self.minus_pressed
    }

    pub fn slider_area(&self) -> Rect {
        self.slider_area
    }

    pub fn plus_area(&self) -> Rect {
        self.plus_area
    }

    pub fn minus_area(&self) -> Rect {
        self.minus_area
    }

    /// Adds a listener. Adding the same handler twice has no effect.
    pub fn add_listener(&mut self, listener: Handler<SliderEvent>) {
        if !self.listeners.iter().any(|l| l.ptr_eq(&listener)) {
            self.listeners.push(listener);
        }
    }

    /// Called when the slider becomes visible.
    pub fn show(&mut self) {
        let threshold = self.model.temperature_threshold();
        self.set_threshold(threshold);
        self.subscription = Some(self.model.add_observer(&[ValueKind::TemperatureThreshold]));
    }

    /// Called when the slider is removed from the screen.
    pub fn hide(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.model.remove_observer(subscription.id());
        }
        self.pressed = false;
        self.plus_pressed = false;
        self.minus_pressed = false;
    }

    pub fn is_shown(&self) -> bool {
        self.subscription.is_some()
    }

    /// Applies queued threshold updates, unless the user is holding the slider.
    pub fn poll_model(&mut self) {
        let updates = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return,
        };
        if let Some(update) = updates.last() {
            if !self.pressed {
                self.set_threshold(update.value);
            }
        }
    }

    /// Handles a pointer event. Returns true if it was consumed.
    pub fn handle_event(&mut self, pointer: &Pointer) -> bool {
        if !pointer.action.is_release() {
            // a drag may leave the slider area once it started inside
            if self.pressed || self.slider_area.contains(pointer.location) {
                self.handle_slider_event(pointer)
            } else {
                self.handle_button_event(pointer)
            }
        } else {
            let mut consumed = false;
            if self.pressed {
                let threshold = self.threshold_from_elapsed(self.elapsed);
                self.commit(threshold);
                self.notify(SliderEvent::Released);
                consumed = true;
            } else if self.plus_pressed || self.minus_pressed {
                consumed = true;
            }
            self.pressed = false;
            self.plus_pressed = false;
            self.minus_pressed = false;
            consumed
        }
    }

    fn handle_slider_event(&mut self, pointer: &Pointer) -> bool {
        match pointer.action {
            PointerAction::Pressed => {
                self.pressed = true;
                self.elapsed = self.elapsed_from_pointer(pointer.y());
                true
            }
            PointerAction::Dragged if self.pressed => {
                self.notify(SliderEvent::Dragged);
                self.elapsed = self.elapsed_from_pointer(pointer.y());
                true
            }
            _ => false,
        }
    }

    fn handle_button_event(&mut self, pointer: &Pointer) -> bool {
        if pointer.action != PointerAction::Pressed {
            return false;
        }
        if self.plus_area.contains(pointer.location) {
            self.plus_pressed = true;
            self.commit((self.threshold + 1).min(THRESHOLD_MAX));
            true
        } else if self.minus_area.contains(pointer.location) {
            self.minus_pressed = true;
            self.commit((self.threshold - 1).max(THRESHOLD_MIN));
            true
        } else {
            false
        }
    }

    fn commit(&mut self, threshold: i32) {
        debug!("slider: threshold {} -> {}", self.threshold, threshold);
        self.model.update_temperature_threshold(threshold);
        self.set_threshold(threshold);
    }

    fn notify(&self, event: SliderEvent) {
        for listener in &self.listeners {
            listener.call(event);
        }
    }

    fn set_threshold(&mut self, threshold: i32) {
        self.elapsed = self.elapsed_from_threshold(threshold);
        self.threshold = threshold;
    }

    pub fn elapsed_from_pointer(&self, y: f64) -> i32 {
        let distance = y as i64 - i64::from(self.origin.y);
        let value = distance * i64::from(self.duration) / i64::from(self.height);
        value.max(0).min(i64::from(self.duration)) as i32
    }

    pub fn elapsed_from_threshold(&self, threshold: i32) -> i32 {
        (f64::from(THRESHOLD_MAX - threshold) / self.k) as i32
    }

    pub fn threshold_from_elapsed(&self, elapsed: i32) -> i32 {
        (f64::from(THRESHOLD_MAX) - f64::from(elapsed) * self.k) as i32
    }
}

impl Drop for CircularSlider {
    fn drop(&mut self) {
        self.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn slider() -> (Arc<ThermostatModel>, CircularSlider) {
        let model = Arc::new(ThermostatModel::new());
        let slider = CircularSlider::new(Arc::clone(&model), &Config::default(), SliderImage::default());
        (model, slider)
    }

    fn touch(action: PointerAction, x: f64, y: f64) -> Pointer {
        Pointer::touch(action, x, y)
    }

    #[test]
    fn threshold_and_elapsed_agree() {
        let (_, slider) = slider();
        assert_eq!(slider.elapsed_from_threshold(90), 0);
        assert_eq!(slider.elapsed_from_threshold(60), 3000);
        for threshold in THRESHOLD_MIN..=THRESHOLD_MAX {
            let elapsed = slider.elapsed_from_threshold(threshold);
            assert_eq!(slider.threshold_from_elapsed(elapsed), threshold);
        }
        assert_eq!(slider.threshold(), 69, "starts at the model threshold");
    }

    #[test]
    fn pointer_maps_and_clamps() {
        let (_, slider) = slider();
        assert_eq!(slider.elapsed_from_pointer(267.), 0);
        assert_eq!(slider.elapsed_from_pointer(267. + 252.), 1500);
        assert_eq!(slider.elapsed_from_pointer(0.), 0);
        assert_eq!(slider.elapsed_from_pointer(5000.), 3000);
    }

    #[test]
    fn drag_commits_on_release() {
        let (model, mut slider) = slider();
        let drags = Arc::new(AtomicUsize::new(0));
        let releases = Arc::new(AtomicUsize::new(0));
        let listener = {
            let drags = Arc::clone(&drags);
            let releases = Arc::clone(&releases);
            Handler::new(move |event: SliderEvent| match event {
                SliderEvent::Dragged => {
                    drags.fetch_add(1, Ordering::SeqCst);
                }
                SliderEvent::Released => {
                    releases.fetch_add(1, Ordering::SeqCst);
                }
            })
        };
        slider.add_listener(listener.clone());
        slider.add_listener(listener);

        let x = slider.slider_area().origin.x + 10.;
        assert!(slider.handle_event(&touch(PointerAction::Pressed, x, 300.)));
        assert!(slider.is_pressed());
        // leaving the area while pressed keeps dragging
        assert!(slider.handle_event(&touch(PointerAction::Dragged, 0., 267. + 252.)));
        assert_eq!(model.temperature_threshold(), 69, "not committed yet");

        assert!(slider.handle_event(&touch(PointerAction::Exited, 0., 0.)));
        assert_eq!(model.temperature_threshold(), 75);
        assert_eq!(slider.threshold(), 75);
        assert_eq!(drags.load(Ordering::SeqCst), 1);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert!(!slider.is_pressed());
    }

    #[test]
    fn buttons_step_within_bounds() {
        let model = Arc::new(ThermostatModel::new());
        model.set_temperature_threshold(90);
        let mut slider = CircularSlider::new(Arc::clone(&model), &Config::default(), SliderImage::default());
        let plus = slider.plus_area();
        let minus = slider.minus_area();
        let (px, py) = (plus.origin.x + 1., plus.origin.y + 1.);
        let (mx, my) = (minus.origin.x + 1., minus.origin.y + 1.);

        assert!(slider.handle_event(&touch(PointerAction::Pressed, px, py)));
        assert_eq!(slider.threshold(), 90, "clamped");
        assert!(slider.plus_pressed());
        assert!(slider.handle_event(&touch(PointerAction::Released, px, py)));
        assert!(!slider.plus_pressed());

        assert!(slider.handle_event(&touch(PointerAction::Pressed, mx, my)));
        assert_eq!(slider.threshold(), 89);
        assert_eq!(model.temperature_threshold(), 89);
        slider.handle_event(&touch(PointerAction::Released, mx, my));

        assert!(!slider.handle_event(&touch(PointerAction::Released, mx, my)), "nothing held");
        assert!(!slider.handle_event(&touch(PointerAction::Pressed, 1., 1.)));
    }

    #[test]
    fn high_resolution_buttons_are_scaled() {
        let model = Arc::new(ThermostatModel::new());
        let config = Config {
            high_resolution: true,
            ..Config::default()
        };
        let mut slider = CircularSlider::new(Arc::clone(&model), &config, SliderImage::default());
        assert_eq!(slider.plus_area(), Rect::from_xywh(744., 519., 162., 162.));
        assert_eq!(slider.minus_area(), Rect::from_xywh(744., 823., 162., 162.));

        // far corner of the plus button
        let (x, y) = (744. + 160., 519. + 160.);
        assert!(slider.handle_event(&touch(PointerAction::Pressed, x, y)));
        assert_eq!(slider.threshold(), 70);
        assert_eq!(model.temperature_threshold(), 70);
        assert!(slider.handle_event(&touch(PointerAction::Released, x, y)));
    }

    #[test]
    fn follows_model_only_while_shown() {
        let (model, mut slider) = slider();
        slider.show();
        assert_eq!(model.observer_count(), 1);
        model.set_temperature_threshold(80);
        slider.poll_model();
        assert_eq!(slider.threshold(), 80);

        slider.hide();
        assert_eq!(model.observer_count(), 0);
        model.set_temperature_threshold(70);
        slider.poll_model();
        assert_eq!(slider.threshold(), 80);
    }
}
