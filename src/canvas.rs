//! Page composition.
//!
//! The navigation core does not draw anything. It tells a [`Canvas`] which page (or transition) to
//! show and hands it the animated values every frame; what ends up on screen is up to the canvas.

use crate::config::Config;
use crate::context::{NavigationContext, NavigationState};
use crate::events::{Handler, Pointer};
use crate::model::{Readings, Subscription, ThermostatModel, ValueKind};
use crate::popup::ThresholdPopup;
use crate::rect::Rect;
use crate::slider::{slider_origin, CircularSlider, SliderEvent, SliderImage};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Sweep multiplier: the sweep reaches the display edge at a third of the way.
const SWEEP_MULTIPLIER: f64 = 3.;

const BUBBLE_X: i32 = 48;
const BUBBLE_Y: i32 = 178;
const DATE_MARGIN_TOP: i32 = 15;
const DATE_HEIGHT: i32 = 45;
const LABELS_Y: i32 = 320;
const INSIDE_LABELS_X: i32 = 160;
const OUTSIDE_LABELS_X: i32 = 392;
const INSIDE_LABELS_WIDTH: i32 = 200;
const OUTSIDE_LABELS_WIDTH: i32 = 187;
const LABELS_HEIGHT: i32 = 340;
const PARALLAX_BOTTOM_OFFSET: i32 = 460;
const SECONDARY_BUBBLE_LEFT_X: i32 = 49;
const SECONDARY_BUBBLE_RIGHT_X: i32 = 373;
const SECONDARY_BUBBLE_Y: i32 = 802;
const SECONDARY_BUBBLE_WIDTH: i32 = 300;
const SECONDARY_BUBBLE_HEIGHT: i32 = 186;
const THRESHOLD_POPUP_MARGIN: i32 = 20;
const THRESHOLD_POPUP_HEIGHT: i32 = 120;
const WEATHER_X: i32 = 90;
const WEATHER_Y: i32 = 280;
const WEATHER_WIDTH: i32 = 241;
const WEATHER_HEIGHT: i32 = 419;

/// A settled page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Inside,
    Outside,
}

impl Page {
    /// Returns the page shown in a settled state, or None during transitions.
    pub fn for_state(state: NavigationState) -> Option<Page> {
        match state {
            NavigationState::Home => Some(Page::Home),
            NavigationState::Inside => Some(Page::Inside),
            NavigationState::Outside => Some(Page::Outside),
            _ => None,
        }
    }
}

/// Animated values published by the navigation core.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scene {
    /// Position in the overlay animation.
    pub overlay_elapsed: i32,
    /// Parallax offset in `[-range, range]`.
    pub parallax_value: i32,
    /// Transition sweep progress in `[0, 100]`.
    pub transition_percent: f64,
    /// Transition sweep value inside its configured range.
    pub transition_value: f64,
}

impl Scene {
    /// See [`sweep_offset`].
    pub fn sweep_offset(&self, half_width: i32) -> i32 {
        sweep_offset(self.transition_value, half_width)
    }

    /// X position of the inside parallax image.
    pub fn parallax_inside_x(&self, range: i32) -> i32 {
        -range + self.parallax_value
    }

    /// X position of the outside parallax image.
    pub fn parallax_outside_x(&self, range: i32) -> i32 {
        range + self.parallax_value
    }
}

/// Horizontal position of the transition seam, relative to the display center.
///
/// Three times the sweep value, truncated and clamped to ±`half_width`.
pub fn sweep_offset(transition_value: f64, half_width: i32) -> i32 {
    let offset = (transition_value * SWEEP_MULTIPLIER) as i32;
    offset.max(-half_width).min(half_width)
}

/// The page and rendering layer driven by the navigation core.
pub trait Canvas {
    /// Replaces the shown widgets with a page.
    fn build_page(&mut self, page: Page, context: &NavigationContext);

    /// Replaces the shown widgets with the transition widgets for the current transition.
    fn build_transition(&mut self, context: &NavigationContext);

    /// Called on every transition frame.
    fn request_layout(&mut self, _scene: &Scene) {}

    /// Called on every parallax frame.
    fn render(&mut self, now: Duration, scene: &Scene);

    fn on_parallax_started(&mut self) {}

    fn on_parallax_finished(&mut self) {}

    /// Called once per frame before any animation frames, to pick up model changes.
    fn poll(&mut self) {}

    /// Handles a pointer event that navigation did not consume.
    ///
    /// Returns true if the event was consumed.
    fn handle_event(&mut self, _pointer: &Pointer) -> bool {
        false
    }
}

/// Widgets that can be placed on the main canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    SkyColor,
    Parallax,
    Bubble,
    ThresholdPopup,
    Date,
    InsideLabels,
    OutsideLabels,
    StaticHomeOverlay,
    Transition,
    Overlay,
    CircularSlider,
    HumidityInfo,
    FanInfo,
    Weather,
    SolarInfo,
}

/// A widget and where it goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub widget: Widget,
    pub bounds: Rect,
}

/// Temperature, humidity and pressure shown in a bubble.
///
/// Inside labels show the model values. Outside labels only take the pressure from the model and
/// make up the rest whenever the pressure changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleLabels {
    inside: bool,
    pub temperature: i32,
    pub humidity: i32,
    pub pressure: i32,
    dirty: bool,
}

impl BubbleLabels {
    fn new<R: Rng>(inside: bool, rng: &mut R) -> BubbleLabels {
        BubbleLabels {
            inside,
            temperature: rng.random_range(60..=90),
            humidity: rng.random_range(75..=88),
            pressure: rng.random_range(935..=1194),
            dirty: true,
        }
    }

    /// Refreshes from the model. Returns true if anything changed.
    pub fn update<R: Rng>(&mut self, readings: &Readings, rng: &mut R) -> bool {
        let (temperature, humidity, pressure) = if self.inside {
            (readings.temperature, readings.humidity, readings.pressure)
        } else if readings.pressure != self.pressure {
            (
                rng.random_range(60..=90),
                rng.random_range(75..=88),
                readings.pressure,
            )
        } else {
            (self.temperature, self.humidity, self.pressure)
        };

        let changed = (temperature, humidity, pressure)
            != (self.temperature, self.humidity, self.pressure);
        if changed {
            self.temperature = temperature;
            self.humidity = humidity;
            self.pressure = pressure;
            self.dirty = true;
        }
        changed
    }

    /// Returns whether the labels need redrawing and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

/// The canvas holding every thermostat widget.
#[derive(Debug)]
pub struct MainCanvas {
    model: Arc<ThermostatModel>,
    width: i32,
    height: i32,
    half_width: i32,
    config: Config,

    page: Option<Page>,
    placements: Vec<Placement>,
    scene: Scene,

    slider: CircularSlider,
    slider_image: SliderImage,
    popup: ThresholdPopup,
    inside_labels: BubbleLabels,
    outside_labels: BubbleLabels,
    labels_subscription: Option<Subscription>,
    secondary_dimmed: Arc<AtomicBool>,
    rng: StdRng,

    bubble_ticks: u64,
    layout_requests: u64,
    rendered_frames: u64,
}

impl MainCanvas {
    pub fn new(config: &Config, model: Arc<ThermostatModel>) -> MainCanvas {
        MainCanvas::with_rng(config, model, StdRng::from_os_rng())
    }

    pub fn with_rng(config: &Config, model: Arc<ThermostatModel>, mut rng: StdRng) -> MainCanvas {
        let slider_image = SliderImage::default();
        let mut slider = CircularSlider::new(Arc::clone(&model), config, slider_image);

        // fan and humidity bubbles fade while the slider is held
        let secondary_dimmed = Arc::new(AtomicBool::new(false));
        slider.add_listener({
            let dimmed = Arc::clone(&secondary_dimmed);
            Handler::new(move |event: SliderEvent| {
                dimmed.store(event == SliderEvent::Dragged, Ordering::SeqCst);
            })
        });

        MainCanvas {
            width: config.width as i32,
            height: config.height as i32,
            half_width: config.half_width(),
            config: config.clone(),
            page: None,
            placements: Vec::new(),
            scene: Scene::default(),
            slider,
            slider_image,
            popup: ThresholdPopup::new(Arc::clone(&model)),
            inside_labels: BubbleLabels::new(true, &mut rng),
            outside_labels: BubbleLabels::new(false, &mut rng),
            labels_subscription: None,
            secondary_dimmed,
            rng,
            bubble_ticks: 0,
            layout_requests: 0,
            rendered_frames: 0,
            model,
        }
    }

    /// The page shown, or None in transition mode.
    pub fn page(&self) -> Option<Page> {
        self.page
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Widgets in stacking order, bottom first.
    pub fn widgets(&self) -> Vec<Widget> {
        self.placements.iter().map(|p| p.widget).collect()
    }

    pub fn placement(&self, widget: Widget) -> Option<Placement> {
        self.placements.iter().copied().find(|p| p.widget == widget)
    }

    /// Last values received from the navigation core.
    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn slider(&self) -> &CircularSlider {
        &self.slider
    }

    pub fn popup(&self) -> &ThresholdPopup {
        &self.popup
    }

    pub fn inside_labels(&self) -> &BubbleLabels {
        &self.inside_labels
    }

    pub fn outside_labels(&self) -> &BubbleLabels {
        &self.outside_labels
    }

    /// If true, the secondary info bubbles are faded out.
    pub fn secondary_info_dimmed(&self) -> bool {
        self.secondary_dimmed.load(Ordering::SeqCst)
    }

    /// Current seam offset of the transition sweep.
    pub fn sweep_offset(&self) -> i32 {
        self.scene.sweep_offset(self.half_width)
    }

    pub fn bubble_ticks(&self) -> u64 {
        self.bubble_ticks
    }

    pub fn layout_requests(&self) -> u64 {
        self.layout_requests
    }

    pub fn rendered_frames(&self) -> u64 {
        self.rendered_frames
    }

    fn scale(&self, value: i32) -> f64 {
        f64::from(self.config.scale(value))
    }

    fn bounds(&self, widget: Widget) -> Rect {
        let s = |v| self.scale(v);
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let half_width = f64::from(self.half_width);
        match widget {
            Widget::SkyColor
            | Widget::StaticHomeOverlay
            | Widget::Transition
            | Widget::Overlay => Rect::from_xywh(0., 0., width, height),
            Widget::Parallax => Rect::from_xywh(
                0.,
                height - s(PARALLAX_BOTTOM_OFFSET),
                width,
                s(PARALLAX_BOTTOM_OFFSET),
            ),
            Widget::Bubble => {
                let size = width - 2. * s(BUBBLE_X);
                Rect::from_xywh(s(BUBBLE_X), s(BUBBLE_Y), size, size)
            }
            Widget::ThresholdPopup => Rect::from_xywh(
                s(THRESHOLD_POPUP_MARGIN),
                s(THRESHOLD_POPUP_MARGIN),
                half_width,
                s(THRESHOLD_POPUP_HEIGHT),
            ),
            Widget::Date => Rect::from_xywh(half_width, s(DATE_MARGIN_TOP), half_width, s(DATE_HEIGHT)),
            Widget::InsideLabels => Rect::from_xywh(
                s(INSIDE_LABELS_X),
                s(LABELS_Y),
                s(INSIDE_LABELS_WIDTH),
                s(LABELS_HEIGHT),
            ),
            Widget::OutsideLabels => Rect::from_xywh(
                s(OUTSIDE_LABELS_X),
                s(LABELS_Y),
                s(OUTSIDE_LABELS_WIDTH),
                s(LABELS_HEIGHT),
            ),
            Widget::CircularSlider => {
                let origin = slider_origin(&self.config);
                Rect::from_xywh(
                    f64::from(origin.x),
                    f64::from(origin.y),
                    f64::from(self.slider_image.width),
                    s(self.slider_image.height),
                )
            }
            Widget::HumidityInfo => Rect::from_xywh(
                s(SECONDARY_BUBBLE_LEFT_X),
                s(SECONDARY_BUBBLE_Y),
                s(SECONDARY_BUBBLE_WIDTH),
                s(SECONDARY_BUBBLE_HEIGHT),
            ),
            Widget::FanInfo | Widget::SolarInfo => Rect::from_xywh(
                s(SECONDARY_BUBBLE_RIGHT_X),
                s(SECONDARY_BUBBLE_Y),
                s(SECONDARY_BUBBLE_WIDTH),
                s(SECONDARY_BUBBLE_HEIGHT),
            ),
            Widget::Weather => {
                Rect::from_xywh(s(WEATHER_X), s(WEATHER_Y), s(WEATHER_WIDTH), s(WEATHER_HEIGHT))
            }
        }
    }

    /// Replaces all widgets, showing and hiding the stateful ones as needed.
    fn set_widgets(&mut self, widgets: &[Widget]) {
        self.placements = widgets
            .iter()
            .map(|&widget| Placement {
                widget,
                bounds: self.bounds(widget),
            })
            .collect();

        let has = |widget| widgets.contains(&widget);
        match (has(Widget::CircularSlider), self.slider.is_shown()) {
            (true, false) => self.slider.show(),
            (false, true) => self.slider.hide(),
            _ => (),
        }
        match (has(Widget::ThresholdPopup), self.popup.is_shown()) {
            (true, false) => self.popup.show(),
            (false, true) => self.popup.hide(),
            _ => (),
        }
        trace!("canvas: {:?}", widgets);
    }

    fn update_labels(&mut self) {
        let readings = self.model.readings();
        self.inside_labels.update(&readings, &mut self.rng);
        self.outside_labels.update(&readings, &mut self.rng);
    }
}

impl Canvas for MainCanvas {
    fn build_page(&mut self, page: Page, context: &NavigationContext) {
        let widgets: &[Widget] = match page {
            Page::Home => &[
                Widget::SkyColor,
                Widget::Parallax,
                Widget::Bubble,
                Widget::ThresholdPopup,
                Widget::Date,
                Widget::InsideLabels,
                Widget::OutsideLabels,
                Widget::StaticHomeOverlay,
            ],
            Page::Inside => &[
                Widget::Transition,
                Widget::Date,
                Widget::InsideLabels,
                Widget::CircularSlider,
                Widget::HumidityInfo,
                Widget::FanInfo,
            ],
            Page::Outside => &[
                Widget::Transition,
                Widget::Date,
                Widget::Overlay,
                Widget::OutsideLabels,
                Widget::Weather,
                Widget::SolarInfo,
            ],
        };
        self.set_widgets(widgets);
        self.page = Some(page);

        // away from home, labels follow the model directly
        if page == Page::Home {
            if let Some(subscription) = self.labels_subscription.take() {
                self.model.remove_observer(subscription.id());
            }
        } else if self.labels_subscription.is_none() {
            self.labels_subscription = Some(self.model.add_observer(&[
                ValueKind::Temperature,
                ValueKind::Humidity,
                ValueKind::Pressure,
            ]));
        }
        debug!("canvas: built {:?} in {:?}", page, context.current());
    }

    fn build_transition(&mut self, context: &NavigationContext) {
        let labels = if context.current() == NavigationState::TransitionToOutside {
            Widget::OutsideLabels
        } else {
            Widget::InsideLabels
        };
        self.set_widgets(&[Widget::Transition, Widget::Overlay, labels]);
        self.page = None;
        debug!("canvas: built transition for {:?}", context.current());
    }

    fn request_layout(&mut self, scene: &Scene) {
        self.scene = *scene;
        self.layout_requests += 1;
    }

    fn render(&mut self, now: Duration, scene: &Scene) {
        self.scene = *scene;
        self.bubble_ticks += 1;
        self.popup.tick(now);
        self.rendered_frames += 1;
    }

    fn on_parallax_started(&mut self) {
        self.popup.set_parallax_running(true);
    }

    fn on_parallax_finished(&mut self) {
        // the bubble keeps animating on its own
        self.popup.set_parallax_running(false);
        self.update_labels();
    }

    fn poll(&mut self) {
        self.slider.poll_model();
        self.popup.poll_model();
        let changed = match &self.labels_subscription {
            Some(subscription) => !subscription.drain().is_empty(),
            None => false,
        };
        if changed {
            self.update_labels();
        }
    }

    fn handle_event(&mut self, pointer: &Pointer) -> bool {
        if self.slider.is_shown() {
            self.slider.handle_event(pointer)
        } else {
            false
        }
    }
}

impl Drop for MainCanvas {
    fn drop(&mut self) {
        if let Some(subscription) = self.labels_subscription.take() {
            self.model.remove_observer(subscription.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PointerAction;

    fn canvas() -> (Arc<ThermostatModel>, MainCanvas) {
        let model = Arc::new(ThermostatModel::new());
        let canvas = MainCanvas::with_rng(
            &Config::default(),
            Arc::clone(&model),
            StdRng::seed_from_u64(1),
        );
        (model, canvas)
    }

    fn context(states: &[NavigationState]) -> NavigationContext {
        let mut context = NavigationContext::new();
        for &state in states {
            context.set_state(state);
        }
        context
    }

    #[test]
    fn sweep_offset_clamps() {
        assert_eq!(sweep_offset(10., 240), 30);
        assert_eq!(sweep_offset(100., 240), 240);
        assert_eq!(sweep_offset(-100., 240), -240);
        assert_eq!(sweep_offset(-10.9, 240), -32);
        assert_eq!(sweep_offset(0., 240), 0);
    }

    #[test]
    fn parallax_image_offsets() {
        let scene = Scene {
            parallax_value: 15,
            ..Scene::default()
        };
        assert_eq!(scene.parallax_inside_x(40), -25);
        assert_eq!(scene.parallax_outside_x(40), 55);
    }

    #[test]
    fn pages_compose_their_widgets() {
        let (model, mut canvas) = canvas();
        let home = NavigationContext::new();

        canvas.build_page(Page::Home, &home);
        assert_eq!(canvas.widgets().len(), 8);
        assert_eq!(canvas.widgets()[0], Widget::SkyColor);
        assert!(canvas.popup().is_shown());
        assert!(!canvas.slider().is_shown());

        canvas.build_page(Page::Inside, &context(&[NavigationState::Inside]));
        assert_eq!(
            canvas.widgets(),
            vec![
                Widget::Transition,
                Widget::Date,
                Widget::InsideLabels,
                Widget::CircularSlider,
                Widget::HumidityInfo,
                Widget::FanInfo,
            ]
        );
        assert!(canvas.slider().is_shown());
        assert!(!canvas.popup().is_shown());
        // slider and labels
        assert_eq!(model.observer_count(), 2);

        canvas.build_page(Page::Outside, &context(&[NavigationState::Outside]));
        assert_eq!(canvas.placement(Widget::Weather).map(|p| p.bounds), Some(Rect::from_xywh(90., 280., 241., 419.)));
        assert!(canvas.placement(Widget::CircularSlider).is_none());
        assert_eq!(model.observer_count(), 1);
    }

    #[test]
    fn transition_mode_picks_labels_by_direction() {
        let (_, mut canvas) = canvas();
        canvas.build_transition(&context(&[NavigationState::TransitionToOutside]));
        assert_eq!(
            canvas.widgets(),
            vec![Widget::Transition, Widget::Overlay, Widget::OutsideLabels]
        );
        assert_eq!(canvas.page(), None);

        canvas.build_transition(&context(&[NavigationState::TransitionToInside]));
        assert_eq!(canvas.widgets()[2], Widget::InsideLabels);
        canvas.build_transition(&context(&[
            NavigationState::TransitionToOutside,
            NavigationState::Outside,
            NavigationState::TransitionToHome,
        ]));
        assert_eq!(canvas.widgets()[2], Widget::InsideLabels);
    }

    #[test]
    fn layout_is_scaled_on_high_resolution() {
        let model = Arc::new(ThermostatModel::new());
        let config = Config {
            width: 720,
            height: 1280,
            high_resolution: true,
            ..Config::default()
        };
        let mut canvas = MainCanvas::with_rng(&config, model, StdRng::seed_from_u64(2));
        canvas.build_page(Page::Home, &NavigationContext::new());
        assert_eq!(
            canvas.placement(Widget::Bubble).map(|p| p.bounds.origin),
            Some(cgmath::Point2::new(72., 267.))
        );
        assert_eq!(
            canvas.placement(Widget::Date).map(|p| p.bounds),
            Some(Rect::from_xywh(360., 22., 360., 67.))
        );
    }

    #[test]
    fn inside_labels_follow_model_outside_labels_follow_pressure() {
        let (model, mut canvas) = canvas();
        canvas.build_page(Page::Home, &NavigationContext::new());
        model.set_temperature(77);
        model.set_pressure(1010);
        canvas.on_parallax_finished();
        assert_eq!(canvas.inside_labels().temperature, 77);
        assert_eq!(canvas.inside_labels().pressure, 1010);
        assert_eq!(canvas.outside_labels().pressure, 1010);
        assert!((60..=90).contains(&canvas.outside_labels().temperature));
        assert!((75..=88).contains(&canvas.outside_labels().humidity));
    }

    #[test]
    fn parallax_gates_the_popup() {
        let (model, mut canvas) = canvas();
        canvas.build_page(Page::Home, &NavigationContext::new());
        canvas.on_parallax_started();
        model.set_temperature_threshold(80);
        canvas.poll();
        canvas.render(Duration::from_millis(0), &Scene::default());
        assert_eq!(canvas.popup().elapsed(), 50);

        canvas.on_parallax_finished();
        canvas.render(Duration::from_millis(40), &Scene::default());
        assert_eq!(canvas.popup().elapsed(), 50);
        assert_eq!(canvas.rendered_frames(), 2);
        assert_eq!(canvas.bubble_ticks(), 2);
    }

    #[test]
    fn slider_drag_dims_secondary_info() {
        let (model, mut canvas) = canvas();
        canvas.build_page(Page::Inside, &context(&[NavigationState::Inside]));
        let area = canvas.slider().slider_area();
        let (x, y) = (area.origin.x + 5., area.origin.y + 100.);

        assert!(canvas.handle_event(&Pointer::touch(PointerAction::Pressed, x, y)));
        assert!(canvas.handle_event(&Pointer::touch(PointerAction::Dragged, x, y + 40.)));
        assert!(canvas.secondary_info_dimmed());
        assert!(canvas.handle_event(&Pointer::touch(PointerAction::Released, x, y + 40.)));
        assert!(!canvas.secondary_info_dimmed());
        assert_eq!(model.temperature_threshold(), canvas.slider().threshold());

        canvas.build_page(Page::Home, &NavigationContext::new());
        assert!(!canvas.handle_event(&Pointer::touch(PointerAction::Pressed, x, y)));
    }
}
