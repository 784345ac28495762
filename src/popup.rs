//! Popup announcing a new temperature threshold on the home page.

use crate::model::{Subscription, ThermostatModel, ValueKind};
use log::trace;
use std::sync::Arc;
use std::time::Duration;

/// Popup animation advance per rendered frame.
pub const TICK_TIME: i32 = 50;
/// Time the popup stays fully shown.
pub const POP_OUT_DELAY: Duration = Duration::from_millis(5000);
pub const POP_IN_END: i32 = 360;
pub const POP_OUT_END: i32 = 600;

#[derive(Debug)]
pub struct ThresholdPopup {
    model: Arc<ThermostatModel>,
    subscription: Option<Subscription>,

    elapsed: i32,
    threshold: i32,
    active: bool,
    popping_in: bool,
    threshold_up: bool,
    scheduled_pop_out: bool,
    /// When the pending pop-out fires.
    pop_out_at: Option<Duration>,
    parallax_running: bool,
}

impl ThresholdPopup {
    pub fn new(model: Arc<ThermostatModel>) -> ThresholdPopup {
        ThresholdPopup {
            threshold: model.temperature_threshold(),
            model,
            subscription: None,
            elapsed: 0,
            active: false,
            popping_in: false,
            threshold_up: false,
            scheduled_pop_out: false,
            pop_out_at: None,
            parallax_running: false,
        }
    }

    /// Position in the popup animation: 0 to 360 pops in, 360 to 600 pops out.
    pub fn elapsed(&self) -> i32 {
        self.elapsed
    }

    /// Last threshold seen.
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// If true, the popup is visible.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_popping_in(&self) -> bool {
        self.popping_in
    }

    /// If true, the last change raised the threshold.
    pub fn threshold_up(&self) -> bool {
        self.threshold_up
    }

    pub fn pop_out_at(&self) -> Option<Duration> {
        self.pop_out_at
    }

    pub fn parallax_running(&self) -> bool {
        self.parallax_running
    }

    pub fn set_parallax_running(&mut self, running: bool) {
        self.parallax_running = running;
    }

    pub fn show(&mut self) {
        self.elapsed = 0;
        self.threshold = self.model.temperature_threshold();
        self.subscription = Some(self.model.add_observer(&[ValueKind::TemperatureThreshold]));
    }

    pub fn hide(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.model.remove_observer(subscription.id());
        }
        self.active = false;
        self.pop_out_at = None;
    }

    pub fn is_shown(&self) -> bool {
        self.subscription.is_some()
    }

    /// Applies queued threshold updates.
    pub fn poll_model(&mut self) {
        let updates = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return,
        };
        for update in updates {
            self.update(update.value);
        }
    }

    /// Pops the popup in if the threshold changed.
    pub fn update(&mut self, threshold: i32) {
        if self.threshold != threshold {
            self.threshold_up = self.threshold < threshold;
            self.threshold = threshold;
            self.active = true;
            self.popping_in = true;
            self.scheduled_pop_out = false;
            trace!("popup: threshold {} (up: {})", threshold, self.threshold_up);
        }
    }

    /// Advances the popup by one frame.
    ///
    /// The animation only moves while the popup is active and the parallax runs; the pending
    /// pop-out fires regardless.
    pub fn tick(&mut self, now: Duration) {
        if let Some(at) = self.pop_out_at {
            if now >= at {
                self.pop_out_at = None;
                self.popping_in = false;
                self.scheduled_pop_out = false;
            }
        }

        if !self.active || !self.parallax_running {
            return;
        }
        self.elapsed += TICK_TIME;
        if self.popping_in {
            if self.elapsed >= POP_IN_END {
                if !self.scheduled_pop_out {
                    self.pop_out_at = Some(now + POP_OUT_DELAY);
                }
                self.elapsed = POP_IN_END;
                self.scheduled_pop_out = true;
            }
        } else if self.elapsed >= POP_OUT_END {
            self.elapsed = 0;
            self.active = false;
            self.parallax_running = false;
        }
    }
}

impl Drop for ThresholdPopup {
    fn drop(&mut self) {
        self.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn shown_popup() -> (Arc<ThermostatModel>, ThresholdPopup) {
        let model = Arc::new(ThermostatModel::new());
        let mut popup = ThresholdPopup::new(Arc::clone(&model));
        popup.show();
        popup.set_parallax_running(true);
        (model, popup)
    }

    #[test]
    fn same_threshold_does_not_activate() {
        let (model, mut popup) = shown_popup();
        model.set_temperature_threshold(69);
        popup.poll_model();
        assert!(!popup.is_active());
        popup.tick(ms(0));
        assert_eq!(popup.elapsed(), 0);
    }

    #[test]
    fn full_cycle() {
        let (model, mut popup) = shown_popup();
        model.set_temperature_threshold(72);
        popup.poll_model();
        assert!(popup.is_active());
        assert!(popup.threshold_up());

        // 360 / 50 rounds up to 8 frames
        for frame in 0..8 {
            popup.tick(ms(frame * 40));
        }
        assert_eq!(popup.elapsed(), POP_IN_END);
        assert_eq!(popup.pop_out_at(), Some(ms(7 * 40) + POP_OUT_DELAY));

        // stays up
        popup.tick(ms(1000));
        assert_eq!(popup.elapsed(), POP_IN_END);
        assert!(popup.is_popping_in());

        popup.tick(ms(280 + 5000));
        assert!(!popup.is_popping_in());
        assert_eq!(popup.elapsed(), POP_IN_END + TICK_TIME);
        for frame in 0..4 {
            popup.tick(ms(6000 + frame * 40));
        }
        assert_eq!(popup.elapsed(), 0);
        assert!(!popup.is_active());
        assert!(!popup.parallax_running());
    }

    #[test]
    fn frozen_without_parallax() {
        let (model, mut popup) = shown_popup();
        popup.set_parallax_running(false);
        model.set_temperature_threshold(60);
        popup.poll_model();
        assert!(!popup.threshold_up());
        popup.tick(ms(40));
        assert_eq!(popup.elapsed(), 0);
        assert!(popup.is_active());
    }

    #[test]
    fn hide_cancels_pop_out() {
        let (model, mut popup) = shown_popup();
        model.set_temperature_threshold(80);
        popup.poll_model();
        for frame in 0..8 {
            popup.tick(ms(frame));
        }
        assert!(popup.pop_out_at().is_some());
        popup.hide();
        assert!(popup.pop_out_at().is_none());
        assert!(!popup.is_active());
        assert_eq!(model.observer_count(), 0);
    }
}
