//! Navigation touch bands.

use crate::config::Config;
use crate::context::{NavigationContext, NavigationState};
use crate::events::Pointer;
use crate::navigation::Trigger;
use crate::rect::Rect;

/// Maps touches at the bottom of the display to navigation triggers.
///
/// At home, the left half of the bottom band leads inside and the right half leads outside; on
/// the inside and outside pages, the whole band leads home. Touches are ignored during
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationDesktop {
    inside_area: Rect,
    outside_area: Rect,
    bottom_area: Rect,
}

impl NavigationDesktop {
    /// Computes the bands for a display.
    pub fn new(config: &Config) -> NavigationDesktop {
        let width = f64::from(config.width);
        let height = f64::from(config.height);
        let touch_height = config.touch_height();
        let half_width = f64::from(config.width / 2);
        let top = height - touch_height;

        NavigationDesktop {
            inside_area: Rect::from_xywh(0., top, half_width, touch_height),
            outside_area: Rect::from_xywh(half_width, top, half_width, touch_height),
            bottom_area: Rect::from_xywh(0., top, width, touch_height),
        }
    }

    pub fn inside_area(&self) -> Rect {
        self.inside_area
    }

    pub fn outside_area(&self) -> Rect {
        self.outside_area
    }

    pub fn bottom_area(&self) -> Rect {
        self.bottom_area
    }

    /// Returns the navigation the pointer event asks for, if any.
    ///
    /// Any pointer action counts, not only presses.
    pub fn intent(&self, context: &NavigationContext, pointer: &Pointer) -> Option<Trigger> {
        if context.in_transition() {
            return None;
        }
        let location = pointer.location;
        match context.current() {
            NavigationState::Home => {
                if self.inside_area.contains(location) {
                    Some(Trigger::NavigateInside)
                } else if self.outside_area.contains(location) {
                    Some(Trigger::NavigateOutside)
                } else {
                    None
                }
            }
            _ => {
                if self.bottom_area.contains(location) {
                    Some(Trigger::NavigateHome)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NavigationState::*;
    use crate::events::PointerAction;

    fn desktop() -> NavigationDesktop {
        NavigationDesktop::new(&Config {
            width: 480,
            height: 800,
            ..Config::default()
        })
    }

    fn at(state: NavigationState) -> NavigationContext {
        let mut context = NavigationContext::new();
        context.set_state(state);
        context
    }

    fn press(x: f64, y: f64) -> Pointer {
        Pointer::touch(PointerAction::Pressed, x, y)
    }

    #[test]
    fn bands_are_computed_from_display() {
        let desktop = desktop();
        assert_eq!(desktop.inside_area(), Rect::from_xywh(0., 680., 240., 120.));
        assert_eq!(desktop.outside_area(), Rect::from_xywh(240., 680., 240., 120.));
        assert_eq!(desktop.bottom_area(), Rect::from_xywh(0., 680., 480., 120.));
    }

    #[test]
    fn home_bands() {
        let desktop = desktop();
        let home = NavigationContext::new();
        assert_eq!(desktop.intent(&home, &press(10., 700.)), Some(Trigger::NavigateInside));
        assert_eq!(desktop.intent(&home, &press(400., 790.)), Some(Trigger::NavigateOutside));
        assert_eq!(desktop.intent(&home, &press(240., 700.)), Some(Trigger::NavigateInside), "seam");
        assert_eq!(desktop.intent(&home, &press(10., 100.)), None);
    }

    #[test]
    fn edges_are_inclusive() {
        let desktop = desktop();
        let home = NavigationContext::new();
        assert_eq!(desktop.intent(&home, &press(0., 680.)), Some(Trigger::NavigateInside));
        assert_eq!(desktop.intent(&home, &press(480., 800.)), Some(Trigger::NavigateOutside));
        assert_eq!(desktop.intent(&home, &press(480.5, 800.)), None);
        assert_eq!(desktop.intent(&home, &press(10., 679.9)), None);
    }

    #[test]
    fn pages_go_home_from_whole_band() {
        let desktop = desktop();
        for &state in &[Inside, Outside] {
            let context = at(state);
            assert_eq!(desktop.intent(&context, &press(5., 700.)), Some(Trigger::NavigateHome));
            assert_eq!(desktop.intent(&context, &press(475., 700.)), Some(Trigger::NavigateHome));
            assert_eq!(desktop.intent(&context, &press(240., 400.)), None);
        }
    }

    #[test]
    fn transitions_ignore_touches() {
        let desktop = desktop();
        for &state in &[TransitionToInside, TransitionToOutside, TransitionToHome] {
            let context = at(state);
            for &(x, y) in &[(10., 700.), (400., 700.), (240., 100.)] {
                assert_eq!(desktop.intent(&context, &press(x, y)), None, "{:?}", state);
            }
        }
    }

    #[test]
    fn drags_count_too() {
        let desktop = desktop();
        let drag = Pointer::touch(PointerAction::Dragged, 10., 700.);
        assert_eq!(desktop.intent(&NavigationContext::new(), &drag), Some(Trigger::NavigateInside));
    }
}
