//! Navigation transitions.
//!
//! ```text
//!          NavigateInside                       ArriveInside
//!   Home ────────────────► TransitionToInside ─────────────► Inside
//!    │                             │                           │
//!    │ NavigateOutside             │ NavigateHome              │ NavigateHome
//!    ▼                             ▼                           │
//!   TransitionToOutside ───► TransitionToHome ◄────────────────┘
//!    │         NavigateHome    │      ▲
//!    │ ArriveOutside           │      │ NavigateHome
//!    ▼                         │      │
//!   Outside ───────────────────┼──────┘
//!                              │ ArriveHome
//!                              ▼
//!                             Home
//! ```

use crate::context::NavigationContext;
use crate::context::NavigationState::{self, *};
use log::{debug, warn};

/// Something that asks the navigation state to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    NavigateInside,
    NavigateOutside,
    NavigateHome,
    /// The transition animation ended on the inside page.
    ArriveInside,
    /// The transition animation ended on the outside page.
    ArriveOutside,
    /// The transition animation ended at home.
    ArriveHome,
}

impl Trigger {
    /// Returns true for the triggers that start a transition.
    pub fn is_navigation(self) -> bool {
        match self {
            Trigger::NavigateInside | Trigger::NavigateOutside | Trigger::NavigateHome => true,
            Trigger::ArriveInside | Trigger::ArriveOutside | Trigger::ArriveHome => false,
        }
    }
}

/// All allowed transitions as `(from, trigger, to)`.
///
/// Any pair not in this table is rejected. Navigating home from a transition state preempts (or
/// retargets) the running animation.
pub const TRANSITIONS: &[(NavigationState, Trigger, NavigationState)] = &[
    // from home
    (Home, Trigger::NavigateInside, TransitionToInside),
    (Home, Trigger::NavigateOutside, TransitionToOutside),
    // back home
    (Inside, Trigger::NavigateHome, TransitionToHome),
    (Outside, Trigger::NavigateHome, TransitionToHome),
    (TransitionToInside, Trigger::NavigateHome, TransitionToHome),
    (TransitionToOutside, Trigger::NavigateHome, TransitionToHome),
    (TransitionToHome, Trigger::NavigateHome, TransitionToHome),
    // animation completion
    (TransitionToInside, Trigger::ArriveInside, Inside),
    (TransitionToOutside, Trigger::ArriveOutside, Outside),
    (TransitionToHome, Trigger::ArriveHome, Home),
];

/// Looks up the target of a transition.
pub fn target(from: NavigationState, trigger: Trigger) -> Option<NavigationState> {
    TRANSITIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == trigger)
        .map(|(_, _, to)| *to)
}

/// Owns the navigation context and only lets it change along [`TRANSITIONS`].
#[derive(Debug, Default)]
pub struct NavigationController {
    context: NavigationContext,
}

impl NavigationController {
    pub fn new() -> NavigationController {
        NavigationController::default()
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    pub fn state(&self) -> NavigationState {
        self.context.current()
    }

    /// Applies a trigger.
    ///
    /// Returns the new state, or None (leaving the context untouched) if the transition is not
    /// allowed from the current state.
    pub fn apply(&mut self, trigger: Trigger) -> Option<NavigationState> {
        let from = self.context.current();
        match target(from, trigger) {
            Some(to) => {
                self.context.set_state(to);
                debug!("navigation: {:?} --{:?}--> {:?}", from, trigger, to);
                Some(to)
            }
            None => {
                if trigger.is_navigation() {
                    debug!("navigation: {:?} ignored in {:?}", trigger, from);
                } else {
                    warn!("navigation: unexpected {:?} in {:?}", trigger, from);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_direct_edge_between_pages() {
        for &(from, _, to) in TRANSITIONS {
            assert!(
                !(from == Inside && to == Outside) && !(from == Outside && to == Inside),
                "{:?} -> {:?}",
                from,
                to
            );
        }
    }

    #[test]
    fn leaving_home_only_from_home() {
        for &state in NavigationState::ALL.iter() {
            for &trigger in &[Trigger::NavigateInside, Trigger::NavigateOutside] {
                assert_eq!(target(state, trigger).is_some(), state == Home, "{:?}", state);
            }
        }
    }

    #[test]
    fn going_home_from_anywhere_but_home() {
        for &state in NavigationState::ALL.iter() {
            assert_eq!(
                target(state, Trigger::NavigateHome).is_some(),
                state != Home,
                "{:?}",
                state
            );
        }
    }

    #[test]
    fn arrivals_only_end_their_own_transition() {
        assert_eq!(target(TransitionToInside, Trigger::ArriveInside), Some(Inside));
        assert_eq!(target(TransitionToOutside, Trigger::ArriveOutside), Some(Outside));
        assert_eq!(target(TransitionToHome, Trigger::ArriveHome), Some(Home));
        assert_eq!(target(TransitionToInside, Trigger::ArriveOutside), None);
        assert_eq!(target(TransitionToHome, Trigger::ArriveInside), None);
        assert_eq!(target(Inside, Trigger::ArriveInside), None);
    }

    #[test]
    fn controller_rejects_without_touching_context() {
        let mut controller = NavigationController::new();
        assert_eq!(controller.apply(Trigger::NavigateInside), Some(TransitionToInside));
        assert_eq!(controller.apply(Trigger::ArriveInside), Some(Inside));
        let before = *controller.context();
        assert_eq!(controller.apply(Trigger::NavigateInside), None);
        assert_eq!(controller.apply(Trigger::NavigateOutside), None);
        assert_eq!(*controller.context(), before);
    }
}
