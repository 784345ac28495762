//! Navigation state.

/// Where the application is, or where it is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationState {
    /// At home.
    Home,
    /// At the inside page.
    Inside,
    /// At the outside page.
    Outside,
    /// Going to the inside page.
    TransitionToInside,
    /// Going to the outside page.
    TransitionToOutside,
    /// Going home.
    TransitionToHome,
}

impl NavigationState {
    pub const ALL: [NavigationState; 6] = [
        NavigationState::Home,
        NavigationState::Inside,
        NavigationState::Outside,
        NavigationState::TransitionToInside,
        NavigationState::TransitionToOutside,
        NavigationState::TransitionToHome,
    ];

    /// If true, this state is an animated navigation between two pages.
    pub fn is_transition(self) -> bool {
        match self {
            NavigationState::TransitionToHome
            | NavigationState::TransitionToOutside
            | NavigationState::TransitionToInside => true,
            NavigationState::Home | NavigationState::Inside | NavigationState::Outside => false,
        }
    }
}

/// Holds the current and previous navigation state.
///
/// This is a plain state holder and does not check whether a state change is legal; see
/// [`NavigationController`](crate::NavigationController) for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationContext {
    current: NavigationState,
    previous: NavigationState,
}

impl Default for NavigationContext {
    fn default() -> Self {
        NavigationContext {
            current: NavigationState::Home,
            previous: NavigationState::Home,
        }
    }
}

impl NavigationContext {
    /// Creates a context at home.
    pub fn new() -> NavigationContext {
        NavigationContext::default()
    }

    /// Sets the new state and remembers the previous one.
    pub fn set_state(&mut self, state: NavigationState) {
        self.previous = self.current;
        self.current = state;
    }

    pub fn current(&self) -> NavigationState {
        self.current
    }

    pub fn previous(&self) -> NavigationState {
        self.previous
    }

    /// Returns true if any transition is in flight.
    pub fn in_transition(&self) -> bool {
        self.current.is_transition()
    }

    /// Returns true if the application is coming to or going from the inside page.
    ///
    /// Decides which side the transition sweep is drawn from.
    pub fn involves_inside(&self) -> bool {
        use NavigationState::*;
        self.current == Inside
            || self.previous == TransitionToInside
            || self.current == TransitionToInside
            || self.previous == Inside
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationState::*;
    use super::*;

    #[test]
    fn starts_at_home() {
        let context = NavigationContext::new();
        assert_eq!(context.current(), Home);
        assert_eq!(context.previous(), Home);
        assert!(!context.in_transition());
    }

    #[test]
    fn set_state_records_previous() {
        let mut context = NavigationContext::new();
        context.set_state(TransitionToOutside);
        context.set_state(Outside);
        assert_eq!(context.current(), Outside);
        assert_eq!(context.previous(), TransitionToOutside);
    }

    #[test]
    fn in_transition_iff_transition_state() {
        for &state in NavigationState::ALL.iter() {
            let mut context = NavigationContext::new();
            context.set_state(state);
            let expected = match state {
                TransitionToHome | TransitionToOutside | TransitionToInside => true,
                _ => false,
            };
            assert_eq!(context.in_transition(), expected, "{:?}", state);
        }
    }

    #[test]
    fn involves_inside_looks_at_both_states() {
        let mut context = NavigationContext::new();
        assert!(!context.involves_inside());

        context.set_state(TransitionToInside);
        assert!(context.involves_inside());
        context.set_state(Inside);
        assert!(context.involves_inside());
        context.set_state(TransitionToHome);
        assert!(context.involves_inside(), "previous is Inside");
        context.set_state(Home);
        assert!(!context.involves_inside());

        context.set_state(TransitionToOutside);
        context.set_state(Outside);
        context.set_state(TransitionToHome);
        assert!(!context.involves_inside());
    }
}
