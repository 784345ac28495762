//! Events.

use cgmath::Point2;
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

/// Types of pointing devices or mechanisms.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDevice {
    /// Touch input from a finger or something of the sort; is expected to be imprecise.
    Touch = 0,

    /// Any indirect input mechanism, e.g. a mouse on a desktop simulator.
    Cursor = 1,
}

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Pressed,
    Dragged,
    Released,
    /// The pointer left the widget that was tracking it; treated like a release.
    Exited,
}

impl PointerAction {
    /// If true, the pointer is no longer down.
    pub fn is_release(self) -> bool {
        match self {
            PointerAction::Released | PointerAction::Exited => true,
            PointerAction::Pressed | PointerAction::Dragged => false,
        }
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Identity of the event generator (e.g. which touch controller), or zero.
    pub id: u64,

    /// Event location in display coordinates.
    pub location: Point2<f64>,

    pub action: PointerAction,

    /// The device type that emitted this pointer event.
    pub device: PointerDevice,
}

impl Pointer {
    /// Creates a touch event from generator zero.
    pub fn touch(action: PointerAction, x: f64, y: f64) -> Pointer {
        Pointer {
            id: 0,
            location: Point2::new(x, y),
            action,
            device: PointerDevice::Touch,
        }
    }

    pub fn x(&self) -> f64 {
        self.location.x
    }

    pub fn y(&self) -> f64 {
        self.location.y
    }
}

/// A shareable callback.
pub struct Handler<T>(Arc<Mutex<dyn FnMut(T) + Send>>);

impl<T> Clone for Handler<T> {
    fn clone(&self) -> Self {
        Handler(Arc::clone(&self.0))
    }
}

impl<T> Handler<T> {
    pub fn new<F: 'static + FnMut(T) + Send>(handler: F) -> Self {
        Handler(Arc::new(Mutex::new(handler)))
    }

    /// Calls the handler.
    pub fn call(&self, value: T) {
        (&mut *self.0.lock())(value)
    }

    /// Returns true if both handles point to the same callback.
    pub fn ptr_eq(&self, other: &Handler<T>) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handler<{}>", std::any::type_name::<T>())
    }
}

#[test]
fn test_handler_clones_share_state() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let count = Arc::new(AtomicUsize::new(0));
    let handler = {
        let count = Arc::clone(&count);
        Handler::new(move |n: usize| {
            count.fetch_add(n, Ordering::SeqCst);
        })
    };
    let clone = handler.clone();
    handler.call(2);
    clone.call(3);
    assert_eq!(count.load(Ordering::SeqCst), 5);
    assert!(handler.ptr_eq(&clone));
    assert!(!handler.ptr_eq(&Handler::new(|_: usize| ())));
}
