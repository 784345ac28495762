//! Rectangles.

use cgmath::{Point2, Vector2};

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin (top left; y points down).
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Creates a new rectangle from its origin coordinates and size.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            origin: Point2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.x
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.y
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// All four edges count as inside, so a touch exactly on the bottom edge of the screen still
    /// hits a band that ends there.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x <= self.max_x()
            && point.y <= self.max_y()
    }

    /// Returns a new rectangle inset by the specified amount.
    pub fn inset(&self, horiz: f64, vert: f64) -> Rect {
        Rect::from_xywh(
            self.origin.x + horiz,
            self.origin.y + vert,
            self.size.x - 2. * horiz,
            self.size.y - 2. * vert,
        )
    }
}

#[test]
fn test_rect_contains_edges() {
    let rect = Rect::from_xywh(10., 20., 30., 40.);
    assert!(rect.contains(Point2::new(10., 20.)), "top left corner");
    assert!(rect.contains(Point2::new(40., 60.)), "bottom right corner");
    assert!(rect.contains(Point2::new(25., 30.)));
    assert!(!rect.contains(Point2::new(9.9, 30.)));
    assert!(!rect.contains(Point2::new(25., 60.1)));

    let outset = rect.inset(-12., -12.);
    assert_eq!(outset, Rect::from_xywh(-2., 8., 54., 64.));
    assert!(outset.contains(Point2::new(0., 10.)));
}
