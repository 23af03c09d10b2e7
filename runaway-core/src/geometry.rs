use serde::{Deserialize, Serialize};

/// A point in container-relative pixels. Used both for element top-left
/// corners and for pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Negative or non-finite measurements collapse to zero so downstream
    /// clamp ranges never go NaN.
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self::new(fix(self.width), fix(self.height))
    }

    pub fn half(self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Axis-aligned intersection test with `padding` of slack. Touching
    /// edges count as overlap, so the test errs on the side of rejecting.
    pub fn overlaps_padded(&self, other: &Rect, padding: f32) -> bool {
        !(self.right() + padding < other.left()
            || self.left() - padding > other.right()
            || self.bottom() + padding < other.top()
            || self.top() - padding > other.bottom())
    }
}

/// Clamp that tolerates an inverted range: when `max < min` the result is
/// `min`. Zero-size layouts produce negative maxima, and `f32::clamp` would
/// panic there.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Exact at both endpoints: `lerp(a, b, 1.0) == b`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_inverted_range() {
        assert_eq!(clamp(5.0, 0.0, -20.0), 0.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(4.0, 0.0, 10.0), 4.0);
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn padded_overlap_catches_near_misses() {
        let a = Rect::new(0.0, 0.0, 100.0, 40.0);
        let b = Rect::new(105.0, 0.0, 50.0, 40.0);
        assert!(!a.overlaps_padded(&b, 0.0));
        assert!(a.overlaps_padded(&b, 10.0));
    }

    #[test]
    fn touching_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(a.overlaps_padded(&b, 0.0));
    }

    #[test]
    fn sanitized_size_drops_negative_and_nan() {
        let size = Size::new(-4.0, f32::NAN).sanitized();
        assert_eq!(size, Size::ZERO);
    }

    #[test]
    fn rect_center_and_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.center(), Point::new(60.0, 40.0));
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(!rect.contains(Point::new(111.0, 20.0)));
    }
}
