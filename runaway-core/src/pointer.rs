use crate::geometry::Point;

/// Last known pointer position relative to the container origin.
///
/// Coordinates and the inside flag are one value, so a handler can never
/// leave stale coordinates behind a cleared flag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Unknown,
    Inside(Point),
}

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    state: PointerState,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinates are stored raw; they may sit outside the container while
    /// the browser delivers a late move event.
    pub fn on_move(&mut self, relative: Point) {
        self.state = PointerState::Inside(relative);
    }

    pub fn on_enter(&mut self, relative: Point) {
        self.state = PointerState::Inside(relative);
    }

    pub fn on_leave(&mut self) {
        self.state = PointerState::Unknown;
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn position(&self) -> Option<Point> {
        match self.state {
            PointerState::Inside(point) => Some(point),
            PointerState::Unknown => None,
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self.state, PointerState::Inside(_))
    }

    /// Euclidean distance to `point`, or infinity when the pointer is not in
    /// the container.
    pub fn distance_from(&self, point: Point) -> f32 {
        match self.state {
            PointerState::Inside(pointer) => pointer.distance_to(point),
            PointerState::Unknown => f32::INFINITY,
        }
    }
}

/// Converts viewport coordinates into container-relative ones.
pub fn relative_to(client: Point, container_origin: Point) -> Point {
    Point::new(client.x - container_origin.x, client.y - container_origin.y)
}
