use crate::config::{START_ROW_FRACTION, StartLayout};
use crate::geometry::{Point, Rect, Size, clamp};

/// Regions the evasive element must never come to rest on, in the same
/// container-relative space as candidate positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementValidator {
    padding: f32,
    sibling: Option<Rect>,
    label: Option<Rect>,
}

impl PlacementValidator {
    pub fn new(padding: f32) -> Self {
        Self {
            padding,
            sibling: None,
            label: None,
        }
    }

    pub fn with_sibling(mut self, sibling: Option<Rect>) -> Self {
        self.sibling = sibling;
        self
    }

    pub fn with_label(mut self, label: Option<Rect>) -> Self {
        self.label = label;
        self
    }

    pub fn sibling(&self) -> Option<Rect> {
        self.sibling
    }

    pub fn label(&self) -> Option<Rect> {
        self.label
    }

    /// Whether an element of `size` with its top-left at `candidate` stays
    /// clear of every protected region.
    pub fn allows(&self, candidate: Point, size: Size) -> bool {
        let rect = Rect::at(candidate, size);
        [self.sibling, self.label]
            .iter()
            .flatten()
            .all(|protected| !rect.overlaps_padded(protected, self.padding))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartPlacement {
    pub element: Point,
    pub sibling: Option<Point>,
}

/// Upper-left bound of the area the element's top-left may occupy.
pub fn max_offset(bounds: Size, element: Size) -> (f32, f32) {
    (bounds.width - element.width, bounds.height - element.height)
}

pub fn clamp_to_bounds(point: Point, bounds: Size, element: Size) -> Point {
    let (max_x, max_y) = max_offset(bounds, element);
    Point::new(clamp(point.x, 0.0, max_x), clamp(point.y, 0.0, max_y))
}

/// Computes the start coordinates for a (re)layout.
///
/// `PairedWithSibling` puts the static sibling and the evasive element side
/// by side, centered as a group, three quarters of the way down the free
/// vertical space. Falls back to `Centered` when no sibling was measured.
pub fn start_placement(
    layout: StartLayout,
    bounds: Size,
    element: Size,
    sibling: Option<Size>,
    gap: f32,
) -> StartPlacement {
    match (layout, sibling) {
        (StartLayout::PairedWithSibling, Some(sibling)) => {
            let start_y = (bounds.height - element.height) * START_ROW_FRACTION;
            let group_width = sibling.width + gap + element.width;
            let start_x = (bounds.width - group_width) / 2.0;
            let element_start = Point::new(start_x + sibling.width + gap, start_y);
            StartPlacement {
                element: clamp_to_bounds(element_start, bounds, element),
                sibling: Some(Point::new(start_x.max(0.0), start_y.max(0.0))),
            }
        }
        _ => {
            let centered = Point::new(
                (bounds.width - element.width) / 2.0,
                (bounds.height - element.height) / 2.0,
            );
            StartPlacement {
                element: clamp_to_bounds(centered, bounds, element),
                sibling: None,
            }
        }
    }
}
