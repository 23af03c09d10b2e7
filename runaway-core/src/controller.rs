use fastrand::Rng;
use tracing::{debug, trace};

use crate::config::{ClickAction, ControllerConfig};
use crate::geometry::{Point, Rect, Size};
use crate::motion::{ease_factor, proximity, step_toward};
use crate::placement::{PlacementValidator, StartPlacement, clamp_to_bounds, start_placement};
use crate::pointer::{PointerState, PointerTracker};
use crate::selector::{SelectionInput, select_target};

/// Measurements taken from the page on load and on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub bounds: Size,
    pub element: Size,
    /// Size of the static "accept" sibling, if the page has one.
    pub sibling: Option<Size>,
    /// Text region the element must not cover, container-relative.
    pub label: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Evading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub position: Point,
    pub distance: f32,
    pub ease: f32,
    pub mode: Mode,
    pub retargeted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Missed,
    Caught(ClickAction),
}

/// Drives one evasive element inside one container.
pub struct EvasiveController {
    config: ControllerConfig,
    layout: Layout,
    validator: PlacementValidator,
    position: Point,
    target: Point,
    pointer: PointerTracker,
    last_retarget_ms: Option<f64>,
    mode: Mode,
    rng: Rng,
}

impl EvasiveController {
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_rng(config, Rng::new())
    }

    pub fn with_seed(config: ControllerConfig, seed: u64) -> Self {
        Self::with_rng(config, Rng::with_seed(seed))
    }

    /// Configs are expected to have passed [`ControllerConfig::validate`];
    /// a zero repel radius would turn every mouse score into NaN.
    fn with_rng(config: ControllerConfig, rng: Rng) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid controller config");
        let validator = PlacementValidator::new(config.overlap_padding);
        Self {
            config,
            layout: Layout::default(),
            validator,
            position: Point::ORIGIN,
            target: Point::ORIGIN,
            pointer: PointerTracker::new(),
            last_retarget_ms: None,
            mode: Mode::Idle,
            rng,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.state()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn validator(&self) -> &PlacementValidator {
        &self.validator
    }

    pub fn element_rect(&self) -> Rect {
        Rect::at(self.position, self.layout.element)
    }

    pub fn on_pointer_move(&mut self, relative: Point) {
        self.pointer.on_move(relative);
    }

    pub fn on_pointer_enter(&mut self, relative: Point) {
        self.pointer.on_enter(relative);
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer.on_leave();
    }

    /// Re-measures the page and snaps both position and target to the start
    /// layout. Safe to call any number of times; the last call wins.
    pub fn on_resize(&mut self, layout: Layout) -> StartPlacement {
        let layout = Layout {
            bounds: layout.bounds.sanitized(),
            element: layout.element.sanitized(),
            sibling: layout.sibling.map(Size::sanitized),
            label: layout.label,
        };
        let placement = start_placement(
            self.config.start_layout,
            layout.bounds,
            layout.element,
            layout.sibling,
            self.config.pair_gap,
        );

        let sibling_rect = placement
            .sibling
            .zip(layout.sibling)
            .map(|(origin, size)| Rect::at(origin, size));
        self.validator = PlacementValidator::new(self.config.overlap_padding)
            .with_sibling(sibling_rect)
            .with_label(layout.label);

        self.layout = layout;
        self.position = placement.element;
        self.target = placement.element;
        self.mode = Mode::Idle;

        debug!(
            width = layout.bounds.width,
            height = layout.bounds.height,
            x = placement.element.x,
            y = placement.element.y,
            "evasive element placed"
        );
        placement
    }

    /// The element was re-measured (e.g. its label changed) but the page was
    /// not. Position and target stay put apart from re-clamping to the new
    /// legal range; the protected regions are left as they were.
    pub fn on_element_resized(&mut self, element: Size) {
        let element = element.sanitized();
        self.layout.element = element;
        self.position = clamp_to_bounds(self.position, self.layout.bounds, element);
        self.target = clamp_to_bounds(self.target, self.layout.bounds, element);
        debug!(
            width = element.width,
            height = element.height,
            x = self.position.x,
            y = self.position.y,
            "evasive element re-measured in place"
        );
    }

    pub fn element_center(&self) -> Point {
        let (half_w, half_h) = self.layout.element.half();
        self.position.offset(half_w, half_h)
    }

    pub fn distance_to_pointer(&self) -> f32 {
        self.pointer.distance_from(self.element_center())
    }

    pub fn proximity(&self, distance: f32) -> f32 {
        proximity(distance, self.config.repel_radius)
    }

    /// Commits a new target unless still cooling down from the last attempt.
    /// An attempt that finds no acceptable candidate keeps the old target
    /// but still starts the cooldown.
    pub fn retarget(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_retarget_ms {
            if now_ms - last < self.config.retarget_cooldown_ms {
                trace!(since_last_ms = now_ms - last, "retarget skipped, cooling down");
                return false;
            }
        }
        self.last_retarget_ms = Some(now_ms);

        let input = SelectionInput {
            position: self.position,
            pointer: self.pointer.position(),
            bounds: self.layout.bounds,
            element: self.layout.element,
            validator: self
                .config
                .enforce_overlap_avoidance
                .then_some(&self.validator),
        };

        match select_target(&input, &self.config, &mut self.rng) {
            Some(next) => {
                self.target = clamp_to_bounds(next, self.layout.bounds, self.layout.element);
                debug!(x = self.target.x, y = self.target.y, "new target committed");
                true
            }
            None => {
                debug!("every candidate overlapped a protected region, keeping target");
                false
            }
        }
    }

    /// Advances one animation frame and returns the position to render.
    pub fn on_tick(&mut self, now_ms: f64) -> Tick {
        let distance = self.distance_to_pointer();
        let evading = distance < self.config.repel_radius;
        self.mode = if evading { Mode::Evading } else { Mode::Idle };

        let retargeted = evading && self.retarget(now_ms);

        let ease = ease_factor(
            self.proximity(distance),
            self.config.ease_far,
            self.config.ease_near,
        );
        self.position = step_toward(self.position, self.target, ease);

        Tick {
            position: self.position,
            distance,
            ease,
            mode: self.mode,
            retargeted,
        }
    }

    /// Clicks are never suppressed; one that lands on the element triggers
    /// the configured action.
    pub fn on_click(&self, relative: Point) -> ClickOutcome {
        if self.element_rect().contains(relative) {
            debug!(x = relative.x, y = relative.y, "evasive element caught");
            ClickOutcome::Caught(self.config.click_action.clone())
        } else {
            ClickOutcome::Missed
        }
    }
}
