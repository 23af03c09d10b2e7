//! Picks the next resting spot for the evasive element.
//!
//! The weighted sampler fans candidates out around the escape direction,
//! pulls them slightly toward the middle of the container, drops any that
//! land on a protected region, and keeps the one that is both far from the
//! pointer and clear of the edges.

use fastrand::Rng;
use tracing::trace;

use crate::config::{
    CandidateSampling, ControllerConfig, JITTER_HALF_ANGLE, MOUSE_SCORE_WEIGHT,
    RETRY_CLEARANCE_FRACTION, RETRY_LIMIT, SAFETY_SCORE_WEIGHT,
};
use crate::geometry::{Point, Size, clamp, lerp};
use crate::placement::{PlacementValidator, clamp_to_bounds, max_offset};

/// Snapshot of everything a selection needs.
#[derive(Debug, Clone, Copy)]
pub struct SelectionInput<'a> {
    pub position: Point,
    pub pointer: Option<Point>,
    pub bounds: Size,
    pub element: Size,
    pub validator: Option<&'a PlacementValidator>,
}

impl SelectionInput<'_> {
    fn element_center(&self, top_left: Point) -> Point {
        let (half_w, half_h) = self.element.half();
        top_left.offset(half_w, half_h)
    }

    fn allowed(&self, candidate: Point) -> bool {
        self.validator
            .is_none_or(|validator| validator.allows(candidate, self.element))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Scored {
    position: Point,
    score: f32,
    displacement: f32,
}

/// Returns the next target, or `None` when every sampled candidate was
/// rejected by the placement validator.
pub fn select_target(
    input: &SelectionInput<'_>,
    config: &ControllerConfig,
    rng: &mut Rng,
) -> Option<Point> {
    match config.candidate_sampling {
        CandidateSampling::Weighted => select_weighted(input, config, rng),
        CandidateSampling::SingleDirectionWithRetry => {
            select_single_direction(input, config, rng)
        }
    }
}

/// Unit vector from the pointer to the element center. A missing pointer,
/// or one sitting exactly on the center, yields a uniformly random heading
/// rather than a substituted distance of 1, which would leave a zero vector
/// and pin every candidate to the current position.
pub fn away_direction(input: &SelectionInput<'_>, rng: &mut Rng) -> (f32, f32) {
    if let Some(pointer) = input.pointer {
        let center = input.element_center(input.position);
        let dx = center.x - pointer.x;
        let dy = center.y - pointer.y;
        let length = dx.hypot(dy);
        if length > 0.0 {
            return (dx / length, dy / length);
        }
    }
    let angle = rng.f32() * std::f32::consts::TAU;
    (angle.cos(), angle.sin())
}

pub fn mouse_score(center: Point, pointer: Option<Point>, repel_radius: f32) -> f32 {
    match pointer {
        Some(pointer) => clamp(center.distance_to(pointer) / repel_radius, 0.0, 1.0),
        None => 1.0,
    }
}

/// Distance to the nearest edge of the legal top-left range, normalized by
/// `safe_margin`.
pub fn safety_score(candidate: Point, max_x: f32, max_y: f32, safe_margin: f32) -> f32 {
    if safe_margin <= 0.0 {
        return 1.0;
    }
    let nearest_edge = candidate
        .x
        .min(max_x - candidate.x)
        .min(candidate.y)
        .min(max_y - candidate.y);
    clamp(nearest_edge / safe_margin, 0.0, 1.0)
}

fn jump_distance(config: &ControllerConfig, rng: &mut Rng) -> f32 {
    config.jump_min + rng.f32() * (config.jump_max - config.jump_min)
}

fn jittered((x, y): (f32, f32), rng: &mut Rng) -> (f32, f32) {
    let angle = (rng.f32() - 0.5) * 2.0 * JITTER_HALF_ANGLE;
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

pub fn select_weighted(
    input: &SelectionInput<'_>,
    config: &ControllerConfig,
    rng: &mut Rng,
) -> Option<Point> {
    let (max_x, max_y) = max_offset(input.bounds, input.element);
    let center = Point::new(max_x / 2.0, max_y / 2.0);
    let bias = config.center_bias();
    let away = away_direction(input, rng);

    let mut best: Option<Scored> = None;
    let mut rejected = 0usize;

    for _ in 0..config.candidate_count {
        let distance = jump_distance(config, rng);
        let (dir_x, dir_y) = jittered(away, rng);

        let raw = input.position.offset(dir_x * distance, dir_y * distance);
        let biased = Point::new(lerp(raw.x, center.x, bias), lerp(raw.y, center.y, bias));
        let candidate = clamp_to_bounds(biased, input.bounds, input.element);

        if !input.allowed(candidate) {
            rejected += 1;
            continue;
        }

        let score = mouse_score(
            input.element_center(candidate),
            input.pointer,
            config.repel_radius,
        ) * MOUSE_SCORE_WEIGHT
            + safety_score(candidate, max_x, max_y, config.safe_margin) * SAFETY_SCORE_WEIGHT;
        let scored = Scored {
            position: candidate,
            score,
            displacement: candidate.distance_to(input.position),
        };

        // Ties go to the candidate that travels further; edge-clamped
        // candidates all share a zero safety score.
        let better = match best {
            None => true,
            Some(current) => {
                scored.score > current.score
                    || (scored.score == current.score
                        && scored.displacement > current.displacement)
            }
        };
        if better {
            best = Some(scored);
        }
    }

    trace!(
        candidates = config.candidate_count,
        rejected,
        best_score = best.map(|b| b.score),
        "weighted selection finished"
    );
    best.map(|scored| scored.position)
}

pub fn select_single_direction(
    input: &SelectionInput<'_>,
    config: &ControllerConfig,
    rng: &mut Rng,
) -> Option<Point> {
    let away = away_direction(input, rng);
    let distance = jump_distance(config, rng);
    let (dir_x, dir_y) = jittered(away, rng);

    let mut candidate = clamp_to_bounds(
        input.position.offset(dir_x * distance, dir_y * distance),
        input.bounds,
        input.element,
    );

    if let Some(pointer) = input.pointer {
        let clearance = config.repel_radius * RETRY_CLEARANCE_FRACTION;
        for _ in 0..RETRY_LIMIT {
            if input.element_center(candidate).distance_to(pointer) > clearance {
                break;
            }
            let retry = input.position.offset(
                (rng.f32() * 2.0 - 1.0) * config.jump_max,
                (rng.f32() * 2.0 - 1.0) * config.jump_max,
            );
            candidate = clamp_to_bounds(retry, input.bounds, input.element);
        }
    }

    input.allowed(candidate).then_some(candidate)
}
