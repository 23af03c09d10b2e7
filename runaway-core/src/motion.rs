use crate::geometry::{Point, clamp, lerp};

/// Maps pointer distance to a `[0, 1]` threat level. Quadratic, so it stays
/// near zero until the pointer is close and then rises sharply.
pub fn proximity(distance: f32, repel_radius: f32) -> f32 {
    if !distance.is_finite() || repel_radius <= 0.0 {
        return 0.0;
    }
    let t = 1.0 - clamp(distance / repel_radius, 0.0, 1.0);
    t * t
}

pub fn ease_factor(proximity: f32, ease_far: f32, ease_near: f32) -> f32 {
    lerp(ease_far, ease_near, proximity)
}

/// One step of exponential pursuit, per axis.
pub fn step_toward(position: Point, target: Point, ease: f32) -> Point {
    Point::new(
        position.x + (target.x - position.x) * ease,
        position.y + (target.y - position.y) * ease,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_is_one_at_zero_distance() {
        assert_eq!(proximity(0.0, 160.0), 1.0);
        assert_eq!(ease_factor(1.0, 0.06, 0.20), 0.20);
    }

    #[test]
    fn proximity_is_zero_at_or_beyond_radius() {
        assert_eq!(proximity(160.0, 160.0), 0.0);
        assert_eq!(proximity(900.0, 160.0), 0.0);
        assert_eq!(proximity(f32::INFINITY, 160.0), 0.0);
        assert_eq!(ease_factor(0.0, 0.06, 0.20), 0.06);
    }

    #[test]
    fn proximity_is_quadratic() {
        assert_eq!(proximity(80.0, 160.0), 0.25);
    }

    #[test]
    fn step_never_overshoots() {
        let mut position = Point::new(0.0, 0.0);
        let target = Point::new(100.0, -50.0);
        let mut last = position.distance_to(target);
        for _ in 0..200 {
            position = step_toward(position, target, 0.2);
            let remaining = position.distance_to(target);
            assert!(remaining <= last);
            assert!(position.x <= target.x && position.y >= target.y);
            last = remaining;
        }
    }
}
