use fastrand::Rng;

use crate::geometry::{Point, Size, clamp};

pub const HEART_GLYPHS: [&str; 5] = ["❤", "💖", "💗", "💘", "💕"];
pub const SPAWN_INTERVAL_MS: f64 = 180.0;
const MIN_SCALE: f32 = 0.8;
const SCALE_SPREAD: f32 = 1.6;
const MAX_DRIFT_PX: f32 = 120.0;
const MIN_DURATION_S: f32 = 4.5;
const DURATION_SPREAD_S: f32 = 4.0;
const MAX_DELAY_S: f32 = 0.4;
/// Hearts linger this long after their rise finishes before removal.
const CLEANUP_GRACE_S: f32 = 1.0;
// A backgrounded tab can stall frames for seconds; don't dump a wall of hearts.
const MAX_SPAWNS_PER_UPDATE: usize = 8;
const FADE_IN: f32 = 0.1;
const FADE_OUT: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub glyph: usize,
    /// Horizontal start as a fraction of viewport width.
    pub x_fraction: f32,
    pub scale: f32,
    pub drift_px: f32,
    pub duration_s: f32,
    pub delay_s: f32,
    pub born_ms: f64,
}

/// Where and how to draw a heart on a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartFrame {
    pub center: Point,
    pub scale: f32,
    pub opacity: f32,
}

impl Heart {
    pub fn glyph_str(&self) -> &'static str {
        HEART_GLYPHS[self.glyph % HEART_GLYPHS.len()]
    }

    fn age_s(&self, now_ms: f64) -> f32 {
        ((now_ms - self.born_ms) / 1000.0) as f32
    }

    pub fn expired(&self, now_ms: f64) -> bool {
        self.age_s(now_ms) >= self.duration_s + CLEANUP_GRACE_S
    }

    /// Rise progress in `[0, 1]`, zero while still in the start delay.
    pub fn progress(&self, now_ms: f64) -> f32 {
        clamp(
            (self.age_s(now_ms) - self.delay_s) / self.duration_s,
            0.0,
            1.0,
        )
    }

    /// Rises from just below the viewport to just above it, drifting
    /// sideways and fading at both ends.
    pub fn sample(&self, now_ms: f64, viewport: Size) -> HeartFrame {
        let t = self.progress(now_ms);
        let opacity = if t < FADE_IN {
            t / FADE_IN
        } else if t > 1.0 - FADE_OUT {
            (1.0 - t) / FADE_OUT
        } else {
            1.0
        };
        let travel = viewport.height * 1.2;
        HeartFrame {
            center: Point::new(
                self.x_fraction * viewport.width + self.drift_px * t,
                viewport.height * 1.1 - travel * t,
            ),
            scale: self.scale,
            opacity: clamp(opacity, 0.0, 1.0),
        }
    }
}

pub struct HeartSpawner {
    rng: Rng,
    hearts: Vec<Heart>,
    next_spawn_ms: Option<f64>,
}

impl HeartSpawner {
    pub fn new() -> Self {
        Self::with_rng(Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Rng::with_seed(seed))
    }

    fn with_rng(rng: Rng) -> Self {
        Self {
            rng,
            hearts: Vec::new(),
            next_spawn_ms: None,
        }
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    /// Spawns whatever is due and drops expired hearts.
    pub fn update(&mut self, now_ms: f64) {
        let mut next = self.next_spawn_ms.unwrap_or(now_ms);
        let mut spawned = 0;
        while next <= now_ms && spawned < MAX_SPAWNS_PER_UPDATE {
            let heart = self.spawn(next);
            self.hearts.push(heart);
            next += SPAWN_INTERVAL_MS;
            spawned += 1;
        }
        if next <= now_ms {
            next = now_ms + SPAWN_INTERVAL_MS;
        }
        self.next_spawn_ms = Some(next);
        self.hearts.retain(|heart| !heart.expired(now_ms));
    }

    fn spawn(&mut self, born_ms: f64) -> Heart {
        Heart {
            glyph: self.rng.usize(..HEART_GLYPHS.len()),
            x_fraction: self.rng.f32(),
            scale: MIN_SCALE + self.rng.f32() * SCALE_SPREAD,
            drift_px: (self.rng.f32() * 2.0 - 1.0) * MAX_DRIFT_PX,
            duration_s: MIN_DURATION_S + self.rng.f32() * DURATION_SPREAD_S,
            delay_s: self.rng.f32() * MAX_DELAY_S,
            born_ms,
        }
    }
}

impl Default for HeartSpawner {
    fn default() -> Self {
        Self::new()
    }
}
