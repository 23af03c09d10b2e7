use macroquad::prelude::{Color, Vec2, draw_circle, draw_triangle, vec2};
use runaway_core::HeartFrame;

const HEART_BASE_SIZE: f32 = 22.0;

pub const HEART_COLORS: [Color; 5] = [
    Color::from_rgba(229, 57, 53, 255),
    Color::from_rgba(236, 64, 122, 255),
    Color::from_rgba(240, 98, 146, 255),
    Color::from_rgba(216, 27, 96, 255),
    Color::from_rgba(244, 143, 177, 255),
];

pub fn heart_color(glyph: usize, opacity: f32) -> Color {
    let base = HEART_COLORS[glyph % HEART_COLORS.len()];
    Color::new(base.r, base.g, base.b, base.a * opacity)
}

/// Two lobes over a downward triangle, centered on the frame's point.
pub fn draw_heart_at_screen(frame: &HeartFrame, color: Color) {
    let size = HEART_BASE_SIZE * frame.scale;
    let center = vec2(frame.center.x, frame.center.y);
    let lobe = size * 0.3;
    let lobe_y = center.y - size * 0.15;

    draw_circle(center.x - lobe, lobe_y, lobe, color);
    draw_circle(center.x + lobe, lobe_y, lobe, color);

    let left: Vec2 = vec2(center.x - lobe * 2.0, lobe_y + lobe * 0.2);
    let right: Vec2 = vec2(center.x + lobe * 2.0, lobe_y + lobe * 0.2);
    let tip: Vec2 = vec2(center.x, center.y + size * 0.5);
    draw_triangle(left, right, tip, color);
}
