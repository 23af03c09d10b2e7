use macroquad::prelude::*;
use runaway_core::{Rect as LayoutRect, Size};

#[derive(Debug, Clone)]
pub struct ButtonDrawConfig {
    pub font_size: u16,
    pub padding_x: f32,  // horizontal padding around the label
    pub padding_y: f32,  // vertical padding around the label
    pub border_px: f32,
    pub fill_color: Color,
    pub border_color: Color,
    pub text_color: Color,
}

impl ButtonDrawConfig {
    pub fn accept() -> Self {
        Self {
            fill_color: Color::from_rgba(233, 30, 99, 255),
            border_color: Color::from_rgba(173, 20, 87, 255),
            text_color: WHITE,
            ..Self::default()
        }
    }

    pub fn evasive() -> Self {
        Self::default()
    }

    /// Button size for `label`, rounded up so resizes don't jitter by
    /// sub-pixel font metrics.
    pub fn measure(&self, label: &str) -> Size {
        let dims = measure_text(label, None, self.font_size, 1.0);
        Size::new(
            (dims.width + self.padding_x * 2.0).ceil(),
            (self.font_size as f32 + self.padding_y * 2.0).ceil(),
        )
    }
}

impl Default for ButtonDrawConfig {
    fn default() -> Self {
        Self {
            font_size: 28,
            padding_x: 22.0,
            padding_y: 8.0,
            border_px: 3.0,
            fill_color: Color::from_rgba(236, 239, 241, 255),
            border_color: Color::from_rgba(96, 125, 139, 255),
            text_color: Color::from_rgba(38, 50, 56, 255),
        }
    }
}

pub fn draw_button(rect: LayoutRect, label: &str, config: &ButtonDrawConfig) {
    draw_rectangle(rect.x, rect.y, rect.width, rect.height, config.fill_color);
    draw_rectangle_lines(
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        config.border_px,
        config.border_color,
    );

    let dims = measure_text(label, None, config.font_size, 1.0);
    let text_x = rect.x + (rect.width - dims.width) / 2.0;
    let text_y = rect.y + (rect.height - dims.height) / 2.0 + dims.offset_y;
    draw_text(
        label,
        text_x,
        text_y,
        config.font_size as f32,
        config.text_color,
    );
}
