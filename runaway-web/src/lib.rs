use macroquad::miniquad;
use macroquad::prelude::*;
use runaway_core::{
    ClickAction, ClickOutcome, ControllerConfig, Destination, EvasiveController, HeartSpawner,
    Layout, Point, Rect as LayoutRect, Size, StartPlacement, pointer::relative_to,
};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::button::{ButtonDrawConfig, draw_button};
use crate::heart_draw::{draw_heart_at_screen, heart_color};

mod button;
mod heart_draw;

const QUESTION_TEXT: &str = "Will you go out with me?";
const CELEBRATION_TEXT: &str = "Yay! See you soon!";
const REFUSAL_TEXT: &str = "Okay... maybe next time.";
const YES_LABEL: &str = "YES";
const NO_LABEL: &str = "NO";
const QUESTION_FONT_SIZE: u16 = 40;
/// Vertical position of the question's baseline as a fraction of height.
const QUESTION_ROW_FRACTION: f32 = 0.3;
/// The arena fills the window.
const ARENA_ORIGIN: Point = Point::ORIGIN;
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV_VAR: &str = "RUNAWAY_CONFIG";

static CURRENT_PAGE: AtomicU32 = AtomicU32::new(0);
static CATCH_COUNT: AtomicU32 = AtomicU32::new(0);
static PENDING_CELEBRATION: AtomicBool = AtomicBool::new(false);
static PENDING_LEGACY_TOGGLE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Question,
    Celebration,
    Refusal,
}

impl Page {
    fn id(self) -> u32 {
        match self {
            Page::Question => 0,
            Page::Celebration => 1,
            Page::Refusal => 2,
        }
    }

    fn for_destination(destination: Destination) -> Self {
        match destination {
            Destination::Celebration => Page::Celebration,
            Destination::Refusal => Page::Refusal,
        }
    }
}

/// 0 = question, 1 = celebration, 2 = refusal.
#[unsafe(no_mangle)]
pub extern "C" fn current_page() -> u32 {
    CURRENT_PAGE.load(Ordering::SeqCst)
}

#[unsafe(no_mangle)]
pub extern "C" fn evasive_button_catches() -> u32 {
    CATCH_COUNT.load(Ordering::SeqCst)
}

#[unsafe(no_mangle)]
pub extern "C" fn show_celebration() {
    log_ui_action("host action: celebrate");
    PENDING_CELEBRATION.store(true, Ordering::SeqCst);
}

#[unsafe(no_mangle)]
pub extern "C" fn toggle_legacy_variant() {
    log_ui_action("host action: toggle legacy variant");
    PENDING_LEGACY_TOGGLE.store(true, Ordering::SeqCst);
}

fn take_pending_celebration() -> bool {
    PENDING_CELEBRATION.swap(false, Ordering::SeqCst)
}

fn take_pending_legacy_toggle() -> bool {
    PENDING_LEGACY_TOGGLE.swap(false, Ordering::SeqCst)
}

fn set_current_page(page: Page) {
    CURRENT_PAGE.store(page.id(), Ordering::SeqCst);
}

fn log_ui_action(label: &str) {
    #[cfg(target_arch = "wasm32")]
    miniquad::info!("{}", label);
    #[cfg(not(target_arch = "wasm32"))]
    println!("{}", label);
}

/// Reads a JSON controller config from the file named by `RUNAWAY_CONFIG`.
/// Any failure is logged and the defaults are used instead.
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> ControllerConfig {
    let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
        return ControllerConfig::default();
    };
    let parsed = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|json| ControllerConfig::from_json(&json).map_err(|err| err.to_string()));
    match parsed {
        Ok(config) => {
            log_ui_action(&format!("loaded controller config from {path}"));
            config
        }
        Err(err) => {
            eprintln!("ignoring controller config at {path}: {err}");
            ControllerConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> ControllerConfig {
    ControllerConfig::default()
}

fn pointer_inside(point: Point, bounds: Size) -> bool {
    point.x >= 0.0 && point.y >= 0.0 && point.x <= bounds.width && point.y <= bounds.height
}

/// Where the question sits: horizontally centered, baseline at a fixed
/// fraction of the height. Returned as the text's bounding box.
fn question_rect(screen: Size, text: Size) -> LayoutRect {
    let x = (screen.width - text.width) / 2.0;
    let baseline = screen.height * QUESTION_ROW_FRACTION;
    LayoutRect::new(x, baseline - text.height, text.width, text.height)
}

/// Page change and evasive-button label after a click lands on it.
fn apply_click_action(action: &ClickAction, label: &mut String) -> Option<Page> {
    match action {
        ClickAction::Navigate(destination) => Some(Page::for_destination(*destination)),
        ClickAction::Relabel(text) => {
            label.clone_from(text);
            None
        }
    }
}

fn now_ms() -> f64 {
    get_time() * 1000.0
}

pub struct AppState {
    page: Page,
    config: ControllerConfig,
    legacy: bool,
    controller: EvasiveController,
    hearts: HeartSpawner,
    accept_style: ButtonDrawConfig,
    evasive_style: ButtonDrawConfig,
    evasive_label: String,
    sibling_origin: Option<Point>,
    question: LayoutRect,
    screen: Size,
    pointer_was_inside: bool,
}

impl AppState {
    pub fn new(config: ControllerConfig) -> Self {
        let seed = miniquad::date::now().to_bits();
        Self {
            page: Page::Question,
            controller: EvasiveController::with_seed(config.clone(), seed),
            config,
            legacy: false,
            hearts: HeartSpawner::with_seed(seed.rotate_left(17)),
            accept_style: ButtonDrawConfig::accept(),
            evasive_style: ButtonDrawConfig::evasive(),
            evasive_label: NO_LABEL.to_string(),
            sibling_origin: None,
            question: LayoutRect::default(),
            screen: Size::ZERO,
            pointer_was_inside: false,
        }
    }

    fn current_screen() -> Size {
        Size::new(screen_width(), screen_height())
    }

    fn measure_layout(&self, screen: Size) -> (Layout, LayoutRect) {
        let dims = measure_text(QUESTION_TEXT, None, QUESTION_FONT_SIZE, 1.0);
        let question = question_rect(screen, Size::new(dims.width, dims.height));
        let layout = Layout {
            bounds: screen,
            element: self.evasive_style.measure(&self.evasive_label),
            sibling: Some(self.accept_style.measure(YES_LABEL)),
            label: Some(question),
        };
        (layout, question)
    }

    /// Re-measures everything whenever the window size changes, including
    /// the very first frame.
    fn relayout_if_resized(&mut self) {
        let screen = Self::current_screen();
        if screen == self.screen {
            return;
        }
        self.screen = screen;
        self.relayout();
    }

    fn relayout(&mut self) {
        let (layout, question) = self.measure_layout(self.screen);
        let placement: StartPlacement = self.controller.on_resize(layout);
        self.sibling_origin = placement.sibling;
        self.question = question;
    }

    fn set_page(&mut self, page: Page) {
        if self.page == page {
            return;
        }
        log_ui_action(&format!("page: {:?} -> {:?}", self.page, page));
        self.page = page;
        set_current_page(page);
    }

    fn toggle_variant(&mut self) {
        self.legacy = !self.legacy;
        self.config = if self.legacy {
            ControllerConfig::legacy()
        } else {
            load_config()
        };
        self.controller =
            EvasiveController::with_seed(self.config.clone(), miniquad::date::now().to_bits());
        self.evasive_label = NO_LABEL.to_string();
        self.relayout();
    }

    fn apply_pending_host_actions(&mut self) {
        if take_pending_celebration() {
            self.set_page(Page::Celebration);
        }
        if take_pending_legacy_toggle() {
            self.toggle_variant();
        }
    }

    fn track_pointer(&mut self) {
        let (mouse_x, mouse_y) = mouse_position();
        let pointer = relative_to(Point::new(mouse_x, mouse_y), ARENA_ORIGIN);
        let inside = pointer_inside(pointer, self.screen);

        match (inside, self.pointer_was_inside) {
            (true, false) => self.controller.on_pointer_enter(pointer),
            (true, true) => self.controller.on_pointer_move(pointer),
            (false, true) => self.controller.on_pointer_leave(),
            (false, false) => {}
        }
        self.pointer_was_inside = inside;
    }

    fn handle_left_click(&mut self) {
        if !is_mouse_button_pressed(MouseButton::Left) {
            return;
        }
        let (mouse_x, mouse_y) = mouse_position();
        let click = relative_to(Point::new(mouse_x, mouse_y), ARENA_ORIGIN);

        if let ClickOutcome::Caught(action) = self.controller.on_click(click) {
            let catches = CATCH_COUNT.fetch_add(1, Ordering::SeqCst) + 1;
            log_ui_action(&format!("evasive button caught ({catches} total)"));
            let previous_label = self.evasive_label.clone();
            if let Some(page) = apply_click_action(&action, &mut self.evasive_label) {
                self.set_page(page);
            } else if self.evasive_label != previous_label {
                // Relabel in place: only the element's own size changes.
                let size = self.evasive_style.measure(&self.evasive_label);
                self.controller.on_element_resized(size);
            }
            return;
        }

        if let Some(rect) = self.sibling_rect() {
            if rect.contains(click) {
                log_ui_action("accept button clicked");
                self.set_page(Page::Celebration);
            }
        }
    }

    fn sibling_rect(&self) -> Option<LayoutRect> {
        let size = self.controller.layout().sibling?;
        let origin = self.sibling_origin?;
        Some(LayoutRect::at(origin, size))
    }

    fn update(&mut self) {
        self.relayout_if_resized();
        self.apply_pending_host_actions();

        match self.page {
            Page::Question => {
                self.track_pointer();
                self.handle_left_click();
                self.controller.on_tick(now_ms());
            }
            Page::Celebration => self.hearts.update(now_ms()),
            Page::Refusal => {}
        }
    }

    fn render(&self) {
        match self.page {
            Page::Question => self.render_question(),
            Page::Celebration => self.render_celebration(),
            Page::Refusal => {
                clear_background(Color::from_rgba(38, 50, 56, 255));
                draw_centered_text(REFUSAL_TEXT, self.screen, QUESTION_FONT_SIZE, WHITE);
            }
        }
    }

    fn render_question(&self) {
        clear_background(Color::from_rgba(252, 228, 236, 255));

        draw_text(
            QUESTION_TEXT,
            self.question.x,
            self.question.bottom(),
            QUESTION_FONT_SIZE as f32,
            Color::from_rgba(136, 14, 79, 255),
        );

        if let Some(rect) = self.sibling_rect() {
            draw_button(rect, YES_LABEL, &self.accept_style);
        }
        draw_button(
            self.controller.element_rect(),
            &self.evasive_label,
            &self.evasive_style,
        );
    }

    fn render_celebration(&self) {
        clear_background(Color::from_rgba(255, 245, 248, 255));
        let now = now_ms();
        for heart in self.hearts.hearts() {
            let frame = heart.sample(now, self.screen);
            draw_heart_at_screen(&frame, heart_color(heart.glyph, frame.opacity));
        }
        draw_centered_text(
            CELEBRATION_TEXT,
            self.screen,
            QUESTION_FONT_SIZE,
            Color::from_rgba(136, 14, 79, 255),
        );
    }
}

fn draw_centered_text(text: &str, screen: Size, font_size: u16, color: Color) {
    let dims = measure_text(text, None, font_size, 1.0);
    draw_text(
        text,
        (screen.width - dims.width) / 2.0,
        (screen.height - dims.height) / 2.0 + dims.offset_y,
        font_size as f32,
        color,
    );
}

pub async fn run() {
    install_panic_hook();
    set_current_page(Page::Question);
    let mut app = AppState::new(load_config());

    loop {
        app.update();
        app.render();

        next_frame().await;
    }
}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}

#[cfg(test)]
mod tests {
    use super::*;
    use runaway_core::config::CAUGHT_LABEL;

    #[test]
    fn pointer_inside_includes_edges() {
        let screen = Size::new(800.0, 600.0);
        assert!(pointer_inside(Point::new(0.0, 0.0), screen));
        assert!(pointer_inside(Point::new(800.0, 600.0), screen));
        assert!(!pointer_inside(Point::new(-1.0, 10.0), screen));
        assert!(!pointer_inside(Point::new(10.0, 601.0), screen));
    }

    #[test]
    fn question_rect_is_centered_above_its_baseline() {
        let rect = question_rect(Size::new(800.0, 600.0), Size::new(400.0, 30.0));
        assert_eq!(rect, LayoutRect::new(200.0, 150.0, 400.0, 30.0));
    }

    #[test]
    fn navigate_action_switches_page() {
        let mut label = NO_LABEL.to_string();
        let page = apply_click_action(&ClickAction::Navigate(Destination::Refusal), &mut label);
        assert_eq!(page, Some(Page::Refusal));
        assert_eq!(label, NO_LABEL);
    }

    #[test]
    fn relabel_action_keeps_page() {
        let mut label = NO_LABEL.to_string();
        let page = apply_click_action(&ClickAction::Relabel(CAUGHT_LABEL.to_string()), &mut label);
        assert_eq!(page, None);
        assert_eq!(label, CAUGHT_LABEL);
    }

    #[test]
    fn page_ids_are_stable_for_the_host() {
        assert_eq!(Page::Question.id(), 0);
        assert_eq!(Page::Celebration.id(), 1);
        assert_eq!(Page::Refusal.id(), 2);
    }

    #[test]
    fn pending_host_actions_are_taken_once() {
        show_celebration();
        assert!(take_pending_celebration());
        assert!(!take_pending_celebration());
    }
}
