use runaway_core::{
    ControllerConfig, EvasiveController, Layout, Mode, Point, Rect, Size, StartLayout,
};

const JUMP_MIN_AFTER_JITTER: f32 = 420.0 * std::f32::consts::FRAC_1_SQRT_2;

fn centered_config() -> ControllerConfig {
    ControllerConfig {
        start_layout: StartLayout::Centered,
        ..ControllerConfig::default()
    }
}

// The centered layout leaves room on every side. From the default paired
// start (440, 420) a down-right heading clamps to (700, 560), about 295 px
// away, so the jumpMin·cos45° bound is only checked here.
fn scenario_layout() -> Layout {
    Layout {
        bounds: Size::new(800.0, 600.0),
        element: Size::new(100.0, 40.0),
        sibling: None,
        label: Some(Rect::new(0.0, 0.0, 40.0, 20.0)),
    }
}

#[test]
fn pointer_on_center_jumps_far_and_clear_of_protected_regions() {
    for seed in 0..32 {
        let mut controller = EvasiveController::with_seed(centered_config(), seed);
        controller.on_resize(scenario_layout());
        let old = controller.position();
        controller.on_pointer_move(controller.element_center());

        let tick = controller.on_tick(0.0);
        assert!(tick.retargeted, "seed {seed} kept its target");

        let target = controller.target();
        let moved = target.distance_to(old);
        assert!(
            moved >= JUMP_MIN_AFTER_JITTER,
            "seed {seed}: moved only {moved}px to {target:?}"
        );
        assert!(controller.validator().allows(target, Size::new(100.0, 40.0)));
    }
}

#[test]
fn paired_layout_retargets_clear_of_sibling_and_question() {
    let layout = Layout {
        bounds: Size::new(800.0, 600.0),
        element: Size::new(100.0, 40.0),
        sibling: Some(Size::new(120.0, 48.0)),
        label: Some(Rect::new(200.0, 40.0, 400.0, 60.0)),
    };
    for seed in 0..32 {
        let mut controller = EvasiveController::with_seed(ControllerConfig::default(), seed);
        let placement = controller.on_resize(layout);
        assert_eq!(placement.element, Point::new(440.0, 420.0));
        assert_eq!(placement.sibling, Some(Point::new(260.0, 420.0)));

        // Just left of center: every candidate heads away from the sibling.
        controller.on_pointer_move(controller.element_center().offset(-10.0, 0.0));
        let tick = controller.on_tick(0.0);
        assert!(tick.retargeted, "seed {seed} kept its target");

        let target = controller.target();
        assert!(target.x > 440.0, "seed {seed}: {target:?}");
        assert!(controller.validator().allows(target, layout.element));
        let element = Rect::at(target, layout.element);
        assert!(!element.overlaps_padded(&Rect::new(260.0, 420.0, 120.0, 48.0), 10.0));
        assert!(!element.overlaps_padded(&Rect::new(200.0, 40.0, 400.0, 60.0), 10.0));
    }
}

#[test]
fn far_pointer_never_retargets_and_closes_in_on_target() {
    let mut controller = EvasiveController::with_seed(centered_config(), 3);
    controller.on_resize(scenario_layout());
    controller.on_pointer_move(controller.element_center());
    assert!(controller.on_tick(0.0).retargeted);
    let target = controller.target();

    // Outside the container but still reported: distance stays finite and large.
    controller.on_pointer_move(Point::new(-2_000.0, -2_000.0));
    let mut remaining = controller.position().distance_to(target);
    for frame in 1..240 {
        let tick = controller.on_tick(frame as f64 * 16.0 + 5_000.0);
        assert_eq!(tick.mode, Mode::Idle);
        assert!(!tick.retargeted);
        assert_eq!(controller.target(), target);

        let now = tick.position.distance_to(target);
        assert!(now <= remaining);
        remaining = now;
    }
    assert!(remaining < 1.0);
}

#[test]
fn leaving_while_evading_stops_retargeting() {
    let mut controller = EvasiveController::with_seed(centered_config(), 8);
    controller.on_resize(scenario_layout());
    controller.on_pointer_enter(controller.element_center());
    assert_eq!(controller.on_tick(0.0).mode, Mode::Evading);

    controller.on_pointer_leave();
    let target = controller.target();
    let tick = controller.on_tick(10_000.0);
    assert!(tick.distance.is_infinite());
    assert_eq!(controller.proximity(tick.distance), 0.0);
    assert!(!tick.retargeted);
    assert_eq!(controller.target(), target);
}

#[test]
fn repeated_retarget_inside_cooldown_leaves_target_alone() {
    let mut controller = EvasiveController::with_seed(centered_config(), 21);
    controller.on_resize(scenario_layout());
    controller.on_pointer_move(controller.element_center());
    controller.retarget(100.0);
    let committed = controller.target();
    for offset in [1.0, 500.0, 1_149.0] {
        assert!(!controller.retarget(100.0 + offset));
        assert_eq!(controller.target(), committed);
    }
}

#[test]
fn legacy_sampler_escapes_nearby_pointer() {
    let mut controller = EvasiveController::with_seed(ControllerConfig::legacy(), 17);
    controller.on_resize(scenario_layout());
    let center = controller.element_center();
    controller.on_pointer_move(center.offset(-10.0, 0.0));

    let tick = controller.on_tick(0.0);
    assert!(tick.retargeted);
    let target = controller.target();
    assert!((0.0..=700.0).contains(&target.x));
    assert!((0.0..=560.0).contains(&target.y));
    // Constant ease regardless of proximity.
    assert!((tick.ease - 0.14).abs() < 1e-6);
}
