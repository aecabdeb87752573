//! Integration tests for tap, drag and external synchronization of the toggle.

use std::sync::Arc;
use std::time::Duration;

use directional_toggle::{
    DirectionalToggle, EventLoop, OptionValue, Orientation, PointerEvent, Size, ToggleConfig,
    ToggleOption,
};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

fn setup() -> EventLoop {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    EventLoop::new()
}

fn abc() -> Vec<ToggleOption> {
    vec![
        ToggleOption::text("A"),
        ToggleOption::text("B"),
        ToggleOption::text("C"),
    ]
}

/// A measured horizontal toggle over A, B, C with B selected.
fn measured_toggle() -> DirectionalToggle {
    let mut toggle = DirectionalToggle::new(abc()).with_value("B");
    toggle.resize(Size::new(150.0, 36.0));
    toggle
}

fn record(toggle: &DirectionalToggle) -> Arc<Mutex<Vec<OptionValue>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    toggle.on_change(move |value| seen_clone.lock().push(value.clone()));
    seen
}

fn settle(toggle: &mut DirectionalToggle) {
    for _ in 0..2000 {
        if !toggle.tick(FRAME) {
            return;
        }
    }
    panic!("animation did not settle: {toggle:?}");
}

#[test]
fn test_measured_toggle_rests_on_selected_option() {
    let _main_loop = setup();
    let toggle = measured_toggle();

    assert_eq!(toggle.item_extent(), 50.0);
    assert_eq!(toggle.offset(), 50.0);
    assert!(!toggle.is_animating());
}

#[test]
fn test_tap_animates_and_reports_once() {
    let main_loop = setup();
    let mut toggle = measured_toggle();
    let seen = record(&toggle);

    toggle.press(2);
    assert_eq!(toggle.active_index(), Some(2));
    assert!(toggle.is_animating());

    toggle.tick(Duration::from_millis(50));
    assert!(toggle.offset() > 50.0 && toggle.offset() < 100.0);

    settle(&mut toggle);
    assert_eq!(toggle.offset(), 100.0);

    // Nothing is delivered inside the emitting call.
    assert!(seen.lock().is_empty());
    main_loop.process_pending();
    assert_eq!(*seen.lock(), vec![OptionValue::from("C")]);
}

#[test]
fn test_drag_release_springs_to_nearest_option() {
    let main_loop = setup();
    let mut toggle = measured_toggle();
    let seen = record(&toggle);

    assert!(toggle.begin_drag());
    toggle.update_drag(30.0);
    assert_eq!(toggle.offset(), 80.0);
    assert!(!toggle.is_animating());

    toggle.end_drag();
    assert!(!toggle.is_dragging());
    assert_eq!(toggle.active_index(), Some(2));
    assert!(toggle.is_animating());

    settle(&mut toggle);
    assert_eq!(toggle.offset(), 100.0);

    main_loop.process_pending();
    assert_eq!(*seen.lock(), vec![OptionValue::from("C")]);
}

#[test]
fn test_drag_past_end_is_clamped() {
    let main_loop = setup();
    let mut toggle = measured_toggle();
    let seen = record(&toggle);

    toggle.begin_drag();
    toggle.update_drag(140.0);
    assert_eq!(toggle.offset(), 100.0);

    toggle.end_drag();
    assert_eq!(toggle.active_index(), Some(2));
    main_loop.process_pending();
    assert_eq!(*seen.lock(), vec![OptionValue::from("C")]);
}

#[test]
fn test_drag_offset_stays_on_track() {
    let _main_loop = setup();
    let mut toggle = measured_toggle();
    toggle.begin_drag();

    let mut translation = -300.0;
    while translation <= 300.0 {
        toggle.update_drag(translation);
        let offset = toggle.offset();
        assert!(
            (0.0..=100.0).contains(&offset),
            "offset {offset} out of range for translation {translation}"
        );
        translation += 7.0;
    }
}

#[test]
fn test_release_commits_rounded_offset() {
    let _main_loop = setup();

    for step in 0..=40 {
        let translation = -100.0 + step as f32 * 5.0;
        let mut toggle = measured_toggle();
        toggle.begin_drag();
        toggle.update_drag(translation);
        let released_at = toggle.offset();
        toggle.end_drag();

        let expected = (released_at / 50.0).round().clamp(0.0, 2.0) as usize;
        assert_eq!(
            toggle.active_index(),
            Some(expected),
            "released at {released_at}"
        );
    }
}

#[test]
fn test_tap_on_current_option_still_reports() {
    let main_loop = setup();
    let mut toggle = measured_toggle();
    let seen = record(&toggle);

    toggle.press(1);
    main_loop.process_pending();
    assert_eq!(*seen.lock(), vec![OptionValue::from("B")]);
}

#[test]
fn test_tap_is_ignored_while_dragging() {
    let main_loop = setup();
    let mut toggle = measured_toggle();
    let seen = record(&toggle);

    toggle.begin_drag();
    toggle.press(0);
    assert_eq!(toggle.active_index(), Some(1));
    assert!(toggle.is_dragging());

    main_loop.process_pending();
    assert!(seen.lock().is_empty());
}

#[test]
fn test_feeding_back_committed_value_is_quiet() {
    let main_loop = setup();
    let mut toggle = measured_toggle();
    let seen = record(&toggle);

    toggle.press(0);
    settle(&mut toggle);
    main_loop.process_pending();

    let started = toggle.offset_value().animations_started();
    let committed = seen.lock().last().cloned();
    if let Some(value) = committed {
        toggle.set_value(value);
    }

    assert_eq!(toggle.offset_value().animations_started(), started);
    assert!(!toggle.is_animating());
    assert_eq!(main_loop.process_pending(), 0);
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn test_external_change_mid_drag_is_superseded_by_release() {
    let main_loop = setup();
    let mut toggle = measured_toggle();
    let seen = record(&toggle);

    toggle.begin_drag();
    toggle.update_drag(-45.0);
    toggle.set_value("C");
    assert_eq!(toggle.offset(), 5.0);
    assert_eq!(toggle.active_index(), Some(1));

    toggle.end_drag();
    assert_eq!(toggle.active_index(), Some(0));
    settle(&mut toggle);
    assert_eq!(toggle.offset(), 0.0);

    main_loop.process_pending();
    assert_eq!(*seen.lock(), vec![OptionValue::from("A")]);
}

#[test]
fn test_empty_options() {
    let main_loop = setup();
    let mut toggle = DirectionalToggle::new(Vec::new()).with_value("A");
    let seen = record(&toggle);

    toggle.resize(Size::new(150.0, 36.0));
    assert_eq!(toggle.item_extent(), 0.0);
    assert_eq!(toggle.offset(), 0.0);

    toggle.press(0);
    toggle.begin_drag();
    toggle.update_drag(40.0);
    toggle.end_drag();
    toggle.emit(0);

    assert_eq!(toggle.offset(), 0.0);
    assert!(toggle.offset().is_finite());
    assert_eq!(main_loop.process_pending(), 0);
    assert!(seen.lock().is_empty());
}

#[test]
fn test_value_before_layout_is_applied_on_first_measurement() {
    let _main_loop = setup();
    let mut toggle = DirectionalToggle::new(abc());
    toggle.set_value("C");
    assert!(!toggle.is_animating());

    toggle.resize(Size::new(300.0, 36.0));
    assert_eq!(toggle.offset(), 200.0);
    assert!(!toggle.is_animating());
}

#[test]
fn test_vertical_pointer_drag() {
    let main_loop = setup();
    let mut toggle = DirectionalToggle::new(abc())
        .with_orientation(Orientation::Vertical)
        .with_value("A");
    toggle.resize(Size::new(128.0, 108.0));
    let seen = record(&toggle);
    assert_eq!(toggle.item_extent(), 36.0);

    assert!(toggle.handle_pointer(&PointerEvent::started(64.0, 18.0)));
    assert!(toggle.handle_pointer(&PointerEvent::moved(66.0, 40.0)));
    assert!(toggle.is_dragging());
    assert_eq!(toggle.offset(), 22.0);

    // Horizontal wobble does not move a vertical thumb.
    assert!(toggle.handle_pointer(&PointerEvent::moved(90.0, 60.0)));
    assert_eq!(toggle.offset(), 42.0);

    assert!(toggle.handle_pointer(&PointerEvent::ended(90.0, 60.0)));
    assert_eq!(toggle.active_index(), Some(1));
    settle(&mut toggle);
    assert_eq!(toggle.offset(), 36.0);

    main_loop.process_pending();
    assert_eq!(*seen.lock(), vec![OptionValue::from("B")]);
}

#[test]
fn test_callback_runs_on_connecting_thread_loop() {
    let main_loop = setup();
    let mut toggle = measured_toggle();
    let seen = record(&toggle);

    let handle = std::thread::spawn(move || {
        toggle.press(0);
        toggle
    });
    let toggle = handle.join().unwrap();
    assert_eq!(toggle.active_index(), Some(0));

    assert!(seen.lock().is_empty());
    assert_eq!(main_loop.process_pending(), 1);
    assert_eq!(*seen.lock(), vec![OptionValue::from("A")]);
}

const ABC_TOML: &str = r#"
value = "B"
options = [
    { label = "A", value = "A" },
    { label = "B", value = "B" },
    { label = "C", value = "C" },
]
"#;

/// A measured toggle loaded with `animation_table`, released after a drag toward C.
fn release_with_config(animation_table: &str) -> DirectionalToggle {
    let text = format!("{ABC_TOML}\n[animation]\n{animation_table}\n");
    let config = ToggleConfig::from_toml_str(&text).unwrap();
    let mut toggle = DirectionalToggle::from_config(config);
    toggle.resize(Size::new(150.0, 36.0));

    toggle.begin_drag();
    toggle.update_drag(30.0);
    toggle.end_drag();
    toggle
}

fn assert_release_stays_on_track(mut toggle: DirectionalToggle) {
    for frame in 0..5000 {
        let animating = toggle.tick(FRAME);
        let raw = toggle.offset_value().value();
        assert!(raw.is_finite(), "offset {raw} at frame {frame}");
        assert!(
            (0.0..=100.0).contains(&toggle.offset()),
            "offset {} at frame {frame}",
            toggle.offset()
        );
        if !animating {
            assert_eq!(toggle.offset(), 100.0);
            return;
        }
    }
    panic!("animation did not settle: {toggle:?}");
}

#[test]
fn test_heavily_damped_release_settles_on_track() {
    let _main_loop = setup();
    let toggle = release_with_config("damping = 1000");
    assert_eq!(toggle.active_index(), Some(2));
    assert_release_stays_on_track(toggle);
}

#[test]
fn test_very_stiff_release_settles_on_track() {
    let _main_loop = setup();
    assert_release_stays_on_track(release_with_config("stiffness = 1000000"));
}
