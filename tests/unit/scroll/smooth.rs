use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn scroller(limit: f64) -> SmoothScroller {
    SmoothScroller::new(SmoothScrollOptions::default(), limit).unwrap()
}

#[test]
fn wheel_glides_to_target_over_duration() {
    let mut s = scroller(10_000.0);
    assert_eq!(
        s.input(ScrollInput::Wheel { dx: 0.0, dy: 500.0 }),
        InputDisposition::Consumed
    );
    assert_eq!(s.target(), 500.0);

    s.raf(0.0);
    let mid = s.raf(600.0).unwrap();
    let expected = 500.0 * Ease::ExpoOutClamped.apply(0.5);
    assert!((mid.scroll - expected).abs() < 1e-9);
    assert_eq!(mid.direction, ScrollDirection::Forward);

    let end = s.raf(1200.0).unwrap();
    assert_eq!(end.scroll, 500.0);
    assert!(!s.is_scrolling());
    assert!(s.raf(1300.0).is_none());
}

#[test]
fn touch_deltas_are_amplified() {
    let mut s = scroller(10_000.0);
    s.input(ScrollInput::Touch { dx: 0.0, dy: 100.0 });
    assert_eq!(s.target(), 200.0);
    s.input(ScrollInput::Wheel { dx: 0.0, dy: 100.0 });
    assert_eq!(s.target(), 300.0);
}

#[test]
fn horizontal_gestures_are_ignored() {
    let mut s = scroller(1000.0);
    assert_eq!(
        s.input(ScrollInput::Wheel { dx: 40.0, dy: 0.0 }),
        InputDisposition::Ignored
    );
    assert_eq!(s.target(), 0.0);
}

#[test]
fn target_is_clamped_to_limit() {
    let mut s = scroller(300.0);
    s.input(ScrollInput::Wheel { dx: 0.0, dy: 5_000.0 });
    assert_eq!(s.target(), 300.0);
    s.input(ScrollInput::Wheel { dx: 0.0, dy: -9_000.0 });
    assert_eq!(s.target(), 0.0);
}

#[test]
fn listeners_see_every_emitted_offset() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut s = scroller(2_000.0);
    let sink = Rc::clone(&seen);
    s.on_scroll(move |e| sink.borrow_mut().push(e.scroll));

    s.scroll_to(250.0, true);
    s.input(ScrollInput::Wheel { dx: 0.0, dy: 100.0 });
    s.raf(0.0);
    s.raf(16.0);
    s.raf(2_000.0);

    let seen = seen.borrow();
    assert_eq!(seen.first().copied(), Some(250.0));
    assert_eq!(seen.last().copied(), Some(350.0));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn destroy_releases_listeners_and_restores_native_input() {
    let mut s = scroller(1_000.0);
    let id = s.on_scroll(|_| {});
    assert_eq!(s.listener_count(), 1);
    s.destroy();
    assert_eq!(s.listener_count(), 0);
    assert!(!s.off(id));
    assert_eq!(
        s.input(ScrollInput::Wheel { dx: 0.0, dy: 10.0 }),
        InputDisposition::Native
    );
    assert!(s.raf(16.0).is_none());
    assert!(s.scroll_to(10.0, true).is_none());
}

#[test]
fn shrinking_limit_pulls_offset_back() {
    let mut s = scroller(1_000.0);
    s.scroll_to(900.0, true);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    s.on_scroll(move |e| sink.borrow_mut().push(e.scroll));

    let event = s.set_limit(400.0).unwrap();
    assert_eq!(event.scroll, 400.0);
    assert_eq!(event.direction, ScrollDirection::Backward);
    assert_eq!(s.scroll(), 400.0);
    assert_eq!(s.target(), 400.0);
    assert_eq!(*seen.borrow(), vec![400.0]);

    // Growing the limit moves nothing.
    assert!(s.set_limit(2_000.0).is_none());
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn invalid_options_are_rejected() {
    let opts = SmoothScrollOptions {
        duration_s: 0.0,
        ..SmoothScrollOptions::default()
    };
    assert!(SmoothScroller::new(opts, 100.0).is_err());
}
