// Host-side tests for the flee transition spring.

#![allow(dead_code)]
mod spring {
    include!("../src/core/spring.rs");
}

use glam::Vec2;
use spring::*;

const DT: f32 = 1.0 / 60.0;

#[test]
fn spring_reaches_target_within_bounded_duration() {
    for cfg in [
        SpringConfig::escape(),
        SpringConfig::escape_touch(),
        SpringConfig::snap_back(),
    ] {
        let from = Vec2::new(100.0, 100.0);
        let to = Vec2::new(300.0, 250.0);
        let mut s = Spring2::new(from, to, cfg);
        let mut elapsed = 0.0;
        while !s.step(DT) {
            elapsed += DT;
            assert!(
                elapsed <= cfg.max_duration + DT,
                "spring still running after its deadline"
            );
        }
        assert_eq!(s.pos, to, "spring must land exactly on the target");
        assert_eq!(s.vel, Vec2::ZERO);
        assert!(s.is_done());
    }
}

#[test]
fn finished_spring_stays_finished() {
    let mut s = Spring2::new(Vec2::ZERO, Vec2::new(50.0, 0.0), SpringConfig::escape());
    while !s.step(DT) {}
    let pos = s.pos;
    assert!(s.step(DT));
    assert_eq!(s.pos, pos);
}

#[test]
fn zero_length_transition_settles_immediately() {
    let p = Vec2::new(42.0, 7.0);
    let mut s = Spring2::new(p, p, SpringConfig::escape());
    assert!(s.step(DT));
    assert_eq!(s.pos, p);
}

#[test]
fn oversized_frame_gap_does_not_explode() {
    // a background tab can hand us a multi-second dt; the step clamp keeps
    // the integration stable
    let mut s = Spring2::new(Vec2::ZERO, Vec2::new(200.0, 0.0), SpringConfig::escape());
    s.step(5.0);
    assert!(s.pos.x.is_finite() && s.pos.x.abs() < 1000.0);
    while !s.step(DT) {}
    assert_eq!(s.pos, Vec2::new(200.0, 0.0));
}

#[test]
fn snap_back_is_stiffer_and_shorter_than_escape() {
    let a = SpringConfig::snap_back();
    let b = SpringConfig::escape();
    assert!(a.stiffness > b.stiffness);
    assert!(a.max_duration < b.max_duration);
}

#[test]
fn touch_escape_is_softer_and_heavier_than_pointer_escape() {
    let touch = SpringConfig::escape_touch();
    let pointer = SpringConfig::escape();
    assert!(touch.stiffness < pointer.stiffness);
    assert_eq!(touch.mass, 0.25);
    assert!(touch.max_duration > pointer.max_duration);
}
