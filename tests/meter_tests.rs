// Host-side tests for the love meter and ball drop.

#![allow(dead_code)]
mod meter {
    include!("../src/core/meter.rs");
}

use meter::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn tiers_follow_the_thresholds() {
    assert_eq!(tier_for(0), MeterTier::Start);
    assert_eq!(tier_for(999), MeterTier::Start);
    assert_eq!(tier_for(1_000), MeterTier::Warm);
    assert_eq!(tier_for(1_999), MeterTier::Warm);
    assert_eq!(tier_for(2_000), MeterTier::Strong);
    assert_eq!(tier_for(4_999), MeterTier::Strong);
    assert_eq!(tier_for(5_000), MeterTier::Intense);
    assert_eq!(tier_for(9_999), MeterTier::Intense);
    assert_eq!(tier_for(10_000), MeterTier::Max);
}

#[test]
fn set_value_clamps_to_max() {
    let mut m = MeterState::default();
    assert_eq!(m.set_value(50_000), MeterTier::Max);
    assert_eq!(m.value, METER_MAX);
}

#[test]
fn release_fires_only_at_max_and_only_once() {
    let mut m = MeterState::default();
    m.set_value(9_000);
    assert!(!m.release(), "release below max must not fire");
    m.set_value(METER_MAX);
    assert!(m.release());
    assert!(!m.release(), "second release must not fire again");
    m.reset();
    assert_eq!(m.value, 0);
    m.set_value(METER_MAX);
    assert!(m.release(), "reset re-arms the meter");
}

#[test]
fn ball_drop_runs_for_the_full_fall_and_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut ball = BallDrop::new(&mut rng);
    let dt = 1.0 / 60.0;
    let mut elapsed = 0.0;
    while !ball.step(dt) {
        elapsed += dt;
        let s = ball.sample();
        assert!(s.x_offset.abs() <= BALL_DRIFT_MAX, "drift out of range");
        assert!((0.0..=1.0).contains(&s.fall_frac));
        assert!(s.rotation_deg >= 0.0);
        assert!(elapsed < BALL_FALL_SEC + 1.0, "ball never landed");
    }
    let s = ball.sample();
    assert_eq!(s.fall_frac, 1.0);
    assert!(s.rotation_deg >= BALL_SPIN_BASE_DEG);
    assert!(s.rotation_deg <= BALL_SPIN_BASE_DEG + BALL_SPIN_EXTRA_DEG);
}

#[test]
fn fall_is_gravity_shaped() {
    // quadratic easing: the second half covers more ground than the first
    let mut rng = StdRng::seed_from_u64(7);
    let mut ball = BallDrop::new(&mut rng);
    ball.step(BALL_FALL_SEC * 0.5);
    let half = ball.sample().fall_frac;
    assert!((half - 0.25).abs() < 1e-4, "half-time fall should be 25%");
}

#[test]
fn ball_drop_is_deterministic_per_seed() {
    let mut a = BallDrop::new(&mut StdRng::seed_from_u64(5));
    let mut b = BallDrop::new(&mut StdRng::seed_from_u64(5));
    a.step(1.0);
    b.step(1.0);
    assert_eq!(a.sample(), b.sample());
}
