// Host-side tests for the stage state machine.

#![allow(dead_code)]
mod flow {
    include!("../src/core/flow.rs");
}

use flow::*;

#[test]
fn yes_growth_is_capped_and_counts_attempts() {
    let mut f = FlowEngine::new(3);
    for _ in 0..30 {
        f.note_evaded();
    }
    assert_eq!(f.yes_scale, YES_SCALE_MAX);
    assert_eq!(f.evade_count, 30);
}

#[test]
fn growth_resets_on_stage_change() {
    let mut f = FlowEngine::new(0);
    f.note_evaded();
    f.note_evaded();
    assert!(f.yes_scale > 1.0);
    f.accept();
    assert_eq!(f.yes_scale, 1.0);
    assert_eq!(f.evade_count, 0);
}

#[test]
fn accept_with_photo_enters_reveal_then_advances() {
    let mut f = FlowEngine::new(3);
    assert_eq!(f.phase, Phase::Question);
    assert_eq!(f.accept(), Phase::Reveal);
    assert_eq!(f.stage, 0, "reveal shows the photo of the accepted stage");
    assert_eq!(f.advance(), Phase::Question);
    assert_eq!(f.stage, 1);
}

#[test]
fn accept_without_photo_skips_reveal() {
    let mut f = FlowEngine::new(0);
    assert_eq!(f.accept(), Phase::Question);
    assert_eq!(f.stage, 1);
}

#[test]
fn full_run_ends_in_celebration() {
    let mut f = FlowEngine::new(3);
    for _ in 0..QUESTION_STAGES {
        assert_eq!(f.accept(), Phase::Reveal);
        f.advance();
    }
    assert_eq!(f.phase, Phase::Meter);
    assert_eq!(f.meter_done(), Phase::Celebration);
}

#[test]
fn partial_photo_set_covers_early_stages_only() {
    // one photo: reveal after the first question, none after the second
    let mut f = FlowEngine::new(1);
    assert_eq!(f.accept(), Phase::Reveal);
    assert_eq!(f.advance(), Phase::Question);
    assert_eq!(f.accept(), Phase::Question);
    assert_eq!(f.stage, 2);
}

#[test]
fn operations_outside_their_phase_are_noops() {
    let mut f = FlowEngine::new(3);
    assert_eq!(f.advance(), Phase::Question);
    assert_eq!(f.meter_done(), Phase::Question);
    f.accept(); // -> Reveal
    assert_eq!(f.accept(), Phase::Reveal);
    assert_eq!(f.stage, 0);
}
