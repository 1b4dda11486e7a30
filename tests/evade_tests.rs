// Host-side tests for the evasive target controller.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod evade {
    include!("../src/core/evade.rs");
}

use evade::*;
use glam::Vec2;

fn make_controller(seed: u64) -> EvadeController {
    EvadeController::new(FleeParams::pointer(), seed)
}

#[test]
fn trigger_inside_window_moves_rect_into_padded_bounds() {
    // viewport 800x600, rect centered, pointer inside the rect
    let vp = Viewport::new(800.0, 600.0);
    let rect = Rect::new(380.0, 280.0, 40.0, 40.0);
    let pointer = Vec2::new(390.0, 290.0);
    for seed in 0..50 {
        let mut ctl = make_controller(seed);
        let rep = ctl
            .poll(Some(pointer), Some(rect), vp)
            .expect("pointer well inside flee window must trigger");
        let r = rep.rect;
        assert!(r.left >= 50.0 && r.top >= 50.0, "rect {:?} under padding", r);
        assert!(
            r.left + r.width <= 750.0 && r.top + r.height <= 550.0,
            "rect {:?} over padded bounds",
            r
        );
        assert_eq!(r.width, 40.0);
        assert_eq!(r.height, 40.0);
    }
}

#[test]
fn escape_distance_meets_threshold_away_from_edges() {
    // big viewport so clamping never kicks in; post-move distance must be
    // at least the flee distance
    let vp = Viewport::new(3000.0, 3000.0);
    for seed in 0..100 {
        let mut ctl = make_controller(seed);
        let rect = Rect::new(1480.0, 1480.0, 40.0, 40.0);
        let pointer = Vec2::new(1490.0 + (seed as f32) * 0.3, 1495.0);
        let Some(rep) = ctl.poll(Some(pointer), Some(rect), vp) else {
            panic!("seed {seed}: no flee");
        };
        let d = pointer.distance(rep.rect.center());
        assert!(
            d >= FLEE_DISTANCE_POINTER - 1e-3,
            "seed {seed}: post-move distance {d} below threshold"
        );
    }
}

#[test]
fn produced_rects_always_inside_viewport() {
    let vp = Viewport::new(800.0, 600.0);
    let mut ctl = make_controller(7);
    for i in 0..200 {
        let rect = Rect::new(60.0 + (i % 13) as f32 * 50.0, 60.0 + (i % 7) as f32 * 60.0, 40.0, 40.0);
        let pointer = rect.center() + Vec2::new(20.0, -15.0);
        if let Some(rep) = ctl.poll(Some(pointer), Some(rect), vp) {
            let r = rep.rect;
            assert!(r.left >= 0.0 && r.top >= 0.0, "iter {i}: {:?}", r);
            assert!(
                r.left + r.width <= vp.width && r.top + r.height <= vp.height,
                "iter {i}: {:?}",
                r
            );
            ctl.settle();
        }
    }
}

#[test]
fn corner_detection_is_symmetric_across_all_four_corners() {
    let vp = Viewport::new(800.0, 600.0);
    let size = 40.0;
    let corners = [
        Rect::new(10.0, 10.0, size, size),
        Rect::new(800.0 - 10.0 - size, 10.0, size, size),
        Rect::new(10.0, 600.0 - 10.0 - size, size, size),
        Rect::new(800.0 - 10.0 - size, 600.0 - 10.0 - size, size, size),
    ];
    for (i, rect) in corners.iter().enumerate() {
        assert!(
            is_in_corner(*rect, vp, CORNER_THRESHOLD),
            "corner {i} not detected"
        );
    }
    // same answer under a 90-degree viewport rotation
    let rotated = Viewport::new(600.0, 800.0);
    for (i, rect) in corners.iter().enumerate() {
        let swapped = Rect::new(rect.top, rect.left, size, size);
        assert!(
            is_in_corner(swapped, rotated, CORNER_THRESHOLD),
            "rotated corner {i} not detected"
        );
    }
}

#[test]
fn near_corner_rect_is_trapped_regardless_of_pointer() {
    let vp = Viewport::new(800.0, 600.0);
    let rect = Rect::new(10.0, 10.0, 40.0, 40.0);
    assert!(is_in_corner(rect, vp, 100.0));
    // trapped targets get the fully random escape
    let mut ctl = make_controller(3);
    let rep = ctl
        .poll(Some(Vec2::new(20.0, 20.0)), Some(rect), vp)
        .expect("trapped rect with nearby pointer must flee");
    assert_eq!(rep.kind, FleeKind::CornerEscape);
}

#[test]
fn center_rect_is_not_trapped() {
    let vp = Viewport::new(800.0, 600.0);
    let rect = Rect::new(380.0, 280.0, 40.0, 40.0);
    assert!(!is_in_corner(rect, vp, CORNER_THRESHOLD));
}

#[test]
fn repeated_trigger_while_fleeing_is_a_noop() {
    let vp = Viewport::new(800.0, 600.0);
    let rect = Rect::new(380.0, 280.0, 40.0, 40.0);
    let pointer = Vec2::new(390.0, 290.0);
    let mut ctl = make_controller(11);
    assert!(ctl.poll(Some(pointer), Some(rect), vp).is_some());
    assert!(ctl.is_fleeing());
    assert!(ctl.poll(Some(pointer), Some(rect), vp).is_none());
    assert!(ctl.check_viewport(Some(rect), vp).is_none());
    ctl.settle();
    assert!(ctl.poll(Some(pointer), Some(rect), vp).is_some());
}

#[test]
fn degenerate_and_missing_inputs_are_noops() {
    let vp = Viewport::new(800.0, 600.0);
    let rect = Rect::new(380.0, 280.0, 40.0, 40.0);
    let mut ctl = make_controller(5);
    // pointer exactly at the center: distance zero
    assert!(ctl.poll(Some(rect.center()), Some(rect), vp).is_none());
    // pointer outside the flee window
    assert!(ctl
        .poll(Some(Vec2::new(100.0, 100.0)), Some(rect), vp)
        .is_none());
    // unmounted target / no sample yet
    assert!(ctl.poll(None, Some(rect), vp).is_none());
    assert!(ctl.poll(Some(Vec2::new(390.0, 290.0)), None, vp).is_none());
    assert!(!ctl.is_fleeing());
}

#[test]
fn out_of_viewport_rect_snaps_back_into_central_band() {
    let vp = Viewport::new(800.0, 600.0);
    let rect = Rect::new(-50.0, 300.0, 40.0, 40.0);
    for seed in 0..50 {
        let mut ctl = make_controller(seed);
        let rep = ctl
            .check_viewport(Some(rect), vp)
            .expect("rect 50px off-screen must recover");
        assert_eq!(rep.kind, FleeKind::SnapBack);
        let r = rep.rect;
        assert!(
            r.left >= 160.0 && r.left + r.width <= 640.0,
            "seed {seed}: left {:.1} outside central band",
            r.left
        );
        assert!(
            r.top >= 120.0 && r.top + r.height <= 480.0,
            "seed {seed}: top {:.1} outside central band",
            r.top
        );
    }
}

#[test]
fn in_viewport_rect_does_not_snap_back() {
    let vp = Viewport::new(800.0, 600.0);
    let mut ctl = make_controller(2);
    // 5px overhang is within the tolerance
    let rect = Rect::new(-5.0, 300.0, 40.0, 40.0);
    assert!(ctl.check_viewport(Some(rect), vp).is_none());
    let rect = Rect::new(380.0, 280.0, 40.0, 40.0);
    assert!(ctl.check_viewport(Some(rect), vp).is_none());
}

#[test]
fn same_seed_gives_same_escape() {
    let vp = Viewport::new(800.0, 600.0);
    let rect = Rect::new(380.0, 280.0, 40.0, 40.0);
    let pointer = Vec2::new(390.0, 290.0);
    let a = make_controller(99).poll(Some(pointer), Some(rect), vp).unwrap();
    let b = make_controller(99).poll(Some(pointer), Some(rect), vp).unwrap();
    assert_eq!(a.rect, b.rect);
}

#[test]
fn touch_params_share_geometry_with_pointer_params() {
    let p = FleeParams::pointer();
    let t = FleeParams::touch();
    assert_eq!(t.flee_distance, FLEE_DISTANCE_TOUCH);
    assert_eq!(t.padding, p.padding);
    assert_eq!(t.corner_threshold, p.corner_threshold);
    assert_eq!(t.max_run, p.max_run);
}
