//! End-to-end tests: knot generation through to the color grid

use knot3d_core::{
    generate_or_update_mesh, render_frame, Animator, FrameParams, Framebuffer, KnotParams,
    Rasterizer, RotationState, TorusKnot, Vec3,
};

fn reference_knot() -> TorusKnot {
    TorusKnot::new(KnotParams::new(3, 2, 1.5, 0.3))
}

fn covered_cells(fb: &Framebuffer) -> usize {
    fb.colors()
        .iter()
        .filter(|&&c| c != Framebuffer::BACKGROUND)
        .count()
}

#[test]
fn knot_is_visible_in_small_buffer() {
    let knot = reference_knot();
    let frame = FrameParams {
        rotation: RotationState::zero(),
        position: Vec3::zeros(),
        camera: Vec3::zeros(),
        light_direction: Vec3::new(0.0, 0.0, -1.0),
        zoom: 1.0,
        color_shift: 0.0,
    };

    let fb = render_frame(knot.mesh(), &frame, 8, 8);

    assert!(covered_cells(&fb) > 0);
    for (color, depth) in fb.colors().iter().zip(fb.depths()) {
        if *color != Framebuffer::BACKGROUND {
            assert!(*depth < f64::INFINITY);
        } else {
            assert_eq!(*depth, f64::INFINITY);
        }
    }
}

#[test]
fn half_of_the_closed_knot_faces_away() {
    let knot = reference_knot();
    let mut rasterizer = Rasterizer::new(120, 60);
    let stats = rasterizer.render(knot.mesh(), &FrameParams::default());

    assert_eq!(stats.transformed, knot.mesh().len());
    assert_eq!(
        stats.back_facing + stats.drawn + stats.too_dark + stats.degenerate + stats.behind_eye,
        stats.transformed
    );
    assert!(stats.back_facing > 0);
    assert!(stats.drawn > 0);
    assert_eq!(stats.behind_eye, 0);
}

#[test]
fn reused_rasterizer_matches_fresh_render() {
    let knot = reference_knot();
    let mut animator = Animator::new();
    let first = animator.next_frame().params;
    let second = animator.next_frame().params;

    let mut rasterizer = Rasterizer::new(60, 30);
    rasterizer.render(knot.mesh(), &first);
    rasterizer.render(knot.mesh(), &second);

    assert_eq!(rasterizer.framebuffer(), &render_frame(knot.mesh(), &second, 60, 30));
}

#[test]
fn rendering_is_deterministic() {
    let knot = reference_knot();
    let frame = FrameParams {
        rotation: RotationState::new(0.4, 1.1, -0.2),
        light_direction: Vec3::new(1.0, -1.0, -2.0).normalize(),
        zoom: 1.3,
        color_shift: 0.6,
        ..FrameParams::default()
    };

    let a = render_frame(knot.mesh(), &frame, 40, 20);
    let b = render_frame(knot.mesh(), &frame, 40, 20);
    assert_eq!(a, b);
}

#[test]
fn animated_frames_cover_pixels() {
    let mut animator = Animator::new();
    let mut knot: Option<TorusKnot> = None;
    let mut rasterizer = Rasterizer::new(120, 60);

    for _ in 0..50 {
        let frame = animator.next_frame();
        if frame.regenerate_due || knot.is_none() {
            knot = Some(generate_or_update_mesh(knot.take(), frame.knot));
        }
        let mesh = knot.as_ref().map(|k| k.mesh()).expect("knot built on first frame");
        let stats = rasterizer.render(mesh, &frame.params);

        assert!(stats.pixels_written > 0);
        assert!(covered_cells(rasterizer.framebuffer()) > 0);
    }
}

#[test]
fn camera_offset_moves_image() {
    let knot = reference_knot();
    let centered = render_frame(knot.mesh(), &FrameParams::default(), 48, 24);
    let shifted = render_frame(
        knot.mesh(),
        &FrameParams {
            camera: Vec3::new(2.0, 0.0, 0.0),
            ..FrameParams::default()
        },
        48,
        24,
    );
    assert_ne!(centered, shifted);
}

#[test]
fn drifting_params_keep_the_same_mesh() {
    let knot = reference_knot();
    let before = knot.mesh().clone();
    let knot = generate_or_update_mesh(Some(knot), KnotParams::new(3, 2, 1.53, 0.31));
    assert_eq!(knot.mesh().len(), before.len());
    assert_eq!(knot.mesh(), &before);
}
