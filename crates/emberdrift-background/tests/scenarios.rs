use approx::assert_relative_eq;
use emberdrift_background::{
    AnimationLoop, BackgroundState, FixedStep, FrameOutcome, MAX_DELTA_SECONDS, RECYCLE_THRESHOLD,
    Trail, TrailKind, trail_count,
};
use emberdrift_canvas::{PixelCanvas, RecordingSurface};
use emberdrift_core::{BackgroundStyle, Viewport};

fn trails_state(width: f64, height: f64, seed: u64) -> BackgroundState {
    let mut state = BackgroundState::new(BackgroundStyle::Trails, seed);
    state.configure(Viewport::new(width, height, 1.0));
    state
}

#[test]
fn test_every_trail_moves_by_speed_times_parallax() {
    let mut state = trails_state(1280.0, 720.0, 17);
    let mut surface = RecordingSurface::new();
    assert_eq!(state.on_frame(1000.0, &mut surface), FrameOutcome::Painted);

    let before: Vec<Trail> = state.trails().to_vec();
    assert_eq!(state.on_frame(1030.0, &mut surface), FrameOutcome::Painted);

    for (old, new) in before.iter().zip(state.trails()) {
        if new.x > old.x {
            // Recycled to the right edge.
            continue;
        }
        let expected = old.x - old.speed * old.parallax() * 0.03;
        assert_relative_eq!(new.x, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_recycled_trail_reenters_right_of_viewport() {
    let mut state = trails_state(700.0, 400.0, 3);
    let mut surface = RecordingSurface::new();
    for trail in state.trails_mut() {
        trail.x = RECYCLE_THRESHOLD - trail.length - 5.0;
    }
    state.on_frame(1000.0, &mut surface);

    for trail in state.trails() {
        assert!(trail.x >= 700.0, "trail at {} was not recycled", trail.x);
        match trail.kind {
            TrailKind::Line => assert!((80.0..180.0).contains(&trail.length)),
            TrailKind::Candle => assert!((30.0..110.0).contains(&trail.body_height)),
            TrailKind::Spark => assert!((1.4..3.2).contains(&trail.spark_radius)),
        }
    }
}

#[test]
fn test_particle_count_is_fixed_between_configurations() {
    for (w, h) in [(700.0, 400.0), (1920.0, 1080.0), (320.0, 640.0), (3000.0, 200.0)] {
        let expected = 18usize.max((w / 70.0) as usize + (h / 90.0) as usize);
        assert_eq!(trail_count(w, h), expected);

        let mut animation = AnimationLoop::attach(
            Some(RecordingSurface::new()),
            Viewport::new(w, h, 1.0),
            BackgroundState::new(BackgroundStyle::Trails, 11),
        )
        .unwrap();
        assert_eq!(animation.state().particle_count(), expected);

        animation.run(&mut FixedStep::new(0.0, 40.0, 500));
        assert_eq!(animation.state().particle_count(), expected);
    }
}

#[test]
fn test_long_suspension_is_clamped() {
    let mut state = trails_state(1280.0, 720.0, 23);
    let mut surface = RecordingSurface::new();
    state.on_frame(1000.0, &mut surface);
    let before: Vec<Trail> = state.trails().to_vec();

    state.on_frame(3_600_000.0, &mut surface);
    for (old, new) in before.iter().zip(state.trails()) {
        if new.x > old.x {
            continue;
        }
        let max_step = old.speed * old.parallax() * MAX_DELTA_SECONDS;
        assert!(old.x - new.x <= max_step + 1e-9);
    }
}

#[test]
fn test_resume_after_hidden_moves_only_a_frame() {
    let mut state = trails_state(1280.0, 720.0, 29);
    let mut surface = RecordingSurface::new();
    state.on_frame(1000.0, &mut surface);
    state.set_visible(false, 1010.0);
    assert_eq!(state.on_frame(2000.0, &mut surface), FrameOutcome::Skipped);

    state.set_visible(true, 60_000.0);
    let before: Vec<Trail> = state.trails().to_vec();
    state.on_frame(60_020.0, &mut surface);
    for (old, new) in before.iter().zip(state.trails()) {
        if new.x > old.x {
            continue;
        }
        assert_relative_eq!(
            old.x - new.x,
            old.speed * old.parallax() * 0.02,
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_throttled_tick_neither_mutates_nor_draws() {
    let mut state = trails_state(700.0, 400.0, 31);
    let mut surface = RecordingSurface::new();
    state.on_frame(1000.0, &mut surface);
    let before: Vec<Trail> = state.trails().to_vec();

    surface.reset();
    assert_eq!(state.on_frame(1022.0, &mut surface), FrameOutcome::Skipped);
    assert!(surface.ops().is_empty());
    assert_eq!(state.trails(), before.as_slice());

    assert_eq!(state.on_frame(1022.3, &mut surface), FrameOutcome::Painted);
    assert!(!surface.ops().is_empty());
}

#[test]
fn test_small_viewport_candlestick_scenario() {
    let viewport = Viewport::new(700.0, 400.0, 1.0);
    let state = trails_state(viewport.width, viewport.height, 2024);
    assert_eq!(state.particle_count(), 18);

    let mut rng = fastrand::Rng::with_seed(2024);
    let candle = Trail::spawn_with(&mut rng, viewport, TrailKind::Candle, 0.0);
    assert!((30.0..110.0).contains(&candle.body_height));
    assert_eq!(candle.parallax(), 0.7);
    let (upper, lower) = candle.wick_lengths();
    assert_relative_eq!(upper, candle.body_height * 0.75 * 0.55, epsilon = 1e-12);
    assert_relative_eq!(lower, candle.body_height * 0.75 * 0.45, epsilon = 1e-12);
}

#[test]
fn test_trails_render_to_pixels() {
    let viewport = Viewport::new(320.0, 160.0, 0.25);
    let mut animation = AnimationLoop::attach(
        PixelCanvas::for_viewport(viewport),
        viewport,
        BackgroundState::new(BackgroundStyle::Trails, 7),
    )
    .unwrap();
    let summary = animation.run(&mut FixedStep::new(1000.0, 25.0, 40));
    assert_eq!(summary.painted, 40);

    let canvas = animation.surface();
    assert_eq!((canvas.width(), canvas.height()), (80, 40));
    // The dark wash covers every pixel.
    assert!(canvas.data().chunks_exact(4).all(|px| px[3] >= 168));
}

#[test]
fn test_candles_render_to_pixels() {
    let viewport = Viewport::new(400.0, 300.0, 0.5);
    let mut animation = AnimationLoop::attach(
        PixelCanvas::for_viewport(viewport),
        viewport,
        BackgroundState::new(BackgroundStyle::Candles, 8),
    )
    .unwrap();
    animation.run(&mut FixedStep::new(1000.0, 25.0, 10));

    let lit = animation
        .surface()
        .data()
        .chunks_exact(4)
        .filter(|px| px[3] > 0)
        .count();
    assert!(lit > 0);
    assert_eq!(animation.state().particle_count(), 14);
}
