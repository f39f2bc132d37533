//! Integration tests for the scheduler, pool and tween state machine
//!
//! These tests verify that:
//! - Elapsed time stays clamped and delays gate interpolation
//! - Completion is reported exactly when a tween reaches its duration
//! - Relative and absolute tweens trace the same path
//! - Rotations take the short way round
//! - Retired tweens are reused instead of reallocated
//! - Looping and stop-with-completion behave as documented

use flit_core::{Color, Scene, TweenHost, Vec3};
use flit_tween::{
    Easing, LoopKind, SchedulerConfig, TickResult, Tween, TweenOptions, TweenScheduler,
    VectorProperty,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const EPS: f32 = 1e-4;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPS
}

/// Elapsed time never leaves `[-delay, duration]` whatever the deltas
#[test]
fn test_elapsed_clamped_under_irregular_frames() {
    init_tracing();
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);
    let mut tweens = TweenScheduler::new();

    let id = tweens
        .position_to(
            &mut scene,
            node,
            Vec3::new(0.0, 0.0, 10.0),
            2.0,
            TweenOptions::new().delay(0.75),
        )
        .set_loop(LoopKind::PingPong, 50)
        .id();

    let frames = [0.016, -1.0, 0.5, 3.0, 0.0, 0.033, 7.5, -0.2, 0.4, 1.1];
    for dt in frames.iter().cycle().take(60) {
        tweens.update(&mut scene, *dt);
        if let Some(tween) = tweens.get(id) {
            assert!(tween.elapsed() >= -tween.delay());
            assert!(tween.elapsed() <= tween.duration());
        }
    }
}

/// A delayed tween leaves the target untouched until the delay has passed
#[test]
fn test_delay_produces_no_visible_change() {
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::new(1.0, 1.0, 1.0));
    let surface = scene.attach_surface(node, Color::WHITE).unwrap();
    let mut tweens = TweenScheduler::new();

    let options = TweenOptions::new().delay(1.0);
    tweens.position_to(&mut scene, node, Vec3::ZERO, 1.0, options);
    tweens.scale_to(&mut scene, node, Vec3::splat(3.0), 1.0, options);
    tweens.color_to(&mut scene, node, Color::BLACK, 1.0, options);

    for _ in 0..8 {
        tweens.update(&mut scene, 0.125);
        assert_eq!(scene.position(node), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(scene.local_scale(node), Vec3::ONE);
        assert_eq!(scene.surface_color(surface), Color::WHITE);
    }

    tweens.update(&mut scene, 0.25);
    assert!(close(scene.position(node), Vec3::splat(0.75)));
    assert!(close(scene.local_scale(node), Vec3::splat(1.5)));
}

/// `tick` reports completion in the same call that elapsed hits duration
#[test]
fn test_tick_completion_is_exact() {
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);

    let mut tween: Tween<Scene> = Tween::new();
    tween.animate_vector(node, VectorProperty::LocalPosition, Vec3::ONE, 1.0);
    tween.set_delay(0.5);
    tween.prepare(&scene, Easing::EaseOutCubic);

    let expected = [false, false, false, false, false, true, true];
    for done in expected {
        let result = tween.tick(&mut scene, 0.25);
        assert_eq!(result.is_complete(), done);
        assert_eq!(result.is_complete(), tween.elapsed() == tween.duration());
    }
}

/// Absolute `v0 -> v1` and relative `v0 + (v1 - v0)` share a trajectory
#[test]
fn test_relative_and_absolute_equivalence() {
    let mut scene = Scene::new();
    let start = Vec3::new(-3.0, 2.0, 0.5);
    let end = Vec3::new(4.0, -1.0, 9.0);
    let a = scene.spawn(start);
    let b = scene.spawn(start);
    let mut tweens = TweenScheduler::new();

    let easing = TweenOptions::new().easing(Easing::EaseOutBack);
    tweens.position_to(&mut scene, a, end, 1.5, easing);
    tweens.position_to(&mut scene, b, end - start, 1.5, easing.relative());

    for _ in 0..20 {
        tweens.update(&mut scene, 0.1);
        assert!(close(scene.position(a), scene.position(b)));
    }
    assert!(close(scene.position(a), end));
    assert!(!tweens.has_active_tweens());
}

/// 350 degrees to 10 degrees passes through 360, never back through 340
#[test]
fn test_rotation_shortest_path_through_zero() {
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);
    scene.set_euler_angles(node, Vec3::new(0.0, 0.0, 350.0));
    let mut tweens = TweenScheduler::new();

    tweens.rotation_to(
        &mut scene,
        node,
        Vec3::new(0.0, 0.0, 10.0),
        1.0,
        TweenOptions::new(),
    );

    let mut previous = scene.euler_angles(node).z;
    for _ in 0..10 {
        tweens.update(&mut scene, 0.1);
        let z = scene.euler_angles(node).z;
        assert!(z >= previous, "rotation went backwards: {} -> {}", previous, z);
        assert!(z <= 370.0 + EPS);
        previous = z;
    }
    assert!((previous - 370.0).abs() < EPS);
}

/// Requests after retirements reuse pooled records
#[test]
fn test_pool_reuse_after_release() {
    let mut scene = Scene::new();
    let mut tweens = TweenScheduler::new();
    let nodes: Vec<_> = (0..6).map(|i| scene.spawn(Vec3::splat(i as f32))).collect();

    for node in &nodes {
        tweens.scale_to(&mut scene, *node, Vec3::splat(2.0), 0.5, TweenOptions::new());
    }
    assert_eq!(tweens.pool().allocated(), 6);

    tweens.update(&mut scene, 0.5);
    assert_eq!(tweens.pool().len(), 6);

    for node in nodes.iter().take(4) {
        tweens.position_to(&mut scene, *node, Vec3::ZERO, 1.0, TweenOptions::new());
    }
    assert_eq!(tweens.pool().allocated(), 6);
    assert_eq!(tweens.pool().len(), 2);
}

/// A prewarmed scheduler serves its first requests from the pool
#[test]
fn test_prewarmed_pool_from_config() {
    let config = SchedulerConfig::from_toml_str("pool_capacity = 8").unwrap();
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);
    let mut tweens = TweenScheduler::with_config(config);

    for _ in 0..8 {
        tweens.local_position_to(&mut scene, node, Vec3::ONE, 1.0, TweenOptions::new());
    }
    assert_eq!(tweens.pool().allocated(), 8);
    assert!(tweens.pool().is_empty());
}

/// Ping-pong (0,0,0) -> (10,0,0), 1s, two legs
#[test]
fn test_ping_pong_two_legs() {
    init_tracing();
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);
    let mut tweens = TweenScheduler::new();
    let completions = Rc::new(Cell::new(0));
    let counter = completions.clone();

    let id = tweens
        .position_to(
            &mut scene,
            node,
            Vec3::new(10.0, 0.0, 0.0),
            1.0,
            TweenOptions::new(),
        )
        .set_loop(LoopKind::PingPong, 2)
        .on_complete(move |_| counter.set(counter.get() + 1))
        .id();

    tweens.update(&mut scene, 1.0);
    assert!(close(scene.position(node), Vec3::new(10.0, 0.0, 0.0)));
    assert!(tweens.is_active(id));
    assert_eq!(tweens.get(id).unwrap().loop_kind(), LoopKind::PingPong);
    assert_eq!(completions.get(), 0);

    tweens.update(&mut scene, 1.0);
    assert!(close(scene.position(node), Vec3::ZERO));
    assert!(!tweens.is_active(id));
    assert_eq!(completions.get(), 1);
    assert_eq!(tweens.pool().len(), 1);

    tweens.update(&mut scene, 1.0);
    assert!(close(scene.position(node), Vec3::ZERO));
}

/// Restart loops snap back each leg and end on the destination
#[test]
fn test_restart_loop_legs() {
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);
    let surface = scene.attach_surface(node, Color::BLACK).unwrap();
    let mut tweens = TweenScheduler::new();

    tweens
        .color_to(&mut scene, node, Color::WHITE, 1.0, TweenOptions::new())
        .set_loop(LoopKind::RestartFromBeginning, 3);

    tweens.update(&mut scene, 1.0);
    assert_eq!(scene.surface_color(surface), Color::BLACK);
    tweens.update(&mut scene, 1.0);
    assert_eq!(scene.surface_color(surface), Color::BLACK);
    assert!(tweens.has_active_tweens());
    tweens.update(&mut scene, 1.0);
    assert_eq!(scene.surface_color(surface), Color::WHITE);
    assert!(!tweens.has_active_tweens());
}

/// Stopping with completion writes the exact destination before removal
#[test]
fn test_stop_with_completion_sets_final_value() {
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);
    let mut tweens = TweenScheduler::new();
    let done = Rc::new(Cell::new(false));
    let flag = done.clone();

    let id = tweens
        .position_to(
            &mut scene,
            node,
            Vec3::new(0.0, 0.0, 10.0),
            2.0,
            TweenOptions::new().easing(Easing::EaseInOutQuad),
        )
        .on_complete(move |_| flag.set(true))
        .id();

    tweens.update(&mut scene, 0.7);
    assert!(scene.position(node).z < 10.0);

    assert!(tweens.stop(&mut scene, id, true));
    assert_eq!(scene.position(node), Vec3::new(0.0, 0.0, 10.0));
    assert!(done.get());
    assert!(!tweens.is_active(id));
    assert!(!tweens.stop(&mut scene, id, true));
}

/// Stopping a delayed tween with completion still jumps to the end
#[test]
fn test_stop_during_delay() {
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);
    let mut tweens = TweenScheduler::new();

    let id = tweens
        .scale_to(
            &mut scene,
            node,
            Vec3::splat(4.0),
            1.0,
            TweenOptions::new().delay(10.0),
        )
        .id();
    tweens.update(&mut scene, 1.0);

    assert!(tweens.stop(&mut scene, id, true));
    assert_eq!(scene.local_scale(node), Vec3::splat(4.0));
}

/// Despawning a target mid-flight recycles the tween silently
#[test]
fn test_despawned_target_mid_flight() {
    let mut scene = Scene::new();
    let parent = scene.spawn(Vec3::ZERO);
    let child = scene.spawn_child(parent, Vec3::ZERO);
    let mut tweens = TweenScheduler::new();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();

    tweens
        .local_rotation_to(
            &mut scene,
            child,
            Vec3::new(0.0, 90.0, 0.0),
            1.0,
            TweenOptions::new(),
        )
        .on_complete(move |_| flag.set(true));
    tweens.position_to(&mut scene, parent, Vec3::ONE, 1.0, TweenOptions::new());

    tweens.update(&mut scene, 0.5);
    scene.despawn(parent);
    tweens.update(&mut scene, 0.5);

    assert!(!tweens.has_active_tweens());
    assert!(!fired.get());
    assert_eq!(tweens.pool().len(), 2);
}

/// Custom actions see overshooting progress from back easing
#[test]
fn test_custom_action_sees_overshoot() {
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);
    let mut tweens = TweenScheduler::new();
    let samples = Rc::new(RefCell::new(Vec::new()));
    let sink = samples.clone();

    tweens.custom_action(
        &mut scene,
        node,
        1.0,
        TweenOptions::new().easing(Easing::EaseOutBack),
        move |p| sink.borrow_mut().push(p),
    );
    for _ in 0..10 {
        tweens.update(&mut scene, 0.1);
    }

    let samples = samples.borrow();
    assert_eq!(samples.len(), 10);
    assert!(samples.iter().any(|p| *p > 1.0));
    assert!((samples[9] - 1.0).abs() < EPS);
}

/// A tween ticked directly reports abandonment once its surface is removed
#[test]
fn test_removed_surface_abandons_color_tween() {
    let mut scene = Scene::new();
    let node = scene.spawn(Vec3::ZERO);
    let surface = scene.attach_surface(node, Color::RED).unwrap();

    let mut tween: Tween<Scene> = Tween::new();
    tween.animate_color(node, Color::GREEN, 1.0);
    tween.prepare(&scene, Easing::Linear);

    assert_eq!(tween.tick(&mut scene, 0.25), TickResult::Running);
    scene.remove_surface(surface);
    assert_eq!(tween.tick(&mut scene, 0.25), TickResult::Abandoned);
}
