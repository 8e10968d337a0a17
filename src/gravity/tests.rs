//! Gravity domain: integrator, source resolution and configuration tests.

use bevy::prelude::*;

use super::{
    AnomalyKind, FALLBACK_GRAVITY, GlobalGravity, GravityConfiguration, GravityDirection,
    GravityIntegrator, GravitySettings, GravitySource, GravityTuning, GravityZone,
    PristineGravityConfig, TransitionCurve, ZoneStack, apply_gravity, effective_gravity,
    flip_velocity, resolve_base_gravity,
};

const DT: f32 = 1.0 / 60.0;

fn entities(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

fn snapping_config() -> GravityConfiguration {
    GravityConfiguration {
        smooth_gravity_transition: false,
        ..default()
    }
}

#[test]
fn test_direction_sign_and_flip() {
    let mut direction = GravityDirection::default();
    assert_eq!(direction, GravityDirection::Down);
    assert_eq!(direction.sign(), 1.0);
    assert_eq!(direction.up_vector(), Vec2::Y);

    direction.flip();
    assert_eq!(direction, GravityDirection::Up);
    assert_eq!(direction.sign(), -1.0);
    assert_eq!(direction.down_vector(), Vec2::Y);
    assert_eq!(direction.flipped(), GravityDirection::Down);
}

#[test]
fn test_momentum_retention_follows_inertia_settings() {
    let config = GravityConfiguration::default();
    assert!((config.momentum_retention() - 0.7).abs() < 1e-6);

    let no_inertia = GravityConfiguration {
        maintain_inertia: false,
        ..default()
    };
    assert_eq!(no_inertia.momentum_retention(), 0.0);

    let keep_all = GravityConfiguration {
        inertia_decay: 0.0,
        ..default()
    };
    assert_eq!(keep_all.momentum_retention(), 1.0);
}

#[test]
fn test_flip_inverts_vertical_speed_with_retention() {
    let flipped = flip_velocity(Vec2::new(280.0, -400.0), 0.7);
    assert_eq!(flipped.x, 280.0);
    assert!((flipped.y - 280.0).abs() < 1e-3);

    let stopped = flip_velocity(Vec2::new(280.0, -400.0), 0.0);
    assert_eq!(stopped.y, 0.0);
}

#[test]
fn test_settings_restore_from_pristine() {
    let original = GravityConfiguration::default();
    let pristine = PristineGravityConfig::capture(&original);
    let mut settings = GravitySettings::new(original.clone());

    settings.set_gravity_scale(3.5);
    settings.set_inertia(false, 0.9);
    settings.set_smoothing(false, 1.0);
    settings.set_max_velocity_change(10.0);
    assert_ne!(settings.config(), &original);

    settings.restore_from(&pristine);
    assert_eq!(settings.config(), &original);
    assert_eq!(pristine.snapshot(), &original);
}

#[test]
fn test_settings_reject_non_finite_values() {
    let mut settings = GravitySettings::new(GravityConfiguration::default());
    settings.set_gravity_scale(f32::NAN);
    settings.set_max_velocity_change(f32::INFINITY);
    settings.set_inertia(true, f32::NAN);

    let config = settings.config();
    assert_eq!(config.gravity_scale, 1.0);
    assert_eq!(config.max_velocity_change, 120.0);
    assert_eq!(config.inertia_decay, 0.3);
}

#[test]
fn test_resolution_order_zone_then_global_then_fallback() {
    let zone = entities(1)[0];
    let zone_gravity = Vec2::new(600.0, 0.0);
    let global = Vec2::new(0.0, -900.0);

    assert_eq!(
        resolve_base_gravity(Some((zone, zone_gravity)), Some(global)),
        (zone_gravity, GravitySource::Zone(zone))
    );
    assert_eq!(
        resolve_base_gravity(None, Some(global)),
        (global, GravitySource::Global)
    );
    assert_eq!(
        resolve_base_gravity(None, None),
        (FALLBACK_GRAVITY, GravitySource::Fallback)
    );
}

#[test]
fn test_effective_gravity_applies_scale_and_direction() {
    let config = GravityConfiguration {
        gravity_scale: 2.0,
        ..default()
    };
    let base = Vec2::new(0.0, -100.0);
    assert_eq!(
        effective_gravity(base, GravityDirection::Down, &config),
        Vec2::new(0.0, -200.0)
    );
    assert_eq!(
        effective_gravity(base, GravityDirection::Up, &config),
        Vec2::new(0.0, 200.0)
    );
}

#[test]
fn test_zone_stack_prefers_most_recent_active_zone() {
    let ids = entities(2);
    let (a, b) = (ids[0], ids[1]);
    let mut stack = ZoneStack::default();

    stack.sync(&[a]);
    stack.sync(&[a, b]);
    assert_eq!(stack.winner(|_| true), Some(b));
    assert_eq!(stack.winner(|zone| zone != b), Some(a));

    // Leaving the newer zone falls back to the one still containing the body
    stack.sync(&[a]);
    assert_eq!(stack.winner(|_| true), Some(a));

    stack.reset();
    assert_eq!(stack.winner(|_| true), None);
}

#[test]
fn test_zone_contains_point() {
    let zone = GravityZone::new(Vec2::new(100.0, 50.0), Vec2::new(0.0, 900.0));
    let center = Vec2::new(10.0, 10.0);
    assert!(zone.contains_point(center, Vec2::new(55.0, 30.0)));
    assert!(!zone.contains_point(center, Vec2::new(70.0, 10.0)));
    assert!(!zone.contains_point(center, Vec2::new(10.0, 40.0)));
}

#[test]
fn test_global_gravity_keeps_unit_direction() {
    let mut global = GlobalGravity::new(Vec2::new(0.0, -5.0), 1200.0);
    assert_eq!(global.current_direction(), Vec2::NEG_Y);
    assert_eq!(global.vector(), Vec2::new(0.0, -1200.0));

    global.set_direction(Vec2::ZERO);
    assert_eq!(global.current_direction(), Vec2::NEG_Y);

    global.set_direction(Vec2::new(3.0, 0.0));
    assert_eq!(global.current_direction(), Vec2::X);
}

#[test]
fn test_snaps_when_smoothing_disabled() {
    let tuning = GravityTuning::default();
    let config = snapping_config();
    let mut integrator = GravityIntegrator::new(Vec2::new(0.0, -1800.0));

    let tick = integrator.tick(Vec2::new(0.0, 1800.0), GravitySource::Global, DT, &config, &tuning);
    assert_eq!(tick.gravity, Vec2::new(0.0, 1800.0));
    assert!(!integrator.is_transitioning());
    assert!(tick.anomaly.is_none());
}

#[test]
fn test_smoothing_approaches_target_without_snapping() {
    let tuning = GravityTuning::default();
    let config = GravityConfiguration::default();
    let target = Vec2::new(0.0, 1800.0);
    let mut integrator = GravityIntegrator::new(Vec2::new(0.0, -1800.0));

    let first = integrator.tick(target, GravitySource::Global, DT, &config, &tuning);
    assert!(integrator.is_transitioning());
    assert!(first.gravity.y > -1800.0 && first.gravity.y < 1800.0);

    for _ in 0..600 {
        integrator.tick(target, GravitySource::Global, DT, &config, &tuning);
    }
    assert_eq!(integrator.current_gravity(), target);
    assert!(!integrator.is_transitioning());
}

#[test]
fn test_linear_transition_reaches_target_in_bounded_ticks() {
    let tuning = GravityTuning {
        transition_curve: TransitionCurve::Linear,
        ..default()
    };
    let config = GravityConfiguration {
        transition_speed: 6.0,
        ..default()
    };
    let target = Vec2::new(0.0, 1800.0);
    let mut integrator = GravityIntegrator::new(Vec2::new(0.0, -1800.0));

    // Six spans per second covers the full jump in ten ticks
    for _ in 0..11 {
        integrator.tick(target, GravitySource::Global, DT, &config, &tuning);
    }
    assert_eq!(integrator.current_gravity(), target);
}

#[test]
fn test_small_changes_below_threshold_snap() {
    let tuning = GravityTuning {
        change_threshold: 50.0,
        ..default()
    };
    let config = GravityConfiguration::default();
    let mut integrator = GravityIntegrator::new(Vec2::new(0.0, -1800.0));

    let tick = integrator.tick(Vec2::new(0.0, -1790.0), GravitySource::Global, DT, &config, &tuning);
    assert_eq!(tick.gravity, Vec2::new(0.0, -1790.0));
    assert!(!integrator.is_transitioning());
}

#[test]
fn test_non_finite_gravity_uses_last_good_and_reports_once() {
    let tuning = GravityTuning::default();
    let config = snapping_config();
    let good = Vec2::new(0.0, -1800.0);
    let mut integrator = GravityIntegrator::new(good);
    integrator.tick(good, GravitySource::Global, DT, &config, &tuning);

    let corrupt = Vec2::new(f32::NAN, -1800.0);
    let first = integrator.tick(corrupt, GravitySource::Global, DT, &config, &tuning);
    assert_eq!(first.gravity, good);
    let anomaly = first.anomaly.expect("first corruption is reported");
    assert_eq!(anomaly.kind, AnomalyKind::NonFiniteGravity);
    assert_eq!(anomaly.substituted, good);

    let second = integrator.tick(corrupt, GravitySource::Global, DT, &config, &tuning);
    assert_eq!(second.gravity, good);
    assert!(second.anomaly.is_none());

    // A clean tick re-arms reporting
    integrator.tick(good, GravitySource::Global, DT, &config, &tuning);
    let again = integrator.tick(corrupt, GravitySource::Global, DT, &config, &tuning);
    assert!(again.anomaly.is_some());
}

#[test]
fn test_change_of_anomaly_kind_is_reported_without_clean_tick() {
    let tuning = GravityTuning::default();
    let config = snapping_config();
    let good = Vec2::new(0.0, -1800.0);
    let mut integrator = GravityIntegrator::new(good);

    let nan = integrator.tick(Vec2::new(f32::NAN, 0.0), GravitySource::Global, DT, &config, &tuning);
    assert_eq!(nan.anomaly.map(|a| a.kind), Some(AnomalyKind::NonFiniteGravity));

    let huge = integrator.tick(Vec2::new(0.0, -1.0e9), GravitySource::Global, DT, &config, &tuning);
    assert_eq!(
        huge.anomaly.map(|a| a.kind),
        Some(AnomalyKind::GravityOverCeiling)
    );

    let still_huge =
        integrator.tick(Vec2::new(0.0, -1.0e9), GravitySource::Global, DT, &config, &tuning);
    assert!(still_huge.anomaly.is_none());
}

#[test]
fn test_gravity_above_ceiling_is_clamped() {
    let tuning = GravityTuning {
        anomaly_ceiling: 5000.0,
        ..default()
    };
    let config = snapping_config();
    let mut integrator = GravityIntegrator::new(Vec2::new(0.0, -1800.0));

    let tick = integrator.tick(Vec2::new(0.0, -1.0e9), GravitySource::Global, DT, &config, &tuning);
    assert!((tick.gravity.length() - 5000.0).abs() < 1e-2);
    assert_eq!(
        tick.anomaly.map(|a| a.kind),
        Some(AnomalyKind::GravityOverCeiling)
    );
}

#[test]
fn test_velocity_sanitation() {
    let mut integrator = GravityIntegrator::default();

    let (clean, anomaly) = integrator.sanitize_velocity(Vec2::new(100.0, -50.0), 4000.0);
    assert_eq!(clean, Vec2::new(100.0, -50.0));
    assert!(anomaly.is_none());

    let (restored, anomaly) = integrator.sanitize_velocity(Vec2::new(f32::INFINITY, 0.0), 4000.0);
    assert_eq!(restored, Vec2::new(100.0, -50.0));
    assert_eq!(anomaly.map(|a| a.kind), Some(AnomalyKind::NonFiniteVelocity));

    let (clamped, _) = integrator.sanitize_velocity(Vec2::new(0.0, -9000.0), 4000.0);
    assert!((clamped.length() - 4000.0).abs() < 1e-2);
}

#[test]
fn test_suspend_and_resume_snaps_to_new_gravity() {
    let mut integrator = GravityIntegrator::new(Vec2::new(0.0, -1800.0));
    integrator.suspend();
    assert!(integrator.is_suspended());

    integrator.resume_at(Vec2::new(0.0, 1800.0));
    assert!(!integrator.is_suspended());
    assert_eq!(integrator.current_gravity(), Vec2::new(0.0, 1800.0));
    assert!(!integrator.is_transitioning());
}

#[test]
fn test_apply_gravity_limits_change_and_fall_speed() {
    let config = GravityConfiguration {
        max_velocity_change: 20.0,
        ..default()
    };
    let next = apply_gravity(Vec2::ZERO, Vec2::new(0.0, -1800.0), DT, &config, 900.0);
    assert!((next.y + 20.0).abs() < 1e-4);

    let falling = apply_gravity(Vec2::new(50.0, -895.0), Vec2::new(0.0, -1800.0), DT, &config, 900.0);
    assert!((falling.y + 900.0).abs() < 1e-3);
    assert_eq!(falling.x, 50.0);

    // Inverted gravity caps speed upward as well
    let rising = apply_gravity(Vec2::new(0.0, 899.0), Vec2::new(0.0, 1800.0), DT, &config, 900.0);
    assert!((rising.y - 900.0).abs() < 1e-3);
}
