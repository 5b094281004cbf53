#![cfg(test)]

use glam::DVec3;

use crate::{body_presets, Body, Coordinates, SolverConfig, StateVectors, TrajectorySolver};


mod integration;
mod minimization;
mod physics;

use assertions::*;
use seeders::*;

const RANDOM_CASES: usize = 1000;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dvec3_to_bits(v: DVec3) -> (u64, u64, u64) {
    (v.x.to_bits(), v.y.to_bits(), v.z.to_bits())
}

fn coords_to_bits(c: Coordinates) -> (u64, u64) {
    (c.latitude.to_bits(), c.longitude.to_bits())
}

/// A configuration cheap enough to run whole targeting problems in a test.
///
/// A 50 ms step moves the landing point by up to ~150 m per step at the
/// speeds involved, so the location tolerance is loosened to a ~200 m
/// radius to keep it reachable.
fn coarse_config() -> SolverConfig {
    SolverConfig {
        step_size: 0.05,
        location_tolerance: 1e-9,
        energy_tolerance: 1000.0,
        ..SolverConfig::default()
    }
}

fn solver(config: &SolverConfig) -> TrajectorySolver<'_> {
    match TrajectorySolver::new(config) {
        Ok(solver) => solver,
        Err(e) => panic!("test configuration was rejected: {e}"),
    }
}

#[test]
fn state_vectors_arithmetic() {
    let a = StateVectors::new(DVec3::new(1.0, -2.0, 3.0), DVec3::new(0.5, 0.25, -4.0));
    let b = StateVectors::new(DVec3::new(-1.0, 2.0, 0.0), DVec3::new(1.5, 0.75, 4.0));

    let sum = a + b;
    assert_eq!(sum.position, DVec3::new(0.0, 0.0, 3.0));
    assert_eq!(sum.velocity, DVec3::new(2.0, 1.0, 0.0));

    let scaled = a * -2.0;
    assert_eq!(scaled.position, DVec3::new(-2.0, 4.0, -6.0));
    assert_eq!(scaled.velocity, DVec3::new(-1.0, -0.5, 8.0));

    assert_eq!(a * 0.0, StateVectors::default());
}

#[test]
fn earth_orbital_speed() {
    let config = SolverConfig::default();

    // sqrt(6.674e-11 * 5.972e24 / 6.371e6)
    assert!(
        (config.orbital_speed() - 7909.5).abs() < 1.0,
        "orbital speed was {}",
        config.orbital_speed()
    );
    assert_almost_eq(
        config.mu(),
        6.674e-11 * 5.972e24,
        "gravitational parameter of the Earth",
    );
}

#[test]
fn presets() {
    let earth = body_presets::earth();
    let moon = body_presets::moon();
    let mars = body_presets::mars();

    assert_eq!(Body::default(), earth);
    assert_eq!(earth.name, "Earth");

    let g = 6.674e-11;
    let moon_speed = moon.orbital_speed(g);
    assert!((moon_speed - 1680.0).abs() < 5.0, "moon speed {moon_speed}");

    // Mars is smaller and lighter, and spins about as fast as the Earth
    assert!(mars.mass < earth.mass);
    assert!(mars.radius < earth.radius);
    assert!((mars.angular_velocity - earth.angular_velocity).abs() < 1e-5);

    for body in [earth, moon, mars] {
        let config = SolverConfig {
            body: body.clone(),
            ..SolverConfig::default()
        };
        assert!(config.validate().is_ok(), "{} preset was rejected", body.name);
    }
}

#[test]
fn stop_rotation() {
    let mut body = body_presets::earth();
    body.stop_rotation();

    assert_eq!(body.angular_velocity, 0.0);
    assert_eq!(body.mass, body_presets::earth().mass);
}
