use super::*;
use crate::{gravity, LaunchVector};

fn specific_energy(mu: f64, state: &StateVectors) -> f64 {
    state.velocity.length_squared() / 2.0 - mu / state.position.length()
}

#[test]
fn surface_gravity() {
    let config = SolverConfig::default();
    let radius = config.body.radius;

    for _ in 0..RANDOM_CASES {
        let coords = random_coordinates();
        let state = StateVectors::new(coords.to_position(radius), random_vector());
        let rate = gravity::derivative(config.mu(), &state);

        assert_eq!(rate.position, state.velocity);
        assert!(
            (rate.velocity.length() - 9.82).abs() < 0.01,
            "surface gravity at {coords:?} was {}",
            rate.velocity.length()
        );
        assert_almost_eq_vec3(
            rate.velocity.normalize(),
            -coords.up(),
            &format!("direction of gravity at {coords:?}"),
        );
    }
}

#[test]
fn surface_boundary() {
    let radius = 6.371e6;
    let on = StateVectors::new(DVec3::new(radius, 0.0, 0.0), DVec3::ZERO);
    let under = StateVectors::new(DVec3::new(0.0, radius - 1e-3, 0.0), DVec3::ZERO);
    let over = StateVectors::new(DVec3::new(0.0, 0.0, radius + 1.0), DVec3::ZERO);

    assert!(!gravity::is_below_surface(radius, &on));
    assert!(gravity::is_below_surface(radius, &under));
    assert!(!gravity::is_below_surface(radius, &over));

    assert_eq!(gravity::altitude(radius, &on), 0.0);
    assert_almost_eq(gravity::altitude(radius, &over), 1.0, "altitude 1 m up");
}

#[test]
fn dropped_in_place() {
    let config = SolverConfig::default();
    let solver = solver(&config);

    for coords in [Coordinates::new(0.0, 0.0), Coordinates::from_degrees(45.0, 0.0)] {
        let trajectory = solver.simulate(coords, LaunchVector::default());

        assert!(trajectory.landed);
        assert_eq!(trajectory.steps, 1);
        assert_almost_eq_coords(
            trajectory.landing_site,
            coords,
            &format!("drop at {coords:?}"),
        );
    }
}

#[test]
fn vertical_launch_drifts_west() {
    init_logger();

    let config = SolverConfig::default();
    let solver = solver(&config);
    let site = Coordinates::new(0.0, 0.0);

    let trajectory = solver.simulate(site, LaunchVector::from_degrees(100.0, 0.0, 90.0));

    assert!(trajectory.landed);
    assert!(
        (trajectory.flight_time() - 20.44).abs() < 0.05,
        "flight time was {} s",
        trajectory.flight_time()
    );

    // The ground outruns the projectile while it climbs: about 1 m west
    let longitude = trajectory.landing_site.longitude;
    assert!(
        longitude < -1.5e-7 && longitude > -1.7e-7,
        "landing longitude was {longitude} rad"
    );
    assert_almost_eq(trajectory.landing_site.latitude, 0.0, "landing latitude");
}

#[test]
fn still_body_has_no_drift() {
    let mut config = SolverConfig::default();
    config.body.stop_rotation();
    let solver = solver(&config);

    let site = Coordinates::from_degrees(-30.0, 60.0);
    let trajectory = solver.simulate(site, LaunchVector::from_degrees(100.0, 0.0, 90.0));

    assert!(trajectory.landed);
    assert_almost_eq_coords(trajectory.landing_site, site, "vertical launch on a still body");
}

#[test]
fn energy_is_conserved() {
    let config = SolverConfig {
        step_size: 0.01,
        ..SolverConfig::default()
    };
    let solver = solver(&config);
    let mu = config.mu();

    for _ in 0..10 {
        let site = random_coordinates();
        let launch = LaunchVector::new(
            rand::random_range(100.0..2000.0),
            rand::random_range(0.0..core::f64::consts::TAU),
            rand::random_range(0.2..1.4),
        );
        let trajectory = solver.simulate(site, launch);

        assert!(trajectory.landed, "{launch:?} from {site:?} did not land");

        let before = specific_energy(mu, &trajectory.launch_state);
        let after = specific_energy(mu, &trajectory.final_state);
        let drift = ((after - before) / before).abs();
        assert!(drift < 1e-8, "relative energy drift {drift} for {launch:?}");
    }
}

#[test]
fn launch_state() {
    let config = SolverConfig::default();
    let solver = solver(&config);
    let site = Coordinates::from_degrees(10.0, 20.0);
    let launch = LaunchVector::from_degrees(250.0, 30.0, 60.0);

    let trajectory = solver.simulate(site, launch);

    assert_almost_eq_state(
        &trajectory.launch_state,
        &StateVectors::new(
            site.to_position(config.body.radius),
            crate::frame::to_inertial(&config.body, site, launch.local_velocity()),
        ),
        "launch state",
    );
    assert_almost_eq_vec3(
        crate::frame::to_local(&config.body, site, trajectory.launch_state.velocity),
        launch.local_velocity(),
        "local launch velocity",
    );
}

#[test]
fn step_budget_runs_out() {
    init_logger();

    let config = SolverConfig {
        max_steps: 10,
        ..SolverConfig::default()
    };
    let solver = solver(&config);

    let trajectory = solver.simulate(
        Coordinates::new(0.0, 0.0),
        LaunchVector::from_degrees(100.0, 0.0, 90.0),
    );

    assert!(!trajectory.landed);
    assert_eq!(trajectory.steps, 10);
    assert_almost_eq(trajectory.flight_time(), 0.01, "flight time");
}
