use super::*;
use crate::{minimizer::parabolic_vertex, MinimizerTermination, SolveError};

#[test]
fn vertex_of_parabola() {
    // (x - 2)² + 1
    let f = |x: f64| (x - 2.0) * (x - 2.0) + 1.0;
    let vertex = parabolic_vertex([(0.0, f(0.0)), (1.0, f(1.0)), (5.0, f(5.0))]);
    assert_eq!(vertex, 2.0);

    // Point order doesn't matter
    for _ in 0..RANDOM_CASES {
        let center = rand::random_range(-10.0..10.0);
        let width = rand::random_range(0.1..10.0);
        let g = |x: f64| width * (x - center) * (x - center) - 3.0;

        let xs = [
            rand::random_range(-20.0..-11.0),
            rand::random_range(-10.5..10.5),
            rand::random_range(11.0..20.0),
        ];
        let vertex = parabolic_vertex([(xs[2], g(xs[2])), (xs[0], g(xs[0])), (xs[1], g(xs[1]))]);

        assert!(
            (vertex - center).abs() < 1e-6,
            "vertex {vertex} for center {center} through {xs:?}"
        );
    }
}

#[test]
fn vertex_of_line() {
    let vertex = parabolic_vertex([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);

    assert!(!vertex.is_finite());
}

#[test]
fn finds_cheapest_launch() {
    init_logger();

    let config = coarse_config();
    let solver = solver(&config);
    let site = Coordinates::new(0.0, 0.0);
    let target = Coordinates::from_degrees(0.0, 10.0);

    let solution = match solver.minimize_energy(site, target, 1.0) {
        Ok(solution) => solution,
        Err(e) => panic!("valid problem was rejected: {e}"),
    };

    assert!(
        matches!(
            solution.termination,
            MinimizerTermination::ToleranceReached | MinimizerTermination::NoImprovement
        ),
        "minimization ended with {:?}",
        solution.termination
    );
    assert!(solution.inverse_solves > 3);
    assert!(solution.best.solution.is_converged());

    let elevation = solution.launch().elevation_degrees();
    assert!(
        elevation > 35.0 && elevation < 50.0,
        "best elevation was {elevation}°"
    );
    assert_eq!(solution.best.elevation, solution.launch().elevation);
    assert_almost_eq(
        solution.energy(),
        solution.launch().kinetic_energy(1.0),
        "energy of the best launch",
    );

    for candidate in &solution.candidates {
        assert!(solution.energy() <= candidate.energy);
    }

    // No seed is cheaper than the result
    for elevation in config.seed_elevations {
        let seed = match solver.solve_for_elevation(site, target, elevation) {
            Ok(seed) => seed,
            Err(e) => panic!("seed elevation was rejected: {e}"),
        };
        assert!(seed.is_converged());
        assert!(
            solution.energy() <= seed.launch.kinetic_energy(1.0),
            "seed at {}° is cheaper",
            elevation.to_degrees()
        );
    }

    let trajectory = solver.simulate(site, solution.launch());
    assert!(trajectory.landed);
    assert!(trajectory.landing_site.squared_separation(&target) < config.location_tolerance);
}

#[test]
fn rejects_bad_mass() {
    let config = coarse_config();
    let solver = solver(&config);
    let site = Coordinates::new(0.0, 0.0);
    let target = Coordinates::from_degrees(0.0, 10.0);

    for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        match solver.minimize_energy(site, target, mass) {
            Err(SolveError::InvalidMass(_)) => {}
            other => panic!("mass {mass} gave {other:?}"),
        }
    }

    assert!(matches!(
        solver.minimize_energy(site, site, 1.0),
        Err(SolveError::CoincidentTarget(_))
    ));
}

#[test]
fn stops_at_iteration_limit() {
    init_logger();

    let config = SolverConfig {
        max_minimizer_iterations: 0,
        ..coarse_config()
    };
    let solver = solver(&config);
    let site = Coordinates::new(0.0, 0.0);
    let target = Coordinates::from_degrees(0.0, 10.0);

    let solution = match solver.minimize_energy(site, target, 2.0) {
        Ok(solution) => solution,
        Err(e) => panic!("valid problem was rejected: {e}"),
    };

    assert_eq!(solution.termination, MinimizerTermination::IterationLimit);
    assert_eq!(solution.inverse_solves, 3);

    // With only the seeds to choose from, 45° is the cheapest
    assert_eq!(solution.best.elevation, config.seed_elevations[1]);
    for (candidate, elevation) in solution.candidates.iter().zip(config.seed_elevations) {
        assert_eq!(candidate.elevation, elevation);
        assert!(candidate.solution.is_converged());
    }
}

#[test]
fn missed_seeds_are_degenerate() {
    init_logger();

    // One Newton step is never enough from the default starting speed
    let config = SolverConfig {
        max_newton_iterations: 1,
        ..coarse_config()
    };
    let solver = solver(&config);
    let site = Coordinates::new(0.0, 0.0);
    let target = Coordinates::from_degrees(0.0, 10.0);

    let solution = match solver.minimize_energy(site, target, 1.0) {
        Ok(solution) => solution,
        Err(e) => panic!("valid problem was rejected: {e}"),
    };

    assert_eq!(solution.termination, MinimizerTermination::Degenerate);
    assert_eq!(solution.inverse_solves, 3);
    assert!(!solution.best.solution.is_converged());
    assert_eq!(solution.energy(), f64::INFINITY);
}
