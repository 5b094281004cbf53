use core::f64::consts::TAU;

use glam::DVec2;

use super::*;
use crate::Rk4;

#[test]
fn constant_rate() {
    let solution = Rk4::new(0.001).solve(0.0, |_: &f64| 1.0, 1005, |x: &f64| *x >= 0.5);

    assert!(solution.stopped);
    assert_eq!(solution.steps, 500);
    assert_almost_eq(solution.final_state, 0.5, "x after reaching 0.5");
    assert_almost_eq(solution.elapsed(), 0.5, "elapsed time");
}

#[test]
fn half_turn() {
    // One revolution per second, starting at (1, 0)
    let rotate = |s: &DVec2| DVec2::new(-TAU * s.y, TAU * s.x);

    let solution = Rk4::new(0.001).solve(DVec2::X, rotate, 1005, |s: &DVec2| {
        s.x <= -(1.0 - 1e-6)
    });

    assert!(solution.stopped);
    assert_eq!(solution.steps, 500);
    assert_almost_eq(solution.final_state.x, -1.0, "x after half a turn");
    assert_almost_eq(solution.final_state.y, 0.0, "y after half a turn");
}

#[test]
fn budget_exhausted() {
    let solution = Rk4::new(0.1).solve(1.0, |x: &f64| -*x, 37, |_: &f64| false);

    assert!(!solution.stopped);
    assert_eq!(solution.steps, 37);
    assert_eq!(solution.step_size, 0.1);
    assert!(solution.final_state > 0.0 && solution.final_state < 1.0);
}

#[test]
fn stop_checked_after_step() {
    // Already "stopped" at the initial state, but a step is still taken
    let solution = Rk4::new(0.5).solve(2.0, |_: &f64| 1.0, 10, |_: &f64| true);

    assert!(solution.stopped);
    assert_eq!(solution.steps, 1);
    assert_eq!(solution.final_state, 2.5);
}

#[test]
fn fourth_order() {
    fn decay_error(step_size: f64) -> f64 {
        let steps = (1.0 / step_size).round() as u64;
        let solution = Rk4::new(step_size).solve(1.0, |x: &f64| -*x, steps, |_: &f64| false);

        (solution.final_state - (-1f64).exp()).abs()
    }

    let ratio = decay_error(0.1) / decay_error(0.05);

    assert!(
        ratio > 14.0 && ratio < 18.0,
        "halving the step divided the error by {ratio}"
    );
}

#[test]
fn single_step() {
    // For dx/dt = x, one step is the 4th order Taylor expansion of e^h
    let h = 0.1;
    let stepped = Rk4::new(h).step(1.0, &mut |x: &f64| *x);
    let taylor = 1.0 + h + h * h / 2.0 + h * h * h / 6.0 + h * h * h * h / 24.0;

    assert_almost_eq(stepped, taylor, "one step of exponential growth");
    assert_eq!(Rk4::new(h).step_size(), h);
}

#[test]
fn state_vectors_integrate() {
    // Free flight: the position moves with the constant velocity
    let initial = StateVectors::new(DVec3::ZERO, DVec3::new(1.0, -2.0, 0.5));
    let derivative = |s: &StateVectors| StateVectors::new(s.velocity, DVec3::ZERO);

    let solution = Rk4::new(0.25).solve(initial, derivative, 8, |_: &StateVectors| false);

    assert_almost_eq_state(
        &solution.final_state,
        &StateVectors::new(DVec3::new(2.0, -4.0, 1.0), initial.velocity),
        "free flight after 2 s",
    );
}
