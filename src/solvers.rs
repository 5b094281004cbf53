use core::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::{DMat2, DVec2};
use log::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{frame, Coordinates, Evaluation, LaunchVector, Scaling, SolveError, TrajectorySolver};

/// A candidate launch speed and east angle, in the normalized units the
/// Newton solver works with (see [`Scaling`]).
///
/// The elevation angle is not part of the guess: the inverse solver keeps
/// it fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaunchGuess {
    /// The normalized launch speed.
    pub speed: f64,
    /// The normalized east angle.
    pub east_angle: f64,
}

impl LaunchGuess {
    /// Creates a new guess from normalized values.
    pub const fn new(speed: f64, east_angle: f64) -> Self {
        Self { speed, east_angle }
    }

    /// Normalizes a physical speed (m/s) and east angle (radians).
    pub fn from_physical(speed: f64, east_angle: f64, scaling: &Scaling) -> Self {
        Self::new(speed * scaling.speed, east_angle * scaling.angle)
    }

    /// Converts the guess back into a physical launch vector at the given
    /// elevation.
    pub fn to_launch(&self, scaling: &Scaling, elevation: f64) -> LaunchVector {
        LaunchVector::new(
            self.speed / scaling.speed,
            self.east_angle / scaling.angle,
            elevation,
        )
    }

    fn as_vec2(&self) -> DVec2 {
        DVec2::new(self.speed, self.east_angle)
    }

    fn is_finite(&self) -> bool {
        self.speed.is_finite() && self.east_angle.is_finite()
    }

    /// Brings the guess back into its canonical range: a non-negative speed
    /// and an east angle within a single turn.
    ///
    /// A negative speed is the same launch as a positive one pointed the
    /// other way, so it is flipped along with the east angle.
    ///
    /// Returns whether the speed had to be flipped.
    pub(crate) fn canonicalize(&mut self, scaling: &Scaling) -> bool {
        let flipped = self.speed < 0.0;

        if flipped {
            self.speed = -self.speed;
            self.east_angle += PI * scaling.angle;
        }
        self.east_angle = self.east_angle.rem_euclid(TAU * scaling.angle);

        flipped
    }
}

/// The state of the inverse solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolverStatus {
    /// Still iterating. A finished solve never reports this.
    Guessing,
    /// The projectile lands within the location tolerance of the target.
    Converged,
    /// The Jacobian was singular more often than the retry budget allows.
    /// The last guess is returned as a best effort.
    Stuck,
    /// The iteration ceiling was reached, or the guess stopped being finite.
    /// The last finite guess is returned as a best effort.
    Diverged,
}

/// The outcome of one inverse solve at a fixed elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InverseSolution {
    /// How the solve ended.
    pub status: SolverStatus,
    /// The final launch vector, in physical units.
    pub launch: LaunchVector,
    /// The final guess, in normalized units.
    pub guess: LaunchGuess,
    /// The squared angular landing error of the final guess, in squared radians.
    pub error_squared: f64,
    /// Where the final guess lands, in planet-fixed coordinates.
    pub landing_site: Coordinates,
    /// The flight time of the final guess, in seconds.
    pub flight_time: f64,
    /// The amount of Newton updates that were applied.
    pub iterations: u32,
    /// The amount of singular Jacobians that were met.
    pub singular_retries: u32,
}

impl InverseSolution {
    /// Checks whether the solve hit the target.
    #[inline]
    pub fn is_converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }
}

impl TrajectorySolver<'_> {
    /// Finds the launch speed and east angle that hit `target` from `site`
    /// at a fixed elevation angle.
    ///
    /// # Algorithm
    /// This is a damped Newton-Raphson iteration over the normalized
    /// `(speed, east angle)` pair, where the function whose root is sought is
    /// the landing error of a forward simulation:
    ///
    /// 1. The east angle starts along the great circle to the target and the
    ///    speed starts at [`initial_speed`][crate::SolverConfig::initial_speed].
    /// 2. The guess is simulated. If it lands within
    ///    [`location_tolerance`][crate::SolverConfig::location_tolerance] of
    ///    the target, the solve has converged.
    /// 3. The 2x2 Jacobian of the landing error is estimated with forward
    ///    differences, one extra simulation per variable.
    /// 4. A singular Jacobian rotates the east angle by
    ///    [`singular_azimuth_offset`][crate::SolverConfig::singular_azimuth_offset]
    ///    and starts over, up to
    ///    [`singular_retry_limit`][crate::SolverConfig::singular_retry_limit] times.
    /// 5. Otherwise the Newton step is taken, damped by
    ///    `d = max(min_damping, exp(-k * error^2))` on the speed and `d^2` on
    ///    the east angle. Far from the target the landing error is strongly
    ///    non-linear, and a full step could throw the projectile into orbit.
    /// 6. A negative speed is flipped along with the east angle, and the
    ///    east angle is wrapped into a single turn.
    ///
    /// # Errors
    /// Malformed inputs are rejected; see [`SolveError`]. Failing to converge
    /// is not an error: check [`status`][InverseSolution::status].
    pub fn solve_for_elevation(
        &self,
        site: Coordinates,
        target: Coordinates,
        elevation: f64,
    ) -> Result<InverseSolution, SolveError> {
        self.validate_problem(site, target)?;

        if !(elevation > 0.0 && elevation < FRAC_PI_2) {
            return Err(SolveError::InvalidElevation(elevation));
        }

        Ok(self.solve_unchecked(site, target, elevation))
    }

    pub(crate) fn solve_unchecked(
        &self,
        site: Coordinates,
        target: Coordinates,
        elevation: f64,
    ) -> InverseSolution {
        let config = self.config;
        let scaling = config.scaling;
        let full_turn = TAU * scaling.angle;
        let orbital_speed = config.orbital_speed() * scaling.speed;

        info!("Evaluating for elevation {:.6}°", elevation.to_degrees());

        let mut guess = LaunchGuess::from_physical(
            config.initial_speed,
            frame::initial_east_angle(site, target),
            &scaling,
        );
        let mut evaluation = self.evaluate(site, target, elevation, guess);

        let mut status = SolverStatus::Guessing;
        let mut iterations = 0;
        let mut singular_retries = 0;

        while status == SolverStatus::Guessing {
            let error_squared = evaluation.error_squared();

            if evaluation.trajectory.landed && error_squared < config.location_tolerance {
                status = SolverStatus::Converged;
                continue;
            }

            if iterations >= config.max_newton_iterations {
                warn!(
                    "Newton solver gave up after {iterations} iterations at elevation {}°",
                    elevation.to_degrees()
                );
                status = SolverStatus::Diverged;
                continue;
            }

            let jacobian = self.jacobian(site, target, elevation, guess, &evaluation);

            if jacobian.determinant().abs() < config.determinant_zero {
                warn!(
                    "Non-invertible Jacobian at speed {} m/s, east angle {}°, elevation {}°",
                    evaluation.launch.speed,
                    evaluation.launch.east_angle_degrees(),
                    elevation.to_degrees()
                );

                singular_retries += 1;
                if singular_retries > config.singular_retry_limit {
                    warn!("Non-invertible Jacobian count exceeded");
                    status = SolverStatus::Stuck;
                    continue;
                }

                // Most likely a bad starting direction, so try another one
                guess.east_angle = (guess.east_angle
                    + config.singular_azimuth_offset * scaling.angle)
                    .rem_euclid(full_turn);
                evaluation = self.evaluate(site, target, elevation, guess);
                continue;
            }

            let damping = config.damping(error_squared);
            let delta = jacobian.inverse() * -evaluation.error;

            let mut next = LaunchGuess::new(
                guess.speed + delta.x * damping,
                guess.east_angle + delta.y * damping * damping,
            );

            if !next.is_finite() {
                warn!(
                    "Newton step produced a non-finite guess from {:?}",
                    guess.as_vec2()
                );
                status = SolverStatus::Diverged;
                continue;
            }

            if next.speed > orbital_speed {
                warn!("Orbital speeds reached: {} m/s", next.speed / scaling.speed);
            }
            if next.canonicalize(&scaling) {
                warn!("Negative speeds reached, flipping the launch direction");
            }

            guess = next;
            iterations += 1;
            evaluation = self.evaluate(site, target, elevation, guess);

            debug!(
                "Current error: {} m, flight time: {} s",
                evaluation.error_squared().sqrt() * config.body.radius,
                evaluation.trajectory.flight_time()
            );
        }

        info!(
            "Speed is {} m/s ({status:?} after {iterations} iterations)",
            evaluation.launch.speed
        );

        InverseSolution {
            status,
            launch: evaluation.launch,
            guess,
            error_squared: evaluation.error_squared(),
            landing_site: evaluation.trajectory.landing_site,
            flight_time: evaluation.trajectory.flight_time(),
            iterations,
            singular_retries,
        }
    }

    /// Estimates the Jacobian of the landing error with respect to the
    /// normalized `(speed, east angle)` with forward differences.
    ///
    /// The first column is the derivative with respect to speed and the
    /// second with respect to the east angle.
    fn jacobian(
        &self,
        site: Coordinates,
        target: Coordinates,
        elevation: f64,
        guess: LaunchGuess,
        at_guess: &Evaluation,
    ) -> DMat2 {
        let epsilon = self.config.jacobian_epsilon;

        let faster = LaunchGuess {
            speed: guess.speed + epsilon,
            ..guess
        };
        let turned = LaunchGuess {
            east_angle: guess.east_angle + epsilon,
            ..guess
        };

        let d_speed = self.evaluate(site, target, elevation, faster).error - at_guess.error;
        let d_angle = self.evaluate(site, target, elevation, turned).error - at_guess.error;

        DMat2::from_cols(d_speed / epsilon, d_angle / epsilon)
    }
}
