//! # Ballistic Trajectories
//! This library crate computes ballistic trajectories of a point mass launched
//! from the surface of a spherical, rotating planet and pulled only by the
//! planet's Newtonian gravity.
//!
//! Two problems are solved:
//! - **Forward simulation**: given a launch site and a launch velocity, the
//!   equations of motion are integrated with a fixed-step Runge-Kutta method
//!   until the object falls back below the surface. The impact point is
//!   reported in planet-fixed coordinates, i.e. corrected for the rotation of
//!   the planet during the flight.
//! - **Targeting**: given a launch site and a target, the crate searches for
//!   the launch speed and direction that hits the target with the least
//!   kinetic energy. This nests three numerical processes: the integrator, a
//!   damped two-dimensional Newton-Raphson solver over launch speed and
//!   azimuth, and a successive parabolic interpolation over the elevation
//!   angle.
//!
//! ## Getting started
//! This crate provides these main items:
//! - [`Body`]: the attracting planet (mass, radius and rotation rate).
//!   Some presets can be found in the [`body_presets`] module.
//! - [`SolverConfig`]: every physical and numerical constant used by the
//!   solvers. Its [`Default`] implementation targets the Earth.
//! - [`TrajectorySolver`]: the entry point for forward simulations
//!   ([`simulate`][TrajectorySolver::simulate]), fixed-elevation targeting
//!   ([`solve_for_elevation`][TrajectorySolver::solve_for_elevation]) and
//!   minimum-energy targeting ([`minimize_energy`][TrajectorySolver::minimize_energy]).
//!
//! The lower-level building blocks are public as well: the [`frame`]
//! transforms between the surface-local and the inertial frame, the
//! [`gravity`] model, and the generic [`Rk4`] integrator.
//!
//! ## Example
//!
//! ```rust
//! use ballistic_sim::{Coordinates, LaunchVector, SolverConfig, TrajectorySolver};
//!
//! # fn main() {
//! let config = SolverConfig::default();
//! let solver = TrajectorySolver::new(&config).unwrap();
//!
//! // Straight up at 100 m/s from the equator
//! let site = Coordinates::from_degrees(0.0, 0.0);
//! let launch = LaunchVector::from_degrees(100.0, 0.0, 90.0);
//!
//! let trajectory = solver.simulate(site, launch);
//! assert!(trajectory.landed);
//!
//! // Roughly 2v/g of flight
//! assert!((trajectory.flight_time() - 20.4).abs() < 0.5);
//! # }
//! ```

#![warn(missing_docs)]

mod body;
pub mod body_presets;
mod config;
mod error;
pub mod frame;
pub mod gravity;
mod integrator;
mod minimizer;
mod simulation;
mod solvers;

use core::ops::{Add, Mul};

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use body::Body;
pub use config::{Scaling, SolverConfig};
pub use error::{ConfigError, SolveError};
pub use frame::Coordinates;
pub use integrator::{Integrable, Rk4, Rk4Solution};
pub use minimizer::{EnergyCandidate, EnergySolution, MinimizerTermination};
pub use simulation::{Evaluation, LaunchVector, Trajectory, TrajectorySolver};
pub use solvers::{InverseSolution, LaunchGuess, SolverStatus};

/// A struct representing the position and velocity of the projectile.
///
/// Both vectors are expressed in the inertial frame, whose origin is the
/// center of the planet.
///
/// The position vector is in meters, while the velocity vector is in
/// meters per second.
///
/// State vectors are what the [`Rk4`] integrator advances during a forward
/// simulation. For that purpose they implement component-wise addition
/// and multiplication by a scalar, which makes them behave like the
/// 6-component vector `(x, y, z, vx, vy, vz)`.
///
/// # Example
/// ```
/// use glam::DVec3;
///
/// use ballistic_sim::StateVectors;
///
/// let sv = StateVectors {
///     position: DVec3::new(1.0, 2.0, 3.0),
///     velocity: DVec3::new(4.0, 5.0, 6.0),
/// };
///
/// let doubled = sv + sv;
/// assert_eq!(doubled, sv * 2.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateVectors {
    /// The 3D position of the projectile, in meters.
    pub position: DVec3,
    /// The 3D velocity of the projectile, in meters per second.
    pub velocity: DVec3,
}

impl StateVectors {
    /// Creates a new set of state vectors.
    pub const fn new(position: DVec3, velocity: DVec3) -> Self {
        Self { position, velocity }
    }
}

impl Add for StateVectors {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            position: self.position + rhs.position,
            velocity: self.velocity + rhs.velocity,
        }
    }
}

impl Mul<f64> for StateVectors {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            position: self.position * rhs,
            velocity: self.velocity * rhs,
        }
    }
}

#[cfg(test)]
mod tests;
