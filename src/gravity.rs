//! Inverse-square gravity of a spherical body.
//!
//! The body sits at the origin of the inertial frame. Its rotation does
//! not affect its gravity field; it only matters when converting between
//! the local and the inertial frame (see [`crate::frame`]).

use crate::StateVectors;

/// Gets the time derivative of the projectile's state.
///
/// The derivative of the position is the velocity, and the derivative of
/// the velocity is the gravitational acceleration `-μ / r³ · r`.
///
/// `mu`: The gravitational parameter of the body, in m^3 s^-2.
///
/// # Constraints
/// The position must not be at the origin, or the acceleration will be
/// non-finite.
///
/// # Example
/// ```
/// use glam::DVec3;
///
/// use ballistic_sim::{gravity, StateVectors};
///
/// let state = StateVectors::new(DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 3.0, 0.0));
/// let rate = gravity::derivative(8.0, &state);
///
/// assert_eq!(rate.position, DVec3::new(0.0, 3.0, 0.0));
/// assert_eq!(rate.velocity, DVec3::new(-2.0, 0.0, 0.0));
/// ```
#[inline]
pub fn derivative(mu: f64, state: &StateVectors) -> StateVectors {
    let r = state.position.length();
    let factor = -mu / (r * r * r);

    StateVectors {
        position: state.velocity,
        velocity: factor * state.position,
    }
}

/// Checks whether the projectile is below the surface of a body with the
/// given radius.
///
/// This compares squared lengths and therefore doesn't take a square root.
#[inline]
pub fn is_below_surface(radius: f64, state: &StateVectors) -> bool {
    state.position.length_squared() < radius * radius
}

/// Gets the altitude of the projectile above a body with the given radius,
/// in meters.
#[inline]
pub fn altitude(radius: f64, state: &StateVectors) -> f64 {
    state.position.length() - radius
}
