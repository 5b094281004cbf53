use core::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Body, ConfigError};

/// Per-variable normalization applied before the launch parameters are
/// handed to the Newton solver.
///
/// Launch speeds are in the thousands of meters per second while the
/// azimuth is at most a full turn. Left as-is, the two columns of the
/// Jacobian differ by orders of magnitude and the solver loses precision.
/// Each physical quantity is multiplied by its factor to obtain the
/// solver's variable, and divided by it on the way back.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scaling {
    /// Normalized units per meter per second of launch speed.
    pub speed: f64,
    /// Normalized units per radian of east angle.
    pub angle: f64,
}

impl Default for Scaling {
    /// Speeds in kilometers per second and angles in degrees.
    fn default() -> Self {
        Self {
            speed: 1e-3,
            angle: 180.0 / PI,
        }
    }
}

/// Every physical and numerical constant used by the solvers.
///
/// A configuration is passed by reference to the
/// [`TrajectorySolver`][crate::TrajectorySolver], and from there to each
/// component. Nothing is read from global state, so solves with different
/// tolerances can coexist in the same process.
///
/// The [`Default`] implementation targets the Earth with a 1 ms step. Use
/// struct update syntax to change only what you need:
///
/// ```
/// use ballistic_sim::SolverConfig;
///
/// let coarse = SolverConfig {
///     step_size: 0.05,
///     location_tolerance: 1e-9,
///     ..SolverConfig::default()
/// };
///
/// assert!(coarse.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// The attracting body.
    pub body: Body,

    /// The gravitational constant, in m^3 kg^-1 s^-2.
    pub gravitational_constant: f64,

    /// The fixed step of the RK4 integrator, in seconds.
    ///
    /// The step also bounds how precisely a landing point can be hit:
    /// the simulation stops at the first step that ends below the surface,
    /// so landing points move in jumps of roughly one step's horizontal
    /// travel. Keep `sqrt(location_tolerance) * radius` above that.
    pub step_size: f64,

    /// The maximum amount of RK4 steps in one forward simulation.
    pub max_steps: u64,

    /// The squared angular landing error under which a guess hits the
    /// target, in squared radians.
    pub location_tolerance: f64,

    /// The spread between the highest and lowest candidate energy under
    /// which the minimization stops, in joules.
    pub energy_tolerance: f64,

    /// The perturbation used to differentiate the landing point, in
    /// normalized units (see [`Scaling`]).
    pub jacobian_epsilon: f64,

    /// The Jacobian determinant magnitude under which the Jacobian is
    /// considered singular.
    pub determinant_zero: f64,

    /// How many singular Jacobians the Newton solver tolerates before
    /// giving up.
    pub singular_retry_limit: u32,

    /// The rotation applied to the east angle after a singular Jacobian,
    /// in radians.
    pub singular_azimuth_offset: f64,

    /// `k` in the damping factor `max(min_damping, exp(-k * error^2))`.
    pub damping_coefficient: f64,

    /// The smallest damping factor applied to a Newton step.
    pub min_damping: f64,

    /// The launch speed the Newton solver starts from, in m/s.
    pub initial_speed: f64,

    /// The normalization of the Newton solver's variables.
    pub scaling: Scaling,

    /// The maximum amount of Newton updates in one inverse solve.
    pub max_newton_iterations: u32,

    /// The elevation angles the minimization starts from, in radians.
    pub seed_elevations: [f64; 3],

    /// The maximum amount of parabolic interpolation steps.
    pub max_minimizer_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            body: Body::default(),
            gravitational_constant: 6.674e-11,
            step_size: 1e-3,
            max_steps: 10_000_000,
            location_tolerance: 1e-12,
            energy_tolerance: 0.1,
            jacobian_epsilon: 1e-2,
            determinant_zero: 1e-12,
            singular_retry_limit: 3,
            singular_azimuth_offset: 330f64.to_radians(),
            damping_coefficient: 1.0,
            min_damping: 0.1,
            initial_speed: 1000.0,
            scaling: Scaling::default(),
            max_newton_iterations: 200,
            seed_elevations: [35f64.to_radians(), 45f64.to_radians(), 65f64.to_radians()],
            max_minimizer_iterations: 50,
        }
    }
}

impl SolverConfig {
    /// Gets the gravitational parameter (`GM`) of the configured body,
    /// in m^3 s^-2.
    #[inline]
    pub fn mu(&self) -> f64 {
        self.body.gravitational_parameter(self.gravitational_constant)
    }

    /// Gets the speed of a circular orbit skimming the configured body,
    /// in m/s.
    #[inline]
    pub fn orbital_speed(&self) -> f64 {
        self.body.orbital_speed(self.gravitational_constant)
    }

    /// Gets the factor a Newton step is damped by, given the squared
    /// landing error of the current guess.
    ///
    /// This is `max(min_damping, exp(-k * error^2))`. The speed step is
    /// scaled by it and the east angle step by its square. Close to the
    /// target the full step is taken.
    ///
    /// # Example
    /// ```
    /// use ballistic_sim::SolverConfig;
    ///
    /// let config = SolverConfig::default();
    ///
    /// assert_eq!(config.damping(0.0), 1.0);
    /// assert_eq!(config.damping(1e3), config.min_damping);
    /// ```
    #[inline]
    pub fn damping(&self, error_squared: f64) -> f64 {
        self.min_damping.max((-self.damping_coefficient * error_squared).exp())
    }

    /// Checks that every field is usable by the solvers.
    ///
    /// The solving entry points of
    /// [`TrajectorySolver`][crate::TrajectorySolver] call this first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let body = &self.body;
        if !is_positive(body.mass) || !is_positive(body.radius) {
            return Err(ConfigError::InvalidBody {
                name: body.name.clone(),
                mass: body.mass,
                radius: body.radius,
            });
        }
        if !body.angular_velocity.is_finite() {
            return Err(ConfigError::InvalidAngularVelocity(body.angular_velocity));
        }
        if !is_positive(self.gravitational_constant) {
            return Err(ConfigError::InvalidGravitationalConstant(
                self.gravitational_constant,
            ));
        }
        if !is_positive(self.step_size) {
            return Err(ConfigError::InvalidStepSize(self.step_size));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepBudget);
        }

        for (what, value) in [
            ("location", self.location_tolerance),
            ("energy", self.energy_tolerance),
            ("determinant", self.determinant_zero),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::InvalidTolerance { what, value });
            }
        }

        if !is_positive(self.jacobian_epsilon) {
            return Err(ConfigError::InvalidJacobianEpsilon(self.jacobian_epsilon));
        }
        if !(self.damping_coefficient >= 0.0 && self.damping_coefficient.is_finite())
            || !(self.min_damping > 0.0 && self.min_damping <= 1.0)
        {
            return Err(ConfigError::InvalidDamping {
                coefficient: self.damping_coefficient,
                minimum: self.min_damping,
            });
        }
        if !is_positive(self.initial_speed) {
            return Err(ConfigError::InvalidInitialSpeed(self.initial_speed));
        }

        for (what, value) in [("speed", self.scaling.speed), ("angle", self.scaling.angle)] {
            if !is_positive(value) {
                return Err(ConfigError::InvalidScaling { what, value });
            }
        }

        let [a, b, c] = self.seed_elevations;
        let in_range = self
            .seed_elevations
            .iter()
            .all(|&angle| angle > 0.0 && angle < PI / 2.0);
        if !in_range || a == b || b == c || a == c {
            return Err(ConfigError::InvalidSeedElevations(
                self.seed_elevations.map(f64::to_degrees),
            ));
        }

        Ok(())
    }
}

#[inline]
fn is_positive(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}
