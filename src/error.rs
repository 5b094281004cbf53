use thiserror::Error;

/// An error describing why a [`SolverConfig`][crate::SolverConfig] was rejected.
///
/// Every numeric field of the configuration has to be finite; the variants
/// below name the field that broke the rule.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// ### The body's mass or radius is not a positive number.
    /// The gravity model divides by the distance to the center of the body
    /// and stops integrating at its surface, so both have to be positive.
    #[error("body '{name}' must have a positive mass and radius (got mass {mass}, radius {radius})")]
    InvalidBody {
        /// The name of the offending body.
        name: String,
        /// The mass that was given.
        mass: f64,
        /// The radius that was given.
        radius: f64,
    },

    /// ### The body's angular velocity is not finite.
    #[error("angular velocity must be finite, got {0}")]
    InvalidAngularVelocity(f64),

    /// ### The gravitational constant is not a positive number.
    #[error("gravitational constant must be positive, got {0}")]
    InvalidGravitationalConstant(f64),

    /// ### The integration step size is not a positive number.
    #[error("step size must be positive, got {0}")]
    InvalidStepSize(f64),

    /// ### The integration step budget is zero.
    #[error("step budget must allow at least one step")]
    ZeroStepBudget,

    /// ### A tolerance is not a positive number.
    #[error("{what} tolerance must be positive, got {value}")]
    InvalidTolerance {
        /// Which tolerance was rejected.
        what: &'static str,
        /// The value that was given.
        value: f64,
    },

    /// ### The finite-difference step is not a positive number.
    #[error("jacobian epsilon must be positive, got {0}")]
    InvalidJacobianEpsilon(f64),

    /// ### The damping parameters are out of range.
    /// The damping coefficient must be non-negative and the lower
    /// clamp of the damping factor must lie in `(0, 1]`.
    #[error("damping coefficient {coefficient} / minimum damping {minimum} out of range")]
    InvalidDamping {
        /// The damping coefficient that was given.
        coefficient: f64,
        /// The minimum damping factor that was given.
        minimum: f64,
    },

    /// ### The Newton solver's starting speed is not a positive number.
    #[error("initial speed must be positive, got {0}")]
    InvalidInitialSpeed(f64),

    /// ### A normalization factor is not a positive number.
    #[error("{what} scale factor must be positive, got {value}")]
    InvalidScaling {
        /// Which factor was rejected.
        what: &'static str,
        /// The value that was given.
        value: f64,
    },

    /// ### The seed elevations cannot span a parabola.
    /// They must be three distinct angles strictly between 0 and 90 degrees.
    #[error("seed elevations {0:?} must be three distinct angles in (0, 90) degrees")]
    InvalidSeedElevations([f64; 3]),
}

/// An error returned by the solving entry points of
/// [`TrajectorySolver`][crate::TrajectorySolver].
///
/// Only malformed inputs are reported this way. Numerical trouble met
/// while solving (singular Jacobians, guesses that wander past orbital
/// speed, a minimization that stops early) is not an error: the solvers
/// log a warning and report it through the status of their result.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    /// ### The configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// ### A latitude or longitude is not usable.
    /// Latitudes must lie in `[-90, 90]` degrees and both angles must be finite.
    #[error("invalid coordinates: latitude {latitude} rad, longitude {longitude} rad")]
    InvalidCoordinates {
        /// The latitude that was given, in radians.
        latitude: f64,
        /// The longitude that was given, in radians.
        longitude: f64,
    },

    /// ### The elevation angle is not strictly between 0 and 90 degrees.
    #[error("elevation must lie strictly between 0 and 90 degrees, got {0} rad")]
    InvalidElevation(f64),

    /// ### The mass of the projectile is not a positive number.
    #[error("mass must be positive, got {0} kg")]
    InvalidMass(f64),

    /// ### The launch site and the target are the same point.
    /// The landing error is already within tolerance before launching,
    /// so there is nothing to aim at.
    #[error("launch site and target coincide (squared separation {0} rad^2)")]
    CoincidentTarget(f64),
}
