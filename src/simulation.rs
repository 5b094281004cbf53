use glam::{DVec2, DVec3};
use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    frame::{self, wrap_angle},
    gravity, ConfigError, Coordinates, LaunchGuess, Rk4, Rk4Solution, SolveError, SolverConfig,
    StateVectors,
};

/// A launch velocity described the way a person would: a speed and two
/// angles in the local frame of the launch site.
///
/// The speed is relative to the ground, in meters per second. Angles are in
/// radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaunchVector {
    /// The launch speed relative to the ground, in m/s.
    pub speed: f64,
    /// The direction of the horizontal part of the velocity, in radians,
    /// measured counterclockwise from local east.
    pub east_angle: f64,
    /// The angle between the velocity and the local horizontal plane,
    /// in radians.
    pub elevation: f64,
}

impl LaunchVector {
    /// Creates a new launch vector from a speed in m/s and angles in radians.
    pub const fn new(speed: f64, east_angle: f64, elevation: f64) -> Self {
        Self {
            speed,
            east_angle,
            elevation,
        }
    }

    /// Creates a new launch vector from a speed in m/s and angles in degrees.
    pub fn from_degrees(speed: f64, east_angle: f64, elevation: f64) -> Self {
        Self::new(speed, east_angle.to_radians(), elevation.to_radians())
    }

    /// Gets the east angle, in degrees.
    pub fn east_angle_degrees(&self) -> f64 {
        self.east_angle.to_degrees()
    }

    /// Gets the elevation angle, in degrees.
    pub fn elevation_degrees(&self) -> f64 {
        self.elevation.to_degrees()
    }

    /// Gets the velocity in the local (east, north, up) frame, relative to
    /// the ground.
    ///
    /// # Example
    /// ```
    /// use ballistic_sim::LaunchVector;
    ///
    /// let straight_up = LaunchVector::from_degrees(10.0, 0.0, 90.0);
    /// let v = straight_up.local_velocity();
    ///
    /// assert!(v.x.abs() < 1e-12);
    /// assert!(v.y.abs() < 1e-12);
    /// assert_eq!(v.z, 10.0);
    /// ```
    pub fn local_velocity(&self) -> DVec3 {
        let (sin_elev, cos_elev) = self.elevation.sin_cos();
        let (sin_east, cos_east) = self.east_angle.sin_cos();

        self.speed * DVec3::new(cos_elev * cos_east, cos_elev * sin_east, sin_elev)
    }

    /// Gets the kinetic energy of a projectile of the given mass launched
    /// with this vector, in joules.
    ///
    /// Only the speed relative to the ground counts; the velocity the
    /// projectile already has from the body's rotation comes for free.
    pub fn kinetic_energy(&self, mass: f64) -> f64 {
        mass * self.speed * self.speed / 2.0
    }
}

/// The outcome of one forward simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trajectory {
    /// The inertial state right after launch.
    pub launch_state: StateVectors,
    /// The inertial state after the last integration step.
    pub final_state: StateVectors,
    /// The amount of integration steps that were taken.
    pub steps: u64,
    /// The integration step size, in seconds.
    pub step_size: f64,
    /// Whether the projectile fell back below the surface. If not, the
    /// step budget ran out mid-flight and the final state is wherever
    /// the projectile happened to be.
    pub landed: bool,
    /// Where the final state lies in planet-fixed coordinates.
    pub landing_site: Coordinates,
}

impl Trajectory {
    fn new(
        solution: Rk4Solution<StateVectors>,
        launch_state: StateVectors,
        config: &SolverConfig,
    ) -> Self {
        let inertial = Coordinates::from_position(solution.final_state.position);

        // The ground kept turning while the projectile was in the air
        let rotation = config.body.angular_velocity * solution.elapsed();
        let landing_site = Coordinates::new(
            inertial.latitude,
            wrap_angle(inertial.longitude - rotation),
        );

        Self {
            launch_state,
            final_state: solution.final_state,
            steps: solution.steps,
            step_size: solution.step_size,
            landed: solution.stopped,
            landing_site,
        }
    }

    /// Gets the flight time, in seconds.
    #[inline]
    pub fn flight_time(&self) -> f64 {
        self.steps as f64 * self.step_size
    }
}

/// The result of simulating one [`LaunchGuess`]: how far from the target it
/// landed, and the trajectory that got it there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    /// The guess converted back to physical units.
    pub launch: LaunchVector,
    /// The landing error `(Δcolatitude, Δlongitude)`, in radians.
    ///
    /// The longitude difference is measured in planet-fixed coordinates
    /// and wrapped into `[-π, π)`.
    pub error: DVec2,
    /// The simulated trajectory.
    pub trajectory: Trajectory,
}

impl Evaluation {
    /// Gets the squared angular landing error, in squared radians.
    #[inline]
    pub fn error_squared(&self) -> f64 {
        self.error.length_squared()
    }
}

/// The entry point for forward simulations and targeting.
///
/// A solver borrows a validated [`SolverConfig`] and holds no other
/// state, so every call is independent of the previous ones. Solving the
/// same problem twice gives bit-identical results.
#[derive(Clone, Copy, Debug)]
pub struct TrajectorySolver<'a> {
    pub(crate) config: &'a SolverConfig,
}

impl<'a> TrajectorySolver<'a> {
    /// Creates a solver after checking the configuration.
    ///
    /// # Example
    /// ```
    /// use ballistic_sim::{ConfigError, SolverConfig, TrajectorySolver};
    ///
    /// let config = SolverConfig {
    ///     step_size: 0.0,
    ///     ..SolverConfig::default()
    /// };
    ///
    /// assert_eq!(
    ///     TrajectorySolver::new(&config).unwrap_err(),
    ///     ConfigError::InvalidStepSize(0.0),
    /// );
    /// ```
    pub fn new(config: &'a SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Gets the configuration this solver runs with.
    pub fn config(&self) -> &'a SolverConfig {
        self.config
    }

    /// Simulates a launch until the projectile falls back below the surface
    /// or the step budget runs out.
    ///
    /// The launch starts on the surface at `site`, at time zero.
    pub fn simulate(&self, site: Coordinates, launch: LaunchVector) -> Trajectory {
        let body = &self.config.body;
        let launch_state = StateVectors::new(
            site.to_position(body.radius),
            frame::to_inertial(body, site, launch.local_velocity()),
        );

        let mu = self.config.mu();
        let radius = body.radius;

        let solution = Rk4::new(self.config.step_size).solve(
            launch_state,
            |state: &StateVectors| gravity::derivative(mu, state),
            self.config.max_steps,
            |state: &StateVectors| gravity::is_below_surface(radius, state),
        );

        if !solution.stopped {
            warn!(
                "Projectile still in flight after {} steps ({} s); launch speed {} m/s",
                solution.steps,
                solution.elapsed(),
                launch.speed
            );
        }

        Trajectory::new(solution, launch_state, self.config)
    }

    /// Simulates a normalized launch guess at a fixed elevation and measures
    /// how far from `target` it lands.
    ///
    /// This is the function the Newton solver differentiates.
    pub fn evaluate(
        &self,
        site: Coordinates,
        target: Coordinates,
        elevation: f64,
        guess: LaunchGuess,
    ) -> Evaluation {
        let launch = guess.to_launch(&self.config.scaling, elevation);
        let trajectory = self.simulate(site, launch);

        let landing = trajectory.landing_site;
        let error = DVec2::new(
            landing.colatitude() - target.colatitude(),
            wrap_angle(landing.longitude - target.longitude),
        );

        Evaluation {
            launch,
            error,
            trajectory,
        }
    }

    /// Checks the launch site and target of a targeting problem.
    pub(crate) fn validate_problem(
        &self,
        site: Coordinates,
        target: Coordinates,
    ) -> Result<(), SolveError> {
        for coords in [site, target] {
            if !coords.is_valid() {
                return Err(SolveError::InvalidCoordinates {
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                });
            }
        }

        let separation = site.squared_separation(&target);
        if separation < self.config.location_tolerance {
            return Err(SolveError::CoincidentTarget(separation));
        }

        Ok(())
    }
}
