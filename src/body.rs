#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The planet a projectile is launched from and falls back onto.
///
/// The body is modelled as a perfect sphere of uniform density spinning
/// around the inertial z-axis at a constant rate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// The name of the celestial body.
    pub name: String,

    /// The mass of the celestial body, in kilograms.
    pub mass: f64,

    /// The radius of the celestial body, in meters.
    pub radius: f64,

    /// The rotation rate of the celestial body around the z-axis,
    /// in radians per second.
    ///
    /// Positive values spin the body counterclockwise when seen from
    /// above the north pole, i.e. towards the east.
    pub angular_velocity: f64,
}

impl Body {
    /// Creates a new spinning body.
    ///
    /// # Arguments
    ///
    /// * `name` - What to call the body in logs and error messages.
    /// * `mass` - Its mass, in kilograms.
    /// * `radius` - Its mean radius, in meters.
    /// * `angular_velocity` - Its sidereal rotation rate, in radians per second.
    pub fn new(name: String, mass: f64, radius: f64, angular_velocity: f64) -> Self {
        Self {
            name,
            mass,
            radius,
            angular_velocity,
        }
    }

    /// Gets the gravitational parameter (`GM`) of the body, in m^3 s^-2.
    ///
    /// `g`: The gravitational constant, in m^3 kg^-1 s^-2.
    pub fn gravitational_parameter(&self, g: f64) -> f64 {
        g * self.mass
    }

    /// Gets the speed of a circular orbit skimming the surface, in m/s.
    ///
    /// Launch speeds above this value put the projectile on an orbital
    /// rather than a ballistic path.
    pub fn orbital_speed(&self, g: f64) -> f64 {
        (self.gravitational_parameter(g) / self.radius).sqrt()
    }

    /// Stops the body from rotating.
    pub fn stop_rotation(&mut self) {
        self.angular_velocity = 0.0;
    }
}

impl Default for Body {
    /// Returns the [Earth][crate::body_presets::earth], which every
    /// default configuration launches from.
    fn default() -> Self {
        crate::body_presets::earth()
    }
}
