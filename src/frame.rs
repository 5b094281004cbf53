//! Transforms between the surface-local frame and the inertial frame.
//!
//! The local frame at a point on the surface has its axes along the local
//! east, north and up directions, and it rotates with the body. The
//! inertial frame is centered on the body, does not rotate, and has the
//! body's rotation axis as its z-axis.
//!
//! Converting a velocity between the two involves both a rotation of the
//! basis and the velocity of the surface point itself, `ω × r`, which the
//! launch site carries along with the spinning body.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::{DMat3, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Body;

/// A point on the surface of the body, in planet-fixed coordinates.
///
/// Both angles are in radians. Latitude is positive north of the equator;
/// longitude is positive east of the inertial x-axis at time zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinates {
    /// The latitude, in radians, in `[-π/2, π/2]`.
    pub latitude: f64,
    /// The longitude, in radians.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a new set of coordinates from angles in radians.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a new set of coordinates from angles in degrees.
    ///
    /// # Example
    /// ```
    /// use ballistic_sim::Coordinates;
    ///
    /// let coords = Coordinates::from_degrees(90.0, 180.0);
    ///
    /// assert_eq!(coords.latitude, std::f64::consts::FRAC_PI_2);
    /// assert_eq!(coords.longitude, std::f64::consts::PI);
    /// ```
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude.to_radians(), longitude.to_radians())
    }

    /// Gets the latitude, in degrees.
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude.to_degrees()
    }

    /// Gets the longitude, in degrees.
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude.to_degrees()
    }

    /// Gets the angle between the north pole and this point, in radians.
    #[inline]
    pub fn colatitude(&self) -> f64 {
        FRAC_PI_2 - self.latitude
    }

    /// Gets the unit vector pointing from the center of the body to this
    /// point, in the inertial frame at time zero.
    pub fn up(&self) -> DVec3 {
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        let (sin_lon, cos_lon) = self.longitude.sin_cos();

        DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Gets the inertial position of this point on a sphere of the given
    /// radius, at time zero.
    pub fn to_position(&self, radius: f64) -> DVec3 {
        radius * self.up()
    }

    /// Gets the coordinates of the point directly beneath an inertial
    /// position, at time zero.
    ///
    /// The origin maps to latitude 90°, and points on the z-axis map to
    /// longitude 0, so that this never returns NaN.
    ///
    /// # Example
    /// ```
    /// use ballistic_sim::Coordinates;
    ///
    /// let coords = Coordinates::from_degrees(30.0, -60.0);
    /// let round_trip = Coordinates::from_position(coords.to_position(10.0));
    ///
    /// assert!((round_trip.latitude - coords.latitude).abs() < 1e-12);
    /// assert!((round_trip.longitude - coords.longitude).abs() < 1e-12);
    /// ```
    pub fn from_position(position: DVec3) -> Self {
        let length = position.length();

        let colatitude = if length == 0.0 {
            0.0
        } else {
            (position.z / length).clamp(-1.0, 1.0).acos()
        };

        let longitude = if position.x == 0.0 && position.y == 0.0 {
            0.0
        } else {
            position.y.atan2(position.x)
        };

        Self::new(FRAC_PI_2 - colatitude, longitude)
    }

    /// Checks that both angles are finite and the latitude is in range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= FRAC_PI_2
    }

    /// Gets the squared angular separation between two points as seen by
    /// the landing error: squared colatitude difference plus squared
    /// longitude difference, with the latter wrapped into `[-π, π)`.
    pub fn squared_separation(&self, other: &Self) -> f64 {
        let d_colat = self.colatitude() - other.colatitude();
        let d_lon = wrap_angle(self.longitude - other.longitude);

        d_colat * d_colat + d_lon * d_lon
    }
}

/// Wraps an angle into `[-π, π)`.
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Builds the matrix whose rows are the local east, north and up unit
/// vectors expressed in inertial coordinates.
///
/// Multiplying an inertial vector by this matrix expresses it in the local
/// frame; multiplying a local vector by its transpose goes the other way.
pub fn rotation_matrix(coords: Coordinates) -> DMat3 {
    let (sin_lat, cos_lat) = coords.latitude.sin_cos();
    let (sin_lon, cos_lon) = coords.longitude.sin_cos();

    let east = DVec3::new(-sin_lon, cos_lon, 0.0);
    let north = DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

    // glam matrices are column-major, so the rows go in as columns of the
    // transpose
    DMat3::from_cols(east, north, up).transpose()
}

/// Gets the inertial velocity of a point on the surface of a spinning body.
///
/// This is `ω × r`, where `ω` is the body's angular velocity vector along
/// the z-axis and `r` is the point's position on the surface.
pub fn surface_velocity(body: &Body, coords: Coordinates) -> DVec3 {
    DVec3::new(0.0, 0.0, body.angular_velocity).cross(coords.to_position(body.radius))
}

/// Converts a velocity from the local frame at `coords` into the inertial
/// frame.
///
/// The local velocity is relative to the ground; the result includes the
/// velocity of the ground itself.
pub fn to_inertial(body: &Body, coords: Coordinates, local: DVec3) -> DVec3 {
    rotation_matrix(coords).transpose() * local + surface_velocity(body, coords)
}

/// Converts an inertial velocity into the local frame at `coords`.
///
/// This is the exact inverse of [`to_inertial`] for the same body and
/// coordinates.
pub fn to_local(body: &Body, coords: Coordinates, inertial: DVec3) -> DVec3 {
    rotation_matrix(coords) * (inertial - surface_velocity(body, coords))
}

/// Gets the initial bearing of the great circle from `from` to `to`, in
/// radians, measured clockwise from north.
///
/// # Source
/// The usual forward azimuth formula:
///
/// ```text
/// θ = atan2(sin Δλ · cos φ2, cos φ1 · sin φ2 − sin φ1 · cos φ2 · cos Δλ)
/// ```
///
/// ...where `φ` are latitudes and `Δλ` is the difference in longitude.
pub fn forward_azimuth(from: Coordinates, to: Coordinates) -> f64 {
    let d_lon = to.longitude - from.longitude;
    let (sin_lat1, cos_lat1) = from.latitude.sin_cos();
    let (sin_lat2, cos_lat2) = to.latitude.sin_cos();

    (d_lon.sin() * cos_lat2).atan2(cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * d_lon.cos())
}

/// Gets the direction of the great circle from `from` to `to` as an east
/// angle: counterclockwise from local east, in `[0, 2π)` radians.
///
/// # Example
/// ```
/// use ballistic_sim::{frame, Coordinates};
///
/// let from = Coordinates::from_degrees(0.0, 0.0);
/// let north = Coordinates::from_degrees(10.0, 0.0);
///
/// let angle = frame::initial_east_angle(from, north);
/// assert!((angle.to_degrees() - 90.0).abs() < 1e-9);
/// ```
pub fn initial_east_angle(from: Coordinates, to: Coordinates) -> f64 {
    (FRAC_PI_2 - forward_azimuth(from, to)).rem_euclid(TAU)
}
