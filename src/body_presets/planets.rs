//! Presets for rocky worlds.
//!
//! "A terrestrial planet [...] is a planet that is composed primarily of
//! silicate, rocks or metals."
//!
//! \- [Wikipedia](https://en.wikipedia.org/wiki/Terrestrial_planet)

use crate::Body;

/// Returns the Earth.
///
/// The rotation rate is the sidereal one, rounded to three significant digits.
pub fn earth() -> Body {
    Body::new("Earth".to_string(), 5.972e24, 6.371e6, 7.29e-5)
}

/// Returns the Moon.
///
/// The Moon is tidally locked, so it spins once per sidereal month.
pub fn moon() -> Body {
    Body::new("The Moon".to_string(), 7.342e22, 1.7374e6, 2.6617e-6)
}

/// Returns Mars.
pub fn mars() -> Body {
    Body::new("Mars".to_string(), 6.4171e23, 3.3895e6, 7.088218e-5)
}
