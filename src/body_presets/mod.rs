//! This module contains presets for the bodies a projectile can be
//! launched from.
//!
//! Every preset is a perfect sphere; oblateness is not modelled.

mod planets;

pub use planets::{earth, mars, moon};
