use core::f64::consts::FRAC_PI_2;

use log::{info, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Coordinates, InverseSolution, LaunchVector, SolveError, TrajectorySolver};

/// One sample of the energy landscape: an elevation angle and the cheapest
/// way the inverse solver found to hit the target at that elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnergyCandidate {
    /// The elevation angle, in radians.
    pub elevation: f64,
    /// The inverse solve at that elevation.
    pub solution: InverseSolution,
    /// The kinetic energy of the launch, in joules.
    ///
    /// A launch that misses the target is worth nothing, so its energy is
    /// infinite.
    pub energy: f64,
}

/// Why the minimum-energy search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MinimizerTermination {
    /// The three candidate energies are within the energy tolerance.
    ToleranceReached,
    /// The new candidate was no cheaper than the worst one kept, or it
    /// didn't hit the target. The current minimum is kept.
    NoImprovement,
    /// The three candidates don't describe a usable parabola: the vertex
    /// is not finite or falls outside `(0, 90°)`.
    Degenerate,
    /// The iteration ceiling was reached.
    IterationLimit,
}

/// The cheapest launch found by
/// [`minimize_energy`][TrajectorySolver::minimize_energy].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnergySolution {
    /// The cheapest candidate.
    pub best: EnergyCandidate,
    /// The three candidates held when the search stopped, in no
    /// particular order.
    pub candidates: [EnergyCandidate; 3],
    /// Why the search stopped.
    pub termination: MinimizerTermination,
    /// How many inverse solves were run, seeds included.
    pub inverse_solves: u32,
}

impl EnergySolution {
    /// Gets the cheapest launch vector, in physical units.
    #[inline]
    pub fn launch(&self) -> LaunchVector {
        self.best.solution.launch
    }

    /// Gets the kinetic energy of the cheapest launch, in joules.
    #[inline]
    pub fn energy(&self) -> f64 {
        self.best.energy
    }
}

impl TrajectorySolver<'_> {
    /// Finds the launch that hits `target` from `site` with the least
    /// kinetic energy.
    ///
    /// `mass`: The mass of the projectile, in kilograms.
    ///
    /// # Algorithm
    /// This is a successive parabolic interpolation over the elevation
    /// angle. Every evaluation of the energy is a full inverse solve (see
    /// [`solve_for_elevation`][Self::solve_for_elevation]).
    ///
    /// 1. The three [`seed_elevations`][crate::SolverConfig::seed_elevations]
    ///    are solved.
    /// 2. While the spread of the three energies exceeds
    ///    [`energy_tolerance`][crate::SolverConfig::energy_tolerance], a
    ///    parabola is fitted through the three `(elevation, energy)` points
    ///    and its vertex is solved.
    /// 3. If the vertex is cheaper than the most expensive candidate, it
    ///    replaces it. Otherwise the current minimum is as good as it gets
    ///    and the search stops.
    ///
    /// # Limitations
    /// The search assumes a single minimum between the seeds. On a flat or
    /// non-convex landscape it may stop early and report the best seed.
    /// A seed that misses the target has no usable energy, so the parabola
    /// can't be fitted and the search stops with
    /// [`Degenerate`][MinimizerTermination::Degenerate]. If no seed hits
    /// the target, neither does [`best`][EnergySolution::best].
    ///
    /// One failed seed is enough for this. Newton can wander off from a
    /// poor seed and give up [`Stuck`][crate::SolverStatus::Stuck] at an
    /// absurd speed. Launching from (-30°, 20°) towards (-10°, 50°) does
    /// this, with the guess at about 2.85e11 m/s. That seed gets infinite
    /// energy, the vertex comes out NaN, and the search returns after only
    /// the three seed solves. [`best`][EnergySolution::best] is then the
    /// cheapest converged seed, which can be well above the true minimum.
    ///
    /// # Errors
    /// Malformed inputs are rejected; see [`SolveError`]. Stopping before
    /// the energy tolerance is reached is not an error: check
    /// [`termination`][EnergySolution::termination].
    pub fn minimize_energy(
        &self,
        site: Coordinates,
        target: Coordinates,
        mass: f64,
    ) -> Result<EnergySolution, SolveError> {
        self.validate_problem(site, target)?;

        if !(mass > 0.0 && mass.is_finite()) {
            return Err(SolveError::InvalidMass(mass));
        }

        let config = self.config;

        let mut candidates = config
            .seed_elevations
            .map(|elevation| self.candidate(site, target, elevation, mass));
        let mut inverse_solves = 3;
        let mut iterations = 0;

        for seed in &candidates {
            if !seed.solution.is_converged() {
                warn!(
                    "Seed elevation {}° did not hit the target ({:?})",
                    seed.elevation.to_degrees(),
                    seed.solution.status
                );
            }
        }

        let termination = loop {
            let (min, max) = extremes(&candidates);

            if candidates[max].energy - candidates[min].energy <= config.energy_tolerance {
                break MinimizerTermination::ToleranceReached;
            }

            if iterations >= config.max_minimizer_iterations {
                warn!("Energy minimization gave up after {iterations} iterations");
                break MinimizerTermination::IterationLimit;
            }
            iterations += 1;

            let elevation = parabolic_vertex(candidates.map(|c| (c.elevation, c.energy)));
            trace!("Parabolic vertex at {}°", elevation.to_degrees());

            if !(elevation.is_finite() && elevation > 0.0 && elevation < FRAC_PI_2) {
                warn!(
                    "Energy landscape has no usable minimum between the candidates (vertex at {}°)",
                    elevation.to_degrees()
                );
                break MinimizerTermination::Degenerate;
            }

            let candidate = self.candidate(site, target, elevation, mass);
            inverse_solves += 1;

            if !candidate.solution.is_converged() {
                warn!(
                    "Discarding elevation {}°: the target was not hit ({:?})",
                    elevation.to_degrees(),
                    candidate.solution.status
                );
                break MinimizerTermination::NoImprovement;
            }

            if candidate.energy < candidates[max].energy {
                candidates[max] = candidate;
            } else {
                warn!(
                    "The minimum has already been found, could not optimize until required energy tolerance"
                );
                break MinimizerTermination::NoImprovement;
            }
        };

        let (min, _) = extremes(&candidates);
        let best = candidates[min];

        info!(
            "Minimum energy {} J: speed {} m/s, east angle {}°, elevation {}° ({termination:?})",
            best.energy,
            best.solution.launch.speed,
            best.solution.launch.east_angle_degrees(),
            best.elevation.to_degrees()
        );

        Ok(EnergySolution {
            best,
            candidates,
            termination,
            inverse_solves,
        })
    }

    fn candidate(
        &self,
        site: Coordinates,
        target: Coordinates,
        elevation: f64,
        mass: f64,
    ) -> EnergyCandidate {
        let solution = self.solve_unchecked(site, target, elevation);
        let energy = if solution.is_converged() {
            solution.launch.kinetic_energy(mass)
        } else {
            f64::INFINITY
        };

        EnergyCandidate {
            elevation,
            solution,
            energy,
        }
    }
}

/// Gets the indices of the cheapest and the most expensive candidates.
///
/// Ties go to the lowest index.
fn extremes(candidates: &[EnergyCandidate; 3]) -> (usize, usize) {
    let mut min = 0;
    let mut max = 0;

    for (i, candidate) in candidates.iter().enumerate().skip(1) {
        if candidate.energy < candidates[min].energy {
            min = i;
        }
        if candidate.energy > candidates[max].energy {
            max = i;
        }
    }

    (min, max)
}

/// Gets the abscissa of the vertex of the parabola through three points.
///
/// With the divided differences
///
/// ```text
/// d01 = (y0 - y1) / (x0 - x1)
/// d02 = (y0 - y2) / (x0 - x2)
/// a   = (d01 - d02) / (x1 - x2)
/// ```
///
/// ...the parabola is `y0 + d01 (x - x0) + a (x - x0)(x - x1)`, whose
/// derivative vanishes at `(x0 + x1 - d01 / a) / 2`.
///
/// Collinear points give `a = 0` and a non-finite vertex. For a concave
/// parabola (`a < 0`) this is the maximum rather than the minimum.
pub(crate) fn parabolic_vertex(points: [(f64, f64); 3]) -> f64 {
    let [(x0, y0), (x1, y1), (x2, y2)] = points;

    let d01 = (y0 - y1) / (x0 - x1);
    let d02 = (y0 - y2) / (x0 - x2);
    let a = (d01 - d02) / (x1 - x2);

    (-d01 / a + x0 + x1) / 2.0
}
