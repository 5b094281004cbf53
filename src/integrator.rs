use core::ops::{Add, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A state that can be advanced by the [`Rk4`] integrator.
///
/// The integrator only needs to add states together and scale them, so
/// anything that behaves like a vector of reals qualifies: plain `f64`s,
/// glam vectors, or [`StateVectors`][crate::StateVectors].
pub trait Integrable: Copy + Add<Output = Self> + Mul<f64, Output = Self> {}

impl<T> Integrable for T where T: Copy + Add<Output = T> + Mul<f64, Output = T> {}

/// The outcome of one [`Rk4::solve`] run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rk4Solution<S> {
    /// The amount of steps that were taken.
    pub steps: u64,
    /// The step size that was used.
    pub step_size: f64,
    /// The state after the last step.
    pub final_state: S,
    /// Whether the run ended because the stop condition was met, rather
    /// than because the step budget ran out.
    pub stopped: bool,
}

impl<S> Rk4Solution<S> {
    /// Gets the amount of time covered by the run, i.e. `steps * step_size`.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.steps as f64 * self.step_size
    }
}

/// A classical fourth-order Runge-Kutta integrator with a fixed step.
///
/// There is no error control: the accuracy depends only on the step size.
/// Halving the step divides the global error by about 16, at twice the
/// cost.
///
/// # Time invariance
/// The derivative function receives the state only, never the time.
/// Only autonomous systems, whose dynamics don't depend explicitly on the
/// elapsed time, can be integrated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rk4 {
    step_size: f64,
}

impl Rk4 {
    /// Creates an integrator with the given fixed step.
    pub const fn new(step_size: f64) -> Self {
        Self { step_size }
    }

    /// Gets the step size of the integrator.
    #[inline]
    pub const fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Advances a state by a single step.
    ///
    /// With `h` the step size, this samples the derivative four times:
    ///
    /// ```text
    /// k1 = f(y)
    /// k2 = f(y + h/2 · k1)
    /// k3 = f(y + h/2 · k2)
    /// k4 = f(y + h · k3)
    /// ```
    ///
    /// ...and returns `y + h/6 · (k1 + 2·k2 + 2·k3 + k4)`.
    #[inline]
    pub fn step<S, D>(&self, state: S, derivative: &mut D) -> S
    where
        S: Integrable,
        D: FnMut(&S) -> S,
    {
        let h = self.step_size;
        let half_h = h * 0.5;

        let k1 = derivative(&state);
        let k2 = derivative(&(state + k1 * half_h));
        let k3 = derivative(&(state + k2 * half_h));
        let k4 = derivative(&(state + k3 * h));

        state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
    }

    /// Integrates from an initial state until a stop condition is met.
    ///
    /// The stop condition is checked after every step. The run also ends
    /// once `max_steps` steps have been taken; check
    /// [`stopped`][Rk4Solution::stopped] to tell the two apart.
    ///
    /// # Example
    /// ```
    /// use ballistic_sim::Rk4;
    ///
    /// // dx/dt = 1, from x = 0 until x >= 0.5
    /// let solution = Rk4::new(0.001).solve(0.0, |_: &f64| 1.0, 1005, |x: &f64| *x >= 0.5);
    ///
    /// assert!(solution.stopped);
    /// assert!((solution.final_state - 0.5).abs() < 1e-6);
    /// ```
    pub fn solve<S, D, P>(
        &self,
        initial: S,
        mut derivative: D,
        max_steps: u64,
        mut stop: P,
    ) -> Rk4Solution<S>
    where
        S: Integrable,
        D: FnMut(&S) -> S,
        P: FnMut(&S) -> bool,
    {
        let mut state = initial;
        let mut steps = 0;
        let mut stopped = false;

        while steps < max_steps {
            state = self.step(state, &mut derivative);
            steps += 1;

            if stop(&state) {
                stopped = true;
                break;
            }
        }

        Rk4Solution {
            steps,
            step_size: self.step_size,
            final_state: state,
            stopped,
        }
    }
}
