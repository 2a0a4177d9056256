//! Step counter and elapsed simulated time.
//!
//! Steps are driven by the caller with an explicit `delta_time`, so the
//! clock only records what it was told: how many steps ran and how many
//! simulated seconds they covered.

use std::fmt;

/// Index of a simulation step, starting at zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepIndex(pub u64);

impl StepIndex {
    pub const ZERO: StepIndex = StepIndex(0);

    #[inline]
    pub fn next(self) -> StepIndex {
        StepIndex(self.0 + 1)
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Tracks the current step and accumulated simulated seconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepClock {
    /// The step that will run next.
    pub current_step: StepIndex,
    /// Sum of every `delta_time` passed to [`advance`](Self::advance).
    pub elapsed_secs: f64,
}

impl StepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed step of `delta_secs` simulated seconds.
    #[inline]
    pub fn advance(&mut self, delta_secs: f32) {
        self.current_step = self.current_step.next();
        self.elapsed_secs += delta_secs as f64;
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_step, self.elapsed_secs)
    }
}
