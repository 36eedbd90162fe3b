//! Epsilon-greedy multi-armed bandit over candidate mutation rates
//!
//! The environment is stateless: each feedback event is an immediate reward for
//! the arm that produced the plan, and Q-values move toward it by a fixed step.
//! The Q-table is the whole state, so it serialises and restores losslessly.

use crate::io::configuration::{BANDIT_ACTIONS, BANDIT_ALPHA, BANDIT_EPSILON};
use crate::io::error::{FloorplanError, Result, invalid_parameter};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

// Rates are compared by value after a JSON round trip
const RATE_TOLERANCE: f64 = 1e-9;

/// One bandit arm: a mutation rate and its estimated reward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arm {
    /// Mutation rate this arm selects
    pub rate: f64,
    /// Estimated value (Q-value)
    pub value: f64,
}

/// Bandit learning which mutation rate yields preferred layouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRateBandit {
    arms: Vec<Arm>,
    alpha: f64,
    epsilon: f64,
}

impl Default for MutationRateBandit {
    fn default() -> Self {
        Self {
            arms: BANDIT_ACTIONS
                .iter()
                .map(|&rate| Arm { rate, value: 0.0 })
                .collect(),
            alpha: BANDIT_ALPHA,
            epsilon: BANDIT_EPSILON,
        }
    }
}

impl MutationRateBandit {
    /// Create a bandit with zeroed Q-values for each rate
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `actions` is empty or contains a rate outside `[0, 1]`
    /// - `alpha` is outside `(0, 1]`
    /// - `epsilon` is outside `[0, 1]`
    pub fn new(actions: &[f64], alpha: f64, epsilon: f64) -> Result<Self> {
        if actions.is_empty() {
            return Err(invalid_parameter(
                "actions",
                &"[]",
                &"at least one mutation rate is required",
            ));
        }
        if let Some(rate) = actions.iter().find(|r| !(0.0..=1.0).contains(*r)) {
            return Err(invalid_parameter(
                "actions",
                rate,
                &"mutation rates must lie in [0, 1]",
            ));
        }
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(invalid_parameter(
                "alpha",
                &alpha,
                &"learning rate must lie in (0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(invalid_parameter(
                "epsilon",
                &epsilon,
                &"exploration probability must lie in [0, 1]",
            ));
        }

        Ok(Self {
            arms: actions
                .iter()
                .map(|&rate| Arm { rate, value: 0.0 })
                .collect(),
            alpha,
            epsilon,
        })
    }

    /// Current arms with their Q-values
    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    /// Q-value of the arm for `rate`
    pub fn q_value(&self, rate: f64) -> Option<f64> {
        self.arm(rate).map(|arm| arm.value)
    }

    /// Learning rate
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Exploration probability
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Epsilon-greedy choice; ties among maximal arms are broken uniformly
    ///
    /// Does not modify the Q-table.
    pub fn choose_action<R: Rng>(&self, rng: &mut R) -> f64 {
        if rng.random::<f64>() < self.epsilon {
            return self.arms.choose(rng).map_or(0.0, |arm| arm.rate);
        }

        let best = self.max_value();
        let maximizers: Vec<f64> = self
            .arms
            .iter()
            .filter(|arm| arm.value == best)
            .map(|arm| arm.rate)
            .collect();
        maximizers.choose(rng).copied().unwrap_or(0.0)
    }

    /// Move the arm's Q-value toward `reward` by one learning step
    ///
    /// # Errors
    ///
    /// Returns an error if `action` is not one of the bandit's rates
    pub fn update(&mut self, action: f64, reward: f64) -> Result<()> {
        let alpha = self.alpha;
        let arm = self
            .arms
            .iter_mut()
            .find(|arm| (arm.rate - action).abs() < RATE_TOLERANCE)
            .ok_or(FloorplanError::UnknownAction { rate: action })?;
        arm.value += alpha * (reward - arm.value);
        Ok(())
    }

    /// Greedy rate without exploration; the first maximal arm wins ties
    pub fn best_rate(&self) -> f64 {
        let best = self.max_value();
        self.arms
            .iter()
            .find(|arm| arm.value == best)
            .map_or(0.0, |arm| arm.rate)
    }

    fn arm(&self, rate: f64) -> Option<&Arm> {
        self.arms
            .iter()
            .find(|arm| (arm.rate - rate).abs() < RATE_TOLERANCE)
    }

    fn max_value(&self) -> f64 {
        self.arms
            .iter()
            .map(|arm| arm.value)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
