//! Learning state that persists across generation runs
//!
//! A session owns the mutation rate bandit and writes it back to its store
//! after every feedback event, so each run starts from the latest Q-table.

use crate::algorithm::bandit::MutationRateBandit;
use crate::algorithm::evolution::MutationRateSource;
use crate::io::configuration::BANDIT_STORE_KEY;
use crate::io::error::Result;
use crate::io::store::Store;

/// Bandit state bound to the store it is persisted in
#[derive(Debug)]
pub struct Session<S: Store> {
    store: S,
    bandit: MutationRateBandit,
}

impl<S: Store> Session<S> {
    /// Restore the bandit from `store`, or start a fresh one
    ///
    /// # Errors
    ///
    /// Returns an error if stored state exists but cannot be decoded
    pub fn open(store: S) -> Result<Self> {
        let bandit = match store.load(BANDIT_STORE_KEY)? {
            Some(bandit) => {
                log::debug!("Restored bandit state");
                bandit
            }
            None => MutationRateBandit::default(),
        };
        Ok(Self { store, bandit })
    }

    /// Start over with `bandit`, replacing any stored state
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written
    pub fn reset(store: S, bandit: MutationRateBandit) -> Result<Self> {
        let mut session = Self { store, bandit };
        session.save()?;
        Ok(session)
    }

    /// Current bandit state
    pub const fn bandit(&self) -> &MutationRateBandit {
        &self.bandit
    }

    /// Backing store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutation rate source for the next generation run
    pub fn mutation_source(&self) -> MutationRateSource {
        MutationRateSource::Bandit(self.bandit.clone())
    }

    /// Reward the rate the generator currently uses and persist the update
    ///
    /// Returns the rewarded rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated state cannot be written
    pub fn record_feedback(&mut self, reward: f64) -> Result<f64> {
        let rate = self.bandit.best_rate();
        self.record_feedback_for(rate, reward)?;
        Ok(rate)
    }

    /// Reward a specific rate and persist the update
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is not a bandit arm or the state cannot be written
    pub fn record_feedback_for(&mut self, rate: f64, reward: f64) -> Result<()> {
        self.bandit.update(rate, reward)?;
        log::info!(
            "Recorded reward {reward} for mutation rate {rate}; Q = {:.4}",
            self.bandit.q_value(rate).unwrap_or_default()
        );
        self.save()
    }

    /// Write the bandit state to the store
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written
    pub fn save(&mut self) -> Result<()> {
        self.store.save(BANDIT_STORE_KEY, &self.bandit)
    }
}
