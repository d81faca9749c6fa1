//! The staged/committed storage cell behind every delayed parameter.
//!
//! A slot is `Idle` until something is staged. Staging records the value
//! together with the earliest commit time `now + delay + 1`; committing at or
//! after that time promotes the value and returns the slot to `Idle`.
//! Staging again while `Staged` replaces the pending value and restarts the
//! wait. The committed value never changes except through a commit.

use serde::{Deserialize, Serialize};
use vaultgov_types::Timestamp;

use crate::error::GovernanceError;

/// The earliest commit time for a change staged at `now`: `now + delay + 1`.
pub fn eligible_at(now: Timestamp, delay: u64) -> Result<Timestamp, GovernanceError> {
    now.checked_add(delay)
        .and_then(|t| t.checked_add(1))
        .ok_or(GovernanceError::ArithmeticOverflow { now, delay })
}

/// Whether a slot has a pending change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    Idle,
    Staged,
}

/// A pending change and the timestamp from which it may be committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedChange<V> {
    pub value: V,
    pub eligible_at: Timestamp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSlot<V> {
    committed: V,
    staged: Option<StagedChange<V>>,
}

impl<V: Clone + Default> ParameterSlot<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SlotState {
        match self.staged {
            Some(_) => SlotState::Staged,
            None => SlotState::Idle,
        }
    }

    /// Stage `value`, replacing any pending change.
    ///
    /// Returns the eligibility timestamp `now + delay + 1`. On overflow the
    /// slot is left untouched.
    pub fn stage(
        &mut self,
        value: V,
        now: Timestamp,
        delay: u64,
    ) -> Result<Timestamp, GovernanceError> {
        let eligible_at = eligible_at(now, delay)?;
        self.staged = Some(StagedChange { value, eligible_at });
        Ok(eligible_at)
    }

    /// Promote the pending change if `now` has reached its eligibility time.
    ///
    /// Returns the newly committed value.
    pub fn commit(&mut self, now: Timestamp) -> Result<&V, GovernanceError> {
        let eligible_at = match &self.staged {
            None => return Err(GovernanceError::NothingStaged),
            Some(change) => change.eligible_at,
        };
        if now < eligible_at {
            return Err(GovernanceError::DelayNotElapsed { now, eligible_at });
        }
        if let Some(change) = self.staged.take() {
            self.committed = change.value;
        }
        Ok(&self.committed)
    }

    pub fn committed(&self) -> &V {
        &self.committed
    }

    /// The pending value, or `V::default()` when idle.
    pub fn staged(&self) -> V {
        self.staged
            .as_ref()
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// The eligibility timestamp, or [`Timestamp::EPOCH`] when idle.
    pub fn staged_at(&self) -> Timestamp {
        self.staged
            .as_ref()
            .map(|c| c.eligible_at)
            .unwrap_or(Timestamp::EPOCH)
    }

    pub fn pending(&self) -> Option<&StagedChange<V>> {
        self.staged.as_ref()
    }
}
