//! Single-slot persistence for the most recent assessment.
//!
//! The calculator writes the slot after every calculation and the lender and advice views
//! read it back, so they can personalise output without rescoring.

mod store;

pub use store::{FileStore, InMemoryStore, KeyValueStore, StoreError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::eligibility::lenient;
use crate::eligibility::{BorrowerProfile, CreditRating, EligibilityResult, ResidencyStatus};

/// Key of the slot holding the last assessment.
pub const STORAGE_KEY: &str = "loanEligibility";

/// Profile fields plus score, laid out as the slot has always been stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAssessment {
    #[serde(default, deserialize_with = "lenient::age")]
    pub age: i32,
    /// `null` when the amount was never usable.
    #[serde(default = "lenient::unknown_amount", deserialize_with = "lenient::amount")]
    pub income: f64,
    #[serde(default = "lenient::unknown_amount", deserialize_with = "lenient::amount")]
    pub debts: f64,
    #[serde(default, deserialize_with = "lenient::credit")]
    pub credit: CreditRating,
    #[serde(default, deserialize_with = "lenient::residency")]
    pub residency: ResidencyStatus,
    pub score: u8,
}

impl StoredAssessment {
    pub fn new(profile: &BorrowerProfile, result: &EligibilityResult) -> Self {
        Self {
            age: profile.age,
            income: profile.income,
            debts: profile.monthly_debt,
            credit: profile.credit_rating.clone(),
            residency: profile.residency_status.clone(),
            score: result.score,
        }
    }

    pub fn profile(&self) -> BorrowerProfile {
        BorrowerProfile {
            age: self.age,
            income: self.income,
            monthly_debt: self.debts,
            credit_rating: self.credit.clone(),
            residency_status: self.residency.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored assessment is unreadable: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("unable to encode assessment: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Reads and writes the assessment slot through an injected store.
pub struct AssessmentSession<S> {
    store: S,
}

impl<S: KeyValueStore> AssessmentSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrites the slot with the latest profile and score.
    pub fn save(
        &self,
        profile: &BorrowerProfile,
        result: &EligibilityResult,
    ) -> Result<StoredAssessment, SessionError> {
        let assessment = StoredAssessment::new(profile, result);
        let encoded = serde_json::to_string(&assessment).map_err(SessionError::Encode)?;
        self.store.set(STORAGE_KEY, &encoded)?;
        debug!(score = assessment.score, "assessment stored");
        Ok(assessment)
    }

    pub fn load(&self) -> Result<Option<StoredAssessment>, SessionError> {
        match self.store.get(STORAGE_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(SessionError::Corrupt),
            None => Ok(None),
        }
    }

    /// Like [`load`](Self::load), but a missing store or corrupt slot reads as empty.
    pub fn load_or_none(&self) -> Option<StoredAssessment> {
        match self.load() {
            Ok(assessment) => assessment,
            Err(error) => {
                warn!(%error, "ignoring unreadable assessment slot");
                None
            }
        }
    }

    pub fn reset(&self) -> Result<(), SessionError> {
        self.store.clear(STORAGE_KEY)?;
        debug!("assessment cleared");
        Ok(())
    }
}
