use loan_eligibility::advice::{personalized_tips, ImprovementTip};
use loan_eligibility::config::AppConfig;
use loan_eligibility::eligibility::{BorrowerProfile, EligibilityResult, EligibilityScorer};
use loan_eligibility::lenders::{LenderDirectory, LenderRecord};
use loan_eligibility::session::{AssessmentSession, KeyValueStore, SessionError, StoredAssessment};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Presentation-side facade: scores, persists, and reads back through an injected store.
pub(crate) struct EligibilityService<S> {
    scorer: EligibilityScorer,
    session: AssessmentSession<S>,
    directory: LenderDirectory,
}

#[derive(Debug, Serialize)]
pub(crate) struct LenderComparison {
    pub(crate) score: Option<u8>,
    pub(crate) lenders: Vec<LenderRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImprovementsView {
    pub(crate) score: Option<u8>,
    pub(crate) tips: Vec<ImprovementTip>,
}

impl<S: KeyValueStore> EligibilityService<S> {
    pub(crate) fn new(store: S, directory: LenderDirectory) -> Self {
        Self {
            scorer: EligibilityScorer::new(),
            session: AssessmentSession::new(store),
            directory,
        }
    }

    pub(crate) fn from_config(config: &AppConfig, store: S) -> Self {
        let directory = LenderDirectory::load_or_empty(config.storage.lenders_path.as_deref());
        Self::new(store, directory)
    }

    pub(crate) fn score(&self, profile: &BorrowerProfile) -> EligibilityResult {
        self.scorer.score(profile)
    }

    pub(crate) fn score_and_store(
        &self,
        profile: &BorrowerProfile,
    ) -> Result<EligibilityResult, SessionError> {
        let result = self.scorer.score(profile);
        self.session.save(profile, &result)?;
        Ok(result)
    }

    /// Scores and stores, logging rather than failing when the slot cannot be written.
    pub(crate) fn score_and_try_store(&self, profile: &BorrowerProfile) -> EligibilityResult {
        let result = self.scorer.score(profile);
        if let Err(error) = self.session.save(profile, &result) {
            warn!(%error, "assessment computed but not stored");
        }
        result
    }

    pub(crate) fn stored(&self) -> Result<Option<StoredAssessment>, SessionError> {
        self.session.load()
    }

    pub(crate) fn reset(&self) -> Result<(), SessionError> {
        self.session.reset()
    }

    /// Uses `score` when given, the stored score otherwise.
    pub(crate) fn lender_comparison(&self, score: Option<u8>) -> LenderComparison {
        // A stored score of 0 is a real score and filters; only a missing slot lists everyone.
        let score = score.or_else(|| self.session.load_or_none().map(|stored| stored.score));
        let lenders = self
            .directory
            .eligible_for(score)
            .into_iter()
            .cloned()
            .collect();
        LenderComparison { score, lenders }
    }

    pub(crate) fn improvements(&self) -> ImprovementsView {
        let stored = self.session.load_or_none();
        ImprovementsView {
            score: stored.as_ref().map(|assessment| assessment.score),
            tips: personalized_tips(stored.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_eligibility::session::{InMemoryStore, STORAGE_KEY};

    fn service() -> EligibilityService<InMemoryStore> {
        let directory = LenderDirectory::bundled().expect("bundled fixture");
        EligibilityService::new(InMemoryStore::default(), directory)
    }

    #[test]
    fn comparison_prefers_explicit_score_over_stored() {
        let service = service();
        let profile = BorrowerProfile::new(30, 90_000.0, 0.0, "Excellent", "Citizen");
        service.score_and_store(&profile).expect("stored");

        let comparison = service.lender_comparison(Some(45));
        assert_eq!(comparison.score, Some(45));
        assert!(comparison
            .lenders
            .iter()
            .all(|lender| lender.min_score_needed <= 45));
    }

    #[test]
    fn comparison_without_any_score_lists_everyone() {
        let service = service();
        let comparison = service.lender_comparison(None);
        assert!(comparison.score.is_none());
        assert_eq!(comparison.lenders.len(), service.directory.len());
    }

    #[test]
    fn stored_zero_score_still_filters() {
        let service = service();
        let slot = r#"{"age":0,"income":0,"debts":0,"credit":"","residency":"","score":0}"#;
        service
            .session
            .store()
            .set(STORAGE_KEY, slot)
            .expect("slot written");

        let comparison = service.lender_comparison(None);
        assert_eq!(comparison.score, Some(0));
        assert!(comparison.lenders.is_empty());
    }

    #[test]
    fn scoring_without_store_leaves_slot_untouched() {
        let service = service();
        let profile = BorrowerProfile::new(30, 90_000.0, 0.0, "Excellent", "Citizen");
        service.score(&profile);
        assert!(service.stored().expect("readable").is_none());
    }
}
