use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::artifact::ArtifactHandle;
use super::cache::{DecisionCache, StageOneKey, StageTwoKey};
use super::domain::{ApplicantStageOne, ApplicantStageTwo, EligibilityDecision};
use super::rules::{self, StageTwoDisjunct};

pub const DEFAULT_DECISION_CACHE_CAPACITY: usize = 256;

/// Tuning for the engine's memoization tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub decision_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decision_cache_capacity: DEFAULT_DECISION_CACHE_CAPACITY,
        }
    }
}

/// Unexpected failure while computing a decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error in eligibility prediction: {0}")]
pub struct PredictionError(pub String);

/// Result of the final confirmation, with any artifact problem to show alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalAssessment {
    pub decision: EligibilityDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_warning: Option<String>,
}

/// Rule evaluator holding the per-process decision tables and the loaded artifact.
pub struct EligibilityEngine {
    artifact: ArtifactHandle,
    stage_one_cache: Mutex<DecisionCache<StageOneKey>>,
    stage_two_cache: Mutex<DecisionCache<StageTwoKey>>,
}

impl EligibilityEngine {
    pub fn new(artifact: ArtifactHandle, config: EngineConfig) -> Self {
        Self {
            artifact,
            stage_one_cache: Mutex::new(DecisionCache::new(config.decision_cache_capacity)),
            stage_two_cache: Mutex::new(DecisionCache::new(config.decision_cache_capacity)),
        }
    }

    pub fn artifact(&self) -> &ArtifactHandle {
        &self.artifact
    }

    pub fn initial_decision(
        &self,
        applicant: &ApplicantStageOne,
    ) -> Result<EligibilityDecision, PredictionError> {
        let mut cache = self.stage_one_cache.lock().map_err(|_| {
            error!("stage one decision cache poisoned");
            PredictionError("initial decision cache unavailable".to_string())
        })?;

        let decision = cache.get_or_insert_with(StageOneKey::from(applicant), || {
            rules::decide_stage_one(applicant.income, applicant.credit_score)
        });
        debug!(%decision, "initial eligibility decided");
        Ok(decision)
    }

    pub fn final_decision(
        &self,
        applicant: &ApplicantStageTwo,
    ) -> Result<FinalAssessment, PredictionError> {
        // The rules never read the artifact, so an unavailable one is reported, not fatal.
        let artifact_warning = self.artifact.error().map(|err| {
            error!(error = %err, "final eligibility computed without model artifact");
            err.to_string()
        });

        let mut cache = self.stage_two_cache.lock().map_err(|_| {
            error!("stage two decision cache poisoned");
            PredictionError("final decision cache unavailable".to_string())
        })?;

        let decision = cache.get_or_insert_with(StageTwoKey::from(applicant), || {
            rules::decide_stage_two(applicant)
        });
        debug!(%decision, "final eligibility decided");

        Ok(FinalAssessment {
            decision,
            artifact_warning,
        })
    }

    /// Clause that admitted the applicant, for audit output. Bypasses the cache.
    pub fn explain_final(&self, applicant: &ApplicantStageTwo) -> Option<StageTwoDisjunct> {
        rules::matching_disjunct(applicant)
    }

    pub fn cached_decisions(&self) -> (usize, usize) {
        let stage_one = self
            .stage_one_cache
            .lock()
            .map(|cache| cache.len())
            .unwrap_or(0);
        let stage_two = self
            .stage_two_cache
            .lock()
            .map(|cache| cache.len())
            .unwrap_or(0);
        (stage_one, stage_two)
    }
}

#[cfg(test)]
impl EligibilityEngine {
    /// Leaves both decision tables poisoned, as a panic mid-decision would.
    pub(crate) fn poison_caches(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _stage_one = self.stage_one_cache.lock();
            let _stage_two = self.stage_two_cache.lock();
            panic!("decision tables poisoned");
        }));
    }
}
