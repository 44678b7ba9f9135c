use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use super::domain::{
    ApplicantStageOne, ApplicantStageTwo, EligibilityDecision, OccupationType, OrganizationType,
};

/// Bounded lookup table of previously computed decisions.
///
/// Entries are evicted oldest-first once `capacity` is reached. A capacity of zero
/// disables caching entirely.
#[derive(Debug, Clone)]
pub struct DecisionCache<K> {
    capacity: usize,
    entries: HashMap<K, EligibilityDecision>,
    order: VecDeque<K>,
}

impl<K> DecisionCache<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<EligibilityDecision> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: K, decision: EligibilityDecision) {
        if self.capacity == 0 {
            return;
        }

        if self.entries.insert(key.clone(), decision).is_some() {
            return;
        }

        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    /// Cached decision for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: K, compute: F) -> EligibilityDecision
    where
        F: FnOnce() -> EligibilityDecision,
    {
        if let Some(decision) = self.get(&key) {
            return decision;
        }
        let decision = compute();
        self.insert(key, decision);
        decision
    }
}

/// Hashable bit pattern of a decimal input; `-0.0` and `0.0` share a key.
fn decimal_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageOneKey {
    income: u64,
    credit_score: u64,
}

impl From<&ApplicantStageOne> for StageOneKey {
    fn from(applicant: &ApplicantStageOne) -> Self {
        Self {
            income: decimal_key(applicant.income),
            credit_score: applicant.credit_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageTwoKey {
    age: u32,
    credit_amount: u64,
    organization_type: OrganizationType,
    days_registration: u32,
    days_id_publish: u32,
    occupation_type: OccupationType,
    loan_annuity: u64,
}

impl From<&ApplicantStageTwo> for StageTwoKey {
    fn from(applicant: &ApplicantStageTwo) -> Self {
        Self {
            age: applicant.age,
            credit_amount: decimal_key(applicant.credit_amount),
            organization_type: applicant.organization_type,
            days_registration: applicant.days_registration,
            days_id_publish: applicant.days_id_publish,
            occupation_type: applicant.occupation_type,
            loan_annuity: decimal_key(applicant.loan_annuity),
        }
    }
}
