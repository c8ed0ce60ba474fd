//! In-memory [`ShortageSource`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::summary::provider::ShortageSource;
use crate::summary::types::{QueryOutcome, ShortageRecord, TrackedKey};

/// Answers from a fixed table; unknown keys are `NotFound`.
#[derive(Debug, Default)]
pub struct MockShortageSource {
    outcomes: HashMap<TrackedKey, QueryOutcome>,
    calls: Mutex<Vec<TrackedKey>>,
}

impl MockShortageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, key: TrackedKey, outcome: QueryOutcome) -> Self {
        self.outcomes.insert(key, outcome);
        self
    }

    pub fn with_record(self, key: TrackedKey, record: ShortageRecord) -> Self {
        self.with_outcome(key, QueryOutcome::Success(record))
    }

    /// Keys queried so far, in call order.
    pub fn calls(&self) -> Vec<TrackedKey> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShortageSource for MockShortageSource {
    async fn query(&self, key: TrackedKey) -> QueryOutcome {
        self.calls.lock().unwrap().push(key);
        self.outcomes
            .get(&key)
            .cloned()
            .unwrap_or(QueryOutcome::NotFound)
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}
