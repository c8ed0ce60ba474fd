//! Shortage Source Interface
//!
//! Abstracts the remote lookup so the generator does not depend on HTTP.

use async_trait::async_trait;

use crate::summary::types::{QueryOutcome, TrackedKey};

/// Anything that can look up the latest state of a tracked key.
///
/// Implementations never fail: every problem is folded into a
/// [`QueryOutcome`] variant.
#[async_trait]
pub trait ShortageSource {
    async fn query(&self, key: TrackedKey) -> QueryOutcome;

    /// Name of this source for logging.
    fn source_name(&self) -> &str;
}
