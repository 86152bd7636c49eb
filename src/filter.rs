//! Pre-dispatch exception filtering.
//!
//! The host (or any collaborator) registers observers that inspect each
//! occurrence before dispatch and may veto its notification. Observers are
//! invoked synchronously in registration order; every observer always runs
//! and the dismiss votes are OR'd together.
//!
//! The chain is fail-open: an observer that errors or panics is logged and
//! counted as a non-dismissing vote. Suppressing an alert on an internal
//! fault would be worse than sending a possibly-redundant one.

use crate::error::FilterError;
use crate::occurrence::ExceptionOccurrence;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// A single observer's verdict on one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVote {
    /// Let the notification proceed.
    Keep,
    /// Suppress the notification for this occurrence.
    Dismiss,
}

/// Result of running the whole chain over one occurrence. Gates exactly one
/// dispatch and is not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDecision {
    pub dismissed: bool,
}

/// An observer that inspects occurrences and may veto their notification.
///
/// Implementations must be `Send + Sync`; the chain may be evaluated
/// concurrently from many host threads. Observers receive a shared reference
/// and cannot mutate the occurrence.
pub trait ExceptionFilter: Send + Sync {
    /// Name of this observer, used in logs when it fails.
    fn name(&self) -> &str;

    /// Inspect one occurrence and vote.
    fn inspect(&self, occurrence: &ExceptionOccurrence) -> Result<FilterVote, FilterError>;
}

/// Ordered set of registered filter observers.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn ExceptionFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Invocation order is registration order.
    pub fn register(&mut self, filter: Arc<dyn ExceptionFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every registered observer over the occurrence and OR their
    /// dismiss votes.
    ///
    /// No observer failure crashes the chain or the caller: errors and
    /// panics become Keep votes, logged and counted.
    pub fn evaluate(&self, occurrence: &ExceptionOccurrence) -> FilterDecision {
        let mut dismissed = false;

        for filter in &self.filters {
            let vote = catch_unwind(AssertUnwindSafe(|| filter.inspect(occurrence)));

            match vote {
                Ok(Ok(FilterVote::Dismiss)) => {
                    tracing::debug!(
                        filter = %filter.name(),
                        exception_type = %occurrence.exception_type,
                        "Filter dismissed occurrence"
                    );
                    dismissed = true;
                }
                Ok(Ok(FilterVote::Keep)) => {}
                Ok(Err(e)) => {
                    tracing::warn!(
                        filter = %filter.name(),
                        error = %e,
                        "Filter observer failed, treating as non-dismissing"
                    );
                    metrics::counter!(
                        "hipalert_filter_errors_total",
                        "filter" => filter.name().to_string()
                    )
                    .increment(1);
                }
                Err(_) => {
                    tracing::error!(
                        filter = %filter.name(),
                        "Filter observer panicked, treating as non-dismissing"
                    );
                    metrics::counter!(
                        "hipalert_filter_errors_total",
                        "filter" => filter.name().to_string()
                    )
                    .increment(1);
                }
            }
        }

        FilterDecision { dismissed }
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field(
                "filters",
                &self.filters.iter().map(|flt| flt.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
