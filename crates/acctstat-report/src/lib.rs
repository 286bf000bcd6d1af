//! Reports over LSF accounting records.
//!
//! Accumulate decoded job-finish records into per-queue and per-user usage
//! summaries, or into buckets keyed by any ordered set of job attributes.

pub mod buckets;
pub mod summary;

pub use buckets::{BucketKey, BucketReport, BucketTotals, ReportError};
pub use summary::{SummaryReport, UsageSummary, UsageTotals};

use chrono::TimeDelta;

/// Add two deltas, clamping at the representable range.
pub(crate) fn add_delta(a: TimeDelta, b: TimeDelta) -> TimeDelta {
    a.checked_add(&b).unwrap_or(if b < TimeDelta::zero() {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}
