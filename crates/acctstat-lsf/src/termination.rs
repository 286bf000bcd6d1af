//! LSF termination reasons.
//!
//! When a job is terminated, LSF logs a numeric reason (`exitInfo`). The
//! names match `lsbatch.h` and are what existing reports key on.

use serde::Serialize;

/// Termination reason for a finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TerminationInfo {
    /// Reason code, for example 5
    pub code: i32,
    /// Symbolic name, for example `TERM_RUNLIMIT`
    pub name: &'static str,
    /// Description from the LSF documentation
    pub description: &'static str,
}

impl TerminationInfo {
    /// Whether the job ended for a reason other than normal completion.
    pub fn is_failure(&self) -> bool {
        self.code > 0
    }
}

impl Default for TerminationInfo {
    fn default() -> Self {
        UNKNOWN
    }
}

const fn term(code: i32, name: &'static str, description: &'static str) -> TerminationInfo {
    TerminationInfo {
        code,
        name,
        description,
    }
}

/// Returned for codes with no entry of their own.
const UNKNOWN: TerminationInfo = term(
    0,
    "TERM_UNKNOWN",
    "LSF cannot determine a termination reason.0 is logged but TERM_UNKNOWN is not displayed (0)",
);

/// Every termination code LSF documents, in code order.
pub const TERMINATION_CODES: [TerminationInfo; 25] = [
    term(-1, "TERM_UNTERMINATED", "Job was not terminaed"),
    UNKNOWN,
    term(1, "TERM_PREEMPT", "Job killed after preemption (1)"),
    term(2, "TERM_WINDOW", "Job killed after queue run window closed (2)"),
    term(3, "TERM_LOAD", "Job killed after load exceeds threshold (3)"),
    term(4, "TERM_OTHER", "NOT SPECIFIED"),
    term(5, "TERM_RUNLIMIT", "Job killed after reaching LSF run time limit (5)"),
    term(6, "TERM_DEADLINE", "Job killed after deadline expires (6)"),
    term(7, "TERM_PROCESSLIMIT", "Job killed after reaching LSF process limit (7)"),
    term(8, "TERM_FORCE_OWNER", "Job killed by owner without time for cleanup (8)"),
    term(
        9,
        "TERM_FORCE_ADMIN",
        "Job killed by root or LSF administrator without time for cleanup (9)",
    ),
    term(10, "TERM_REQUEUE_OWNER", "Job killed and requeued by owner (10)"),
    term(
        11,
        "TERM_REQUEUE_ADMIN",
        "Job killed and requeued by root or LSF administrator (11)",
    ),
    term(12, "TERM_CPULIMIT", "Job killed after reaching LSF CPU usage limit (12)"),
    term(13, "TERM_CHKPNT", "Job killed after checkpointing (13)"),
    term(14, "TERM_OWNER", "Job killed by owner (14)"),
    term(15, "TERM_ADMIN", "Job killed by root or LSF administrator (15)"),
    term(16, "TERM_MEMLIMIT", "Job killed after reaching LSF memory usage limit (16)"),
    term(17, "TERM_EXTERNAL_SIGNAL", "Job killed by a signal external to LSF (17)"),
    term(18, "TERM_RMS", "NOT SPECIFIED"),
    term(19, "TERM_ZOMBIE", "Job exited while LSF is not available (19)"),
    term(20, "TERM_SWAP", "Job killed after reaching LSF swap usage limit (20)"),
    term(21, "TERM_THREADLIMIT", "Job killed after reaching LSF thread limit (21)"),
    term(
        22,
        "TERM_SLURM",
        "Job terminated abnormally in SLURM (node failure) (22)",
    ),
    term(23, "TERM_BUCKET_KILL", "Job killed with bkill -b (23)"),
];

/// Resolve a termination code.
///
/// Codes without an entry resolve to `TERM_UNKNOWN`, code 0 included.
pub fn lookup(code: i32) -> TerminationInfo {
    TERMINATION_CODES
        .iter()
        .find(|info| info.code == code)
        .copied()
        .unwrap_or(UNKNOWN)
}
