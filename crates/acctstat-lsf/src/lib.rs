//! LSF accounting file support for acctstat.
//!
//! Decode `JOB_FINISH` events from `lsb.acct` into typed records.

pub mod decode;
pub mod layout;
pub mod reader;
pub mod termination;
pub mod types;

pub use decode::{decode_job_finish, DecodeError};
pub use layout::{Field, JOB_FINISH, JOB_FINISH_LAYOUT};
pub use reader::{AcctReader, ReadError};
pub use termination::{lookup, TerminationInfo, TERMINATION_CODES};
pub use types::{JobFinishRecord, ResourceUsage};
