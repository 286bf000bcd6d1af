//! LSF accounting record types.

use crate::termination::TerminationInfo;
use acctstat_parsers::serialize_seconds;
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::Serialize;
use std::time::Duration;

/// Resource usage counters logged for a job.
///
/// These are passed through as logged. LSF writes -1 when a value is
/// unavailable; sizes are in KB. A token that is not a number is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceUsage {
    /// Maximum shared text size
    pub maxrss: Option<f64>,
    /// Integral of the shared text size over time (KB seconds)
    pub ixrss: Option<f64>,
    /// Integral of the shared memory size over time
    pub ismrss: Option<f64>,
    /// Integral of the unshared data size over time
    pub idrss: Option<f64>,
    /// Integral of the unshared stack size over time
    pub isrss: Option<f64>,
    /// Page reclaims
    pub minflt: Option<f64>,
    /// Page faults
    pub majflt: Option<f64>,
    /// Times the process was swapped out
    pub nswap: Option<f64>,
    /// Block input operations
    pub inblock: Option<f64>,
    /// Block output operations
    pub oublock: Option<f64>,
    /// Characters read and written
    pub ioch: Option<f64>,
    /// System V IPC messages sent
    pub msgsnd: Option<f64>,
    /// Messages received
    pub msgrcv: Option<f64>,
    /// Signals received
    pub nsignals: Option<f64>,
    /// Voluntary context switches
    pub nvcsw: Option<f64>,
    /// Involuntary context switches
    pub nivcsw: Option<f64>,
    /// Exact user time used
    pub exutime: Option<f64>,
}

/// A `JOB_FINISH` event from `lsb.acct`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobFinishRecord {
    /// Always `JOB_FINISH`
    pub event_type: String,

    /// Log format version (the LSF version of the cluster)
    pub version: String,

    /// When the event was logged, i.e. when the job finished
    pub event_time: DateTime<Utc>,

    /// LSF job ID
    pub job_id: i64,

    /// Numeric user ID of the job owner
    pub user_id: i32,

    /// Job submission option bit flags
    pub options: Option<i64>,

    /// Processors initially requested
    pub num_processors: i32,

    /// Submit time
    pub submit_time: DateTime<Utc>,

    /// The job should start at or after this time
    pub begin_time: DateTime<Utc>,

    /// Termination deadline
    pub term_time: DateTime<Utc>,

    /// Start time. Set to `term_time` for jobs that never started.
    pub start_time: DateTime<Utc>,

    pub user_name: String,
    pub queue: String,

    /// Resource requirement string
    pub res_req: String,

    /// Dependency condition
    pub depend_cond: String,

    pub pre_exec_cmd: String,

    /// Submission host
    pub from_host: String,

    /// Working directory
    pub cwd: String,

    pub in_file: String,
    pub out_file: String,
    pub err_file: String,
    pub job_file: String,

    /// Hosts to which dispatching was limited
    pub asked_hosts: Vec<String>,

    /// Execution hosts at job finish
    pub exec_hosts: Vec<String>,

    /// Job status (32 = EXIT, 64 = DONE)
    pub job_status: i32,

    /// CPU factor of the first execution host
    pub host_factor: f64,

    pub job_name: String,

    /// Complete batch command as submitted
    pub command: String,

    /// User CPU time
    #[serde(serialize_with = "serialize_duration")]
    pub utime: Duration,

    /// System CPU time
    #[serde(serialize_with = "serialize_duration")]
    pub stime: Duration,

    pub usage: ResourceUsage,

    /// User that job mail was sent to
    pub mail_user: String,

    pub project_name: String,

    /// UNIX exit status
    pub exit_status: i32,

    /// Maximum processors specified
    pub max_num_processors: i32,

    pub login_shell: String,
    pub time_event: Option<i64>,

    /// Job array index
    pub idx: Option<i64>,

    /// Maximum resident memory (KB)
    pub max_r_mem: Option<i64>,

    /// Maximum swap (KB)
    pub max_r_swap: Option<i64>,

    pub in_file_spool: String,
    pub command_spool: String,

    /// Advance reservation ID
    pub rsv_id: String,

    /// Service class
    pub sla: String,

    pub except_mask: Option<i64>,
    pub additional_info: String,

    /// Why the job ended
    pub termination: TerminationInfo,

    pub warning_action: String,
    pub warning_time_period: Option<i64>,

    /// Share attribute account path charged under fair share
    pub charged_saap: String,

    pub license_project: String,

    /// Time between start and finish, zero if the job never started
    #[serde(serialize_with = "serialize_seconds")]
    pub run_time: TimeDelta,

    /// Time spent pending
    #[serde(serialize_with = "serialize_seconds")]
    pub wait_time: TimeDelta,
}

impl JobFinishRecord {
    /// Alias of `wait_time`.
    pub fn pend_time(&self) -> TimeDelta {
        self.wait_time
    }

    /// Wall time multiplied by the processors requested.
    pub fn cpu_time(&self) -> TimeDelta {
        self.run_time
            .checked_mul(self.num_processors)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Whether the job ended abnormally.
    pub fn is_failed(&self) -> bool {
        self.termination.is_failure()
    }

    /// Program name: the first word of the command with any directory stripped.
    pub fn command_name(&self) -> &str {
        let program = self.command.split(' ').next().unwrap_or_default();
        program.rsplit('/').next().unwrap_or(program)
    }

    /// Submit month as "YYYY-M" (month not zero-padded).
    pub fn submit_month(&self) -> String {
        format!("{}-{}", self.submit_time.year(), self.submit_time.month())
    }
}

fn serialize_duration<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
