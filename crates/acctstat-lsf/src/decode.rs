//! Decode `JOB_FINISH` lines into [`JobFinishRecord`]s.
//!
//! Decoding walks [`JOB_FINISH_LAYOUT`] with a bounds-checked cursor. A line
//! either decodes completely or fails with the first bad field.

use crate::layout::{Field, JOB_FINISH, JOB_FINISH_LAYOUT};
use crate::termination::lookup;
use crate::types::JobFinishRecord;
use acctstat_parsers::{epoch_to_datetime, seconds_to_duration};
use chrono::{DateTime, TimeDelta, Utc};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Not a JOB_FINISH event: {0:?}")]
    WrongEventType(String),
    #[error("Line ends before {field}: expected {expected} more tokens, found {available}")]
    Truncated {
        field: &'static str,
        expected: usize,
        available: usize,
    },
    #[error("Malformed {field}: {value:?}")]
    MalformedField { field: &'static str, value: String },
}

/// Sequential reader over the tokens of one line.
struct Cursor<'a, S> {
    tokens: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> Cursor<'a, S> {
    fn new(tokens: &'a [S]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    fn next(&mut self, field: Field) -> Result<&'a str, DecodeError> {
        let token = self.tokens.get(self.pos).ok_or(DecodeError::Truncated {
            field: field.name(),
            expected: 1,
            available: 0,
        })?;
        self.pos += 1;
        Ok(token.as_ref())
    }

    fn text(&mut self, field: Field) -> Result<String, DecodeError> {
        self.next(field).map(str::to_string)
    }

    fn number<T: FromStr>(&mut self, field: Field) -> Result<T, DecodeError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| malformed(field, token))
    }

    /// A field passed through without interpretation. A token that does not
    /// parse is `None` rather than an error.
    fn opaque<T: FromStr>(&mut self, field: Field) -> Result<Option<T>, DecodeError> {
        let token = self.next(field)?;
        let value = token.parse().ok();
        if value.is_none() {
            tracing::debug!(field = field.name(), value = token, "Non-numeric field");
        }
        Ok(value)
    }

    fn epoch(&mut self, field: Field) -> Result<(f64, DateTime<Utc>), DecodeError> {
        let token = self.next(field)?;
        let epoch: f64 = token.parse().map_err(|_| malformed(field, token))?;
        let time = epoch_to_datetime(epoch).ok_or_else(|| malformed(field, token))?;
        Ok((epoch, time))
    }

    fn seconds(&mut self, field: Field) -> Result<Duration, DecodeError> {
        let token = self.next(field)?;
        token
            .parse::<f64>()
            .ok()
            .and_then(seconds_to_duration)
            .ok_or_else(|| malformed(field, token))
    }

    fn count(&mut self, field: Field) -> Result<usize, DecodeError> {
        let token = self.next(field)?;
        token
            .parse::<i64>()
            .ok()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| malformed(field, token))
    }

    fn hosts(&mut self, field: Field, count: usize) -> Result<Vec<String>, DecodeError> {
        let available = self.remaining();
        if count > available {
            return Err(DecodeError::Truncated {
                field: field.name(),
                expected: count,
                available,
            });
        }
        let hosts = self.tokens[self.pos..self.pos + count]
            .iter()
            .map(|h| h.as_ref().to_string())
            .collect();
        self.pos += count;
        Ok(hosts)
    }
}

fn malformed(field: Field, token: &str) -> DecodeError {
    DecodeError::MalformedField {
        field: field.name(),
        value: token.to_string(),
    }
}

/// Decode the tokens of one `JOB_FINISH` line.
///
/// Tokens past the last documented field are ignored; newer LSF versions
/// append fields to the event.
pub fn decode_job_finish<S: AsRef<str>>(tokens: &[S]) -> Result<JobFinishRecord, DecodeError> {
    let event_type = tokens.first().map(|t| t.as_ref()).unwrap_or_default();
    if event_type != JOB_FINISH {
        return Err(DecodeError::WrongEventType(event_type.to_string()));
    }

    let mut cur = Cursor::new(tokens);
    let mut rec = JobFinishRecord::default();
    let mut start_epoch = 0.0;
    let mut num_asked_hosts = 0;
    let mut num_ex_hosts = 0;

    for &field in JOB_FINISH_LAYOUT {
        match field {
            Field::EventType => rec.event_type = cur.text(field)?,
            Field::Version => rec.version = cur.text(field)?,
            Field::EventTime => rec.event_time = cur.epoch(field)?.1,
            Field::JobId => rec.job_id = cur.number(field)?,
            Field::UserId => rec.user_id = cur.number(field)?,
            Field::Options => rec.options = cur.opaque(field)?,
            Field::NumProcessors => rec.num_processors = cur.number(field)?,
            Field::SubmitTime => rec.submit_time = cur.epoch(field)?.1,
            Field::BeginTime => rec.begin_time = cur.epoch(field)?.1,
            Field::TermTime => rec.term_time = cur.epoch(field)?.1,
            Field::StartTime => (start_epoch, rec.start_time) = cur.epoch(field)?,
            Field::UserName => rec.user_name = cur.text(field)?,
            Field::Queue => rec.queue = cur.text(field)?,
            Field::ResReq => rec.res_req = cur.text(field)?,
            Field::DependCond => rec.depend_cond = cur.text(field)?,
            Field::PreExecCmd => rec.pre_exec_cmd = cur.text(field)?,
            Field::FromHost => rec.from_host = cur.text(field)?,
            Field::Cwd => rec.cwd = cur.text(field)?,
            Field::InFile => rec.in_file = cur.text(field)?,
            Field::OutFile => rec.out_file = cur.text(field)?,
            Field::ErrFile => rec.err_file = cur.text(field)?,
            Field::JobFile => rec.job_file = cur.text(field)?,
            Field::NumAskedHosts => num_asked_hosts = cur.count(field)?,
            Field::AskedHosts => rec.asked_hosts = cur.hosts(field, num_asked_hosts)?,
            Field::NumExHosts => num_ex_hosts = cur.count(field)?,
            Field::ExecHosts => rec.exec_hosts = cur.hosts(field, num_ex_hosts)?,
            Field::JobStatus => rec.job_status = cur.number(field)?,
            Field::HostFactor => rec.host_factor = cur.number(field)?,
            Field::JobName => rec.job_name = cur.text(field)?,
            Field::Command => rec.command = cur.text(field)?,
            Field::Utime => rec.utime = cur.seconds(field)?,
            Field::Stime => rec.stime = cur.seconds(field)?,
            Field::Maxrss => rec.usage.maxrss = cur.opaque(field)?,
            Field::Ixrss => rec.usage.ixrss = cur.opaque(field)?,
            Field::Ismrss => rec.usage.ismrss = cur.opaque(field)?,
            Field::Idrss => rec.usage.idrss = cur.opaque(field)?,
            Field::Isrss => rec.usage.isrss = cur.opaque(field)?,
            Field::Minflt => rec.usage.minflt = cur.opaque(field)?,
            Field::Majflt => rec.usage.majflt = cur.opaque(field)?,
            Field::Nswap => rec.usage.nswap = cur.opaque(field)?,
            Field::Inblock => rec.usage.inblock = cur.opaque(field)?,
            Field::Oublock => rec.usage.oublock = cur.opaque(field)?,
            Field::Ioch => rec.usage.ioch = cur.opaque(field)?,
            Field::Msgsnd => rec.usage.msgsnd = cur.opaque(field)?,
            Field::Msgrcv => rec.usage.msgrcv = cur.opaque(field)?,
            Field::Nsignals => rec.usage.nsignals = cur.opaque(field)?,
            Field::Nvcsw => rec.usage.nvcsw = cur.opaque(field)?,
            Field::Nivcsw => rec.usage.nivcsw = cur.opaque(field)?,
            Field::Exutime => rec.usage.exutime = cur.opaque(field)?,
            Field::MailUser => rec.mail_user = cur.text(field)?,
            Field::ProjectName => rec.project_name = cur.text(field)?,
            Field::ExitStatus => rec.exit_status = cur.number(field)?,
            Field::MaxNumProcessors => rec.max_num_processors = cur.number(field)?,
            Field::LoginShell => rec.login_shell = cur.text(field)?,
            Field::TimeEvent => rec.time_event = cur.opaque(field)?,
            Field::Idx => rec.idx = cur.opaque(field)?,
            Field::MaxRMem => rec.max_r_mem = cur.opaque(field)?,
            Field::MaxRSwap => rec.max_r_swap = cur.opaque(field)?,
            Field::InFileSpool => rec.in_file_spool = cur.text(field)?,
            Field::CommandSpool => rec.command_spool = cur.text(field)?,
            Field::RsvId => rec.rsv_id = cur.text(field)?,
            Field::Sla => rec.sla = cur.text(field)?,
            Field::ExceptMask => rec.except_mask = cur.opaque(field)?,
            Field::AdditionalInfo => rec.additional_info = cur.text(field)?,
            Field::ExitInfo => rec.termination = lookup(cur.number(field)?),
            Field::WarningAction => rec.warning_action = cur.text(field)?,
            Field::WarningTimePeriod => rec.warning_time_period = cur.opaque(field)?,
            Field::ChargedSaap => rec.charged_saap = cur.text(field)?,
            Field::LicenseProject => rec.license_project = cur.text(field)?,
        }
    }

    derive_times(&mut rec, start_epoch);
    Ok(rec)
}

/// Fill in run and wait time.
///
/// A start epoch below 1 means the job never started: it has no run time, it
/// waited until the event time, and its start time becomes the deadline.
fn derive_times(rec: &mut JobFinishRecord, start_epoch: f64) {
    if start_epoch < 1.0 {
        rec.run_time = TimeDelta::zero();
        rec.wait_time = rec.event_time - rec.submit_time;
        rec.start_time = rec.term_time;
    } else {
        rec.run_time = rec.event_time - rec.start_time;
        rec.wait_time = rec.start_time - rec.submit_time;
    }
}
