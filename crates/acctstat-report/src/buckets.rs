//! Multi-key bucket report.
//!
//! Jobs are grouped by an ordered list of attributes. Each distinct tuple of
//! attribute values is one bucket, written as one CSV row.

use crate::add_delta;
use acctstat_lsf::JobFinishRecord;
use acctstat_parsers::total_seconds;
use chrono::TimeDelta;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unknown bucket key: {0}")]
    UnknownKey(String),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Job attribute a bucket report can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    User,
    Project,
    Processors,
    Queue,
    JobStatus,
    ExitStatus,
    TermReason,
    /// Program name of the command
    Command,
    /// Year and month of submission
    SubmitMonth,
    /// Charged share account path
    Saap,
}

impl BucketKey {
    /// Keys used when none are given.
    pub const DEFAULT: &'static [BucketKey] = &[
        BucketKey::User,
        BucketKey::Project,
        BucketKey::Processors,
        BucketKey::Queue,
        BucketKey::ExitStatus,
        BucketKey::TermReason,
        BucketKey::Command,
        BucketKey::SubmitMonth,
        BucketKey::Saap,
    ];

    const ALL: &'static [BucketKey] = &[
        BucketKey::User,
        BucketKey::Project,
        BucketKey::Processors,
        BucketKey::Queue,
        BucketKey::JobStatus,
        BucketKey::ExitStatus,
        BucketKey::TermReason,
        BucketKey::Command,
        BucketKey::SubmitMonth,
        BucketKey::Saap,
    ];

    /// Name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            BucketKey::User => "user",
            BucketKey::Project => "project",
            BucketKey::Processors => "processors",
            BucketKey::Queue => "queue",
            BucketKey::JobStatus => "job-status",
            BucketKey::ExitStatus => "exit-status",
            BucketKey::TermReason => "term-reason",
            BucketKey::Command => "command",
            BucketKey::SubmitMonth => "submit-month",
            BucketKey::Saap => "saap",
        }
    }

    /// CSV column title.
    pub fn title(self) -> &'static str {
        match self {
            BucketKey::User => "User Name",
            BucketKey::Project => "Project Name",
            BucketKey::Processors => "Num Processors",
            BucketKey::Queue => "Queue Name",
            BucketKey::JobStatus => "Job Status",
            BucketKey::ExitStatus => "Job Exit Status",
            BucketKey::TermReason => "Termination Reason",
            BucketKey::Command => "Command",
            BucketKey::SubmitMonth => "Submit Month",
            BucketKey::Saap => "SAAP Name",
        }
    }

    /// Value of this attribute for a job.
    pub fn value(self, job: &JobFinishRecord) -> String {
        match self {
            BucketKey::User => job.user_name.clone(),
            BucketKey::Project => job.project_name.clone(),
            BucketKey::Processors => job.num_processors.to_string(),
            BucketKey::Queue => job.queue.clone(),
            BucketKey::JobStatus => job.job_status.to_string(),
            BucketKey::ExitStatus => job.exit_status.to_string(),
            BucketKey::TermReason => job.termination.name.to_string(),
            BucketKey::Command => job.command_name().to_string(),
            BucketKey::SubmitMonth => job.submit_month(),
            BucketKey::Saap => job.charged_saap.clone(),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BucketKey {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase().replace('_', "-");
        BucketKey::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or(ReportError::UnknownKey(s))
    }
}

/// Totals for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketTotals {
    pub num_jobs: u64,
    pub pend_time: TimeDelta,
    pub cpu_time: TimeDelta,
    pub wall_time: TimeDelta,
}

impl BucketTotals {
    fn add(&mut self, job: &JobFinishRecord) {
        self.num_jobs += 1;
        self.pend_time = add_delta(self.pend_time, job.pend_time());
        self.cpu_time = add_delta(self.cpu_time, job.cpu_time());
        self.wall_time = add_delta(self.wall_time, job.run_time);
    }
}

/// Jobs grouped by a fixed, ordered list of keys.
#[derive(Debug, Clone)]
pub struct BucketReport {
    keys: Vec<BucketKey>,
    buckets: BTreeMap<Vec<String>, BucketTotals>,
}

impl BucketReport {
    pub fn new(keys: Vec<BucketKey>) -> Self {
        Self {
            keys,
            buckets: BTreeMap::new(),
        }
    }

    pub fn keys(&self) -> &[BucketKey] {
        &self.keys
    }

    /// Add a job to the bucket for its key values.
    pub fn add(&mut self, job: &JobFinishRecord) {
        let key: Vec<String> = self.keys.iter().map(|k| k.value(job)).collect();
        self.buckets.entry(key).or_default().add(job);
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, key: &[&str]) -> Option<&BucketTotals> {
        let key: Vec<String> = key.iter().map(|s| s.to_string()).collect();
        self.buckets.get(&key)
    }

    /// Buckets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[String], &BucketTotals)> {
        self.buckets.iter().map(|(k, v)| (k.as_slice(), v))
    }

    /// Column titles: one per key, then the totals.
    pub fn header(&self) -> Vec<&'static str> {
        self.keys
            .iter()
            .map(|k| k.title())
            .chain([
                "Number of Jobs",
                "Total Pend Time",
                "Total CPU Time",
                "Total Wallclock Time",
            ])
            .collect()
    }

    /// Write the report as CSV, times in seconds.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(self.header())?;

        for (key, totals) in self.iter() {
            let row = key.iter().cloned().chain([
                totals.num_jobs.to_string(),
                total_seconds(totals.pend_time).to_string(),
                total_seconds(totals.cpu_time).to_string(),
                total_seconds(totals.wall_time).to_string(),
            ]);
            out.write_record(row)?;
        }

        out.flush()?;
        tracing::debug!(buckets = self.len(), "Wrote bucket report");
        Ok(())
    }
}

impl<'a> Extend<&'a JobFinishRecord> for BucketReport {
    fn extend<I: IntoIterator<Item = &'a JobFinishRecord>>(&mut self, iter: I) {
        for job in iter {
            self.add(job);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acctstat_lsf::lookup;
    use chrono::DateTime;

    fn job(user: &str, queue: &str, command: &str, run_secs: i64) -> JobFinishRecord {
        JobFinishRecord {
            user_name: user.to_string(),
            queue: queue.to_string(),
            project_name: "proj".to_string(),
            command: command.to_string(),
            num_processors: 2,
            exit_status: 1,
            job_status: 32,
            termination: lookup(5),
            charged_saap: "/grp/a".to_string(),
            submit_time: DateTime::from_timestamp(1_300_000_000, 0).unwrap(),
            run_time: TimeDelta::seconds(run_secs),
            wait_time: TimeDelta::seconds(5),
            ..Default::default()
        }
    }

    #[test]
    fn test_key_values() {
        let j = job("alice", "normal", "/opt/bin/blast -db nr", 10);
        let values: Vec<String> = BucketKey::DEFAULT.iter().map(|k| k.value(&j)).collect();
        assert_eq!(
            values,
            vec!["alice", "proj", "2", "normal", "1", "TERM_RUNLIMIT", "blast", "2011-3", "/grp/a"]
        );
        assert_eq!(BucketKey::JobStatus.value(&j), "32");
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("user".parse::<BucketKey>().unwrap(), BucketKey::User);
        assert_eq!("Exit_Status".parse::<BucketKey>().unwrap(), BucketKey::ExitStatus);
        assert_eq!(" saap ".parse::<BucketKey>().unwrap(), BucketKey::Saap);
        assert!(matches!(
            "colour".parse::<BucketKey>(),
            Err(ReportError::UnknownKey(k)) if k == "colour"
        ));
        for key in BucketKey::ALL {
            assert_eq!(key.to_string().parse::<BucketKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_grouping() {
        let jobs = [
            job("alice", "normal", "sleep 1", 10),
            job("alice", "normal", "sleep 2", 20),
            job("alice", "long", "sleep 3", 30),
            job("bob", "normal", "sleep 4", 40),
        ];
        let mut report = BucketReport::new(vec![BucketKey::User, BucketKey::Queue]);
        report.extend(&jobs);

        assert_eq!(report.len(), 3);
        let totals = report.get(&["alice", "normal"]).unwrap();
        assert_eq!(totals.num_jobs, 2);
        assert_eq!(totals.wall_time, TimeDelta::seconds(30));
        assert_eq!(totals.cpu_time, TimeDelta::seconds(60));
        assert_eq!(totals.pend_time, TimeDelta::seconds(10));
        assert_eq!(report.get(&["bob", "normal"]).unwrap().num_jobs, 1);
        assert!(report.get(&["bob", "long"]).is_none());

        let keys: Vec<Vec<String>> = report.iter().map(|(k, _)| k.to_vec()).collect();
        assert_eq!(
            keys,
            vec![
                vec!["alice".to_string(), "long".to_string()],
                vec!["alice".to_string(), "normal".to_string()],
                vec!["bob".to_string(), "normal".to_string()],
            ]
        );
    }

    #[test]
    fn test_empty_key_list_is_one_bucket() {
        let jobs = [job("alice", "normal", "a", 1), job("bob", "long", "b", 2)];
        let mut report = BucketReport::new(vec![]);
        report.extend(&jobs);
        assert_eq!(report.len(), 1);
        assert_eq!(report.get(&[]).unwrap().num_jobs, 2);
    }

    #[test]
    fn test_write_csv() {
        let jobs = [
            job("alice", "normal", "sleep 1", 90),
            job("alice", "normal", "sleep 1", 30),
        ];
        let mut report = BucketReport::new(vec![BucketKey::User, BucketKey::Command]);
        report.extend(&jobs);

        let mut buf = Vec::new();
        report.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "User Name,Command,Number of Jobs,Total Pend Time,Total CPU Time,Total Wallclock Time",
                "alice,sleep,2,10,240,120",
            ]
        );
    }

    #[test]
    fn test_write_csv_to_file() {
        let mut report = BucketReport::new(BucketKey::DEFAULT.to_vec());
        report.add(&job("alice", "normal", "run \"quoted\"", 1));

        let file = tempfile::NamedTempFile::new().unwrap();
        report.write_csv(file.as_file()).unwrap();

        let mut reader = csv::Reader::from_path(file.path()).unwrap();
        assert_eq!(reader.headers().unwrap().len(), BucketKey::DEFAULT.len() + 4);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "alice");
        assert_eq!(&rows[0][6], "run");
        assert_eq!(&rows[0][9], "1");
    }
}
