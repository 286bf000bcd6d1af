//! Per-queue and per-user usage totals.

use crate::add_delta;
use acctstat_lsf::JobFinishRecord;
use acctstat_parsers::{format_duration, serialize_seconds};
use chrono::TimeDelta;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Usage accumulated over the jobs of one queue or user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageTotals {
    /// Queue or user name
    pub name: String,

    pub num_jobs: u64,

    /// Jobs with a termination code above zero
    pub num_failed_jobs: u64,

    /// Total time spent pending
    #[serde(serialize_with = "serialize_seconds")]
    pub wait_time: TimeDelta,

    /// Total wall time multiplied by processors
    #[serde(serialize_with = "serialize_seconds")]
    pub cpu_time: TimeDelta,

    /// Total wall time
    #[serde(serialize_with = "serialize_seconds")]
    pub wall_time: TimeDelta,

    /// CPU time of failed jobs
    #[serde(serialize_with = "serialize_seconds")]
    pub wasted_time: TimeDelta,
}

impl UsageTotals {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Account for one job.
    pub fn add(&mut self, job: &JobFinishRecord) {
        let cpu_time = job.cpu_time();

        self.num_jobs += 1;
        self.wait_time = add_delta(self.wait_time, job.wait_time);
        self.cpu_time = add_delta(self.cpu_time, cpu_time);
        self.wall_time = add_delta(self.wall_time, job.run_time);

        if job.is_failed() {
            self.num_failed_jobs += 1;
            self.wasted_time = add_delta(self.wasted_time, cpu_time);
        }
    }
}

impl fmt::Display for UsageTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, " Total Jobs:      {}", self.num_jobs)?;
        writeln!(f, " Failed Jobs:     {}", self.num_failed_jobs)?;
        writeln!(f, " Total Wait Time: {}", format_duration(self.wait_time))?;
        writeln!(f, " Total Wall Time: {}", format_duration(self.wall_time))?;
        writeln!(f, " Total CPU Time:  {}", format_duration(self.cpu_time))?;
        write!(
            f,
            " Total Terminated CPU Time: {}",
            format_duration(self.wasted_time)
        )
    }
}

/// Usage totals keyed by queue and by user.
#[derive(Debug, Clone, Default)]
pub struct UsageSummary {
    queues: BTreeMap<String, UsageTotals>,
    users: BTreeMap<String, UsageTotals>,
}

impl UsageSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one job under its queue and its user.
    pub fn add(&mut self, job: &JobFinishRecord) {
        self.queues
            .entry(job.queue.clone())
            .or_insert_with(|| UsageTotals::new(&job.queue))
            .add(job);
        self.users
            .entry(job.user_name.clone())
            .or_insert_with(|| UsageTotals::new(&job.user_name))
            .add(job);
    }

    /// Number of jobs accounted for.
    pub fn total_jobs(&self) -> u64 {
        self.queues.values().map(|q| q.num_jobs).sum()
    }

    /// Queue totals, ordered by queue name.
    pub fn queues(&self) -> impl Iterator<Item = &UsageTotals> {
        self.queues.values()
    }

    pub fn queue(&self, name: &str) -> Option<&UsageTotals> {
        self.queues.get(name)
    }

    pub fn user(&self, name: &str) -> Option<&UsageTotals> {
        self.users.get(name)
    }

    /// User totals, most wasted CPU time first. Ties are ordered by name.
    pub fn users_by_waste(&self) -> Vec<&UsageTotals> {
        let mut users: Vec<&UsageTotals> = self.users.values().collect();
        users.sort_by(|a, b| b.wasted_time.cmp(&a.wasted_time));
        users
    }

    /// Serializable view of the summary.
    pub fn report(&self) -> SummaryReport<'_> {
        SummaryReport {
            total_jobs: self.total_jobs(),
            queues: self.queues().collect(),
            users: self.users_by_waste(),
        }
    }
}

impl<'a> Extend<&'a JobFinishRecord> for UsageSummary {
    fn extend<I: IntoIterator<Item = &'a JobFinishRecord>>(&mut self, iter: I) {
        for job in iter {
            self.add(job);
        }
    }
}

/// Summary as emitted by `stats --json`.
#[derive(Debug, Serialize)]
pub struct SummaryReport<'a> {
    pub total_jobs: u64,
    pub queues: Vec<&'a UsageTotals>,
    pub users: Vec<&'a UsageTotals>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use acctstat_lsf::lookup;

    fn job(queue: &str, user: &str, procs: i32, run_secs: i64, term_code: i32) -> JobFinishRecord {
        JobFinishRecord {
            queue: queue.to_string(),
            user_name: user.to_string(),
            num_processors: procs,
            run_time: TimeDelta::seconds(run_secs),
            wait_time: TimeDelta::seconds(10),
            termination: lookup(term_code),
            ..Default::default()
        }
    }

    #[test]
    fn test_totals_add() {
        let mut totals = UsageTotals::new("normal");
        totals.add(&job("normal", "alice", 4, 100, 0));
        totals.add(&job("normal", "alice", 2, 50, 5));

        assert_eq!(totals.num_jobs, 2);
        assert_eq!(totals.num_failed_jobs, 1);
        assert_eq!(totals.wait_time, TimeDelta::seconds(20));
        assert_eq!(totals.wall_time, TimeDelta::seconds(150));
        assert_eq!(totals.cpu_time, TimeDelta::seconds(500));
        assert_eq!(totals.wasted_time, TimeDelta::seconds(100));
    }

    #[test]
    fn test_unterminated_and_unknown_are_not_failures() {
        let mut totals = UsageTotals::new("normal");
        totals.add(&job("normal", "alice", 1, 100, -1));
        totals.add(&job("normal", "alice", 1, 100, 0));
        assert_eq!(totals.num_failed_jobs, 0);
        assert_eq!(totals.wasted_time, TimeDelta::zero());
    }

    #[test]
    fn test_summary_groups_by_queue_and_user() {
        let jobs = [
            job("normal", "alice", 1, 100, 0),
            job("long", "alice", 1, 100, 0),
            job("normal", "bob", 1, 100, 0),
        ];
        let mut summary = UsageSummary::new();
        summary.extend(&jobs);

        assert_eq!(summary.total_jobs(), 3);
        assert_eq!(summary.queue("normal").unwrap().num_jobs, 2);
        assert_eq!(summary.queue("long").unwrap().num_jobs, 1);
        assert_eq!(summary.user("alice").unwrap().num_jobs, 2);
        assert_eq!(summary.user("bob").unwrap().num_jobs, 1);

        let names: Vec<&str> = summary.queues().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["long", "normal"]);
    }

    #[test]
    fn test_users_by_waste() {
        let jobs = [
            job("normal", "alice", 1, 100, 5),
            job("normal", "bob", 8, 100, 16),
            job("normal", "carol", 1, 100, 0),
            job("normal", "dave", 1, 100, 0),
        ];
        let mut summary = UsageSummary::new();
        summary.extend(&jobs);

        let names: Vec<&str> = summary
            .users_by_waste()
            .iter()
            .map(|u| u.name.as_str())
            .collect();
        assert_eq!(names, vec!["bob", "alice", "carol", "dave"]);
    }

    #[test]
    fn test_display() {
        let mut totals = UsageTotals::new("normal");
        totals.add(&job("normal", "alice", 2, 3600, 14));
        let text = totals.to_string();
        assert!(text.starts_with("Name: normal\n"));
        assert!(text.contains(" Failed Jobs:     1\n"));
        assert!(text.contains(" Total CPU Time:  02:00:00\n"));
        assert!(text.ends_with(" Total Terminated CPU Time: 02:00:00"));
    }

    #[test]
    fn test_report_json() {
        let mut summary = UsageSummary::new();
        summary.add(&job("normal", "alice", 2, 60, 0));
        let json = serde_json::to_value(summary.report()).unwrap();
        assert_eq!(json["total_jobs"], 1);
        assert_eq!(json["queues"][0]["name"], "normal");
        assert_eq!(json["queues"][0]["cpu_time"], 120.0);
        assert_eq!(json["users"][0]["name"], "alice");
    }
}
