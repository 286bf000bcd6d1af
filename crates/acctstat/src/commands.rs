//! Subcommand implementations.

use acctstat_cli::{Args, Command};
use acctstat_lsf::{AcctReader, JobFinishRecord, ReadError};
use acctstat_report::{BucketKey, BucketReport, UsageSummary};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

pub fn run(args: &Args) -> Result<()> {
    let path = &args.command.input().file;
    let reader = AcctReader::from_path(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Cannot read {path}"))?;
    tracing::info!(%path, "Reading accounting file");

    let stdout = io::stdout().lock();
    match &args.command {
        Command::Queues(_) => queues(reader, args.strict, stdout),
        Command::Stats { json, .. } => stats(reader, args.strict, *json, stdout),
        Command::Buckets { output, keys, .. } => {
            let report = buckets(reader, args.strict, keys)?;
            let file = File::create(output)
                .into_diagnostic()
                .wrap_err_with(|| format!("Cannot create {output}"))?;
            report
                .write_csv(BufWriter::new(file))
                .into_diagnostic()
                .wrap_err_with(|| format!("Cannot write {output}"))
        }
    }
}

/// Feed every decodable job to `sink`.
///
/// Undecodable lines are logged and skipped unless `strict` is set, in which
/// case the first one is returned as an error. Returns the number of jobs fed.
fn for_each_job<R: Read>(
    reader: AcctReader<R>,
    strict: bool,
    mut sink: impl FnMut(JobFinishRecord) -> Result<()>,
) -> Result<u64> {
    let mut jobs = 0;
    let mut skipped = 0u64;

    for item in reader {
        match item {
            Ok(job) => {
                jobs += 1;
                sink(job)?;
            }
            Err(ReadError::Decode { line, source }) if !strict => {
                tracing::warn!(line, error = %source, "Skipping job-finish line");
                skipped += 1;
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }

    tracing::info!(jobs, skipped, "Finished reading accounting file");
    Ok(jobs)
}

/// Print the queue of each job, one per line.
fn queues<R: Read, W: Write>(reader: AcctReader<R>, strict: bool, mut out: W) -> Result<()> {
    for_each_job(reader, strict, |job| {
        writeln!(out, "{}", job.queue).into_diagnostic()
    })?;
    out.flush().into_diagnostic()
}

/// Print queue totals then user totals.
fn stats<R: Read, W: Write>(
    reader: AcctReader<R>,
    strict: bool,
    json: bool,
    mut out: W,
) -> Result<()> {
    let mut summary = UsageSummary::new();
    for_each_job(reader, strict, |job| {
        summary.add(&job);
        Ok(())
    })?;

    if json {
        serde_json::to_writer_pretty(&mut out, &summary.report()).into_diagnostic()?;
        writeln!(out).into_diagnostic()?;
    } else {
        write_stats_text(&summary, &mut out).into_diagnostic()?;
    }
    out.flush().into_diagnostic()
}

fn write_stats_text<W: Write>(summary: &UsageSummary, out: &mut W) -> io::Result<()> {
    writeln!(out, "Total Jobs: {}", summary.total_jobs())?;

    writeln!(out, "\nQueues")?;
    for queue in summary.queues() {
        writeln!(out, "\n{queue}")?;
    }

    writeln!(out, "\nUsers")?;
    for user in summary.users_by_waste() {
        writeln!(out, "\n{user}")?;
    }
    Ok(())
}

/// Group jobs by `keys`.
fn buckets<R: Read>(reader: AcctReader<R>, strict: bool, keys: &[BucketKey]) -> Result<BucketReport> {
    let mut report = BucketReport::new(keys.to_vec());
    for_each_job(reader, strict, |job| {
        report.add(&job);
        Ok(())
    })?;
    tracing::debug!(buckets = report.len(), "Grouped jobs");
    Ok(report)
}
