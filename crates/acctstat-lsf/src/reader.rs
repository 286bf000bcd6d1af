//! Stream job-finish records from an `lsb.acct` file.

use crate::decode::{decode_job_finish, DecodeError};
use crate::layout::JOB_FINISH;
use crate::types::JobFinishRecord;
use acctstat_parsers::token_reader;
use csv::ByteRecord;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to open accounting file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to read accounting file: {0}")]
    Tokenize(#[from] csv::Error),
    #[error("Line {line}: {source}")]
    Decode {
        line: u64,
        #[source]
        source: DecodeError,
    },
}

/// Iterator over the `JOB_FINISH` events of an accounting file.
///
/// Other event types are skipped. A job-finish line that fails to decode is
/// yielded as an error and iteration may continue past it. The reader is
/// forward-only; open a new one to read the file again.
pub struct AcctReader<R> {
    reader: csv::Reader<R>,
    record: ByteRecord,
    done: bool,
}

impl<R: Read> AcctReader<R> {
    pub fn new(rdr: R) -> Self {
        Self {
            reader: token_reader(rdr),
            record: ByteRecord::new(),
            done: false,
        }
    }
}

impl AcctReader<File> {
    /// Open an accounting file for reading.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> Iterator for AcctReader<R> {
    type Item = Result<JobFinishRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.reader.read_byte_record(&mut self.record) {
                Ok(true) => {}
                Ok(false) => {
                    self.done = true;
                    break;
                }
                Err(e) => {
                    // An I/O failure leaves the stream unusable
                    self.done = e.is_io_error();
                    return Some(Err(ReadError::Tokenize(e)));
                }
            }

            let line = self.record.position().map(|p| p.line()).unwrap_or(0);
            if self.record.get(0) != Some(JOB_FINISH.as_bytes()) {
                tracing::trace!(
                    line,
                    event = %String::from_utf8_lossy(self.record.get(0).unwrap_or_default()),
                    "Skipping event"
                );
                continue;
            }

            let tokens: Vec<Cow<'_, str>> =
                self.record.iter().map(String::from_utf8_lossy).collect();
            return Some(
                decode_job_finish(&tokens).map_err(|source| ReadError::Decode { line, source }),
            );
        }
        None
    }
}
