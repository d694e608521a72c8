use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::trace;

use crate::error::{RecordError, Result};

/// Destination of every record, resolved against the working directory at call time.
pub const RECORD_FILE: &str = "metadata.db";

// Same layout as C's ctime(), minus the trailing newline.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(DateTime<Local>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Local::now())
    }

    pub fn render(&self) -> String {
        self.0.format(CTIME_FORMAT).to_string()
    }
}

impl From<DateTime<Local>> for Timestamp {
    fn from(value: DateTime<Local>) -> Self {
        Self(value)
    }
}

/// Build the bytes of one record: `[<timestamp>] <payload>\n`.
///
/// The payload is copied verbatim, so brackets, newlines and non-UTF-8
/// bytes all pass through untouched.
pub fn format_record(timestamp: &Timestamp, payload: &[u8]) -> Vec<u8> {
    let stamp = timestamp.render();
    let mut line = Vec::with_capacity(stamp.len() + payload.len() + 4);
    line.push(b'[');
    line.extend_from_slice(stamp.as_bytes());
    line.extend_from_slice(b"] ");
    line.extend_from_slice(payload);
    line.push(b'\n');
    line
}

/// Append one record to `path`, creating the file if needed.
///
/// The file is opened and closed on every call and the line goes out in a
/// single write.
pub fn append_record(path: &Path, payload: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| RecordError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let line = format_record(&Timestamp::now(), payload);
    file.write_all(&line).map_err(|source| RecordError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    trace!(path = %path.display(), bytes = line.len(), "record appended");
    Ok(())
}

/// Fire-and-forget append to [`RECORD_FILE`]. Failures are dropped.
pub fn record(payload: &[u8]) {
    if let Err(err) = append_record(Path::new(RECORD_FILE), payload) {
        trace!(error = %err, "record dropped");
    }
}
