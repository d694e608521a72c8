use std::ffi::CString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use metadata_recorder::{RECORD_SYMBOL, RecordFn, record_c};

#[derive(Error, Debug)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("library error: {0}")]
    Library(#[from] libloading::Error),

    #[error("library file not found: {}", .0.display())]
    LibraryMissing(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Where the records were sent.
#[derive(Debug)]
pub enum Backend {
    Linked,
    Library(PathBuf),
    /// The library could not be loaded; nothing was recorded.
    Unavailable { path: PathBuf, reason: String },
}

#[derive(Debug)]
pub struct Submission {
    pub backend: Backend,
    pub payloads: Vec<Vec<u8>>,
    pub submitted: usize,
}

pub fn submit(library: Option<&Path>, payloads: Vec<Vec<u8>>) -> Result<Submission, HostError> {
    let records = payloads
        .iter()
        .enumerate()
        .map(|(idx, payload)| {
            CString::new(payload.as_slice()).map_err(|_| {
                HostError::InvalidArg(format!("payload {} contains a NUL byte", idx + 1))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let backend = match library {
        None => {
            for record in &records {
                unsafe { record_c(record.as_ptr()) };
            }
            Backend::Linked
        }
        Some(path) => match call_library(path, &records) {
            Ok(()) => Backend::Library(path.to_path_buf()),
            Err(err @ (HostError::Library(_) | HostError::LibraryMissing(_))) => {
                warn!(library = %path.display(), "library not loaded: {err}");
                warn!("running without recording");
                Backend::Unavailable {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                }
            }
            Err(err) => return Err(err),
        },
    };

    let submitted = match backend {
        Backend::Unavailable { .. } => 0,
        _ => records.len(),
    };
    info!(submitted, "records submitted");

    Ok(Submission {
        backend,
        payloads,
        submitted,
    })
}

fn call_library(path: &Path, records: &[CString]) -> Result<(), HostError> {
    if !path.exists() {
        return Err(HostError::LibraryMissing(path.to_path_buf()));
    }

    unsafe {
        let lib = libloading::Library::new(path)?;
        let func: libloading::Symbol<RecordFn> = lib.get(RECORD_SYMBOL)?;
        for record in records {
            func(record.as_ptr());
        }
    }
    Ok(())
}
