//! Appends timestamped lines to `metadata.db` on behalf of a foreign host.
//!
//! Built as a `cdylib` exporting `guardar_registro_c(const char*)`, and as
//! an `rlib` for Rust callers.

mod error;
mod ffi;
mod record;

pub use error::{RecordError, Result};
pub use ffi::{RECORD_SYMBOL, RecordFn, record_c};
pub use record::{RECORD_FILE, Timestamp, append_record, format_record, record};
