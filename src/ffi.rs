use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic;

use crate::record::record;

/// Symbol hosts resolve when loading the shared library.
pub const RECORD_SYMBOL: &[u8] = b"guardar_registro_c";

/// Signature of the exported entry point.
pub type RecordFn = unsafe extern "C" fn(*const c_char);

/// C entry point: append `dato` to `metadata.db` as one timestamped record.
///
/// Returns nothing, whatever happens. A null pointer records nothing, and
/// no panic is allowed to unwind into the host.
///
/// # Safety
///
/// `dato` must be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
#[unsafe(export_name = "guardar_registro_c")]
pub unsafe extern "C" fn record_c(dato: *const c_char) {
    if dato.is_null() {
        return;
    }
    let payload = unsafe { CStr::from_ptr(dato) }.to_bytes();
    let _ = panic::catch_unwind(|| record(payload));
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::ffi::CString;
    use std::fs;
    use std::path::Path;
    use std::ptr;
    use std::sync::Mutex;

    use tempfile::tempdir;

    use super::{RecordFn, record_c};
    use crate::record::RECORD_FILE;

    // The working directory is process-wide; tests that move it take turns.
    static CWD: Mutex<()> = Mutex::new(());

    fn in_temp_dir(f: impl FnOnce(&Path)) {
        let _guard = CWD.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let dir = tempdir().unwrap();
        let previous = env::current_dir().unwrap();
        env::set_current_dir(dir.path()).unwrap();
        f(dir.path());
        env::set_current_dir(previous).unwrap();
    }

    #[test]
    fn null_pointer_records_nothing() {
        in_temp_dir(|dir| {
            unsafe { record_c(ptr::null()) };
            assert!(!dir.join(RECORD_FILE).exists());
        });
    }

    #[test]
    fn appends_one_line_to_working_directory() {
        in_temp_dir(|dir| {
            let payload = CString::new("via export").unwrap();
            unsafe { record_c(payload.as_ptr()) };

            let contents = fs::read_to_string(dir.join(RECORD_FILE)).unwrap();
            assert_eq!(contents.lines().count(), 1);
            assert!(contents.starts_with('['));
            assert!(contents.ends_with("] via export\n"));
        });
    }

    #[test]
    fn export_matches_host_signature() {
        in_temp_dir(|dir| {
            let func: RecordFn = record_c;
            let payload = CString::new("").unwrap();
            unsafe {
                func(ptr::null());
                func(payload.as_ptr());
            }

            let contents = fs::read_to_string(dir.join(RECORD_FILE)).unwrap();
            assert_eq!(contents.lines().count(), 1);
            assert!(contents.ends_with("] \n"));
        });
    }
}
