use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::host::{Backend, HostError, Submission};

pub fn print_submission(format: &str, submission: &Submission) -> Result<(), HostError> {
    match format {
        "text" => print_text(submission),
        "json" => print_json(submission),
        other => Err(HostError::InvalidArg(format!(
            "Unknown output format: {other}"
        ))),
    }
}

fn print_text(submission: &Submission) -> Result<(), HostError> {
    let mut out = io::stdout();
    match &submission.backend {
        Backend::Linked => writeln!(out, "Backend: linked")?,
        Backend::Library(path) => writeln!(out, "Backend: library ({})", path.display())?,
        Backend::Unavailable { reason, .. } => writeln!(out, "Backend: unavailable ({reason})")?,
    }
    writeln!(
        out,
        "Records: {} of {}",
        submission.submitted,
        submission.payloads.len()
    )?;
    if submission.submitted > 0 {
        for (idx, payload) in submission.payloads.iter().enumerate() {
            writeln!(
                out,
                "  {:>3}  {}",
                idx + 1,
                String::from_utf8_lossy(payload).escape_debug()
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonSubmission<'a> {
    backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    library: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
    submitted: usize,
    payloads: Vec<Cow<'a, str>>,
}

fn print_json(submission: &Submission) -> Result<(), HostError> {
    let (backend, library, reason) = match &submission.backend {
        Backend::Linked => ("linked", None, None),
        Backend::Library(path) => ("library", Some(path.as_path()), None),
        Backend::Unavailable { path, reason } => {
            ("unavailable", Some(path.as_path()), Some(reason.as_str()))
        }
    };
    let json = JsonSubmission {
        backend,
        library,
        reason,
        submitted: submission.submitted,
        payloads: submission
            .payloads
            .iter()
            .map(|p| String::from_utf8_lossy(p))
            .collect(),
    };
    let out = serde_json::to_string_pretty(&json)?;
    println!("{out}");
    Ok(())
}
