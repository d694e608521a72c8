use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "metadata-recorder",
    version,
    about = "Append timestamped records to metadata.db"
)]
pub struct Cli {
    /// Load the recorder from this shared library instead of the linked copy.
    #[arg(long)]
    pub library: Option<PathBuf>,

    #[arg(long, default_value = "text")]
    pub output: String,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// One record per value. Reads stdin line by line when omitted.
    pub payloads: Vec<String>,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        match self.output.as_str() {
            "text" | "json" => Ok(()),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

/// Split `reader` into newline-terminated payloads, keeping raw bytes.
///
/// A trailing `\r` is dropped the same way `BufRead::lines` drops it.
pub fn read_payloads<R: BufRead>(reader: R) -> io::Result<Vec<Vec<u8>>> {
    reader
        .split(b'\n')
        .map(|line| {
            line.map(|mut bytes| {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                bytes
            })
        })
        .collect()
}
