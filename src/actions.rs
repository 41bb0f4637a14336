//! Integration with the CI host: event payload input and exported output values

use crate::error::Result;
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Name under which the final tag is exported
pub const NEW_VERSION_OUTPUT: &str = "newVersion";

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    commits: Option<Vec<EventCommit>>,
}

#[derive(Debug, Deserialize)]
struct EventCommit {
    #[serde(default)]
    message: String,
}

/// Commit messages from the event payload at `path`.
///
/// # Returns
/// * `Ok(Some(messages))` - The payload has a `commits` array
/// * `Ok(None)` - The payload has no `commits` (e.g. a pull-request or manual event)
/// * `Err` - If the file cannot be read or is not JSON
pub fn read_event_commits(path: &Path) -> Result<Option<Vec<String>>> {
    let content = fs::read_to_string(path)?;
    let payload: EventPayload = serde_json::from_str(&content)?;
    Ok(payload
        .commits
        .map(|commits| commits.into_iter().map(|c| c.message).collect()))
}

/// Export `name=value` for later workflow steps.
///
/// Appends to the output file when one is configured; otherwise prints the legacy
/// `::set-output` workflow command on stdout.
pub fn set_output(output_path: Option<&Path>, name: &str, value: &str) -> Result<()> {
    match output_path {
        Some(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}={}", name, value)?;
        }
        None => println!("::set-output name={}::{}", name, value),
    }
    Ok(())
}
