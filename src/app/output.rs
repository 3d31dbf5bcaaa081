//! Result output.
//!
//! Results are printed as pretty JSON to stdout, or written to a file when an
//! output path is given.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Writes `value` as pretty-printed JSON to `output`, or to stdout when `None`.
///
/// Missing parent directories of `output` are created.
pub fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize results")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Couldn't create output directory {}", parent.display())
                })?;
            }
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Couldn't write output file {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
