//! Document output.
//!
//! Documents are rendered fully in memory before anything touches the
//! filesystem; files are replaced atomically so a failed run never leaves a
//! partial config behind.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `contents` to `path` via a temporary file in the same directory
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Failed to create directory '{}'", dir.display()))?;

    let mut temp = NamedTempFile::new_in(dir)
        .wrap_err_with(|| format!("Failed to create temporary file in '{}'", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .wrap_err("Failed to write configuration")?;
    temp.persist(path)
        .wrap_err_with(|| format!("Failed to move configuration into place at '{}'", path.display()))?;
    Ok(())
}

/// Write the document to `path`, or to stdout when no path is given
pub fn emit_document(path: Option<&Path>, document: &str) -> Result<()> {
    match path {
        Some(path) => {
            write_atomically(path, document)?;
            info!("Wrote configuration to {:?}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(document.as_bytes()).wrap_err("Failed to write to stdout")?;
            handle.flush().wrap_err("Failed to flush stdout")?;
        }
    }
    Ok(())
}
