//! Markdown file export
//!
//! Writes the composed document to disk exactly as composed, so the exported
//! file and the preview are byte-identical.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name used when no output path is configured
pub const DEFAULT_FILE_NAME: &str = "README.md";

/// Media type of the exported document
pub const CONTENT_TYPE: &str = "text/markdown";

/// Errors that can occur during export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write a composed document to `output_path`
///
/// # Parameters
/// * `document` - The composed markdown
/// * `output_path` - Destination file; parent directories are created
///
/// # Returns
/// * `Ok(())` - Successfully written
/// * `Err(ExportError)` - Error creating directories or writing the file
pub fn write_document(document: &str, output_path: &Path) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: output_path.to_path_buf(),
        source,
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut file = fs::File::create(output_path).map_err(io_error)?;
    file.write_all(document.as_bytes()).map_err(io_error)?;

    log::info!(
        "Wrote {} bytes of {} to {}",
        document.len(),
        CONTENT_TYPE,
        output_path.display()
    );
    Ok(())
}
