// conversion/staging.rs
use crate::error::Error;
use std::fs::File;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `output` through a temporary file in the same directory, renamed into place
/// only when `write` succeeds. On failure the temporary file is removed and an existing
/// `output` is left as it was.
pub fn write_staged<F>(output: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&mut File) -> Result<(), Error>,
{
    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(directory)?;
    write(staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    staged.persist(output).map_err(|err| Error::Io(err.error))?;
    Ok(())
}
