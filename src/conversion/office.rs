// conversion/office.rs
//! Headless LibreOffice, used for the conversions no library here can do natively.

use crate::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const TOOL: &str = "LibreOffice";
const PATH_CANDIDATES: [&str; 2] = ["soffice", "libreoffice"];

#[cfg(target_os = "windows")]
const INSTALL_CANDIDATES: &[&str] = &[
    r"C:\Program Files\LibreOffice\program\soffice.exe",
    r"C:\Program Files (x86)\LibreOffice\program\soffice.exe",
];
#[cfg(target_os = "macos")]
const INSTALL_CANDIDATES: &[&str] = &["/Applications/LibreOffice.app/Contents/MacOS/soffice"];
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const INSTALL_CANDIDATES: &[&str] = &["/usr/bin/soffice", "/usr/lib/libreoffice/program/soffice"];

pub struct OfficeSuite {
    executable: Option<PathBuf>,
}

impl OfficeSuite {
    /// `executable` overrides the lookup on `PATH` when set.
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self { executable }
    }

    pub fn locate(&self) -> Result<PathBuf, Error> {
        if let Some(path) = &self.executable {
            if path.is_file() {
                return Ok(path.clone());
            }
            return Err(Error::ToolNotFound {
                tool: TOOL,
                searched: path.display().to_string(),
            });
        }

        PATH_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok())
            .or_else(|| {
                INSTALL_CANDIDATES
                    .iter()
                    .map(|path| PathBuf::from(*path))
                    .find(|path| path.is_file())
            })
            .ok_or_else(|| Error::ToolNotFound {
                tool: TOOL,
                searched: PATH_CANDIDATES
                    .iter()
                    .chain(INSTALL_CANDIDATES)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    pub fn docx_to_pdf(&self, input: &Path, output: &Path) -> Result<(), Error> {
        self.convert(input, output, "pdf", None)
    }

    /// Every page of the PDF is imported through the Writer PDF filter.
    pub fn pdf_to_docx(&self, input: &Path, output: &Path) -> Result<(), Error> {
        self.convert(input, output, "docx:MS Word 2007 XML", Some("writer_pdf_import"))
    }

    fn convert(
        &self,
        input: &Path,
        output: &Path,
        target: &str,
        import_filter: Option<&str>,
    ) -> Result<(), Error> {
        let executable = self.locate()?;
        let staging = tempfile::tempdir()?;
        let profile = staging.path().join("profile");
        let out_dir = staging.path().join("out");
        fs::create_dir_all(&out_dir)?;

        let mut command = Command::new(&executable);
        command
            .arg(format!("-env:UserInstallation={}", file_url(&profile)))
            .arg("--headless")
            .arg("--norestore");
        if let Some(filter) = import_filter {
            command.arg(format!("--infilter={filter}"));
        }
        command
            .arg("--convert-to")
            .arg(target)
            .arg("--outdir")
            .arg(&out_dir)
            .arg(input);

        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(0x08000000); // CREATE_NO_WINDOW
        }

        tracing::debug!(?command, "running office suite");
        let result = command.output()?;
        let tool = executable.display().to_string();
        if !result.status.success() {
            return Err(Error::ToolFailed {
                tool,
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let extension = target.split(':').next().unwrap_or(target);
        let mut file_name = input.file_stem().unwrap_or_default().to_os_string();
        file_name.push(".");
        file_name.push(extension);
        let produced = out_dir.join(file_name);
        if !produced.is_file() {
            return Err(Error::ToolProducedNothing {
                tool,
                expected: produced,
            });
        }

        fs::copy(&produced, output)?;
        Ok(())
    }
}

/// `file://` URL form of an absolute path, as LibreOffice expects for `-env:` settings.
fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{path}")
    } else {
        format!("file:///{path}")
    }
}
