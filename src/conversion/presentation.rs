// conversion/presentation.rs
//! Presentation to PDF export. Needs a presentation application, so it sits behind a
//! trait and degrades to an error on platforms that lack one.

use crate::error::Error;
use std::path::Path;

pub trait PresentationExporter {
    fn name(&self) -> &str;
    fn export_pdf(&self, input: &Path, output: &Path) -> Result<(), Error>;
}

/// Always fails with `Error::PresentationUnavailable`.
pub struct UnavailablePresentationExporter {
    reason: String,
}

impl UnavailablePresentationExporter {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PresentationExporter for UnavailablePresentationExporter {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn export_pdf(&self, _input: &Path, _output: &Path) -> Result<(), Error> {
        Err(Error::PresentationUnavailable(self.reason.clone()))
    }
}

#[cfg(target_os = "windows")]
pub use powerpoint::PowerPointExporter;

#[cfg(target_os = "windows")]
mod powerpoint {
    use super::PresentationExporter;
    use crate::error::Error;
    use std::os::windows::process::CommandExt;
    use std::path::{self, Path};
    use std::process::Command;

    // ppSaveAsPDF
    const SAVE_AS_PDF: u32 = 32;

    /// Drives PowerPoint through COM automation from PowerShell.
    pub struct PowerPointExporter;

    impl PresentationExporter for PowerPointExporter {
        fn name(&self) -> &str {
            "PowerPoint"
        }

        fn export_pdf(&self, input: &Path, output: &Path) -> Result<(), Error> {
            let script = format!(
                "$ErrorActionPreference = 'Stop'; \
                 $app = New-Object -ComObject PowerPoint.Application; \
                 try {{ \
                     $deck = $app.Presentations.Open($env:CONVERTER_INPUT, $true, $false, $false); \
                     $deck.SaveAs($env:CONVERTER_OUTPUT, {SAVE_AS_PDF}); \
                     $deck.Close() \
                 }} finally {{ $app.Quit() }}"
            );

            let result = Command::new("powershell")
                .args(["-NoProfile", "-NonInteractive", "-Command", script.as_str()])
                .env("CONVERTER_INPUT", path::absolute(input)?)
                .env("CONVERTER_OUTPUT", path::absolute(output)?)
                .creation_flags(0x08000000) // CREATE_NO_WINDOW
                .output()?;

            if !result.status.success() {
                return Err(Error::ToolFailed {
                    tool: self.name().to_string(),
                    status: result.status.to_string(),
                    stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
                });
            }
            if !output.is_file() {
                return Err(Error::ToolProducedNothing {
                    tool: self.name().to_string(),
                    expected: output.to_path_buf(),
                });
            }
            Ok(())
        }
    }
}

/// The exporter this platform supports.
pub fn platform_exporter() -> Box<dyn PresentationExporter> {
    #[cfg(target_os = "windows")]
    {
        Box::new(PowerPointExporter)
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(UnavailablePresentationExporter::new(
            "PPTX export requires Microsoft PowerPoint on Windows",
        ))
    }
}
