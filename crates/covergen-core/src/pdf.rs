use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::error::PdfError;

/// External document-to-PDF converter seam.
pub trait PdfConverter {
    /// Convert the document at `docx_path`, returning the path of the PDF
    /// rendition (sibling file with a `.pdf` extension).
    fn convert(&self, docx_path: &Path) -> Result<PathBuf, PdfError>;
}

/// Shells out to LibreOffice in headless mode. The `soffice` binary must be
/// on `PATH` (or configured explicitly).
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    pub binary: String,
}

impl Default for LibreOfficeConverter {
    fn default() -> Self {
        Self {
            binary: "soffice".to_string(),
        }
    }
}

impl PdfConverter for LibreOfficeConverter {
    fn convert(&self, docx_path: &Path) -> Result<PathBuf, PdfError> {
        let out_dir = match docx_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let output = Command::new(&self.binary)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(docx_path)
            .output()
            .map_err(|source| PdfError::Launch {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PdfError::Converter {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let pdf_path = docx_path.with_extension("pdf");
        if !pdf_path.exists() {
            return Err(PdfError::MissingOutput { path: pdf_path });
        }
        info!(path = %pdf_path.display(), "PDF copy generated");
        Ok(pdf_path)
    }
}
