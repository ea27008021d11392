use std::path::PathBuf;

use tracing::info;

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::docx;
use crate::error::RunError;
use crate::pdf::PdfConverter;

/// One run's worth of user input.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub company: String,
    pub position: String,
    pub copy_to_clipboard: bool,
    pub make_pdf: bool,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Paragraphs in which the company placeholder was replaced.
    pub company_replacements: usize,
    /// Paragraphs in which the position placeholder was replaced.
    pub position_replacements: usize,
    pub output_path: PathBuf,
    pub pdf_path: Option<PathBuf>,
    pub clipboard_written: bool,
}

/// Execute the whole pipeline: load the template, restyle it, substitute both
/// placeholders in the target cell, save the letter, then the optional PDF
/// conversion and clipboard copy.
pub fn run(
    config: &Config,
    request: &RunRequest,
    converter: &dyn PdfConverter,
    clipboard: &mut dyn Clipboard,
) -> Result<RunSummary, RunError> {
    let template_path = config.template_path();
    let docx = docx::load_template(&template_path)?;
    let mut docx = docx::apply_default_style(docx, &config.font_name, config.font_size_pt);

    let target = docx::find_target_cell(&docx, &config.company_token)?;
    let company_replacements =
        docx::replace_in_cell(&mut docx, &target, &config.company_token, &request.company)?;
    let position_replacements =
        docx::replace_in_cell(&mut docx, &target, &config.position_token, &request.position)?;

    // Captured before save consumes the document; this is the post-substitution
    // text of the letter body.
    let letter_text = docx::cell_text(&docx, &target)?;

    let output_path = config.output_path(&request.company);
    docx::save(docx, &output_path)?;

    let pdf_path = if request.make_pdf {
        Some(converter.convert(&output_path)?)
    } else {
        None
    };

    let clipboard_written = if request.copy_to_clipboard {
        clipboard.set_text(&letter_text)?;
        info!("letter text copied to clipboard");
        true
    } else {
        false
    };

    Ok(RunSummary {
        company_replacements,
        position_replacements,
        output_path,
        pdf_path,
        clipboard_written,
    })
}
