use std::io::{self, BufRead, Write};

use eyre::Result;

use covergen_core::clipboard::SystemClipboard;
use covergen_core::config::Config;
use covergen_core::pdf::LibreOfficeConverter;
use covergen_core::run::{RunRequest, run};

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let company = prompt(&mut lines, "What is the company name?")?;
    let position = prompt(&mut lines, "What is the position?")?;
    let clipboard_answer = prompt(&mut lines, "Copy text to clipboard? (y/n)")?;
    let pdf_answer = prompt(&mut lines, "Would you like a PDF copy? (y/n)")?;

    let request = RunRequest {
        company,
        position,
        copy_to_clipboard: is_yes(&clipboard_answer),
        make_pdf: is_yes(&pdf_answer),
    };

    let converter = LibreOfficeConverter::default();
    let mut clipboard = SystemClipboard;
    let summary = run(&config, &request, &converter, &mut clipboard)?;

    println!(
        "{} replaced with {}: {}",
        config.company_token, request.company, summary.company_replacements
    );
    println!(
        "{} replaced with {}: {}",
        config.position_token, request.position, summary.position_replacements
    );
    if summary.pdf_path.is_some() {
        println!("PDF copy generated");
    }
    if summary.clipboard_written {
        println!("Cover letter text copied to clipboard");
    }
    println!("All done!");

    Ok(())
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, question: &str) -> Result<String> {
    println!("{question}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(eyre::eyre!("stdin closed before all questions were answered")),
    }
}

/// Anything other than `y` (after trimming, case-insensitive) means no.
fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_y_means_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" Y "));
        assert!(!is_yes("yes"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }

    #[test]
    fn prompt_reads_answers_in_order() {
        let input = b"Acme Corp\nSenior Engineer\n" as &[u8];
        let mut lines = io::BufReader::new(input).lines();
        assert_eq!(prompt(&mut lines, "company?").unwrap(), "Acme Corp");
        assert_eq!(prompt(&mut lines, "position?").unwrap(), "Senior Engineer");
        assert!(prompt(&mut lines, "clipboard?").is_err());
    }
}
