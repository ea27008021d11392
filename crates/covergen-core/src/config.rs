use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tool configuration: where the template lives, where letters go, which
/// placeholder tokens to substitute, and the font to stamp onto the default
/// paragraph style.
///
/// Loaded from `<config-dir>/covergen/config.json` when present; every field
/// falls back to the documented default otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory containing the template document.
    pub template_dir: PathBuf,

    /// Template file name inside `template_dir`.
    pub template_file: String,

    /// Directory finished letters are written to. Must already exist.
    pub destination_dir: PathBuf,

    /// Substring marking where the company name goes. Pick something unique
    /// enough not to collide with real letter text.
    pub company_token: String,

    /// Substring marking where the position title goes.
    pub position_token: String,

    /// Font family applied to the default paragraph style.
    pub font_name: String,

    /// Font size in points applied to the default paragraph style.
    pub font_size_pt: usize,
}

impl Default for Config {
    fn default() -> Self {
        let documents = dirs::document_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            template_dir: documents.clone(),
            template_file: "Cover Letter - Template.docx".to_string(),
            destination_dir: documents.join("Cover Letters"),
            company_token: "[Target Company]".to_string(),
            position_token: "[Target Position]".to_string(),
            font_name: "Segoe UI".to_string(),
            font_size_pt: 11,
        }
    }
}

fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("covergen"))
}

fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json"))
}

impl Config {
    /// Load the config file, or defaults when none has been saved yet.
    pub fn load() -> Result<Config, ConfigError> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let dir = config_dir()?;
        fs::create_dir_all(&dir).map_err(|source| ConfigError::Write {
            path: dir.clone(),
            source,
        })?;
        let path = dir.join("config.json");
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(&self.template_file)
    }

    /// File name for a finished letter: `Cover Letter - <company>.docx`.
    /// The company string is used verbatim.
    pub fn output_file_name(company: &str) -> String {
        format!("Cover Letter - {company}.docx")
    }

    pub fn output_path(&self, company: &str) -> PathBuf {
        self.destination_dir.join(Self::output_file_name(company))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_name_is_deterministic() {
        assert_eq!(
            Config::output_file_name("Acme Corp"),
            "Cover Letter - Acme Corp.docx"
        );
    }

    #[test]
    fn output_path_joins_destination_dir() {
        let config = Config {
            destination_dir: PathBuf::from("/tmp/letters"),
            ..Config::default()
        };
        assert_eq!(
            config.output_path("Acme Corp"),
            PathBuf::from("/tmp/letters/Cover Letter - Acme Corp.docx")
        );
    }

    #[test]
    fn defaults_carry_the_placeholder_tokens() {
        let config = Config::default();
        assert_eq!(config.company_token, "[Target Company]");
        assert_eq!(config.position_token, "[Target Position]");
        assert_eq!(config.font_size_pt, 11);
    }
}
