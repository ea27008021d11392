//! covergen-core
//!
//! Cover-letter generation from a DOCX template: placeholder substitution,
//! default-style override, PDF conversion, and clipboard export. The binary
//! crate (`covergen-cli`) owns all user interaction.

pub mod clipboard;
pub mod config;
pub mod docx;
pub mod error;
pub mod pdf;
pub mod run;
