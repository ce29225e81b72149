//! Tests for the validate command module.
//!
//! Tests are organized into logical groups:
//! - `command_tests`: Context assembly, root module lookup and failures
//! - `format_tests`: Output formatting (JSON, text, quiet, strict)


use std::path::PathBuf;

use super::{ConfigKind, OutputFormat, ValidateCommand};

/// A quiet text-mode command for `file`.
fn command(file: PathBuf, kind: ConfigKind) -> ValidateCommand {
    ValidateCommand {
        file,
        kind,
        root: None,
        app_version: None,
        module_name: None,
        module_version: None,
        format: OutputFormat::Text,
        strict: false,
    }
}
