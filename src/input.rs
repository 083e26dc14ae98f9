//! Reading error inputs.
//!
//! An input is either a JSON document (an error object, or any other value)
//! or raw stack text as printed by a runtime.

use crate::parser::lexer::scrape_kind_token;
use crate::parser::{ErrorInput, RawError};
use crate::utils::error::InputError;
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read an input from a file, or from stdin when no path is given
pub fn read_input(path: Option<&Path>) -> Result<ErrorInput, InputError> {
    let contents = match path {
        Some(path) => {
            debug!("Reading input from {}", path.display());
            fs::read_to_string(path)?
        }
        None => {
            debug!("Reading input from stdin");
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    parse_input(&contents)
}

/// Classify input text
///
/// # Errors
/// * `InputError::Empty` - If the text is blank
pub fn parse_input(contents: &str) -> Result<ErrorInput, InputError> {
    if contents.trim().is_empty() {
        return Err(InputError::Empty);
    }

    match serde_json::from_str::<serde_json::Value>(contents) {
        Ok(value) => Ok(ErrorInput::from_json(&value)),
        Err(e) => {
            debug!("Input is not JSON ({}), treating it as stack text", e);
            Ok(ErrorInput::Raw(raw_from_stack_text(contents)))
        }
    }
}

/// Build a raw error from printed stack text
///
/// The first line supplies the message, minus its `Kind: ` prefix.
pub fn raw_from_stack_text(text: &str) -> RawError {
    let first_line = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
    let message = match scrape_kind_token(first_line) {
        Some(kind) => &first_line[kind.len() + 2..],
        None => first_line,
    };

    RawError::new(message.trim(), text)
}
