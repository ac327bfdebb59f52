use thiserror::Error;

use crate::{Mode, Platform, Selection};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", empty_input_message(.mode))]
    EmptyInput { mode: Mode },
    #[error("Please provide a valid {} URL", .platform.display_name())]
    InvalidUrl { platform: Platform },
}

impl ValidationError {
    /// Short notification title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput { .. } => "Missing input",
            ValidationError::InvalidUrl { .. } => "Invalid URL",
        }
    }
}

fn empty_input_message(mode: &Mode) -> &'static str {
    if *mode == Mode::Search {
        "Please provide a username"
    } else {
        "Please provide a URL"
    }
}

/// Checks a selection before anything is sent.
///
/// The URL check is a plain substring test on the untrimmed input; it is not
/// URL parsing.
pub fn validate(selection: &Selection) -> Result<(), ValidationError> {
    let input = selection.input_text();
    let mode = selection.mode();

    if input.trim().is_empty() {
        return Err(ValidationError::EmptyInput { mode });
    }

    if mode != Mode::Search {
        let platform = selection.platform();
        if !input.contains(platform.url_marker()) {
            return Err(ValidationError::InvalidUrl { platform });
        }
    }

    Ok(())
}
