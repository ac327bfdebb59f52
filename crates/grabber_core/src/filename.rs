use std::sync::LazyLock;

use regex::Regex;

use crate::{Mode, Platform};

static DISPOSITION_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"filename="?([^";\n]+)"?"#).expect("static filename pattern")
});

/// Picks the name the payload is saved under.
///
/// Order: `filename=` token from the disposition header, else
/// `{platform}_{mode}_{epoch_millis}`. A name without any `.` gets `.mp3`
/// for audio and `.mp4` otherwise.
pub fn resolve_filename(
    content_disposition: Option<&str>,
    platform: Platform,
    mode: Mode,
    epoch_millis: i64,
) -> String {
    let mut name = content_disposition
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| format!("{platform}_{mode}_{epoch_millis}"));

    if !name.contains('.') {
        name.push_str(if mode == Mode::Audio { ".mp3" } else { ".mp4" });
    }
    name
}

fn filename_from_disposition(header: &str) -> Option<String> {
    let raw = DISPOSITION_FILENAME.captures(header)?.get(1)?.as_str();
    let sanitized = sanitize(raw);
    (!sanitized.is_empty()).then_some(sanitized)
}

fn sanitize(input: &str) -> String {
    // Only runs produced by replacement collapse; underscores the server sent stay.
    let mut replaced = String::with_capacity(input.len());
    let mut prev_replaced = false;
    for c in input.chars() {
        if is_forbidden(c) {
            if !prev_replaced {
                replaced.push('_');
            }
            prev_replaced = true;
        } else {
            replaced.push(c);
            prev_replaced = false;
        }
    }

    let mut name = replaced.trim_matches(&['_', ' ', '.'][..]).to_string();
    if is_reserved_windows_name(&name) {
        let stem_end = name.find('.').unwrap_or(name.len());
        name.insert(stem_end, '_');
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    let stem = name.split('.').next().unwrap_or(name);
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(stem))
}
