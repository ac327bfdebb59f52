use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Youtube,
    Tiktok,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
        }
    }

    /// Human-facing name used in validation messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube",
            Platform::Tiktok => "TikTok",
        }
    }

    /// Substring a URL for this platform must contain.
    pub(crate) fn url_marker(self) -> &'static str {
        match self {
            Platform::Youtube => "youtu",
            Platform::Tiktok => "tiktok",
        }
    }

    pub fn supports_search(self) -> bool {
        matches!(self, Platform::Tiktok)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Video,
    Audio,
    Search,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Video => "video",
            Mode::Audio => "audio",
            Mode::Search => "search",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseSelectionError {
    kind: &'static str,
    value: String,
}

impl FromStr for Platform {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            "tiktok" => Ok(Platform::Tiktok),
            _ => Err(ParseSelectionError {
                kind: "platform",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Mode {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(Mode::Video),
            "audio" => Ok(Mode::Audio),
            "search" => Ok(Mode::Search),
            _ => Err(ParseSelectionError {
                kind: "mode",
                value: s.to_string(),
            }),
        }
    }
}

/// The request configuration the user is editing.
///
/// `Mode::Search` is only reachable while the platform supports search; the
/// setters keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    platform: Platform,
    mode: Mode,
    input_text: String,
}

impl Selection {
    /// Builds a selection, demoting `Search` to `Video` on platforms without search.
    pub fn new(platform: Platform, mode: Mode, input_text: impl Into<String>) -> Self {
        let mut selection = Self {
            platform,
            mode: Mode::Video,
            input_text: input_text.into(),
        };
        selection.set_mode(mode);
        selection
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = platform;
        if self.mode == Mode::Search && !platform.supports_search() {
            self.mode = Mode::Video;
        }
    }

    /// Returns `false` (and leaves the mode unchanged) when the mode is not
    /// available on the current platform.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if mode == Mode::Search && !self.platform.supports_search() {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn clear_input(&mut self) {
        self.input_text.clear();
    }
}
