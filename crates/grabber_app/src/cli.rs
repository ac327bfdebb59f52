use std::path::PathBuf;

use clap::Parser;
use grabber_core::{Mode, Platform, Selection};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{} has no search mode; search is only available on TikTok", .0.display_name())]
pub struct SearchUnavailable(pub Platform);

/// Ask the media API for a video or audio track and save it locally.
#[derive(Debug, Parser)]
#[command(name = "grabber", version)]
pub struct Cli {
    /// Content source: youtube or tiktok.
    pub platform: Platform,

    /// What to fetch: video, audio, or search (tiktok only).
    pub mode: Mode,

    /// Media URL, or a username / query in search mode.
    pub input: String,

    /// RON config file.
    #[arg(long, default_value = "grabber.ron")]
    pub config: PathBuf,

    /// Directory saved files go to (overrides the config file).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Base URL of the media API (overrides the config file).
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Log level such as info or debug (overrides the config file).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// The requested selection, refusing combinations the picker would not offer.
    pub fn selection(&self) -> Result<Selection, SearchUnavailable> {
        if self.mode == Mode::Search && !self.platform.supports_search() {
            return Err(SearchUnavailable(self.platform));
        }
        Ok(Selection::new(self.platform, self.mode, self.input.as_str()))
    }
}
