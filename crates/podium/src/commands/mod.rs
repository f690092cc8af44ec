//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod render;
pub(crate) mod slide;

use std::path::PathBuf;

use clap::Args;
use podium_config::{CliSettings, Config};
use podium_deck::Deck;

use crate::error::CliError;

pub(crate) use list::ListArgs;
pub(crate) use render::RenderArgs;
pub(crate) use slide::SlideArgs;

/// Options locating the slide deck.
#[derive(Args)]
pub(crate) struct DeckArgs {
    /// Path to configuration file (default: auto-discover podium.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Slide directory (overrides config).
    #[arg(short, long, env = "PODIUM_SOURCE_DIR")]
    source_dir: Option<PathBuf>,
}

impl DeckArgs {
    /// Load configuration and open the deck it describes.
    pub(crate) fn open(self) -> Result<Deck, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let slides = config.slides_resolved;
        Ok(Deck::new(slides.source_dir, slides.extension)
            .with_line_separator(config.render.line_separator))
    }
}
