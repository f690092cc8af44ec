//! CLI error types.

use podium_config::ConfigError;
use podium_deck::DeckError;
use podium_renderer::RenderError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Deck(#[from] DeckError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
