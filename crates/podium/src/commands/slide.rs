//! `podium slide` command implementation.

use clap::Args;

use super::DeckArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the slide command.
#[derive(Args)]
pub(crate) struct SlideArgs {
    /// Slide number.
    number: u64,

    #[command(flatten)]
    deck: DeckArgs,

    /// Fail instead of printing a placeholder when the slide cannot be rendered.
    #[arg(long)]
    strict: bool,
}

impl SlideArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let deck = self.deck.open()?;
        let html = if self.strict {
            deck.render_slide(self.number)?
        } else {
            deck.render_slide_or_placeholder(self.number)
        };
        output.content(&html)?;
        Ok(())
    }
}
