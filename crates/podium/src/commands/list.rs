//! `podium list` command implementation.

use clap::Args;

use super::DeckArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    deck: DeckArgs,
}

impl ListArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let deck = self.deck.open()?;
        let slides = deck.slides()?;
        if slides.is_empty() {
            output.warning(&format!(
                "No slides found in {}",
                deck.source_dir().display()
            ));
            return Ok(());
        }

        for slide in &slides {
            match slide.number {
                Some(number) => output.line(&format!("{number:>4}  {}", slide.file_name()))?,
                None => output.hint(&format!("   -  {} (no slide number)", slide.file_name())),
            }
        }
        Ok(())
    }
}
