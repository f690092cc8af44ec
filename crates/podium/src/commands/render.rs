//! `podium render` command implementation.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin).
    file: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let html = match self.file {
            Some(path) => podium_renderer::render_markdown_from_reader(File::open(path)?)?,
            None => podium_renderer::render_markdown_from_reader(io::stdin().lock())?,
        };
        output.content(&html)?;
        Ok(())
    }
}
