//! Render error types.

/// Error returned by a render call.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A blockquote holds more than one `~` attribution separator.
    #[error(
        "Blockquote content must be in the format: \"quote~author\" or \"quote\" (found {fragments} parts)"
    )]
    MalformedQuote {
        /// Number of `~`-separated parts after dropping trailing empty ones.
        fragments: usize,
    },
    /// The markdown source could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
