//! Numbered markdown slides in a directory.
//!
//! A slide file name starts with its slide number: `1-intro.md`,
//! `02_agenda.md`, `10-questions.md`. Slides are looked up by exact number,
//! so slide 1 never resolves to `10-questions.md`.

use std::path::{Path, PathBuf};

use podium_renderer::{LineSeparator, MarkdownRenderer, RenderError};

/// Slide lookup or rendering error.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("Slide {0} not found")]
    NotFound(u64),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid slide pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A slide file found in the deck directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    /// Leading number of the file name, if it has one.
    pub number: Option<u64>,
    pub path: PathBuf,
}

impl Slide {
    fn from_path(path: PathBuf) -> Self {
        let number = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(leading_number);
        Self { number, path }
    }

    /// File name for display.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Slide directory plus the renderer used for its slides.
pub struct Deck {
    source_dir: PathBuf,
    extension: String,
    renderer: MarkdownRenderer,
}

impl Deck {
    /// Deck reading `*.{extension}` files from `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            extension: extension.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Join slide lines with `line_separator` before rendering.
    #[must_use]
    pub fn with_line_separator(mut self, line_separator: LineSeparator) -> Self {
        self.renderer = self.renderer.with_line_separator(line_separator);
        self
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// All slide files, ordered by number then file name.
    ///
    /// Files without a leading number sort first. A missing directory is an
    /// empty deck.
    pub fn slides(&self) -> Result<Vec<Slide>, DeckError> {
        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(&self.source_dir.to_string_lossy()),
            glob::Pattern::escape(&self.extension)
        );

        let mut slides = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(std::io::Error::from)?;
            if !path.is_file() {
                continue;
            }
            let slide = Slide::from_path(path);
            tracing::debug!(path = %slide.path.display(), number = ?slide.number, "Found slide");
            slides.push(slide);
        }

        slides.sort_by(|a, b| {
            a.number
                .unwrap_or(0)
                .cmp(&b.number.unwrap_or(0))
                .then_with(|| a.path.cmp(&b.path))
        });
        Ok(slides)
    }

    /// First slide numbered exactly `number`.
    pub fn find(&self, number: u64) -> Result<Option<Slide>, DeckError> {
        Ok(self
            .slides()?
            .into_iter()
            .find(|slide| slide.number == Some(number)))
    }

    /// Render slide `number` to an HTML fragment.
    pub fn render_slide(&self, number: u64) -> Result<String, DeckError> {
        let slide = self.find(number)?.ok_or(DeckError::NotFound(number))?;
        let file = std::fs::File::open(&slide.path)?;
        Ok(self.renderer.render_reader(file)?)
    }

    /// Render slide `number`, or a message suitable for display in its place.
    pub fn render_slide_or_placeholder(&self, number: u64) -> String {
        match self.render_slide(number) {
            Ok(html) => html,
            Err(e @ DeckError::NotFound(_)) => e.to_string(),
            Err(e) => {
                tracing::warn!(slide = number, error = %e, "Failed to render slide");
                format!("Error rendering slide {number}: {e}")
            }
        }
    }
}

/// Decimal digits at the start of `name`.
fn leading_number(name: &str) -> Option<u64> {
    let end = name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len());
    name[..end].parse().ok()
}
