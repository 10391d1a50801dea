//! Text cleaning for extracted PDF pages.
//!
//! Flattens page and paragraph structure into one running string, rejoins
//! words split by end-of-line hyphenation, and drops bare numbers (usually
//! page numbers). All rules are heuristics: they can over-merge legitimate
//! hyphenated compounds and remove numbers that were real content. Running
//! the normalizer over its own output is not guaranteed to be a no-op.

use crate::{CleanedText, Document, Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Regex matching runs of newlines.
static NEWLINE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Regex matching a word broken by a hyphen followed by whitespace.
static HYPHEN_BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)-\s+(\w+)").unwrap());

/// Regex matching digit runs together with the whitespace around them.
static DIGIT_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\d+\s*").unwrap());

/// Cleans raw per-page PDF text into a single string for summarization.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Whether to merge `word-\nword` back into `wordword`.
    rejoin_hyphens: bool,

    /// Whether to drop digit runs (page numbers).
    strip_page_numbers: bool,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            rejoin_hyphens: true,
            strip_page_numbers: true,
        }
    }
}

impl TextNormalizer {
    /// Create a normalizer with every cleaning rule enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether hyphen-split words are rejoined.
    pub fn with_rejoin_hyphens(mut self, rejoin: bool) -> Self {
        self.rejoin_hyphens = rejoin;
        self
    }

    /// Set whether bare digit runs are removed.
    pub fn with_strip_page_numbers(mut self, strip: bool) -> Self {
        self.strip_page_numbers = strip;
        self
    }

    /// Normalize page texts into one cleaned string.
    ///
    /// - Joins non-empty pages with `\n`, in order
    /// - Replaces each run of newlines with a single space
    /// - Rejoins hyphen-split words (`co- operative` becomes `cooperative`)
    /// - Replaces each digit run and its surrounding whitespace with a space
    /// - Trims the result
    ///
    /// Fails with [`Error::EmptyDocument`] when there are no pages, every page
    /// is blank, or the rules leave nothing behind.
    pub fn normalize<S: AsRef<str>>(&self, pages: &[S]) -> Result<CleanedText> {
        if pages.iter().all(|p| p.as_ref().trim().is_empty()) {
            log::debug!("No readable text in {} page(s)", pages.len());
            return Err(Error::EmptyDocument);
        }

        let combined = pages
            .iter()
            .map(|p| p.as_ref())
            .filter(|p: &&str| !p.is_empty())
            .collect::<Vec<&str>>()
            .join("\n");

        let mut cleaned = NEWLINE_RUN_REGEX.replace_all(&combined, " ").into_owned();

        if self.rejoin_hyphens {
            cleaned = HYPHEN_BREAK_REGEX
                .replace_all(&cleaned, "${1}${2}")
                .into_owned();
        }

        if self.strip_page_numbers {
            cleaned = DIGIT_RUN_REGEX.replace_all(&cleaned, " ").into_owned();
        }

        log::debug!(
            "Normalized {} page(s): {} -> {} bytes",
            pages.len(),
            combined.len(),
            cleaned.len()
        );

        CleanedText::new(cleaned.trim().to_string()).ok_or(Error::EmptyDocument)
    }

    /// Normalize every page of an extracted document.
    pub fn normalize_document(&self, document: &Document) -> Result<CleanedText> {
        self.normalize(&document.page_texts())
    }
}
