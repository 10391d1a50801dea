//! Domain types for representing extracted document content.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// An extracted document: page texts in reading order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Original filename (without path).
    pub filename: String,

    /// Pages in document order.
    pub pages: Vec<Page>,
}

impl Document {
    /// Create an empty document with the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            pages: Vec::new(),
        }
    }

    /// Build a document from raw page texts, numbering pages from 1.
    pub fn from_texts<I, S>(filename: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut document = Self::new(filename);
        for text in texts {
            document.add_page(text);
        }
        document
    }

    /// Append a page, numbering it after the last one.
    pub fn add_page(&mut self, text: impl Into<String>) {
        let number = self.pages.len() + 1;
        self.pages.push(Page::new(number, text));
    }

    /// Page texts in order.
    pub fn page_texts(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.text.as_str()).collect()
    }

    /// Number of pages that carry any non-whitespace text.
    pub fn readable_page_count(&self) -> usize {
        self.pages.iter().filter(|p| !p.is_blank()).count()
    }
}

/// A single extracted page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,

    /// Extracted text; empty when the page had nothing extractable.
    pub text: String,
}

impl Page {
    /// Create a new page.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Whether the page is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Cleaned, flattened document text. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleanedText(String);

impl CleanedText {
    /// Wrap already-cleaned text. Returns `None` for empty input.
    pub(crate) fn new(text: String) -> Option<Self> {
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CleanedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for CleanedText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CleanedText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A backend that turns a file on disk into a [`Document`].
pub trait DocumentReader {
    /// Read the document at `path`.
    fn read_path(&self, path: &Path) -> Result<Document>;
}

impl<T: DocumentReader + ?Sized> DocumentReader for &T {
    fn read_path(&self, path: &Path) -> Result<Document> {
        (**self).read_path(path)
    }
}

impl<T: DocumentReader + ?Sized> DocumentReader for Box<T> {
    fn read_path(&self, path: &Path) -> Result<Document> {
        (**self).read_path(path)
    }
}
