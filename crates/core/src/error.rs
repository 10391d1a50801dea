//! Error types for PDF text extraction and summarization.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning an uploaded PDF into a summary.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, write, or read a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not a PDF.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// The document has no pages, or no page yielded readable text.
    #[error("No readable text found in PDF.")]
    EmptyDocument,

    /// The PDF backend could not load the document.
    ///
    /// The backend detail is kept for logging and is never part of the
    /// displayed message.
    #[error("Unable to extract text from the PDF. Please upload a readable document.")]
    UnreadableDocument(String),

    /// The summarization backend failed.
    #[error("Summarization failed: {0}")]
    SummarizerError(String),

    /// The quiz generation backend failed.
    #[error("Quiz generation failed: {0}")]
    QuizError(String),
}

impl Error {
    /// Whether this error describes a problem with the uploaded document
    /// itself, in which case its message is shown to the user as-is.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::EmptyDocument | Error::UnreadableDocument(_) | Error::UnsupportedFormat(_)
        )
    }
}
