//! Core domain types, text cleaning, and prompt construction
//! for PDF summarization.

pub mod error;
pub mod normalize;
pub mod prompt;
pub mod types;

pub use error::{Error, Result};
pub use normalize::TextNormalizer;
pub use prompt::{
    quiz_prompt, summary_prompt, PromptQuizGenerator, PromptSummarizer, QuizGenerator, Summarizer,
};
pub use types::{CleanedText, Document, DocumentReader, Page};
