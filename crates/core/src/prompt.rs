//! Prompt construction and the summarization/quiz capabilities.
//!
//! No language model is called here. The default backends return the prompt
//! that a real model would receive, so the assistant shows the instruction
//! text as a placeholder summary or quiz.

use crate::Result;

/// Message returned when a quiz is requested for empty text.
pub const EMPTY_QUIZ_MESSAGE: &str = "No quiz can be generated for empty text.";

/// Build the summarization prompt for `text`.
pub fn summary_prompt(text: &str) -> String {
    format!(
        "Please summarize the following document, focusing on key ideas and important points. \
         Ensure the summary is clear, concise, and structured with short, readable paragraphs:\
         \n\n{}\n\nSummary:",
        text
    )
}

/// Build the quiz-generation prompt for `text`.
pub fn quiz_prompt(text: &str) -> String {
    format!(
        "Based on the following text, please generate a quiz. It can include Multiple Choice \
         Questions (MCQs) or mixed-style questions. Focus on important facts and concepts:\
         \n\n{}\n\nQuiz:",
        text
    )
}

/// Something that turns document text into a summary.
pub trait Summarizer {
    fn summarize(&self, text: &str) -> Result<String>;
}

/// Something that turns document text into quiz questions.
pub trait QuizGenerator {
    fn generate_quiz(&self, text: &str) -> Result<Vec<String>>;
}

impl<T: Summarizer + ?Sized> Summarizer for &T {
    fn summarize(&self, text: &str) -> Result<String> {
        (**self).summarize(text)
    }
}

impl<T: Summarizer + ?Sized> Summarizer for Box<T> {
    fn summarize(&self, text: &str) -> Result<String> {
        (**self).summarize(text)
    }
}

impl<T: QuizGenerator + ?Sized> QuizGenerator for &T {
    fn generate_quiz(&self, text: &str) -> Result<Vec<String>> {
        (**self).generate_quiz(text)
    }
}

impl<T: QuizGenerator + ?Sized> QuizGenerator for Box<T> {
    fn generate_quiz(&self, text: &str) -> Result<Vec<String>> {
        (**self).generate_quiz(text)
    }
}

/// Placeholder summarizer that returns the unexecuted prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptSummarizer;

impl PromptSummarizer {
    pub fn new() -> Self {
        Self
    }
}

impl Summarizer for PromptSummarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        Ok(summary_prompt(text))
    }
}

/// Placeholder quiz generator that returns the unexecuted prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptQuizGenerator;

impl PromptQuizGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl QuizGenerator for PromptQuizGenerator {
    fn generate_quiz(&self, text: &str) -> Result<Vec<String>> {
        if text.is_empty() {
            return Ok(vec![EMPTY_QUIZ_MESSAGE.to_string()]);
        }
        Ok(vec![quiz_prompt(text)])
    }
}
