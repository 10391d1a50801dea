//! The assistant: turns chat events into replies.

use crate::message::{Action, IncomingMessage, Reply, SessionContext};
use pdfsum_core::{
    CleanedText, DocumentReader, Error, PromptQuizGenerator, PromptSummarizer, QuizGenerator,
    Result, Summarizer, TextNormalizer,
};
use pdfsum_pdf::PdfReader;
use std::io::Write;

/// Author shown on every assistant reply.
pub const AUTHOR: &str = "Assistant";

const WELCOME_MESSAGE: &str =
    "Welcome to the PDF Summarizer! Please upload a PDF document to get started.";
const NO_PDF_MESSAGE: &str = "Please upload a PDF file to summarize.";
const NO_TEXT_FOR_QUIZ_MESSAGE: &str =
    "No PDF text found to generate a quiz. Please upload a PDF first.";

/// Chat assistant that summarizes uploaded PDFs.
///
/// The reader, summarizer and quiz generator are injected; the defaults read
/// PDFs with `lopdf` and return unexecuted prompts instead of model output.
#[derive(Debug, Clone)]
pub struct Assistant<R = PdfReader, S = PromptSummarizer, Q = PromptQuizGenerator> {
    reader: R,
    normalizer: TextNormalizer,
    summarizer: S,
    quiz_generator: Q,
}

impl Default for Assistant {
    fn default() -> Self {
        Self::with_backends(PdfReader::new(), PromptSummarizer::new(), PromptQuizGenerator::new())
    }
}

impl Assistant {
    /// Create an assistant with the PDF reader and prompt placeholders.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R, S, Q> Assistant<R, S, Q>
where
    R: DocumentReader,
    S: Summarizer,
    Q: QuizGenerator,
{
    /// Create an assistant with custom backends.
    pub fn with_backends(reader: R, summarizer: S, quiz_generator: Q) -> Self {
        Self {
            reader,
            normalizer: TextNormalizer::new(),
            summarizer,
            quiz_generator,
        }
    }

    /// Replace the text normalizer.
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Greeting for a new chat.
    pub fn welcome(&self) -> Reply {
        Reply::new(WELCOME_MESSAGE)
    }

    /// Handle a user message, summarizing the first attached PDF.
    ///
    /// Never fails: every error becomes a reply. On success the cleaned text
    /// is stored in `session` for a later quiz request.
    pub fn handle_message(
        &self,
        message: &IncomingMessage,
        session: &mut SessionContext,
    ) -> Vec<Reply> {
        let pdfs = message.pdf_attachments();
        let Some(upload) = pdfs.first() else {
            return vec![Reply::new(NO_PDF_MESSAGE)];
        };

        if pdfs.len() > 1 {
            log::debug!("{} PDFs attached, only {} is processed", pdfs.len(), upload.name);
        }

        let mut replies = vec![Reply::new(format!("Processing `{}`...", upload.name))];

        let Some(content) = upload.content.as_deref() else {
            log::warn!("Upload {} arrived without content", upload.name);
            replies.push(Reply::new(format!(
                "Error: Could not retrieve content for `{}`. Please try uploading again.",
                upload.name
            )));
            return replies;
        };

        if let Err(e) = self.summarize_upload(content, session, &mut replies) {
            replies.push(error_reply(&e));
        }

        replies
    }

    /// Handle a button press.
    pub fn handle_action(&self, action: Action, session: &SessionContext) -> Vec<Reply> {
        match action {
            Action::CreateQuiz => self.create_quiz(session),
        }
    }

    fn create_quiz(&self, session: &SessionContext) -> Vec<Reply> {
        let Some(text) = session.original_text() else {
            return vec![Reply::new(NO_TEXT_FOR_QUIZ_MESSAGE)];
        };

        let mut replies = vec![Reply::new("Generating quiz...")];
        match self.quiz_generator.generate_quiz(text.as_str()) {
            Ok(questions) => {
                replies.push(Reply::new(format!("**Quiz:**\n{}", questions.join("\n\n"))));
            }
            Err(e) => replies.push(error_reply(&e)),
        }
        replies
    }

    fn summarize_upload(
        &self,
        content: &[u8],
        session: &mut SessionContext,
        replies: &mut Vec<Reply>,
    ) -> Result<()> {
        let text = self.extract_upload(content)?;
        session.set_original_text(text.clone());

        replies.push(Reply::new("Generating summary..."));
        let summary = self.summarizer.summarize(text.as_str())?;
        replies.push(Reply::new(format!("**Summary:**\n{}", summary)));

        replies.push(
            Reply::new("Summary generated successfully!").with_action(Action::CreateQuiz),
        );
        Ok(())
    }

    /// Save the upload to a temporary file, read it, and clean its text.
    ///
    /// The temporary file is removed when it goes out of scope, on every
    /// return path.
    fn extract_upload(&self, content: &[u8]) -> Result<CleanedText> {
        let mut upload = tempfile::Builder::new()
            .prefix("pdfsum-")
            .suffix(".pdf")
            .tempfile()?;
        upload.write_all(content)?;
        upload.flush()?;
        log::debug!(
            "Saved {} byte upload to {}",
            content.len(),
            upload.path().display()
        );

        let document = self
            .reader
            .read_path(upload.path())
            .map_err(|e| match e {
                Error::IoError(io) => {
                    log::error!("Error reading back upload {}: {}", upload.path().display(), io);
                    Error::UnreadableDocument(io.to_string())
                }
                other => other,
            })?;
        log::debug!(
            "{} of {} page(s) have text",
            document.readable_page_count(),
            document.pages.len()
        );
        let text = self.normalizer.normalize_document(&document)?;

        if let Err(e) = upload.close() {
            log::warn!("Failed to remove temporary upload: {}", e);
        }
        Ok(text)
    }
}

/// Turn an error into the reply shown to the user.
fn error_reply(error: &Error) -> Reply {
    if !error.is_user_facing() {
        log::error!("Unexpected error while handling upload: {}", error);
        return Reply::new(format!("An unexpected error occurred: {}", error));
    }

    log::warn!("Upload rejected: {:?}", error);
    match error {
        Error::UnsupportedFormat(detail) => {
            Reply::new(Error::UnreadableDocument(detail.clone()).to_string())
        }
        _ => Reply::new(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Attachment;
    use pdfsum_core::{summary_prompt, Document};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    const UNREADABLE: &str =
        "Unable to extract text from the PDF. Please upload a readable document.";

    enum Outcome {
        Pages(Vec<&'static str>),
        Unreadable,
        IoFailure,
    }

    /// Reader that returns a fixed outcome and records the path it was given.
    struct StubReader {
        outcome: Outcome,
        seen: RefCell<Option<(PathBuf, bool)>>,
    }

    impl StubReader {
        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                seen: RefCell::new(None),
            }
        }

        fn with_pages(pages: Vec<&'static str>) -> Self {
            Self::new(Outcome::Pages(pages))
        }

        fn failing() -> Self {
            Self::new(Outcome::Unreadable)
        }

        fn seen_path(&self) -> PathBuf {
            self.seen.borrow().as_ref().unwrap().0.clone()
        }

        fn existed_during_read(&self) -> bool {
            self.seen.borrow().as_ref().unwrap().1
        }
    }

    impl DocumentReader for StubReader {
        fn read_path(&self, path: &Path) -> Result<Document> {
            *self.seen.borrow_mut() = Some((path.to_path_buf(), path.exists()));
            match &self.outcome {
                Outcome::Pages(pages) => Ok(Document::from_texts("stub.pdf", pages.clone())),
                Outcome::Unreadable => Err(Error::UnreadableDocument("bad xref".into())),
                Outcome::IoFailure => Err(Error::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "permission denied",
                ))),
            }
        }
    }

    /// Build a PDF with one line of Courier text per page.
    fn sample_pdf(lines: &[&str]) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Object, Stream};

        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in lines {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    struct FailingSummarizer;

    impl Summarizer for FailingSummarizer {
        fn summarize(&self, _text: &str) -> Result<String> {
            Err(Error::SummarizerError("model offline".into()))
        }
    }

    struct FailingQuiz;

    impl QuizGenerator for FailingQuiz {
        fn generate_quiz(&self, _text: &str) -> Result<Vec<String>> {
            Err(Error::QuizError("model offline".into()))
        }
    }

    fn pdf_message(content: &[u8]) -> IncomingMessage {
        IncomingMessage::new("").with_attachment(Attachment::new(
            "paper.pdf",
            "application/pdf",
            content.to_vec(),
        ))
    }

    fn contents(replies: &[Reply]) -> Vec<&str> {
        replies.iter().map(|r| r.content.as_str()).collect()
    }

    #[test]
    fn test_welcome() {
        assert_eq!(
            Assistant::new().welcome().content,
            "Welcome to the PDF Summarizer! Please upload a PDF document to get started."
        );
    }

    #[test]
    fn test_message_without_pdf() {
        let assistant = Assistant::new();
        let mut session = SessionContext::new();
        let message = IncomingMessage::new("hi")
            .with_attachment(Attachment::new("a.txt", "text/plain", b"hi".to_vec()));

        let replies = assistant.handle_message(&message, &mut session);

        assert_eq!(contents(&replies), vec!["Please upload a PDF file to summarize."]);
    }

    #[test]
    fn test_missing_content() {
        let assistant = Assistant::new();
        let mut session = SessionContext::new();
        let message = IncomingMessage::new("")
            .with_attachment(Attachment::without_content("paper.pdf", "application/pdf"));

        let replies = assistant.handle_message(&message, &mut session);

        assert_eq!(
            contents(&replies),
            vec![
                "Processing `paper.pdf`...",
                "Error: Could not retrieve content for `paper.pdf`. Please try uploading again.",
            ]
        );
        assert!(session.original_text().is_none());
    }

    #[test]
    fn test_successful_upload() {
        let reader = StubReader::with_pages(vec!["Hello\nworld", "", "co-\noperative 12"]);
        let assistant =
            Assistant::with_backends(&reader, PromptSummarizer::new(), PromptQuizGenerator::new());
        let mut session = SessionContext::new();

        let replies = assistant.handle_message(&pdf_message(b"%PDF-1.4"), &mut session);

        let expected_summary = format!("**Summary:**\n{}", summary_prompt("Hello world cooperative"));
        assert_eq!(
            contents(&replies),
            vec![
                "Processing `paper.pdf`...",
                "Generating summary...",
                expected_summary.as_str(),
                "Summary generated successfully!",
            ]
        );
        assert_eq!(replies[3].actions, vec![Action::CreateQuiz]);
        assert!(replies.iter().all(|r| r.author == AUTHOR));
        assert_eq!(session.original_text().unwrap(), "Hello world cooperative");
    }

    #[test]
    fn test_temp_file_removed_after_success() {
        let reader = StubReader::with_pages(vec!["text"]);
        let assistant =
            Assistant::with_backends(&reader, PromptSummarizer::new(), PromptQuizGenerator::new());

        assistant.handle_message(&pdf_message(b"%PDF-1.4"), &mut SessionContext::new());

        assert!(reader.existed_during_read());
        assert!(reader.seen_path().extension().is_some_and(|e| e == "pdf"));
        assert!(!reader.seen_path().exists());
    }

    #[test]
    fn test_temp_file_removed_after_failure() {
        let reader = StubReader::failing();
        let assistant =
            Assistant::with_backends(&reader, PromptSummarizer::new(), PromptQuizGenerator::new());
        let mut session = SessionContext::new();

        let replies = assistant.handle_message(&pdf_message(b"%PDF-1.4"), &mut session);

        assert_eq!(contents(&replies), vec!["Processing `paper.pdf`...", UNREADABLE]);
        assert!(reader.existed_during_read());
        assert!(!reader.seen_path().exists());
        assert!(session.original_text().is_none());
    }

    #[test]
    fn test_empty_document_message() {
        let reader = StubReader::with_pages(vec!["  ", ""]);
        let assistant =
            Assistant::with_backends(&reader, PromptSummarizer::new(), PromptQuizGenerator::new());
        let mut session = SessionContext::new();

        let replies = assistant.handle_message(&pdf_message(b"%PDF-1.4"), &mut session);

        assert_eq!(
            contents(&replies),
            vec!["Processing `paper.pdf`...", "No readable text found in PDF."]
        );
        assert!(!reader.seen_path().exists());
    }

    #[test]
    fn test_non_pdf_bytes_reported_as_unreadable() {
        let assistant = Assistant::new();
        let mut session = SessionContext::new();

        let replies = assistant.handle_message(&pdf_message(b"not a pdf at all"), &mut session);

        assert_eq!(contents(&replies), vec!["Processing `paper.pdf`...", UNREADABLE]);
    }

    #[test]
    fn test_read_back_failure_reported_as_unreadable() {
        let reader = StubReader::new(Outcome::IoFailure);
        let assistant =
            Assistant::with_backends(&reader, PromptSummarizer::new(), PromptQuizGenerator::new());
        let mut session = SessionContext::new();

        let replies = assistant.handle_message(&pdf_message(b"%PDF-1.4"), &mut session);

        assert_eq!(contents(&replies), vec!["Processing `paper.pdf`...", UNREADABLE]);
        assert!(!replies[1].content.contains("permission denied"));
        assert!(!reader.seen_path().exists());
    }

    #[test]
    fn test_real_pdf_upload() {
        let assistant = Assistant::new();
        let mut session = SessionContext::new();
        let bytes = sample_pdf(&["First page", "Second page"]);

        let replies = assistant.handle_message(&pdf_message(&bytes), &mut session);

        assert_eq!(session.original_text().unwrap(), "First page Second page");
        assert_eq!(
            replies[2].content,
            format!("**Summary:**\n{}", summary_prompt("First page Second page"))
        );
        assert_eq!(replies[3].actions, vec![Action::CreateQuiz]);
    }

    #[test]
    fn test_summarizer_failure_is_unexpected_error() {
        let reader = StubReader::with_pages(vec!["text"]);
        let assistant =
            Assistant::with_backends(&reader, FailingSummarizer, PromptQuizGenerator::new());
        let mut session = SessionContext::new();

        let replies = assistant.handle_message(&pdf_message(b"%PDF-1.4"), &mut session);

        assert_eq!(
            replies.last().unwrap().content,
            "An unexpected error occurred: Summarization failed: model offline"
        );
        // Text was extracted before the summarizer failed.
        assert!(session.original_text().is_some());
    }

    #[test]
    fn test_quiz_without_upload() {
        let replies = Assistant::new().handle_action(Action::CreateQuiz, &SessionContext::new());

        assert_eq!(
            contents(&replies),
            vec!["No PDF text found to generate a quiz. Please upload a PDF first."]
        );
    }

    #[test]
    fn test_quiz_after_upload() {
        let reader = StubReader::with_pages(vec!["Ferris is a crab"]);
        let assistant =
            Assistant::with_backends(&reader, PromptSummarizer::new(), PromptQuizGenerator::new());
        let mut session = SessionContext::new();
        assistant.handle_message(&pdf_message(b"%PDF-1.4"), &mut session);

        let replies = assistant.handle_action(Action::CreateQuiz, &session);

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].content, "Generating quiz...");
        assert_eq!(
            replies[1].content,
            format!("**Quiz:**\n{}", pdfsum_core::quiz_prompt("Ferris is a crab"))
        );
    }

    #[test]
    fn test_quiz_failure_is_unexpected_error() {
        let reader = StubReader::with_pages(vec!["text"]);
        let assistant = Assistant::with_backends(&reader, PromptSummarizer::new(), FailingQuiz);
        let mut session = SessionContext::new();
        assistant.handle_message(&pdf_message(b"%PDF-1.4"), &mut session);

        let replies = assistant.handle_action(Action::CreateQuiz, &session);

        assert_eq!(
            replies.last().unwrap().content,
            "An unexpected error occurred: Quiz generation failed: model offline"
        );
    }

    #[test]
    fn test_custom_normalizer() {
        let reader = StubReader::with_pages(vec!["Chapter 3"]);
        let assistant =
            Assistant::with_backends(&reader, PromptSummarizer::new(), PromptQuizGenerator::new())
                .with_normalizer(TextNormalizer::new().with_strip_page_numbers(false));
        let mut session = SessionContext::new();

        assistant.handle_message(&pdf_message(b"%PDF-1.4"), &mut session);

        assert_eq!(session.original_text().unwrap(), "Chapter 3");
    }
}
