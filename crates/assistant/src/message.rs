//! Chat message types exchanged with the assistant.

use pdfsum_core::CleanedText;
use pdfsum_pdf::PDF_MIME;
use serde::{Deserialize, Serialize};

/// A file attached to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Display name of the uploaded file.
    pub name: String,

    /// MIME type reported by the client.
    pub mime: String,

    /// Raw file bytes. `None` when the upload arrived without content.
    pub content: Option<Vec<u8>>,
}

impl Attachment {
    /// Create an attachment with content.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            content: Some(content),
        }
    }

    /// Create an attachment whose content is missing.
    pub fn without_content(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            content: None,
        }
    }

    /// Whether the client reported this file as a PDF.
    pub fn is_pdf(&self) -> bool {
        self.mime == PDF_MIME
    }
}

/// A message sent by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Typed text, possibly empty.
    pub text: String,

    /// Attached files in upload order.
    pub attachments: Vec<Attachment>,
}

impl IncomingMessage {
    /// Create a message with text and no attachments.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Add an attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Attachments reported as PDFs.
    pub fn pdf_attachments(&self) -> Vec<&Attachment> {
        self.attachments.iter().filter(|a| a.is_pdf()).collect()
    }
}

/// A button offered alongside a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Generate a quiz from the last uploaded document.
    CreateQuiz,
}

impl Action {
    /// Stable identifier used by chat clients.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateQuiz => "create_quiz",
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateQuiz => "Create Quiz 💡",
        }
    }

    /// Look up an action by its identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "create_quiz" => Some(Self::CreateQuiz),
            _ => None,
        }
    }
}

/// A message sent by the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Message body (Markdown).
    pub content: String,

    /// Display name of the sender.
    pub author: String,

    /// Buttons shown with the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl Reply {
    /// Create a reply from the assistant.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: crate::AUTHOR.to_string(),
            actions: Vec::new(),
        }
    }

    /// Attach an action button.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// Per-chat state, passed explicitly into each turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionContext {
    /// Cleaned text of the last successfully processed upload.
    original_text: Option<CleanedText>,
}

impl SessionContext {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the last processed upload, if any.
    pub fn original_text(&self) -> Option<&CleanedText> {
        self.original_text.as_ref()
    }

    pub(crate) fn set_original_text(&mut self, text: CleanedText) {
        self.original_text = Some(text);
    }

    /// Forget the stored document text.
    pub fn clear(&mut self) {
        self.original_text = None;
    }
}
