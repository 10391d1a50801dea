//! PDF backend for PDF summarization.
//!
//! Loads PDF files with `lopdf` and extracts their text page by page.

pub mod reader;

pub use reader::{is_pdf, PdfReader, PDF_MIME};
