//! PDF file reader implementation.

use pdfsum_core::{Document, DocumentReader, Error, Result};
use std::io::Read;
use std::path::Path;

/// MIME type of PDF uploads.
pub const PDF_MIME: &str = "application/pdf";

/// Every PDF file starts with this header.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Check whether `bytes` start with the PDF header.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Reader for PDF files, producing one [`pdfsum_core::Page`] per PDF page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a PDF from any reader.
    pub fn read<R: Read>(&self, mut reader: R, filename: &str) -> Result<Document> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.read_bytes(&bytes, filename)
    }

    /// Read a PDF held in memory.
    pub fn read_bytes(&self, bytes: &[u8], filename: &str) -> Result<Document> {
        if !is_pdf(bytes) {
            return Err(Error::UnsupportedFormat(format!(
                "{} does not start with a PDF header",
                filename
            )));
        }

        let pdf = lopdf::Document::load_mem(bytes).map_err(|e| {
            log::error!("Error extracting text from PDF {}: {}", filename, e);
            Error::UnreadableDocument(e.to_string())
        })?;

        let page_numbers: Vec<u32> = pdf.get_pages().into_keys().collect();
        log::debug!("{}: {} page(s)", filename, page_numbers.len());

        let mut document = Document::new(filename);
        for page_number in page_numbers {
            let text = match pdf.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!(
                        "{}: no text extracted from page {}: {}",
                        filename,
                        page_number,
                        e
                    );
                    String::new()
                }
            };
            document.add_page(text);
        }

        Ok(document)
    }
}

impl DocumentReader for PdfReader {
    fn read_path(&self, path: &Path) -> Result<Document> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");

        let bytes = std::fs::read(path)?;
        self.read_bytes(&bytes, filename)
    }
}
