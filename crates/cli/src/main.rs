//! CLI tool for summarizing PDF files through the assistant.

use anyhow::{Context, Result};
use clap::Parser;
use pdfsum_assistant::{Action, Assistant, Attachment, IncomingMessage, Reply, SessionContext};
use pdfsum_core::TextNormalizer;
use pdfsum_pdf::{is_pdf, PDF_MIME};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Summarize PDF files the way the chat assistant would.
#[derive(Parser, Debug)]
#[command(name = "pdfsum")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PDF file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: print to stdout)
    #[arg(short, long, env = "PDFSUM_OUTPUT_DIR")]
    output: Option<PathBuf>,

    /// Also request a quiz after the summary
    #[arg(short, long)]
    quiz: bool,

    /// Emit replies as JSON instead of a chat transcript
    #[arg(long)]
    json: bool,

    /// Keep hyphens at line breaks instead of rejoining words
    #[arg(long)]
    keep_hyphens: bool,

    /// Keep bare numbers instead of stripping them as page numbers
    #[arg(long)]
    keep_numbers: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Replies produced for one input file.
#[derive(Debug, Serialize)]
struct Transcript {
    file: String,
    replies: Vec<Reply>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let normalizer = TextNormalizer::new()
        .with_rejoin_hyphens(!args.keep_hyphens)
        .with_strip_page_numbers(!args.keep_numbers);
    let assistant = Assistant::new().with_normalizer(normalizer);

    for input_path in &args.input {
        log::info!("Processing: {}", input_path.display());

        match process_file(input_path, &args, &assistant) {
            Ok(transcript) => {
                let output = render(&transcript, args.json)?;
                match &args.output {
                    Some(dir) => {
                        let output_path = get_output_path(input_path, dir, args.json)?;
                        write_output(&output_path, &output)?;
                        log::info!("Written to: {}", output_path.display());
                    }
                    None => print!("{}", output),
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Run one file through a fresh chat session.
fn process_file(input_path: &Path, args: &Args, assistant: &Assistant) -> Result<Transcript> {
    let content = std::fs::read(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let message =
        IncomingMessage::new("").with_attachment(Attachment::new(filename, sniff_mime(&content), content));

    let mut session = SessionContext::new();
    let mut replies = vec![assistant.welcome()];
    replies.extend(assistant.handle_message(&message, &mut session));

    if args.quiz {
        if session.original_text().is_some() {
            replies.extend(assistant.handle_action(Action::CreateQuiz, &session));
        } else {
            log::debug!("Skipping quiz for {}: no text extracted", filename);
        }
    }

    Ok(Transcript {
        file: filename.to_string(),
        replies,
    })
}

/// Guess the MIME type a browser would report for these bytes.
fn sniff_mime(content: &[u8]) -> &'static str {
    if is_pdf(content) {
        PDF_MIME
    } else {
        "application/octet-stream"
    }
}

/// Format a transcript as JSON or as readable chat text.
fn render(transcript: &Transcript, json: bool) -> Result<String> {
    if json {
        let mut output = serde_json::to_string_pretty(transcript)
            .context("Failed to serialize replies")?;
        output.push('\n');
        return Ok(output);
    }

    let mut output = String::new();
    for reply in &transcript.replies {
        output.push_str(&format!("{}: {}\n", reply.author, reply.content));
        for action in &reply.actions {
            output.push_str(&format!("  [{}] ({})\n", action.label(), action.name()));
        }
        output.push('\n');
    }
    Ok(output)
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: &Path, json: bool) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let extension = if json { "json" } else { "txt" };
    let output_filename = format!("{}.{}", stem, extension);

    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    Ok(output_dir.join(output_filename))
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
