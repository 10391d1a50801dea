//! Chat-turn handler for the PDF summarizer.
//!
//! Takes chat messages carrying uploaded files and returns the assistant's
//! replies. There is no transport or rendering here: the caller owns the
//! chat loop and the per-session [`SessionContext`].

pub mod assistant;
pub mod message;

pub use assistant::{Assistant, AUTHOR};
pub use message::{Action, Attachment, IncomingMessage, Reply, SessionContext};
