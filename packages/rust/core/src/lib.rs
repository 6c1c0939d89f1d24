//! Core pipeline orchestration for the web content chunker.
//!
//! This crate ties URL validation, fetching and extraction into the end-to-end
//! [`chunk_url`] workflow, and defines the JSON request/response contract a
//! service front-end would speak.

pub mod pipeline;
pub mod response;

pub use pipeline::{ProgressReporter, SilentProgress, chunk_file, chunk_url};
pub use response::{ChunkRequest, ChunkResponse, ErrorBody, respond};
