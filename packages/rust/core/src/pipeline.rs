//! End-to-end chunking pipeline: URL → validate → fetch → segment → assemble.

use std::path::Path;
use std::time::Instant;

use tracing::{info, instrument};

use webchunker_extract::chunk_html;
use webchunker_fetcher::{Fetcher, parse_url};
use webchunker_shared::{ChunkResult, ChunkerError, ExtractConfig, FetchConfig, Result};

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes successfully.
    fn done(&self, result: &ChunkResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &ChunkResult) {}
}

/// Chunk the page at `url`.
///
/// 1. Validate the URL (invalid input never touches the network)
/// 2. Fetch the HTML with a bounded timeout
/// 3. Segment, fall back if needed, and assemble
///
/// Each call owns its own dedup state, so concurrent calls are independent.
#[instrument(skip_all, fields(url = %url, boundary = %extract.boundary))]
pub async fn chunk_url(
    url: &str,
    fetch: &FetchConfig,
    extract: &ExtractConfig,
    progress: &dyn ProgressReporter,
) -> Result<ChunkResult> {
    let start = Instant::now();

    progress.phase("Validating URL");
    let url = parse_url(url)?;

    progress.phase("Fetching page");
    let fetcher = Fetcher::new(fetch)?;
    let page = fetcher.fetch(&url).await?;

    progress.phase("Segmenting content");
    let result = chunk_html(&page.html, extract);

    info!(
        final_url = %page.url,
        content_type = page.content_type.as_deref().unwrap_or("unknown"),
        sections = result.big_chunks.len(),
        items = result.item_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "page chunked"
    );

    progress.done(&result);
    Ok(result)
}

/// Chunk a saved HTML file with the same extraction as [`chunk_url`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn chunk_file(
    path: &Path,
    extract: &ExtractConfig,
    progress: &dyn ProgressReporter,
) -> Result<ChunkResult> {
    progress.phase("Reading file");
    let bytes = std::fs::read(path).map_err(|e| ChunkerError::io(path, e))?;
    let html = String::from_utf8_lossy(&bytes);

    progress.phase("Segmenting content");
    let result = chunk_html(&html, extract);

    info!(
        sections = result.big_chunks.len(),
        items = result.item_count(),
        "file chunked"
    );

    progress.done(&result);
    Ok(result)
}
