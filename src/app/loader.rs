// LsViz - app/loader.rs
//
// Reads a listing file from disk and decodes it into entries.
// Runs synchronously on the UI thread; loads are proportional to the
// listing size and there is no cancellation.

use crate::core::parser::{self, ParseConfig, ParseResult};
use crate::platform;
use crate::util::error::LoadError;
use std::path::Path;
use std::time::Instant;

/// Read and parse one listing file.
pub fn read_listing_file(
    path: &Path,
    parse_config: &ParseConfig,
    large_file_threshold: u64,
) -> Result<ParseResult, LoadError> {
    let started = Instant::now();
    let content = platform::fs::read_listing(path, large_file_threshold)?;
    let result = parser::parse_listing(&content, parse_config);
    tracing::info!(
        file = %path.display(),
        bytes = content.len(),
        entries = result.entries.len(),
        skipped = result.lines_skipped,
        truncated = result.truncated,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Listing file parsed"
    );
    Ok(result)
}
