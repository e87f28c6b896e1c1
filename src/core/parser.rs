// LsViz - core/parser.rs
//
// Parsing of recursive HDFS listings (`hdfs dfs -ls -R`).
// Core layer: accepts text, never touches the filesystem directly.
//
// Line grammar (after trimming):
//
//   <perms> <replicas> <owner> <group> <size> <YYYY-MM-DD HH:MM> <path>
//
//   drwxr-xr-x   - hdfs supergroup          0 2024-01-01 00:00 /user
//   -rw-r--r--   3 hdfs supergroup       1024 2024-01-01 00:00 /user/a.txt
//
// Lines that do not match (the "Found N items" header, blank lines, warnings
// printed by the client) are skipped and counted, never reported as errors.

use crate::core::model::ListingEntry;
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Compiled line pattern, built on first use.
fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<perms>[drwxstST+-]+)\s+[\d-]+\s+(?P<owner>\S+)\s+(?P<group>\S+)\s+(?P<size>\d+)\s+(?P<modified>\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2})\s+(?P<path>.+)$",
        )
        .unwrap_or_else(|e| panic!("built-in listing pattern failed to compile: {e}"))
    })
}

/// Configuration for parsing operations.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Stop after this many entries.
    pub max_entries: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_entries: constants::DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Result of parsing one listing.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Decoded entries in listing order.
    pub entries: Vec<ListingEntry>,
    /// Lines read (including skipped ones).
    pub lines_processed: u64,
    /// Non-blank lines that did not match the grammar.
    pub lines_skipped: u64,
    /// True when a valid entry was dropped because `max_entries` was reached.
    pub truncated: bool,
}

/// Decode a single listing line. Returns `None` for lines outside the grammar.
pub fn parse_line(line: &str) -> Option<ListingEntry> {
    let caps = line_pattern().captures(line.trim())?;
    // Sizes beyond u64 cannot come from a real listing; treat as malformed.
    let size = caps["size"].parse::<u64>().ok()?;
    Some(ListingEntry {
        permissions: caps["perms"].to_string(),
        owner: caps["owner"].to_string(),
        group: caps["group"].to_string(),
        size,
        modified: caps["modified"].to_string(),
        path: caps["path"].trim_end().to_string(),
    })
}

/// Parse listing text line by line.
pub fn parse_listing(content: &str, config: &ParseConfig) -> ParseResult {
    let mut result = ParseResult::default();

    for line in content.lines() {
        result.lines_processed += 1;

        match parse_line(line) {
            Some(_) if result.entries.len() >= config.max_entries => {
                result.truncated = true;
                break;
            }
            Some(entry) => result.entries.push(entry),
            None if line.trim().is_empty() => {}
            None => {
                result.lines_skipped += 1;
                if result.lines_skipped as usize <= constants::MAX_SKIPPED_LINES_LOGGED {
                    tracing::debug!(
                        line_number = result.lines_processed,
                        preview = %preview(line),
                        "Skipping line outside listing grammar"
                    );
                }
            }
        }
    }

    if result.truncated {
        tracing::warn!(
            max_entries = config.max_entries,
            lines = result.lines_processed,
            "Listing truncated at entry cap"
        );
    }
    tracing::debug!(
        entries = result.entries.len(),
        skipped = result.lines_skipped,
        "Listing parsed"
    );
    result
}

/// Line prefix bounded for log output, cut on a char boundary.
fn preview(line: &str) -> &str {
    match line.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((cut, _)) => &line[..cut],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Found 3 items
drwxr-xr-x   - hdfs supergroup          0 2024-01-01 00:00 /user
-rw-r--r--   3 alice analysts        1024 2024-02-03 14:05 /user/alice/report final.csv

drwxrwxrwt   - hdfs supergroup          0 2023-12-31 23:59 /tmp
";

    #[test]
    fn test_parses_directory_line() {
        let entry = parse_line("drwxr-xr-x   - hdfs supergroup          0 2024-01-01 00:00 /user")
            .expect("directory line parses");
        assert_eq!(entry.permissions, "drwxr-xr-x");
        assert_eq!(entry.owner, "hdfs");
        assert_eq!(entry.group, "supergroup");
        assert_eq!(entry.size, 0);
        assert_eq!(entry.modified, "2024-01-01 00:00");
        assert_eq!(entry.path, "/user");
    }

    #[test]
    fn test_path_keeps_embedded_spaces() {
        let entry = parse_line(
            "-rw-r--r--   3 alice analysts        1024 2024-02-03 14:05 /user/alice/report final.csv",
        )
        .expect("file line parses");
        assert_eq!(entry.size, 1024);
        assert_eq!(entry.path, "/user/alice/report final.csv");
    }

    #[test]
    fn test_sticky_bit_permissions_parse() {
        let entry = parse_line("drwxrwxrwt   - hdfs supergroup 0 2023-12-31 23:59 /tmp")
            .expect("sticky directory parses");
        assert_eq!(entry.permissions, "drwxrwxrwt");
    }

    #[test]
    fn test_rejects_lines_outside_grammar() {
        assert!(parse_line("Found 3 items").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("-rw-r--r-- 3 a g notanumber 2024-01-01 00:00 /x").is_none());
        assert!(parse_line("-rw-r--r-- 3 a g 1 2024-01-01 /x").is_none());
    }

    #[test]
    fn test_size_overflow_is_malformed() {
        assert!(parse_line("-rw-r--r-- 3 a g 99999999999999999999999 2024-01-01 00:00 /x").is_none());
    }

    #[test]
    fn test_parse_listing_counts_skipped_lines() {
        let result = parse_listing(SAMPLE, &ParseConfig::default());
        assert_eq!(result.entries.len(), 3);
        assert_eq!(result.lines_skipped, 1);
        assert_eq!(result.lines_processed, 5);
        assert!(!result.truncated);
        assert_eq!(result.entries[2].path, "/tmp");
    }

    #[test]
    fn test_parse_listing_stops_at_cap() {
        let result = parse_listing(SAMPLE, &ParseConfig { max_entries: 2 });
        assert_eq!(result.entries.len(), 2);
        assert!(result.truncated);
    }

    #[test]
    fn test_cap_reached_before_trailing_noise_is_not_truncation() {
        let content = "\
-rw-r--r-- 3 a g 1 2024-01-01 00:00 /one
-rw-r--r-- 3 a g 1 2024-01-01 00:00 /two

Found 2 items
";
        let result = parse_listing(content, &ParseConfig { max_entries: 2 });
        assert_eq!(result.entries.len(), 2);
        assert!(!result.truncated);
        assert_eq!(result.lines_skipped, 1);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let result = parse_listing("", &ParseConfig::default());
        assert!(result.entries.is_empty());
        assert_eq!(result.lines_processed, 0);
        assert!(!result.truncated);
    }
}
