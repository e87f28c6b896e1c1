// LsViz - platform/fs.rs
//
// Filesystem access for listing files.

use crate::util::error::LoadError;
use std::path::Path;

/// Read a listing file as text.
///
/// Files larger than `large_file_threshold` are memory-mapped instead of
/// copied through a read buffer. Invalid UTF-8 is replaced rather than
/// rejected; such lines simply fail the listing grammar later.
pub fn read_listing(path: &Path, large_file_threshold: u64) -> Result<String, LoadError> {
    let metadata = std::fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    if !metadata.is_file() {
        return Err(LoadError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    if metadata.len() > large_file_threshold {
        tracing::debug!(
            file = %path.display(),
            bytes = metadata.len(),
            "Memory-mapping large listing"
        );
        let file = std::fs::File::open(path).map_err(io_err)?;
        // SAFETY: the map is read-only and dropped before returning. A listing
        // truncated by another process while mapped could fault; listings are
        // finished exports, not live files.
        let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(io_err)?;
        Ok(String::from_utf8_lossy(&mmap).into_owned())
    } else {
        let bytes = std::fs::read(path).map_err(io_err)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(file = %path.display(), "Listing is not valid UTF-8; decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_small_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();
        assert_eq!(read_listing(&path, u64::MAX).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_large_file_goes_through_mmap_with_same_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.txt");
        std::fs::write(&path, "abc\n").unwrap();
        assert_eq!(read_listing(&path, 1).unwrap(), "abc\n");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.txt");
        std::fs::write(&path, b"ok\n\xff\n").unwrap();
        let text = read_listing(&path, u64::MAX).unwrap();
        assert!(text.starts_with("ok\n"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_listing(&dir.path().join("absent.txt"), u64::MAX);
        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_listing(dir.path(), u64::MAX);
        assert!(matches!(result, Err(LoadError::NotAFile { .. })));
    }
}
