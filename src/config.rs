//! Output configuration shared by the CLI and the writers.

use crate::error::{EvidenceError, Result};

/// Compression level used when `--compression-level` is not given.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 4;

/// Highest level accepted by the BGZF writer.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Suffixes that select block-compressed, indexed output.
pub const BLOCK_COMPRESSED_EXTENSIONS: &[&str] = &[".gz", ".gzip", ".bgz", ".bgzf"];

/// Suffix appended to a compressed output path for its tabix index.
pub const TABIX_INDEX_EXTENSION: &str = ".tbi";

/// Check a user-supplied compression level.
///
/// # Example
///
/// ```
/// use svev::config;
///
/// assert_eq!(config::validate_compression_level(4).unwrap(), 4);
/// assert!(config::validate_compression_level(10).is_err());
/// ```
pub fn validate_compression_level(level: u32) -> Result<u8> {
    if level > MAX_COMPRESSION_LEVEL {
        return Err(EvidenceError::Config(format!(
            "Compression level must be between 0 and {}, got {}",
            MAX_COMPRESSION_LEVEL, level
        )));
    }
    Ok(level as u8)
}

/// Returns true if the path ends in a block-compression suffix.
///
/// Matching is case-insensitive.
#[inline]
pub fn has_block_compressed_extension(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    BLOCK_COMPRESSED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_level_bounds() {
        assert_eq!(validate_compression_level(0).unwrap(), 0);
        assert_eq!(validate_compression_level(9).unwrap(), 9);
        assert!(validate_compression_level(10).unwrap_err().is_config());
    }

    #[test]
    fn test_block_compressed_extension() {
        assert!(has_block_compressed_extension("out.SR.txt.gz"));
        assert!(has_block_compressed_extension("out.BAF.txt.BGZ"));
        assert!(has_block_compressed_extension("out.bgzf"));
        assert!(!has_block_compressed_extension("out.SR.txt"));
        assert!(!has_block_compressed_extension("out.gz.txt"));
    }
}
