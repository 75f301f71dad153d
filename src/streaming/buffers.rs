//! Buffer size constants for streaming operations.

/// Output buffer size for the plain writer (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Input buffer size (256 KB).
pub const DEFAULT_INPUT_BUFFER: usize = 256 * 1024;

/// Initial line buffer capacity (1 KB).
/// Sufficient for most evidence lines; depth lines with many samples grow it.
pub const DEFAULT_LINE_BUFFER: usize = 1024;
