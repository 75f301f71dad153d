//! svev: structural-variant evidence printer
//!
//! Streams split-read, discordant-pair, B-allele-frequency and read-depth
//! evidence files, optionally restricted to genomic intervals, and writes
//! them back out as plain text or as BGZF with a tabix index.
//!
//! # Example
//!
//! ```rust,no_run
//! use svev::commands::PrintEvidenceCommand;
//! use svev::interval::Interval;
//!
//! let cmd = PrintEvidenceCommand::new()
//!     .with_intervals(vec![Interval::parse_region("chr1:1-1000000", None).unwrap()]);
//! let stats = cmd.run("batch.SR.txt.gz", "subset.SR.txt.gz").unwrap();
//! eprintln!("{}", stats);
//! ```

pub mod bed;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod evidence;
pub mod genome;
pub mod index;
pub mod interval;
pub mod streaming;

// Re-export commonly used types
pub use error::{EvidenceError, Result};
pub use evidence::{EvidenceKind, EvidenceRecord};
pub use genome::SequenceDictionary;
pub use index::IntervalIndex;
pub use interval::Interval;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{PrintEvidenceCommand, PrintEvidenceStats};
    pub use crate::error::{EvidenceError, Result};
    pub use crate::evidence::{EvidenceKind, EvidenceRecord};
    pub use crate::genome::SequenceDictionary;
    pub use crate::interval::{collect_intervals, Interval};
    pub use crate::streaming::{EvidenceReader, OutputSink, OutputStrategy};
}
