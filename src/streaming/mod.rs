//! Streaming pipeline components.
//!
//! This module provides the pieces a print run is assembled from:
//! - Locus scanning of raw lines without decoding them
//! - Interval-bounded, single-pass traversal of a source
//! - Line encoding and the plain / indexed writer backends
//! - Output strategy selection and the run's output sink
//!
//! Memory use is O(1) in the number of records.

pub mod buffers;
pub mod output;
pub mod parsing;
pub mod sink;
pub mod traversal;

pub use output::{IndexedEvidenceWriter, LineEncoder, PlainEvidenceWriter};
pub use parsing::{is_header_line, parse_u64_fast, scan_locus};
pub use sink::{index_path_for, OutputSink, OutputStrategy, SinkSummary};
pub use traversal::{EvidenceReader, Records};
