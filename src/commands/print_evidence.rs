//! Print structural-variant evidence, optionally restricted to intervals.
//!
//! # Algorithm
//!
//! 1. Resolve the input's feature type and reject unsupported kinds
//! 2. Open the source and pick the output strategy from the output path
//! 3. Copy the source header, if any, to the sink
//! 4. Stream interval-filtered records into the sink one at a time
//! 5. Close the sink; on failure abort it instead, so no index is written,
//!    and report the first error
//!
//! # Requirements
//!
//! Input must be sorted by contig and start for the tabix index of a
//! compressed output to be valid.

use crate::config::{validate_compression_level, DEFAULT_COMPRESSION_LEVEL};
use crate::error::Result;
use crate::genome::SequenceDictionary;
use crate::index::IntervalIndex;
use crate::interval::Interval;
use crate::streaming::{EvidenceReader, OutputSink, OutputStrategy, SinkSummary};
use log::{info, warn};
use std::io::BufRead;
use std::path::Path;

/// Print command configuration.
#[derive(Debug, Clone)]
pub struct PrintEvidenceCommand {
    /// Requested intervals; empty means the whole file
    pub intervals: Vec<Interval>,
    /// Contig names and lengths, when known
    pub dictionary: Option<SequenceDictionary>,
    /// BGZF compression level, ignored for plain output
    pub compression_level: u32,
}

impl Default for PrintEvidenceCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintEvidenceCommand {
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
            dictionary: None,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Restrict output to records overlapping these intervals.
    pub fn with_intervals(mut self, intervals: Vec<Interval>) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn with_dictionary(mut self, dictionary: SequenceDictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    /// Print the evidence file at `input` to `output`.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<PrintEvidenceStats> {
        let input = input.as_ref();
        info!("Printing {} to {}", input.display(), output.as_ref().display());

        let reader = EvidenceReader::from_path(input)?;
        self.run_streaming(reader, output)
    }

    /// Core streaming loop over an already opened source.
    pub fn run_streaming<R: BufRead, Q: AsRef<Path>>(
        &self,
        mut reader: EvidenceReader<R>,
        output: Q,
    ) -> Result<PrintEvidenceStats> {
        let output = output.as_ref();
        let level = validate_compression_level(self.compression_level)?;
        let index = IntervalIndex::from_intervals(self.intervals.clone());

        let strategy = OutputStrategy::for_path(output);
        if strategy == OutputStrategy::Plain && self.compression_level != DEFAULT_COMPRESSION_LEVEL
        {
            warn!(
                "Compression level {} ignored: {} is not block-compressed",
                self.compression_level,
                output.display()
            );
        }

        let mut sink = OutputSink::create(
            strategy,
            output,
            reader.kind(),
            self.dictionary.as_ref(),
            level,
        )?;

        match Self::stream(&mut reader, &index, &mut sink) {
            Ok(()) => {
                let summary = sink.close()?;
                let stats = PrintEvidenceStats::new(&reader, &summary);
                info!("Done: {}", stats);
                Ok(stats)
            }
            Err(e) => {
                if let Err(abort_err) = sink.abort() {
                    warn!("Failed to release {} after error: {}", output.display(), abort_err);
                }
                Err(e)
            }
        }
    }

    fn stream<R: BufRead>(
        reader: &mut EvidenceReader<R>,
        index: &IntervalIndex,
        sink: &mut OutputSink<'_>,
    ) -> Result<()> {
        if let Some(header) = reader.header() {
            sink.write_header(header)?;
        }
        for record in reader.records(index) {
            sink.add(&record?)?;
        }
        Ok(())
    }
}

/// Statistics from a print run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintEvidenceStats {
    /// Data lines scanned
    pub records_read: usize,
    /// Data lines outside every requested interval
    pub records_filtered: usize,
    /// Records written to the output
    pub records_written: usize,
    pub header_written: bool,
    pub strategy: OutputStrategy,
}

impl PrintEvidenceStats {
    fn new<R: BufRead>(reader: &EvidenceReader<R>, summary: &SinkSummary) -> Self {
        Self {
            records_read: reader.records_read(),
            records_filtered: reader.records_filtered(),
            records_written: summary.records_written,
            header_written: summary.header_written,
            strategy: summary.strategy,
        }
    }
}

impl std::fmt::Display for PrintEvidenceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Read: {}, Filtered: {}, Written: {}, Header: {}, Output: {}",
            self.records_read,
            self.records_filtered,
            self.records_written,
            if self.header_written { "yes" } else { "no" },
            self.strategy
        )
    }
}
