//! Interval-bounded traversal of an evidence source.
//!
//! # Algorithm
//!
//! 1. On open, read the first line; if it is a header keep it aside
//! 2. Every following non-empty line is a record; a later `#` line is an
//!    error, since only the first line may be a header
//! 3. For each record line, scan only the locus columns
//! 4. Drop lines whose locus overlaps no requested interval
//! 5. Decode the surviving line into a typed record and yield it
//!
//! # Memory Complexity
//!
//! O(1) - one reused line buffer, regardless of input size.
//!
//! # Requirements
//!
//! The source is assumed sorted by contig and start. This is not checked.

use super::parsing::{is_header_line, scan_locus, trim_line_end};
use crate::codec;
use crate::error::{EvidenceError, Result};
use crate::evidence::{EvidenceKind, EvidenceRecord};
use crate::index::IntervalIndex;
use log::debug;
use std::io::BufRead;
use std::path::Path;

/// Single-pass reader over one evidence file.
pub struct EvidenceReader<R: BufRead> {
    reader: R,
    kind: EvidenceKind,
    header: Option<String>,
    buffer: Vec<u8>,
    first_line_pending: bool,
    line_number: usize,
    records_read: usize,
    records_filtered: usize,
}

impl EvidenceReader<Box<dyn BufRead>> {
    /// Resolve the file's evidence kind and open it.
    ///
    /// Fails with a configuration error, before reading anything, if the
    /// file's type is not a supported evidence kind.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let type_name = codec::resolve_feature_type(path)?;
        let kind = EvidenceKind::validate(type_name)?;
        let reader = codec::open_source(path)?;
        Self::new(reader, kind)
    }
}

impl<R: BufRead> EvidenceReader<R> {
    /// Wrap a reader holding evidence of `kind`, consuming a header line if
    /// there is one.
    pub fn new(reader: R, kind: EvidenceKind) -> Result<Self> {
        let mut this = Self {
            reader,
            kind,
            header: None,
            buffer: Vec::with_capacity(super::buffers::DEFAULT_LINE_BUFFER),
            first_line_pending: false,
            line_number: 0,
            records_read: 0,
            records_filtered: 0,
        };

        if this.fill_line()? {
            let line = trim_line_end(&this.buffer);
            if is_header_line(line) {
                let header = std::str::from_utf8(line).map_err(|_| {
                    EvidenceError::Internal("source header is not text".to_string())
                })?;
                debug!("Source header: {}", header);
                this.header = Some(header.to_string());
            } else {
                this.first_line_pending = true;
            }
        }

        Ok(this)
    }

    pub fn kind(&self) -> EvidenceKind {
        self.kind
    }

    /// The source's header line, if it has one.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Data lines scanned so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Data lines dropped by the interval filter so far.
    pub fn records_filtered(&self) -> usize {
        self.records_filtered
    }

    /// Read the next physical line into the buffer.
    fn fill_line(&mut self) -> Result<bool> {
        self.buffer.clear();
        let n = self.reader.read_until(b'\n', &mut self.buffer)?;
        if n == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        Ok(true)
    }

    fn next_line(&mut self) -> Result<bool> {
        if self.first_line_pending {
            self.first_line_pending = false;
            return Ok(true);
        }
        self.fill_line()
    }

    /// Read the next record overlapping `intervals`.
    ///
    /// An unrestricted index lets every record through.
    pub fn read_record(&mut self, intervals: &IntervalIndex) -> Result<Option<EvidenceRecord>> {
        loop {
            if !self.next_line()? {
                return Ok(None);
            }

            let line = trim_line_end(&self.buffer);
            if line.is_empty() {
                continue;
            }
            if line[0] == b'#' {
                return Err(EvidenceError::Parse {
                    line: self.line_number,
                    message: "header line after the first line".to_string(),
                });
            }
            self.records_read += 1;

            if intervals.is_restricted() {
                let (contig, start, end) =
                    scan_locus(self.kind, line).ok_or_else(|| EvidenceError::Parse {
                        line: self.line_number,
                        message: format!("{}: missing or invalid locus", self.kind),
                    })?;
                let contig = std::str::from_utf8(contig).map_err(|_| EvidenceError::Parse {
                    line: self.line_number,
                    message: "contig is not valid UTF-8".to_string(),
                })?;
                if !intervals.has_overlap(contig, start, end) {
                    self.records_filtered += 1;
                    continue;
                }
            }

            let text = std::str::from_utf8(line).map_err(|_| EvidenceError::Parse {
                line: self.line_number,
                message: "line is not valid UTF-8".to_string(),
            })?;
            return EvidenceRecord::decode(self.kind, text, self.line_number).map(Some);
        }
    }

    /// Lazy iterator over the records overlapping `intervals`.
    ///
    /// Stops after the first error.
    pub fn records<'a>(&'a mut self, intervals: &'a IntervalIndex) -> Records<'a, R> {
        Records {
            reader: self,
            intervals,
            done: false,
        }
    }
}

/// Iterator over interval-filtered evidence records.
pub struct Records<'a, R: BufRead> {
    reader: &'a mut EvidenceReader<R>,
    intervals: &'a IntervalIndex,
    done: bool,
}

impl<R: BufRead> Iterator for Records<'_, R> {
    type Item = Result<EvidenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.reader.read_record(self.intervals).transpose();
        if !matches!(result, Some(Ok(_))) {
            self.done = true;
        }
        result
    }
}
