//! Evidence line encoding and the two writer backends.
//!
//! Uses itoa for integer formatting and ryu for float formatting to avoid
//! allocation in the hot path. The encoded line is built in a reused buffer
//! and handed to the backend in a single write.

use super::buffers::{DEFAULT_LINE_BUFFER, DEFAULT_OUTPUT_BUFFER};
use crate::evidence::{EvidenceKind, EvidenceRecord};
use noodles::bgzf;
use noodles::core::Position;
use noodles::csi::binning_index::index::header::format::CoordinateSystem;
use noodles::csi::binning_index::index::header::{self as index_header, Format};
use noodles::csi::binning_index::index::reference_sequence::bin::Chunk;
use noodles::tabix;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Reusable buffer for building one canonical evidence line.
pub struct LineEncoder {
    line: Vec<u8>,
    itoa_buf: itoa::Buffer,
    ryu_buf: ryu::Buffer,
}

impl Default for LineEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEncoder {
    pub fn new() -> Self {
        Self {
            line: Vec::with_capacity(DEFAULT_LINE_BUFFER),
            itoa_buf: itoa::Buffer::new(),
            ryu_buf: ryu::Buffer::new(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.line.clear();
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.line.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_tab(&mut self) {
        self.line.push(b'\t');
    }

    /// Write an integer using itoa.
    #[inline]
    pub fn write_int<I: itoa::Integer>(&mut self, n: I) {
        self.line
            .extend_from_slice(self.itoa_buf.format(n).as_bytes());
    }

    /// Write a float in shortest round-trip form using ryu.
    #[inline]
    pub fn write_float(&mut self, f: f64) {
        self.line
            .extend_from_slice(self.ryu_buf.format(f).as_bytes());
    }

    #[inline]
    pub fn end_line(&mut self) {
        self.line.push(b'\n');
    }

    /// The bytes encoded since the last `clear`.
    #[inline]
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    /// Encode a record followed by a line terminator, replacing the buffer.
    #[inline]
    pub fn encode_line(&mut self, record: &EvidenceRecord) -> &[u8] {
        self.clear();
        record.encode(self);
        self.end_line();
        &self.line
    }
}

/// Uncompressed evidence writer. Produces no index.
pub struct PlainEvidenceWriter<W: Write> {
    writer: BufWriter<W>,
    encoder: LineEncoder,
}

impl<W: Write> PlainEvidenceWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_OUTPUT_BUFFER, output),
            encoder: LineEncoder::new(),
        }
    }

    pub fn write_header(&mut self, header: &str) -> io::Result<()> {
        self.writer.write_all(header.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    #[inline]
    pub fn add(&mut self, record: &EvidenceRecord) -> io::Result<()> {
        let line = self.encoder.encode_line(record);
        self.writer.write_all(line)
    }

    /// Flush and hand back the underlying stream.
    pub fn close(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

/// BGZF-compressed evidence writer that builds a tabix index as it goes.
///
/// Records must arrive sorted by contig and start for the index to be
/// usable; the writer does not re-sort.
pub struct IndexedEvidenceWriter<W: Write> {
    writer: bgzf::io::Writer<W>,
    indexer: tabix::index::Indexer,
    encoder: LineEncoder,
    kind: EvidenceKind,
    index_path: PathBuf,
    skipped_header_lines: u32,
}

impl<W: Write> IndexedEvidenceWriter<W> {
    /// Create a writer compressing at `compression_level` (0-9) whose index
    /// is written to `index_path` on close.
    pub fn new(
        output: W,
        index_path: PathBuf,
        kind: EvidenceKind,
        compression_level: u8,
    ) -> io::Result<Self> {
        let level = bgzf::io::writer::CompressionLevel::new(compression_level).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid compression level: {}", compression_level),
            )
        })?;

        let writer = bgzf::io::writer::Builder::default()
            .set_compression_level(level)
            .build_from_writer(output);

        Ok(Self {
            writer,
            indexer: tabix::index::Indexer::default(),
            encoder: LineEncoder::new(),
            kind,
            index_path,
            skipped_header_lines: 0,
        })
    }

    pub fn write_header(&mut self, header: &str) -> io::Result<()> {
        // Lines tabix cannot recognise as comments must be skipped by count.
        if header.lines().any(|line| !line.starts_with('#')) {
            self.skipped_header_lines = header.lines().count() as u32;
        }
        self.writer.write_all(header.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    pub fn add(&mut self, record: &EvidenceRecord) -> io::Result<()> {
        let chunk_start = self.writer.virtual_position();
        let line = self.encoder.encode_line(record);
        self.writer.write_all(line)?;
        let chunk_end = self.writer.virtual_position();

        // Index spans are 1-based inclusive; an empty span indexes its start.
        let (contig, start, end) = record.locus();
        let start = start.saturating_add(1);
        let end = end.max(start);

        self.indexer.add_record(
            contig,
            to_position(start)?,
            to_position(end)?,
            Chunk::new(chunk_start, chunk_end),
        )
    }

    /// Write the BGZF EOF block, then build and write the tabix index.
    pub fn close(mut self) -> io::Result<W> {
        let header = self.index_header();
        self.indexer.set_header(header);
        let index = self.indexer.build();

        let inner = self.writer.finish()?;

        let file = File::create(&self.index_path)?;
        let mut index_writer = tabix::io::Writer::new(file);
        index_writer.write_index(&index)?;

        Ok(inner)
    }

    /// Finish the compressed stream without building or writing an index.
    ///
    /// Used when a run fails part way, so the output is never left looking
    /// like a complete, indexed file.
    pub fn abort(self) -> io::Result<W> {
        self.writer.finish()
    }

    fn index_header(&self) -> index_header::Header {
        index_header::Builder::default()
            .set_format(Format::Generic(CoordinateSystem::Bed))
            .set_reference_sequence_name_index(0)
            .set_start_position_index(1)
            .set_end_position_index(self.kind.end_column())
            .set_line_comment_prefix(b'#')
            .set_line_skip_count(self.skipped_header_lines)
            .build()
    }
}

/// Convert a 1-based coordinate into an index position.
fn to_position(n: u64) -> io::Result<Position> {
    usize::try_from(n)
        .ok()
        .and_then(Position::new)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("position {} cannot be indexed", n),
            )
        })
}
